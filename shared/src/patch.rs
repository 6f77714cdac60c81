//! Partial updates of nullable columns
//!
//! An update body distinguishes three cases per nullable field: absent keeps
//! the stored value, `null` clears it, anything else replaces it.

use serde::{Deserialize, Deserializer};

/// Nullable field of an update body
pub type Patch<T> = Option<Option<T>>;

/// Deserialize a present field, including an explicit `null`, as `Some(_)`.
///
/// Pair with `#[serde(default)]` so an absent field stays `None`.
pub fn nullable<'de, T, D>(deserializer: D) -> Result<Patch<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Apply a patch on top of the stored value
pub fn merge<T>(patch: Patch<T>, existing: Option<T>) -> Option<T> {
    match patch {
        Some(value) => value,
        None => existing,
    }
}
