//! Field validation for marketplace records
//!
//! Every rule is a plain function that either hands back the normalized value
//! or fails with a [`ValidationError`] naming the field. The same functions run
//! on create and on update, so a mutation can never skip a rule.

use rust_decimal::Decimal;
use thiserror::Error;

/// Minimum length of a raw password before hashing
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// bcrypt ignores every byte past this one
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Upper bound of a business rating
pub const MAX_RATING: u32 = 5;

/// Money columns are stored as NUMERIC(10, 2)
pub const MONEY_PRECISION: u32 = 10;
pub const MONEY_SCALE: u32 = 2;

/// Ratings are stored as NUMERIC(3, 2)
pub const RATING_PRECISION: u32 = 3;

/// A rejected field value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }

    /// Error for a required field that was not supplied
    pub fn required(field: &'static str) -> Self {
        Self::new(field, format!("{} is required", field))
    }
}

pub type ValidationResult<T> = Result<T, ValidationError>;

/// Unwrap a required field or report it missing
pub fn require<T>(field: &'static str, value: Option<T>) -> ValidationResult<T> {
    value.ok_or_else(|| ValidationError::required(field))
}

// ============================================================================
// Text fields
// ============================================================================

/// Trim a required text field and reject it when nothing is left
pub fn validate_non_empty(field: &'static str, value: &str) -> ValidationResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::required(field));
    }
    Ok(trimmed.to_string())
}

pub fn validate_full_name(value: &str) -> ValidationResult<String> {
    validate_non_empty("full_name", value)
}

/// Validate email format (basic check)
pub fn validate_email(value: &str) -> ValidationResult<String> {
    let email = validate_non_empty("email", value)?;
    if !email.contains('@') {
        return Err(ValidationError::new("email", "Invalid email address"));
    }
    Ok(email)
}

/// Validate raw password length.
///
/// The lower bound counts characters. The upper bound counts bytes, since two
/// passwords sharing their first 72 bytes would hash alike.
pub fn validate_password(value: &str) -> ValidationResult<&str> {
    if value.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::new(
            "password",
            format!(
                "Password must be at least {} characters long",
                MIN_PASSWORD_LENGTH
            ),
        ));
    }
    if value.len() > MAX_PASSWORD_BYTES {
        return Err(ValidationError::new(
            "password",
            format!("Password must be at most {} bytes long", MAX_PASSWORD_BYTES),
        ));
    }
    Ok(value)
}

pub fn validate_business_name(value: &str) -> ValidationResult<String> {
    validate_non_empty("business_name", value)
}

pub fn validate_product_name(value: &str) -> ValidationResult<String> {
    validate_non_empty("name", value)
}

/// Trim optional text, collapsing blank strings to `None`
pub fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

// ============================================================================
// Numeric fields
// ============================================================================

/// Reject values a NUMERIC(precision, scale) column would round or overflow
pub fn validate_numeric_fit(
    field: &'static str,
    label: &str,
    value: Decimal,
    precision: u32,
    scale: u32,
) -> ValidationResult<Decimal> {
    if value.normalize().scale() > scale {
        return Err(ValidationError::new(
            field,
            format!("{} must have at most {} decimal places", label, scale),
        ));
    }
    let limit = Decimal::from(10_i64.pow(precision - scale));
    if value.abs() >= limit {
        return Err(ValidationError::new(
            field,
            format!("{} must be less than {}", label, limit),
        ));
    }
    Ok(value)
}

/// Rating must lie within [0, 5] when present
pub fn validate_rating(value: Option<Decimal>) -> ValidationResult<Option<Decimal>> {
    match value {
        Some(rating) if rating < Decimal::ZERO || rating > Decimal::from(MAX_RATING) => {
            Err(ValidationError::new(
                "rating",
                format!("Rating must be between 0 and {}", MAX_RATING),
            ))
        }
        Some(rating) => {
            validate_numeric_fit("rating", "Rating", rating, RATING_PRECISION, MONEY_SCALE)
                .map(Some)
        }
        None => Ok(None),
    }
}

fn non_negative_decimal(
    field: &'static str,
    label: &str,
    value: Decimal,
) -> ValidationResult<Decimal> {
    if value < Decimal::ZERO {
        return Err(ValidationError::new(
            field,
            format!("{} must be non-negative", label),
        ));
    }
    validate_numeric_fit(field, label, value, MONEY_PRECISION, MONEY_SCALE)
}

fn positive_decimal(
    field: &'static str,
    label: &str,
    value: Decimal,
) -> ValidationResult<Decimal> {
    if value <= Decimal::ZERO {
        return Err(ValidationError::new(
            field,
            format!("{} must be greater than zero", label),
        ));
    }
    validate_numeric_fit(field, label, value, MONEY_PRECISION, MONEY_SCALE)
}

pub fn validate_price(value: Decimal) -> ValidationResult<Decimal> {
    non_negative_decimal("price", "Price", value)
}

pub fn validate_bulk_price(value: Option<Decimal>) -> ValidationResult<Option<Decimal>> {
    value
        .map(|v| non_negative_decimal("bulk_price", "Bulk price", v))
        .transpose()
}

pub fn validate_min_bulk_quantity(value: Option<i32>) -> ValidationResult<Option<i32>> {
    match value {
        Some(q) if q < 0 => Err(ValidationError::new(
            "min_bulk_quantity",
            "Minimum bulk quantity must be non-negative",
        )),
        other => Ok(other),
    }
}

pub fn validate_stock_quantity(value: i32) -> ValidationResult<i32> {
    if value < 0 {
        return Err(ValidationError::new(
            "stock_quantity",
            "Stock quantity must be non-negative",
        ));
    }
    Ok(value)
}

pub fn validate_total_amount(value: Decimal) -> ValidationResult<Decimal> {
    non_negative_decimal("total_amount", "Total amount", value)
}

pub fn validate_quantity(value: i32) -> ValidationResult<i32> {
    if value <= 0 {
        return Err(ValidationError::new(
            "quantity",
            "Quantity must be greater than zero",
        ));
    }
    Ok(value)
}

pub fn validate_unit_price(value: Decimal) -> ValidationResult<Decimal> {
    positive_decimal("unit_price", "Unit price", value)
}

// ============================================================================
// Enumerated fields
// ============================================================================

/// Parse an optional enum value, accepting absence
pub fn parse_optional<T>(value: Option<&str>) -> ValidationResult<Option<T>>
where
    T: std::str::FromStr<Err = ValidationError>,
{
    value.map(str::parse).transpose()
}

/// Build the error for a value outside an allowed set
pub fn not_one_of(field: &'static str, label: &str, allowed: &[&str]) -> ValidationError {
    ValidationError::new(
        field,
        format!("{} must be one of: {}", label, allowed.join(", ")),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_full_name_is_trimmed() {
        assert_eq!(validate_full_name("  Grace Wanjiru ").unwrap(), "Grace Wanjiru");
    }

    #[test]
    fn test_full_name_blank_rejected() {
        let err = validate_full_name("   ").unwrap_err();
        assert_eq!(err.field, "full_name");
        assert_eq!(err.message, "full_name is required");
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("fatuma@marketmtaani.com").is_ok());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("").is_err());
    }

    #[test]
    fn test_validate_password_length() {
        assert!(validate_password("s3cret").is_ok());
        assert!(validate_password("short").is_err());
        // Multi-byte characters count once each
        assert!(validate_password("ñññññ").is_err());
        assert!(validate_password("ññññññ").is_ok());
    }

    #[test]
    fn test_password_sharing_bcrypt_prefix_rejected() {
        let at_limit = "a".repeat(MAX_PASSWORD_BYTES);
        assert!(validate_password(&at_limit).is_ok());

        let over = format!("{}correct-suffix", at_limit);
        let err = validate_password(&over).unwrap_err();
        assert_eq!(err.field, "password");

        // 24 three-byte characters fill the limit exactly
        assert!(validate_password(&"€".repeat(24)).is_ok());
        assert!(validate_password(&"€".repeat(25)).is_err());
    }

    #[test]
    fn test_validate_rating_bounds() {
        assert!(validate_rating(None).is_ok());
        assert!(validate_rating(Some(dec("0"))).is_ok());
        assert!(validate_rating(Some(dec("5.00"))).is_ok());
        assert!(validate_rating(Some(dec("5.01"))).is_err());
        assert!(validate_rating(Some(dec("-0.1"))).is_err());
    }

    #[test]
    fn test_validate_price_zero_allowed() {
        assert_eq!(validate_price(Decimal::ZERO).unwrap(), Decimal::ZERO);
        let err = validate_price(dec("-1")).unwrap_err();
        assert_eq!(err.field, "price");
    }

    #[test]
    fn test_validate_quantity_strictly_positive() {
        assert!(validate_quantity(0).is_err());
        assert_eq!(validate_quantity(1).unwrap(), 1);
    }

    #[test]
    fn test_validate_unit_price_strictly_positive() {
        assert!(validate_unit_price(Decimal::ZERO).is_err());
        assert!(validate_unit_price(dec("0.01")).is_ok());
    }

    #[test]
    fn test_money_must_fit_numeric_10_2() {
        assert!(validate_price(dec("99999999.99")).is_ok());
        let err = validate_price(dec("100000000")).unwrap_err();
        assert_eq!(err.field, "price");
        assert!(validate_total_amount(dec("100000000")).is_err());
        assert!(validate_bulk_price(Some(dec("1.005"))).is_err());

        let err = validate_unit_price(dec("0.001")).unwrap_err();
        assert_eq!(err.field, "unit_price");
        assert_eq!(err.message, "Unit price must have at most 2 decimal places");

        // Trailing zeros do not count as precision
        assert!(validate_unit_price(dec("12.5000")).is_ok());
    }

    #[test]
    fn test_rating_scale() {
        assert!(validate_rating(Some(dec("4.75"))).is_ok());
        let err = validate_rating(Some(dec("4.999"))).unwrap_err();
        assert_eq!(err.field, "rating");
    }

    #[test]
    fn test_optional_numeric_rules() {
        assert!(validate_bulk_price(None).is_ok());
        assert!(validate_bulk_price(Some(dec("-1"))).is_err());
        assert!(validate_min_bulk_quantity(Some(-1)).is_err());
        assert!(validate_min_bulk_quantity(Some(0)).is_ok());
        assert!(validate_stock_quantity(-1).is_err());
    }

    #[test]
    fn test_normalize_optional() {
        assert_eq!(normalize_optional(Some("  ".into())), None);
        assert_eq!(
            normalize_optional(Some(" Shop 23 ".into())),
            Some("Shop 23".to_string())
        );
        assert_eq!(normalize_optional(None), None);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_normalize_is_idempotent(raw in "\\PC{0,24}") {
                let once = normalize_optional(Some(raw));
                prop_assert_eq!(normalize_optional(once.clone()), once);
            }

            #[test]
            fn prop_password_length_rule(password in "\\PC{0,12}") {
                let long_enough = password.chars().count() >= MIN_PASSWORD_LENGTH;
                prop_assert_eq!(validate_password(&password).is_ok(), long_enough);
            }

            #[test]
            fn prop_accepted_money_round_trips_through_storage(cents in 0i64..10_000_000_000i64) {
                let price = Decimal::new(cents, 2);
                prop_assert!(validate_price(price).is_ok());
                prop_assert!(validate_price(Decimal::new(cents * 10 + 1, 3)).is_err());
            }
        }
    }
}
