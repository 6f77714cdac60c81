//! Shared types and models for the marketplace
//!
//! Entity records, validate-then-construct inputs, password hashing, sales
//! aggregation and cascade planning. Nothing in this crate performs I/O; the
//! backend fetches rows and hands them in.

pub mod aggregation;
pub mod cascade;
pub mod models;
pub mod password;
pub mod patch;
pub mod validation;

pub use aggregation::*;
pub use cascade::*;
pub use models::*;
pub use password::{check_password, hash_password, PasswordError};
pub use patch::Patch;
pub use validation::{ValidationError, ValidationResult};
