//! Businesses (vendors) selling on the marketplace

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Product;
use crate::patch::{merge, nullable, Patch};
use crate::validation::{
    not_one_of, parse_optional, require, validate_business_name, validate_rating,
    ValidationError, ValidationResult,
};

/// Verification state of a business
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    #[default]
    Pending,
    Verified,
    Rejected,
}

impl VerificationStatus {
    pub const ALLOWED: &'static [&'static str] = &["pending", "verified", "rejected"];

    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationStatus::Pending => "pending",
            VerificationStatus::Verified => "verified",
            VerificationStatus::Rejected => "rejected",
        }
    }
}

impl std::str::FromStr for VerificationStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(VerificationStatus::Pending),
            "verified" => Ok(VerificationStatus::Verified),
            "rejected" => Ok(VerificationStatus::Rejected),
            _ => Err(not_one_of(
                "verification_status",
                "Verification status",
                Self::ALLOWED,
            )),
        }
    }
}

impl TryFrom<String> for VerificationStatus {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl std::fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A registered business, owned by exactly one user
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Business {
    pub id: Uuid,
    pub user_id: Uuid,
    pub business_name: String,
    #[cfg_attr(feature = "sqlx", sqlx(try_from = "String"))]
    pub verification_status: VerificationStatus,
    pub rating: Option<Decimal>,
    pub created_at: DateTime<Utc>,
}

/// Business with the products it lists
#[derive(Debug, Clone, Serialize)]
pub struct BusinessDetail {
    #[serde(flatten)]
    pub business: Business,
    pub products: Vec<Product>,
}

/// Input for registering a business
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateBusinessInput {
    pub user_id: Option<Uuid>,
    pub business_name: Option<String>,
    pub verification_status: Option<String>,
    pub rating: Option<Decimal>,
}

/// Input for updating a business
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateBusinessInput {
    pub business_name: Option<String>,
    pub verification_status: Option<String>,
    /// `null` clears the rating
    #[serde(default, deserialize_with = "nullable")]
    pub rating: Patch<Decimal>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewBusiness {
    pub user_id: Uuid,
    pub business_name: String,
    pub verification_status: VerificationStatus,
    pub rating: Option<Decimal>,
}

impl NewBusiness {
    pub fn validate(input: CreateBusinessInput) -> ValidationResult<Self> {
        let user_id = require("user_id", input.user_id)?;
        let business_name =
            validate_business_name(&require("business_name", input.business_name)?)?;
        let verification_status =
            parse_optional(input.verification_status.as_deref())?.unwrap_or_default();
        let rating = validate_rating(input.rating)?;

        Ok(Self {
            user_id,
            business_name,
            verification_status,
            rating,
        })
    }
}

/// Mutable business columns after an update is merged
#[derive(Debug, Clone, PartialEq)]
pub struct BusinessChanges {
    pub business_name: String,
    pub verification_status: VerificationStatus,
    pub rating: Option<Decimal>,
}

impl BusinessChanges {
    pub fn apply(existing: &Business, input: UpdateBusinessInput) -> ValidationResult<Self> {
        let business_name = validate_business_name(
            input
                .business_name
                .as_deref()
                .unwrap_or(&existing.business_name),
        )?;
        let verification_status = parse_optional(input.verification_status.as_deref())?
            .unwrap_or(existing.verification_status);
        let rating = validate_rating(merge(input.rating, existing.rating))?;

        Ok(Self {
            business_name,
            verification_status,
            rating,
        })
    }
}
