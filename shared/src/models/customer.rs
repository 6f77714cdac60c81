//! Customer profiles

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Order;
use crate::validation::{
    normalize_optional, not_one_of, require, ValidationError, ValidationResult,
};

/// How a customer buys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CustomerType {
    Wholesaler,
    Retailer,
}

impl CustomerType {
    pub const ALLOWED: &'static [&'static str] = &["WHOLESALER", "RETAILER"];

    pub fn as_str(&self) -> &'static str {
        match self {
            CustomerType::Wholesaler => "WHOLESALER",
            CustomerType::Retailer => "RETAILER",
        }
    }
}

impl std::str::FromStr for CustomerType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "WHOLESALER" => Ok(CustomerType::Wholesaler),
            "RETAILER" => Ok(CustomerType::Retailer),
            _ => Err(not_one_of("customer_type", "Customer type", Self::ALLOWED)),
        }
    }
}

impl TryFrom<String> for CustomerType {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl std::fmt::Display for CustomerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A buying account, owned by exactly one user
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Customer {
    pub id: Uuid,
    pub user_id: Uuid,
    #[cfg_attr(feature = "sqlx", sqlx(try_from = "String"))]
    pub customer_type: CustomerType,
    pub business_name: Option<String>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Customer with its order history
#[derive(Debug, Clone, Serialize)]
pub struct CustomerDetail {
    #[serde(flatten)]
    pub customer: Customer,
    pub orders: Vec<Order>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateCustomerInput {
    pub user_id: Option<Uuid>,
    pub customer_type: Option<String>,
    pub business_name: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCustomerInput {
    pub customer_type: Option<String>,
    pub business_name: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewCustomer {
    pub user_id: Uuid,
    pub customer_type: CustomerType,
    pub business_name: Option<String>,
    pub address: Option<String>,
}

impl NewCustomer {
    pub fn validate(input: CreateCustomerInput) -> ValidationResult<Self> {
        let user_id = require("user_id", input.user_id)?;
        let customer_type = require("customer_type", input.customer_type)?.parse()?;

        Ok(Self {
            user_id,
            customer_type,
            business_name: normalize_optional(input.business_name),
            address: normalize_optional(input.address),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CustomerChanges {
    pub customer_type: CustomerType,
    pub business_name: Option<String>,
    pub address: Option<String>,
}

impl CustomerChanges {
    pub fn apply(existing: &Customer, input: UpdateCustomerInput) -> ValidationResult<Self> {
        let customer_type = match input.customer_type {
            Some(value) => value.parse()?,
            None => existing.customer_type,
        };

        Ok(Self {
            customer_type,
            business_name: match input.business_name {
                Some(name) => normalize_optional(Some(name)),
                None => existing.business_name.clone(),
            },
            address: match input.address {
                Some(address) => normalize_optional(Some(address)),
                None => existing.address.clone(),
            },
        })
    }
}
