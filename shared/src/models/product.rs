//! Products listed by businesses

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::patch::{merge, nullable, Patch};
use crate::validation::{
    normalize_optional, require, validate_bulk_price, validate_min_bulk_quantity, validate_price,
    validate_product_name, validate_stock_quantity, ValidationResult,
};

/// A product listed by a business
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    pub id: Uuid,
    pub business_id: Uuid,
    pub category_id: Option<i32>,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    /// Unit price once `min_bulk_quantity` is reached
    pub bulk_price: Option<Decimal>,
    pub min_bulk_quantity: Option<i32>,
    pub stock_quantity: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateProductInput {
    pub business_id: Option<Uuid>,
    pub category_id: Option<i32>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub bulk_price: Option<Decimal>,
    pub min_bulk_quantity: Option<i32>,
    pub stock_quantity: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProductInput {
    #[serde(default, deserialize_with = "nullable")]
    pub category_id: Patch<i32>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    #[serde(default, deserialize_with = "nullable")]
    pub bulk_price: Patch<Decimal>,
    #[serde(default, deserialize_with = "nullable")]
    pub min_bulk_quantity: Patch<i32>,
    pub stock_quantity: Option<i32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub business_id: Uuid,
    pub category_id: Option<i32>,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub bulk_price: Option<Decimal>,
    pub min_bulk_quantity: Option<i32>,
    pub stock_quantity: i32,
}

impl NewProduct {
    pub fn validate(input: CreateProductInput) -> ValidationResult<Self> {
        let business_id = require("business_id", input.business_id)?;
        let name = validate_product_name(&require("name", input.name)?)?;
        let price = validate_price(require("price", input.price)?)?;

        Ok(Self {
            business_id,
            category_id: input.category_id,
            name,
            description: normalize_optional(input.description),
            price,
            bulk_price: validate_bulk_price(input.bulk_price)?,
            min_bulk_quantity: validate_min_bulk_quantity(input.min_bulk_quantity)?,
            stock_quantity: validate_stock_quantity(input.stock_quantity.unwrap_or(0))?,
        })
    }
}

/// Mutable product columns after an update is merged
#[derive(Debug, Clone, PartialEq)]
pub struct ProductChanges {
    pub category_id: Option<i32>,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub bulk_price: Option<Decimal>,
    pub min_bulk_quantity: Option<i32>,
    pub stock_quantity: i32,
}

impl ProductChanges {
    pub fn apply(existing: &Product, input: UpdateProductInput) -> ValidationResult<Self> {
        Ok(Self {
            category_id: merge(input.category_id, existing.category_id),
            name: validate_product_name(input.name.as_deref().unwrap_or(&existing.name))?,
            description: match input.description {
                Some(description) => normalize_optional(Some(description)),
                None => existing.description.clone(),
            },
            price: validate_price(input.price.unwrap_or(existing.price))?,
            bulk_price: validate_bulk_price(merge(input.bulk_price, existing.bulk_price))?,
            min_bulk_quantity: validate_min_bulk_quantity(
                merge(input.min_bulk_quantity, existing.min_bulk_quantity),
            )?,
            stock_quantity: validate_stock_quantity(
                input.stock_quantity.unwrap_or(existing.stock_quantity),
            )?,
        })
    }
}
