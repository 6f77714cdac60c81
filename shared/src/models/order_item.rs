//! Order line items

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::aggregation::SaleLine;
use crate::validation::{require, validate_quantity, validate_unit_price, ValidationResult};

/// A line linking an order to a product
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct OrderItem {
    pub id: Uuid,
    pub order_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    pub unit_price: Decimal,
}

impl OrderItem {
    pub fn line(&self) -> SaleLine {
        SaleLine {
            quantity: self.quantity,
            unit_price: self.unit_price,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateOrderItemInput {
    pub order_id: Option<Uuid>,
    pub product_id: Option<Uuid>,
    pub quantity: Option<i32>,
    pub unit_price: Option<Decimal>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateOrderItemInput {
    pub quantity: Option<i32>,
    pub unit_price: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewOrderItem {
    pub order_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    pub unit_price: Decimal,
}

impl NewOrderItem {
    pub fn validate(input: CreateOrderItemInput) -> ValidationResult<Self> {
        Ok(Self {
            order_id: require("order_id", input.order_id)?,
            product_id: require("product_id", input.product_id)?,
            quantity: validate_quantity(require("quantity", input.quantity)?)?,
            unit_price: validate_unit_price(require("unit_price", input.unit_price)?)?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderItemChanges {
    pub quantity: i32,
    pub unit_price: Decimal,
}

impl OrderItemChanges {
    pub fn apply(existing: &OrderItem, input: UpdateOrderItemInput) -> ValidationResult<Self> {
        Ok(Self {
            quantity: validate_quantity(input.quantity.unwrap_or(existing.quantity))?,
            unit_price: validate_unit_price(input.unit_price.unwrap_or(existing.unit_price))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(quantity: i32) -> CreateOrderItemInput {
        CreateOrderItemInput {
            order_id: Some(Uuid::new_v4()),
            product_id: Some(Uuid::new_v4()),
            quantity: Some(quantity),
            unit_price: Some(Decimal::from(3500)),
        }
    }

    #[test]
    fn test_zero_quantity_rejected() {
        assert_eq!(NewOrderItem::validate(input(0)).unwrap_err().field, "quantity");
    }

    #[test]
    fn test_single_unit_accepted() {
        assert_eq!(NewOrderItem::validate(input(1)).unwrap().quantity, 1);
    }

    #[test]
    fn test_update_revalidates_unit_price() {
        let item = OrderItem {
            id: Uuid::new_v4(),
            order_id: Uuid::new_v4(),
            product_id: Uuid::new_v4(),
            quantity: 2,
            unit_price: Decimal::from(3500),
        };
        let err = OrderItemChanges::apply(
            &item,
            UpdateOrderItemInput {
                quantity: None,
                unit_price: Some(Decimal::ZERO),
            },
        )
        .unwrap_err();
        assert_eq!(err.field, "unit_price");
    }
}
