//! Orders placed by customers

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::OrderItem;
use crate::validation::{
    normalize_optional, not_one_of, parse_optional, require, validate_total_amount,
    ValidationError, ValidationResult,
};

/// Lifecycle of an order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Processing,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub const ALLOWED: &'static [&'static str] =
        &["pending", "confirmed", "processing", "completed", "cancelled"];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Processing => "processing",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(OrderStatus::Pending),
            "confirmed" => Ok(OrderStatus::Confirmed),
            "processing" => Ok(OrderStatus::Processing),
            "completed" => Ok(OrderStatus::Completed),
            "cancelled" => Ok(OrderStatus::Cancelled),
            _ => Err(not_one_of("order_status", "Order status", Self::ALLOWED)),
        }
    }
}

/// Payment state of an order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    #[default]
    Unpaid,
    Paid,
    Refunded,
}

impl PaymentStatus {
    pub const ALLOWED: &'static [&'static str] = &["unpaid", "paid", "refunded"];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Unpaid => "unpaid",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Refunded => "refunded",
        }
    }
}

impl std::str::FromStr for PaymentStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unpaid" => Ok(PaymentStatus::Unpaid),
            "paid" => Ok(PaymentStatus::Paid),
            "refunded" => Ok(PaymentStatus::Refunded),
            _ => Err(not_one_of("payment_status", "Payment status", Self::ALLOWED)),
        }
    }
}

/// Delivery state of an order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryStatus {
    #[default]
    NotShipped,
    Shipped,
    InTransit,
    Delivered,
}

impl DeliveryStatus {
    pub const ALLOWED: &'static [&'static str] =
        &["not_shipped", "shipped", "in_transit", "delivered"];

    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryStatus::NotShipped => "not_shipped",
            DeliveryStatus::Shipped => "shipped",
            DeliveryStatus::InTransit => "in_transit",
            DeliveryStatus::Delivered => "delivered",
        }
    }
}

impl std::str::FromStr for DeliveryStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "not_shipped" => Ok(DeliveryStatus::NotShipped),
            "shipped" => Ok(DeliveryStatus::Shipped),
            "in_transit" => Ok(DeliveryStatus::InTransit),
            "delivered" => Ok(DeliveryStatus::Delivered),
            _ => Err(not_one_of("delivery_status", "Delivery status", Self::ALLOWED)),
        }
    }
}

impl TryFrom<String> for OrderStatus {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl TryFrom<String> for PaymentStatus {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl TryFrom<String> for DeliveryStatus {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// An order placed by a customer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Order {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub order_type: Option<String>,
    pub total_amount: Decimal,
    #[cfg_attr(feature = "sqlx", sqlx(try_from = "String"))]
    pub order_status: OrderStatus,
    #[cfg_attr(feature = "sqlx", sqlx(try_from = "String"))]
    pub payment_status: PaymentStatus,
    pub payment_method: Option<String>,
    pub transaction_reference: Option<String>,
    pub delivery_address: Option<String>,
    #[cfg_attr(feature = "sqlx", sqlx(try_from = "String"))]
    pub delivery_status: DeliveryStatus,
    pub order_date: DateTime<Utc>,
}

/// Order with its line items
#[derive(Debug, Clone, Serialize)]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItem>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateOrderInput {
    pub customer_id: Option<Uuid>,
    pub order_type: Option<String>,
    pub total_amount: Option<Decimal>,
    pub order_status: Option<String>,
    pub payment_status: Option<String>,
    pub payment_method: Option<String>,
    pub transaction_reference: Option<String>,
    pub delivery_address: Option<String>,
    pub delivery_status: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateOrderInput {
    pub order_type: Option<String>,
    pub total_amount: Option<Decimal>,
    pub order_status: Option<String>,
    pub payment_status: Option<String>,
    pub payment_method: Option<String>,
    pub transaction_reference: Option<String>,
    pub delivery_address: Option<String>,
    pub delivery_status: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub customer_id: Uuid,
    pub order_type: Option<String>,
    pub total_amount: Decimal,
    pub order_status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub payment_method: Option<String>,
    pub transaction_reference: Option<String>,
    pub delivery_address: Option<String>,
    pub delivery_status: DeliveryStatus,
}

impl NewOrder {
    pub fn validate(input: CreateOrderInput) -> ValidationResult<Self> {
        let customer_id = require("customer_id", input.customer_id)?;
        let total_amount = validate_total_amount(require("total_amount", input.total_amount)?)?;

        Ok(Self {
            customer_id,
            order_type: normalize_optional(input.order_type),
            total_amount,
            order_status: parse_optional(input.order_status.as_deref())?.unwrap_or_default(),
            payment_status: parse_optional(input.payment_status.as_deref())?.unwrap_or_default(),
            payment_method: normalize_optional(input.payment_method),
            transaction_reference: normalize_optional(input.transaction_reference),
            delivery_address: normalize_optional(input.delivery_address),
            delivery_status: parse_optional(input.delivery_status.as_deref())?.unwrap_or_default(),
        })
    }
}

/// Mutable order columns after an update is merged
#[derive(Debug, Clone, PartialEq)]
pub struct OrderChanges {
    pub order_type: Option<String>,
    pub total_amount: Decimal,
    pub order_status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub payment_method: Option<String>,
    pub transaction_reference: Option<String>,
    pub delivery_address: Option<String>,
    pub delivery_status: DeliveryStatus,
}

impl OrderChanges {
    pub fn apply(existing: &Order, input: UpdateOrderInput) -> ValidationResult<Self> {
        let text = |update: Option<String>, current: &Option<String>| match update {
            Some(value) => normalize_optional(Some(value)),
            None => current.clone(),
        };

        Ok(Self {
            order_type: text(input.order_type, &existing.order_type),
            total_amount: validate_total_amount(
                input.total_amount.unwrap_or(existing.total_amount),
            )?,
            order_status: parse_optional(input.order_status.as_deref())?
                .unwrap_or(existing.order_status),
            payment_status: parse_optional(input.payment_status.as_deref())?
                .unwrap_or(existing.payment_status),
            payment_method: text(input.payment_method, &existing.payment_method),
            transaction_reference: text(
                input.transaction_reference,
                &existing.transaction_reference,
            ),
            delivery_address: text(input.delivery_address, &existing.delivery_address),
            delivery_status: parse_optional(input.delivery_status.as_deref())?
                .unwrap_or(existing.delivery_status),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order() -> Order {
        Order {
            id: Uuid::new_v4(),
            customer_id: Uuid::new_v4(),
            order_type: Some("retail".into()),
            total_amount: Decimal::from(7200),
            order_status: OrderStatus::Pending,
            payment_status: PaymentStatus::Unpaid,
            payment_method: Some("mpesa".into()),
            transaction_reference: None,
            delivery_address: None,
            delivery_status: DeliveryStatus::NotShipped,
            order_date: Utc::now(),
        }
    }

    #[test]
    fn test_defaults_applied_on_create() {
        let new = NewOrder::validate(CreateOrderInput {
            customer_id: Some(Uuid::new_v4()),
            total_amount: Some(Decimal::from(45000)),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(new.order_status, OrderStatus::Pending);
        assert_eq!(new.payment_status, PaymentStatus::Unpaid);
        assert_eq!(new.delivery_status, DeliveryStatus::NotShipped);
    }

    #[test]
    fn test_missing_total_rejected() {
        let err = NewOrder::validate(CreateOrderInput {
            customer_id: Some(Uuid::new_v4()),
            ..Default::default()
        })
        .unwrap_err();
        assert_eq!(err.field, "total_amount");
    }

    #[test]
    fn test_unknown_order_status_rejected_on_update() {
        let err = OrderChanges::apply(
            &order(),
            UpdateOrderInput {
                order_status: Some("shipped_fast".into()),
                ..Default::default()
            },
        )
        .unwrap_err();
        assert_eq!(err.field, "order_status");
    }

    #[test]
    fn test_completed_accepted_on_update() {
        let changes = OrderChanges::apply(
            &order(),
            UpdateOrderInput {
                order_status: Some("completed".into()),
                payment_status: Some("paid".into()),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(changes.order_status, OrderStatus::Completed);
        assert_eq!(changes.payment_status, PaymentStatus::Paid);
        assert_eq!(changes.delivery_status, DeliveryStatus::NotShipped);
    }

    #[test]
    fn test_delivery_status_wire_names() {
        assert_eq!(
            serde_json::to_string(&DeliveryStatus::InTransit).unwrap(),
            "\"in_transit\""
        );
        assert_eq!(
            "not_shipped".parse::<DeliveryStatus>().unwrap(),
            DeliveryStatus::NotShipped
        );
    }
}
