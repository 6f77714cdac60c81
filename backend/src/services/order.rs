//! Order service

use serde::Deserialize;
use shared::{
    CreateOrderInput, DeleteRoot, DeletionSummary, NewOrder, Order, OrderChanges, OrderDetail,
    UpdateOrderInput,
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::services::cascade::CascadeService;
use crate::services::order_item::OrderItemService;

pub(crate) const ORDER_COLUMNS: &str = "id, customer_id, order_type, total_amount, order_status, \
     payment_status, payment_method, transaction_reference, delivery_address, delivery_status, \
     order_date";

#[derive(Debug, Default, Deserialize)]
pub struct OrderFilter {
    pub customer_id: Option<Uuid>,
    pub order_status: Option<String>,
    pub payment_status: Option<String>,
    pub delivery_status: Option<String>,
}

#[derive(Clone)]
pub struct OrderService {
    db: PgPool,
}

impl OrderService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List orders, most recent first
    pub async fn list_orders(&self, filter: &OrderFilter) -> AppResult<Vec<Order>> {
        let orders = sqlx::query_as::<_, Order>(&format!(
            r#"
            SELECT {ORDER_COLUMNS}
            FROM orders
            WHERE ($1::uuid IS NULL OR customer_id = $1)
              AND ($2::text IS NULL OR order_status = $2)
              AND ($3::text IS NULL OR payment_status = $3)
              AND ($4::text IS NULL OR delivery_status = $4)
            ORDER BY order_date DESC
            "#
        ))
        .bind(filter.customer_id)
        .bind(&filter.order_status)
        .bind(&filter.payment_status)
        .bind(&filter.delivery_status)
        .fetch_all(&self.db)
        .await?;

        Ok(orders)
    }

    pub async fn get_order(&self, order_id: Uuid) -> AppResult<Order> {
        sqlx::query_as::<_, Order>(&format!("SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1"))
            .bind(order_id)
            .fetch_optional(&self.db)
            .await?
            .ok_or_else(|| AppError::not_found("Order"))
    }

    /// Get an order with its line items
    pub async fn get_order_detail(&self, order_id: Uuid) -> AppResult<OrderDetail> {
        let order = self.get_order(order_id).await?;
        let items = OrderItemService::new(self.db.clone())
            .items_for_order(order_id)
            .await?;

        Ok(OrderDetail { order, items })
    }

    pub async fn create_order(&self, input: CreateOrderInput) -> AppResult<Order> {
        let new = NewOrder::validate(input)?;

        let order = sqlx::query_as::<_, Order>(&format!(
            r#"
            INSERT INTO orders (
                customer_id, order_type, total_amount, order_status, payment_status,
                payment_method, transaction_reference, delivery_address, delivery_status
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {ORDER_COLUMNS}
            "#
        ))
        .bind(new.customer_id)
        .bind(&new.order_type)
        .bind(new.total_amount)
        .bind(new.order_status.as_str())
        .bind(new.payment_status.as_str())
        .bind(&new.payment_method)
        .bind(&new.transaction_reference)
        .bind(&new.delivery_address)
        .bind(new.delivery_status.as_str())
        .fetch_one(&self.db)
        .await?;

        tracing::info!(order_id = %order.id, customer_id = %order.customer_id, "Order placed");
        Ok(order)
    }

    pub async fn update_order(&self, order_id: Uuid, input: UpdateOrderInput) -> AppResult<Order> {
        let existing = self.get_order(order_id).await?;
        let changes = OrderChanges::apply(&existing, input)?;

        let order = sqlx::query_as::<_, Order>(&format!(
            r#"
            UPDATE orders
            SET order_type = $1, total_amount = $2, order_status = $3, payment_status = $4,
                payment_method = $5, transaction_reference = $6, delivery_address = $7,
                delivery_status = $8
            WHERE id = $9
            RETURNING {ORDER_COLUMNS}
            "#
        ))
        .bind(&changes.order_type)
        .bind(changes.total_amount)
        .bind(changes.order_status.as_str())
        .bind(changes.payment_status.as_str())
        .bind(&changes.payment_method)
        .bind(&changes.transaction_reference)
        .bind(&changes.delivery_address)
        .bind(changes.delivery_status.as_str())
        .bind(order_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::not_found("Order"))?;

        if existing.order_status != order.order_status {
            tracing::info!(
                order_id = %order.id,
                from = existing.order_status.as_str(),
                to = order.order_status.as_str(),
                "Order status changed"
            );
        }
        Ok(order)
    }

    /// Delete an order and its items
    pub async fn delete_order(&self, order_id: Uuid) -> AppResult<DeletionSummary> {
        CascadeService::new(self.db.clone())
            .delete(DeleteRoot::Order(order_id))
            .await
    }
}
