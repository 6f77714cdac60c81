//! Order item service

use serde::Deserialize;
use shared::{
    CreateOrderItemInput, DeleteRoot, DeletionSummary, NewOrderItem, OrderItem, OrderItemChanges,
    UpdateOrderItemInput,
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::services::cascade::CascadeService;

const ORDER_ITEM_COLUMNS: &str = "id, order_id, product_id, quantity, unit_price";

#[derive(Debug, Default, Deserialize)]
pub struct OrderItemFilter {
    pub order_id: Option<Uuid>,
    pub product_id: Option<Uuid>,
}

#[derive(Clone)]
pub struct OrderItemService {
    db: PgPool,
}

impl OrderItemService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn list_order_items(&self, filter: &OrderItemFilter) -> AppResult<Vec<OrderItem>> {
        let items = sqlx::query_as::<_, OrderItem>(&format!(
            r#"
            SELECT {ORDER_ITEM_COLUMNS}
            FROM order_items
            WHERE ($1::uuid IS NULL OR order_id = $1)
              AND ($2::uuid IS NULL OR product_id = $2)
            ORDER BY order_id, id
            "#
        ))
        .bind(filter.order_id)
        .bind(filter.product_id)
        .fetch_all(&self.db)
        .await?;

        Ok(items)
    }

    /// Items of one order; NotFound when the order does not exist
    pub async fn list_items_of_order(&self, order_id: Uuid) -> AppResult<Vec<OrderItem>> {
        self.ensure_order_exists(order_id).await?;
        self.items_for_order(order_id).await
    }

    pub(crate) async fn items_for_order(&self, order_id: Uuid) -> AppResult<Vec<OrderItem>> {
        self.list_order_items(&OrderItemFilter {
            order_id: Some(order_id),
            product_id: None,
        })
        .await
    }

    pub async fn get_order_item(&self, item_id: Uuid) -> AppResult<OrderItem> {
        sqlx::query_as::<_, OrderItem>(&format!(
            "SELECT {ORDER_ITEM_COLUMNS} FROM order_items WHERE id = $1"
        ))
        .bind(item_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::not_found("Order item"))
    }

    pub async fn create_order_item(&self, input: CreateOrderItemInput) -> AppResult<OrderItem> {
        let new = NewOrderItem::validate(input)?;

        let item = sqlx::query_as::<_, OrderItem>(&format!(
            r#"
            INSERT INTO order_items (order_id, product_id, quantity, unit_price)
            VALUES ($1, $2, $3, $4)
            RETURNING {ORDER_ITEM_COLUMNS}
            "#
        ))
        .bind(new.order_id)
        .bind(new.product_id)
        .bind(new.quantity)
        .bind(new.unit_price)
        .fetch_one(&self.db)
        .await?;

        tracing::info!(
            item_id = %item.id,
            order_id = %item.order_id,
            product_id = %item.product_id,
            "Order item added"
        );
        Ok(item)
    }

    /// Add an item to the order named in the path
    pub async fn add_item_to_order(
        &self,
        order_id: Uuid,
        mut input: CreateOrderItemInput,
    ) -> AppResult<OrderItem> {
        self.ensure_order_exists(order_id).await?;
        input.order_id = Some(order_id);
        self.create_order_item(input).await
    }

    pub async fn update_order_item(
        &self,
        item_id: Uuid,
        input: UpdateOrderItemInput,
    ) -> AppResult<OrderItem> {
        let existing = self.get_order_item(item_id).await?;
        let changes = OrderItemChanges::apply(&existing, input)?;

        let item = sqlx::query_as::<_, OrderItem>(&format!(
            r#"
            UPDATE order_items
            SET quantity = $1, unit_price = $2
            WHERE id = $3
            RETURNING {ORDER_ITEM_COLUMNS}
            "#
        ))
        .bind(changes.quantity)
        .bind(changes.unit_price)
        .bind(item_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::not_found("Order item"))?;

        Ok(item)
    }

    pub async fn delete_order_item(&self, item_id: Uuid) -> AppResult<DeletionSummary> {
        CascadeService::new(self.db.clone())
            .delete(DeleteRoot::OrderItem(item_id))
            .await
    }

    async fn ensure_order_exists(&self, order_id: Uuid) -> AppResult<()> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM orders WHERE id = $1)")
            .bind(order_id)
            .fetch_one(&self.db)
            .await?;

        if exists {
            Ok(())
        } else {
            Err(AppError::not_found("Order"))
        }
    }
}
