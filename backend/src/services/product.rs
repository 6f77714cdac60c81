//! Product catalogue service

use rust_decimal::Decimal;
use serde::Deserialize;
use shared::{
    CreateProductInput, DeleteRoot, DeletionSummary, NewProduct, Product, ProductChanges,
    UpdateProductInput,
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::services::cascade::CascadeService;

pub(crate) const PRODUCT_COLUMNS: &str = "id, business_id, category_id, name, description, \
     price, bulk_price, min_bulk_quantity, stock_quantity, created_at";

#[derive(Debug, Default, Deserialize)]
pub struct ProductFilter {
    pub business_id: Option<Uuid>,
    pub category_id: Option<i32>,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub min_price: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub max_price: Option<Decimal>,
}

#[derive(Clone)]
pub struct ProductService {
    db: PgPool,
}

impl ProductService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List products, filtered by vendor, category and price range
    pub async fn list_products(&self, filter: &ProductFilter) -> AppResult<Vec<Product>> {
        if let (Some(min), Some(max)) = (filter.min_price, filter.max_price) {
            if min > max {
                return Err(AppError::Validation {
                    field: "min_price".to_string(),
                    message: "min_price cannot exceed max_price".to_string(),
                });
            }
        }

        let products = sqlx::query_as::<_, Product>(&format!(
            r#"
            SELECT {PRODUCT_COLUMNS}
            FROM products
            WHERE ($1::uuid IS NULL OR business_id = $1)
              AND ($2::int4 IS NULL OR category_id = $2)
              AND ($3::numeric IS NULL OR price >= $3)
              AND ($4::numeric IS NULL OR price <= $4)
            ORDER BY created_at DESC
            "#
        ))
        .bind(filter.business_id)
        .bind(filter.category_id)
        .bind(filter.min_price)
        .bind(filter.max_price)
        .fetch_all(&self.db)
        .await?;

        Ok(products)
    }

    pub async fn get_product(&self, product_id: Uuid) -> AppResult<Product> {
        sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(product_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::not_found("Product"))
    }

    pub async fn create_product(&self, input: CreateProductInput) -> AppResult<Product> {
        let new = NewProduct::validate(input)?;

        let product = sqlx::query_as::<_, Product>(&format!(
            r#"
            INSERT INTO products (
                business_id, category_id, name, description, price,
                bulk_price, min_bulk_quantity, stock_quantity
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(new.business_id)
        .bind(new.category_id)
        .bind(&new.name)
        .bind(&new.description)
        .bind(new.price)
        .bind(new.bulk_price)
        .bind(new.min_bulk_quantity)
        .bind(new.stock_quantity)
        .fetch_one(&self.db)
        .await?;

        tracing::info!(
            product_id = %product.id,
            business_id = %product.business_id,
            "Product created"
        );
        Ok(product)
    }

    pub async fn update_product(
        &self,
        product_id: Uuid,
        input: UpdateProductInput,
    ) -> AppResult<Product> {
        let existing = self.get_product(product_id).await?;
        let changes = ProductChanges::apply(&existing, input)?;

        let product = sqlx::query_as::<_, Product>(&format!(
            r#"
            UPDATE products
            SET category_id = $1, name = $2, description = $3, price = $4,
                bulk_price = $5, min_bulk_quantity = $6, stock_quantity = $7
            WHERE id = $8
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(changes.category_id)
        .bind(&changes.name)
        .bind(&changes.description)
        .bind(changes.price)
        .bind(changes.bulk_price)
        .bind(changes.min_bulk_quantity)
        .bind(changes.stock_quantity)
        .bind(product_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::not_found("Product"))?;

        Ok(product)
    }

    /// Delete a product and the order items that reference it
    pub async fn delete_product(&self, product_id: Uuid) -> AppResult<DeletionSummary> {
        CascadeService::new(self.db.clone())
            .delete(DeleteRoot::Product(product_id))
            .await
    }
}
