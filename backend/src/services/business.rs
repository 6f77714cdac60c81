//! Business (vendor) service

use serde::Deserialize;
use shared::{
    Business, BusinessChanges, BusinessDetail, CreateBusinessInput, DeleteRoot, DeletionSummary,
    NewBusiness, Product, UpdateBusinessInput,
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::services::cascade::CascadeService;
use crate::services::product::PRODUCT_COLUMNS;

pub(crate) const BUSINESS_COLUMNS: &str =
    "id, user_id, business_name, verification_status, rating, created_at";

#[derive(Debug, Default, Deserialize)]
pub struct BusinessFilter {
    pub verification_status: Option<String>,
    pub user_id: Option<Uuid>,
}

#[derive(Clone)]
pub struct BusinessService {
    db: PgPool,
}

impl BusinessService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List businesses, newest first
    pub async fn list_businesses(&self, filter: &BusinessFilter) -> AppResult<Vec<Business>> {
        let businesses = sqlx::query_as::<_, Business>(&format!(
            r#"
            SELECT {BUSINESS_COLUMNS}
            FROM businesses
            WHERE ($1::text IS NULL OR verification_status = $1)
              AND ($2::uuid IS NULL OR user_id = $2)
            ORDER BY created_at DESC
            "#
        ))
        .bind(&filter.verification_status)
        .bind(filter.user_id)
        .fetch_all(&self.db)
        .await?;

        Ok(businesses)
    }

    pub async fn get_business(&self, business_id: Uuid) -> AppResult<Business> {
        sqlx::query_as::<_, Business>(&format!(
            "SELECT {BUSINESS_COLUMNS} FROM businesses WHERE id = $1"
        ))
        .bind(business_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::not_found("Business"))
    }

    /// Get a business with its product catalogue
    pub async fn get_business_detail(&self, business_id: Uuid) -> AppResult<BusinessDetail> {
        let business = self.get_business(business_id).await?;

        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE business_id = $1 ORDER BY name"
        ))
        .bind(business_id)
        .fetch_all(&self.db)
        .await?;

        Ok(BusinessDetail { business, products })
    }

    /// Register a business for an existing user
    pub async fn create_business(&self, input: CreateBusinessInput) -> AppResult<Business> {
        let new = NewBusiness::validate(input)?;

        let business = sqlx::query_as::<_, Business>(&format!(
            r#"
            INSERT INTO businesses (user_id, business_name, verification_status, rating)
            VALUES ($1, $2, $3, $4)
            RETURNING {BUSINESS_COLUMNS}
            "#
        ))
        .bind(new.user_id)
        .bind(&new.business_name)
        .bind(new.verification_status.as_str())
        .bind(new.rating)
        .fetch_one(&self.db)
        .await?;

        tracing::info!(business_id = %business.id, user_id = %business.user_id, "Business created");
        Ok(business)
    }

    pub async fn update_business(
        &self,
        business_id: Uuid,
        input: UpdateBusinessInput,
    ) -> AppResult<Business> {
        let existing = self.get_business(business_id).await?;
        let changes = BusinessChanges::apply(&existing, input)?;

        let business = sqlx::query_as::<_, Business>(&format!(
            r#"
            UPDATE businesses
            SET business_name = $1, verification_status = $2, rating = $3
            WHERE id = $4
            RETURNING {BUSINESS_COLUMNS}
            "#
        ))
        .bind(&changes.business_name)
        .bind(changes.verification_status.as_str())
        .bind(changes.rating)
        .bind(business_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::not_found("Business"))?;

        Ok(business)
    }

    /// Delete a business, its products and every order item selling them
    pub async fn delete_business(&self, business_id: Uuid) -> AppResult<DeletionSummary> {
        CascadeService::new(self.db.clone())
            .delete(DeleteRoot::Business(business_id))
            .await
    }
}
