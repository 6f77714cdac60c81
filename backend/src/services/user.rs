//! User account service

use serde::Deserialize;
use shared::{
    Business, CreateUserInput, Customer, DeleteRoot, DeletionSummary, NewUser, UpdateUserInput,
    User, UserChanges, UserDetail,
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::services::cascade::CascadeService;

const USER_COLUMNS: &str =
    "id, full_name, email, password_hash, phone, role, status, created_at";

/// Filters accepted by the user listing
#[derive(Debug, Default, Deserialize)]
pub struct UserFilter {
    pub role: Option<String>,
    pub status: Option<String>,
}

/// User service for account management
#[derive(Clone)]
pub struct UserService {
    db: PgPool,
    bcrypt_cost: u32,
}

impl UserService {
    pub fn new(db: PgPool, bcrypt_cost: u32) -> Self {
        Self { db, bcrypt_cost }
    }

    /// List users, optionally filtered by role and status
    pub async fn list_users(&self, filter: &UserFilter) -> AppResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(&format!(
            r#"
            SELECT {USER_COLUMNS}
            FROM users
            WHERE ($1::text IS NULL OR role = $1)
              AND ($2::text IS NULL OR status = $2)
            ORDER BY created_at DESC
            "#
        ))
        .bind(&filter.role)
        .bind(&filter.status)
        .fetch_all(&self.db)
        .await?;

        Ok(users)
    }

    /// Get a user by ID
    pub async fn get_user(&self, user_id: Uuid) -> AppResult<User> {
        sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(user_id)
            .fetch_optional(&self.db)
            .await?
            .ok_or_else(|| AppError::not_found("User"))
    }

    /// Get a user with the business and customer profiles it owns
    pub async fn get_user_detail(&self, user_id: Uuid) -> AppResult<UserDetail> {
        let user = self.get_user(user_id).await?;

        let business = sqlx::query_as::<_, Business>(
            r#"
            SELECT id, user_id, business_name, verification_status, rating, created_at
            FROM businesses
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?;

        let customer = sqlx::query_as::<_, Customer>(
            r#"
            SELECT id, user_id, customer_type, business_name, address, created_at
            FROM customers
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(UserDetail {
            user,
            business,
            customer,
        })
    }

    /// Create a new user; the password is hashed before it reaches the database
    pub async fn create_user(&self, input: CreateUserInput) -> AppResult<User> {
        let new = NewUser::validate(input, self.bcrypt_cost)?;

        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (full_name, email, password_hash, phone, role, status)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(&new.full_name)
        .bind(&new.email)
        .bind(&new.password_hash)
        .bind(&new.phone)
        .bind(&new.role)
        .bind(&new.status)
        .fetch_one(&self.db)
        .await?;

        tracing::info!(user_id = %user.id, "User created");
        Ok(user)
    }

    /// Update allow-listed user fields
    pub async fn update_user(&self, user_id: Uuid, input: UpdateUserInput) -> AppResult<User> {
        let existing = self.get_user(user_id).await?;
        let changes = UserChanges::apply(&existing, input, self.bcrypt_cost)?;

        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
            SET full_name = $1, email = $2, password_hash = $3, phone = $4, role = $5, status = $6
            WHERE id = $7
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(&changes.full_name)
        .bind(&changes.email)
        .bind(&changes.password_hash)
        .bind(&changes.phone)
        .bind(&changes.role)
        .bind(&changes.status)
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::not_found("User"))?;

        Ok(user)
    }

    /// Delete a user together with its business, customer profile and everything they own
    pub async fn delete_user(&self, user_id: Uuid) -> AppResult<DeletionSummary> {
        CascadeService::new(self.db.clone())
            .delete(DeleteRoot::User(user_id))
            .await
    }
}
