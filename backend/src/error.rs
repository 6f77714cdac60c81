//! Error handling for the marketplace server
//!
//! Maps domain and persistence failures onto HTTP status codes with a
//! consistent JSON error body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use shared::{PasswordError, ValidationError};
use thiserror::Error;

/// SQLSTATE codes raised by PostgreSQL constraint checks
const UNIQUE_VIOLATION: &str = "23505";
const FOREIGN_KEY_VIOLATION: &str = "23503";
const CHECK_VIOLATION: &str = "23514";
const NUMERIC_VALUE_OUT_OF_RANGE: &str = "22003";

/// Tables whose CHECK constraints carry Postgres' `<table>_<column>_check` names,
/// longest first so `order_items` wins over `orders`
const CHECKED_TABLES: [&str; 6] = [
    "order_items",
    "businesses",
    "customers",
    "products",
    "orders",
    "users",
];

/// Column guarded by a CHECK constraint, recovered from its generated name
fn check_constraint_column(constraint: &str) -> &str {
    let column = constraint.strip_suffix("_check").unwrap_or(constraint);
    CHECKED_TABLES
        .iter()
        .find_map(|table| {
            column
                .strip_prefix(table)
                .and_then(|rest| rest.strip_prefix('_'))
        })
        .unwrap_or(column)
}

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {message}")]
    Validation { field: String, message: String },

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Conflict: {message}")]
    Conflict { resource: String, message: String },

    #[error("Database error: {0}")]
    DatabaseError(sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Internal server error")]
    InternalError(#[from] anyhow::Error),
}

impl AppError {
    pub fn not_found(resource: &str) -> Self {
        AppError::NotFound(resource.to_string())
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::Validation {
            field: err.field.to_string(),
            message: err.message,
        }
    }
}

impl From<PasswordError> for AppError {
    fn from(err: PasswordError) -> Self {
        match err {
            PasswordError::Invalid(invalid) => invalid.into(),
            PasswordError::Hash(e) => AppError::Internal(format!("Password hashing failed: {}", e)),
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        let Some(db_err) = err.as_database_error() else {
            return AppError::DatabaseError(err);
        };
        let constraint = db_err.constraint().unwrap_or("constraint").to_string();
        let code = db_err.code().map(|code| code.into_owned());

        match code.as_deref() {
            Some(UNIQUE_VIOLATION) => AppError::Conflict {
                message: format!("A record violating {} already exists", constraint),
                resource: constraint,
            },
            Some(FOREIGN_KEY_VIOLATION) => AppError::Conflict {
                message: "Referenced record does not exist".to_string(),
                resource: constraint,
            },
            Some(CHECK_VIOLATION) => {
                let field = check_constraint_column(&constraint).to_string();
                AppError::Validation {
                    message: format!("{} is out of range", field),
                    field,
                }
            }
            Some(NUMERIC_VALUE_OUT_OF_RANGE) => AppError::Validation {
                field: db_err
                    .try_downcast_ref::<sqlx::postgres::PgDatabaseError>()
                    .and_then(|pg| pg.column())
                    .unwrap_or("value")
                    .to_string(),
                message: "Numeric value does not fit its column".to_string(),
            },
            _ => AppError::DatabaseError(err),
        }
    }
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_detail) = match &self {
            AppError::Validation { field, message } => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "VALIDATION_ERROR".to_string(),
                    message: message.clone(),
                    field: Some(field.clone()),
                },
            ),
            AppError::NotFound(resource) => (
                StatusCode::NOT_FOUND,
                ErrorDetail {
                    code: "NOT_FOUND".to_string(),
                    message: format!("{} not found", resource),
                    field: None,
                },
            ),
            AppError::Conflict { resource, message } => (
                StatusCode::CONFLICT,
                ErrorDetail {
                    code: "CONFLICT".to_string(),
                    message: message.clone(),
                    field: Some(resource.clone()),
                },
            ),
            AppError::DatabaseError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "DATABASE_ERROR".to_string(),
                    message: "A database error occurred".to_string(),
                    field: None,
                },
            ),
            AppError::Internal(_) | AppError::InternalError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "INTERNAL_ERROR".to_string(),
                    message: "An internal server error occurred".to_string(),
                    field: None,
                },
            ),
        };

        if status.is_server_error() {
            tracing::error!("Error: {:?}", self);
        } else {
            tracing::warn!("Request rejected: {}", self);
        }

        (status, Json(ErrorResponse { error: error_detail })).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
