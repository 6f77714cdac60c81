//! User HTTP handlers

use axum::{extract::State, http::StatusCode};
use shared::{CreateUserInput, DeletionSummary, UpdateUserInput, User, UserDetail};
use uuid::Uuid;

use crate::error::AppResult;
use crate::extract::{Json, Path, Query};
use crate::services::user::{UserFilter, UserService};
use crate::AppState;

fn service(state: &AppState) -> UserService {
    UserService::new(state.db.clone(), state.config.security.bcrypt_cost)
}

/// List users
pub async fn list_users(
    State(state): State<AppState>,
    Query(filter): Query<UserFilter>,
) -> AppResult<Json<Vec<User>>> {
    let users = service(&state).list_users(&filter).await?;
    Ok(Json(users))
}

/// Get a user with their business and customer profiles
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> AppResult<Json<UserDetail>> {
    let user = service(&state).get_user_detail(user_id).await?;
    Ok(Json(user))
}

/// Register a user
pub async fn create_user(
    State(state): State<AppState>,
    Json(input): Json<CreateUserInput>,
) -> AppResult<(StatusCode, Json<User>)> {
    let user = service(&state).create_user(input).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn update_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(input): Json<UpdateUserInput>,
) -> AppResult<Json<User>> {
    let user = service(&state).update_user(user_id, input).await?;
    Ok(Json(user))
}

pub async fn delete_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> AppResult<Json<DeletionSummary>> {
    let summary = service(&state).delete_user(user_id).await?;
    Ok(Json(summary))
}
