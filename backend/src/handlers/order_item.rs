//! Order item HTTP handlers

use axum::{extract::State, http::StatusCode};
use shared::{CreateOrderItemInput, DeletionSummary, OrderItem, UpdateOrderItemInput};
use uuid::Uuid;

use crate::error::AppResult;
use crate::extract::{Json, Path, Query};
use crate::services::order_item::{OrderItemFilter, OrderItemService};
use crate::AppState;

pub async fn list_order_items(
    State(state): State<AppState>,
    Query(filter): Query<OrderItemFilter>,
) -> AppResult<Json<Vec<OrderItem>>> {
    let service = OrderItemService::new(state.db);
    let items = service.list_order_items(&filter).await?;
    Ok(Json(items))
}

pub async fn get_order_item(
    State(state): State<AppState>,
    Path(item_id): Path<Uuid>,
) -> AppResult<Json<OrderItem>> {
    let service = OrderItemService::new(state.db);
    let item = service.get_order_item(item_id).await?;
    Ok(Json(item))
}

pub async fn create_order_item(
    State(state): State<AppState>,
    Json(input): Json<CreateOrderItemInput>,
) -> AppResult<(StatusCode, Json<OrderItem>)> {
    let service = OrderItemService::new(state.db);
    let item = service.create_order_item(input).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

pub async fn update_order_item(
    State(state): State<AppState>,
    Path(item_id): Path<Uuid>,
    Json(input): Json<UpdateOrderItemInput>,
) -> AppResult<Json<OrderItem>> {
    let service = OrderItemService::new(state.db);
    let item = service.update_order_item(item_id, input).await?;
    Ok(Json(item))
}

pub async fn delete_order_item(
    State(state): State<AppState>,
    Path(item_id): Path<Uuid>,
) -> AppResult<Json<DeletionSummary>> {
    let service = OrderItemService::new(state.db);
    let summary = service.delete_order_item(item_id).await?;
    Ok(Json(summary))
}
