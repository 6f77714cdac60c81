//! Order HTTP handlers

use axum::{extract::State, http::StatusCode};
use shared::{
    CreateOrderInput, CreateOrderItemInput, DeletionSummary, Order, OrderDetail, OrderItem,
    UpdateOrderInput,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::extract::{Json, Path, Query};
use crate::services::order::{OrderFilter, OrderService};
use crate::services::OrderItemService;
use crate::AppState;

pub async fn list_orders(
    State(state): State<AppState>,
    Query(filter): Query<OrderFilter>,
) -> AppResult<Json<Vec<Order>>> {
    let service = OrderService::new(state.db);
    let orders = service.list_orders(&filter).await?;
    Ok(Json(orders))
}

/// Get an order with its items
pub async fn get_order(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
) -> AppResult<Json<OrderDetail>> {
    let service = OrderService::new(state.db);
    let order = service.get_order_detail(order_id).await?;
    Ok(Json(order))
}

/// Place an order
pub async fn create_order(
    State(state): State<AppState>,
    Json(input): Json<CreateOrderInput>,
) -> AppResult<(StatusCode, Json<Order>)> {
    let service = OrderService::new(state.db);
    let order = service.create_order(input).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

pub async fn update_order(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
    Json(input): Json<UpdateOrderInput>,
) -> AppResult<Json<Order>> {
    let service = OrderService::new(state.db);
    let order = service.update_order(order_id, input).await?;
    Ok(Json(order))
}

pub async fn delete_order(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
) -> AppResult<Json<DeletionSummary>> {
    let service = OrderService::new(state.db);
    let summary = service.delete_order(order_id).await?;
    Ok(Json(summary))
}

/// List the items of one order
pub async fn list_order_items_of_order(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
) -> AppResult<Json<Vec<OrderItem>>> {
    let service = OrderItemService::new(state.db);
    let items = service.list_items_of_order(order_id).await?;
    Ok(Json(items))
}

/// Add an item to an order; the path id wins over any `order_id` in the body
pub async fn add_order_item(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
    Json(input): Json<CreateOrderItemInput>,
) -> AppResult<(StatusCode, Json<OrderItem>)> {
    let service = OrderItemService::new(state.db);
    let item = service.add_item_to_order(order_id, input).await?;
    Ok((StatusCode::CREATED, Json(item)))
}
