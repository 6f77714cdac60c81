//! Product HTTP handlers

use axum::{extract::State, http::StatusCode};
use shared::{CreateProductInput, DeletionSummary, Product, ProductUnitsSold, UpdateProductInput};
use uuid::Uuid;

use crate::error::AppResult;
use crate::extract::{Json, Path, Query};
use crate::services::product::{ProductFilter, ProductService};
use crate::services::AggregationService;
use crate::AppState;

/// List products, optionally within a price range
pub async fn list_products(
    State(state): State<AppState>,
    Query(filter): Query<ProductFilter>,
) -> AppResult<Json<Vec<Product>>> {
    let service = ProductService::new(state.db);
    let products = service.list_products(&filter).await?;
    Ok(Json(products))
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
) -> AppResult<Json<Product>> {
    let service = ProductService::new(state.db);
    let product = service.get_product(product_id).await?;
    Ok(Json(product))
}

pub async fn create_product(
    State(state): State<AppState>,
    Json(input): Json<CreateProductInput>,
) -> AppResult<(StatusCode, Json<Product>)> {
    let service = ProductService::new(state.db);
    let product = service.create_product(input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn update_product(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
    Json(input): Json<UpdateProductInput>,
) -> AppResult<Json<Product>> {
    let service = ProductService::new(state.db);
    let product = service.update_product(product_id, input).await?;
    Ok(Json(product))
}

pub async fn delete_product(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
) -> AppResult<Json<DeletionSummary>> {
    let service = ProductService::new(state.db);
    let summary = service.delete_product(product_id).await?;
    Ok(Json(summary))
}

/// Units of the product sold across all orders
pub async fn get_total_sold(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
) -> AppResult<Json<ProductUnitsSold>> {
    let service = AggregationService::new(state.db);
    let sold = service.product_total_units_sold(product_id).await?;
    Ok(Json(sold))
}
