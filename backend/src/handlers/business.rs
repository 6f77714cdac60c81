//! Business (vendor) HTTP handlers

use axum::{extract::State, http::StatusCode};
use shared::{
    Business, BusinessDetail, BusinessRevenue, CreateBusinessInput, DeletionSummary,
    UpdateBusinessInput,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::extract::{Json, Path, Query};
use crate::services::business::{BusinessFilter, BusinessService};
use crate::services::AggregationService;
use crate::AppState;

/// List businesses
pub async fn list_businesses(
    State(state): State<AppState>,
    Query(filter): Query<BusinessFilter>,
) -> AppResult<Json<Vec<Business>>> {
    let service = BusinessService::new(state.db);
    let businesses = service.list_businesses(&filter).await?;
    Ok(Json(businesses))
}

/// Get a business with its products
pub async fn get_business(
    State(state): State<AppState>,
    Path(business_id): Path<Uuid>,
) -> AppResult<Json<BusinessDetail>> {
    let service = BusinessService::new(state.db);
    let business = service.get_business_detail(business_id).await?;
    Ok(Json(business))
}

pub async fn create_business(
    State(state): State<AppState>,
    Json(input): Json<CreateBusinessInput>,
) -> AppResult<(StatusCode, Json<Business>)> {
    let service = BusinessService::new(state.db);
    let business = service.create_business(input).await?;
    Ok((StatusCode::CREATED, Json(business)))
}

pub async fn update_business(
    State(state): State<AppState>,
    Path(business_id): Path<Uuid>,
    Json(input): Json<UpdateBusinessInput>,
) -> AppResult<Json<Business>> {
    let service = BusinessService::new(state.db);
    let business = service.update_business(business_id, input).await?;
    Ok(Json(business))
}

/// Delete a business and its catalogue
pub async fn delete_business(
    State(state): State<AppState>,
    Path(business_id): Path<Uuid>,
) -> AppResult<Json<DeletionSummary>> {
    let service = BusinessService::new(state.db);
    let summary = service.delete_business(business_id).await?;
    Ok(Json(summary))
}

/// Total revenue across every sale of the business's products
pub async fn get_total_revenue(
    State(state): State<AppState>,
    Path(business_id): Path<Uuid>,
) -> AppResult<Json<BusinessRevenue>> {
    let service = AggregationService::new(state.db);
    let revenue = service.business_total_revenue(business_id).await?;
    Ok(Json(revenue))
}
