//! Customer HTTP handlers

use axum::{extract::State, http::StatusCode};
use shared::{CreateCustomerInput, Customer, CustomerDetail, DeletionSummary, UpdateCustomerInput};
use uuid::Uuid;

use crate::error::AppResult;
use crate::extract::{Json, Path, Query};
use crate::services::customer::{CustomerFilter, CustomerService};
use crate::AppState;

pub async fn list_customers(
    State(state): State<AppState>,
    Query(filter): Query<CustomerFilter>,
) -> AppResult<Json<Vec<Customer>>> {
    let service = CustomerService::new(state.db);
    let customers = service.list_customers(&filter).await?;
    Ok(Json(customers))
}

/// Get a customer with their orders
pub async fn get_customer(
    State(state): State<AppState>,
    Path(customer_id): Path<Uuid>,
) -> AppResult<Json<CustomerDetail>> {
    let service = CustomerService::new(state.db);
    let customer = service.get_customer_detail(customer_id).await?;
    Ok(Json(customer))
}

pub async fn create_customer(
    State(state): State<AppState>,
    Json(input): Json<CreateCustomerInput>,
) -> AppResult<(StatusCode, Json<Customer>)> {
    let service = CustomerService::new(state.db);
    let customer = service.create_customer(input).await?;
    Ok((StatusCode::CREATED, Json(customer)))
}

pub async fn update_customer(
    State(state): State<AppState>,
    Path(customer_id): Path<Uuid>,
    Json(input): Json<UpdateCustomerInput>,
) -> AppResult<Json<Customer>> {
    let service = CustomerService::new(state.db);
    let customer = service.update_customer(customer_id, input).await?;
    Ok(Json(customer))
}

pub async fn delete_customer(
    State(state): State<AppState>,
    Path(customer_id): Path<Uuid>,
) -> AppResult<Json<DeletionSummary>> {
    let service = CustomerService::new(state.db);
    let summary = service.delete_customer(customer_id).await?;
    Ok(Json(summary))
}
