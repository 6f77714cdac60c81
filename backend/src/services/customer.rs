//! Customer profile service

use serde::Deserialize;
use shared::{
    CreateCustomerInput, Customer, CustomerChanges, CustomerDetail, DeleteRoot, DeletionSummary,
    NewCustomer, Order, UpdateCustomerInput,
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::services::cascade::CascadeService;
use crate::services::order::ORDER_COLUMNS;

const CUSTOMER_COLUMNS: &str = "id, user_id, customer_type, business_name, address, created_at";

#[derive(Debug, Default, Deserialize)]
pub struct CustomerFilter {
    pub customer_type: Option<String>,
}

#[derive(Clone)]
pub struct CustomerService {
    db: PgPool,
}

impl CustomerService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn list_customers(&self, filter: &CustomerFilter) -> AppResult<Vec<Customer>> {
        let customers = sqlx::query_as::<_, Customer>(&format!(
            r#"
            SELECT {CUSTOMER_COLUMNS}
            FROM customers
            WHERE ($1::text IS NULL OR customer_type = $1)
            ORDER BY created_at DESC
            "#
        ))
        .bind(&filter.customer_type)
        .fetch_all(&self.db)
        .await?;

        Ok(customers)
    }

    pub async fn get_customer(&self, customer_id: Uuid) -> AppResult<Customer> {
        sqlx::query_as::<_, Customer>(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customers WHERE id = $1"
        ))
        .bind(customer_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::not_found("Customer"))
    }

    /// Get a customer with their order history
    pub async fn get_customer_detail(&self, customer_id: Uuid) -> AppResult<CustomerDetail> {
        let customer = self.get_customer(customer_id).await?;

        let orders = sqlx::query_as::<_, Order>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE customer_id = $1 ORDER BY order_date DESC"
        ))
        .bind(customer_id)
        .fetch_all(&self.db)
        .await?;

        Ok(CustomerDetail { customer, orders })
    }

    pub async fn create_customer(&self, input: CreateCustomerInput) -> AppResult<Customer> {
        let new = NewCustomer::validate(input)?;

        let customer = sqlx::query_as::<_, Customer>(&format!(
            r#"
            INSERT INTO customers (user_id, customer_type, business_name, address)
            VALUES ($1, $2, $3, $4)
            RETURNING {CUSTOMER_COLUMNS}
            "#
        ))
        .bind(new.user_id)
        .bind(new.customer_type.as_str())
        .bind(&new.business_name)
        .bind(&new.address)
        .fetch_one(&self.db)
        .await?;

        tracing::info!(customer_id = %customer.id, user_id = %customer.user_id, "Customer created");
        Ok(customer)
    }

    pub async fn update_customer(
        &self,
        customer_id: Uuid,
        input: UpdateCustomerInput,
    ) -> AppResult<Customer> {
        let existing = self.get_customer(customer_id).await?;
        let changes = CustomerChanges::apply(&existing, input)?;

        let customer = sqlx::query_as::<_, Customer>(&format!(
            r#"
            UPDATE customers
            SET customer_type = $1, business_name = $2, address = $3
            WHERE id = $4
            RETURNING {CUSTOMER_COLUMNS}
            "#
        ))
        .bind(changes.customer_type.as_str())
        .bind(&changes.business_name)
        .bind(&changes.address)
        .bind(customer_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::not_found("Customer"))?;

        Ok(customer)
    }

    /// Delete a customer, their orders and the items on those orders
    pub async fn delete_customer(&self, customer_id: Uuid) -> AppResult<DeletionSummary> {
        CascadeService::new(self.db.clone())
            .delete(DeleteRoot::Customer(customer_id))
            .await
    }
}
