//! Sales aggregation over committed order items
//!
//! Each operation runs in one `REPEATABLE READ, READ ONLY` transaction so
//! the existence check and the line fetch see the same snapshot. The sums
//! themselves live in `shared::aggregation`.

use serde::Serialize;
use shared::{
    revenue_report_row, total_revenue, total_units_sold, BusinessRevenue, ProductUnitsSold,
    RevenueReportRow, SaleLine,
};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::error::{AppError, AppResult};

#[derive(Clone)]
pub struct AggregationService {
    db: PgPool,
}

impl AggregationService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Revenue of every order item selling one of the business's products
    pub async fn business_total_revenue(&self, business_id: Uuid) -> AppResult<BusinessRevenue> {
        let mut tx = self.snapshot().await?;

        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM businesses WHERE id = $1)")
                .bind(business_id)
                .fetch_one(&mut *tx)
                .await?;
        if !exists {
            return Err(AppError::not_found("Business"));
        }

        let lines = sqlx::query_as::<_, SaleLine>(
            r#"
            SELECT oi.quantity, oi.unit_price
            FROM order_items oi
            JOIN products p ON p.id = oi.product_id
            WHERE p.business_id = $1
            "#,
        )
        .bind(business_id)
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(BusinessRevenue {
            business_id,
            total_revenue: total_revenue(&lines),
        })
    }

    /// Units of a product sold across all orders
    pub async fn product_total_units_sold(&self, product_id: Uuid) -> AppResult<ProductUnitsSold> {
        let mut tx = self.snapshot().await?;

        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM products WHERE id = $1)")
                .bind(product_id)
                .fetch_one(&mut *tx)
                .await?;
        if !exists {
            return Err(AppError::not_found("Product"));
        }

        let quantities: Vec<i32> =
            sqlx::query_scalar("SELECT quantity FROM order_items WHERE product_id = $1")
                .bind(product_id)
                .fetch_all(&mut *tx)
                .await?;

        tx.commit().await?;

        Ok(ProductUnitsSold {
            product_id,
            total_units_sold: total_units_sold(quantities),
        })
    }

    /// Revenue summary for every business, highest earners first
    pub async fn revenue_report(&self) -> AppResult<Vec<RevenueReportRow>> {
        let mut tx = self.snapshot().await?;

        let businesses: Vec<(Uuid, String)> =
            sqlx::query_as("SELECT id, business_name FROM businesses ORDER BY business_name")
                .fetch_all(&mut *tx)
                .await?;

        let sales: Vec<(Uuid, i32, rust_decimal::Decimal)> = sqlx::query_as(
            r#"
            SELECT p.business_id, oi.quantity, oi.unit_price
            FROM order_items oi
            JOIN products p ON p.id = oi.product_id
            "#,
        )
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        let mut rows: Vec<RevenueReportRow> = businesses
            .into_iter()
            .map(|(business_id, business_name)| {
                let lines: Vec<SaleLine> = sales
                    .iter()
                    .filter(|(owner, _, _)| *owner == business_id)
                    .map(|&(_, quantity, unit_price)| SaleLine {
                        quantity,
                        unit_price,
                    })
                    .collect();
                revenue_report_row(business_id, business_name, &lines)
            })
            .collect();
        rows.sort_by(|a, b| b.total_revenue.cmp(&a.total_revenue));

        tracing::debug!(businesses = rows.len(), "Revenue report computed");
        Ok(rows)
    }

    /// Export report rows as CSV
    pub fn export_to_csv<T: Serialize>(data: &[T]) -> AppResult<String> {
        let mut wtr = csv::Writer::from_writer(vec![]);
        for record in data {
            wtr.serialize(record)
                .map_err(|e| AppError::Internal(format!("CSV serialization error: {}", e)))?;
        }
        let bytes = wtr
            .into_inner()
            .map_err(|e| AppError::Internal(format!("CSV writer error: {}", e)))?;
        String::from_utf8(bytes)
            .map_err(|e| AppError::Internal(format!("UTF-8 conversion error: {}", e)))
    }

    async fn snapshot(&self) -> AppResult<Transaction<'static, Postgres>> {
        let mut tx = self.db.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
            .execute(&mut *tx)
            .await?;
        Ok(tx)
    }
}
