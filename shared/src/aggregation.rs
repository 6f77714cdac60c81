//! Sales aggregation
//!
//! Read-only arithmetic over order lines. Callers fetch the lines from one
//! consistent snapshot and pass them in; nothing here touches storage.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Quantity and unit price of one order line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct SaleLine {
    pub quantity: i32,
    pub unit_price: Decimal,
}

impl SaleLine {
    pub fn subtotal(&self) -> Decimal {
        Decimal::from(self.quantity) * self.unit_price
    }
}

/// Revenue earned by a business
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessRevenue {
    pub business_id: Uuid,
    pub total_revenue: Decimal,
}

/// Units of a product sold across all orders
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductUnitsSold {
    pub product_id: Uuid,
    pub total_units_sold: i64,
}

/// Row of the marketplace revenue report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevenueReportRow {
    pub business_id: Uuid,
    pub business_name: String,
    pub order_item_count: i64,
    pub units_sold: i64,
    pub total_revenue: Decimal,
}

/// Sum of `quantity * unit_price`; zero for no lines
pub fn total_revenue<'a, I>(lines: I) -> Decimal
where
    I: IntoIterator<Item = &'a SaleLine>,
{
    lines.into_iter().map(SaleLine::subtotal).sum()
}

/// Sum of quantities, widened so large histories cannot overflow
pub fn total_units_sold<I>(quantities: I) -> i64
where
    I: IntoIterator<Item = i32>,
{
    quantities.into_iter().map(i64::from).sum()
}

/// Summarize one business's lines into a report row
pub fn revenue_report_row(
    business_id: Uuid,
    business_name: String,
    lines: &[SaleLine],
) -> RevenueReportRow {
    RevenueReportRow {
        business_id,
        business_name,
        order_item_count: lines.len() as i64,
        units_sold: total_units_sold(lines.iter().map(|l| l.quantity)),
        total_revenue: total_revenue(lines),
    }
}
