use tracing::info;

use crate::db::DbPool;
use crate::error::Result;
use crate::types::DailyRevenueRow;

/// Revenue per order date over the full order history. The explicit float
/// cast keeps the decode stable when `price` is NUMERIC rather than a float
/// column.
const DAILY_REVENUE_QUERY: &str = r#"
    SELECT
        o.orderdate::date AS sale_date,
        (SUM(p.price * od.quantity))::double precision AS daily_revenue
    FROM orders o
    JOIN order_details od ON o.orderid = od.orderid
    JOIN products p ON od.productid = p.productid
    GROUP BY o.orderdate::date
    ORDER BY sale_date
"#;

/// Execute the daily-revenue aggregation and materialize the result set.
pub async fn fetch_daily_revenue(pool: &DbPool) -> Result<Vec<DailyRevenueRow>> {
    let rows: Vec<DailyRevenueRow> = sqlx::query_as(DAILY_REVENUE_QUERY)
        .fetch_all(pool)
        .await?;

    info!(days = rows.len(), "extracted daily sales aggregates");
    Ok(rows)
}
