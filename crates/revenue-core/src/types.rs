// crates/revenue-core/src/types.rs

use std::path::PathBuf;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One day of aggregated sales, as produced by the extraction query.
/// Unique per `sale_date`; the aggregator guarantees ascending order.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct DailyRevenueRow {
    pub sale_date: NaiveDate,
    pub daily_revenue: f64,
}

/// Summary statistics over one extracted row set.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RevenueSummary {
    pub day_count: usize,
    pub total_revenue: f64,
    pub mean_daily_revenue: f64,
}

/// The rendered PNG on disk. Overwritten on every run.
#[derive(Debug, Clone, Serialize)]
pub struct ChartArtifact {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
}

/// Record of a single pipeline invocation.
#[derive(Debug, Serialize)]
pub struct PipelineRunSummary {
    pub run_id: Uuid,
    pub summary: RevenueSummary,
    pub chart: ChartArtifact,
}
