use tracing::info;
use uuid::Uuid;

use crate::config::PipelineConfig;
use crate::db::DbPool;
use crate::error::Result;
use crate::types::PipelineRunSummary;
use crate::{aggregate, chart, extract};

/// Execute one pipeline run: extract the daily aggregates, summarize them,
/// render the chart. Each stage hands a typed value straight to the next;
/// the first failure propagates and no later stage runs.
pub async fn run_once(pool: &DbPool, config: &PipelineConfig) -> Result<PipelineRunSummary> {
    let run_id = Uuid::new_v4();
    info!(%run_id, "starting daily revenue pipeline run");

    let rows = extract::fetch_daily_revenue(pool).await?;
    let (rows, summary) = aggregate::summarize(rows)?;
    let artifact = chart::render_revenue_chart(&rows, &config.chart)?;

    let run = PipelineRunSummary {
        run_id,
        summary,
        chart: artifact,
    };

    let record = serde_json::to_string(&run)?;
    info!(%run_id, run = %record, "pipeline run complete");

    Ok(run)
}
