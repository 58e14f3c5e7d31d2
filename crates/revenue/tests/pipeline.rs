use std::env;

use anyhow::Result;
use chrono::NaiveDate;
use revenue_core::{aggregate, config::PipelineConfig, db, extract, pipeline, seed};
use tokio::runtime::Runtime;

#[test]
fn pipeline_end_to_end_over_fixture_orders() -> Result<()> {
    let database_url = match env::var("REVENUE_TEST_DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            eprintln!(
                "Skipping pipeline integration test because REVENUE_TEST_DATABASE_URL is not set"
            );
            return Ok(());
        }
    };

    let rt = Runtime::new()?;
    let result: Result<()> = rt.block_on(async move {
        let pool = db::connect(&database_url).await?;
        db::run_migrations(&pool).await?;

        sqlx::query("TRUNCATE TABLE order_details, orders, products CASCADE")
            .execute(&pool)
            .await?;
        seed::run(&pool).await?;

        let dir = tempfile::tempdir()?;
        let mut config = PipelineConfig::default();
        config.chart.output_path = dir.path().join("daily_revenue_plot.png");
        config.chart.width = 900;
        config.chart.height = 450;

        // The extracted row set covers the five fixture days, ascending.
        let rows = extract::fetch_daily_revenue(&pool).await?;
        let (sorted, summary) = aggregate::summarize(rows)?;
        assert_eq!(sorted.len(), 5);
        assert_eq!(
            sorted[0].sale_date,
            NaiveDate::from_ymd_opt(2024, 3, 4).unwrap()
        );
        assert_eq!(
            sorted[4].sale_date,
            NaiveDate::from_ymd_opt(2024, 3, 8).unwrap()
        );
        assert!((sorted[0].daily_revenue - 37.00).abs() < 1e-9);
        assert!((summary.total_revenue - 217.50).abs() < 1e-9);
        assert!((summary.mean_daily_revenue - 43.50).abs() < 1e-9);

        // Full run writes a non-empty chart artifact.
        let run = pipeline::run_once(&pool, &config).await?;
        assert_eq!(run.summary.day_count, 5);
        assert!((run.summary.total_revenue - 217.50).abs() < 1e-9);

        let metadata = std::fs::metadata(&run.chart.path)?;
        assert!(metadata.len() > 0);

        Ok(())
    });
    result
}
