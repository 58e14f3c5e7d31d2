use polars::df;
use polars::prelude::*;
use tracing::info;

use crate::error::{PipelineError, Result};
use crate::types::{DailyRevenueRow, RevenueSummary};

/// Sort the row set ascending by date and compute total and mean daily
/// revenue. Returns the sorted rows together with the summary so the caller
/// can hand the same row set to the renderer.
///
/// An empty row set is rejected up front; the mean is undefined for zero
/// days and must never reach the arithmetic below.
pub fn summarize(mut rows: Vec<DailyRevenueRow>) -> Result<(Vec<DailyRevenueRow>, RevenueSummary)> {
    if rows.is_empty() {
        return Err(PipelineError::EmptyRowSet(
            "no daily revenue rows to summarize",
        ));
    }

    rows.sort_by_key(|row| row.sale_date);

    let revenue: Vec<f64> = rows.iter().map(|row| row.daily_revenue).collect();
    let frame = df! { "daily_revenue" => revenue }?;
    let stats = frame
        .lazy()
        .select([
            col("daily_revenue").sum().alias("total_revenue"),
            col("daily_revenue").mean().alias("mean_daily_revenue"),
        ])
        .collect()?;

    let total_revenue = stats
        .column("total_revenue")?
        .get(0)?
        .try_extract::<f64>()?;
    let mean_daily_revenue = stats
        .column("mean_daily_revenue")?
        .get(0)?
        .try_extract::<f64>()?;

    let summary = RevenueSummary {
        day_count: rows.len(),
        total_revenue,
        mean_daily_revenue,
    };

    info!(
        days = summary.day_count,
        "total revenue ${:.2}, average daily revenue ${:.2}",
        summary.total_revenue,
        summary.mean_daily_revenue
    );

    Ok((rows, summary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn row(year: i32, month: u32, day: u32, revenue: f64) -> DailyRevenueRow {
        DailyRevenueRow {
            sale_date: NaiveDate::from_ymd_opt(year, month, day).unwrap(),
            daily_revenue: revenue,
        }
    }

    #[test]
    fn sorts_rows_and_computes_totals() {
        let rows = vec![
            row(2024, 1, 1, 100.0),
            row(2024, 1, 3, 50.0),
            row(2024, 1, 2, 75.0),
        ];

        let (sorted, summary) = summarize(rows).unwrap();

        let dates: Vec<NaiveDate> = sorted.iter().map(|r| r.sale_date).collect();
        assert_eq!(
            dates,
            vec![
                NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
                NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(),
            ]
        );
        assert_eq!(summary.day_count, 3);
        assert!((summary.total_revenue - 225.0).abs() < 1e-9);
        assert!((summary.mean_daily_revenue - 75.0).abs() < 1e-9);
    }

    #[test]
    fn total_matches_sum_of_returned_rows() {
        let rows = vec![row(2024, 2, 10, 12.5), row(2024, 2, 11, 7.25)];

        let (sorted, summary) = summarize(rows).unwrap();

        let recomputed: f64 = sorted.iter().map(|r| r.daily_revenue).sum();
        assert_eq!(sorted.len(), summary.day_count);
        assert!((summary.total_revenue - recomputed).abs() < 1e-9);
        assert!(
            (summary.mean_daily_revenue - recomputed / sorted.len() as f64).abs() < 1e-9
        );
    }

    #[test]
    fn empty_row_set_is_rejected() {
        let err = summarize(Vec::new()).unwrap_err();
        assert!(matches!(err, PipelineError::EmptyRowSet(_)));
    }
}
