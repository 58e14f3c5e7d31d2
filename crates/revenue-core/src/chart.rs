use std::fs;

use chrono::{Days, NaiveDate};
use plotters::prelude::*;
use tracing::info;

use crate::config::ChartConfig;
use crate::error::{PipelineError, Result};
use crate::types::{ChartArtifact, DailyRevenueRow};

/// Render the daily revenue series as a PNG line chart: one marker per day,
/// rotated date labels, light grid. Overwrites any previous artifact at the
/// configured path.
///
/// Callers must hand in a sorted, non-empty row set; an empty one is
/// rejected before anything touches the filesystem.
pub fn render_revenue_chart(
    rows: &[DailyRevenueRow],
    config: &ChartConfig,
) -> Result<ChartArtifact> {
    if rows.is_empty() {
        return Err(PipelineError::EmptyRowSet("no daily revenue rows to chart"));
    }

    if let Some(parent) = config.output_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let first_date = rows[0].sale_date;
    let mut last_date = rows[rows.len() - 1].sale_date;
    if last_date == first_date {
        // A single day still needs a non-degenerate x range.
        last_date = last_date + Days::new(1);
    }

    let max_revenue = rows
        .iter()
        .map(|row| row.daily_revenue)
        .fold(0.0_f64, f64::max);
    let y_max = if max_revenue > 0.0 {
        max_revenue * 1.1
    } else {
        1.0
    };

    let root =
        BitMapBackend::new(&config.output_path, (config.width, config.height)).into_drawing_area();
    root.fill(&WHITE).map_err(to_chart_error)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Daily Sales Revenue", ("sans-serif", 42))
        .margin(24)
        .x_label_area_size(110)
        .y_label_area_size(100)
        .build_cartesian_2d(first_date..last_date, 0.0..y_max)
        .map_err(to_chart_error)?;

    chart
        .configure_mesh()
        .x_desc("Date")
        .y_desc("Revenue ($)")
        .x_labels(rows.len().min(12))
        .x_label_formatter(&|date: &NaiveDate| date.format("%Y-%m-%d").to_string())
        .x_label_style(
            ("sans-serif", 22)
                .into_font()
                .transform(FontTransform::Rotate90),
        )
        .bold_line_style(BLACK.mix(0.15))
        .light_line_style(BLACK.mix(0.05))
        .draw()
        .map_err(to_chart_error)?;

    chart
        .draw_series(
            LineSeries::new(
                rows.iter().map(|row| (row.sale_date, row.daily_revenue)),
                BLUE.stroke_width(3),
            )
            .point_size(6),
        )
        .map_err(to_chart_error)?;

    root.present().map_err(to_chart_error)?;

    info!(path = %config.output_path.display(), "chart artifact written");

    Ok(ChartArtifact {
        path: config.output_path.clone(),
        width: config.width,
        height: config.height,
    })
}

fn to_chart_error<E: std::error::Error>(err: E) -> PipelineError {
    PipelineError::Chart(err.to_string())
}
