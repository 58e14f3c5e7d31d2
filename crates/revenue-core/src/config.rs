use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::Result;

/// Looked up next to the working directory when no `--config` path is given.
const DEFAULT_CONFIG_PATH: &str = "revenue.toml";

/// Settings for one pipeline deployment. Every field has a default, so an
/// absent or partial `revenue.toml` is always valid.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    pub chart: ChartConfig,
    pub run: RunPolicy,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChartConfig {
    pub output_path: PathBuf,
    pub width: u32,
    pub height: u32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        // 12x6 inches at 300 DPI, same artifact the reporting dashboards expect.
        Self {
            output_path: PathBuf::from("/tmp/daily_revenue_plot.png"),
            width: 3600,
            height: 1800,
        }
    }
}

/// Run policy for scheduled execution: one retry after a fixed delay,
/// daily cadence, missed windows skipped.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunPolicy {
    pub owner: String,
    pub retries: u32,
    #[serde(with = "humantime_serde")]
    pub retry_delay: Duration,
    pub catchup: bool,
}

impl Default for RunPolicy {
    fn default() -> Self {
        Self {
            owner: "kiwilytics".to_string(),
            retries: 1,
            retry_delay: Duration::from_secs(120),
            catchup: false,
        }
    }
}

impl PipelineConfig {
    /// Load configuration from `path`, or from `revenue.toml` in the working
    /// directory if present, or fall back to the built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default = Path::new(DEFAULT_CONFIG_PATH);
                if default.exists() {
                    Self::from_file(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config = toml::from_str(&raw)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_policy_defaults_match_schedule_settings() {
        let policy = RunPolicy::default();
        assert_eq!(policy.owner, "kiwilytics");
        assert_eq!(policy.retries, 1);
        assert_eq!(policy.retry_delay, Duration::from_secs(120));
        assert!(!policy.catchup);
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let config: PipelineConfig = toml::from_str(
            r#"
            [chart]
            output_path = "/var/lib/revenue/daily.png"

            [run]
            retry_delay = "2m"
            retries = 3
            "#,
        )
        .unwrap();

        assert_eq!(
            config.chart.output_path,
            PathBuf::from("/var/lib/revenue/daily.png")
        );
        assert_eq!(config.chart.width, 3600);
        assert_eq!(config.chart.height, 1800);
        assert_eq!(config.run.retries, 3);
        assert_eq!(config.run.retry_delay, Duration::from_secs(120));
        assert_eq!(config.run.owner, "kiwilytics");
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let parsed: std::result::Result<PipelineConfig, _> = toml::from_str(
            r#"
            [chart]
            dpi = 300
            "#,
        );
        assert!(parsed.is_err());
    }
}
