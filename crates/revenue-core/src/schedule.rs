use std::time::Duration;

use chrono::{DateTime, Days, Local, NaiveTime};
use tracing::{error, info, warn};

use crate::config::PipelineConfig;
use crate::db::DbPool;
use crate::error::Result;
use crate::pipeline;
use crate::types::PipelineRunSummary;

/// Execute one pipeline run under the configured retry policy: on failure,
/// wait `retry_delay` and try again, up to `retries` extra attempts. The
/// last error propagates.
pub async fn run_with_retry(
    pool: &DbPool,
    config: &PipelineConfig,
) -> Result<PipelineRunSummary> {
    let policy = &config.run;
    let mut attempt = 0;

    loop {
        match pipeline::run_once(pool, config).await {
            Ok(run) => return Ok(run),
            Err(err) if attempt < policy.retries => {
                attempt += 1;
                warn!(
                    attempt,
                    retries = policy.retries,
                    delay_secs = policy.retry_delay.as_secs(),
                    error = %err,
                    "pipeline run failed, retrying after delay"
                );
                tokio::time::sleep(policy.retry_delay).await;
            }
            Err(err) => return Err(err),
        }
    }
}

/// Run the pipeline once per day at local midnight, forever. A run that
/// still fails after its retry is logged and the loop moves on to the next
/// day; missed windows are never replayed.
pub async fn run_daily(pool: &DbPool, config: &PipelineConfig) -> Result<()> {
    let policy = &config.run;
    info!(owner = %policy.owner, "starting daily schedule");
    if policy.catchup {
        warn!("catch-up runs are not supported; missed windows are skipped");
    }

    loop {
        let wait = until_next_run(Local::now());
        info!(wait_secs = wait.as_secs(), "sleeping until next daily run");
        tokio::time::sleep(wait).await;

        match run_with_retry(pool, config).await {
            Ok(run) => info!(run_id = %run.run_id, "scheduled run succeeded"),
            Err(err) => error!(error = %err, "scheduled run failed after retries"),
        }
    }
}

/// Time until the next local midnight. Computing from `now` on every
/// iteration is what makes the schedule skip rather than replay missed
/// windows.
fn until_next_run(now: DateTime<Local>) -> Duration {
    let next = (now.date_naive() + Days::new(1)).and_time(NaiveTime::MIN);
    (next - now.naive_local()).to_std().unwrap_or(Duration::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_run_is_within_a_day() {
        let wait = until_next_run(Local::now());
        assert!(wait > Duration::ZERO);
        assert!(wait <= Duration::from_secs(24 * 60 * 60));
    }
}
