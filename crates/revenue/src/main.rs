use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use comfy_table::{presets::UTF8_FULL, Table};
use revenue_core::{config::PipelineConfig, db, schedule, seed, types::PipelineRunSummary};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Daily sales revenue pipeline", long_about = None)]
struct Cli {
    /// Path to a revenue.toml configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Execute the pipeline once and print the run summary
    Run,
    /// Run the pipeline on the configured daily cadence
    Schedule,
    /// Run database migrations
    Migrate,
    /// Seed the fixture retail dataset (optionally running migrations)
    DbSeed(DbSeedArgs),
}

#[derive(Args, Debug, Default)]
struct DbSeedArgs {
    /// Skip running migrations before seeding
    #[arg(long)]
    skip_migrations: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let cli = Cli::parse();
    let config = PipelineConfig::load(cli.config.as_deref())?;

    match cli.command {
        Command::Run => {
            let pool = connect_pool().await?;
            let run = schedule::run_with_retry(&pool, &config).await?;
            print_run_summary(&run);
            Ok(())
        }
        Command::Schedule => {
            let pool = connect_pool().await?;
            schedule::run_daily(&pool, &config).await?;
            Ok(())
        }
        Command::Migrate => {
            let pool = connect_pool().await?;
            db::run_migrations(&pool).await?;
            info!("Database migrations applied");
            Ok(())
        }
        Command::DbSeed(args) => {
            let pool = connect_pool().await?;
            if args.skip_migrations {
                warn!("Skipping migrations before seeding");
            } else {
                db::run_migrations(&pool).await?;
            }
            seed::run(&pool).await?;
            info!("Fixture retail data seeded");
            Ok(())
        }
    }
}

async fn connect_pool() -> Result<db::DbPool> {
    dotenvy::dotenv().ok();
    let database_url = std::env::var("DATABASE_URL")
        .or_else(|_| std::env::var("REVENUE_DATABASE_URL"))
        .context("DATABASE_URL (or REVENUE_DATABASE_URL) must be set")?;
    Ok(db::connect(&database_url).await?)
}

fn print_run_summary(run: &PipelineRunSummary) {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec![
        "Run",
        "Days",
        "Total revenue",
        "Mean daily revenue",
        "Chart",
    ]);
    table.add_row(vec![
        run.run_id.to_string(),
        run.summary.day_count.to_string(),
        format!("${:.2}", run.summary.total_revenue),
        format!("${:.2}", run.summary.mean_daily_revenue),
        run.chart.path.display().to_string(),
    ]);
    println!("{table}");
}
