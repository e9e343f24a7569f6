use std::path::PathBuf;
use std::process::ExitCode;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use marketpulse_core::{load_run_config_from_env, NewsSourceConfig, RunConfig};
use marketpulse_report::LogChartSink;

mod pipeline;

use pipeline::{outcome, run_news_pipeline, run_stock_pipeline, RunOutcome};

#[derive(Debug, Parser)]
#[command(name = "marketpulse")]
#[command(about = "Batch ETL for stock prices and news sentiment")]
struct Cli {
    #[command(flatten)]
    overrides: Overrides,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Flag overrides applied on top of the env-derived run configuration.
#[derive(Debug, Args)]
struct Overrides {
    /// Comma-separated ticker symbols (e.g. AAPL,MSFT)
    #[arg(long)]
    tickers: Option<String>,

    /// First day of the fetch interval (YYYY-MM-DD)
    #[arg(long)]
    start: Option<NaiveDate>,

    /// Last day of the fetch interval (YYYY-MM-DD)
    #[arg(long)]
    end: Option<NaiveDate>,

    /// Enrich price bars with per-ticker fundamentals
    #[arg(long)]
    fundamentals: bool,

    /// News source as Name=path; repeatable, replaces the configured set
    #[arg(long = "source", value_name = "NAME=PATH")]
    sources: Vec<String>,

    /// Destination for the stock CSV export
    #[arg(long)]
    stock_out: Option<PathBuf>,

    /// Destination for the news CSV export
    #[arg(long)]
    news_out: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch stock data and export the price table
    Stocks,
    /// Load news sources, score sentiment, and export the news table
    News,
    /// Run both pipelines (default)
    Run,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = match load_run_config_from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = apply_overrides(&mut config, &cli.overrides) {
        tracing::error!(error = %e, "invalid flag overrides");
        return ExitCode::FAILURE;
    }

    let command = cli.command.unwrap_or(Commands::Run);
    let mut sink = LogChartSink;

    let (stock_outcome, news_outcome) = match command {
        Commands::Stocks => (Some(run_stock_pipeline(&config, &mut sink).await), None),
        Commands::News => (None, Some(run_news_pipeline(&config, &mut sink))),
        Commands::Run => {
            let stocks = run_stock_pipeline(&config, &mut sink).await;
            let news = run_news_pipeline(&config, &mut sink);
            (Some(stocks), Some(news))
        }
    };

    match outcome(stock_outcome, news_outcome) {
        RunOutcome::Success => ExitCode::SUCCESS,
        RunOutcome::NoData => ExitCode::from(1),
        RunOutcome::Partial => ExitCode::from(2),
    }
}

/// Apply flag overrides onto the env-derived config, then re-validate.
fn apply_overrides(
    config: &mut RunConfig,
    overrides: &Overrides,
) -> Result<(), marketpulse_core::ConfigError> {
    if let Some(raw) = &overrides.tickers {
        config.tickers = raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_uppercase)
            .collect();
    }
    if let Some(start) = overrides.start {
        config.start = start;
    }
    if let Some(end) = overrides.end {
        config.end = end;
    }
    if overrides.fundamentals {
        config.fundamentals = true;
    }
    if !overrides.sources.is_empty() {
        config.news_sources = overrides
            .sources
            .iter()
            .filter_map(|entry| {
                let (name, path) = entry.split_once('=')?;
                Some(NewsSourceConfig {
                    name: name.trim().to_string(),
                    path: PathBuf::from(path.trim()),
                })
            })
            .collect();
    }
    if let Some(path) = &overrides.stock_out {
        config.stock_out = path.clone();
    }
    if let Some(path) = &overrides.news_out {
        config.news_out = path.clone();
    }
    config.validate()
}
