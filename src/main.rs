//! TrainLoad - Training Load Monitoring
//!
//! Command-line front end: acquires a dataset, runs the analytics pipeline and
//! prints the session table with a duration prediction per athlete.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use trainload::config::{load_config, load_config_from};
use trainload::dataset::{simulated_watch_download, SessionDataset};
use trainload::ml::PredictionQuery;
use trainload::report::{export_csv_to_file, format_prediction, render_table};
use trainload::LoadMonitor;

#[derive(Parser)]
#[command(
    name = "trainload",
    version,
    about = "Training load, fatigue semaphore and performance prediction"
)]
struct Cli {
    /// JSON dataset to analyze (defaults to a simulated watch download)
    #[arg(long)]
    dataset: Option<PathBuf>,

    /// Configuration file (defaults to config.toml in the data directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the augmented table to this CSV file
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Print the report as JSON instead of a table
    #[arg(long)]
    json: bool,

    /// Only predict for this athlete
    #[arg(long)]
    athlete: Option<String>,

    /// Planned distance in km for the prediction
    #[arg(long)]
    distance: Option<f64>,

    /// Planned load for the prediction (defaults to the athlete's mean load)
    #[arg(long)]
    load: Option<f64>,
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting TrainLoad v{}", env!("CARGO_PKG_VERSION"));

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Could not produce the training report: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => load_config_from(path),
        None => load_config(),
    }
    .context("loading configuration")?;

    let dataset = match &cli.dataset {
        Some(path) => SessionDataset::load(path)
            .with_context(|| format!("reading dataset {}", path.display()))?,
        None => {
            tracing::info!("No dataset given, using simulated watch download");
            simulated_watch_download()
        }
    };

    let decimals = config.report.decimals;
    let report = LoadMonitor::new(config).analyze(&dataset);

    if let Some(path) = &cli.csv {
        export_csv_to_file(&report.sessions, path)
            .with_context(|| format!("writing {}", path.display()))?;
        tracing::info!("Wrote {} rows to {}", report.sessions.len(), path.display());
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_table(&report));
    }

    let athletes: Vec<String> = report
        .predictor
        .athletes()
        .filter(|a| cli.athlete.as_deref().map_or(true, |wanted| wanted == *a))
        .map(str::to_string)
        .collect();

    if let Some(wanted) = &cli.athlete {
        if athletes.is_empty() {
            println!("No sessions recorded for {}.", wanted);
        }
    }

    for athlete in athletes {
        let defaults = report.predictor.default_query(&athlete)?;
        let query = PredictionQuery {
            distance_km: cli.distance.unwrap_or(defaults.distance_km),
            load: cli.load.unwrap_or(defaults.load),
            ..defaults
        };

        match report.predictor.answer(&query) {
            Ok(prediction) => println!("{}", format_prediction(&prediction, decimals)),
            Err(e) => println!("Cannot estimate time for {}: {}", athlete, e),
        }
    }

    Ok(())
}
