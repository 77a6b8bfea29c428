//! Command-line interface components.

use crate::constants::DEFAULT_LOG_FILTER;
use crate::models::ProcessingStats;
use crate::processor::DatasetProcessor;
use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(name = "ferrybox2csv")]
#[command(about = "Convert Ferrybox output files to CSV files")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    /// Folder containing Ferrybox files
    #[arg(value_name = "INPUT_FOLDER")]
    pub input_folder: PathBuf,

    /// Folder for output files
    #[arg(value_name = "OUTPUT_FOLDER")]
    pub output_folder: PathBuf,
}

/// Set up structured logging on stderr
///
/// Filtered by `RUST_LOG`, defaulting to warnings from this crate.
pub fn setup_logging() {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_timer(fmt::time::uptime())
                .with_writer(std::io::stderr),
        )
        .try_init();

    debug!("Logging initialized");
}

/// Run a conversion for parsed arguments
pub async fn run(args: Args) -> Result<ProcessingStats> {
    let mut processor = DatasetProcessor::new(args.input_folder.clone(), args.output_folder)
        .with_context(|| {
            format!(
                "Cannot convert input folder {}",
                args.input_folder.display()
            )
        })?;

    let stats = processor.process().await?;
    Ok(stats)
}
