//! Main processing engine.
//!
//! Orchestrates a Ferrybox conversion run: layout validation, date
//! discovery, the per-date load and merge fold, and CSV output.

pub mod discovery;
pub mod loader;
pub mod merge;
pub mod writer;

#[cfg(test)]
pub mod tests;

use self::{discovery::FileDiscovery, merge::build_date_table, writer::OutputWriter};

use crate::config::ConvertConfig;
use crate::error::{FerryboxError, Result};
use crate::models::{DateTable, DateToken, ProcessingStats};

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Instant;
use tokio::fs;
use tokio::task;
use tracing::{debug, info};

/// Main processor for Ferrybox dataset conversion
#[derive(Debug)]
pub struct DatasetProcessor {
    input_path: PathBuf,
    output_path: PathBuf,
    config: ConvertConfig,
    file_discovery: FileDiscovery,
    output_writer: OutputWriter,
}

impl DatasetProcessor {
    /// Create a new dataset processor
    pub fn new(input_path: PathBuf, output_path: PathBuf) -> Result<Self> {
        if !input_path.is_dir() {
            return Err(FerryboxError::InputNotFound { path: input_path });
        }

        let config = ConvertConfig::default();

        Ok(Self {
            input_path: input_path.clone(),
            output_path: output_path.clone(),
            config: config.clone(),
            file_discovery: FileDiscovery::new(input_path),
            output_writer: OutputWriter::new(output_path, config),
        })
    }

    /// Configure the processor
    pub fn with_config(mut self, config: ConvertConfig) -> Self {
        self.config = config.clone();
        self.output_writer = OutputWriter::new(self.output_path.clone(), config);
        self
    }

    /// Main processing entry point
    ///
    /// Dates are converted one at a time in ascending order. An error stops
    /// the run; dates written before it are left in place.
    pub async fn process(&mut self) -> Result<ProcessingStats> {
        let start_time = Instant::now();
        println!(
            "{}",
            "Starting Ferrybox conversion".bright_green().bold()
        );
        println!(
            "  {} {}",
            "Input:".bright_cyan(),
            self.input_path.display()
        );
        println!(
            "  {} {}",
            "Output:".bright_cyan(),
            self.output_path.display()
        );

        // Step 1: Validate folder layout before anything is written
        let layout = self.file_discovery.classify().await?;
        debug!("Input layout: {:?}", layout);

        // Step 2: Collect dates from file names
        let dates = self.file_discovery.collect_dates()?;
        println!(
            "  {} {} dates",
            "Found".bright_green(),
            dates.len().to_string().bright_white().bold()
        );

        // Step 3: Create output directory
        fs::create_dir_all(self.output_writer.output_dir()).await?;

        // Step 4: Convert each date
        let progress = self.progress_bar(dates.len());
        let mut stats = ProcessingStats {
            output_path: self.output_path.clone(),
            ..Default::default()
        };

        for date in dates {
            progress.suspend(|| println!("  {}", date.to_string().bright_white()));
            progress.set_message(date.to_string());
            info!("Processing date {}", date);

            let mut table = self.convert_date(date).await?;
            self.output_writer.write(&mut table)?;

            stats.dates_written += 1;
            stats.files_processed += table.file_count;
            stats.total_rows += table.height();
            progress.inc(1);
        }

        progress.finish_with_message("All dates converted");

        stats.processing_time_ms = start_time.elapsed().as_millis();
        self.report(&stats);
        Ok(stats)
    }

    /// Load and merge all files of one date off the async runtime
    async fn convert_date(&self, date: DateToken) -> Result<DateTable> {
        let files = self.file_discovery.files_for_date(&date)?;
        if files.is_empty() {
            return Err(FerryboxError::NoFilesForDate {
                date: date.to_string(),
            });
        }

        let config = self.config.clone();
        let input_path = self.input_path.clone();

        task::spawn_blocking(move || build_date_table(date, &files, &config))
            .await
            .map_err(|e| FerryboxError::ProcessingFailed {
                path: input_path,
                reason: format!("Date conversion task failed: {}", e),
            })?
    }

    fn progress_bar(&self, len: usize) -> ProgressBar {
        if !self.config.show_progress {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(len as u64);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        {
            pb.set_style(style.progress_chars("#>-"));
        }
        pb
    }

    fn report(&self, stats: &ProcessingStats) {
        println!("\n{}", "Conversion Summary".bright_green().bold());
        println!(
            "  {} {}ms",
            "Time elapsed:".bright_cyan(),
            stats.processing_time_ms.to_string().bright_white()
        );
        println!(
            "  {} {}",
            "Dates written:".bright_cyan(),
            stats.dates_written.to_string().bright_white()
        );
        println!(
            "  {} {}",
            "Files processed:".bright_cyan(),
            stats.files_processed.to_string().bright_white()
        );
        println!(
            "  {} {}",
            "Total rows:".bright_cyan(),
            stats.total_rows.to_string().bright_white().bold()
        );
    }
}
