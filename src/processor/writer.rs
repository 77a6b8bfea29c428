//! CSV writing module for merged Ferrybox dates
//!
//! Writes one `<date>.csv` per date table into the output directory.

use crate::config::ConvertConfig;
use crate::constants::OUTPUT_EXTENSION;
use crate::error::{FerryboxError, Result};
use crate::models::{DateTable, DateToken};

use polars::prelude::{CsvWriter as PolarsCsvWriter, SerWriter};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::debug;

/// CSV writer for date tables
#[derive(Debug)]
pub struct OutputWriter {
    output_dir: PathBuf,
    config: ConvertConfig,
}

impl OutputWriter {
    /// Create a new writer targeting `output_dir`
    pub fn new(output_dir: PathBuf, config: ConvertConfig) -> Self {
        Self { output_dir, config }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Path of the output file for a date
    pub fn output_file(&self, date: &DateToken) -> PathBuf {
        self.output_dir
            .join(format!("{}.{}", date, OUTPUT_EXTENSION))
    }

    /// Write a date table, replacing any previous output for the date
    ///
    /// Nulls are written as empty fields and no index column is added.
    pub fn write(&self, table: &mut DateTable) -> Result<PathBuf> {
        let path = self.output_file(&table.date);
        let file = File::create(&path)?;

        PolarsCsvWriter::new(BufWriter::new(file))
            .include_header(true)
            .with_datetime_format(Some(self.config.output_datetime_format.clone()))
            .finish(&mut table.frame)
            .map_err(|e| FerryboxError::ProcessingFailed {
                path: path.clone(),
                reason: format!("Failed to write CSV: {}", e),
            })?;

        debug!("Wrote {} rows to {}", table.height(), path.display());
        Ok(path)
    }
}
