//! Configuration for a conversion run.
//!
//! Defaults describe the files written by the Ferrybox instrument software;
//! tests and library callers override individual fields with struct update
//! syntax.

use crate::constants::{FIELD_SEPARATOR, HEADER_MARKER, OUTPUT_DATETIME_FORMAT, RAW_TIMESTAMP_COLUMN};
use serde::{Deserialize, Serialize};

/// Settings shared by every stage of the conversion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConvertConfig {
    /// Substring identifying the final preamble line
    pub header_marker: String,

    /// Expected name of the first data column, renamed to `Timestamp`
    pub raw_timestamp_column: String,

    /// strftime format of input timestamps (None = infer from the data)
    pub timestamp_format: Option<String>,

    /// strftime format used when writing timestamps
    pub output_datetime_format: String,

    /// Field separator of the tabular section
    pub separator: u8,

    /// Show a progress bar while converting dates
    pub show_progress: bool,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            header_marker: HEADER_MARKER.to_string(),
            raw_timestamp_column: RAW_TIMESTAMP_COLUMN.to_string(),
            timestamp_format: None,
            output_datetime_format: OUTPUT_DATETIME_FORMAT.to_string(),
            separator: FIELD_SEPARATOR,
            show_progress: true,
        }
    }
}

impl ConvertConfig {
    /// Set an explicit input timestamp format
    pub fn with_timestamp_format(mut self, format: impl Into<String>) -> Self {
        self.timestamp_format = Some(format.into());
        self
    }

    /// Enable or disable the progress bar
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }
}
