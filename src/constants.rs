//! Application constants for the Ferrybox converter
//!
//! File naming conventions, column names and format strings shared by
//! discovery, loading and output.

// =============================================================================
// File Patterns
// =============================================================================

/// Extension of Ferrybox instrument files
pub const INPUT_EXTENSION: &str = "txt";

/// Extension of merged output files
pub const OUTPUT_EXTENSION: &str = "csv";

/// Separator between the instrument name and the date token in a file name
pub const DATE_SEPARATOR: char = '_';

// =============================================================================
// File Content
// =============================================================================

/// Substring marking the last line of the preamble
pub const HEADER_MARKER: &str = "$DATASETS";

/// Name of the first data column as written by the instrument software
pub const RAW_TIMESTAMP_COLUMN: &str = "$Timestamp";

/// Field separator of the tabular section
pub const FIELD_SEPARATOR: u8 = b'\t';

// =============================================================================
// Output Columns
// =============================================================================

pub const TIMESTAMP_COLUMN: &str = "Timestamp";
pub const LONGITUDE_COLUMN: &str = "Longitude";
pub const LATITUDE_COLUMN: &str = "Latitude";

/// Leading columns of every output table, in order
pub const FIXED_COLUMNS: &[&str] = &[TIMESTAMP_COLUMN, LONGITUDE_COLUMN, LATITUDE_COLUMN];

/// Timestamp format of the output CSV
pub const OUTPUT_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

// =============================================================================
// Logging
// =============================================================================

/// Default log filter when RUST_LOG is not set
pub const DEFAULT_LOG_FILTER: &str = "ferrybox2csv=warn";
