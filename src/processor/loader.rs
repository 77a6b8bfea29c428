//! Series loading for single Ferrybox files
//!
//! Turns the tabular section of one instrument file into a table holding the
//! timestamp, the file's measurement variable and, when the date still needs
//! it, the ship position.

use crate::config::ConvertConfig;
use crate::constants::{LATITUDE_COLUMN, LONGITUDE_COLUMN, TIMESTAMP_COLUMN};
use crate::error::{FerryboxError, Result};
use crate::header::scan_header;
use crate::models::{RawFile, SeriesTable};

use polars::prelude::*;
use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};

/// Name of the measurement column of a file
///
/// The variable is always the second column of the tabular section,
/// whatever it is called.
pub fn variable_column_name<'a>(columns: &[&'a str], file_path: &Path) -> Result<&'a str> {
    columns
        .get(1)
        .copied()
        .ok_or_else(|| FerryboxError::MissingVariableColumn {
            path: file_path.to_path_buf(),
            found: columns.len(),
        })
}

/// Read, scan and load one instrument file
pub fn load_file(
    raw_file: &RawFile,
    need_position: bool,
    config: &ConvertConfig,
) -> Result<SeriesTable> {
    let scanned = scan_header(&raw_file.path, &config.header_marker)?;
    load_series(
        &raw_file.path,
        &scanned.text,
        scanned.header_lines,
        need_position,
        config,
    )
}

/// Parse the tabular section following `header_lines` preamble lines
///
/// The section starts with a column-name row and a unit row; only the names
/// are kept. The result holds `Timestamp`, then `Longitude` and `Latitude`
/// when `need_position` is set and the file has both, then the variable.
pub fn load_series(
    file_path: &Path,
    text: &str,
    header_lines: usize,
    need_position: bool,
    config: &ConvertConfig,
) -> Result<SeriesTable> {
    let mut rows = text
        .lines()
        .skip(header_lines)
        .filter(|line| !line.is_empty());

    let name_row = rows.next().ok_or_else(|| FerryboxError::InvalidFormat {
        path: file_path.to_path_buf(),
        reason: "missing column name row after header".to_string(),
    })?;
    rows.next().ok_or_else(|| FerryboxError::InvalidFormat {
        path: file_path.to_path_buf(),
        reason: "missing unit row after column names".to_string(),
    })?;

    let separator = config.separator as char;
    let column_names: Vec<&str> = name_row.split(separator).collect();
    let variable = variable_column_name(&column_names, file_path)?.to_string();

    let raw_timestamp = column_names[0];
    if raw_timestamp != config.raw_timestamp_column {
        warn!(
            "First column of {} is '{}', expected '{}'; using it as the timestamp",
            file_path.display(),
            raw_timestamp,
            config.raw_timestamp_column
        );
    }

    let has_position = need_position
        && variable != LONGITUDE_COLUMN
        && variable != LATITUDE_COLUMN
        && column_names.contains(&LONGITUDE_COLUMN)
        && column_names.contains(&LATITUDE_COLUMN);

    // Name row followed by the data rows, unit row dropped
    let mut buffer = String::with_capacity(text.len());
    buffer.push_str(name_row);
    buffer.push('\n');
    for row in rows {
        buffer.push_str(row);
        buffer.push('\n');
    }

    let raw_frame = read_table(buffer, raw_timestamp, config)
        .map_err(|source| parse_failed(file_path, source))?;

    let mut select_exprs = vec![
        col(raw_timestamp)
            .str()
            .to_datetime(
                Some(TimeUnit::Milliseconds),
                None,
                StrptimeOptions {
                    format: config.timestamp_format.clone().map(Into::into),
                    strict: true,
                    exact: true,
                    cache: true,
                },
                lit("raise"),
            )
            .alias(TIMESTAMP_COLUMN),
    ];
    if has_position {
        select_exprs.push(col(LONGITUDE_COLUMN).cast(DataType::Float64));
        select_exprs.push(col(LATITUDE_COLUMN).cast(DataType::Float64));
    }
    select_exprs.push(col(variable.as_str()));

    let frame = raw_frame
        .lazy()
        .select(select_exprs)
        .collect()
        .map_err(|source| parse_failed(file_path, source))?;

    debug!(
        "Loaded {} rows of '{}' from {} (position: {})",
        frame.height(),
        variable,
        file_path.display(),
        has_position
    );

    Ok(SeriesTable {
        frame,
        variable,
        has_position,
    })
}

/// Parse tab-separated text with a single header row
///
/// The timestamp column is kept as text so it can be parsed with an
/// explicit datetime expression; other column types are inferred from every
/// row, so a decimal late in the day still widens an integer column.
fn read_table(
    buffer: String,
    timestamp_column: &str,
    config: &ConvertConfig,
) -> PolarsResult<DataFrame> {
    let overwrite = Schema::from_iter([(PlSmallStr::from(timestamp_column), DataType::String)]);

    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .with_schema_overwrite(Some(Arc::new(overwrite)))
        .map_parse_options(|opts| {
            opts.with_separator(config.separator)
                .with_truncate_ragged_lines(true)
        })
        .into_reader_with_file_handle(Cursor::new(buffer.into_bytes()))
        .finish()
}

fn parse_failed(file_path: &Path, source: PolarsError) -> FerryboxError {
    FerryboxError::ParseFailed {
        path: file_path.to_path_buf(),
        source,
    }
}
