//! Integration tests for the processor module
//!
//! Tests the complete conversion pipeline on generated Ferrybox folders.


use crate::config::ConvertConfig;
use crate::processor::DatasetProcessor;
use std::fs;
use std::path::{Path, PathBuf};

/// One data row of a generated instrument file
pub struct Row<'a> {
    pub at: &'a str,
    pub value: &'a str,
    pub position: Option<(&'a str, &'a str)>,
}

pub fn row<'a>(at: &'a str, value: &'a str) -> Row<'a> {
    Row {
        at,
        value,
        position: None,
    }
}

pub fn row_at<'a>(at: &'a str, value: &'a str, lon: &'a str, lat: &'a str) -> Row<'a> {
    Row {
        at,
        value,
        position: Some((lon, lat)),
    }
}

/// Render an instrument file: preamble, name row, unit row, data
///
/// Position columns are written when any row carries a position. The
/// preamble contains a Windows-1252 degree sign.
pub fn instrument_file(variable: &str, rows: &[Row]) -> Vec<u8> {
    let with_position = rows.iter().any(|r| r.position.is_some());

    let mut bytes = Vec::new();
    bytes.extend_from_slice(b"Ferrybox data export\n");
    bytes.extend_from_slice(b"Route: Travemuende - Helsinki\n");
    bytes.extend_from_slice(b"Sensor range: -2 to 35 \xB0C\n");
    bytes.extend_from_slice(b"$DATASETS\n");

    if with_position {
        bytes.extend_from_slice(
            format!("$Timestamp\t{variable}\tLongitude\tLatitude\tQuality\n").as_bytes(),
        );
        bytes.extend_from_slice(b"\tunit\tdeg\tdeg\tflag\n");
    } else {
        bytes.extend_from_slice(format!("$Timestamp\t{variable}\tQuality\n").as_bytes());
        bytes.extend_from_slice(b"\tunit\tflag\n");
    }

    for r in rows {
        let line = match r.position {
            Some((lon, lat)) => format!("{}\t{}\t{}\t{}\t0\n", r.at, r.value, lon, lat),
            None if with_position => format!("{}\t{}\t\t\t0\n", r.at, r.value),
            None => format!("{}\t{}\t0\n", r.at, r.value),
        };
        bytes.extend_from_slice(line.as_bytes());
    }

    bytes
}

pub fn write_instrument_file(dir: &Path, name: &str, variable: &str, rows: &[Row]) -> PathBuf {
    fs::create_dir_all(dir).unwrap();
    let path = dir.join(name);
    fs::write(&path, instrument_file(variable, rows)).unwrap();
    path
}

pub fn quiet_processor(input: &Path, output: &Path) -> DatasetProcessor {
    DatasetProcessor::new(input.to_path_buf(), output.to_path_buf())
        .unwrap()
        .with_config(ConvertConfig::default().with_progress(false))
}

pub fn read_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}
