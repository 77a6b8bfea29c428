//! End-to-end tests of the ferrybox2csv binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_file(path: &Path, variable: &str, rows: &[&str]) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    let mut content = format!("Ferrybox export\n$DATASETS\n$Timestamp\t{variable}\n\tunit\n");
    for row in rows {
        content.push_str(row);
        content.push('\n');
    }
    fs::write(path, content).unwrap();
}

#[test]
fn test_help_lists_positional_arguments() {
    Command::cargo_bin("ferrybox2csv")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("INPUT_FOLDER"))
        .stdout(predicate::str::contains("OUTPUT_FOLDER"));
}

#[test]
fn test_missing_arguments_fail() {
    Command::cargo_bin("ferrybox2csv")
        .unwrap()
        .assert()
        .failure();
}

#[test]
fn test_converts_folder() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("input");
    let output = temp_dir.path().join("output");

    write_file(
        &input.join("Sal_20230101.txt"),
        "Sal",
        &["2023-01-01 10:00:00\t35.1", "2023-01-01 10:10:00\t35.2"],
    );

    Command::cargo_bin("ferrybox2csv")
        .unwrap()
        .arg(&input)
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("20230101"));

    let csv = fs::read_to_string(output.join("20230101.csv")).unwrap();
    assert_eq!(
        csv.lines().collect::<Vec<_>>(),
        [
            "Timestamp,Sal",
            "2023-01-01T10:00:00Z,35.1",
            "2023-01-01T10:10:00Z,35.2",
        ]
    );
}

#[test]
fn test_mixed_layout_exits_with_error() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("input");
    let output = temp_dir.path().join("output");

    write_file(&input.join("Sal_20230101.txt"), "Sal", &["2023-01-01 10:00:00\t35.1"]);
    write_file(
        &input.join("leg1").join("Temp_20230101.txt"),
        "Temp",
        &["2023-01-01 10:00:00\t12.5"],
    );

    Command::cargo_bin("ferrybox2csv")
        .unwrap()
        .arg(&input)
        .arg(&output)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("all files or all folders"));

    assert!(!output.exists());
}

#[test]
fn test_missing_header_marker_names_file() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("input");
    let output = temp_dir.path().join("output");

    fs::create_dir_all(&input).unwrap();
    fs::write(input.join("Sal_20230101.txt"), "no marker\n").unwrap();

    Command::cargo_bin("ferrybox2csv")
        .unwrap()
        .arg(&input)
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Sal_20230101.txt"));
}
