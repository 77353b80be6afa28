//! Integration tests for the porosity CLI

use assert_cmd::Command;
use image::{Rgba, RgbaImage};
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn porosity() -> Command {
    let mut cmd = Command::cargo_bin("porosity").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

fn write_uniform(dir: &Path, name: &str, blue: u8) {
    fs::create_dir_all(dir).unwrap();
    RgbaImage::from_pixel(4, 3, Rgba([10, 20, blue, 255]))
        .save(dir.join(name))
        .unwrap();
}

/// Test CLI binary exists and responds to --help
#[test]
fn test_cli_help() {
    porosity()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("porosity at every brightness threshold"));
}

/// Test CLI responds to --version
#[test]
fn test_cli_version() {
    porosity()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("porosity"));
}

/// Test invalid subcommand shows error
#[test]
fn test_invalid_subcommand() {
    porosity()
        .arg("invalid-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_default_sweep_uses_original_and_processed() {
    let temp_dir = TempDir::new().unwrap();
    write_uniform(&temp_dir.path().join("original"), "7-2V.png", 128);

    porosity().current_dir(temp_dir.path()).arg("-q").assert().success();

    let csv = fs::read_to_string(temp_dir.path().join("processed/porosity.csv")).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 257);
    assert_eq!(lines[0], "Sample Number,Iteration Number,Porosity,Direction,B");

    let mut thresholds = Vec::new();
    for row in &lines[1..] {
        let fields: Vec<&str> = row.split(',').collect();
        assert_eq!(&fields[..2], &["7", "2"]);
        assert_eq!(fields[3], "V");
        let threshold: u16 = fields[4].parse().unwrap();
        let expected = if threshold >= 128 { "100.00" } else { "0.00" };
        assert_eq!(fields[2], expected, "row {}", row);
        thresholds.push(threshold);
    }
    thresholds.sort_unstable();
    assert_eq!(thresholds, (0..=255).collect::<Vec<u16>>());

    for threshold in [0, 127, 128, 255] {
        let path = temp_dir
            .path()
            .join("processed")
            .join(threshold.to_string())
            .join("7-2V.png");
        let written = image::open(&path).unwrap().to_rgba8();
        let expected = if threshold >= 128 { 0 } else { 255 };
        assert_eq!(written.get_pixel(0, 0), &Rgba([expected, expected, expected, 255]));
    }
}

#[test]
fn test_sweep_with_explicit_folders_and_sorted_rows() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("scans");
    let output = temp_dir.path().join("results");
    write_uniform(&input, "2-1H.png", 0);
    write_uniform(&input, "1-3V.png", 255);

    porosity()
        .current_dir(temp_dir.path())
        .args(["sweep", "--input", "scans", "--output", "results"])
        .args(["--csv", "out.csv", "--sorted", "--no-images", "--mode", "parallel", "--threads", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Finished processing all images"));

    let csv = fs::read_to_string(output.join("out.csv")).unwrap();
    let rows: Vec<&str> = csv.lines().skip(1).collect();
    assert_eq!(rows.len(), 512);
    assert_eq!(rows[0], "1,3,0.00,V,0");
    assert_eq!(rows[255], "1,3,100.00,V,255");
    assert_eq!(rows[256], "2,1,100.00,H,0");
    assert!(!output.join("0").exists());
}

#[test]
fn test_bad_file_name_fails_the_run() {
    let temp_dir = TempDir::new().unwrap();
    write_uniform(&temp_dir.path().join("original"), "sample1.png", 50);

    porosity()
        .current_dir(temp_dir.path())
        .arg("-q")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Sweep of ./original into ./processed aborted"))
        .stderr(predicate::str::contains("sample1.png"));

    let processed = temp_dir.path().join("processed");
    assert!(!processed.join("porosity.csv").exists());
    assert!(!processed.join("porosity.csv.partial").exists());
}

#[test]
fn test_missing_input_folder_fails() {
    let temp_dir = TempDir::new().unwrap();

    porosity()
        .current_dir(temp_dir.path())
        .args(["sweep", "--input", "nowhere"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nowhere"));

    assert!(!temp_dir.path().join("processed").exists());
}

#[test]
fn test_directory_flag_changes_working_directory() {
    let temp_dir = TempDir::new().unwrap();
    write_uniform(&temp_dir.path().join("original"), "3-4H.png", 10);

    porosity()
        .args(["-C"])
        .arg(temp_dir.path())
        .args(["sweep", "--no-images"])
        .assert()
        .success();

    assert!(temp_dir.path().join("processed/porosity.csv").is_file());
}

#[test]
fn test_key_command() {
    porosity()
        .args(["key", "7-2V.png", "scan_012-3H.tif"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sample 7, iteration 2, direction V"))
        .stdout(predicate::str::contains("sample 12, iteration 3, direction H"));

    porosity()
        .args(["key", "sample1.png"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("sample1.png"));
}

#[test]
fn test_config_show_reflects_local_file() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("porosity.toml"),
        "[sweep]\noutput_dir = \"elsewhere\"\nsort_rows = true\n",
    )
    .unwrap();

    porosity()
        .current_dir(temp_dir.path())
        .args(["config", "show", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"output_dir\": \"elsewhere\""))
        .stdout(predicate::str::contains("\"sort_rows\": true"));
}

#[test]
fn test_invalid_config_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("bad.toml");
    fs::write(&config_path, "[sweep]\nthread_percentage = 0\n").unwrap();

    porosity()
        .current_dir(temp_dir.path())
        .arg("--config")
        .arg(&config_path)
        .args(["config", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("thread_percentage"));
}
