//! Concurrency tests for fitmate.
//!
//! These tests verify that multiple processes sharing a data directory:
//! - Never leave a partially written blob behind
//! - Can read while another process writes

use assert_cmd::Command;
use std::path::Path;
use std::thread;
use std::time::Duration;
use tempfile::TempDir;

fn cli() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("fitmate"))
}

fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

fn read_progress(data_dir: &Path) -> serde_json::Value {
    let contents = std::fs::read_to_string(data_dir.join("fitmate-user-progress.json"))
        .expect("Failed to read progress");
    serde_json::from_str(&contents).expect("Progress blob contains invalid JSON")
}

#[test]
fn test_sequential_logging_keeps_every_entry() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    for day in 1..=5 {
        thread::sleep(Duration::from_millis(day * 5));
        cli()
            .arg("--data-dir")
            .arg(&data_dir)
            .arg("log")
            .arg("--date")
            .arg(format!("2025-01-0{}", day))
            .arg("--weight")
            .arg(format!("{}", 80 - day))
            .assert()
            .success();
    }

    let progress = read_progress(&data_dir);
    let weights = progress["data"]["weights"].as_array().unwrap();
    assert_eq!(weights.len(), 5, "Expected 5 weight entries");
    assert_eq!(weights[0]["date"], "2025-01-01");
    assert_eq!(weights[4]["date"], "2025-01-05");
}

#[test]
fn test_no_blob_corruption_under_load() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    // Hammer the CLI with many concurrent writes
    let handles: Vec<_> = (1..=9u64)
        .map(|day| {
            let data_dir = data_dir.clone();
            thread::spawn(move || {
                // Small stagger to reduce thundering herd
                thread::sleep(Duration::from_millis(day * 5));
                cli()
                    .arg("--data-dir")
                    .arg(&data_dir)
                    .arg("log")
                    .arg("--date")
                    .arg(format!("2025-02-0{}", day))
                    .arg("--calories")
                    .arg("100")
                    .arg("--completed")
                    .arg("true")
                    .timeout(Duration::from_secs(10))
                    .assert()
                    .success();
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("Thread panicked");
    }

    // Last writer wins, but whatever is on disk must be a whole blob
    let progress = read_progress(&data_dir);
    assert_eq!(progress["version"], 1);
    let workouts = progress["data"]["workouts"].as_array().unwrap();
    assert!(!workouts.is_empty());
    assert!(workouts.len() <= 9);

    let streak = std::fs::read_to_string(data_dir.join("fitmate-user-streak.json"))
        .expect("Failed to read streak");
    let parsed: Result<serde_json::Value, _> = serde_json::from_str(&streak);
    assert!(parsed.is_ok(), "Streak blob contains invalid JSON");
}

#[test]
fn test_reads_during_writes() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    cli()
        .arg("--data-dir")
        .arg(&data_dir)
        .args(["log", "--date", "2025-03-01", "--weight", "70"])
        .assert()
        .success();

    let writer_dir = data_dir.clone();
    let writer = thread::spawn(move || {
        for day in 2..=6 {
            cli()
                .arg("--data-dir")
                .arg(&writer_dir)
                .arg("log")
                .arg("--date")
                .arg(format!("2025-03-0{}", day))
                .arg("--weight")
                .arg("70")
                .timeout(Duration::from_secs(10))
                .assert()
                .success();
        }
    });

    // Readers can read at any time
    for _ in 0..5 {
        cli()
            .arg("--data-dir")
            .arg(&data_dir)
            .arg("stats")
            .timeout(Duration::from_secs(10))
            .assert()
            .success();
        thread::sleep(Duration::from_millis(5));
    }

    writer.join().expect("Writer thread panicked");

    let progress = read_progress(&data_dir);
    assert_eq!(progress["data"]["weights"].as_array().unwrap().len(), 6);
}
