use std::path::Path;
use std::process::{Command, Output};

use tempfile::tempdir;

fn logsift(dir: &Path, extra: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_logsift"))
        .current_dir(dir)
        .env("NO_COLOR", "1")
        .env("RUST_LOG", "off")
        .args(["--raw-log", "raw.txt", "--output", "combined.txt", "--skip-fetch"])
        .args(extra)
        .output()
        .expect("failed to run logsift")
}

#[test]
fn wrong_date_format_exits_non_zero() {
    let dir = tempdir().unwrap();
    let out = logsift(dir.path(), &["--date", "15-01-2024"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains("Invalid date format"));

    let combined = std::fs::read_to_string(dir.path().join("combined.txt")).unwrap();
    assert!(combined.trim_start().starts_with("[Script run at:]"));
    assert_eq!(combined.lines().filter(|l| !l.is_empty()).count(), 1);
    assert!(!dir.path().join("raw.txt").exists());
}

#[test]
fn filters_existing_raw_log_by_keyword_and_date() {
    let dir = tempdir().unwrap();
    std::fs::write(
        dir.path().join("raw.txt"),
        "Event[0]:\n  Date: 01/15/2024 10:00:00 AM\n  Description: critical failure\n\n\
         Event[1]:\n  Date: 01/16/2024 08:00:00 AM\n  Description: disk error on C:\n",
    )
    .unwrap();

    let out = logsift(dir.path(), &["--keywords", "critical,error", "--date", "2024-01-16"]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Total logs scanned: 6"));
    assert!(stdout.contains("Total matches found: 1"));

    let combined = std::fs::read_to_string(dir.path().join("combined.txt")).unwrap();
    assert!(combined.contains("Keywords: critical, error"));
    assert!(combined.contains("Description: disk error on C:"));
    assert!(!combined.contains("critical failure"));
}

#[test]
fn missing_raw_log_is_not_fatal() {
    let dir = tempdir().unwrap();
    let out = logsift(dir.path(), &[]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Log file not found"));
    assert!(stdout.contains("No matching logs found"));
    assert!(dir.path().join("combined.txt").exists());
}
