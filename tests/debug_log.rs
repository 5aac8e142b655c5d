// SPDX-License-Identifier: MPL-2.0
use chrono::NaiveTime;
use iqpuzzle::logging::{self, LogRecord, Severity, SourceLocation, LOG_TARGET};
use std::fs;
use std::path::Path;
use std::process::Command;
use std::sync::Mutex;
use tempfile::tempdir;

// The sink is process-global; tests installing it must not overlap.
static SINK_MUTEX: Mutex<()> = Mutex::new(());

/// Set in the re-executed child to the log path it should write to.
const FATAL_CHILD_ENV: &str = "IQPUZZLE_FATAL_CHILD_LOG";

fn read_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .expect("log file should exist")
        .lines()
        .map(str::to_string)
        .collect()
}

/// Splits `HH:MM:SS rest` and checks the timestamp.
fn strip_time(line: &str) -> &str {
    let (time, rest) = line.split_once(' ').expect("line has a timestamp");
    NaiveTime::parse_from_str(time, "%H:%M:%S").expect("timestamp is HH:MM:SS");
    rest
}

#[test]
fn setup_writes_headers_then_records() {
    let _lock = SINK_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let dir = tempdir().unwrap();
    let path = dir.path().join("Debug.log");

    logging::setup(&path, "App", "1.0").expect("setup should succeed");
    log::debug!(target: LOG_TARGET, "hello");
    logging::shutdown();

    let lines = read_lines(&path);
    assert_eq!(lines.len(), 3, "{lines:?}");
    assert_eq!(strip_time(&lines[0]), "Debug: App 1.0");
    assert!(strip_time(&lines[1]).starts_with("Debug: Compiled with iced "));
    assert!(lines[1].ends_with(&format!("({})", logging::RUSTC_VERSION)));
    assert_eq!(strip_time(&lines[2]), "Debug: hello");
}

#[test]
fn warnings_carry_source_location() {
    let _lock = SINK_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let dir = tempdir().unwrap();
    let path = dir.path().join("Debug.log");

    logging::setup(&path, "App", "1.0").unwrap();
    logging::emit(
        &LogRecord::new(Severity::Warning, "odd piece")
            .with_location(SourceLocation::new("x.cpp", 42, "f")),
    )
    .unwrap();
    log::error!("no data path");
    logging::shutdown();

    let lines = read_lines(&path);
    assert!(lines[2].ends_with("Warning: odd piece (x.cpp:42, f)"));
    let critical = strip_time(&lines[3]);
    assert!(critical.starts_with("Critical: no data path (tests/debug_log.rs:"));
    assert!(critical.ends_with(", debug_log)"));
}

#[test]
fn second_setup_truncates_the_file() {
    let _lock = SINK_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let dir = tempdir().unwrap();
    let path = dir.path().join("Debug.log");

    logging::setup(&path, "App", "1.0").unwrap();
    log::debug!(target: LOG_TARGET, "first run");
    logging::setup(&path, "App", "1.0").unwrap();
    log::debug!(target: LOG_TARGET, "second run");
    logging::shutdown();

    let content = fs::read_to_string(&path).unwrap();
    assert!(!content.contains("first run"));
    assert!(content.contains("Debug: second run"));
    assert_eq!(content.matches("Debug: App 1.0").count(), 1);
}

#[test]
fn foreign_crates_only_reach_the_log_from_warn_up() {
    let _lock = SINK_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let dir = tempdir().unwrap();
    let path = dir.path().join("Debug.log");

    logging::setup(&path, "App", "1.0").unwrap();
    log::trace!(target: "wgpu_core::device", "buffer mapped");
    log::debug!(target: "winit", "cursor moved");
    log::info!(target: "iqpuzzle_extras", "lookalike target");
    log::warn!(target: "wgpu_core::device", "surface lost");
    log::info!(target: "iqpuzzle::board", "board loaded");
    log::trace!(target: LOG_TARGET, "too detailed");
    logging::shutdown();

    let content = fs::read_to_string(&path).unwrap();
    assert!(!content.contains("buffer mapped"));
    assert!(!content.contains("cursor moved"));
    assert!(!content.contains("lookalike target"));
    assert!(!content.contains("too detailed"));
    assert!(content.contains("Warning: surface lost"));
    assert!(content.contains("Debug: board loaded"));
}

#[test]
fn failed_setup_keeps_records_out_of_files() {
    let _lock = SINK_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let dir = tempdir().unwrap();
    let good = dir.path().join("Debug.log");
    let bad = dir.path().join("missing").join("Debug.log");

    logging::setup(&good, "App", "1.0").unwrap();
    assert!(logging::setup(&bad, "App", "1.0").is_err());
    log::warn!("nobody hears this");

    assert_eq!(logging::log_path(), None);
    assert!(!bad.exists());
    assert!(!fs::read_to_string(&good).unwrap().contains("nobody hears this"));
}

#[test]
fn records_after_shutdown_are_dropped() {
    let _lock = SINK_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let dir = tempdir().unwrap();
    let path = dir.path().join("Debug.log");

    logging::setup(&path, "App", "1.0").unwrap();
    assert_eq!(logging::log_path(), Some(path.clone()));
    logging::shutdown();
    log::debug!(target: LOG_TARGET, "too late");

    assert!(!fs::read_to_string(&path).unwrap().contains("too late"));
}

#[test]
fn fatal_record_aborts_after_flushing() {
    if let Ok(path) = std::env::var(FATAL_CHILD_ENV) {
        logging::setup(Path::new(&path), "App", "1.0").expect("child setup");
        log::debug!(target: LOG_TARGET, "before fatal");
        iqpuzzle::fatal!("unrecoverable: {}", 7);
    }

    let dir = tempdir().unwrap();
    let path = dir.path().join("Debug.log");
    let status = Command::new(std::env::current_exe().unwrap())
        .args([
            "fatal_record_aborts_after_flushing",
            "--exact",
            "--test-threads=1",
            "--nocapture",
        ])
        .env(FATAL_CHILD_ENV, &path)
        .status()
        .expect("child test process should start");

    assert!(!status.success(), "fatal record must terminate the process");

    let lines = read_lines(&path);
    assert_eq!(strip_time(&lines[2]), "Debug: before fatal");
    let last = strip_time(lines.last().unwrap());
    assert!(last.starts_with("Fatal: unrecoverable: 7 (tests/debug_log.rs:"), "{last}");
    assert!(last.ends_with(", debug_log)"), "{last}");
}

#[test]
fn fatal_without_sink_is_still_signalled() {
    let _lock = SINK_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    logging::shutdown();

    let err = logging::emit(&LogRecord::new(Severity::Fatal, "no sink")).unwrap_err();
    assert_eq!(err.message(), "no sink");
    assert!(logging::emit(&LogRecord::new(Severity::Critical, "dropped")).is_ok());
}
