//! Integration tests for channel_logger
//!
//! These tests verify:
//! - End-to-end output and line format
//! - Category isolation and per-producer ordering
//! - Level filtering and cancellation
//! - Rotation and retention
//! - Backpressure (drop on full queue) and error reporting
//! - Shutdown semantics

use channel_logger::prelude::*;
use channel_logger::router::backup_path;
use parking_lot::Mutex;
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use tempfile::TempDir;

fn read_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .expect("Failed to read log file")
        .lines()
        .map(str::to_string)
        .collect()
}

fn collecting_handler() -> (ErrorCallback, Arc<Mutex<Vec<String>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let seen_clone = Arc::clone(&seen);
    let handler: ErrorCallback = Arc::new(move |err: &LoggerError| {
        seen_clone.lock().push(err.to_string());
    });
    (handler, seen)
}

#[test]
fn test_end_to_end_two_lines() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let logger = ChannelLogger::new(10, temp_dir.path()).expect("Failed to create logger");

    logger.info("svc", "started");
    logger.error("svc", "boom");
    logger.close();

    let lines = read_lines(&temp_dir.path().join("svc.log"));
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("INFO") && lines[0].contains("started"));
    assert!(lines[1].contains("ERROR") && lines[1].contains("boom"));
}

#[test]
fn test_line_format() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let logger = ChannelLogger::new(10, temp_dir.path()).expect("Failed to create logger");

    logger.info("fmt", "hello");
    logger.close();

    let lines = read_lines(&temp_dir.path().join("fmt.log"));
    let line = &lines[0];
    // [YYYY-MM-DD HH:MM:SS] INFO: hello
    assert!(line.starts_with('['));
    assert_eq!(&line[20..], "] INFO: hello");
}

#[test]
fn test_categories_are_isolated() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let logger = ChannelLogger::new(100, temp_dir.path()).expect("Failed to create logger");

    for i in 0..20 {
        logger.info("alpha", &format!("alpha-{}", i));
        logger.info("beta", &format!("beta-{}", i));
    }
    logger.close();

    let alpha = read_lines(&temp_dir.path().join("alpha.log"));
    let beta = read_lines(&temp_dir.path().join("beta.log"));
    assert_eq!(alpha.len(), 20);
    assert_eq!(beta.len(), 20);
    assert!(alpha.iter().all(|l| l.contains("alpha-") && !l.contains("beta-")));
    assert!(beta.iter().all(|l| l.contains("beta-") && !l.contains("alpha-")));
}

#[test]
fn test_single_producer_order() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let logger = ChannelLogger::new(500, temp_dir.path()).expect("Failed to create logger");

    for i in 0..300 {
        logger.info("order", &format!("seq={}", i));
    }
    logger.close();

    let lines = read_lines(&temp_dir.path().join("order.log"));
    assert_eq!(lines.len(), 300);
    for (i, line) in lines.iter().enumerate() {
        assert!(line.ends_with(&format!("seq={}", i)), "out of order at {}: {}", i, line);
    }
}

#[test]
fn test_level_filter() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = LoggerConfig::new(10, temp_dir.path()).with_min_level(LogLevel::Info);
    let logger = ChannelLogger::with_config(config).expect("Failed to create logger");

    logger.debug("lvl", "debug line");
    logger.info("lvl", "info line");
    logger.log("lvl", "error", "error line");
    logger.close();

    let content = fs::read_to_string(temp_dir.path().join("lvl.log")).unwrap();
    assert!(!content.contains("debug line"));
    assert!(content.contains("info line"));
    assert!(content.contains("error line"));
}

#[test]
fn test_unknown_level_name_logs_as_info() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let logger = ChannelLogger::new(10, temp_dir.path()).expect("Failed to create logger");

    logger.log("lvl", "verbose", "mapped");
    logger.close();

    let lines = read_lines(&temp_dir.path().join("lvl.log"));
    assert!(lines[0].ends_with("INFO: mapped"));
}

#[test]
fn test_rotation_bounds_backups() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = LoggerConfig::new(100, temp_dir.path())
        .with_max_file_size(100)
        .with_max_files(3);
    let logger = ChannelLogger::with_config(config).expect("Failed to create logger");

    for i in 0..50 {
        logger.info("rot", &format!("message {:02} {}", i, "x".repeat(40)));
    }
    logger.close();

    let base = temp_dir.path().join("rot.log");
    assert!(base.exists());
    assert!(backup_path(&base, 1).exists());
    assert!(!backup_path(&base, 3).exists());
    assert!(logger.metrics().rotation_count() > 0);

    // The newest lines are in the active file
    let active = read_lines(&base);
    assert!(active.last().unwrap().contains("message 49"));
}

#[test]
fn test_cancelled_token_produces_no_output() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let logger = ChannelLogger::new(10, temp_dir.path()).expect("Failed to create logger");

    let token = CancellationToken::new();
    token.cancel();
    logger.log_with_context(&token, "ctx", "info", "cancelled");
    logger.log_with_context(&CancellationToken::new(), "ctx", "info", "delivered");
    logger.close();

    let content = fs::read_to_string(temp_dir.path().join("ctx.log")).unwrap();
    assert!(!content.contains("cancelled"));
    assert!(content.contains("delivered"));
    assert_eq!(logger.metrics().cancelled_count(), 1);
}

#[test]
fn test_close_twice() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let logger = ChannelLogger::new(10, temp_dir.path()).expect("Failed to create logger");

    logger.info("svc", "one");
    logger.close();
    logger.close();
    assert!(logger.is_closed());
}

#[test]
fn test_no_output_after_close() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let logger = ChannelLogger::new(10, temp_dir.path()).expect("Failed to create logger");

    logger.info("svc", "before");
    logger.close();
    logger.info("svc", "after");
    logger.error("other", "after");

    let lines = read_lines(&temp_dir.path().join("svc.log"));
    assert_eq!(lines.len(), 1);
    assert!(!temp_dir.path().join("other.log").exists());
}

#[test]
fn test_queue_full_reports_error() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let (handler, seen) = collecting_handler();
    let config = LoggerConfig::new(1, temp_dir.path()).with_error_handler(handler);
    let logger = ChannelLogger::with_config(config).expect("Failed to create logger");

    // Bursts of ten; the consumer may occasionally keep pace with one burst
    for _ in 0..100 {
        for i in 0..10 {
            logger.info("full", &format!("burst {}", i));
        }
        if logger.metrics().dropped_count() > 0 {
            break;
        }
    }
    logger.close();

    assert!(logger.metrics().dropped_count() >= 1);
    let seen = seen.lock();
    assert!(seen.iter().any(|e| e.contains("Log queue full")));
}

#[test]
fn test_error_handler_receives_open_failures() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let blocker = temp_dir.path().join("file.txt");
    fs::write(&blocker, "not a directory").unwrap();

    let (handler, seen) = collecting_handler();
    let config = LoggerConfig::new(10, blocker.join("logs")).with_error_handler(handler);
    let logger = ChannelLogger::with_config(config).expect("Failed to create logger");

    logger.info("svc", "still accepted");
    logger.close();

    let seen = seen.lock();
    assert!(seen.iter().any(|e| e.contains("Failed to create log directory")));
    assert!(seen.iter().any(|e| e.contains("Failed to open log file")));
    assert_eq!(logger.metrics().total_written(), 1);
}

#[test]
fn test_fields_rendered_sorted() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let logger = ChannelLogger::new(10, temp_dir.path()).expect("Failed to create logger");

    logger.log_with_fields(
        "http",
        LogLevel::Info,
        "request",
        [
            ("status", FieldValue::from(200)),
            ("path", FieldValue::from("/health")),
            ("cached", FieldValue::from(false)),
        ],
    );
    logger.close();

    let lines = read_lines(&temp_dir.path().join("http.log"));
    assert!(lines[0].ends_with("INFO: request | cached=false, path=/health, status=200"));
}

#[test]
fn test_fields_are_copied() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let logger = ChannelLogger::new(10, temp_dir.path()).expect("Failed to create logger");

    let mut fields = LogFields::new();
    fields.insert("user".to_string(), FieldValue::from("alice"));
    logger.log_with_fields("copy", LogLevel::Info, "first", &fields);
    fields.insert("user".to_string(), FieldValue::from("mallory"));
    logger.close();

    let lines = read_lines(&temp_dir.path().join("copy.log"));
    assert!(lines[0].ends_with("first | user=alice"));
}

#[test]
fn test_log_injection_prevention() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let logger = ChannelLogger::new(10, temp_dir.path()).expect("Failed to create logger");

    logger.info("inj", "User login\nERROR: Fake error injected\r\tcontinued");
    logger.close();

    let lines = read_lines(&temp_dir.path().join("inj.log"));
    assert_eq!(lines.len(), 1, "Log should be a single line, not multiple");
    assert!(lines[0].contains("User login\\nERROR: Fake error injected\\r\\tcontinued"));
}

#[test]
fn test_category_names_are_sanitized() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let logger = ChannelLogger::new(10, temp_dir.path()).expect("Failed to create logger");

    logger.info("../escape", "contained");
    logger.info("", "default category");
    logger.close();

    assert!(temp_dir.path().join("___escape.log").exists());
    assert!(temp_dir.path().join("default.log").exists());
}

#[test]
fn test_unix_timestamp_format() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config =
        LoggerConfig::new(10, temp_dir.path()).with_timestamp_format(TimestampFormat::Unix);
    let logger = ChannelLogger::with_config(config).expect("Failed to create logger");

    logger.info("ts", "epoch");
    logger.close();

    let lines = read_lines(&temp_dir.path().join("ts.log"));
    let stamp = &lines[0][1..lines[0].find(']').unwrap()];
    assert!(stamp.parse::<i64>().is_ok(), "not an epoch: {}", stamp);
}

#[test]
fn test_config_from_json() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("logger.json");
    let log_dir = temp_dir.path().join("logs");
    fs::write(
        &config_path,
        format!(
            r#"{{"queue_capacity": 20, "base_dir": {:?}, "min_level": "Error", "max_files": 0}}"#,
            log_dir
        ),
    )
    .unwrap();

    let config = LoggerConfig::from_json_file(&config_path).expect("Failed to load config");
    assert_eq!(config.max_files, 5);
    let logger = ChannelLogger::with_config(config).expect("Failed to create logger");

    logger.info("json", "filtered");
    logger.error("json", "kept");
    logger.close();

    let lines = read_lines(&log_dir.join("json.log"));
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("kept"));
}

#[test]
fn test_concurrent_producers_keep_own_order() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let logger =
        Arc::new(ChannelLogger::new(2000, temp_dir.path()).expect("Failed to create logger"));

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for i in 0..250 {
                    logger.info("shared", &format!("t{} n{}", t, i));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    logger.close();

    let lines = read_lines(&temp_dir.path().join("shared.log"));
    assert_eq!(lines.len(), 1000);
    for t in 0..4 {
        let prefix = format!("t{} n", t);
        let seq: Vec<usize> = lines
            .iter()
            .filter_map(|l| l.split(&prefix).nth(1))
            .map(|n| n.parse().unwrap())
            .collect();
        assert_eq!(seq, (0..250).collect::<Vec<_>>());
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_async_task_producers() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let logger =
        Arc::new(ChannelLogger::new(1000, temp_dir.path()).expect("Failed to create logger"));

    let mut tasks = Vec::new();
    for t in 0..4 {
        let logger = Arc::clone(&logger);
        tasks.push(tokio::spawn(async move {
            for i in 0..100 {
                logger.info(&format!("task{}", t), &format!("tick {}", i));
            }
        }));
    }
    for task in tasks {
        task.await.unwrap();
    }
    logger.close();

    for t in 0..4 {
        let lines = read_lines(&temp_dir.path().join(format!("task{}.log", t)));
        assert_eq!(lines.len(), 100);
    }
}

#[test]
fn test_handler_panic_does_not_stop_engine() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let calls = Arc::new(AtomicUsize::new(0));
    let calls_clone = Arc::clone(&calls);
    let handler: ErrorCallback = Arc::new(move |_err: &LoggerError| {
        calls_clone.fetch_add(1, Ordering::SeqCst);
        panic!("handler bug");
    });
    let blocker = temp_dir.path().join("file.txt");
    fs::write(&blocker, "x").unwrap();
    let config = LoggerConfig::new(10, blocker.join("logs")).with_error_handler(handler);
    let logger = ChannelLogger::with_config(config).expect("Failed to create logger");

    logger.info("a", "one");
    logger.info("b", "two");
    logger.close();

    // Directory failure plus one open failure per category
    assert_eq!(calls.load(Ordering::SeqCst), 3);
    assert_eq!(logger.metrics().total_written(), 2);
}
