//! Basic engine usage
//!
//! Demonstrates construction, the three levels, runtime level changes and
//! structured fields. Every line goes to stdout and to `<dir>/<category>.log`.
//!
//! Run with: cargo run --example basic_usage

use channel_logger::prelude::*;
use std::env;

fn main() -> Result<()> {
    println!("=== Channel Logger - Basic Usage Example ===\n");

    let dir = env::temp_dir().join("channel_logger_basic");
    let logger = ChannelLogger::new(100, &dir)?;

    println!("1. Logging at different levels:");
    logger.debug("app", "This is a debug message");
    logger.info("app", "This is an info message");
    logger.error("app", "This is an error message");

    println!("\n2. Level names are case-insensitive:");
    logger.log("app", "Error", "Logged via a level name");
    logger.log("app", "warning", "Unknown names are logged as INFO");

    println!("\n3. Raising the minimum level to ERROR:");
    logger.set_min_level(LogLevel::Error);
    logger.info("app", "Info message (hidden)");
    logger.error("app", "Error message (visible)");
    logger.set_min_level(LogLevel::Debug);

    println!("\n4. Structured fields:");
    logger.log_with_fields(
        "app",
        LogLevel::Info,
        "user logged in",
        [
            ("user_id", FieldValue::from(12345)),
            ("ip", FieldValue::from("192.168.1.1")),
        ],
    );

    logger.close();

    let metrics = logger.metrics();
    println!(
        "\nWritten: {}, filtered: {}, dropped: {}",
        metrics.total_written(),
        metrics.filtered_count(),
        metrics.dropped_count()
    );
    println!("Log file: {}", dir.join("app.log").display());
    println!("\n=== Example completed successfully! ===");
    Ok(())
}
