//! Category façade, formatting macros, cancellation and the `log` bridge
//!
//! Run with: cargo run --example category_logging

use channel_logger::prelude::*;
use channel_logger::{error, info};
use std::env;
use std::sync::Arc;
use std::thread;

fn main() -> Result<()> {
    println!("=== Channel Logger - Category Logging Example ===\n");

    let dir = env::temp_dir().join("channel_logger_categories");
    let config = LoggerConfig::new(1000, &dir)
        .with_timestamp_format(TimestampFormat::Rfc3339)
        .with_error_handler(Arc::new(|err: &LoggerError| {
            eprintln!("logger reported: {}", err);
        }));
    let logger = Arc::new(ChannelLogger::with_config(config)?);

    println!("1. One façade per subsystem:");
    {
        let db = logger.category("database")?;
        let http = logger.category("http")?;
        info!(db, "pool ready with {} connections", 8);
        info!(http, "listening on port {}", 8080);
        http.error_with_fields("request failed", [("status", 503)]);
    }

    println!("\n2. Producers on several threads:");
    let handles: Vec<_> = (0..3)
        .map(|worker| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for job in 0..3 {
                    logger.info("workers", &format!("worker {} finished job {}", worker, job));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("worker thread panicked");
    }

    println!("\n3. Cancelled requests are not logged:");
    let request = CancellationToken::new();
    let jobs = logger.category("jobs")?;
    jobs.log_with_context(&request, "info", "request accepted");
    request.cancel();
    jobs.log_with_context(&request, "info", "request finished (skipped)");
    error!(jobs, "{} request(s) cancelled", 1);

    println!("\n4. Records from the `log` facade:");
    channel_logger::bridge::init(Arc::clone(&logger))?;
    log::info!(target: "legacy", "routed through the log crate");
    log::warn!(target: "legacy", "warnings map to ERROR");

    logger.close();
    println!("\nLog files written to {}", dir.display());
    Ok(())
}
