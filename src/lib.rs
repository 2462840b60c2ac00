//! # Channel Logger
//!
//! An in-process asynchronous logging engine. Call sites hand records to a
//! bounded queue and return immediately; one background thread formats each
//! record and writes it to standard output and to a per-category file with
//! size-based rotation.
//!
//! ## Features
//!
//! - **Non-blocking ingestion**: records are dropped, never buffered without
//!   bound, when the queue is full
//! - **Per-category files**: `<base_dir>/<category>.log` with numbered backups
//! - **Structured fields** rendered as `k=v` pairs
//! - **Per-record cancellation** via `CancellationToken`
//! - **Error sink**: operational errors go to a user callback or stderr
//! - **`log` bridge** (feature `log-bridge`)
//!
//! ```no_run
//! use channel_logger::prelude::*;
//!
//! let logger = ChannelLogger::new(100, "/tmp/app-logs")?;
//! logger.info("svc", "started");
//!
//! let db = logger.category("database")?;
//! channel_logger::info!(db, "pool ready with {} connections", 8);
//!
//! logger.close();
//! # Ok::<(), channel_logger::LoggerError>(())
//! ```

#[cfg(feature = "log-bridge")]
pub mod bridge;
pub mod core;
pub mod macros;
pub mod router;

pub mod prelude {
    pub use crate::core::{
        CategoryLogger, ChannelLogger, ErrorCallback, FieldValue, LogFields, LogLevel,
        LoggerConfig, LoggerError, LoggerMetrics, Result, TimestampFormat,
    };
    pub use tokio_util::sync::CancellationToken;
}

pub use crate::core::{
    CategoryLogger, ChannelLogger, EntryPool, ErrorCallback, FieldValue, LogFields, LogLevel,
    LogRecord, LoggerConfig, LoggerError, LoggerMetrics, OverflowPolicy, Result,
    TimestampFormat, DEFAULT_TIMESTAMP_PATTERN,
};
pub use crate::router::sanitize_category;
pub use tokio_util::sync::CancellationToken;
