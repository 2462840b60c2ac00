//! Engine internals: records, queueing, consumer and shutdown

pub mod category_logger;
pub mod config;
pub mod consumer;
pub mod entry_pool;
pub mod error;
pub mod error_sink;
pub mod fields;
pub mod line_format;
pub mod log_level;
pub mod log_record;
pub mod logger;
pub mod metrics;
pub mod overflow_policy;
pub mod timestamp;

pub use category_logger::CategoryLogger;
pub use config::LoggerConfig;
pub use entry_pool::EntryPool;
pub use error::{LoggerError, Result};
pub use error_sink::ErrorCallback;
pub use fields::{FieldValue, LogFields};
pub use line_format::format_line;
pub use log_level::LogLevel;
pub use log_record::LogRecord;
pub use logger::ChannelLogger;
pub use metrics::LoggerMetrics;
pub use overflow_policy::OverflowPolicy;
pub use timestamp::{TimestampFormat, DEFAULT_TIMESTAMP_PATTERN};
