//! Bridge from the `log` facade into a [`ChannelLogger`]
//!
//! The record target becomes the category. `log` has five levels and the
//! engine three, so TRACE folds into DEBUG and WARN into ERROR.

use crate::core::{ChannelLogger, LogLevel, LoggerError, Result};
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::sync::Arc;

pub struct LogBridge {
    engine: Arc<ChannelLogger>,
}

impl LogBridge {
    pub fn new(engine: Arc<ChannelLogger>) -> Self {
        Self { engine }
    }

    /// Engine level for a `log` level
    pub fn map_level(level: Level) -> LogLevel {
        match level {
            Level::Trace | Level::Debug => LogLevel::Debug,
            Level::Info => LogLevel::Info,
            Level::Warn | Level::Error => LogLevel::Error,
        }
    }
}

impl Log for LogBridge {
    fn enabled(&self, metadata: &Metadata) -> bool {
        !self.engine.is_closed() && Self::map_level(metadata.level()) >= self.engine.min_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let category = if record.target().is_empty() {
            record.module_path().unwrap_or_default()
        } else {
            record.target()
        };

        match record.args().as_str() {
            Some(message) => self
                .engine
                .log_level(category, Self::map_level(record.level()), message),
            None => self.engine.log_level(
                category,
                Self::map_level(record.level()),
                &record.args().to_string(),
            ),
        }
    }

    // The consumer flushes whenever the queue runs empty
    fn flush(&self) {}
}

/// Install `engine` as the global `log` logger
///
/// Fails if a global logger is already set. The engine's own minimum level
/// keeps applying, so `log::max_level` is opened fully.
pub fn init(engine: Arc<ChannelLogger>) -> Result<()> {
    log::set_boxed_logger(Box::new(LogBridge::new(engine)))
        .map_err(|e| LoggerError::config("log_bridge", e.to_string()))?;
    log::set_max_level(LevelFilter::Trace);
    Ok(())
}
