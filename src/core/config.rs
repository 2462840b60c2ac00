//! Engine configuration
//!
//! `LoggerConfig` is built in code with the `with_*` methods or loaded from
//! JSON. Capacity and directory are fixed once the engine is constructed;
//! only the minimum level can change afterwards.

use super::error::{LoggerError, Result};
use super::error_sink::ErrorCallback;
use super::log_level::LogLevel;
use super::timestamp::TimestampFormat;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

pub const DEFAULT_QUEUE_CAPACITY: usize = 100;
pub const DEFAULT_FILE_MODE: u32 = 0o644;
pub const DEFAULT_DIR_MODE: u32 = 0o755;
pub const DEFAULT_MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;
pub const DEFAULT_MAX_FILES: usize = 5;
pub const DEFAULT_ERROR_QUEUE_CAPACITY: usize = 100;

/// Configuration for a [`ChannelLogger`](super::logger::ChannelLogger)
///
/// # Examples
///
/// ```
/// use channel_logger::{LogLevel, LoggerConfig};
///
/// let config = LoggerConfig::new(200, "./logs")
///     .with_min_level(LogLevel::Info)
///     .with_max_file_size(10 * 1024 * 1024)
///     .with_max_files(3);
///
/// assert_eq!(config.queue_capacity, 200);
/// ```
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Capacity of the bounded record queue (must be > 0)
    pub queue_capacity: usize,
    /// Directory for category files; created on construction if non-empty
    pub base_dir: PathBuf,
    pub timestamp_format: TimestampFormat,
    /// Initial minimum level
    pub min_level: LogLevel,
    /// Permission bits for category files (unix only)
    pub file_mode: u32,
    /// Permission bits for the base directory (unix only)
    pub dir_mode: u32,
    /// Size in bytes at which a category file is rotated
    pub max_file_size: u64,
    /// Files retained per category, the active file included
    pub max_files: usize,
    /// Capacity of the asynchronous error channel
    pub error_queue_capacity: usize,
    #[serde(skip)]
    pub error_handler: Option<ErrorCallback>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            base_dir: PathBuf::new(),
            timestamp_format: TimestampFormat::default(),
            min_level: LogLevel::Debug,
            file_mode: DEFAULT_FILE_MODE,
            dir_mode: DEFAULT_DIR_MODE,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            max_files: DEFAULT_MAX_FILES,
            error_queue_capacity: DEFAULT_ERROR_QUEUE_CAPACITY,
            error_handler: None,
        }
    }
}

impl fmt::Debug for LoggerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerConfig")
            .field("queue_capacity", &self.queue_capacity)
            .field("base_dir", &self.base_dir)
            .field("timestamp_format", &self.timestamp_format)
            .field("min_level", &self.min_level)
            .field("file_mode", &format_args!("{:o}", self.file_mode))
            .field("dir_mode", &format_args!("{:o}", self.dir_mode))
            .field("max_file_size", &self.max_file_size)
            .field("max_files", &self.max_files)
            .field("error_queue_capacity", &self.error_queue_capacity)
            .field("error_handler", &self.error_handler.is_some())
            .finish()
    }
}

impl LoggerConfig {
    /// Default configuration with the given queue capacity and directory
    #[must_use]
    pub fn new(queue_capacity: usize, base_dir: impl Into<PathBuf>) -> Self {
        Self {
            queue_capacity,
            base_dir: base_dir.into(),
            ..Self::default()
        }
    }

    /// Parse a configuration from a JSON document
    ///
    /// Missing keys take their default values.
    ///
    /// ```
    /// use channel_logger::{LogLevel, LoggerConfig};
    ///
    /// let config = LoggerConfig::from_json_str(
    ///     r#"{"queue_capacity": 50, "base_dir": "/tmp/logs", "min_level": "Error"}"#,
    /// ).unwrap();
    /// assert_eq!(config.queue_capacity, 50);
    /// assert_eq!(config.min_level, LogLevel::Error);
    /// assert_eq!(config.max_files, 5);
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self> {
        let mut config: LoggerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON configuration file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Validate the configuration, repairing values that have a safe default
    ///
    /// A zero queue capacity or an empty/unparsable timestamp format is an
    /// error. Zero size, file count, permission modes or error queue
    /// capacity are reset to their defaults.
    pub fn validate(&mut self) -> Result<()> {
        if self.queue_capacity == 0 {
            return Err(LoggerError::config(
                "queue_capacity",
                "queue capacity must be greater than zero",
            ));
        }
        self.timestamp_format
            .validate()
            .map_err(|message| LoggerError::config("timestamp_format", message))?;

        if self.max_file_size == 0 {
            self.max_file_size = DEFAULT_MAX_FILE_SIZE;
        }
        if self.max_files == 0 {
            self.max_files = DEFAULT_MAX_FILES;
        }
        if self.file_mode == 0 {
            self.file_mode = DEFAULT_FILE_MODE;
        }
        if self.dir_mode == 0 {
            self.dir_mode = DEFAULT_DIR_MODE;
        }
        if self.error_queue_capacity == 0 {
            self.error_queue_capacity = DEFAULT_ERROR_QUEUE_CAPACITY;
        }
        Ok(())
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = dir.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    /// Set a custom timestamp format using a strftime-compatible format string
    #[must_use = "builder methods return a new value"]
    pub fn with_custom_timestamp(mut self, pattern: &str) -> Self {
        self.timestamp_format = TimestampFormat::Custom(pattern.to_string());
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_file_mode(mut self, mode: u32) -> Self {
        self.file_mode = mode;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_dir_mode(mut self, mode: u32) -> Self {
        self.dir_mode = mode;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_max_file_size(mut self, bytes: u64) -> Self {
        self.max_file_size = bytes;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_max_files(mut self, count: usize) -> Self {
        self.max_files = count;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_error_queue_capacity(mut self, capacity: usize) -> Self {
        self.error_queue_capacity = capacity;
        self
    }

    /// Set the callback receiving internal operational errors
    ///
    /// ```
    /// use channel_logger::{LoggerConfig, LoggerError};
    /// use std::sync::Arc;
    ///
    /// let config = LoggerConfig::default().with_error_handler(Arc::new(|err: &LoggerError| {
    ///     eprintln!("logger problem: {}", err);
    /// }));
    /// assert!(config.error_handler.is_some());
    /// ```
    #[must_use = "builder methods return a new value"]
    pub fn with_error_handler(mut self, handler: ErrorCallback) -> Self {
        self.error_handler = Some(handler);
        self
    }
}
