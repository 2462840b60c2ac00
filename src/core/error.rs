//! Error types for the logger system

use std::path::Path;

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Base log directory could not be created
    #[error("Failed to create log directory '{path}': {source}")]
    DirectoryCreateFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Per-category log file could not be opened
    #[error("Failed to open log file '{path}': {source}")]
    FileOpenFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A rename or remove during rotation failed
    #[error("File rotation failed for '{path}': {message}")]
    RotationFailed { path: String, message: String },

    /// Flushing or syncing a log file at shutdown failed
    #[error("Failed to close log file '{path}': {source}")]
    FileCloseFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Writing a formatted line to a category file failed
    #[error("Failed to write log file '{path}': {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Bounded queue rejected a record
    #[error("Log queue full (capacity {capacity}), dropped record for category '{category}'")]
    QueueFull { category: String, capacity: usize },

    /// Operation issued after `close()`
    #[error("Logger already closed")]
    EngineClosed,

    /// A background thread panicked
    #[error("{worker} thread panicked: {message}")]
    WorkerPanicked { worker: String, message: String },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl LoggerError {
    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    pub fn directory_create(path: &Path, source: std::io::Error) -> Self {
        LoggerError::DirectoryCreateFailed {
            path: path.display().to_string(),
            source,
        }
    }

    pub fn file_open(path: &Path, source: std::io::Error) -> Self {
        LoggerError::FileOpenFailed {
            path: path.display().to_string(),
            source,
        }
    }

    /// Create a file rotation error
    pub fn rotation(path: &Path, message: impl Into<String>) -> Self {
        LoggerError::RotationFailed {
            path: path.display().to_string(),
            message: message.into(),
        }
    }

    pub fn file_close(path: &Path, source: std::io::Error) -> Self {
        LoggerError::FileCloseFailed {
            path: path.display().to_string(),
            source,
        }
    }

    pub fn write_failed(path: &Path, source: std::io::Error) -> Self {
        LoggerError::WriteFailed {
            path: path.display().to_string(),
            source,
        }
    }

    /// Create a queue full error for a dropped record
    pub fn queue_full(category: impl Into<String>, capacity: usize) -> Self {
        LoggerError::QueueFull {
            category: category.into(),
            capacity,
        }
    }

    /// Create a worker panic error from a `catch_unwind`/`join` payload
    pub fn worker_panicked(worker: impl Into<String>, payload: &(dyn std::any::Any + Send)) -> Self {
        LoggerError::WorkerPanicked {
            worker: worker.into(),
            message: panic_message(payload),
        }
    }
}

/// Extract a readable message from a panic payload
pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}
