//! Formatting macros over [`CategoryLogger`](crate::CategoryLogger)
//!
//! ```no_run
//! use channel_logger::{info, ChannelLogger};
//!
//! let logger = ChannelLogger::new(100, "/tmp/app-logs").unwrap();
//! let http = logger.category("http").unwrap();
//!
//! let port = 8080;
//! info!(http, "listening on port {}", port);
//! ```

/// Log a formatted message at an explicit level.
///
/// ```no_run
/// # use channel_logger::prelude::*;
/// # let logger = ChannelLogger::new(10, "/tmp/app-logs").unwrap();
/// # let cat = logger.category("svc").unwrap();
/// use channel_logger::log;
/// log!(cat, LogLevel::Error, "exit code {}", 3);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log_level($level, &format!($($arg)+))
    };
}

#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}
