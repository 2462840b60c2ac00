//! Category-bound façade over [`ChannelLogger`]

use super::fields::FieldValue;
use super::log_level::LogLevel;
use super::logger::ChannelLogger;
use tokio_util::sync::CancellationToken;

/// Handle that fixes the category of every call
///
/// Obtained from [`ChannelLogger::category`]. It only forwards; all
/// filtering, queueing and shutdown behaviour belongs to the engine.
///
/// ```no_run
/// use channel_logger::ChannelLogger;
///
/// let logger = ChannelLogger::new(100, "/tmp/app-logs").unwrap();
/// let db = logger.category("database").unwrap();
/// db.info("connected");
/// db.error_with_fields("query failed", [("table", "users")]);
/// ```
#[derive(Clone)]
pub struct CategoryLogger<'a> {
    engine: &'a ChannelLogger,
    category: String,
}

impl<'a> CategoryLogger<'a> {
    pub(crate) fn new(engine: &'a ChannelLogger, category: &str) -> Self {
        Self {
            engine,
            category: category.to_string(),
        }
    }

    /// Category name as given by the caller (before sanitizing)
    pub fn name(&self) -> &str {
        &self.category
    }

    pub fn engine(&self) -> &'a ChannelLogger {
        self.engine
    }

    pub fn log(&self, level: &str, message: &str) {
        self.engine.log(&self.category, level, message);
    }

    pub fn log_level(&self, level: LogLevel, message: &str) {
        self.engine.log_level(&self.category, level, message);
    }

    pub fn log_with_fields<I, K, V>(&self, level: LogLevel, message: &str, fields: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.engine
            .log_with_fields(&self.category, level, message, fields);
    }

    pub fn log_with_context(&self, token: &CancellationToken, level: &str, message: &str) {
        self.engine
            .log_with_context(token, &self.category, level, message);
    }

    pub fn debug(&self, message: &str) {
        self.log_level(LogLevel::Debug, message);
    }

    pub fn info(&self, message: &str) {
        self.log_level(LogLevel::Info, message);
    }

    pub fn error(&self, message: &str) {
        self.log_level(LogLevel::Error, message);
    }

    pub fn debug_with_fields<I, K, V>(&self, message: &str, fields: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.log_with_fields(LogLevel::Debug, message, fields);
    }

    pub fn info_with_fields<I, K, V>(&self, message: &str, fields: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.log_with_fields(LogLevel::Info, message, fields);
    }

    pub fn error_with_fields<I, K, V>(&self, message: &str, fields: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.log_with_fields(LogLevel::Error, message, fields);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_facade_forwards_to_its_category() {
        let dir = tempdir().unwrap();
        let logger = ChannelLogger::new(10, dir.path()).unwrap();
        {
            let db = logger.category("db").unwrap();
            db.debug("d");
            db.info_with_fields("connected", [("pool", 4)]);
            db.log("ERROR", "lost");
        }
        logger.close();

        let content = fs::read_to_string(dir.path().join("db.log")).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("DEBUG: d"));
        assert!(lines[1].ends_with("INFO: connected | pool=4"));
        assert!(lines[2].contains("ERROR: lost"));
    }

    #[test]
    fn test_facade_context_cancellation() {
        let dir = tempdir().unwrap();
        let logger = ChannelLogger::new(10, dir.path()).unwrap();
        let token = CancellationToken::new();
        token.cancel();
        {
            let api = logger.category("api").unwrap();
            api.log_with_context(&token, "info", "dropped");
            api.log_with_context(&CancellationToken::new(), "info", "kept");
        }
        logger.close();

        let content = fs::read_to_string(dir.path().join("api.log")).unwrap();
        assert!(!content.contains("dropped"));
        assert!(content.contains("kept"));
    }
}
