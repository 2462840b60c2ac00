//! Log record structure

use super::fields::{FieldValue, LogFields};
use super::log_level::LogLevel;
use chrono::{DateTime, Local};
use tokio_util::sync::CancellationToken;

/// One structured log entry travelling from a producer to the consumer
///
/// Records are handed out by [`EntryPool`](super::entry_pool::EntryPool) and
/// filled in by the producer; once enqueued they are only read.
#[derive(Debug, Clone)]
pub struct LogRecord {
    pub category: String,
    pub level: LogLevel,
    pub message: String,
    pub fields: LogFields,
    pub timestamp: DateTime<Local>,
    pub cancel: Option<CancellationToken>,
}

impl LogRecord {
    pub fn new() -> Self {
        Self {
            category: String::new(),
            level: LogLevel::Info,
            message: String::new(),
            fields: LogFields::new(),
            timestamp: Local::now(),
            cancel: None,
        }
    }

    /// Fill the record in place, reusing its string buffers
    ///
    /// Newlines, carriage returns and tabs in the message are escaped so a
    /// caller cannot forge extra log lines.
    pub fn fill(&mut self, category: &str, level: LogLevel, message: &str) {
        self.category.push_str(category);
        self.level = level;
        self.timestamp = Local::now();
        for ch in message.chars() {
            match ch {
                '\n' => self.message.push_str("\\n"),
                '\r' => self.message.push_str("\\r"),
                '\t' => self.message.push_str("\\t"),
                c => self.message.push(c),
            }
        }
    }

    /// Copy caller-supplied fields into the record's own map
    pub fn extend_fields<I, K, V>(&mut self, fields: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.fields
            .extend(fields.into_iter().map(|(k, v)| (k.into(), v.into())));
    }

    /// True when the record carries a token that has been signalled
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(CancellationToken::is_cancelled)
    }

    /// Return every field to its acquire-time state, keeping allocations
    pub fn reset(&mut self) {
        self.category.clear();
        self.level = LogLevel::Info;
        self.message.clear();
        self.fields.clear();
        self.cancel = None;
    }
}

impl Default for LogRecord {
    fn default() -> Self {
        Self::new()
    }
}
