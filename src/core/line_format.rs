//! Text line format for log records
//!
//! `[<timestamp>] <LEVEL>: <message>` optionally followed by
//! ` | k1=v1, k2=v2, ...`, terminated by a newline.

use super::fields::write_fields;
use super::log_record::LogRecord;
use super::timestamp::TimestampFormat;

/// Render `record` into `out`, replacing its previous contents
pub fn format_line(record: &LogRecord, timestamp_format: &TimestampFormat, out: &mut String) {
    out.clear();
    out.push('[');
    timestamp_format.write_to(&record.timestamp, out);
    out.push_str("] ");
    out.push_str(record.level.to_str());
    out.push_str(": ");
    out.push_str(&record.message);

    if !record.fields.is_empty() {
        out.push_str(" | ");
        write_fields(&record.fields, out);
    }
    out.push('\n');
}
