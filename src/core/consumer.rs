//! Background consumer: the single writer of log output
//!
//! Waits on the record queue and the shutdown signal at the same time. Once
//! shutdown is signalled it drains whatever is already queued, flushes, and
//! hands the [`Router`] back to the thread that joins it.

use super::entry_pool::EntryPool;
use super::line_format::format_line;
use super::log_record::LogRecord;
use super::metrics::LoggerMetrics;
use super::timestamp::TimestampFormat;
use crate::router::Router;
use crossbeam_channel::{select, Receiver};
use std::sync::Arc;

pub struct Consumer {
    records: Receiver<LogRecord>,
    shutdown: Receiver<()>,
    router: Router,
    pool: Arc<EntryPool>,
    metrics: Arc<LoggerMetrics>,
    timestamp_format: TimestampFormat,
    line: String,
}

impl Consumer {
    pub fn new(
        records: Receiver<LogRecord>,
        shutdown: Receiver<()>,
        router: Router,
        pool: Arc<EntryPool>,
        metrics: Arc<LoggerMetrics>,
        timestamp_format: TimestampFormat,
    ) -> Self {
        Self {
            records,
            shutdown,
            router,
            pool,
            metrics,
            timestamp_format,
            line: String::with_capacity(256),
        }
    }

    /// Run until shutdown, then drain the queue and return the router
    pub fn run(mut self) -> Router {
        let records = self.records.clone();
        let shutdown = self.shutdown.clone();

        loop {
            select! {
                recv(records) -> msg => match msg {
                    Ok(record) => {
                        self.process(record);
                        if records.is_empty() {
                            self.router.flush_all();
                        }
                    }
                    // Every sender is gone
                    Err(_) => break,
                },
                // Dropping the sender is the signal
                recv(shutdown) -> _ => break,
            }
        }

        for record in records.try_iter() {
            self.process(record);
        }
        self.router.flush_all();
        self.router
    }

    fn process(&mut self, record: LogRecord) {
        if record.is_cancelled() {
            self.metrics.record_cancelled();
        } else {
            format_line(&record, &self.timestamp_format, &mut self.line);
            self.router.write(&record.category, &self.line);
            self.metrics.record_written();
        }
        self.pool.release(record);
    }
}
