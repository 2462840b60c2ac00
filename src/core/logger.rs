//! Main engine: ingestion, bounded queue and shutdown

use super::{
    category_logger::CategoryLogger,
    config::LoggerConfig,
    consumer::Consumer,
    entry_pool::EntryPool,
    error::{LoggerError, Result},
    error_sink::ErrorSink,
    fields::FieldValue,
    log_level::{AtomicLogLevel, LogLevel},
    log_record::LogRecord,
    metrics::LoggerMetrics,
    overflow_policy::OverflowPolicy,
};
use crate::router::{writer, Router};
use crossbeam_channel::{bounded, SendTimeoutError, Sender, TrySendError};
use parking_lot::{Mutex, RwLock};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use tokio_util::sync::CancellationToken;

/// Why a record did not make it into the queue
enum Rejected {
    Full(LogRecord),
    Closed(LogRecord),
}

/// Asynchronous per-category logging engine
///
/// Producers on any thread fill pooled records and push them onto a bounded
/// queue; a single background thread formats them and writes each line to
/// standard output and to `<base_dir>/<category>.log`.
///
/// # Example
///
/// ```no_run
/// use channel_logger::ChannelLogger;
///
/// let logger = ChannelLogger::new(100, "/tmp/app-logs").unwrap();
/// logger.info("svc", "started");
/// logger.error("svc", "boom");
/// logger.close();
/// ```
pub struct ChannelLogger {
    sender: RwLock<Option<Sender<LogRecord>>>,
    shutdown: Mutex<Option<Sender<()>>>,
    consumer: Mutex<Option<thread::JoinHandle<Router>>>,
    closed: AtomicBool,
    min_level: AtomicLogLevel,
    capacity: usize,
    overflow_policy: OverflowPolicy,
    base_dir: PathBuf,
    pool: Arc<EntryPool>,
    errors: Arc<ErrorSink>,
    metrics: Arc<LoggerMetrics>,
}

impl ChannelLogger {
    /// Engine with default settings, a queue of `capacity` and files under `base_dir`
    pub fn new(capacity: usize, base_dir: impl Into<PathBuf>) -> Result<Self> {
        Self::with_config(LoggerConfig::new(capacity, base_dir))
    }

    /// Validate `config`, create the base directory and start the consumer
    ///
    /// Only an invalid configuration (or failing to spawn a thread) is
    /// fatal. A base directory that cannot be created is reported through
    /// the error sink and the engine starts anyway.
    pub fn with_config(mut config: LoggerConfig) -> Result<Self> {
        config.validate()?;

        let metrics = Arc::new(LoggerMetrics::new());
        let errors = Arc::new(ErrorSink::new(
            config.error_handler.clone(),
            config.error_queue_capacity,
            Arc::clone(&metrics),
        )?);

        if !config.base_dir.as_os_str().is_empty() {
            if let Err(e) = writer::create_dir_all(&config.base_dir, config.dir_mode) {
                errors.report(LoggerError::directory_create(&config.base_dir, e));
            }
        }

        let (record_tx, record_rx) = bounded(config.queue_capacity);
        let (shutdown_tx, shutdown_rx) = bounded(0);
        let pool = Arc::new(EntryPool::new(config.queue_capacity));
        let router = Router::new(&config, Arc::clone(&errors), Arc::clone(&metrics));

        let consumer = Consumer::new(
            record_rx,
            shutdown_rx,
            router,
            Arc::clone(&pool),
            Arc::clone(&metrics),
            config.timestamp_format.clone(),
        );
        let handle = thread::Builder::new()
            .name("channel-logger-consumer".to_string())
            .spawn(move || consumer.run())?;

        Ok(Self {
            sender: RwLock::new(Some(record_tx)),
            shutdown: Mutex::new(Some(shutdown_tx)),
            consumer: Mutex::new(Some(handle)),
            closed: AtomicBool::new(false),
            min_level: AtomicLogLevel::new(config.min_level),
            capacity: config.queue_capacity,
            overflow_policy: OverflowPolicy::for_capacity(config.queue_capacity),
            base_dir: config.base_dir,
            pool,
            errors,
            metrics,
        })
    }

    /// Log with a level name (`"debug"`, `"INFO"`, ...); unknown names map to INFO
    pub fn log(&self, category: &str, level: &str, message: &str) {
        self.log_level(category, LogLevel::parse_lenient(level), message);
    }

    pub fn log_level(&self, category: &str, level: LogLevel, message: &str) {
        self.submit(None, category, level, message, no_fields());
    }

    /// Log with structured fields, copied into the record
    ///
    /// ```no_run
    /// use channel_logger::{ChannelLogger, FieldValue, LogLevel};
    ///
    /// let logger = ChannelLogger::new(100, "/tmp/app-logs").unwrap();
    /// logger.log_with_fields(
    ///     "http",
    ///     LogLevel::Info,
    ///     "request served",
    ///     [("status", FieldValue::from(200)), ("path", FieldValue::from("/health"))],
    /// );
    /// ```
    pub fn log_with_fields<I, K, V>(&self, category: &str, level: LogLevel, message: &str, fields: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.submit(None, category, level, message, fields);
    }

    /// Log unless `token` is signalled, either now or before the record is written
    pub fn log_with_context(
        &self,
        token: &CancellationToken,
        category: &str,
        level: &str,
        message: &str,
    ) {
        self.submit(
            Some(token),
            category,
            LogLevel::parse_lenient(level),
            message,
            no_fields(),
        );
    }

    pub fn debug(&self, category: &str, message: &str) {
        self.log_level(category, LogLevel::Debug, message);
    }

    pub fn info(&self, category: &str, message: &str) {
        self.log_level(category, LogLevel::Info, message);
    }

    pub fn error(&self, category: &str, message: &str) {
        self.log_level(category, LogLevel::Error, message);
    }

    fn submit<I, K, V>(
        &self,
        token: Option<&CancellationToken>,
        category: &str,
        level: LogLevel,
        message: &str,
        fields: I,
    ) where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<FieldValue>,
    {
        if self.is_closed() {
            return;
        }
        if level < self.min_level.load() {
            self.metrics.record_filtered();
            return;
        }
        if token.is_some_and(CancellationToken::is_cancelled) {
            self.metrics.record_cancelled();
            return;
        }

        let mut record = self.pool.acquire();
        record.fill(category, level, message);
        record.extend_fields(fields);
        record.cancel = token.cloned();
        self.enqueue(record);
    }

    fn enqueue(&self, record: LogRecord) {
        let outcome = match self.sender.read().as_ref() {
            Some(sender) => self.send(sender, record),
            None => Err(Rejected::Closed(record)),
        };

        match outcome {
            Ok(()) => {
                self.metrics.record_enqueued();
            }
            Err(Rejected::Full(record)) => {
                self.metrics.record_dropped();
                self.errors
                    .report(LoggerError::queue_full(record.category.as_str(), self.capacity));
                self.pool.release(record);
            }
            Err(Rejected::Closed(record)) => self.pool.release(record),
        }
    }

    /// Non-blocking attempt first; large queues then get a short grace period
    fn send(&self, sender: &Sender<LogRecord>, record: LogRecord) -> std::result::Result<(), Rejected> {
        let record = match sender.try_send(record) {
            Ok(()) => return Ok(()),
            Err(TrySendError::Full(record)) => record,
            Err(TrySendError::Disconnected(record)) => return Err(Rejected::Closed(record)),
        };

        match self.overflow_policy.grace_period() {
            None => Err(Rejected::Full(record)),
            Some(grace) => match sender.send_timeout(record, grace) {
                Ok(()) => Ok(()),
                Err(SendTimeoutError::Timeout(record)) => Err(Rejected::Full(record)),
                Err(SendTimeoutError::Disconnected(record)) => Err(Rejected::Closed(record)),
            },
        }
    }

    /// Change the minimum level; takes effect for subsequent calls
    pub fn set_min_level(&self, level: LogLevel) {
        self.min_level.store(level);
    }

    pub fn min_level(&self) -> LogLevel {
        self.min_level.load()
    }

    /// Façade bound to one category
    ///
    /// Fails with `InvalidConfiguration` for an empty name and with
    /// `EngineClosed` once the engine has been closed.
    pub fn category(&self, name: &str) -> Result<CategoryLogger<'_>> {
        if name.is_empty() {
            return Err(LoggerError::config(
                "category",
                "category name must not be empty",
            ));
        }
        if self.is_closed() {
            return Err(LoggerError::EngineClosed);
        }
        Ok(CategoryLogger::new(self, name))
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    pub fn queue_capacity(&self) -> usize {
        self.capacity
    }

    pub fn overflow_policy(&self) -> OverflowPolicy {
        self.overflow_policy
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    #[inline]
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Stop accepting records, drain the queue and close every file
    ///
    /// Only the first call does any work; later calls return immediately.
    /// Once this returns, ingestion calls are no-ops that perform no I/O.
    pub fn close(&self) {
        if self
            .closed
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return;
        }

        // Waits for in-flight producers holding the read lock
        drop(self.sender.write().take());
        drop(self.shutdown.lock().take());

        let router = match self.consumer.lock().take() {
            Some(handle) => match handle.join() {
                Ok(router) => Some(router),
                Err(payload) => {
                    self.errors
                        .report(LoggerError::worker_panicked("consumer", payload.as_ref()));
                    None
                }
            },
            None => None,
        };

        self.errors.shutdown();

        if let Some(mut router) = router {
            for error in router.close_all() {
                self.errors.report(error);
            }
        }
    }
}

impl Drop for ChannelLogger {
    fn drop(&mut self) {
        self.close();
    }
}

fn no_fields() -> std::iter::Empty<(String, FieldValue)> {
    std::iter::empty()
}
