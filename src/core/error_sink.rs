//! Asynchronous channel for the engine's own operational errors
//!
//! With a user handler configured, errors travel over a bounded channel to a
//! dedicated thread that invokes the handler. Without one, or whenever the
//! channel cannot take an error, the error is written synchronously to
//! standard error so it is never lost silently.

use super::error::{panic_message, LoggerError};
use super::metrics::LoggerMetrics;
use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use parking_lot::{Mutex, RwLock};
use std::io::Write;
use std::sync::Arc;
use std::thread;

/// Callback invoked for every internal error
pub type ErrorCallback = Arc<dyn Fn(&LoggerError) + Send + Sync>;

pub struct ErrorSink {
    sender: RwLock<Option<Sender<LoggerError>>>,
    handler: Option<ErrorCallback>,
    worker: Mutex<Option<thread::JoinHandle<()>>>,
    metrics: Arc<LoggerMetrics>,
}

impl ErrorSink {
    /// Create the sink, spawning the drain thread when a handler is present
    pub fn new(
        handler: Option<ErrorCallback>,
        capacity: usize,
        metrics: Arc<LoggerMetrics>,
    ) -> std::io::Result<Self> {
        let (sender, worker) = match handler {
            Some(ref callback) => {
                let (sender, receiver) = bounded(capacity.max(1));
                let callback = Arc::clone(callback);
                let handle = thread::Builder::new()
                    .name("channel-logger-errors".to_string())
                    .spawn(move || Self::run(receiver, callback))?;
                (Some(sender), Some(handle))
            }
            None => (None, None),
        };

        Ok(Self {
            sender: RwLock::new(sender),
            handler,
            worker: Mutex::new(worker),
            metrics,
        })
    }

    fn run(receiver: Receiver<LoggerError>, callback: ErrorCallback) {
        // Ends once every sender is gone and the channel is empty
        for error in receiver.iter() {
            Self::invoke(&callback, &error);
        }
    }

    /// Call the handler with panic isolation
    fn invoke(callback: &ErrorCallback, error: &LoggerError) {
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| callback(error)));
        if let Err(payload) = result {
            write_stderr(
                "[LOGGER CRITICAL]",
                &format!(
                    "Error handler panicked: {} (while handling: {})",
                    panic_message(payload.as_ref()),
                    error
                ),
            );
        }
    }

    /// Report an error without blocking the caller
    pub fn report(&self, error: LoggerError) {
        self.metrics.record_error();

        let error = {
            let guard = self.sender.read();
            match guard.as_ref() {
                Some(sender) => {
                    if let Err(TrySendError::Full(error) | TrySendError::Disconnected(error)) =
                        sender.try_send(error)
                    {
                        write_stderr("[LOGGER ERROR]", &error.to_string());
                    }
                    return;
                }
                None => error,
            }
        };

        match self.handler {
            // Drain thread already stopped: deliver in the caller's thread
            Some(ref callback) => Self::invoke(callback, &error),
            None => write_stderr("[LOGGER ERROR]", &error.to_string()),
        }
    }

    /// True when errors are delivered to a user handler
    pub fn has_handler(&self) -> bool {
        self.handler.is_some()
    }

    /// Close the channel and wait for the drain thread to empty it
    ///
    /// Errors reported afterwards go straight to the handler (or stderr).
    pub fn shutdown(&self) {
        drop(self.sender.write().take());

        if let Some(handle) = self.worker.lock().take() {
            if let Err(payload) = handle.join() {
                write_stderr(
                    "[LOGGER CRITICAL]",
                    &format!(
                        "Error sink thread panicked: {}",
                        panic_message(payload.as_ref())
                    ),
                );
            }
        }
    }
}

impl Drop for ErrorSink {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Synchronous fallback path to standard error
fn write_stderr(prefix: &str, message: &str) {
    #[cfg(feature = "color")]
    let prefix = {
        use colored::Colorize;
        prefix.red().bold().to_string()
    };

    let mut stderr = std::io::stderr().lock();
    let _ = writeln!(stderr, "{} {}", prefix, message);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting_sink(capacity: usize) -> (ErrorSink, Arc<AtomicUsize>) {
        let count = Arc::new(AtomicUsize::new(0));
        let count_clone = Arc::clone(&count);
        let handler: ErrorCallback = Arc::new(move |_err: &LoggerError| {
            count_clone.fetch_add(1, Ordering::SeqCst);
        });
        let sink = ErrorSink::new(Some(handler), capacity, Arc::new(LoggerMetrics::new()))
            .expect("spawn error sink");
        (sink, count)
    }

    #[test]
    fn test_handler_receives_errors_after_shutdown_drain() {
        let (sink, count) = counting_sink(16);
        for _ in 0..5 {
            sink.report(LoggerError::queue_full("svc", 1));
        }
        sink.shutdown();
        assert_eq!(count.load(Ordering::SeqCst), 5);
    }

    #[test]
    fn test_report_after_shutdown_invokes_handler_directly() {
        let (sink, count) = counting_sink(4);
        sink.shutdown();
        sink.report(LoggerError::EngineClosed);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_without_handler_falls_back_to_stderr() {
        let metrics = Arc::new(LoggerMetrics::new());
        let sink = ErrorSink::new(None, 4, Arc::clone(&metrics)).expect("create sink");
        assert!(!sink.has_handler());
        sink.report(LoggerError::queue_full("svc", 1));
        assert_eq!(metrics.errors_reported(), 1);
    }

    #[test]
    fn test_panicking_handler_is_isolated() {
        let handler: ErrorCallback = Arc::new(|_err: &LoggerError| panic!("handler failure"));
        let sink = ErrorSink::new(Some(handler), 4, Arc::new(LoggerMetrics::new()))
            .expect("spawn error sink");
        sink.report(LoggerError::EngineClosed);
        sink.report(LoggerError::EngineClosed);
        // Drain thread survives the panics and joins cleanly
        sink.shutdown();
    }

    #[test]
    fn test_shutdown_is_idempotent() {
        let (sink, _count) = counting_sink(4);
        sink.shutdown();
        sink.shutdown();
    }
}
