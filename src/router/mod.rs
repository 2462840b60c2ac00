//! Per-category file routing with size-based rotation
//!
//! The [`Router`] maps sanitized category names to an open writer set and a
//! byte counter. It is owned by the consumer thread, which is the only
//! writer of log output, so no lock guards the map.

pub mod category;
pub mod rotation;
pub mod writer;

pub use category::{sanitize_category, DEFAULT_CATEGORY, MAX_CATEGORY_LEN};
pub use rotation::{backup_path, rotate_files};
pub use writer::FanoutWriter;

use crate::core::config::LoggerConfig;
use crate::core::error::LoggerError;
use crate::core::error_sink::ErrorSink;
use crate::core::metrics::LoggerMetrics;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Open writer set and byte counter for one category
pub struct RouterEntry {
    path: PathBuf,
    writer: FanoutWriter,
    bytes_written: u64,
}

impl RouterEntry {
    /// Path of the active category file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Bytes written since the last rotation
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// False when the category degraded to standard output only
    pub fn has_file(&self) -> bool {
        self.writer.has_file()
    }
}

pub struct Router {
    base_dir: PathBuf,
    file_mode: u32,
    max_file_size: u64,
    max_files: usize,
    entries: HashMap<String, RouterEntry>,
    errors: Arc<ErrorSink>,
    metrics: Arc<LoggerMetrics>,
}

impl Router {
    pub fn new(config: &LoggerConfig, errors: Arc<ErrorSink>, metrics: Arc<LoggerMetrics>) -> Self {
        Self {
            base_dir: config.base_dir.clone(),
            file_mode: config.file_mode,
            max_file_size: config.max_file_size,
            max_files: config.max_files,
            entries: HashMap::new(),
            errors,
            metrics,
        }
    }

    /// File path a raw category name is routed to
    pub fn path_for(&self, category: &str) -> PathBuf {
        Self::file_path(&self.base_dir, &sanitize_category(category))
    }

    fn file_path(base_dir: &Path, name: &str) -> PathBuf {
        base_dir.join(format!("{}.log", name))
    }

    /// Get the entry for `category`, rotating or opening its file as needed
    pub fn get_or_create(&mut self, category: &str) -> &mut RouterEntry {
        let name = sanitize_category(category);

        let over_limit = self
            .entries
            .get(&name)
            .is_some_and(|entry| entry.bytes_written >= self.max_file_size);
        if over_limit {
            self.rotate(&name);
        }

        match self.entries.entry(name) {
            Entry::Occupied(occupied) => occupied.into_mut(),
            Entry::Vacant(vacant) => {
                let path = Self::file_path(&self.base_dir, vacant.key());
                let entry = Self::open_entry(path, self.file_mode, true, &self.errors);
                vacant.insert(entry)
            }
        }
    }

    /// Open the category file in append mode
    ///
    /// On failure the error is reported and the entry writes to standard
    /// output only. `seed` starts the counter at the existing file length.
    fn open_entry(path: PathBuf, mode: u32, seed: bool, errors: &ErrorSink) -> RouterEntry {
        match writer::open_append(&path, mode) {
            Ok(file) => {
                let bytes_written = if seed {
                    file.metadata().map(|m| m.len()).unwrap_or(0)
                } else {
                    0
                };
                RouterEntry {
                    path,
                    writer: FanoutWriter::with_file(file),
                    bytes_written,
                }
            }
            Err(e) => {
                errors.report(LoggerError::file_open(&path, e));
                RouterEntry {
                    path,
                    writer: FanoutWriter::stdout_only(),
                    bytes_written: 0,
                }
            }
        }
    }

    /// Replace the category's file with a fresh one, shifting backups
    ///
    /// A failed rename/remove skips the rest of this rotation, but the new
    /// entry still starts at zero bytes so the failure is not retried on
    /// every write.
    ///
    /// A category running on stdout only has no file to shift; reaching the
    /// size limit just retries opening its file.
    fn rotate(&mut self, name: &str) {
        let Some(old) = self.entries.remove(name) else {
            return;
        };

        let path = old.path;
        let had_file = old.writer.has_file();
        if let Err(e) = old.writer.close() {
            self.errors.report(LoggerError::file_close(&path, e));
        }

        if had_file {
            match rotate_files(&path, self.max_files) {
                Ok(()) => {
                    self.metrics.record_rotation();
                }
                Err(e) => self.errors.report(e),
            }
        }

        let entry = Self::open_entry(path, self.file_mode, false, &self.errors);
        self.entries.insert(name.to_string(), entry);
    }

    /// Write one formatted line (newline included) for `category`
    pub fn write(&mut self, category: &str, line: &str) {
        let failure = {
            let entry = self.get_or_create(category);
            match entry.writer.write_line(line.as_bytes()) {
                Ok(()) => {
                    entry.bytes_written += line.len() as u64;
                    None
                }
                Err(e) => Some(LoggerError::write_failed(&entry.path, e)),
            }
        };

        if let Some(error) = failure {
            self.errors.report(error);
        }
    }

    /// Flush buffered output of every open category
    pub fn flush_all(&mut self) {
        for entry in self.entries.values_mut() {
            if let Err(e) = entry.writer.flush() {
                self.errors.report(LoggerError::write_failed(&entry.path, e));
            }
        }
    }

    /// Close every category file, returning the failures
    pub fn close_all(&mut self) -> Vec<LoggerError> {
        self.entries
            .drain()
            .filter_map(|(_, entry)| {
                let path = entry.path;
                entry
                    .writer
                    .close()
                    .err()
                    .map(|e| LoggerError::file_close(&path, e))
            })
            .collect()
    }

    /// Number of categories with an open entry
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
