//! Reuse cache for log records
//!
//! Each engine owns its own pool. `acquire` never blocks: an empty cache
//! simply allocates a fresh record, and `release` into a full cache drops it.

use super::log_record::LogRecord;
use crossbeam_queue::ArrayQueue;

pub struct EntryPool {
    free: ArrayQueue<LogRecord>,
}

impl EntryPool {
    /// Create a pool retaining at most `capacity` idle records
    pub fn new(capacity: usize) -> Self {
        Self {
            free: ArrayQueue::new(capacity.max(1)),
        }
    }

    /// Take a cleared record from the cache, or allocate one
    #[inline]
    pub fn acquire(&self) -> LogRecord {
        self.free.pop().unwrap_or_default()
    }

    /// Clear a record and return it to the cache
    #[inline]
    pub fn release(&self, mut record: LogRecord) {
        record.reset();
        // Full cache: let the record drop
        let _ = self.free.push(record);
    }

    /// Number of idle records currently cached
    pub fn available(&self) -> usize {
        self.free.len()
    }

    pub fn capacity(&self) -> usize {
        self.free.capacity()
    }
}
