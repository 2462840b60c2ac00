//! Overflow policy for the bounded record queue
//!
//! When the queue is full, the policy decides whether a record is dropped
//! straight away or gets a short grace period to find a free slot.

use std::fmt;
use std::time::Duration;

/// Queues at or below this capacity drop immediately when full
pub const SMALL_QUEUE_THRESHOLD: usize = 10;

/// How long a producer may wait for space on a larger queue
pub const DEFAULT_GRACE_PERIOD: Duration = Duration::from_millis(5);

/// Policy for handling a full queue
///
/// The policy is derived from the queue capacity: small buffers favour
/// producer latency, larger ones allow a brief wait before giving up. Either
/// way a producer is never blocked indefinitely.
///
/// # Example
///
/// ```
/// use channel_logger::OverflowPolicy;
/// use std::time::Duration;
///
/// assert_eq!(OverflowPolicy::for_capacity(1), OverflowPolicy::DropImmediately);
/// assert_eq!(
///     OverflowPolicy::for_capacity(100),
///     OverflowPolicy::WaitThenDrop(Duration::from_millis(5))
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverflowPolicy {
    /// Drop the record as soon as `try_send` reports a full queue
    DropImmediately,

    /// Retry with a bounded wait, then drop
    WaitThenDrop(Duration),
}

impl OverflowPolicy {
    #[must_use]
    pub fn for_capacity(capacity: usize) -> Self {
        if capacity <= SMALL_QUEUE_THRESHOLD {
            OverflowPolicy::DropImmediately
        } else {
            OverflowPolicy::WaitThenDrop(DEFAULT_GRACE_PERIOD)
        }
    }

    /// Grace period granted before dropping, if any
    #[must_use]
    pub fn grace_period(&self) -> Option<Duration> {
        match self {
            OverflowPolicy::DropImmediately => None,
            OverflowPolicy::WaitThenDrop(grace) => Some(*grace),
        }
    }
}

impl fmt::Display for OverflowPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverflowPolicy::DropImmediately => write!(f, "DropImmediately"),
            OverflowPolicy::WaitThenDrop(d) => write!(f, "WaitThenDrop({:?})", d),
        }
    }
}
