//! Monotonic session clock
//!
//! Wraps a wall clock so that successive readings never go backwards,
//! even when the system time is adjusted mid-session.

use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use crate::ports::{Clock, SystemClock};

/// Clock whose readings are non-decreasing for its whole lifetime
pub struct MonotonicClock {
    source: Arc<dyn Clock>,
    /// Latest reading handed out, in microseconds since the epoch
    last_micros: AtomicI64,
}

impl MonotonicClock {
    pub fn new(source: Arc<dyn Clock>) -> Self {
        Self {
            source,
            last_micros: AtomicI64::new(i64::MIN),
        }
    }

    /// Read the clock, clamped to the latest reading already handed out
    ///
    /// Readings are truncated to whole microseconds.
    pub fn now(&self) -> DateTime<Utc> {
        let now = self.source.now();
        let micros = now.timestamp_micros();
        let previous = self.last_micros.fetch_max(micros, Ordering::SeqCst);

        DateTime::<Utc>::from_timestamp_micros(previous.max(micros)).unwrap_or(now)
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}
