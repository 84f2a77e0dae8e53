//! Clock sources for ID generation
//!
//! All sources report absolute wall-clock milliseconds since the Unix epoch.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// A source of the current time in milliseconds since the Unix epoch.
///
/// The allocator reads it once per attempt and repeatedly while waiting for
/// an exhausted millisecond to pass.
///
/// # Example
///
/// ```
/// use snowflake_alloc::TimeSource;
///
/// struct FixedTime;
/// impl TimeSource for FixedTime {
///     fn now_millis(&self) -> u64 {
///         1_700_000_000_000
///     }
/// }
///
/// assert_eq!(FixedTime.now_millis(), 1_700_000_000_000);
/// ```
pub trait TimeSource {
    fn now_millis(&self) -> u64;
}

impl<T: TimeSource + ?Sized> TimeSource for Arc<T> {
    #[inline(always)]
    fn now_millis(&self) -> u64 {
        (**self).now_millis()
    }
}

/// Get current wall-clock time in milliseconds since Unix epoch.
/// A clock set before 1970 reads as 0.
#[inline(always)]
pub fn unix_time_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// The system wall clock
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    #[inline(always)]
    fn now_millis(&self) -> u64 {
        unix_time_ms()
    }
}

/// A clock that only moves when told to.
///
/// Clones share the same instant, so a test can keep a handle while the
/// allocator owns another.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new(now: u64) -> Self {
        Self {
            now: Arc::new(AtomicU64::new(now)),
        }
    }

    pub fn set(&self, now: u64) {
        self.now.store(now, Ordering::Release);
    }

    pub fn advance(&self, millis: u64) {
        self.now.fetch_add(millis, Ordering::AcqRel);
    }

    /// Move the clock backwards, saturating at zero
    pub fn rewind(&self, millis: u64) {
        let _ = self
            .now
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |now| {
                Some(now.saturating_sub(millis))
            });
    }
}

impl TimeSource for ManualClock {
    #[inline(always)]
    fn now_millis(&self) -> u64 {
        self.now.load(Ordering::Acquire)
    }
}
