//! Time source abstraction for testability.
//!
//! The interpreter reads the wall clock for `date` and a monotonic clock for
//! measuring AI round trips. Both go through `TimeSource` so tests can pin
//! them to known values.

use chrono::{DateTime, FixedOffset, Local, TimeZone, Utc};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Abstraction over time-related operations.
pub trait TimeSource: Send + Sync + std::fmt::Debug {
    /// Get the current instant for measuring elapsed time.
    fn now(&self) -> Instant;

    /// Current wall-clock time in the local offset.
    fn wall_clock(&self) -> DateTime<FixedOffset>;

    /// Calculate elapsed time since an earlier instant.
    fn elapsed_since(&self, earlier: Instant) -> Duration {
        self.now().saturating_duration_since(earlier)
    }
}

/// Type alias for shared time source.
pub type SharedTimeSource = Arc<dyn TimeSource>;

/// Production implementation using actual system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealTimeSource;

impl RealTimeSource {
    pub fn new() -> Self {
        Self
    }

    pub fn shared() -> SharedTimeSource {
        Arc::new(Self)
    }
}

impl TimeSource for RealTimeSource {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn wall_clock(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

/// Test implementation with controllable time.
///
/// - `now()` returns a logical instant based on an internal counter
/// - `wall_clock()` returns the base date plus the logical elapsed time
/// - Time only moves when `advance()` is called
///
/// # Example
///
/// ```
/// use folio::services::time_source::{TimeSource, TestTimeSource};
/// use std::time::Duration;
///
/// let time = TestTimeSource::new();
/// let start = time.now();
/// time.advance(Duration::from_secs(5));
///
/// assert_eq!(time.elapsed_since(start), Duration::from_secs(5));
/// ```
#[derive(Debug)]
pub struct TestTimeSource {
    /// Logical time in nanoseconds since creation.
    logical_nanos: AtomicU64,
    /// Base instant (real time at creation, used for Instant arithmetic).
    base_instant: Instant,
    /// Wall-clock reading at logical time zero.
    base_wall_clock: DateTime<FixedOffset>,
}

impl Default for TestTimeSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TestTimeSource {
    /// Start at 2025-01-15 10:30:00 UTC, the same date `ls -l` shows.
    pub fn new() -> Self {
        let base = Utc
            .with_ymd_and_hms(2025, 1, 15, 10, 30, 0)
            .single()
            .map(|dt| dt.fixed_offset())
            .unwrap_or_else(|| Local::now().fixed_offset());
        Self::starting_at(base)
    }

    pub fn starting_at(base_wall_clock: DateTime<FixedOffset>) -> Self {
        Self {
            logical_nanos: AtomicU64::new(0),
            base_instant: Instant::now(),
            base_wall_clock,
        }
    }

    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Advance logical time by the given duration.
    pub fn advance(&self, duration: Duration) {
        self.logical_nanos
            .fetch_add(duration.as_nanos() as u64, Ordering::SeqCst);
    }

    /// Get the logical elapsed time since creation.
    pub fn elapsed(&self) -> Duration {
        Duration::from_nanos(self.logical_nanos.load(Ordering::SeqCst))
    }
}

impl TimeSource for TestTimeSource {
    fn now(&self) -> Instant {
        self.base_instant + self.elapsed()
    }

    fn wall_clock(&self) -> DateTime<FixedOffset> {
        let elapsed = chrono::Duration::from_std(self.elapsed()).unwrap_or(chrono::Duration::zero());
        self.base_wall_clock + elapsed
    }
}
