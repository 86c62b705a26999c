//! Clock abstraction and submission-time rendering.
//!
//! Notification documents and tabular records embed the wall-clock
//! submission time. The clock is injected so rendering stays deterministic
//! under test; production uses [`RealClock`].

use std::{
    fmt,
    sync::{
        atomic::{AtomicI64, Ordering},
        Arc,
    },
    time::Duration,
};

use chrono::{DateTime, Utc};
use chrono_tz::America::Chicago;

/// Clock abstraction for wall-clock readings.
///
/// Production code uses [`RealClock`]; tests inject [`TestClock`] to pin
/// the submission timestamp.
pub trait Clock: Send + Sync + fmt::Debug {
    /// Returns the current UTC time.
    fn now_utc(&self) -> DateTime<Utc>;
}

/// Real clock implementation using system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealClock;

impl RealClock {
    /// Creates a new real clock instance.
    pub fn new() -> Self {
        Self
    }
}

impl Clock for RealClock {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Test clock pinned to a controllable instant.
///
/// Stores microseconds since the Unix epoch; `set` and `advance` make
/// time-dependent output reproducible.
#[derive(Debug, Clone)]
pub struct TestClock {
    micros: Arc<AtomicI64>,
}

impl TestClock {
    /// Creates a test clock pinned to the given instant.
    pub fn fixed(instant: DateTime<Utc>) -> Self {
        Self { micros: Arc::new(AtomicI64::new(instant.timestamp_micros())) }
    }

    /// Moves the clock to a specific instant.
    pub fn set(&self, instant: DateTime<Utc>) {
        self.micros.store(instant.timestamp_micros(), Ordering::Release);
    }

    /// Advances the clock by the given duration.
    pub fn advance(&self, duration: Duration) {
        let micros = i64::try_from(duration.as_micros()).unwrap_or(i64::MAX);
        self.micros.fetch_add(micros, Ordering::AcqRel);
    }
}

impl Clock for TestClock {
    fn now_utc(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_micros(self.micros.load(Ordering::Acquire))
            .unwrap_or_else(|| DateTime::<Utc>::UNIX_EPOCH)
    }
}

/// Renders an instant in US Central time in en-US order, matching the
/// format both outbound channels embed: `M/D/YYYY, H:MM:SS AM|PM`.
pub fn central_timestamp(instant: DateTime<Utc>) -> String {
    instant.with_timezone(&Chicago).format("%-m/%-d/%Y, %-I:%M:%S %p").to_string()
}
