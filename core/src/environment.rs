//! Injected dependencies that are not stores.

use chrono::{DateTime, Utc};

/// Source of the current time.
///
/// Production code uses [`SystemClock`]; tests inject a fixed clock so that
/// timestamps and expiry checks are deterministic.
pub trait Clock: Send + Sync {
    /// Current time.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
