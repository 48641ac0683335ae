//! Time related utils.

use std::fmt::Debug;

/// DateTime is the alias for `chrono::DateTime<Utc>`.
pub type DateTime = chrono::DateTime<chrono::Utc>;

/// Create datetime of now.
pub fn now() -> DateTime {
    chrono::Utc::now()
}

/// Format time into date: `20220301`
pub fn format_date(t: DateTime) -> String {
    t.format("%Y%m%d").to_string()
}

/// Format time into ISO8601 basic format: `20220313T072004Z`
pub fn format_iso8601(t: DateTime) -> String {
    t.format("%Y%m%dT%H%M%SZ").to_string()
}

/// SigningClock produces the instant a request is signed at.
///
/// A signer must read the clock exactly once per signing operation and use
/// that instant for both the timestamp and the credential scope.
pub trait SigningClock: Debug + Send + Sync + 'static {
    /// Current instant.
    fn now(&self) -> DateTime;
}

/// SigningClock that reads the system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SigningClock for SystemClock {
    fn now(&self) -> DateTime {
        now()
    }
}

/// SigningClock that always returns the same instant.
///
/// Useful for tests and for reproducing a signature computed elsewhere.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(DateTime);

impl FixedClock {
    /// Create a clock frozen at `time`.
    pub fn new(time: DateTime) -> Self {
        Self(time)
    }
}

impl SigningClock for FixedClock {
    fn now(&self) -> DateTime {
        self.0
    }
}
