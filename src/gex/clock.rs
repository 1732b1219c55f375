//! Injectable clock for reproducible time-to-expiry calculations.
//!
//! The current date is the engine's only non-pure input. Routing it through
//! a trait keeps production code on the real clock while tests pin a fixed
//! instant.

use chrono::{DateTime, NaiveDate, Utc};

/// Source of "now" for the engine.
pub trait Clock: Send + Sync {
    /// Current UTC calendar date, used for time-to-expiry.
    fn today(&self) -> NaiveDate;

    /// Current UTC instant, used for the result timestamp.
    fn now_utc(&self) -> DateTime<Utc>;
}

/// Real wall clock. The production default.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }

    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to a fixed instant, for deterministic results.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    instant: DateTime<Utc>,
}

impl FixedClock {
    /// Creates a clock frozen at the given instant.
    #[must_use]
    pub fn at(instant: DateTime<Utc>) -> Self {
        Self { instant }
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.instant.date_naive()
    }

    fn now_utc(&self) -> DateTime<Utc> {
        self.instant
    }
}
