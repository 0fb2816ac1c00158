use chrono::{DateTime, Duration, Utc};

/// A small clock abstraction so session timestamps stay deterministic in
/// tests.
#[derive(Debug, Clone, Copy, Default)]
pub enum Clock {
    #[default]
    Default,
    Fixed(DateTime<Utc>),
}

impl Clock {
    /// Returns a clock that uses the current system time.
    #[must_use]
    pub fn default_clock() -> Self {
        Self::Default
    }

    /// Returns a clock fixed at the given timestamp.
    #[must_use]
    pub fn fixed(at: DateTime<Utc>) -> Self {
        Self::Fixed(at)
    }

    /// Returns the current time according to the clock.
    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::Default => Utc::now(),
            Clock::Fixed(t) => *t,
        }
    }

    /// If this is a fixed clock, advance it by the given duration.
    ///
    /// Has no effect on `Clock::Default`.
    pub fn advance(&mut self, delta: Duration) {
        if let Clock::Fixed(t) = self {
            *t += delta;
        }
    }
}

/// Deterministic timestamp for tests (2026-01-15T06:13:20Z).
pub const FIXED_TEST_TIMESTAMP: i64 = 1_768_457_600;

/// Returns a deterministic `DateTime<Utc>` for tests and doc examples.
///
/// # Panics
///
/// Panics if the fixed timestamp cannot be represented.
#[must_use]
pub fn fixed_now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(FIXED_TEST_TIMESTAMP, 0)
        .expect("fixed timestamp should be valid")
}

/// Returns a `Clock` fixed at the deterministic test timestamp.
#[must_use]
pub fn fixed_clock() -> Clock {
    Clock::fixed(fixed_now())
}
