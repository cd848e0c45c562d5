//! Wall-clock access, injectable so the booking time gate is testable.

use jiff::Zoned;

/// Source of the current zoned instant.
pub trait Clock: Send + Sync {
    /// The current instant in the user's time zone.
    fn now(&self) -> Zoned;
}

/// Reads the system clock in the system time zone.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Zoned {
        Zoned::now()
    }
}

/// Always reports the same instant.
#[derive(Clone, Debug)]
pub struct FixedClock(Zoned);

impl FixedClock {
    /// Freeze the clock at `now`.
    #[must_use]
    pub fn new(now: Zoned) -> Self {
        Self(now)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Zoned {
        self.0.clone()
    }
}
