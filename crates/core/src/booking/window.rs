//! Booking window
//!
//! A booking must start strictly after "now" and no later than a fixed number
//! of days ahead. Date and time are combined in the clock's time zone.

use jiff::{
    Span, Zoned,
    civil::{Date, Time},
};
use serde::{Deserialize, Deserializer, Serializer};
use thiserror::Error;

/// How far ahead a booking may be placed by default.
pub const DEFAULT_MAX_ADVANCE_DAYS: u16 = 90;

/// Why a requested booking time was refused.
#[derive(Debug, Error)]
pub enum TimeRejection {
    /// The requested start is now or earlier.
    #[error("Cannot book appointments in the past. Please select a future date and time.")]
    NotInFuture,

    /// The requested date lies beyond the booking window.
    #[error("Bookings can only be made up to {latest}.")]
    TooFarAhead {
        /// Last bookable date.
        latest: Date,
    },

    /// The date and time cannot be placed on the calendar.
    #[error("invalid booking date or time")]
    OutOfRange(#[from] jiff::Error),
}

/// Acceptable range of booking start times relative to "now".
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BookingWindow {
    max_advance_days: u16,
}

impl Default for BookingWindow {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ADVANCE_DAYS)
    }
}

impl BookingWindow {
    /// Allow bookings up to `max_advance_days` days after today.
    pub const fn new(max_advance_days: u16) -> Self {
        Self { max_advance_days }
    }

    /// Number of days after today still accepted.
    pub const fn max_advance_days(&self) -> u16 {
        self.max_advance_days
    }

    /// Combine `date` and `time` in `now`'s time zone and check the result
    /// falls inside the window.
    ///
    /// # Errors
    ///
    /// - [`TimeRejection::NotInFuture`]: the instant is not strictly after `now`.
    /// - [`TimeRejection::TooFarAhead`]: `date` is beyond the last bookable date.
    /// - [`TimeRejection::OutOfRange`]: the date/time cannot be represented.
    pub fn check(&self, now: &Zoned, date: Date, time: Time) -> Result<Zoned, TimeRejection> {
        let requested = date.to_datetime(time).to_zoned(now.time_zone().clone())?;

        if requested.timestamp() <= now.timestamp() {
            return Err(TimeRejection::NotInFuture);
        }

        let latest = now
            .date()
            .checked_add(Span::new().days(i64::from(self.max_advance_days)))?;

        if date > latest {
            return Err(TimeRejection::TooFarAhead { latest });
        }

        Ok(requested)
    }
}

/// Parse a time of day given as `HH:MM` or `HH:MM:SS`.
///
/// # Errors
///
/// Returns an error when `text` is neither form.
pub fn parse_time(text: &str) -> Result<Time, jiff::Error> {
    let text = text.trim();

    Time::strptime("%H:%M", text).or_else(|_| text.parse::<Time>())
}

/// Serde adapter writing times as `HH:MM` and reading either `HH:MM` or `HH:MM:SS`.
pub(crate) mod hhmm {
    use super::{Deserialize, Deserializer, Serializer, Time, parse_time};

    pub(crate) fn serialize<S: Serializer>(time: &Time, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&time.strftime("%H:%M"))
    }

    pub(crate) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Time, D::Error> {
        let text = String::deserialize(deserializer)?;

        parse_time(&text).map_err(serde::de::Error::custom)
    }
}
