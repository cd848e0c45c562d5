//! Booking errors.

use thiserror::Error;

use crate::booking::window::TimeRejection;

/// Shown when the backend refuses a booking without saying why.
pub const SUBMISSION_FALLBACK_MESSAGE: &str = "Failed to create booking";

/// Shown when the backend refuses a payment without saying why.
pub const PAYMENT_FALLBACK_MESSAGE: &str = "Payment failed";

/// Errors surfaced by the booking flow. Every message is fit for display.
#[derive(Debug, Error)]
pub enum BookingError {
    /// Nothing to book.
    #[error("Your cart is empty. Please add services before booking.")]
    EmptyCart,

    /// The requested date/time is outside the booking window.
    #[error(transparent)]
    InvalidTime(#[from] TimeRejection),

    /// The backend refused to create the booking.
    #[error("{0}")]
    Submission(String),

    /// The backend refused the payment.
    #[error("{0}")]
    Payment(String),

    /// This submitter already produced a booking; reset it to book again.
    #[error("This booking has already been submitted.")]
    AlreadySubmitted,
}
