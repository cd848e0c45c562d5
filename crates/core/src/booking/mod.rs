//! Booking
//!
//! Converts a cart into a booking request, then hands the created booking to
//! either the confirmation or the payment step.

pub mod draft;
pub mod errors;
pub mod payment;
pub mod records;
pub mod submitter;
pub mod window;

pub use draft::{BookedService, BookingDraft, BookingRequest};
pub use errors::BookingError;
pub use payment::{Confirmation, PaymentStep};
pub use records::{
    BookingRecord, PaymentMethod, PaymentReceipt, PaymentRecord, PaymentStatus,
    UnknownPaymentMethod,
};
pub use submitter::{BookingSubmitter, NextStep, SubmissionState};
pub use window::{BookingWindow, TimeRejection, parse_time};
