//! Salon booking prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    backend::{BackendError, BackendService},
    booking::{
        BookingDraft, BookingError, BookingRecord, BookingRequest, BookingSubmitter,
        BookingWindow, Confirmation, NextStep, PaymentMethod, PaymentReceipt, PaymentRecord,
        PaymentStatus, PaymentStep, SubmissionState, TimeRejection,
    },
    cart::{AddOutcome, CartError, CartStore, LineItem, parse_quantity},
    catalog::{GenderCategory, Salon, Service},
    clock::{Clock, FixedClock, SystemClock},
    ids::{BookingUuid, SalonUuid, ServiceUuid},
    prompt::{ConfirmationPrompt, FixedAnswer},
    storage::{DurableStore, MemoryStore, StorageError},
};
