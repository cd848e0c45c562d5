//! Backend service the booking flow talks to.

use async_trait::async_trait;
use jiff::civil::{Date, Time};
use mockall::automock;
use thiserror::Error;

use crate::{
    booking::{BookingDraft, BookingRecord, PaymentMethod, PaymentReceipt},
    ids::{BookingUuid, SalonUuid},
};

/// Errors reported by a [`BackendService`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// The backend answered and refused the request.
    #[error("{}", .message.as_deref().unwrap_or("request rejected by backend"))]
    Rejected {
        /// Human-readable reason supplied by the backend, if any.
        message: Option<String>,
    },

    /// The backend could not be reached or answered with garbage.
    #[error("backend unavailable: {0}")]
    Transport(String),
}

impl BackendError {
    /// A rejection carrying the backend's message.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: Some(message.into()),
        }
    }

    /// The backend-supplied message, if it gave one.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Rejected { message } => message.as_deref(),
            Self::Transport(_) => None,
        }
    }
}

/// Remote operations used by the booking flow.
#[automock]
#[async_trait]
pub trait BackendService: Send + Sync {
    /// Create a booking from the given draft.
    async fn create_booking(&self, draft: BookingDraft) -> Result<BookingRecord, BackendError>;

    /// Bookable start times for a salon on a given day.
    async fn fetch_available_slots(
        &self,
        salon: SalonUuid,
        date: Date,
    ) -> Result<Vec<Time>, BackendError>;

    /// Charge a booking using the given method.
    async fn process_payment(
        &self,
        booking: BookingUuid,
        method: PaymentMethod,
    ) -> Result<PaymentReceipt, BackendError>;
}
