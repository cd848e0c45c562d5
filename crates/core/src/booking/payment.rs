//! Payment step and booking confirmation.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    sync::Arc,
};

use tracing::{info, warn};

use crate::{
    backend::BackendService,
    booking::{
        errors::{BookingError, PAYMENT_FALLBACK_MESSAGE},
        records::{BookingRecord, PaymentMethod, PaymentRecord, PaymentStatus},
    },
};

/// Final state shown to the user once a booking is done.
#[derive(Clone, Debug, PartialEq)]
pub struct Confirmation {
    /// The booking
    pub booking: BookingRecord,

    /// The payment, for bookings paid online
    pub payment: Option<PaymentRecord>,
}

impl Confirmation {
    /// Confirmation for a booking paid at the shop; no payment is involved.
    pub fn at_shop(booking: BookingRecord) -> Self {
        Self {
            booking,
            payment: None,
        }
    }

    /// Whether the booking can be considered confirmed: paid at the shop, or
    /// paid online successfully.
    pub fn is_confirmed(&self) -> bool {
        self.booking.payment_method == PaymentMethod::AtShop
            || self
                .payment
                .as_ref()
                .is_some_and(|payment| payment.status == PaymentStatus::Success)
    }
}

/// Collects payment for a booking that chose to pay online.
pub struct PaymentStep {
    backend: Arc<dyn BackendService>,
}

impl Debug for PaymentStep {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("PaymentStep").finish_non_exhaustive()
    }
}

impl PaymentStep {
    /// Create a payment step backed by `backend`.
    pub fn new(backend: Arc<dyn BackendService>) -> Self {
        Self { backend }
    }

    /// Process the payment for `booking` with the booking's own method.
    ///
    /// A declined charge reported by the backend as a payment with status
    /// `failed` is not an error: the returned confirmation is simply not
    /// confirmed.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::Payment`] with the backend's message (or a
    /// generic one) when the backend refuses the request. Nothing is retried.
    pub async fn pay(&self, booking: BookingRecord) -> Result<Confirmation, BookingError> {
        let receipt = match self
            .backend
            .process_payment(booking.id, booking.payment_method)
            .await
        {
            Ok(receipt) => receipt,
            Err(error) => {
                warn!(booking = %booking.id, "payment failed: {error}");

                let message = error.message().unwrap_or(PAYMENT_FALLBACK_MESSAGE);

                return Err(BookingError::Payment(message.to_string()));
            }
        };

        info!(
            booking = %booking.id,
            status = ?receipt.payment.status,
            "payment processed"
        );

        Ok(Confirmation {
            booking: receipt.booking.unwrap_or(booking),
            payment: Some(receipt.payment),
        })
    }
}
