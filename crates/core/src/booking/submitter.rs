//! Booking Submitter
//!
//! Turns the cart into a booking. All local checks (non-empty cart, booking
//! window) run before the backend is contacted; the cart is only cleared once
//! the backend has accepted the booking.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    sync::Arc,
};

use jiff::civil::{Date, Time};
use tracing::{debug, info, warn};

use crate::{
    backend::{BackendError, BackendService},
    booking::{
        draft::{BookingDraft, BookingRequest},
        errors::{BookingError, SUBMISSION_FALLBACK_MESSAGE},
        records::{BookingRecord, PaymentMethod},
        window::BookingWindow,
    },
    cart::CartStore,
    clock::Clock,
    ids::SalonUuid,
};

/// Where a submission currently stands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SubmissionState {
    /// Ready to submit.
    #[default]
    Idle,

    /// Running local checks.
    Validating,

    /// Waiting on the backend.
    Submitting,

    /// The booking was created. Terminal until [`BookingSubmitter::reset`].
    Succeeded,

    /// The last attempt failed; the next submission starts over from `Idle`.
    Failed,
}

/// Where the user goes after a successful submission.
#[derive(Clone, Debug, PartialEq)]
pub enum NextStep {
    /// Paying at the shop: show the confirmation straight away.
    Confirmation(BookingRecord),

    /// Paying online: continue to the payment step.
    Payment(BookingRecord),
}

impl NextStep {
    /// The booking created by the backend.
    pub fn booking(&self) -> &BookingRecord {
        match self {
            Self::Confirmation(booking) | Self::Payment(booking) => booking,
        }
    }
}

/// Validates the cart against the booking form and submits it.
pub struct BookingSubmitter {
    backend: Arc<dyn BackendService>,
    clock: Arc<dyn Clock>,
    window: BookingWindow,
    state: SubmissionState,
}

impl Debug for BookingSubmitter {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("BookingSubmitter")
            .field("window", &self.window)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl BookingSubmitter {
    /// Create an idle submitter with the default booking window.
    pub fn new(backend: Arc<dyn BackendService>, clock: Arc<dyn Clock>) -> Self {
        Self {
            backend,
            clock,
            window: BookingWindow::default(),
            state: SubmissionState::Idle,
        }
    }

    /// Use a different booking window.
    #[must_use]
    pub fn with_window(mut self, window: BookingWindow) -> Self {
        self.window = window;
        self
    }

    /// Current state of the submission.
    pub fn state(&self) -> SubmissionState {
        self.state
    }

    /// Return to `Idle`, e.g. to start a fresh booking after a success.
    pub fn reset(&mut self) {
        self.state = SubmissionState::Idle;
    }

    /// Bookable start times for `salon` on `date`.
    ///
    /// # Errors
    ///
    /// Returns the [`BackendError`] unchanged; nothing is retried.
    pub async fn available_slots(
        &self,
        salon: SalonUuid,
        date: Date,
    ) -> Result<Vec<Time>, BackendError> {
        self.backend.fetch_available_slots(salon, date).await
    }

    /// Submit the cart as a booking.
    ///
    /// On success the cart is cleared and the returned [`NextStep`] says
    /// whether to confirm or collect payment. On failure the cart is left
    /// exactly as it was so the user can correct the form and retry.
    ///
    /// # Errors
    ///
    /// - [`BookingError::AlreadySubmitted`]: this submitter already succeeded.
    /// - [`BookingError::EmptyCart`]: there is nothing to book.
    /// - [`BookingError::InvalidTime`]: the date/time is outside the booking window.
    /// - [`BookingError::Submission`]: the backend refused the booking.
    pub async fn submit(
        &mut self,
        cart: &mut CartStore,
        request: BookingRequest,
    ) -> Result<NextStep, BookingError> {
        match self.state {
            SubmissionState::Succeeded => return Err(BookingError::AlreadySubmitted),
            SubmissionState::Failed => self.state = SubmissionState::Idle,
            SubmissionState::Idle | SubmissionState::Validating | SubmissionState::Submitting => {}
        }

        self.state = SubmissionState::Validating;

        let draft = self.validate(cart, &request).inspect_err(|error| {
            debug!("booking rejected locally: {error}");
        });

        let draft = match draft {
            Ok(draft) => draft,
            Err(error) => return Err(self.fail(error)),
        };

        self.state = SubmissionState::Submitting;

        info!(
            salon = %draft.salon_id,
            services = draft.services.len(),
            date = %draft.booking_date,
            payment_method = %draft.payment_method,
            "submitting booking"
        );

        let booking = match self.backend.create_booking(draft).await {
            Ok(booking) => booking,
            Err(error) => {
                warn!("booking submission failed: {error}");

                let message = error.message().unwrap_or(SUBMISSION_FALLBACK_MESSAGE);

                return Err(self.fail(BookingError::Submission(message.to_string())));
            }
        };

        // The booking exists now; a storage hiccup must not turn it into an error.
        if let Err(error) = cart.clear_cart() {
            warn!(booking = %booking.id, "failed to erase persisted cart: {error}");

            cart.forget();
        }

        self.state = SubmissionState::Succeeded;

        info!(booking = %booking.id, "booking created");

        Ok(match request.payment_method {
            PaymentMethod::AtShop => NextStep::Confirmation(booking),
            PaymentMethod::Online => NextStep::Payment(booking),
        })
    }

    fn validate(
        &self,
        cart: &CartStore,
        request: &BookingRequest,
    ) -> Result<BookingDraft, BookingError> {
        let salon_id = cart
            .salon_id()
            .filter(|_| !cart.is_empty())
            .ok_or(BookingError::EmptyCart)?;

        self.window.check(
            &self.clock.now(),
            request.booking_date,
            request.booking_time,
        )?;

        Ok(BookingDraft::new(salon_id, cart.items(), request))
    }

    fn fail(&mut self, error: BookingError) -> BookingError {
        self.state = SubmissionState::Failed;

        error
    }
}
