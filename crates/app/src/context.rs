//! App Context

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    sync::Arc,
};

use salon_booking::{
    backend::BackendService,
    booking::{BookingSubmitter, PaymentStep},
    cart::CartStore,
    clock::{Clock, SystemClock},
    prompt::ConfirmationPrompt,
    storage::DurableStore,
};
use thiserror::Error;

use crate::{
    backend::{BookingsService, CatalogService, HttpBackend, HttpBackendConfig, HttpBackendError},
    config::AppConfig,
    prompt::TerminalPrompt,
    storage::FileStore,
};

/// Errors raised while wiring the application together.
#[derive(Debug, Error)]
pub enum AppInitError {
    /// The HTTP client could not be built.
    #[error("failed to build HTTP client")]
    Http(#[source] HttpBackendError),
}

/// Collaborators shared by every command.
#[derive(Clone)]
pub struct AppContext {
    /// Booking, slot and payment calls
    pub backend: Arc<dyn BackendService>,

    /// Salon and service lookups
    pub catalog: Arc<dyn CatalogService>,

    /// Existing bookings
    pub bookings: Arc<dyn BookingsService>,

    /// Where the cart is persisted
    pub store: Arc<dyn DurableStore>,

    /// Asks before a salon switch empties the cart or a booking is cancelled
    pub prompt: Arc<dyn ConfirmationPrompt>,

    /// Current time for the booking window
    pub clock: Arc<dyn Clock>,
}

impl Debug for AppContext {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("AppContext").finish_non_exhaustive()
    }
}

impl AppContext {
    /// Wire the HTTP backend, the cart file and the terminal prompt.
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, AppInitError> {
        let backend = Arc::new(
            HttpBackend::new(HttpBackendConfig {
                base_url: config.api.api_url.clone(),
                token: config.api.api_token.clone(),
                timeout: config.api.timeout(),
            })
            .map_err(AppInitError::Http)?,
        );

        Ok(Self {
            backend: backend.clone(),
            catalog: backend.clone(),
            bookings: backend,
            store: Arc::new(FileStore::new(config.storage.cart_file.clone())),
            prompt: Arc::new(TerminalPrompt),
            clock: Arc::new(SystemClock),
        })
    }

    /// Replace the confirmation prompt, e.g. to answer it non-interactively.
    #[must_use]
    pub fn with_prompt(mut self, prompt: Arc<dyn ConfirmationPrompt>) -> Self {
        self.prompt = prompt;
        self
    }

    /// The cart as last persisted.
    pub fn cart(&self) -> CartStore {
        CartStore::restore(self.store.clone(), self.prompt.clone())
    }

    /// A fresh submitter for one booking attempt.
    pub fn submitter(&self) -> BookingSubmitter {
        BookingSubmitter::new(self.backend.clone(), self.clock.clone())
    }

    /// The payment step for online bookings.
    pub fn payment(&self) -> PaymentStep {
        PaymentStep::new(self.backend.clone())
    }
}
