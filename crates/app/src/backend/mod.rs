//! HTTP client for the booking API.

use std::time::Duration;

use async_trait::async_trait;
use clap::ValueEnum;
use jiff::civil::{Date, Time};
use mockall::automock;
use reqwest::{Client, RequestBuilder};
use salon_booking::{
    backend::{BackendError, BackendService},
    booking::{BookingDraft, BookingRecord, PaymentMethod, PaymentReceipt, parse_time},
    catalog::{Salon, Service},
    ids::{BookingUuid, SalonUuid},
};
use serde::de::{DeserializeOwned, IgnoredAny};
use tracing::debug;

use crate::backend::envelope::{
    BookingData, BookingsData, Envelope, ErrorBody, PaymentRequest, SalonData, SalonsData,
    ServicesData, SlotsData,
};

mod envelope;
mod errors;

pub use errors::HttpBackendError;

/// Catalog reads the CLI needs to browse salons and add services to the cart.
#[automock]
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Salons matching `search` by name or location, or all of them.
    async fn list_salons(&self, search: Option<String>) -> Result<Vec<Salon>, BackendError>;

    /// Salon details.
    async fn get_salon(&self, salon: SalonUuid) -> Result<Salon, BackendError>;

    /// Services offered by a salon.
    async fn get_services(&self, salon: SalonUuid) -> Result<Vec<Service>, BackendError>;
}

/// Lifecycle filter for [`BookingsService::list_bookings`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum BookingStatus {
    /// Created, not yet confirmed by the salon
    Pending,

    /// Confirmed by the salon
    Confirmed,

    /// The appointment took place
    Completed,

    /// Cancelled by the customer or the salon
    Cancelled,
}

impl BookingStatus {
    /// Wire name of the status.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

/// The customer's existing bookings.
#[automock]
#[async_trait]
pub trait BookingsService: Send + Sync {
    /// Bookings of the current customer, optionally only those in `status`.
    async fn list_bookings(
        &self,
        status: Option<BookingStatus>,
    ) -> Result<Vec<BookingRecord>, BackendError>;

    /// Cancel a booking.
    async fn cancel_booking(&self, booking: BookingUuid) -> Result<(), BackendError>;
}

/// Connection settings for [`HttpBackend`].
#[derive(Debug, Clone)]
pub struct HttpBackendConfig {
    /// Base URL, e.g. `"http://localhost:5000/api"`.
    pub base_url: String,

    /// Bearer token attached to every request, when set.
    pub token: Option<String>,

    /// Per-request timeout.
    pub timeout: Duration,
}

/// reqwest client for the booking API.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    config: HttpBackendConfig,
    http: Client,
}

impl HttpBackend {
    /// Create a new client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be built.
    pub fn new(config: HttpBackendConfig) -> Result<Self, HttpBackendError> {
        let http = Client::builder().timeout(config.timeout).build()?;

        Ok(Self { config, http })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.base_url.trim_end_matches('/'))
    }

    /// Send `request` and unwrap the envelope, returning its `data` if any.
    async fn send_envelope<T: DeserializeOwned + Send>(
        &self,
        request: RequestBuilder,
    ) -> Result<Option<T>, HttpBackendError> {
        let request = match self.config.token.as_deref() {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request.send().await?;
        let status = response.status();
        let url = response.url().to_string();
        let body = response.text().await?;

        debug!(%status, %url, "booking API responded");

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|body| body.message);

            return Err(HttpBackendError::Rejected { status, message });
        }

        let envelope: Envelope<T> = serde_json::from_str(&body)
            .map_err(|error| HttpBackendError::UnexpectedResponse(error.to_string()))?;

        if !envelope.success {
            return Err(HttpBackendError::Rejected {
                status,
                message: envelope.message,
            });
        }

        Ok(envelope.data)
    }

    async fn send<T: DeserializeOwned + Send>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, HttpBackendError> {
        self.send_envelope(request).await?.ok_or_else(|| {
            HttpBackendError::UnexpectedResponse("response carries no data".to_string())
        })
    }
}

#[async_trait]
impl BackendService for HttpBackend {
    async fn create_booking(&self, draft: BookingDraft) -> Result<BookingRecord, BackendError> {
        let request = self.http.post(self.url("/bookings")).json(&draft);
        let data: BookingData = self.send(request).await?;

        Ok(data.booking)
    }

    async fn fetch_available_slots(
        &self,
        salon: SalonUuid,
        date: Date,
    ) -> Result<Vec<Time>, BackendError> {
        let request = self
            .http
            .get(self.url(&format!("/salons/{salon}/slots")))
            .query(&[("date", date.to_string())]);
        let data: SlotsData = self.send(request).await?;

        let slots = data
            .slots
            .iter()
            .map(|slot| {
                parse_time(slot).map_err(|error| {
                    HttpBackendError::UnexpectedResponse(format!("invalid slot {slot:?}: {error}"))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(slots)
    }

    async fn process_payment(
        &self,
        booking: BookingUuid,
        method: PaymentMethod,
    ) -> Result<PaymentReceipt, BackendError> {
        let request = self
            .http
            .post(self.url("/payments/process"))
            .json(&PaymentRequest {
                booking_id: booking,
                payment_method: method,
            });

        Ok(self.send(request).await?)
    }
}

#[async_trait]
impl CatalogService for HttpBackend {
    async fn list_salons(&self, search: Option<String>) -> Result<Vec<Salon>, BackendError> {
        let mut request = self.http.get(self.url("/salons"));

        if let Some(search) = search.as_deref().map(str::trim).filter(|search| !search.is_empty()) {
            request = request.query(&[("search", search)]);
        }

        let data: SalonsData = self.send(request).await?;

        Ok(data.salons)
    }

    async fn get_salon(&self, salon: SalonUuid) -> Result<Salon, BackendError> {
        let request = self.http.get(self.url(&format!("/salons/{salon}")));
        let data: SalonData = self.send(request).await?;

        Ok(data.salon)
    }

    async fn get_services(&self, salon: SalonUuid) -> Result<Vec<Service>, BackendError> {
        let request = self.http.get(self.url(&format!("/salons/{salon}/services")));
        let data: ServicesData = self.send(request).await?;

        Ok(data.services)
    }
}

#[async_trait]
impl BookingsService for HttpBackend {
    async fn list_bookings(
        &self,
        status: Option<BookingStatus>,
    ) -> Result<Vec<BookingRecord>, BackendError> {
        let mut request = self.http.get(self.url("/bookings"));

        if let Some(status) = status {
            request = request.query(&[("status", status.as_str())]);
        }

        let data: BookingsData = self.send(request).await?;

        Ok(data.bookings)
    }

    async fn cancel_booking(&self, booking: BookingUuid) -> Result<(), BackendError> {
        let request = self.http.patch(self.url(&format!("/bookings/{booking}/cancel")));

        self.send_envelope::<IgnoredAny>(request).await?;

        Ok(())
    }
}
