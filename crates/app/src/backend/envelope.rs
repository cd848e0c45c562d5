//! Response envelope and payload shapes of the booking API.

use salon_booking::{
    booking::{BookingRecord, PaymentMethod},
    catalog::{Salon, Service},
    ids::BookingUuid,
};
use serde::{Deserialize, Serialize};

/// Every API response is wrapped as `{ success, data, message }`.
#[derive(Debug, Deserialize)]
pub(super) struct Envelope<T> {
    #[serde(default)]
    pub(super) success: bool,

    pub(super) data: Option<T>,

    #[serde(default)]
    pub(super) message: Option<String>,
}

/// Body of an error response; only the message is of interest.
#[derive(Debug, Deserialize)]
pub(super) struct ErrorBody {
    #[serde(default)]
    pub(super) message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct BookingData {
    pub(super) booking: BookingRecord,
}

#[derive(Debug, Deserialize)]
pub(super) struct BookingsData {
    #[serde(default)]
    pub(super) bookings: Vec<BookingRecord>,
}

#[derive(Debug, Deserialize)]
pub(super) struct SlotsData {
    #[serde(default)]
    pub(super) slots: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct SalonData {
    pub(super) salon: Salon,
}

#[derive(Debug, Deserialize)]
pub(super) struct SalonsData {
    #[serde(default)]
    pub(super) salons: Vec<Salon>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ServicesData {
    #[serde(default)]
    pub(super) services: Vec<Service>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct PaymentRequest {
    pub(super) booking_id: BookingUuid,
    pub(super) payment_method: PaymentMethod,
}
