//! Booking Draft

use jiff::civil::{Date, Time};
use serde::{Deserialize, Serialize};

use crate::{
    booking::{records::PaymentMethod, window::hhmm},
    cart::LineItem,
    ids::{SalonUuid, ServiceUuid},
};

/// What the user picked on the booking form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BookingRequest {
    /// Appointment day
    pub booking_date: Date,

    /// Appointment start, one of the salon's available slots
    pub booking_time: Time,

    /// How the customer intends to pay
    pub payment_method: PaymentMethod,

    /// Free-form requests for the salon
    pub notes: Option<String>,
}

/// One requested service in a [`BookingDraft`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookedService {
    /// Service to book
    pub service_id: ServiceUuid,

    /// Number of units
    pub quantity: u32,
}

/// Minimal projection of the cart sent to the backend to create a booking.
///
/// Prices, names and durations are left out on purpose: the backend prices
/// the booking itself.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingDraft {
    /// Salon the booking is for
    pub salon_id: SalonUuid,

    /// Requested services, in cart order
    pub services: Vec<BookedService>,

    /// Appointment day
    pub booking_date: Date,

    /// Appointment start
    #[serde(with = "hhmm")]
    pub booking_time: Time,

    /// How the customer intends to pay
    pub payment_method: PaymentMethod,

    /// Free-form requests for the salon
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl BookingDraft {
    /// Project cart lines and the booking form into a draft.
    ///
    /// Blank notes are dropped.
    pub fn new(salon_id: SalonUuid, items: &[LineItem], request: &BookingRequest) -> Self {
        Self {
            salon_id,
            services: items
                .iter()
                .map(|item| BookedService {
                    service_id: item.service_id(),
                    quantity: item.quantity().get(),
                })
                .collect(),
            booking_date: request.booking_date,
            booking_time: request.booking_time,
            payment_method: request.payment_method,
            notes: request
                .notes
                .as_deref()
                .map(str::trim)
                .filter(|notes| !notes.is_empty())
                .map(str::to_string),
        }
    }
}
