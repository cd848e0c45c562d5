//! Booking Records
//!
//! Shapes returned by the backend once a booking exists.

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use jiff::civil::{Date, Time};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{booking::window::hhmm, catalog::Salon, ids::BookingUuid};

/// How the customer intends to pay.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Pay through the payment step right after booking.
    Online,

    /// Pay in person at the salon.
    AtShop,
}

impl PaymentMethod {
    /// Wire name of the method.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Online => "online",
            Self::AtShop => "at_shop",
        }
    }
}

impl Display for PaymentMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Returned when text does not name a [`PaymentMethod`].
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown payment method {0:?}, expected \"online\" or \"at_shop\"")]
pub struct UnknownPaymentMethod(pub String);

impl FromStr for PaymentMethod {
    type Err = UnknownPaymentMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "online" => Ok(Self::Online),
            "at_shop" => Ok(Self::AtShop),
            other => Err(UnknownPaymentMethod(other.to_string())),
        }
    }
}

/// A booking as stored by the backend.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRecord {
    /// Booking identifier
    pub id: BookingUuid,

    /// Code the customer shows at the salon
    #[serde(default)]
    pub confirmation_code: Option<String>,

    /// Appointment day
    pub booking_date: Date,

    /// Appointment start
    #[serde(with = "hhmm")]
    pub booking_time: Time,

    /// Chosen payment method
    pub payment_method: PaymentMethod,

    /// Amount the backend priced the booking at
    #[serde(default)]
    pub total_amount: Option<Decimal>,

    /// Backend lifecycle status, e.g. `"pending"` or `"confirmed"`
    #[serde(default)]
    pub status: Option<String>,

    /// Settlement status, e.g. `"paid"` or `"pending"`
    #[serde(default)]
    pub payment_status: Option<String>,

    /// Salon details, when the backend includes them
    #[serde(default)]
    pub salon: Option<Salon>,
}

/// Outcome of a payment attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// Money was taken
    Success,

    /// The gateway refused the charge
    Failed,

    /// Not settled yet
    Pending,
}

/// A payment attempt recorded by the backend.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRecord {
    /// Gateway transaction reference
    #[serde(default)]
    pub transaction_id: Option<String>,

    /// Settlement status
    pub status: PaymentStatus,

    /// Amount charged
    #[serde(default)]
    pub amount: Option<Decimal>,
}

/// What the backend returns after processing a payment: the payment itself
/// and, usually, the updated booking.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PaymentReceipt {
    /// Booking after payment, if the backend sent it back
    #[serde(default)]
    pub booking: Option<BookingRecord>,

    /// The payment attempt
    pub payment: PaymentRecord,
}
