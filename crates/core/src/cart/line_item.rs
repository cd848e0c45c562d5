//! Line Items

use std::num::NonZeroU32;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    catalog::{GenderCategory, Salon, Service},
    ids::ServiceUuid,
};

/// One service in the cart, with its quantity and the price frozen when it
/// was first added.
///
/// Serialized with the field names the persisted cart has always used
/// (`serviceId`, `price`, `duration`, `gender`, `quantity`, `salonName`).
/// The price is written as an exact decimal string; carts persisted with a
/// numeric price are still read.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    service_id: ServiceUuid,
    name: String,
    #[serde(rename = "price")]
    unit_price: Decimal,
    #[serde(rename = "duration")]
    duration_minutes: u32,
    gender: GenderCategory,
    quantity: NonZeroU32,
    salon_name: String,
}

impl LineItem {
    pub(crate) fn new(service: &Service, salon: &Salon, unit_price: Decimal) -> Self {
        Self {
            service_id: service.id,
            name: service.name.clone(),
            unit_price,
            duration_minutes: service.duration,
            gender: service.gender,
            quantity: NonZeroU32::MIN,
            salon_name: salon.name.clone(),
        }
    }

    /// The service this line books.
    pub fn service_id(&self) -> ServiceUuid {
        self.service_id
    }

    /// Service display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Price per unit, as captured at add time.
    pub fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    /// Appointment length per unit.
    pub fn duration_minutes(&self) -> u32 {
        self.duration_minutes
    }

    /// Target clientele of the service.
    pub fn gender(&self) -> GenderCategory {
        self.gender
    }

    /// How many of this service are booked. Never zero.
    pub fn quantity(&self) -> NonZeroU32 {
        self.quantity
    }

    /// Name of the salon the service belongs to.
    pub fn salon_name(&self) -> &str {
        &self.salon_name
    }

    /// `unit_price × quantity`
    pub fn subtotal(&self) -> Decimal {
        self.unit_price
            .saturating_mul(Decimal::from(self.quantity.get()))
    }

    pub(crate) fn set_quantity(&mut self, quantity: NonZeroU32) {
        self.quantity = quantity;
    }
}
