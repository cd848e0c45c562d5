//! Catalog
//!
//! Salon and service shapes as served by the backend. These are read-only
//! inputs to the cart; nothing in this crate mutates them.

use serde::{Deserialize, Deserializer, Serialize};

use crate::ids::{SalonUuid, ServiceUuid};

/// Which clientele a service is offered to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenderCategory {
    /// Offered to men
    Male,

    /// Offered to women
    Female,

    /// Offered to everyone
    Unisex,
}

/// A salon listing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Salon {
    /// Salon identifier
    pub id: SalonUuid,

    /// Display name
    pub name: String,

    /// Street address
    #[serde(default)]
    pub address: Option<String>,

    /// City
    #[serde(default)]
    pub city: Option<String>,

    /// State or region
    #[serde(default)]
    pub state: Option<String>,

    /// Contact phone number
    #[serde(default)]
    pub phone_number: Option<String>,
}

impl Salon {
    /// Create a salon with only the fields the cart needs.
    pub fn new(id: SalonUuid, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            address: None,
            city: None,
            state: None,
            phone_number: None,
        }
    }
}

/// A bookable service offered by a salon.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Service {
    /// Service identifier
    pub id: ServiceUuid,

    /// Display name
    pub name: String,

    /// Price exactly as the backend reported it, e.g. `"499.00"`.
    #[serde(deserialize_with = "price_text")]
    pub price: String,

    /// Length of the appointment in minutes
    pub duration: u32,

    /// Target clientele
    pub gender: GenderCategory,
}

/// Accepts either a JSON string or a JSON number for the price field.
fn price_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawPrice {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match RawPrice::deserialize(deserializer)? {
        RawPrice::Text(text) => text,
        RawPrice::Number(number) => number.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn service_deserializes_from_backend_payload() -> TestResult {
        let payload = r#"{
            "id": "0192b9a4-5f3e-7c1a-9d2e-3f4a5b6c7d8e",
            "name": "Haircut",
            "price": "350.00",
            "duration": 30,
            "gender": "unisex"
        }"#;

        let service: Service = serde_json::from_str(payload)?;

        assert_eq!(service.name, "Haircut");
        assert_eq!(service.price, "350.00");
        assert_eq!(service.gender, GenderCategory::Unisex);

        Ok(())
    }

    #[test]
    fn numeric_price_is_kept_as_text() -> TestResult {
        let payload = r#"{
            "id": "0192b9a4-5f3e-7c1a-9d2e-3f4a5b6c7d8e",
            "name": "Beard trim",
            "price": 120.5,
            "duration": 15,
            "gender": "male"
        }"#;

        let service: Service = serde_json::from_str(payload)?;

        assert_eq!(service.price, "120.5");

        Ok(())
    }

    #[test]
    fn salon_optional_fields_default_to_none() -> TestResult {
        let payload = r#"{ "id": "0192b9a4-5f3e-7c1a-9d2e-3f4a5b6c7d8e", "name": "Glow" }"#;

        let salon: Salon = serde_json::from_str(payload)?;

        assert_eq!(salon.name, "Glow");
        assert!(salon.city.is_none());

        Ok(())
    }
}
