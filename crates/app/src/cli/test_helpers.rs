//! Shared fixtures for command tests.

use std::sync::Arc;

use jiff::{Timestamp, tz::TimeZone};
use salon_booking::{
    backend::MockBackendService,
    catalog::{GenderCategory, Salon, Service},
    clock::FixedClock,
    ids::{SalonUuid, ServiceUuid},
    prompt::FixedAnswer,
    storage::MemoryStore,
};
use salon_booking_app::{
    backend::{MockBookingsService, MockCatalogService},
    context::AppContext,
};

pub(crate) fn salon(name: &str) -> Salon {
    Salon::new(SalonUuid::new(), name)
}

pub(crate) fn service(name: &str, price: &str) -> Service {
    Service {
        id: ServiceUuid::new(),
        name: name.to_string(),
        price: price.to_string(),
        duration: 30,
        gender: GenderCategory::Unisex,
    }
}

/// Catalog serving one salon and its services, any number of times.
pub(crate) fn catalog_with(salon: &Salon, services: &[Service]) -> MockCatalogService {
    let mut catalog = MockCatalogService::new();
    let salon_id = salon.id;
    let salon = salon.clone();
    let services = services.to_vec();

    catalog
        .expect_get_salon()
        .withf(move |requested| *requested == salon_id)
        .returning(move |_| Ok(salon.clone()));

    catalog
        .expect_get_services()
        .withf(move |requested| *requested == salon_id)
        .returning(move |_| Ok(services.clone()));

    catalog
}

/// Context over in-memory collaborators with the clock frozen at
/// 2026-10-16 12:00 UTC. Bookings calls are not expected; replace
/// `bookings` to allow them.
pub(crate) fn context(
    backend: MockBackendService,
    catalog: MockCatalogService,
    store: Arc<MemoryStore>,
    answer: bool,
) -> AppContext {
    let now = Timestamp::constant(1_792_152_000, 0).to_zoned(TimeZone::UTC);

    AppContext {
        backend: Arc::new(backend),
        catalog: Arc::new(catalog),
        bookings: Arc::new(MockBookingsService::new()),
        store,
        prompt: Arc::new(FixedAnswer(answer)),
        clock: Arc::new(FixedClock::new(now)),
    }
}
