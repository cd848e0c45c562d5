use std::io::Write;

use clap::Args;
use jiff::civil::Date;
use salon_booking_app::context::AppContext;

use super::CliError;

#[derive(Debug, Args)]
pub(crate) struct SlotsArgs {
    /// Day to look at (YYYY-MM-DD)
    #[arg(long)]
    date: Date,
}

pub(crate) async fn run(
    args: SlotsArgs,
    context: &AppContext,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let cart = context.cart();
    let salon = cart
        .salon_id()
        .filter(|_| !cart.is_empty())
        .ok_or(CliError::EmptyCart)?;

    let slots = context
        .submitter()
        .available_slots(salon, args.date)
        .await?;

    if slots.is_empty() {
        writeln!(out, "No free slots on {}.", args.date)?;
        return Ok(());
    }

    for slot in slots {
        writeln!(out, "{}", slot.strftime("%H:%M"))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use jiff::civil::{date, time};
    use salon_booking::{
        backend::{BackendError, MockBackendService},
        storage::MemoryStore,
    };
    use salon_booking_app::backend::MockCatalogService;
    use testresult::TestResult;

    use super::*;
    use crate::cli::test_helpers::{context, salon, service};

    #[tokio::test]
    async fn lists_slots_for_the_cart_salon() -> TestResult {
        let salon = salon("Salon A");
        let salon_id = salon.id;
        let store = Arc::new(MemoryStore::new());
        let mut backend = MockBackendService::new();

        backend
            .expect_fetch_available_slots()
            .once()
            .withf(move |requested, day| *requested == salon_id && *day == date(2026, 10, 17))
            .return_once(|_, _| Ok(vec![time(9, 0, 0, 0), time(9, 30, 0, 0)]));

        let context = context(backend, MockCatalogService::new(), store, true);

        context.cart().add_service(&service("Facial", "1200"), &salon).await?;

        let mut out = Vec::new();

        run(SlotsArgs { date: date(2026, 10, 17) }, &context, &mut out).await?;

        assert_eq!(String::from_utf8(out)?, "09:00\n09:30\n");

        Ok(())
    }

    #[tokio::test]
    async fn empty_cart_has_no_salon_to_ask() {
        let mut backend = MockBackendService::new();

        backend.expect_fetch_available_slots().never();

        let context = context(backend, MockCatalogService::new(), Arc::new(MemoryStore::new()), true);

        let result = run(SlotsArgs { date: date(2026, 10, 17) }, &context, &mut Vec::new()).await;

        assert!(matches!(result, Err(CliError::EmptyCart)), "got {result:?}");
    }

    #[tokio::test]
    async fn backend_message_is_surfaced() -> TestResult {
        let salon = salon("Salon A");
        let mut backend = MockBackendService::new();

        backend
            .expect_fetch_available_slots()
            .once()
            .return_once(|_, _| Err(BackendError::rejected("Salon is closed on this day")));

        let context = context(backend, MockCatalogService::new(), Arc::new(MemoryStore::new()), true);

        context.cart().add_service(&service("Facial", "1200"), &salon).await?;

        let result = run(SlotsArgs { date: date(2026, 10, 18) }, &context, &mut Vec::new()).await;
        let message = result.err().map(|error| error.to_string());

        assert_eq!(message.as_deref(), Some("Salon is closed on this day"));

        Ok(())
    }
}
