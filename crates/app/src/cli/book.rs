use std::io::Write;

use clap::Args;
use jiff::civil::{Date, Time};
use salon_booking::booking::{
    BookingRequest, Confirmation, NextStep, PaymentMethod, parse_time,
};
use salon_booking_app::{context::AppContext, summary};

use super::CliError;

#[derive(Debug, Args)]
pub(crate) struct BookArgs {
    /// Appointment day (YYYY-MM-DD)
    #[arg(long)]
    date: Date,

    /// Appointment start (HH:MM), one of the listed slots
    #[arg(long, value_parser = parse_time)]
    time: Time,

    /// How to pay (online, at_shop)
    #[arg(long, default_value = "at_shop")]
    payment: PaymentMethod,

    /// Requests for the salon
    #[arg(long)]
    notes: Option<String>,
}

pub(crate) async fn run(
    args: BookArgs,
    context: &AppContext,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let mut cart = context.cart();
    let mut submitter = context.submitter();

    let next = submitter
        .submit(
            &mut cart,
            BookingRequest {
                booking_date: args.date,
                booking_time: args.time,
                payment_method: args.payment,
                notes: args.notes,
            },
        )
        .await?;

    let confirmation = match next {
        NextStep::Confirmation(booking) => Confirmation::at_shop(booking),
        NextStep::Payment(booking) => {
            writeln!(out, "Booking created, processing payment...")?;
            context.payment().pay(booking).await?
        }
    };

    summary::write_confirmation(out, &confirmation)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use jiff::civil::{date, time};
    use salon_booking::{
        backend::{BackendError, MockBackendService},
        booking::{
            BookingDraft, BookingError, BookingRecord, PaymentReceipt, PaymentRecord,
            PaymentStatus, TimeRejection,
        },
        ids::BookingUuid,
        storage::{DurableStore, MemoryStore},
    };
    use salon_booking_app::backend::MockCatalogService;
    use testresult::TestResult;

    use super::*;
    use crate::cli::test_helpers::{context, salon, service};

    fn args(booking_date: Date, booking_time: Time, payment: PaymentMethod) -> BookArgs {
        BookArgs {
            date: booking_date,
            time: booking_time,
            payment,
            notes: None,
        }
    }

    fn record(draft: &BookingDraft) -> BookingRecord {
        BookingRecord {
            id: BookingUuid::new(),
            confirmation_code: Some("BK-7F3A".to_string()),
            booking_date: draft.booking_date,
            booking_time: draft.booking_time,
            payment_method: draft.payment_method,
            total_amount: None,
            status: None,
            payment_status: None,
            salon: None,
        }
    }

    #[tokio::test]
    async fn at_shop_booking_confirms_and_empties_cart() -> TestResult {
        let store = Arc::new(MemoryStore::new());
        let mut backend = MockBackendService::new();

        backend
            .expect_create_booking()
            .once()
            .return_once(|draft| Ok(record(&draft)));
        backend.expect_process_payment().never();

        let context = context(backend, MockCatalogService::new(), store.clone(), true);

        context.cart().add_service(&service("Facial", "1200"), &salon("Salon A")).await?;

        let mut out = Vec::new();

        run(
            args(date(2026, 10, 17), time(10, 0, 0, 0), PaymentMethod::AtShop),
            &context,
            &mut out,
        )
        .await?;

        let text = String::from_utf8(out)?;

        assert!(text.starts_with("Booking confirmed.\nConfirmation code: BK-7F3A\n"), "{text}");
        assert!(text.contains("Payment: at the shop"), "{text}");
        assert!(store.get("cart")?.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn online_booking_pays_straight_away() -> TestResult {
        let mut backend = MockBackendService::new();

        backend
            .expect_create_booking()
            .once()
            .return_once(|draft| Ok(record(&draft)));
        backend
            .expect_process_payment()
            .once()
            .return_once(|_, _| {
                Ok(PaymentReceipt {
                    booking: None,
                    payment: PaymentRecord {
                        transaction_id: Some("txn_42".to_string()),
                        status: PaymentStatus::Success,
                        amount: None,
                    },
                })
            });

        let context = context(backend, MockCatalogService::new(), Arc::new(MemoryStore::new()), true);

        context.cart().add_service(&service("Facial", "1200"), &salon("Salon A")).await?;

        let mut out = Vec::new();

        run(
            args(date(2026, 10, 17), time(10, 0, 0, 0), PaymentMethod::Online),
            &context,
            &mut out,
        )
        .await?;

        let text = String::from_utf8(out)?;

        assert!(text.starts_with("Booking created, processing payment...\nBooking confirmed."), "{text}");
        assert!(text.contains("Payment: online, paid (txn_42)"), "{text}");

        Ok(())
    }

    #[tokio::test]
    async fn past_time_is_rejected_and_cart_kept() -> TestResult {
        let store = Arc::new(MemoryStore::new());
        let mut backend = MockBackendService::new();

        backend.expect_create_booking().never();

        let context = context(backend, MockCatalogService::new(), store.clone(), true);

        context.cart().add_service(&service("Facial", "1200"), &salon("Salon A")).await?;

        let result = run(
            args(date(2026, 10, 16), time(11, 0, 0, 0), PaymentMethod::AtShop),
            &context,
            &mut Vec::new(),
        )
        .await;

        assert!(
            matches!(
                result,
                Err(CliError::Booking(BookingError::InvalidTime(TimeRejection::NotInFuture)))
            ),
            "got {result:?}"
        );
        assert!(!context.cart().is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn rejected_booking_reports_fallback_message() -> TestResult {
        let mut backend = MockBackendService::new();

        backend
            .expect_create_booking()
            .once()
            .return_once(|_| Err(BackendError::Rejected { message: None }));

        let context = context(backend, MockCatalogService::new(), Arc::new(MemoryStore::new()), true);

        context.cart().add_service(&service("Facial", "1200"), &salon("Salon A")).await?;

        let result = run(
            args(date(2026, 10, 17), time(10, 0, 0, 0), PaymentMethod::AtShop),
            &context,
            &mut Vec::new(),
        )
        .await;
        let message = result.err().map(|error| error.to_string());

        assert_eq!(message.as_deref(), Some("Failed to create booking"));
        assert!(!context.cart().is_empty());

        Ok(())
    }
}
