use std::io::Write;

use clap::{Args, Subcommand};
use salon_booking::ids::BookingUuid;
use salon_booking_app::{backend::BookingStatus, context::AppContext, summary};
use tracing::info;

use super::CliError;

const LIST_FALLBACK_MESSAGE: &str = "Failed to load bookings";

const CANCEL_FALLBACK_MESSAGE: &str = "Failed to cancel booking";

const CANCEL_MESSAGE: &str = "Are you sure you want to cancel this booking?";

#[derive(Debug, Args)]
pub(crate) struct BookingsCommand {
    #[command(subcommand)]
    command: BookingsSubcommand,
}

#[derive(Debug, Subcommand)]
enum BookingsSubcommand {
    /// List your bookings
    List(ListArgs),

    /// Cancel a booking
    Cancel(CancelArgs),
}

#[derive(Debug, Args)]
pub(crate) struct ListArgs {
    /// Only show bookings with this status
    #[arg(long, value_enum)]
    status: Option<BookingStatus>,
}

#[derive(Debug, Args)]
pub(crate) struct CancelArgs {
    /// Booking to cancel
    booking: BookingUuid,

    /// Cancel without asking
    #[arg(short, long)]
    yes: bool,
}

pub(crate) async fn run(
    command: BookingsCommand,
    context: &AppContext,
    out: &mut impl Write,
) -> Result<(), CliError> {
    match command.command {
        BookingsSubcommand::List(args) => list(args, context, out).await,
        BookingsSubcommand::Cancel(args) => cancel(args, context, out).await,
    }
}

async fn list(args: ListArgs, context: &AppContext, out: &mut impl Write) -> Result<(), CliError> {
    let bookings = context
        .bookings
        .list_bookings(args.status)
        .await
        .map_err(|error| CliError::refused(&error, LIST_FALLBACK_MESSAGE))?;

    summary::write_bookings(out, &bookings)?;

    Ok(())
}

async fn cancel(args: CancelArgs, context: &AppContext, out: &mut impl Write) -> Result<(), CliError> {
    if !args.yes && !context.prompt.ask(CANCEL_MESSAGE).await {
        writeln!(out, "Kept your booking.")?;
        return Ok(());
    }

    context
        .bookings
        .cancel_booking(args.booking)
        .await
        .map_err(|error| CliError::refused(&error, CANCEL_FALLBACK_MESSAGE))?;

    info!(booking = %args.booking, "booking cancelled");

    writeln!(out, "Booking {} cancelled.", args.booking)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use jiff::civil::{date, time};
    use salon_booking::{
        backend::{BackendError, MockBackendService},
        booking::{BookingRecord, PaymentMethod},
        storage::MemoryStore,
    };
    use salon_booking_app::backend::{MockBookingsService, MockCatalogService};
    use testresult::TestResult;

    use super::*;
    use crate::cli::test_helpers::context;

    fn context_with(bookings: MockBookingsService, answer: bool) -> AppContext {
        let mut context = context(
            MockBackendService::new(),
            MockCatalogService::new(),
            Arc::new(MemoryStore::new()),
            answer,
        );

        context.bookings = Arc::new(bookings);
        context
    }

    #[tokio::test]
    async fn list_filters_by_status() -> TestResult {
        let mut bookings = MockBookingsService::new();

        bookings
            .expect_list_bookings()
            .once()
            .withf(|status| *status == Some(BookingStatus::Confirmed))
            .return_once(|_| {
                Ok(vec![BookingRecord {
                    id: BookingUuid::new(),
                    confirmation_code: Some("BK-7F3A".to_string()),
                    booking_date: date(2026, 10, 20),
                    booking_time: time(14, 30, 0, 0),
                    payment_method: PaymentMethod::Online,
                    total_amount: None,
                    status: Some("confirmed".to_string()),
                    payment_status: Some("paid".to_string()),
                    salon: None,
                }])
            });

        let context = context_with(bookings, true);
        let mut out = Vec::new();

        list(
            ListArgs {
                status: Some(BookingStatus::Confirmed),
            },
            &context,
            &mut out,
        )
        .await?;

        let text = String::from_utf8(out)?;

        assert!(text.contains("BK-7F3A"), "{text}");
        assert!(text.contains("Paid"), "{text}");

        Ok(())
    }

    #[tokio::test]
    async fn list_without_message_reports_fallback() {
        let mut bookings = MockBookingsService::new();

        bookings
            .expect_list_bookings()
            .once()
            .return_once(|_| Err(BackendError::Rejected { message: None }));

        let context = context_with(bookings, true);

        let result = list(ListArgs { status: None }, &context, &mut Vec::new()).await;
        let message = result.err().map(|error| error.to_string());

        assert_eq!(message.as_deref(), Some("Failed to load bookings"));
    }

    #[tokio::test]
    async fn declined_cancel_keeps_booking() -> TestResult {
        let mut bookings = MockBookingsService::new();

        bookings.expect_cancel_booking().never();

        let context = context_with(bookings, false);
        let mut out = Vec::new();

        cancel(
            CancelArgs {
                booking: BookingUuid::new(),
                yes: false,
            },
            &context,
            &mut out,
        )
        .await?;

        assert_eq!(String::from_utf8(out)?, "Kept your booking.\n");

        Ok(())
    }

    #[tokio::test]
    async fn confirmed_cancel_calls_backend() -> TestResult {
        let booking = BookingUuid::new();
        let mut bookings = MockBookingsService::new();

        bookings
            .expect_cancel_booking()
            .once()
            .withf(move |requested| *requested == booking)
            .return_once(|_| Ok(()));

        let context = context_with(bookings, true);
        let mut out = Vec::new();

        cancel(CancelArgs { booking, yes: false }, &context, &mut out).await?;

        assert_eq!(String::from_utf8(out)?, format!("Booking {booking} cancelled.\n"));

        Ok(())
    }

    #[tokio::test]
    async fn rejected_cancel_surfaces_message_or_fallback() {
        let mut bookings = MockBookingsService::new();
        let mut calls = 0;

        bookings.expect_cancel_booking().times(2).returning(move |_| {
            calls += 1;

            if calls == 1 {
                Err(BackendError::rejected("Booking already completed"))
            } else {
                Err(BackendError::Transport("timed out".to_string()))
            }
        });

        let context = context_with(bookings, false);
        let mut messages = Vec::new();

        for _ in 0..2 {
            let result = cancel(
                CancelArgs {
                    booking: BookingUuid::new(),
                    yes: true,
                },
                &context,
                &mut Vec::new(),
            )
            .await;

            messages.push(result.err().map(|error| error.to_string()));
        }

        assert_eq!(
            messages,
            vec![
                Some("Booking already completed".to_string()),
                Some("Failed to cancel booking".to_string()),
            ]
        );
    }
}
