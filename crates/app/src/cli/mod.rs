//! Command line interface: argument parsing and the subcommands.

use std::io::{self, Write};

use clap::{Parser, Subcommand};
use salon_booking::{
    backend::BackendError,
    booking::BookingError,
    cart::CartError,
    ids::{SalonUuid, ServiceUuid},
};
use salon_booking_app::{config::AppConfig, context::AppContext};
use thiserror::Error;
use tracing::warn;

mod book;
mod bookings;
mod cart;
mod salons;
mod slots;
#[cfg(test)]
mod test_helpers;

#[derive(Debug, Parser)]
#[command(name = "salon-booking", about = "Salon booking CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    pub(crate) config: AppConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Browse salons
    Salons(salons::SalonsCommand),

    /// Inspect and edit the cart
    Cart(cart::CartCommand),

    /// List bookable start times for the cart's salon
    Slots(slots::SlotsArgs),

    /// Book everything in the cart
    Book(book::BookArgs),

    /// List or cancel existing bookings
    Bookings(bookings::BookingsCommand),
}

/// Errors reported to the user by a command.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    #[error(transparent)]
    Cart(#[from] CartError),

    #[error(transparent)]
    Booking(#[from] BookingError),

    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error("salon {salon} does not offer service {service}")]
    UnknownService {
        salon: SalonUuid,
        service: ServiceUuid,
    },

    #[error("Your cart is empty. Add a service first.")]
    EmptyCart,

    #[error("{0}")]
    Refused(String),

    #[error("failed to write output")]
    Output(#[from] io::Error),
}

impl CliError {
    /// The backend's message for `error`, or `fallback` when it gave none.
    pub(crate) fn refused(error: &BackendError, fallback: &str) -> Self {
        warn!("request failed: {error}");

        Self::Refused(error.message().unwrap_or(fallback).to_string())
    }
}

impl Cli {
    /// Parse the command line, after loading `.env` if present.
    pub(crate) fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    pub(crate) async fn run(
        self,
        context: &AppContext,
        out: &mut impl Write,
    ) -> Result<(), CliError> {
        match self.command {
            Commands::Salons(command) => salons::run(command, context, out).await,
            Commands::Cart(command) => cart::run(command, context, out).await,
            Commands::Slots(args) => slots::run(args, context, out).await,
            Commands::Book(args) => book::run(args, context, out).await,
            Commands::Bookings(command) => bookings::run(command, context, out).await,
        }
    }
}
