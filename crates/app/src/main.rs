//! Salon Booking CLI

use std::{io, process};

use salon_booking_app::{context::AppContext, observability};

use crate::cli::Cli;

mod cli;

#[tokio::main]
pub async fn main() {
    let cli = match Cli::load() {
        Ok(cli) => cli,
        Err(error) => error.exit(),
    };

    #[expect(
        clippy::print_stderr,
        reason = "errors before and after the command runs go straight to the terminal"
    )]
    let report = |error: &dyn std::error::Error| eprintln!("{error}");

    if let Err(error) = observability::init_logging(&cli.config.logging) {
        report(&error);
        process::exit(1);
    }

    let context = match AppContext::from_config(&cli.config) {
        Ok(context) => context,
        Err(error) => {
            report(&error);
            process::exit(1);
        }
    };

    if let Err(error) = cli.run(&context, &mut io::stdout()).await {
        report(&error);
        process::exit(1);
    }
}
