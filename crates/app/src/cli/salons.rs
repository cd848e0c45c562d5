use std::io::Write;

use clap::{Args, Subcommand};
use salon_booking_app::{context::AppContext, summary};

use super::CliError;

const LIST_FALLBACK_MESSAGE: &str = "Failed to load salons";

#[derive(Debug, Args)]
pub(crate) struct SalonsCommand {
    #[command(subcommand)]
    command: SalonsSubcommand,
}

#[derive(Debug, Subcommand)]
enum SalonsSubcommand {
    /// List salons, optionally filtered by name or location
    List(ListArgs),
}

#[derive(Debug, Args)]
pub(crate) struct ListArgs {
    /// Text to search for
    #[arg(long)]
    search: Option<String>,
}

pub(crate) async fn run(
    command: SalonsCommand,
    context: &AppContext,
    out: &mut impl Write,
) -> Result<(), CliError> {
    match command.command {
        SalonsSubcommand::List(args) => list(args, context, out).await,
    }
}

async fn list(args: ListArgs, context: &AppContext, out: &mut impl Write) -> Result<(), CliError> {
    let salons = context
        .catalog
        .list_salons(args.search)
        .await
        .map_err(|error| CliError::refused(&error, LIST_FALLBACK_MESSAGE))?;

    summary::write_salons(out, &salons)?;

    Ok(())
}
