use std::{io::Write, sync::Arc};

use clap::{Args, Subcommand};
use salon_booking::{
    cart::{AddOutcome, parse_quantity},
    ids::{SalonUuid, ServiceUuid},
    prompt::FixedAnswer,
};
use salon_booking_app::{context::AppContext, summary};
use tracing::debug;

use super::CliError;

#[derive(Debug, Args)]
pub(crate) struct CartCommand {
    #[command(subcommand)]
    command: CartSubcommand,
}

#[derive(Debug, Subcommand)]
enum CartSubcommand {
    /// Show the cart and its totals
    Show,

    /// Add one unit of a salon's service
    Add(AddArgs),

    /// Remove a service from the cart
    Remove(ServiceArgs),

    /// Set a service's quantity; 0 removes it
    Update(UpdateArgs),

    /// Empty the cart
    Clear,
}

#[derive(Debug, Args)]
pub(crate) struct AddArgs {
    /// Salon offering the service
    #[arg(long)]
    salon: SalonUuid,

    /// Service to add
    #[arg(long)]
    service: ServiceUuid,

    /// Replace a cart from another salon without asking
    #[arg(short, long)]
    yes: bool,
}

#[derive(Debug, Args)]
pub(crate) struct ServiceArgs {
    /// Service in the cart
    service: ServiceUuid,
}

#[derive(Debug, Args)]
pub(crate) struct UpdateArgs {
    /// Service in the cart
    service: ServiceUuid,

    /// New quantity
    #[arg(allow_hyphen_values = true)]
    quantity: String,
}

pub(crate) async fn run(
    command: CartCommand,
    context: &AppContext,
    out: &mut impl Write,
) -> Result<(), CliError> {
    match command.command {
        CartSubcommand::Show => show(context, out),
        CartSubcommand::Add(args) => add(args, context, out).await,
        CartSubcommand::Remove(args) => remove(&args, context, out),
        CartSubcommand::Update(args) => update(&args, context, out),
        CartSubcommand::Clear => clear(context, out),
    }
}

fn show(context: &AppContext, out: &mut impl Write) -> Result<(), CliError> {
    summary::write_cart(out, &context.cart())?;

    Ok(())
}

async fn add(args: AddArgs, context: &AppContext, out: &mut impl Write) -> Result<(), CliError> {
    let context = if args.yes {
        context.clone().with_prompt(Arc::new(FixedAnswer(true)))
    } else {
        context.clone()
    };

    let (salon, services) = tokio::try_join!(
        context.catalog.get_salon(args.salon),
        context.catalog.get_services(args.salon)
    )?;

    let service = services
        .iter()
        .find(|service| service.id == args.service)
        .ok_or(CliError::UnknownService {
            salon: args.salon,
            service: args.service,
        })?;

    let mut cart = context.cart();

    match cart.add_service(service, &salon).await? {
        AddOutcome::Added => {
            writeln!(out, "Added {} from {} to your cart.", service.name, salon.name)?;
        }
        AddOutcome::Incremented => {
            let quantity = cart
                .items()
                .iter()
                .find(|item| item.service_id() == service.id)
                .map_or(1, |item| item.quantity().get());

            writeln!(out, "Added another {} (quantity {quantity}).", service.name)?;
        }
        AddOutcome::Declined => {
            debug!(salon = %salon.id, "salon switch declined");
            writeln!(out, "Kept your current cart.")?;
        }
    }

    Ok(())
}

fn remove(args: &ServiceArgs, context: &AppContext, out: &mut impl Write) -> Result<(), CliError> {
    let mut cart = context.cart();

    let Some(name) = cart
        .items()
        .iter()
        .find(|item| item.service_id() == args.service)
        .map(|item| item.name().to_string())
    else {
        writeln!(out, "That service is not in your cart.")?;
        return Ok(());
    };

    cart.remove_service(args.service)?;

    writeln!(out, "Removed {name} from your cart.")?;

    Ok(())
}

fn update(args: &UpdateArgs, context: &AppContext, out: &mut impl Write) -> Result<(), CliError> {
    let quantity = parse_quantity(&args.quantity)?;
    let mut cart = context.cart();

    cart.update_quantity(args.service, quantity)?;

    summary::write_cart(out, &cart)?;

    Ok(())
}

fn clear(context: &AppContext, out: &mut impl Write) -> Result<(), CliError> {
    context.cart().clear_cart()?;

    writeln!(out, "Your cart is empty.")?;

    Ok(())
}
