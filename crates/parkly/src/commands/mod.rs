//! Command dispatch: bridges CLI args -> service calls -> output formatting.

pub mod config_cmd;
pub mod fee;
pub mod lots;
pub mod occupancy;
pub mod payments;
pub mod reservations;
pub mod shifts;
pub mod subscriptions;
pub mod tariffs;
pub mod util;
pub mod vehicles;

use clap::CommandFactory;

use parkly_core::{LotId, ParkingService};

use crate::cli::{
    Cli, Command, GlobalOpts, LotsArgs, PaymentsArgs, ReservationsArgs, ShiftsArgs, SpacesArgs,
    SubscriptionsArgs, SubscriptionsCommand, TariffsArgs, VehiclesArgs,
};
use crate::error::CliError;

/// A command that needs a configured backend.
#[derive(Debug)]
pub enum BackendCommand {
    Lots(LotsArgs),
    Spaces(SpacesArgs),
    Occupancy,
    Tariffs(TariffsArgs),
    Vehicles(VehiclesArgs),
    Subscriptions(SubscriptionsArgs),
    Shifts(ShiftsArgs),
    Reservations(ReservationsArgs),
    Payments(PaymentsArgs),
}

/// Run the commands that work without a backend (config, completions and
/// the calculators). Anything else is handed back for [`dispatch`].
pub fn run_offline(cmd: Command, global: &GlobalOpts) -> Result<Option<BackendCommand>, CliError> {
    let backend = match cmd {
        Command::Config(args) => {
            config_cmd::handle(args, global)?;
            return Ok(None);
        }
        Command::Completions(args) => {
            let mut cmd = Cli::command();
            clap_complete::generate(args.shell, &mut cmd, "parkly", &mut std::io::stdout());
            return Ok(None);
        }
        Command::Fee(args) => {
            fee::handle(&args, global)?;
            return Ok(None);
        }
        Command::Subscriptions(SubscriptionsArgs {
            command:
                SubscriptionsCommand::Expiry {
                    start,
                    period,
                    quantity,
                },
        }) => {
            subscriptions::expiry(&start, period, quantity, global)?;
            return Ok(None);
        }

        Command::Lots(args) => BackendCommand::Lots(args),
        Command::Spaces(args) => BackendCommand::Spaces(args),
        Command::Occupancy => BackendCommand::Occupancy,
        Command::Tariffs(args) => BackendCommand::Tariffs(args),
        Command::Vehicles(args) => BackendCommand::Vehicles(args),
        Command::Subscriptions(args) => BackendCommand::Subscriptions(args),
        Command::Shifts(args) => BackendCommand::Shifts(args),
        Command::Reservations(args) => BackendCommand::Reservations(args),
        Command::Payments(args) => BackendCommand::Payments(args),
    };
    Ok(Some(backend))
}

/// Dispatch a backend-bound command to its handler.
pub async fn dispatch(
    cmd: BackendCommand,
    service: &ParkingService,
    lot: Option<LotId>,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        BackendCommand::Lots(args) => lots::handle_lots(service, args, global).await,
        BackendCommand::Spaces(args) => lots::handle_spaces(service, lot, args, global).await,
        BackendCommand::Occupancy => occupancy::handle(service, lot, global).await,
        BackendCommand::Tariffs(args) => tariffs::handle(service, lot, args, global).await,
        BackendCommand::Vehicles(args) => vehicles::handle(service, lot, args, global).await,
        BackendCommand::Subscriptions(args) => {
            subscriptions::handle(service, lot, args, global).await
        }
        BackendCommand::Shifts(args) => shifts::handle(service, lot, args, global).await,
        BackendCommand::Reservations(args) => {
            reservations::handle(service, lot, args, global).await
        }
        BackendCommand::Payments(args) => payments::handle(service, lot, args, global).await,
    }
}
