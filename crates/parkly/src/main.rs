mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use parkly_core::ParkingService;

use crate::cli::Cli;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let Some(cmd) = commands::run_offline(cli.command, &cli.global)? else {
        return Ok(());
    };

    let cfg = config::load_config_or_default();
    let resolved = config::resolve(&cli.global, &cfg)?;
    let service = ParkingService::new(&resolved.backend)?;

    tracing::debug!(command = ?cmd, lot = ?resolved.lot, "dispatching command");
    commands::dispatch(cmd, &service, resolved.lot, &cli.global).await
}
