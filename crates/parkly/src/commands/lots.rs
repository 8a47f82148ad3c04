//! Lot and space command handlers.

use tabled::Tabled;

use parkly_core::{LotId, ParkingLot, ParkingService, Space, VehicleSegment};

use crate::cli::{GlobalOpts, LotsArgs, LotsCommand, SpacesArgs, SpacesCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct LotRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Address")]
    address: String,
    #[tabled(rename = "Capacity")]
    capacity: String,
}

impl From<&ParkingLot> for LotRow {
    fn from(l: &ParkingLot) -> Self {
        Self {
            id: l.id.to_string(),
            name: l.name.clone(),
            address: l.address.clone().unwrap_or_default(),
            capacity: l.capacity.map(|c| c.to_string()).unwrap_or_default(),
        }
    }
}

#[derive(Tabled)]
struct SpaceRow {
    #[tabled(rename = "#")]
    number: i32,
    #[tabled(rename = "Segment")]
    segment: &'static str,
    #[tabled(rename = "Template")]
    template: String,
    #[tabled(rename = "Zone")]
    zone: String,
}

impl From<&Space> for SpaceRow {
    fn from(s: &Space) -> Self {
        Self {
            number: s.number,
            segment: s.segment.label(),
            template: s.template_id.map(|t| t.to_string()).unwrap_or_default(),
            zone: s.zone.clone().unwrap_or_default(),
        }
    }
}

// ── Handlers ────────────────────────────────────────────────────────

pub async fn handle_lots(
    service: &ParkingService,
    args: LotsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        LotsCommand::List => {
            let lots = service.lots().await?;
            let out = output::render_list(
                &global.output,
                &lots,
                |l| LotRow::from(l),
                |l| l.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}

pub async fn handle_spaces(
    service: &ParkingService,
    lot: Option<LotId>,
    args: SpacesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let lot = util::require_lot(lot)?;
    match args.command {
        SpacesCommand::List { segment } => {
            let segment = segment.map(VehicleSegment::from);
            let spaces: Vec<Space> = service
                .spaces(lot)
                .await?
                .into_iter()
                .filter(|s| segment.is_none_or(|seg| s.segment == seg))
                .collect();
            let out = output::render_list(
                &global.output,
                &spaces,
                |s| SpaceRow::from(s),
                |s| s.number.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
