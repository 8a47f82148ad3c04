//! Reservation handlers.

use chrono::Utc;
use tabled::Tabled;

use parkly_core::{
    CreateReservationRequest, LotId, ParkingService, Reservation, ReservationStatus,
};

use crate::cli::{GlobalOpts, ReservationsArgs, ReservationsCommand};
use crate::error::CliError;
use crate::output::{self, Tone};

use super::util;

#[derive(Tabled)]
struct ReservationRow {
    #[tabled(rename = "Code")]
    code: String,
    #[tabled(rename = "Space")]
    space: i32,
    #[tabled(rename = "Plate")]
    plate: String,
    #[tabled(rename = "From")]
    starts_at: String,
    #[tabled(rename = "To")]
    ends_at: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

fn status_tone(status: ReservationStatus) -> Tone {
    match status {
        ReservationStatus::Confirmed | ReservationStatus::Active => Tone::Good,
        ReservationStatus::Pending => Tone::Warn,
        ReservationStatus::Cancelled | ReservationStatus::Expired => Tone::Bad,
        ReservationStatus::Completed => Tone::Muted,
    }
}

fn reservation_row(r: &Reservation, color: bool) -> ReservationRow {
    ReservationRow {
        code: r.code.clone(),
        space: r.space,
        plate: r.plate.clone(),
        starts_at: util::format_instant(r.starts_at),
        ends_at: util::format_instant(r.ends_at),
        status: output::paint(&r.status.to_string(), status_tone(r.status), color),
        amount: r.amount.to_string(),
    }
}

fn detail(r: &Reservation) -> String {
    [
        format!("Reservation: {}", r.code),
        format!("Space:       {}", r.space),
        format!("Plate:       {}", r.plate),
        format!(
            "Window:      {} .. {}",
            util::format_instant(r.starts_at),
            util::format_instant(r.ends_at)
        ),
        format!("Status:      {}", r.status),
        format!("Amount:      {}", r.amount),
    ]
    .join("\n")
}

pub async fn handle(
    service: &ParkingService,
    lot: Option<LotId>,
    args: ReservationsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let lot = util::require_lot(lot)?;
    match args.command {
        ReservationsCommand::List { status } => {
            let reservations = service
                .reservations(lot, status.map(ReservationStatus::from))
                .await?;
            let color = output::should_color(&global.color);
            let out = output::render_list(
                &global.output,
                &reservations,
                |r| reservation_row(r, color),
                |r| r.code.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ReservationsCommand::Create {
            space,
            plate,
            from,
            to,
        } => {
            let req = CreateReservationRequest {
                lot,
                space,
                plate,
                starts_at: util::parse_instant("from", Some(&from))?,
                ends_at: util::parse_instant("to", Some(&to))?,
                at: Utc::now(),
            };
            let reservation = service.create_reservation(&req).await?;
            let out = output::render_single(&global.output, &reservation, detail, |r| {
                r.code.clone()
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ReservationsCommand::Cancel { code } => {
            if !util::confirm(
                &format!("Cancel reservation {code}?"),
                "reservations cancel",
                global.yes,
            )? {
                return Ok(());
            }
            let reservation = service.cancel_reservation(lot, &code).await?;
            output::notice(
                &format!("Reservation {} cancelled", reservation.code),
                global.quiet,
            );
            Ok(())
        }
    }
}
