//! Vehicle entry / exit handlers.

use chrono::{DateTime, Utc};
use tabled::Tabled;

use parkly_core::{
    EntryRequest, ExitQuote, ExitReceipt, ExitRequest, LotId, Occupancy, ParkingService,
    PaymentMethod, PeriodType,
};

use crate::cli::{GlobalOpts, VehiclesArgs, VehiclesCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct OccupancyRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Plate")]
    plate: String,
    #[tabled(rename = "Space")]
    space: i32,
    #[tabled(rename = "Entered")]
    entered: String,
    #[tabled(rename = "Exited")]
    exited: String,
    #[tabled(rename = "Stay")]
    stay: String,
    #[tabled(rename = "Billing")]
    period: String,
}

fn occupancy_row(o: &Occupancy, now: DateTime<Utc>) -> OccupancyRow {
    OccupancyRow {
        id: o.id,
        plate: o.plate.clone(),
        space: o.space,
        entered: util::format_instant(o.entered_at),
        exited: o.exited_at.map(util::format_instant).unwrap_or_default(),
        stay: util::format_duration(o.duration(now)),
        period: o.period.to_string(),
    }
}

fn occupancy_detail(o: &Occupancy) -> String {
    [
        format!("Occupancy: {}", o.id),
        format!("Plate:     {}", o.plate),
        format!("Space:     {}", o.space),
        format!("Entered:   {}", util::format_instant(o.entered_at)),
        format!("Billing:   {}", o.period),
    ]
    .join("\n")
}

fn quote_detail(q: &ExitQuote) -> String {
    [
        format!("Plate:      {}", q.occupancy.plate),
        format!("Space:      {}", q.space.number),
        format!("Entered:    {}", util::format_instant(q.occupancy.entered_at)),
        format!("Exit:       {}", util::format_instant(q.exit_at)),
        format!("Stay:       {}", util::format_duration(q.elapsed())),
        format!("Tariff:     {} ({})", q.tariff.id, q.tariff.target),
        format!(
            "Charge:     {} x {} {} = {}",
            q.fee.units, q.fee.unit_price, q.fee.period, q.fee.amount
        ),
    ]
    .join("\n")
}

fn receipt_detail(r: &ExitReceipt) -> String {
    [
        format!("Plate:    {}", r.occupancy.plate),
        format!("Space:    {}", r.occupancy.space),
        format!("Paid:     {} ({})", r.payment.amount, r.payment.method),
        format!("Payment:  {}", r.payment.id),
        format!("Units:    {} {}", r.fee.units, r.fee.period),
    ]
    .join("\n")
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    service: &ParkingService,
    lot: Option<LotId>,
    args: VehiclesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let lot = util::require_lot(lot)?;
    match args.command {
        VehiclesCommand::List { since, limit } => {
            let now = Utc::now();
            let stays = match since {
                Some(raw) => {
                    let since = util::parse_instant("since", Some(&raw))?;
                    service.occupancy_history(lot, since, limit).await?
                }
                None => service.open_occupancies(lot).await?,
            };
            let out = output::render_list(
                &global.output,
                &stays,
                |o| occupancy_row(o, now),
                |o| o.plate.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        VehiclesCommand::Entry {
            plate,
            space,
            period,
            at,
        } => {
            let req = EntryRequest {
                lot,
                space,
                plate,
                period: PeriodType::from(period),
                at: util::parse_instant("at", at.as_deref())?,
            };
            let occupancy = service.register_entry(&req).await?;
            let out = output::render_single(&global.output, &occupancy, occupancy_detail, |o| {
                o.id.to_string()
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        VehiclesCommand::Quote { plate, at } => {
            let at = util::parse_instant("at", at.as_deref())?;
            let quote = service.quote_exit(lot, &plate, at).await?;
            let out = output::render_single(&global.output, &quote, quote_detail, |q| {
                q.fee.amount.to_string()
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        VehiclesCommand::Exit { plate, method, at } => {
            let at = util::parse_instant("at", at.as_deref())?;
            let method = PaymentMethod::from(method);

            let quote = service.quote_exit(lot, &plate, at).await?;
            if !util::confirm(
                &format!(
                    "Charge {} ({}) for {} and close the stay?",
                    quote.fee.amount, method, quote.occupancy.plate
                ),
                "vehicles exit",
                global.yes,
            )? {
                return Ok(());
            }

            let receipt = service
                .register_exit(&ExitRequest {
                    lot,
                    plate,
                    method,
                    at,
                })
                .await?;
            let out = output::render_single(&global.output, &receipt, receipt_detail, |r| {
                r.payment.id.to_string()
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
