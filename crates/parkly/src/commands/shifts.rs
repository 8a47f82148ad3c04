//! Cashier shift handlers.

use chrono::Utc;
use tabled::Tabled;

use parkly_core::{CloseShiftRequest, LotId, OpenShiftRequest, ParkingService, Shift};

use crate::cli::{GlobalOpts, ShiftsArgs, ShiftsCommand};
use crate::error::CliError;
use crate::output::{self, Tone};

use super::util;

#[derive(Tabled)]
struct ShiftRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Employee")]
    employee: String,
    #[tabled(rename = "State")]
    state: String,
    #[tabled(rename = "Opened")]
    opened: String,
    #[tabled(rename = "Closed")]
    closed: String,
    #[tabled(rename = "Opening cash")]
    opening_cash: String,
    #[tabled(rename = "Closing cash")]
    closing_cash: String,
}

fn shift_row(s: &Shift, color: bool) -> ShiftRow {
    let tone = if s.is_open() { Tone::Good } else { Tone::Muted };
    ShiftRow {
        id: s.id,
        employee: s.employee.to_string(),
        state: output::paint(&s.state.to_string(), tone, color),
        opened: util::format_instant(s.opened_at),
        closed: s.closed_at.map(util::format_instant).unwrap_or_default(),
        opening_cash: s.opening_cash.to_string(),
        closing_cash: s.closing_cash.map(|c| c.to_string()).unwrap_or_default(),
    }
}

fn detail(s: &Shift) -> String {
    let mut lines = vec![
        format!("Shift:        {}", s.id),
        format!("Employee:     {}", s.employee),
        format!("State:        {}", s.state),
        format!("Opened:       {}", util::format_instant(s.opened_at)),
        format!("Opening cash: {}", s.opening_cash),
    ];
    if let Some(closed) = s.closed_at {
        lines.push(format!("Closed:       {}", util::format_instant(closed)));
    }
    if let Some(delta) = s.cash_delta() {
        lines.push(format!("Cash delta:   {delta}"));
    }
    if let Some(ref notes) = s.notes {
        lines.push(format!("Notes:        {notes}"));
    }
    lines.join("\n")
}

pub async fn handle(
    service: &ParkingService,
    lot: Option<LotId>,
    args: ShiftsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let lot = util::require_lot(lot)?;
    match args.command {
        ShiftsCommand::List { employee, limit } => {
            let employee = employee.as_deref().map(util::parse_employee).transpose()?;
            let shifts = service.shifts(lot, employee, limit).await?;
            let color = output::should_color(&global.color);
            let out = output::render_list(
                &global.output,
                &shifts,
                |s| shift_row(s, color),
                |s| s.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ShiftsCommand::Open { employee, cash } => {
            let req = OpenShiftRequest {
                lot,
                employee: util::parse_employee(&employee)?,
                opening_cash: util::parse_money("cash", &cash)?,
                at: Utc::now(),
            };
            let shift = service.open_shift(&req).await?;
            let out =
                output::render_single(&global.output, &shift, detail, |s| s.id.to_string())?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ShiftsCommand::Close {
            employee,
            cash,
            notes,
        } => {
            let req = CloseShiftRequest {
                lot,
                employee: util::parse_employee(&employee)?,
                closing_cash: util::parse_money("cash", &cash)?,
                notes,
                at: Utc::now(),
            };
            let shift = service.close_shift(&req).await?;
            let out =
                output::render_single(&global.output, &shift, detail, |s| s.id.to_string())?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
