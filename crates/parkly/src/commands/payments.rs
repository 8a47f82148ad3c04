//! Payment listing.

use tabled::Tabled;

use parkly_core::{LotId, ParkingService, Payment};

use crate::cli::{GlobalOpts, PaymentsArgs, PaymentsCommand};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct PaymentRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Paid at")]
    paid_at: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Method")]
    method: String,
    #[tabled(rename = "Plate")]
    plate: String,
}

impl From<&Payment> for PaymentRow {
    fn from(p: &Payment) -> Self {
        Self {
            id: p.id,
            paid_at: util::format_instant(p.paid_at),
            amount: p.amount.to_string(),
            method: p.method.to_string(),
            plate: p.plate.clone().unwrap_or_default(),
        }
    }
}

pub async fn handle(
    service: &ParkingService,
    lot: Option<LotId>,
    args: PaymentsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let lot = util::require_lot(lot)?;
    match args.command {
        PaymentsCommand::List { since, limit } => {
            let since = since
                .as_deref()
                .map(|raw| util::parse_instant("since", Some(raw)))
                .transpose()?;
            let payments = service.payments(lot, since, limit).await?;
            let out = output::render_list(
                &global.output,
                &payments,
                |p| PaymentRow::from(p),
                |p| p.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
