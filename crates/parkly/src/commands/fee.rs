//! Offline fee calculator.

use serde::Serialize;

use parkly_core::{Fee, PeriodType, calculate_fee};

use crate::cli::{FeeArgs, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Serialize)]
struct FeeReport {
    entry: chrono::DateTime<chrono::Utc>,
    exit: chrono::DateTime<chrono::Utc>,
    #[serde(flatten)]
    fee: Fee,
}

fn detail(r: &FeeReport) -> String {
    [
        format!("Entry:  {}", util::format_instant(r.entry)),
        format!("Exit:   {}", util::format_instant(r.exit)),
        format!("Stay:   {}", util::format_duration(r.exit - r.entry)),
        format!("Units:  {} {}", r.fee.units, r.fee.period),
        format!("Price:  {}", r.fee.unit_price),
        format!("Amount: {}", r.fee.amount),
    ]
    .join("\n")
}

pub fn handle(args: &FeeArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let entry = util::parse_instant("entry", Some(&args.entry))?;
    let exit = util::parse_instant("exit", args.exit.as_deref())?;
    let price = util::parse_money("price", &args.price)?;

    let report = FeeReport {
        entry,
        exit,
        fee: calculate_fee(entry, exit, price, PeriodType::from(args.period))?,
    };
    let out = output::render_single(&global.output, &report, detail, |r| {
        r.fee.amount.to_string()
    })?;
    output::print_output(&out, global.quiet);
    Ok(())
}
