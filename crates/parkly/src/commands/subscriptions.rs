//! Subscription command handlers.

use chrono::{NaiveDate, Utc};
use serde::Serialize;
use tabled::Tabled;

use parkly_core::{
    CreateSubscriptionRequest, LotId, ParkingService, PaymentMethod, RenewSubscriptionRequest,
    Subscription, SubscriptionPeriod, SubscriptionReceipt, VehicleSegment, extend_period,
};

use crate::cli::{GlobalOpts, SubscriptionPeriodArg, SubscriptionsArgs, SubscriptionsCommand};
use crate::error::CliError;
use crate::output::{self, Tone};

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct SubscriptionRow {
    #[tabled(rename = "#")]
    number: i64,
    #[tabled(rename = "Holder")]
    holder: String,
    #[tabled(rename = "Plate")]
    plate: String,
    #[tabled(rename = "Segment")]
    segment: &'static str,
    #[tabled(rename = "Period")]
    period: String,
    #[tabled(rename = "From")]
    starts_on: NaiveDate,
    #[tabled(rename = "Until")]
    ends_on: NaiveDate,
    #[tabled(rename = "Days left")]
    remaining: String,
}

fn subscription_row(s: &Subscription, today: NaiveDate, color: bool) -> SubscriptionRow {
    let days = s.days_remaining(today);
    let tone = match days {
        0 => Tone::Bad,
        1..=3 => Tone::Warn,
        _ => Tone::Good,
    };
    let remaining = if days == 0 {
        "expired".to_owned()
    } else {
        days.to_string()
    };
    SubscriptionRow {
        number: s.number,
        holder: s.holder.clone(),
        plate: s.plate.clone(),
        segment: s.segment.label(),
        period: s.period.to_string(),
        starts_on: s.starts_on,
        ends_on: s.ends_on,
        remaining: output::paint(&remaining, tone, color),
    }
}

fn receipt_detail(r: &SubscriptionReceipt) -> String {
    let s = &r.subscription;
    [
        format!("Subscription: {}", s.number),
        format!("Holder:       {}", s.holder),
        format!("Plate:        {} ({})", s.plate, s.segment.label()),
        format!("Valid:        {} .. {}", s.starts_on, s.ends_on),
        format!(
            "Charged:      {} x {} {} = {}",
            r.fee.units, r.fee.unit_price, r.fee.period, r.fee.amount
        ),
        format!("Payment:      {} ({})", r.payment.id, r.payment.method),
    ]
    .join("\n")
}

// ── Offline expiry ──────────────────────────────────────────────────

#[derive(Serialize)]
struct Expiry {
    starts_on: NaiveDate,
    period: SubscriptionPeriod,
    quantity: u32,
    ends_on: NaiveDate,
}

/// End date of `quantity` periods from `start`, without the backend.
pub fn expiry(
    start: &str,
    period: SubscriptionPeriodArg,
    quantity: u32,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let starts_on = util::parse_day("start", Some(start))?;
    let period = SubscriptionPeriod::from(period);
    let ends_on = extend_period(starts_on, period, quantity)?;
    let result = Expiry {
        starts_on,
        period,
        quantity,
        ends_on,
    };
    let out = output::render_single(
        &global.output,
        &result,
        |e| format!("{} + {} {} = {}", e.starts_on, e.quantity, e.period, e.ends_on),
        |e| e.ends_on.to_string(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    service: &ParkingService,
    lot: Option<LotId>,
    args: SubscriptionsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let today = Utc::now().date_naive();

    match args.command {
        SubscriptionsCommand::Expiry {
            start,
            period,
            quantity,
        } => expiry(&start, period, quantity, global),

        SubscriptionsCommand::List { active } => {
            let lot = util::require_lot(lot)?;
            let subs = service
                .subscriptions(lot, active.then_some(today))
                .await?;
            let color = output::should_color(&global.color);
            let out = output::render_list(
                &global.output,
                &subs,
                |s| subscription_row(s, today, color),
                |s| s.number.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        SubscriptionsCommand::Create {
            holder,
            plate,
            segment,
            period,
            quantity,
            starts_on,
            method,
        } => {
            let lot = util::require_lot(lot)?;
            let req = CreateSubscriptionRequest {
                lot,
                holder,
                plate,
                segment: VehicleSegment::from(segment),
                period: SubscriptionPeriod::from(period),
                quantity,
                starts_on: util::parse_day("starts-on", starts_on.as_deref())?,
                method: PaymentMethod::from(method),
                at: Utc::now(),
            };
            let receipt = service.create_subscription(&req).await?;
            let out = output::render_single(&global.output, &receipt, receipt_detail, |r| {
                r.subscription.number.to_string()
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        SubscriptionsCommand::Renew {
            number,
            quantity,
            method,
        } => {
            let lot = util::require_lot(lot)?;
            let req = RenewSubscriptionRequest {
                lot,
                number,
                quantity,
                method: PaymentMethod::from(method),
                at: Utc::now(),
            };
            let receipt = service.renew_subscription(&req).await?;
            let out = output::render_single(&global.output, &receipt, receipt_detail, |r| {
                r.subscription.ends_on.to_string()
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
