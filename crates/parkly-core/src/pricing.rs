// ── Tariff resolution and fee calculation ──
//
// Pure functions over rows already fetched from the backend. Callers pass
// `now` explicitly so results never depend on the wall clock.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::model::{LotId, PeriodType, TariffEntry, TariffTarget};

/// Pick the tariff in force for `(lot, target, period)` at `now`.
///
/// Rows whose `effective_from` lies after `now` are ignored. Among the
/// rest the latest `effective_from` wins; rows sharing a date are ordered
/// by id, highest first, so the most recently inserted row is used.
pub fn resolve_tariff<'a>(
    entries: &'a [TariffEntry],
    lot: LotId,
    target: TariffTarget,
    period: PeriodType,
    now: DateTime<Utc>,
) -> Result<&'a TariffEntry, CoreError> {
    entries
        .iter()
        .filter(|e| e.lot == lot && e.target == target && e.period == period)
        .filter(|e| e.effective_from <= now)
        .max_by(|a, b| {
            a.effective_from
                .cmp(&b.effective_from)
                .then(a.id.cmp(&b.id))
        })
        .ok_or(CoreError::TariffNotFound {
            lot,
            target,
            period,
        })
}

/// Number of `unit`s to bill for a stay from `entry` to `exit`.
///
/// Partial units round up and every stay bills at least one unit, so a
/// zero-length stay costs one hour and 61 minutes cost two. An exit before
/// the entry counts as zero elapsed time.
pub fn billable_units(entry: DateTime<Utc>, exit: DateTime<Utc>, unit: PeriodType) -> i64 {
    let elapsed_ms = (exit - entry).num_milliseconds().max(0);
    let unit_ms = unit.unit().num_milliseconds();
    let units = elapsed_ms / unit_ms + i64::from(elapsed_ms % unit_ms != 0);
    units.max(1)
}

/// A computed charge with the inputs that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fee {
    pub period: PeriodType,
    pub units: i64,
    pub unit_price: Decimal,
    pub amount: Decimal,
}

/// `unit_price * units`, or `AmountOverflow` when the product does not fit.
pub fn charge(unit_price: Decimal, units: i64) -> Result<Decimal, CoreError> {
    unit_price
        .checked_mul(Decimal::from(units))
        .ok_or_else(|| CoreError::AmountOverflow {
            message: format!("{units} x {unit_price}"),
        })
}

/// Charge for a stay billed per `period` at `unit_price`.
pub fn calculate_fee(
    entry: DateTime<Utc>,
    exit: DateTime<Utc>,
    unit_price: Decimal,
    period: PeriodType,
) -> Result<Fee, CoreError> {
    let units = billable_units(entry, exit, period);
    Ok(Fee {
        period,
        units,
        unit_price,
        amount: charge(unit_price, units)?,
    })
}

/// Hourly charge: `ceil(hours) * hourly_price`, at least one hour.
pub fn hourly_fee(
    entry: DateTime<Utc>,
    exit: DateTime<Utc>,
    hourly_price: Decimal,
) -> Result<Decimal, CoreError> {
    Ok(calculate_fee(entry, exit, hourly_price, PeriodType::Hour)?.amount)
}
