//! Shared helpers for command handlers.

use std::io::IsTerminal;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeDelta, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use parkly_core::{
    LotId, PaymentMethod, PeriodType, ReservationStatus, SubscriptionPeriod, VehicleSegment,
};

use crate::cli::{MethodArg, PeriodArg, ReservationStatusArg, SegmentArg, SubscriptionPeriodArg};
use crate::error::CliError;

/// The lot a command operates on, or `NoLot`.
pub fn require_lot(lot: Option<LotId>) -> Result<LotId, CliError> {
    lot.ok_or(CliError::NoLot)
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
///
/// Without a terminal there is nobody to ask, so the action is refused.
pub fn confirm(message: &str, action: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: action.into(),
        });
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

// ── Value parsing ───────────────────────────────────────────────────

/// Parse an instant: RFC 3339, or `YYYY-MM-DD HH:MM[:SS]` / `YYYY-MM-DDTHH:MM[:SS]`
/// read as UTC. `None` means now.
pub fn parse_instant(field: &str, raw: Option<&str>) -> Result<DateTime<Utc>, CliError> {
    let Some(raw) = raw else {
        return Ok(Utc::now());
    };
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    for fmt in [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
    ] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Ok(naive.and_utc());
        }
    }
    Err(CliError::Validation {
        field: field.into(),
        reason: format!("expected RFC 3339 or 'YYYY-MM-DD HH:MM', got '{raw}'"),
    })
}

/// Parse a calendar day. `None` means today (UTC).
pub fn parse_day(field: &str, raw: Option<&str>) -> Result<NaiveDate, CliError> {
    let Some(raw) = raw else {
        return Ok(Utc::now().date_naive());
    };
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| CliError::Validation {
        field: field.into(),
        reason: format!("expected YYYY-MM-DD, got '{raw}'"),
    })
}

pub fn parse_money(field: &str, raw: &str) -> Result<Decimal, CliError> {
    let value = Decimal::from_str(raw.trim()).map_err(|_| CliError::Validation {
        field: field.into(),
        reason: format!("expected an amount, got '{raw}'"),
    })?;
    if value.is_sign_negative() {
        return Err(CliError::Validation {
            field: field.into(),
            reason: "amount cannot be negative".into(),
        });
    }
    Ok(value)
}

pub fn parse_employee(raw: &str) -> Result<Uuid, CliError> {
    Uuid::parse_str(raw.trim()).map_err(|_| CliError::Validation {
        field: "employee".into(),
        reason: format!("expected a UUID, got '{raw}'"),
    })
}

// ── Display helpers ─────────────────────────────────────────────────

/// `2h 05m`, `3d 4h 00m`.
pub fn format_duration(delta: TimeDelta) -> String {
    let minutes = delta.num_minutes().max(0);
    let days = minutes / (24 * 60);
    let hours = (minutes / 60) % 24;
    let mins = minutes % 60;
    if days > 0 {
        format!("{days}d {hours}h {mins:02}m")
    } else {
        format!("{hours}h {mins:02}m")
    }
}

pub fn format_instant(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M").to_string()
}

// ── Arg → domain conversions ────────────────────────────────────────

impl From<PeriodArg> for PeriodType {
    fn from(arg: PeriodArg) -> Self {
        match arg {
            PeriodArg::Hour => PeriodType::Hour,
            PeriodArg::Day => PeriodType::Day,
            PeriodArg::Week => PeriodType::Week,
            PeriodArg::Month => PeriodType::Month,
        }
    }
}

impl From<SubscriptionPeriodArg> for SubscriptionPeriod {
    fn from(arg: SubscriptionPeriodArg) -> Self {
        match arg {
            SubscriptionPeriodArg::Weekly => SubscriptionPeriod::Weekly,
            SubscriptionPeriodArg::Monthly => SubscriptionPeriod::Monthly,
        }
    }
}

impl From<SegmentArg> for VehicleSegment {
    fn from(arg: SegmentArg) -> Self {
        match arg {
            SegmentArg::Car => VehicleSegment::Car,
            SegmentArg::Motorcycle => VehicleSegment::Motorcycle,
            SegmentArg::Truck => VehicleSegment::Truck,
        }
    }
}

impl From<MethodArg> for PaymentMethod {
    fn from(arg: MethodArg) -> Self {
        match arg {
            MethodArg::Cash => PaymentMethod::Cash,
            MethodArg::Transfer => PaymentMethod::Transfer,
            MethodArg::Card => PaymentMethod::Card,
            MethodArg::Qr => PaymentMethod::Qr,
        }
    }
}

impl From<ReservationStatusArg> for ReservationStatus {
    fn from(arg: ReservationStatusArg) -> Self {
        match arg {
            ReservationStatusArg::Pending => ReservationStatus::Pending,
            ReservationStatusArg::Confirmed => ReservationStatus::Confirmed,
            ReservationStatusArg::Active => ReservationStatus::Active,
            ReservationStatusArg::Completed => ReservationStatus::Completed,
            ReservationStatusArg::Cancelled => ReservationStatus::Cancelled,
            ReservationStatusArg::Expired => ReservationStatus::Expired,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn instants_accept_rfc3339_and_short_forms() {
        let expected = Utc.with_ymd_and_hms(2024, 3, 10, 9, 30, 0).unwrap();
        assert_eq!(parse_instant("at", Some("2024-03-10T09:30:00Z")).unwrap(), expected);
        assert_eq!(parse_instant("at", Some("2024-03-10 09:30")).unwrap(), expected);
        assert_eq!(
            parse_instant("at", Some("2024-03-10T11:30:00+02:00")).unwrap(),
            expected
        );
        assert!(parse_instant("at", Some("yesterday")).is_err());
    }

    #[test]
    fn money_rejects_negative_amounts() {
        assert_eq!(parse_money("cash", "1500.50").unwrap(), Decimal::new(150_050, 2));
        assert!(parse_money("cash", "-1").is_err());
        assert!(parse_money("cash", "lots").is_err());
    }

    #[test]
    fn durations_render_compactly() {
        assert_eq!(format_duration(TimeDelta::minutes(125)), "2h 05m");
        assert_eq!(format_duration(TimeDelta::minutes(3 * 1440 + 240)), "3d 4h 00m");
        assert_eq!(format_duration(TimeDelta::minutes(-5)), "0h 00m");
    }

    #[test]
    fn missing_lot_is_reported() {
        assert!(matches!(require_lot(None), Err(CliError::NoLot)));
        assert_eq!(require_lot(Some(LotId::new(4))).unwrap(), LotId::new(4));
    }
}
