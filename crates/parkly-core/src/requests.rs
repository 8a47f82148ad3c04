// ── Typed request structs for service mutations ──
//
// Every write the service performs takes one of these. Timestamps and
// dates are explicit so callers (and tests) control the clock.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::{LotId, PaymentMethod, PeriodType, SubscriptionPeriod, VehicleSegment};

// ── Vehicles ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryRequest {
    pub lot: LotId,
    pub space: i32,
    pub plate: String,
    /// Billing unit for the stay.
    pub period: PeriodType,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExitRequest {
    pub lot: LotId,
    pub plate: String,
    pub method: PaymentMethod,
    pub at: DateTime<Utc>,
}

// ── Subscriptions ──────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSubscriptionRequest {
    pub lot: LotId,
    pub holder: String,
    pub plate: String,
    pub segment: VehicleSegment,
    pub period: SubscriptionPeriod,
    pub quantity: u32,
    pub starts_on: NaiveDate,
    pub method: PaymentMethod,
    /// Pricing instant for the tariff lookup.
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenewSubscriptionRequest {
    pub lot: LotId,
    pub number: i64,
    pub quantity: u32,
    pub method: PaymentMethod,
    pub at: DateTime<Utc>,
}

// ── Shifts ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenShiftRequest {
    pub lot: LotId,
    pub employee: Uuid,
    pub opening_cash: Decimal,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloseShiftRequest {
    pub lot: LotId,
    pub employee: Uuid,
    pub closing_cash: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub at: DateTime<Utc>,
}

// ── Reservations ───────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateReservationRequest {
    pub lot: LotId,
    pub space: i32,
    pub plate: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    /// Pricing instant for the tariff lookup.
    pub at: DateTime<Utc>,
}
