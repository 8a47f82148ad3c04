//! Domain layer between `parkly-api` and the `parkly` CLI.
//!
//! This crate owns the parking domain model and the rules that price and
//! count it:
//!
//! - **[`ParkingService`]**: Facade over the REST client. Loads rows,
//!   converts them into domain types and performs the multi-step writes
//!   (entry, exit with payment, subscription sales and renewals, shifts,
//!   reservations).
//!
//! - **Pure logic**: [`resolve_tariff`], [`calculate_fee`],
//!   [`aggregate_occupancy`] and [`extend_period`] take every input as a
//!   parameter (including `now`) and return plain values, so they are
//!   testable without a backend.
//!
//! - **Domain model** ([`model`]): [`Space`], [`TariffEntry`],
//!   [`Occupancy`], [`Subscription`], [`Shift`], [`Reservation`] and the
//!   tag enums ([`VehicleSegment`], [`PeriodType`], [`ReservationStatus`])
//!   parsed from the backend's stored strings.

pub mod aggregate;
pub mod calendar;
pub mod config;
pub mod convert;
pub mod error;
pub mod model;
pub mod pricing;
pub mod requests;
pub mod service;

// ── Primary re-exports ──────────────────────────────────────────────
pub use aggregate::aggregate_occupancy;
pub use calendar::extend_period;
pub use config::{AuthCredentials, BackendConfig, TlsVerification};
pub use error::CoreError;
pub use pricing::{Fee, billable_units, calculate_fee, hourly_fee, resolve_tariff};
pub use requests::*;
pub use service::{ExitQuote, ExitReceipt, ParkingService, SubscriptionReceipt, pricing_target};

// Re-export model types at the crate root for ergonomics.
pub use model::{
    LotId, Occupancy, OccupancySummary, ParkingLot, Payment, PaymentMethod, PeriodType,
    RateTemplate, Reservation, ReservationStatus, SegmentOccupancy, Shift, ShiftState, Space,
    Subscription, SubscriptionPeriod, TariffEntry, TariffTarget, VehicleSegment, normalize_plate,
};
