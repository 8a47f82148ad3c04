// ── Tariff domain types ──

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::LotId;
use super::period::PeriodType;
use super::segment::VehicleSegment;

/// What a tariff row is keyed on: a rate template, or a vehicle segment
/// directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum TariffTarget {
    Template(i64),
    Segment(VehicleSegment),
}

impl fmt::Display for TariffTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Template(id) => write!(f, "template {id}"),
            Self::Segment(segment) => write!(f, "segment {segment}"),
        }
    }
}

/// One price row. Several rows may exist for the same (lot, target,
/// period); the one in force is the latest whose `effective_from` has
/// passed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TariffEntry {
    pub id: i64,
    pub lot: LotId,
    pub target: TariffTarget,
    pub period: PeriodType,
    pub price: Decimal,
    pub effective_from: DateTime<Utc>,
}
