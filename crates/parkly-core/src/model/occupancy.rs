// ── Occupancy and payment domain types ──

use chrono::{DateTime, TimeDelta, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::LotId;
use super::period::PeriodType;
use super::segment::VehicleSegment;

/// A vehicle's stay in a space. `exited_at == None` means the space is
/// still taken.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occupancy {
    pub id: i64,
    pub lot: LotId,
    pub space: i32,
    pub plate: String,
    pub entered_at: DateTime<Utc>,
    pub exited_at: Option<DateTime<Utc>>,
    /// Billing unit chosen at entry. Rows without one bill hourly.
    pub period: PeriodType,
    pub payment_id: Option<i64>,
}

impl Occupancy {
    pub fn is_open(&self) -> bool {
        self.exited_at.is_none()
    }

    /// Time spent inside as of `now` (or up to the recorded exit).
    pub fn duration(&self, now: DateTime<Utc>) -> TimeDelta {
        (self.exited_at.unwrap_or(now) - self.entered_at).max(TimeDelta::zero())
    }
}

/// Per-segment space counts for one lot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentOccupancy {
    pub segment: VehicleSegment,
    pub total: u32,
    pub occupied: u32,
    pub free: u32,
}

/// Occupancy of every segment of a lot, always listing all three segments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccupancySummary {
    pub lot: LotId,
    pub segments: Vec<SegmentOccupancy>,
}

impl OccupancySummary {
    pub fn segment(&self, segment: VehicleSegment) -> Option<&SegmentOccupancy> {
        self.segments.iter().find(|s| s.segment == segment)
    }

    pub fn total(&self) -> u32 {
        self.segments.iter().map(|s| s.total).sum()
    }

    pub fn occupied(&self) -> u32 {
        self.segments.iter().map(|s| s.occupied).sum()
    }

    pub fn free(&self) -> u32 {
        self.segments.iter().map(|s| s.free).sum()
    }
}

// ── Payments ────────────────────────────────────────────────────────

/// How a payment was settled (`mepa_metodo`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[default]
    Cash,
    Transfer,
    Card,
    Qr,
    /// A method configured in the backend that this build does not know.
    Other(String),
}

impl PaymentMethod {
    /// The tag stored in the backend.
    pub fn tag(&self) -> &str {
        match self {
            Self::Cash => "efectivo",
            Self::Transfer => "transferencia",
            Self::Card => "tarjeta",
            Self::Qr => "qr",
            Self::Other(raw) => raw,
        }
    }

    /// Parse a stored tag, keeping unknown values instead of failing.
    pub fn from_tag(tag: &str) -> Self {
        tag.parse().unwrap_or_else(|_| Self::Other(tag.to_owned()))
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Strict parse for user input: only the known methods are accepted.
impl FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "efectivo" | "cash" => Ok(Self::Cash),
            "transferencia" | "transfer" => Ok(Self::Transfer),
            "tarjeta" | "card" => Ok(Self::Card),
            "qr" => Ok(Self::Qr),
            other => Err(format!(
                "unknown payment method '{other}' (expected efectivo, transferencia, tarjeta or qr)"
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    pub id: i64,
    pub lot: LotId,
    pub amount: Decimal,
    pub paid_at: DateTime<Utc>,
    pub method: PaymentMethod,
    pub plate: Option<String>,
}
