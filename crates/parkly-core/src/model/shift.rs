// ── Shift (turno) domain type ──

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use uuid::Uuid;

use super::ids::LotId;

/// Lifecycle of a cash-desk shift. Stored as `abierto` / `cerrado`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(ascii_case_insensitive)]
pub enum ShiftState {
    #[strum(to_string = "abierto", serialize = "open")]
    Open,
    #[strum(to_string = "cerrado", serialize = "closed")]
    Closed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shift {
    pub id: i64,
    pub lot: LotId,
    pub employee: Uuid,
    pub opened_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
    pub opening_cash: Decimal,
    pub closing_cash: Option<Decimal>,
    pub state: ShiftState,
    pub notes: Option<String>,
}

impl Shift {
    pub fn is_open(&self) -> bool {
        self.state == ShiftState::Open
    }

    /// Cash taken in over the shift, once closed.
    pub fn cash_delta(&self) -> Option<Decimal> {
        self.closing_cash.map(|closing| closing - self.opening_cash)
    }
}
