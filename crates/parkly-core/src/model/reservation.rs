// ── Reservation domain type ──

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::ids::LotId;

/// Reservation lifecycle, stored with the Spanish tags.
///
/// ```text
/// pendiente ──▶ confirmada ──▶ activa ──▶ completada
///     │             │
///     └─────────────┴──▶ cancelada / expirada
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(ascii_case_insensitive)]
pub enum ReservationStatus {
    #[strum(to_string = "pendiente", serialize = "pending")]
    Pending,
    #[strum(to_string = "confirmada", serialize = "confirmed")]
    Confirmed,
    #[strum(to_string = "activa", serialize = "active")]
    Active,
    #[strum(to_string = "completada", serialize = "completed")]
    Completed,
    #[strum(to_string = "cancelada", serialize = "cancelled")]
    Cancelled,
    #[strum(to_string = "expirada", serialize = "expired")]
    Expired,
}

impl ReservationStatus {
    pub fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (
                Self::Pending,
                Self::Confirmed | Self::Cancelled | Self::Expired
            ) | (
                Self::Confirmed,
                Self::Active | Self::Cancelled | Self::Expired
            ) | (Self::Active, Self::Completed)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled | Self::Expired)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub code: String,
    pub lot: LotId,
    pub space: i32,
    pub plate: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub status: ReservationStatus,
    pub amount: Decimal,
}

impl Reservation {
    /// Whether this reservation's window intersects `[from, to)`.
    pub fn overlaps(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> bool {
        self.starts_at < to && from < self.ends_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn cancel_only_from_pending_or_confirmed() {
        let cancellable: Vec<_> = ReservationStatus::iter()
            .filter(|s| s.can_transition_to(ReservationStatus::Cancelled))
            .collect();
        assert_eq!(
            cancellable,
            [ReservationStatus::Pending, ReservationStatus::Confirmed]
        );
    }

    #[test]
    fn terminal_states_go_nowhere() {
        for from in ReservationStatus::iter().filter(|s| s.is_terminal()) {
            assert!(ReservationStatus::iter().all(|to| !from.can_transition_to(to)));
        }
    }

    #[test]
    fn active_only_completes() {
        assert!(ReservationStatus::Active.can_transition_to(ReservationStatus::Completed));
        assert!(!ReservationStatus::Active.can_transition_to(ReservationStatus::Cancelled));
        assert!(!ReservationStatus::Pending.can_transition_to(ReservationStatus::Active));
    }

    #[test]
    fn status_tags() {
        assert_eq!(ReservationStatus::Confirmed.to_string(), "confirmada");
        assert_eq!(
            "cancelled".parse::<ReservationStatus>(),
            Ok(ReservationStatus::Cancelled)
        );
    }
}
