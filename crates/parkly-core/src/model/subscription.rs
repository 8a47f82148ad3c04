// ── Subscription (abono) domain type ──

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ids::LotId;
use super::period::SubscriptionPeriod;
use super::segment::VehicleSegment;

/// A pass granting a plate parking rights until `ends_on` (inclusive).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    pub number: i64,
    pub lot: LotId,
    pub holder: String,
    pub plate: String,
    pub segment: VehicleSegment,
    pub period: SubscriptionPeriod,
    pub starts_on: NaiveDate,
    pub ends_on: NaiveDate,
    pub payment_id: Option<i64>,
}

impl Subscription {
    pub fn is_active_on(&self, day: NaiveDate) -> bool {
        self.starts_on <= day && day <= self.ends_on
    }

    /// Days left counting `today`; zero once expired.
    pub fn days_remaining(&self, today: NaiveDate) -> i64 {
        (self.ends_on - today).num_days().max(-1) + 1
    }

    /// Where a renewal starts counting from: the current end date while the
    /// pass is still valid, otherwise `today`.
    pub fn renewal_base(&self, today: NaiveDate) -> NaiveDate {
        self.ends_on.max(today)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(starts_on: NaiveDate, ends_on: NaiveDate) -> Subscription {
        Subscription {
            number: 1,
            lot: LotId::new(1),
            holder: "Ana".into(),
            plate: "AB123CD".into(),
            segment: VehicleSegment::Car,
            period: SubscriptionPeriod::Monthly,
            starts_on,
            ends_on,
            payment_id: None,
        }
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
    }

    #[test]
    fn active_window_is_inclusive() {
        let sub = sample(day(2024, 1, 1), day(2024, 1, 31));
        assert!(sub.is_active_on(day(2024, 1, 1)));
        assert!(sub.is_active_on(day(2024, 1, 31)));
        assert!(!sub.is_active_on(day(2024, 2, 1)));
    }

    #[test]
    fn days_remaining_counts_today() {
        let sub = sample(day(2024, 1, 1), day(2024, 1, 31));
        assert_eq!(sub.days_remaining(day(2024, 1, 31)), 1);
        assert_eq!(sub.days_remaining(day(2024, 1, 30)), 2);
        assert_eq!(sub.days_remaining(day(2024, 2, 10)), 0);
    }

    #[test]
    fn renewal_base_depends_on_expiry() {
        let sub = sample(day(2024, 1, 1), day(2024, 1, 31));
        assert_eq!(sub.renewal_base(day(2024, 1, 15)), day(2024, 1, 31));
        assert_eq!(sub.renewal_base(day(2024, 3, 1)), day(2024, 3, 1));
    }
}
