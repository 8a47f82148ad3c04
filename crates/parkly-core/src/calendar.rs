// ── Subscription period arithmetic ──

use chrono::{Days, Months, NaiveDate};

use crate::error::CoreError;
use crate::model::SubscriptionPeriod;

/// Expiry date after `quantity` periods starting at `start`.
///
/// Weekly adds `7 * quantity` days. Monthly adds calendar months and
/// clamps to the last day of the target month, so 2024-01-31 plus one
/// month is 2024-02-29, never a day in March.
pub fn extend_period(
    start: NaiveDate,
    period: SubscriptionPeriod,
    quantity: u32,
) -> Result<NaiveDate, CoreError> {
    if quantity == 0 {
        return Err(CoreError::InvalidQuantity);
    }

    let extended = match period {
        SubscriptionPeriod::Weekly => start.checked_add_days(Days::new(7 * u64::from(quantity))),
        SubscriptionPeriod::Monthly => start.checked_add_months(Months::new(quantity)),
    };

    extended.ok_or_else(|| CoreError::DateOutOfRange {
        message: format!("{start} + {quantity} {period} periods"),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn two_weeks_from_new_year() {
        assert_eq!(
            extend_period(day(2024, 1, 1), SubscriptionPeriod::Weekly, 2).unwrap(),
            day(2024, 1, 15)
        );
    }

    #[test]
    fn month_end_clamps_in_leap_year() {
        assert_eq!(
            extend_period(day(2024, 1, 31), SubscriptionPeriod::Monthly, 1).unwrap(),
            day(2024, 2, 29)
        );
    }

    #[test]
    fn month_end_clamps_in_common_year() {
        assert_eq!(
            extend_period(day(2023, 1, 31), SubscriptionPeriod::Monthly, 1).unwrap(),
            day(2023, 2, 28)
        );
        assert_eq!(
            extend_period(day(2024, 3, 31), SubscriptionPeriod::Monthly, 1).unwrap(),
            day(2024, 4, 30)
        );
    }

    #[test]
    fn months_carry_into_next_year() {
        assert_eq!(
            extend_period(day(2024, 11, 15), SubscriptionPeriod::Monthly, 3).unwrap(),
            day(2025, 2, 15)
        );
    }

    #[test]
    fn zero_quantity_is_rejected() {
        assert!(matches!(
            extend_period(day(2024, 1, 1), SubscriptionPeriod::Weekly, 0),
            Err(CoreError::InvalidQuantity)
        ));
    }

    #[test]
    fn calendar_overflow_is_an_error() {
        assert!(matches!(
            extend_period(NaiveDate::MAX, SubscriptionPeriod::Monthly, 1),
            Err(CoreError::DateOutOfRange { .. })
        ));
    }
}
