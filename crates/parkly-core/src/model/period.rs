// ── Billing periods ──
//
// `PeriodType` is the tariff period (`tiptar_nro`): how long one unit of a
// price covers. `SubscriptionPeriod` is the narrower choice offered for
// abonos, which only come weekly or monthly.

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::error::CoreError;

/// Unit a tariff price is quoted for.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(ascii_case_insensitive)]
pub enum PeriodType {
    #[default]
    #[strum(to_string = "hour", serialize = "hora", serialize = "hourly")]
    Hour,
    #[strum(to_string = "day", serialize = "dia", serialize = "daily")]
    Day,
    #[strum(to_string = "month", serialize = "mes", serialize = "monthly")]
    Month,
    #[strum(to_string = "week", serialize = "semana", serialize = "weekly")]
    Week,
}

impl PeriodType {
    /// Backend code (`tiptar_nro`).
    pub const fn code(self) -> i32 {
        match self {
            Self::Hour => 1,
            Self::Day => 2,
            Self::Month => 3,
            Self::Week => 4,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(Self::Hour),
            2 => Some(Self::Day),
            3 => Some(Self::Month),
            4 => Some(Self::Week),
            _ => None,
        }
    }

    /// Length of one billable unit. A month counts as 30 days.
    pub fn unit(self) -> TimeDelta {
        match self {
            Self::Hour => TimeDelta::hours(1),
            Self::Day => TimeDelta::days(1),
            Self::Week => TimeDelta::weeks(1),
            Self::Month => TimeDelta::days(30),
        }
    }
}

/// Renewal cadence of a subscription.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(ascii_case_insensitive)]
pub enum SubscriptionPeriod {
    #[strum(to_string = "semanal", serialize = "weekly", serialize = "week")]
    Weekly,
    #[default]
    #[strum(to_string = "mensual", serialize = "monthly", serialize = "month")]
    Monthly,
}

impl SubscriptionPeriod {
    /// Parse the stored `tipo_abono` tag.
    ///
    /// An absent (or blank) tag means monthly: rows written before the
    /// column existed were all monthly. A tag that is present but not
    /// recognised is rejected rather than guessed.
    pub fn from_tag(tag: Option<&str>) -> Result<Self, CoreError> {
        match tag.map(str::trim) {
            None | Some("") => Ok(Self::Monthly),
            Some(t) => t.parse().map_err(|_| CoreError::InvalidPeriod { tag: t.to_owned() }),
        }
    }

    /// The tariff period that prices one unit of this subscription.
    pub const fn tariff_period(self) -> PeriodType {
        match self {
            Self::Weekly => PeriodType::Week,
            Self::Monthly => PeriodType::Month,
        }
    }
}

impl TryFrom<PeriodType> for SubscriptionPeriod {
    type Error = CoreError;

    fn try_from(period: PeriodType) -> Result<Self, Self::Error> {
        match period {
            PeriodType::Week => Ok(Self::Weekly),
            PeriodType::Month => Ok(Self::Monthly),
            PeriodType::Hour | PeriodType::Day => Err(CoreError::InvalidPeriod {
                tag: period.to_string(),
            }),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn codes_round_trip() {
        for period in PeriodType::iter() {
            assert_eq!(PeriodType::from_code(period.code()), Some(period));
        }
        assert_eq!(PeriodType::from_code(0), None);
        assert_eq!(PeriodType::from_code(5), None);
    }

    #[test]
    fn period_type_accepts_spanish_tags() {
        assert_eq!("hora".parse::<PeriodType>(), Ok(PeriodType::Hour));
        assert_eq!("SEMANA".parse::<PeriodType>(), Ok(PeriodType::Week));
        assert_eq!("mes".parse::<PeriodType>(), Ok(PeriodType::Month));
    }

    #[test]
    fn missing_subscription_tag_defaults_to_monthly() {
        assert_eq!(
            SubscriptionPeriod::from_tag(None).unwrap(),
            SubscriptionPeriod::Monthly
        );
        assert_eq!(
            SubscriptionPeriod::from_tag(Some("  ")).unwrap(),
            SubscriptionPeriod::Monthly
        );
        assert_eq!(
            SubscriptionPeriod::from_tag(Some("semanal")).unwrap(),
            SubscriptionPeriod::Weekly
        );
    }

    #[test]
    fn unknown_subscription_tag_is_rejected() {
        let err = SubscriptionPeriod::from_tag(Some("anual")).unwrap_err();
        assert!(matches!(err, CoreError::InvalidPeriod { ref tag } if tag == "anual"));
    }

    #[test]
    fn hourly_and_daily_are_not_subscription_periods() {
        assert!(SubscriptionPeriod::try_from(PeriodType::Hour).is_err());
        assert!(SubscriptionPeriod::try_from(PeriodType::Day).is_err());
        assert_eq!(
            SubscriptionPeriod::try_from(PeriodType::Week).unwrap(),
            SubscriptionPeriod::Weekly
        );
    }
}
