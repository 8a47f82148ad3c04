// ── Vehicle segment ──
//
// Spaces, templates, tariffs and subscriptions all carry a segment tag
// (`catv_segmento`). The backend stores the short uppercase codes; the CLI
// also accepts the long forms.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// Vehicle class a space or tariff applies to.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
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
pub enum VehicleSegment {
    #[default]
    #[strum(to_string = "AUT", serialize = "auto", serialize = "car")]
    Car,
    #[strum(to_string = "MOT", serialize = "moto", serialize = "motorcycle")]
    Motorcycle,
    #[strum(to_string = "CAM", serialize = "camioneta", serialize = "truck")]
    Truck,
}

impl VehicleSegment {
    /// Parse a stored tag, falling back to `Car` for missing or unknown values.
    pub fn from_tag(tag: Option<&str>) -> Self {
        tag.and_then(|t| t.trim().parse().ok()).unwrap_or_default()
    }

    /// The short code stored in the backend (`AUT`, `MOT`, `CAM`).
    pub fn tag(self) -> String {
        self.to_string()
    }

    /// Human-readable name for tables.
    pub fn label(self) -> &'static str {
        match self {
            Self::Car => "car",
            Self::Motorcycle => "motorcycle",
            Self::Truck => "truck",
        }
    }

    /// Every segment, in reporting order.
    pub fn all() -> impl Iterator<Item = Self> {
        Self::iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_codes_and_long_forms() {
        assert_eq!("AUT".parse::<VehicleSegment>(), Ok(VehicleSegment::Car));
        assert_eq!("moto".parse::<VehicleSegment>(), Ok(VehicleSegment::Motorcycle));
        assert_eq!("Truck".parse::<VehicleSegment>(), Ok(VehicleSegment::Truck));
        assert_eq!("cam".parse::<VehicleSegment>(), Ok(VehicleSegment::Truck));
    }

    #[test]
    fn unknown_or_missing_tag_is_car() {
        assert_eq!(VehicleSegment::from_tag(None), VehicleSegment::Car);
        assert_eq!(VehicleSegment::from_tag(Some("")), VehicleSegment::Car);
        assert_eq!(VehicleSegment::from_tag(Some("BUS")), VehicleSegment::Car);
        assert_eq!(VehicleSegment::from_tag(Some("MOT")), VehicleSegment::Motorcycle);
    }

    #[test]
    fn display_is_the_stored_code() {
        assert_eq!(VehicleSegment::Truck.to_string(), "CAM");
        assert_eq!(VehicleSegment::Motorcycle.tag(), "MOT");
    }

    #[test]
    fn reporting_order() {
        let all: Vec<_> = VehicleSegment::all().collect();
        assert_eq!(
            all,
            [VehicleSegment::Car, VehicleSegment::Motorcycle, VehicleSegment::Truck]
        );
    }
}
