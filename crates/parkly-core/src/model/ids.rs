// ── Identity types ──
//
// Lots are addressed by a numeric id everywhere in the backend. The
// newtype keeps lot ids from being mixed up with space numbers, payment
// numbers and the other integers flying around.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Identifier of a parking lot (`est_id`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LotId(i64);

impl LotId {
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for LotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for LotId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

impl From<i64> for LotId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<LotId> for i64 {
    fn from(id: LotId) -> Self {
        id.0
    }
}

/// Normalize a licence plate: trimmed, inner whitespace and dashes removed,
/// uppercase. `"ab 123-cd"` and `"AB123CD"` name the same vehicle.
pub fn normalize_plate(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .flat_map(char::to_uppercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lot_id_parses_with_whitespace() {
        assert_eq!(" 42 ".parse::<LotId>(), Ok(LotId::new(42)));
        assert!("lot-1".parse::<LotId>().is_err());
    }

    #[test]
    fn plate_normalization() {
        assert_eq!(normalize_plate("ab 123-cd"), "AB123CD");
        assert_eq!(normalize_plate("AB123CD"), "AB123CD");
        assert_eq!(normalize_plate("  xyz 999 "), "XYZ999");
    }
}
