// ── Lot, space and rate template domain types ──

use serde::{Deserialize, Serialize};

use super::ids::LotId;
use super::segment::VehicleSegment;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParkingLot {
    pub id: LotId,
    pub name: String,
    pub address: Option<String>,
    /// Declared capacity; the space list is authoritative for occupancy.
    pub capacity: Option<u32>,
}

/// An individually numbered parking spot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Space {
    pub lot: LotId,
    pub number: i32,
    pub segment: VehicleSegment,
    /// Rate template priced for this space, if any. Spaces without one are
    /// priced by their segment's tariff.
    pub template_id: Option<i64>,
    pub zone: Option<String>,
}

/// A named price plan that spaces can be assigned to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateTemplate {
    pub id: i64,
    pub lot: LotId,
    pub name: String,
    pub segment: VehicleSegment,
}
