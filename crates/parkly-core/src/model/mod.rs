// ── Canonical domain types ──
//
// Everything the service hands out. Wire rows from `parkly_api` are
// converted into these in `crate::convert`.

pub mod ids;
pub mod lot;
pub mod occupancy;
pub mod period;
pub mod reservation;
pub mod segment;
pub mod shift;
pub mod subscription;
pub mod tariff;

pub use ids::{LotId, normalize_plate};
pub use lot::{ParkingLot, RateTemplate, Space};
pub use occupancy::{Occupancy, OccupancySummary, Payment, PaymentMethod, SegmentOccupancy};
pub use period::{PeriodType, SubscriptionPeriod};
pub use reservation::{Reservation, ReservationStatus};
pub use segment::VehicleSegment;
pub use shift::{Shift, ShiftState};
pub use subscription::Subscription;
pub use tariff::{TariffEntry, TariffTarget};
