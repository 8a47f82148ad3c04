// ── Occupancy aggregation ──

use std::collections::{BTreeMap, HashSet};

use crate::model::{LotId, Occupancy, OccupancySummary, SegmentOccupancy, Space, VehicleSegment};

/// Count total, occupied and free spaces per segment.
///
/// A space is occupied when an open occupancy of the same lot references
/// its number. Closed occupancies and ones pointing at spaces of another
/// lot are ignored. Every segment is reported, with zeros where the lot
/// has no spaces of that kind.
pub fn aggregate_occupancy(
    lot: LotId,
    spaces: &[Space],
    occupancies: &[Occupancy],
) -> OccupancySummary {
    let occupied: HashSet<i32> = occupancies
        .iter()
        .filter(|o| o.lot == lot && o.is_open())
        .map(|o| o.space)
        .collect();

    let mut counts: BTreeMap<VehicleSegment, (u32, u32)> =
        VehicleSegment::all().map(|s| (s, (0, 0))).collect();

    for space in spaces.iter().filter(|s| s.lot == lot) {
        let entry = counts.entry(space.segment).or_default();
        entry.0 += 1;
        if occupied.contains(&space.number) {
            entry.1 += 1;
        }
    }

    let segments = counts
        .into_iter()
        .map(|(segment, (total, occupied))| SegmentOccupancy {
            segment,
            total,
            occupied,
            free: total.saturating_sub(occupied),
        })
        .collect();

    OccupancySummary { lot, segments }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::PeriodType;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    const LOT: LotId = LotId::new(1);

    fn space(number: i32, segment: VehicleSegment) -> Space {
        Space {
            lot: LOT,
            number,
            segment,
            template_id: None,
            zone: None,
        }
    }

    fn open(id: i64, space: i32) -> Occupancy {
        Occupancy {
            id,
            lot: LOT,
            space,
            plate: format!("PLATE{id}"),
            entered_at: Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap(),
            exited_at: None,
            period: PeriodType::Hour,
            payment_id: None,
        }
    }

    #[test]
    fn five_car_spaces_two_occupied() {
        let spaces: Vec<_> = (1..=5).map(|n| space(n, VehicleSegment::Car)).collect();
        let occupancies = vec![open(10, 2), open(11, 4)];

        let summary = aggregate_occupancy(LOT, &spaces, &occupancies);

        assert_eq!(
            summary.segments,
            vec![
                SegmentOccupancy { segment: VehicleSegment::Car, total: 5, occupied: 2, free: 3 },
                SegmentOccupancy { segment: VehicleSegment::Motorcycle, total: 0, occupied: 0, free: 0 },
                SegmentOccupancy { segment: VehicleSegment::Truck, total: 0, occupied: 0, free: 0 },
            ]
        );
        assert_eq!(summary.total(), 5);
        assert_eq!(summary.free(), 3);
    }

    #[test]
    fn closed_and_foreign_occupancies_are_ignored() {
        let spaces = vec![space(1, VehicleSegment::Car), space(2, VehicleSegment::Motorcycle)];
        let mut closed = open(1, 1);
        closed.exited_at = Some(Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap());
        let mut foreign = open(2, 2);
        foreign.lot = LotId::new(99);

        let summary = aggregate_occupancy(LOT, &spaces, &[closed, foreign]);

        assert_eq!(summary.occupied(), 0);
        assert_eq!(summary.segment(VehicleSegment::Motorcycle).unwrap().total, 1);
    }

    #[test]
    fn occupancy_on_unknown_space_does_not_count() {
        let spaces = vec![space(1, VehicleSegment::Truck)];
        let summary = aggregate_occupancy(LOT, &spaces, &[open(1, 42)]);
        let truck = summary.segment(VehicleSegment::Truck).unwrap();
        assert_eq!((truck.total, truck.occupied, truck.free), (1, 0, 1));
    }

    #[test]
    fn mixed_segments() {
        let spaces = vec![
            space(1, VehicleSegment::Car),
            space(2, VehicleSegment::Motorcycle),
            space(3, VehicleSegment::Motorcycle),
            space(4, VehicleSegment::Truck),
        ];
        let summary = aggregate_occupancy(LOT, &spaces, &[open(1, 2), open(2, 3), open(3, 4)]);

        let moto = summary.segment(VehicleSegment::Motorcycle).unwrap();
        assert_eq!((moto.total, moto.occupied, moto.free), (2, 2, 0));
        assert_eq!(summary.segment(VehicleSegment::Car).unwrap().free, 1);
        assert_eq!(summary.segment(VehicleSegment::Truck).unwrap().occupied, 1);
    }
}
