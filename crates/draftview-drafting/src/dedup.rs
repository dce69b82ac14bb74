//! Spatial deduplication of generated views.

use draftview_math::Point3;

use crate::types::ExistingViewRecord;

/// First record whose crop center lies within `tolerance` of `target`.
///
/// Distance is the straight-line 3D distance. `tolerance` is expected to be
/// positive; it is validated where the options are read.
pub fn find_nearby<'a>(
    target: &Point3,
    tolerance: f64,
    records: &'a [ExistingViewRecord],
) -> Option<&'a ExistingViewRecord> {
    records
        .iter()
        .find(|r| nalgebra::distance(&r.crop_center, target) <= tolerance)
}

/// Whether a view already exists within `tolerance` of `target`.
pub fn exists_nearby(target: &Point3, tolerance: f64, records: &[ExistingViewRecord]) -> bool {
    find_nearby(target, tolerance, records).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn record(x: f64, y: f64, z: f64) -> ExistingViewRecord {
        ExistingViewRecord {
            crop_center: Point3::new(x, y, z),
        }
    }

    #[test]
    fn test_within_tolerance() {
        assert!(exists_nearby(&Point3::origin(), 0.5, &[record(0.3, 0.0, 0.0)]));
        assert!(!exists_nearby(&Point3::origin(), 0.5, &[record(1.0, 0.0, 0.0)]));
    }

    #[test]
    fn test_boundary_is_inclusive() {
        assert!(exists_nearby(&Point3::origin(), 0.5, &[record(0.0, 0.5, 0.0)]));
    }

    #[test]
    fn test_euclidean_not_per_axis() {
        // Each axis is within 0.5 but the diagonal distance is ~0.69.
        assert!(!exists_nearby(&Point3::origin(), 0.5, &[record(0.4, 0.4, 0.4)]));
    }

    #[test]
    fn test_empty_records() {
        assert!(!exists_nearby(&Point3::origin(), 100.0, &[]));
    }

    #[test]
    fn test_first_match_returned() {
        let records = [record(5.0, 0.0, 0.0), record(0.2, 0.0, 0.0), record(0.1, 0.0, 0.0)];
        let found = find_nearby(&Point3::origin(), 0.5, &records).unwrap();
        assert_eq!(found.crop_center.x, 0.2);
    }

    proptest! {
        #[test]
        fn matches_minimum_distance(
            centers in prop::collection::vec((-10.0f64..10.0, -10.0f64..10.0, -10.0f64..10.0), 0..8),
            tolerance in 0.01f64..10.0,
        ) {
            let records: Vec<_> = centers.iter().map(|&(x, y, z)| record(x, y, z)).collect();
            let target = Point3::origin();
            let min_distance = records
                .iter()
                .map(|r| nalgebra::distance(&r.crop_center, &target))
                .fold(f64::INFINITY, f64::min);
            prop_assert_eq!(exists_nearby(&target, tolerance, &records), min_distance <= tolerance);
        }
    }
}
