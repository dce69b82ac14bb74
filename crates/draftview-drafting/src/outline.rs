//! Oriented outline projection.
//!
//! Frames a set of candidate boxes in the plane spanned by a view direction
//! and its horizontal perpendicular, producing the crop region of a section
//! or elevation view.

use draftview_math::{horizontal, perpendicular_xy, Point3, Vec3};

use crate::types::{BoundingBox, BoundingBox2D, OutlineRegion};

/// Padding added below and above the candidates' vertical extent.
pub const VERTICAL_MARGIN: f64 = 1.0;

/// Half the side of the cube returned when there is nothing to frame.
pub const FALLBACK_HALF_SIZE: f64 = 1.0;

/// Smallest along and across extent of a framed region.
pub const MIN_EXTENT: f64 = 1e-3;

/// Compute the crop region framing `candidates` as seen along `direction`.
///
/// Corners of every candidate's footprint are projected onto `direction`
/// (along) and its horizontal perpendicular (across). The across range is
/// widened by `margin` on both sides; the along range is kept as is. The
/// vertical range spans the candidates' boxes, padded by
/// [`VERTICAL_MARGIN`].
///
/// Only the plan projection of `direction` is used; a vertical or
/// degenerate `direction` is replaced by the X axis. Ranges narrower than
/// [`MIN_EXTENT`] are widened about their middle, so the region always has a
/// positive size.
///
/// The 2D basis is anchored at the world origin, so a given
/// `(along, across)` pair always maps to the same world point whatever
/// `center` is. `center` only positions the fallback cube returned when no
/// candidate is given.
pub fn project<'a>(
    center: &Point3,
    direction: &Vec3,
    candidates: impl IntoIterator<Item = &'a BoundingBox>,
    margin: f64,
) -> OutlineRegion {
    let dir = horizontal(direction);
    let perp = perpendicular_xy(&dir);

    let mut plane = BoundingBox2D::empty();
    let mut z_min = f64::INFINITY;
    let mut z_max = f64::NEG_INFINITY;
    for candidate in candidates {
        for corner in candidate.corners() {
            plane.include(corner.coords.dot(&dir), corner.coords.dot(&perp));
        }
        z_min = z_min.min(candidate.min.z);
        z_max = z_max.max(candidate.max.z);
    }

    if !plane.is_valid() {
        return fallback_cube(center);
    }

    let along = widen(plane.min_x, plane.max_x, 0.0);
    let across = widen(plane.min_y, plane.max_y, margin);
    let corners = [
        (along.0, across.0),
        (along.0, across.1),
        (along.1, across.0),
        (along.1, across.1),
    ]
    .map(|(a, c)| Point3::from(dir * a + perp * c));
    let Some(footprint) = BoundingBox::from_points(&corners) else {
        return fallback_cube(center);
    };

    OutlineRegion {
        min: Point3::new(footprint.min.x, footprint.min.y, z_min - VERTICAL_MARGIN),
        max: Point3::new(footprint.max.x, footprint.max.y, z_max + VERTICAL_MARGIN),
    }
}

/// `[min - margin, max + margin]`, grown to at least [`MIN_EXTENT`].
fn widen(min: f64, max: f64, margin: f64) -> (f64, f64) {
    let (lo, hi) = (min - margin, max + margin);
    let short = MIN_EXTENT - (hi - lo);
    if short > 0.0 {
        (lo - short / 2.0, hi + short / 2.0)
    } else {
        (lo, hi)
    }
}

fn fallback_cube(center: &Point3) -> OutlineRegion {
    let half = Vec3::repeat(FALLBACK_HALF_SIZE);
    OutlineRegion {
        min: center - half,
        max: center + half,
    }
}

/// Plan search window of `±half_length` around `center`.
///
/// Elements whose footprint overlaps the window (see
/// [`BoundingBox::overlaps_xy`]) are treated as context for the view.
pub fn search_window(center: &Point3, half_length: f64) -> BoundingBox {
    let half = Vec3::repeat(half_length.abs());
    BoundingBox::new(center - half, center + half)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn bbox(min: (f64, f64, f64), max: (f64, f64, f64)) -> BoundingBox {
        BoundingBox::new(
            Point3::new(min.0, min.1, min.2),
            Point3::new(max.0, max.1, max.2),
        )
    }

    #[test]
    fn test_single_box_along_x() {
        let boxes = [bbox((0.0, 0.0, 0.0), (4.0, 2.0, 3.0))];
        let region = project(&Point3::new(2.0, 1.0, 1.5), &Vec3::x(), &boxes, 0.5);

        // along = x, unexpanded
        assert_relative_eq!(region.min.x, 0.0);
        assert_relative_eq!(region.max.x, 4.0);
        // across = y, widened by the margin
        assert_relative_eq!(region.min.y, -0.5);
        assert_relative_eq!(region.max.y, 2.5);
        // box z padded by the vertical margin
        assert_relative_eq!(region.min.z, -1.0);
        assert_relative_eq!(region.max.z, 4.0);
    }

    #[test]
    fn test_empty_candidates_fallback_cube() {
        let center = Point3::new(3.0, -2.0, 7.0);
        let region = project(&center, &Vec3::x(), std::iter::empty(), 0.5);
        assert_eq!(region.min, Point3::new(2.0, -3.0, 6.0));
        assert_eq!(region.max, Point3::new(4.0, -1.0, 8.0));
        assert_eq!(region.center(), center);
        assert_eq!(region.size(), Vec3::new(2.0, 2.0, 2.0));
    }

    #[test]
    fn test_degenerate_direction_uses_x() {
        let boxes = [bbox((0.0, 0.0, 0.0), (4.0, 2.0, 3.0))];
        let a = project(&Point3::origin(), &Vec3::zeros(), &boxes, 0.25);
        let b = project(&Point3::origin(), &Vec3::x(), &boxes, 0.25);
        assert_eq!(a, b);
    }

    #[test]
    fn test_center_does_not_shift_region() {
        let boxes = [bbox((0.0, 0.0, 0.0), (4.0, 2.0, 3.0))];
        let dir = Vec3::new(1.0, 1.0, 0.0);
        let a = project(&Point3::origin(), &dir, &boxes, 0.5);
        let b = project(&Point3::new(100.0, -50.0, 3.0), &dir, &boxes, 0.5);
        assert_eq!(a, b);
    }

    #[test]
    fn test_rotated_direction_swaps_margin_axis() {
        // Looking along Y, the across axis is -X.
        let boxes = [bbox((0.0, 0.0, 0.0), (4.0, 2.0, 3.0))];
        let region = project(&Point3::origin(), &Vec3::y(), &boxes, 0.5);
        assert_relative_eq!(region.min.x, -0.5);
        assert_relative_eq!(region.max.x, 4.5);
        assert_relative_eq!(region.min.y, 0.0);
        assert_relative_eq!(region.max.y, 2.0);
    }

    #[test]
    fn test_multiple_boxes_union() {
        let boxes = [
            bbox((0.0, 0.0, 0.0), (1.0, 1.0, 1.0)),
            bbox((5.0, -3.0, -2.0), (6.0, -2.0, 8.0)),
        ];
        let region = project(&Point3::origin(), &Vec3::x(), &boxes, 0.0);
        assert_relative_eq!(region.min.x, 0.0);
        assert_relative_eq!(region.max.x, 6.0);
        assert_relative_eq!(region.min.y, -3.0);
        assert_relative_eq!(region.max.y, 1.0);
        assert_relative_eq!(region.min.z, -3.0);
        assert_relative_eq!(region.max.z, 9.0);
    }

    #[test]
    fn test_vertical_direction_frames_like_x() {
        let boxes = [bbox((0.0, 0.0, 0.0), (4.0, 2.0, 3.0))];
        let region = project(&Point3::origin(), &Vec3::z(), &boxes, 0.5);
        assert_eq!(region, project(&Point3::origin(), &Vec3::x(), &boxes, 0.5));
        let size = region.size();
        assert!(size.x > 0.0 && size.y > 0.0 && size.z > 0.0);
    }

    #[test]
    fn test_sloped_direction_uses_plan_projection() {
        let boxes = [bbox((0.0, 0.0, 0.0), (4.0, 2.0, 3.0))];
        let region = project(&Point3::origin(), &Vec3::new(1.0, 0.0, 1.0), &boxes, 0.5);
        assert_relative_eq!(region.min.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(region.max.x, 4.0, epsilon = 1e-12);
        assert_relative_eq!(region.min.y, -0.5, epsilon = 1e-12);
        assert_relative_eq!(region.max.y, 2.5, epsilon = 1e-12);
    }

    #[test]
    fn test_diagonal_direction_contains_footprint() {
        let boxes = [bbox((0.0, 0.0, 0.0), (2.0, 2.0, 1.0))];
        let region = project(&Point3::origin(), &Vec3::new(1.0, 1.0, 0.0), &boxes, 0.0);
        for corner in boxes[0].corners() {
            assert!(region.min.x <= corner.x + 1e-9 && corner.x <= region.max.x + 1e-9);
            assert!(region.min.y <= corner.y + 1e-9 && corner.y <= region.max.y + 1e-9);
        }
    }

    #[test]
    fn test_zero_footprint_has_positive_size() {
        let boxes = [bbox((3.0, 3.0, 0.0), (3.0, 3.0, 2.0))];
        let region = project(&Point3::origin(), &Vec3::x(), &boxes, 0.0);
        let size = region.size();
        assert_relative_eq!(size.x, MIN_EXTENT, epsilon = 1e-12);
        assert_relative_eq!(size.y, MIN_EXTENT, epsilon = 1e-12);
        assert_relative_eq!(size.z, 4.0);
        assert_relative_eq!(region.center().x, 3.0, epsilon = 1e-12);
        assert_relative_eq!(region.center().y, 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_search_window() {
        let w = search_window(&Point3::new(1.0, 2.0, 3.0), 10.0);
        assert_eq!(w.min, Point3::new(-9.0, -8.0, -7.0));
        assert_eq!(w.max, Point3::new(11.0, 12.0, 13.0));
        let far = bbox((20.0, 0.0, 0.0), (21.0, 1.0, 1.0));
        assert!(!w.overlaps_xy(&far));
    }

    fn arb_box() -> impl Strategy<Value = BoundingBox> {
        (
            -100.0f64..100.0,
            -100.0f64..100.0,
            -100.0f64..100.0,
            0.0f64..20.0,
            0.0f64..20.0,
            0.0f64..20.0,
        )
            .prop_map(|(x, y, z, dx, dy, dz)| {
                BoundingBox::new(Point3::new(x, y, z), Point3::new(x + dx, y + dy, z + dz))
            })
    }

    proptest! {
        #[test]
        fn region_has_positive_size_and_contains_footprints(
            boxes in prop::collection::vec(arb_box(), 1..6),
            dx in -1.0f64..1.0,
            dy in -1.0f64..1.0,
            dz in -1.0f64..1.0,
            margin in 0.0f64..5.0,
        ) {
            let region = project(&Point3::origin(), &Vec3::new(dx, dy, dz), &boxes, margin);
            let size = region.size();
            prop_assert!(size.x > 0.0 && size.y > 0.0 && size.z > 0.0);
            for corner in boxes.iter().flat_map(|b| b.corners()) {
                prop_assert!(region.min.x <= corner.x + 1e-9 && corner.x <= region.max.x + 1e-9);
                prop_assert!(region.min.y <= corner.y + 1e-9 && corner.y <= region.max.y + 1e-9);
            }
        }

        #[test]
        fn fallback_is_side_two_cube(
            x in -1e3f64..1e3,
            y in -1e3f64..1e3,
            z in -1e3f64..1e3,
        ) {
            let center = Point3::new(x, y, z);
            let region = project(&center, &Vec3::x(), std::iter::empty(), 1.0);
            let size = region.size();
            prop_assert!((size.x - 2.0).abs() < 1e-9);
            prop_assert!((size.y - 2.0).abs() < 1e-9);
            prop_assert!((size.z - 2.0).abs() < 1e-9);
            prop_assert!((region.center() - center).norm() < 1e-9);
        }
    }
}
