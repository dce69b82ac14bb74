#![warn(missing_docs)]

//! Geometric reasoning for automated section and elevation views.
//!
//! This crate turns building-model elements into drafting view regions:
//!
//! - **Classification**: derive an element's origin, direction and extents
//!   from its placement topology ([`classify`])
//! - **Outline projection**: frame a set of boxes in a view's plane
//!   ([`project`])
//! - **Deduplication**: detect views that already exist at a location
//!   ([`exists_nearby`])
//! - **Layout**: preset sheet positions for new views ([`layout`])
//!
//! Everything here is a pure function over already-fetched data.
//!
//! # Example
//!
//! ```
//! use draftview_drafting::{classify, project, GeometryBundle, PlacementTopology, BoundingBox};
//! use draftview_math::Point3;
//!
//! let wall_box = BoundingBox::new(Point3::new(0.0, -0.1, 0.0), Point3::new(10.0, 0.1, 3.0));
//! let geometry = GeometryBundle {
//!     own_box: Some(wall_box),
//!     location_curve: Some((Point3::new(0.0, 0.0, 0.0), Point3::new(10.0, 0.0, 0.0))),
//!     height_param: Some(3.0),
//!     ..GeometryBundle::default()
//! };
//! let profile = classify(PlacementTopology::LinearHost, &geometry);
//! let region = project(&profile.origin, &profile.direction, &[wall_box], 0.3);
//! assert!(region.size().x > 0.0);
//! ```

pub mod classify;
pub mod dedup;
pub mod layout;
pub mod outline;
pub mod section_box;
pub mod types;

// Re-export main types and functions for convenience
pub use classify::{
    classify, classify_detailed, Classification, ClassificationFallback, GeometryBundle,
    HostGeometry,
};
pub use dedup::{exists_nearby, find_nearby};
pub use layout::layout;
pub use outline::{project, search_window, FALLBACK_HALF_SIZE, MIN_EXTENT, VERTICAL_MARGIN};
pub use section_box::SectionBox;
pub use types::{
    BoundingBox, BoundingBox2D, ElementProfile, ExistingViewRecord, NormalizedPosition,
    OutlineRegion, PlacementTopology, SectionKind,
};

#[cfg(test)]
mod tests {
    use super::*;
    use draftview_math::{Point3, Vec3};

    fn bbox(min: (f64, f64, f64), max: (f64, f64, f64)) -> BoundingBox {
        BoundingBox::new(
            Point3::new(min.0, min.1, min.2),
            Point3::new(max.0, max.1, max.2),
        )
    }

    #[test]
    fn test_full_workflow() {
        let wall_box = bbox((0.0, 0.0, 0.0), (10.0, 0.0, 3.0));
        let geometry = GeometryBundle {
            own_box: Some(wall_box),
            location_curve: Some((Point3::new(0.0, 0.0, 0.0), Point3::new(10.0, 0.0, 0.0))),
            height_param: Some(3.0),
            ..GeometryBundle::default()
        };
        let profile = classify(PlacementTopology::LinearHost, &geometry);
        assert_eq!(profile.direction, Vec3::x());
        assert!((profile.width - 10.0).abs() < 1e-10);
        assert!((profile.height - 3.0).abs() < 1e-10);
        assert_eq!(profile.origin, Point3::new(5.0, 0.0, 1.5));

        let region = project(&profile.origin, &profile.direction, &[wall_box], 0.5);
        assert!((region.min.y + 0.5).abs() < 1e-10);
        assert!((region.max.y - 0.5).abs() < 1e-10);
        assert!((region.min.z + 1.0).abs() < 1e-10);
        assert!((region.max.z - 4.0).abs() < 1e-10);

        let existing = [ExistingViewRecord {
            crop_center: region.center(),
        }];
        assert!(exists_nearby(&region.center(), 0.5, &existing));
        assert_eq!(layout(1).len(), 1);
    }

    #[test]
    fn test_section_box_as_candidate() {
        let profile = ElementProfile {
            origin: Point3::new(0.0, 0.0, 1.0),
            direction: Vec3::y(),
            width: 2.0,
            height: 2.0,
            ..ElementProfile::default()
        };
        let frame = SectionBox::for_profile(&profile, SectionKind::Elevation).world_bounds();
        let view_dir = draftview_math::perpendicular_xy(&profile.direction);
        let region = project(&profile.origin, &view_dir, &[frame], 0.0);
        assert!(region.min.x <= region.max.x);
        assert!(region.size().y > 0.0);
        assert!((region.min.z - (frame.min.z - VERTICAL_MARGIN)).abs() < 1e-10);
    }
}
