//! Oriented section boxes framing a single element.
//!
//! A section box is the element-local region a view would need to show the
//! element on its own: centered on the profile origin, padded by the
//! profile's offsets, and rotated into the view's frame.

use draftview_math::{perpendicular_xy, Point3, Transform, Vec3};

use crate::types::{BoundingBox, ElementProfile, SectionKind};

/// A box in a view frame: `right`, `up` and `view_direction` form a
/// right-handed basis centered on `origin`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionBox {
    /// Center of the box.
    pub origin: Point3,
    /// Direction the view looks in.
    pub view_direction: Vec3,
    /// Vertical axis of the view.
    pub up: Vec3,
    /// Horizontal axis of the view.
    pub right: Vec3,
    /// Minimum corner in view coordinates.
    pub local_min: Point3,
    /// Maximum corner in view coordinates.
    pub local_max: Point3,
}

impl SectionBox {
    /// Build the box framing `profile` for a view of the given kind.
    ///
    /// An elevation looks at the element's face, so the element's width runs
    /// across the view and its depth runs along the view direction. A cross
    /// section looks along the element and swaps the two.
    pub fn for_profile(profile: &ElementProfile, kind: SectionKind) -> Self {
        let direction = profile.plan_direction();
        let (view_direction, half_across, half_deep) = match kind {
            SectionKind::Elevation => (
                perpendicular_xy(&direction),
                profile.width / 2.0 + profile.offset,
                profile.depth / 2.0 + profile.depth_offset,
            ),
            SectionKind::Cross => (
                direction,
                profile.depth / 2.0 + profile.offset,
                profile.width / 2.0 + profile.depth_offset,
            ),
        };
        let half_up = profile.height / 2.0 + profile.offset;
        let up = Vec3::z();

        Self {
            origin: profile.origin,
            view_direction,
            up,
            right: up.cross(&view_direction),
            local_min: Point3::new(-half_across, -half_up, -half_deep),
            local_max: Point3::new(half_across, half_up, half_deep),
        }
    }

    /// Transform from view coordinates to world coordinates.
    pub fn transform(&self) -> Transform {
        Transform::from_basis(&self.origin, &self.right, &self.up, &self.view_direction)
    }

    /// Axis-aligned world region covering the box.
    pub fn world_bounds(&self) -> BoundingBox {
        let t = self.transform();
        let (lo, hi) = (self.local_min, self.local_max);
        let first = t.apply_point(&lo);
        let mut bounds = BoundingBox::new(first, first);
        for x in [lo.x, hi.x] {
            for y in [lo.y, hi.y] {
                for z in [lo.z, hi.z] {
                    bounds.include_point(&t.apply_point(&Point3::new(x, y, z)));
                }
            }
        }
        bounds
    }
}
