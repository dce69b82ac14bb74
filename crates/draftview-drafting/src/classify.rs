//! Element profile classification.
//!
//! Derives an [`ElementProfile`] from an element's placement topology and
//! whatever geometry the host could report for it. Every lookup is optional:
//! a missing box, curve or attribute leaves the matching profile field at its
//! default instead of failing the element.

use draftview_math::{normalize, rotate_z, Point3, Vec3};

use crate::types::{BoundingBox, ElementProfile, PlacementTopology};

/// Geometry of the linear host an element is placed on.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HostGeometry {
    /// The host's location curve as `(start, end)`.
    pub location_curve: Option<(Point3, Point3)>,
    /// The host type's bounding box.
    pub type_box: Option<BoundingBox>,
}

/// Everything the classifier may read about one element.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GeometryBundle {
    /// The instance's world-space bounding box.
    pub own_box: Option<BoundingBox>,
    /// The type's bounding box, in type-local coordinates.
    pub type_box: Option<BoundingBox>,
    /// The instance's location curve as `(start, end)`.
    pub location_curve: Option<(Point3, Point3)>,
    /// Explicit height attribute.
    pub height_param: Option<f64>,
    /// Instance rotation about the vertical axis, in radians.
    pub rotation: Option<f64>,
    /// Whether the instance faces the opposite way along its host.
    pub facing_flipped: Option<bool>,
    /// The host, for hosted instances.
    pub host: Option<HostGeometry>,
}

/// Why the point-based rule was used instead of the topology's own rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassificationFallback {
    /// The topology is [`PlacementTopology::Unclassified`].
    Unclassified,
    /// A hosted instance reported no host.
    MissingHost,
    /// The host has no location curve.
    MissingHostCurve,
}

/// Profile plus the fallback taken to derive it, if any.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    /// Derived profile.
    pub profile: ElementProfile,
    /// Set when the point-based rule stood in for the topology's rule.
    pub fallback: Option<ClassificationFallback>,
}

/// Classify an element, returning its profile.
pub fn classify(topology: PlacementTopology, geometry: &GeometryBundle) -> ElementProfile {
    classify_detailed(topology, geometry).profile
}

/// Classify an element, also reporting any fallback that was taken.
pub fn classify_detailed(topology: PlacementTopology, geometry: &GeometryBundle) -> Classification {
    let (profile, fallback) = match topology {
        PlacementTopology::LinearHost => (linear_host(geometry), None),
        PlacementTopology::PointBased => (point_based(geometry), None),
        PlacementTopology::CurveBased => (curve_based(geometry), None),
        PlacementTopology::HostedOnLinearHost => match hosted(geometry) {
            Ok(profile) => (profile, None),
            Err(reason) => (point_based(geometry), Some(reason)),
        },
        PlacementTopology::Unclassified => (
            point_based(geometry),
            Some(ClassificationFallback::Unclassified),
        ),
    };
    if let Some(reason) = fallback {
        tracing::debug!(?topology, ?reason, "classified with point-based rule");
    }
    Classification { profile, fallback }
}

fn unit_or_zero(v: &Vec3) -> Vec3 {
    normalize(v).unwrap_or_else(|_| Vec3::zeros())
}

/// Profile with only the origin filled in.
fn base_profile(geometry: &GeometryBundle) -> ElementProfile {
    ElementProfile {
        origin: geometry
            .own_box
            .map(|b| b.center())
            .unwrap_or_else(Point3::origin),
        ..ElementProfile::default()
    }
}

fn linear_host(geometry: &GeometryBundle) -> ElementProfile {
    let mut profile = base_profile(geometry);
    if let Some((start, end)) = geometry.location_curve {
        let vector = end - start;
        profile.direction = unit_or_zero(&vector);
        profile.width = vector.norm();
    }
    if let Some(height) = geometry.height_param {
        profile.height = height.max(0.0);
    }
    profile
}

fn point_based(geometry: &GeometryBundle) -> ElementProfile {
    let mut profile = base_profile(geometry);
    let Some(type_box) = geometry.type_box else {
        return profile;
    };
    let extents = type_box.extents();
    profile.width = extents.x;
    profile.height = extents.z;
    profile.depth = extents.y;

    // Local X axis of the type, sampled along the box's mid-depth line.
    let mid_y = (type_box.min.y + type_box.max.y) / 2.0;
    let start = Point3::new(type_box.min.x, mid_y, type_box.min.z);
    let end = Point3::new(type_box.max.x, mid_y, type_box.min.z);
    let mut vector = end - start;
    if let Some(angle) = geometry.rotation {
        vector = rotate_z(&vector, angle);
    }
    profile.direction = unit_or_zero(&vector);
    profile
}

fn curve_based(geometry: &GeometryBundle) -> ElementProfile {
    let mut profile = base_profile(geometry);
    if let Some((start, end)) = geometry.location_curve {
        // Sloped curves are flattened onto the start elevation.
        let end = Point3::new(end.x, end.y, start.z);
        let vector = end - start;
        profile.direction = unit_or_zero(&vector);
        profile.width = vector.norm();
    }
    if let Some(own_box) = geometry.own_box {
        profile.height = own_box.extents().z;
    }
    profile
}

fn hosted(geometry: &GeometryBundle) -> Result<ElementProfile, ClassificationFallback> {
    let host = geometry.host.ok_or(ClassificationFallback::MissingHost)?;
    let (start, end) = host
        .location_curve
        .ok_or(ClassificationFallback::MissingHostCurve)?;

    let mut profile = base_profile(geometry);
    let mut vector = end - start;
    if geometry.facing_flipped == Some(true) {
        vector = -vector;
    }
    profile.direction = unit_or_zero(&vector);
    if let Some(type_box) = host.type_box {
        let extents = type_box.extents();
        profile.width = extents.x;
        profile.height = extents.z;
    }
    Ok(profile)
}
