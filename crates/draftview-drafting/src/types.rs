//! Core types for element profiles, outlines and sheet layout.

use draftview_math::{horizontal, Point3, Vec3};
use serde::{Deserialize, Serialize};

/// How an element instance is parametrically located.
///
/// Drives the branch taken by [`crate::classify`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlacementTopology {
    /// Wall-like: a single bounded location curve and an explicit height.
    LinearHost,
    /// Single insertion point plus the type-level bounding box.
    PointBased,
    /// Located by a bounded curve.
    CurveBased,
    /// Located relative to a [`PlacementTopology::LinearHost`] host.
    HostedOnLinearHost,
    /// Not recognized; handled like [`PlacementTopology::PointBased`].
    Unclassified,
}

/// Which drafting view is generated for an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    /// Cut looking along the element's direction.
    #[default]
    #[serde(alias = "section")]
    Cross,
    /// Looking at the element's face, across its direction.
    Elevation,
}

/// Axis-aligned bounding box in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Minimum corner.
    pub min: Point3,
    /// Maximum corner.
    pub max: Point3,
}

impl BoundingBox {
    /// Create a box from two opposite corners, in any order.
    pub fn new(a: Point3, b: Point3) -> Self {
        Self {
            min: Point3::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
            max: Point3::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
        }
    }

    /// Smallest box containing all `points`, or `None` when there are none.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point3>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = *points.next()?;
        let mut bbox = Self {
            min: first,
            max: first,
        };
        for p in points {
            bbox.include_point(p);
        }
        Some(bbox)
    }

    /// Expand the box to include a point.
    pub fn include_point(&mut self, p: &Point3) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.min.z = self.min.z.min(p.z);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
        self.max.z = self.max.z.max(p.z);
    }

    /// Midpoint of the box.
    pub fn center(&self) -> Point3 {
        nalgebra::center(&self.min, &self.max)
    }

    /// Size along each axis.
    pub fn extents(&self) -> Vec3 {
        self.max - self.min
    }

    /// The four horizontal corners at the box's minimum elevation.
    ///
    /// Views are framed from the plan footprint, so the top face is not
    /// sampled.
    pub fn corners(&self) -> [Point3; 4] {
        let z = self.min.z;
        [
            Point3::new(self.min.x, self.min.y, z),
            Point3::new(self.min.x, self.max.y, z),
            Point3::new(self.max.x, self.min.y, z),
            Point3::new(self.max.x, self.max.y, z),
        ]
    }

    /// Test if the plan footprints of two boxes overlap (touching counts).
    pub fn overlaps_xy(&self, other: &BoundingBox) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }
}

/// 2D axis-aligned extents over a pair of projection axes.
///
/// `x` holds the coordinate along the view direction, `y` the coordinate
/// across it.
#[derive(Debug, Clone, Copy)]
pub struct BoundingBox2D {
    /// Minimum X coordinate.
    pub min_x: f64,
    /// Minimum Y coordinate.
    pub min_y: f64,
    /// Maximum X coordinate.
    pub max_x: f64,
    /// Maximum Y coordinate.
    pub max_y: f64,
}

impl BoundingBox2D {
    /// Create an empty bounding box.
    pub fn empty() -> Self {
        Self {
            min_x: f64::INFINITY,
            min_y: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            max_y: f64::NEG_INFINITY,
        }
    }

    /// Expand the bounding box to include `(x, y)`.
    pub fn include(&mut self, x: f64, y: f64) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    /// Check if the bounding box is valid (non-empty).
    pub fn is_valid(&self) -> bool {
        self.min_x <= self.max_x && self.min_y <= self.max_y
    }
}

impl Default for BoundingBox2D {
    fn default() -> Self {
        Self::empty()
    }
}

/// Canonical origin, direction and extents of an element.
///
/// Classification is best-effort: fields that could not be derived keep
/// their [`Default`] values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementProfile {
    /// Representative center point.
    pub origin: Point3,
    /// Principal direction, unit length or zero when undeterminable.
    pub direction: Vec3,
    /// Extent along `direction`.
    pub width: f64,
    /// Vertical extent.
    pub height: f64,
    /// Extent across `direction`.
    pub depth: f64,
    /// Padding added around width and height when framing a view.
    pub offset: f64,
    /// Padding added in front of and behind the element when framing a view.
    pub depth_offset: f64,
}

impl ElementProfile {
    /// Default depth when none can be derived.
    pub const DEFAULT_DEPTH: f64 = 1.0;
    /// Default framing offset.
    pub const DEFAULT_OFFSET: f64 = 1.0;

    /// Unit plan direction views of the element are oriented by.
    ///
    /// A missing or vertical direction is replaced by the X axis.
    pub fn plan_direction(&self) -> Vec3 {
        horizontal(&self.direction)
    }
}

impl Default for ElementProfile {
    fn default() -> Self {
        Self {
            origin: Point3::origin(),
            direction: Vec3::zeros(),
            width: 0.0,
            height: 0.0,
            depth: Self::DEFAULT_DEPTH,
            offset: Self::DEFAULT_OFFSET,
            depth_offset: Self::DEFAULT_OFFSET,
        }
    }
}

/// Computed crop region of a drafting view.
///
/// Always has `min <= max` and a positive size along every axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutlineRegion {
    /// Minimum corner.
    pub min: Point3,
    /// Maximum corner.
    pub max: Point3,
}

impl OutlineRegion {
    /// Midpoint of the region, i.e. the crop center of a view cropped to it.
    pub fn center(&self) -> Point3 {
        nalgebra::center(&self.min, &self.max)
    }

    /// Size along each axis.
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }
}

/// Crop center of a view that already exists in the model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExistingViewRecord {
    /// Center of the view's crop box.
    pub crop_center: Point3,
}

/// A position on a sheet in normalized units, origin at the sheet center.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedPosition {
    /// Horizontal offset.
    pub x: f64,
    /// Vertical offset.
    pub y: f64,
}

impl NormalizedPosition {
    /// Create a new position.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Sheet center.
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };
}

impl Default for NormalizedPosition {
    fn default() -> Self {
        Self::ORIGIN
    }
}
