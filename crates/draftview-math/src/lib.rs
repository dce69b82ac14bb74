#![warn(missing_docs)]

//! Math types for draftview.
//!
//! Thin wrappers around nalgebra providing the handful of types the view
//! generator needs: points and vectors, frame transforms, a linear tolerance
//! and the vector helpers used to orient section and elevation views.

use nalgebra::{Matrix4, Vector3, Vector4};
use thiserror::Error;

/// A point in 3D space, in the host's internal length unit.
pub type Point3 = nalgebra::Point3<f64>;

/// A vector in 3D space.
pub type Vec3 = Vector3<f64>;

/// Errors from vector operations.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum MathError {
    /// The vector is too short to define a direction.
    #[error("degenerate vector: length {0:e} is below tolerance")]
    DegenerateVector(f64),
}

/// A 4x4 affine transformation matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// The underlying 4x4 matrix.
    pub matrix: Matrix4<f64>,
}

impl Transform {
    /// Rotation about the Z axis by `angle` radians.
    pub fn rotation_z(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        let mut m = Matrix4::identity();
        m[(0, 0)] = c;
        m[(0, 1)] = -s;
        m[(1, 0)] = s;
        m[(1, 1)] = c;
        Self { matrix: m }
    }

    /// Local-to-world transform for a frame with the given origin and axes.
    ///
    /// The axes are used as the matrix columns as given; callers pass an
    /// orthonormal basis.
    pub fn from_basis(origin: &Point3, x: &Vec3, y: &Vec3, z: &Vec3) -> Self {
        let mut m = Matrix4::identity();
        for (col, axis) in [x, y, z].into_iter().enumerate() {
            m[(0, col)] = axis.x;
            m[(1, col)] = axis.y;
            m[(2, col)] = axis.z;
        }
        m[(0, 3)] = origin.x;
        m[(1, 3)] = origin.y;
        m[(2, 3)] = origin.z;
        Self { matrix: m }
    }

    /// Transform a point.
    pub fn apply_point(&self, p: &Point3) -> Point3 {
        let v = self.matrix * Vector4::new(p.x, p.y, p.z, 1.0);
        Point3::new(v.x, v.y, v.z)
    }

    /// Transform a direction vector (ignores translation).
    pub fn apply_vec(&self, v: &Vec3) -> Vec3 {
        let r = self.matrix * Vector4::new(v.x, v.y, v.z, 0.0);
        Vec3::new(r.x, r.y, r.z)
    }
}

/// Tolerance for geometric comparisons.
#[derive(Debug, Clone, Copy)]
pub struct Tolerance {
    /// Linear distance tolerance in internal units.
    pub linear: f64,
}

impl Tolerance {
    /// Default tolerance (1e-9 linear).
    pub const DEFAULT: Self = Self { linear: 1e-9 };

    /// Check if a scalar distance is effectively zero.
    pub fn is_zero(&self, d: f64) -> bool {
        d.abs() < self.linear
    }
}

/// Normalize `v` to unit length.
///
/// Fails with [`MathError::DegenerateVector`] when `|v|` is below the
/// default linear tolerance.
pub fn normalize(v: &Vec3) -> Result<Vec3, MathError> {
    let len = v.norm();
    if !len.is_finite() || Tolerance::DEFAULT.is_zero(len) {
        return Err(MathError::DegenerateVector(len));
    }
    Ok(v / len)
}

/// Horizontal unit vector perpendicular to `v`: `(-v.y, v.x, 0)` normalized.
///
/// A vertical (or zero) input has no horizontal component to turn; the
/// result is then `+Z`.
pub fn perpendicular_xy(v: &Vec3) -> Vec3 {
    normalize(&Vec3::new(-v.y, v.x, 0.0)).unwrap_or_else(|_| Vec3::z())
}

/// Unit vector along the plan projection of `v`.
///
/// Views are framed in plan, so the vertical component of a sloped direction
/// is dropped. A vertical (or zero) input falls back to `+X`.
pub fn horizontal(v: &Vec3) -> Vec3 {
    normalize(&Vec3::new(v.x, v.y, 0.0)).unwrap_or_else(|_| Vec3::x())
}

/// Rotate `v` about the vertical axis by `angle` radians.
pub fn rotate_z(v: &Vec3, angle: f64) -> Vec3 {
    Transform::rotation_z(angle).apply_vec(v)
}
