//! Geometric primitives
//!
//! Axis-aligned boxes used as containment hints for movers and planes used
//! by the reflection rig.

use super::math::{Quat, Vec3};
use nalgebra::Matrix4;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box
///
/// Invariant: `min <= max` componentwise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Minimum corner of the bounding box
    pub min: Vec3,
    /// Maximum corner of the bounding box
    pub max: Vec3,
}

impl BoundingBox {
    /// Create a new box from two corners, sorting each component so the
    /// `min <= max` invariant holds.
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.inf(&b),
            max: a.sup(&b),
        }
    }

    /// Box spanning `[-half_x, half_x]` on X and `[-half_z, half_z]` on Z,
    /// flat on Y. Movers only consult X and Z.
    pub fn horizontal(half_x: f32, half_z: f32) -> Self {
        Self::new(Vec3::new(-half_x, 0.0, -half_z), Vec3::new(half_x, 0.0, half_z))
    }

    /// Cube centered at the origin with the given half extent
    pub fn symmetric(half_extent: f32) -> Self {
        let extent = Vec3::new(half_extent, half_extent, half_extent);
        Self::new(-extent, extent)
    }

    /// Check if this box contains a point
    pub fn contains_point(&self, point: Vec3) -> bool {
        point.x >= self.min.x && point.x <= self.max.x &&
        point.y >= self.min.y && point.y <= self.max.y &&
        point.z >= self.min.z && point.z <= self.max.z
    }

    /// Check whether a point lies outside the box on X or Z (Y ignored)
    pub fn is_outside_horizontal(&self, point: Vec3) -> bool {
        point.x < self.min.x || point.x > self.max.x ||
        point.z < self.min.z || point.z > self.max.z
    }
}

/// Plane defined by a unit normal and its signed distance from the origin
///
/// A point `p` lies on the plane when `normal · p == distance`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    /// Unit normal vector
    pub normal: Vec3,
    /// Signed distance from origin along the normal
    pub distance: f32,
}

impl Plane {
    /// Create a plane from a normal and a point on it
    pub fn from_normal_point(normal: Vec3, point: Vec3) -> Self {
        let normal = normal.normalize();
        Self {
            normal,
            distance: normal.dot(&point),
        }
    }

    /// Horizontal plane of a surface with the given world rotation and
    /// position: the surface's local up becomes the normal.
    pub fn from_surface(rotation: &Quat, position: Vec3) -> Self {
        Self::from_normal_point(rotation * Vec3::y(), position)
    }

    /// Signed distance from the plane to a point (positive on the normal side)
    pub fn distance_to_point(&self, point: Vec3) -> f32 {
        self.normal.dot(&point) - self.distance
    }

    /// Mirror a point across the plane
    pub fn reflect_point(&self, point: Vec3) -> Vec3 {
        point - self.normal * (2.0 * self.distance_to_point(point))
    }

    /// Householder reflection matrix across this plane
    pub fn reflection_matrix(&self) -> Matrix4<f32> {
        let n = self.normal;
        let d = self.distance;
        Matrix4::new(
            1.0 - 2.0 * n.x * n.x, -2.0 * n.x * n.y, -2.0 * n.x * n.z, 2.0 * n.x * d,
            -2.0 * n.y * n.x, 1.0 - 2.0 * n.y * n.y, -2.0 * n.y * n.z, 2.0 * n.y * d,
            -2.0 * n.z * n.x, -2.0 * n.z * n.y, 1.0 - 2.0 * n.z * n.z, 2.0 * n.z * d,
            0.0, 0.0, 0.0, 1.0,
        )
    }
}
