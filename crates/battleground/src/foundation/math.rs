//! Math utilities and types
//!
//! Provides the vector, quaternion and transform types used by the scene graph.
//!
//! # Axis conventions
//! - X+ = Right
//! - Y+ = Up
//! - Z+ = Forward
//!
//! Every node's heading is `rotation * Z+`.

use serde::{Deserialize, Serialize};

pub use nalgebra::{Quaternion, Unit, UnitQuaternion, Vector2, Vector3};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// Quaternion type for rotations
pub type Quat = UnitQuaternion<f32>;

/// Unit direction vectors in node-local space
pub mod directions {
    use super::Vec3;

    /// Local forward (Z+)
    pub fn forward() -> Vec3 {
        Vec3::new(0.0, 0.0, 1.0)
    }

    /// Local back (Z-)
    pub fn back() -> Vec3 {
        Vec3::new(0.0, 0.0, -1.0)
    }

    /// Local left (X-)
    pub fn left() -> Vec3 {
        Vec3::new(-1.0, 0.0, 0.0)
    }

    /// Local right (X+)
    pub fn right() -> Vec3 {
        Vec3::new(1.0, 0.0, 0.0)
    }

    /// World up (Y+)
    pub fn up() -> Vec3 {
        Vec3::new(0.0, 1.0, 0.0)
    }

    /// World down (Y-)
    pub fn down() -> Vec3 {
        Vec3::new(0.0, -1.0, 0.0)
    }
}

/// Transform representing position, rotation, and scale
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Position in parent space
    pub position: Vec3,

    /// Rotation quaternion
    pub rotation: Quat,

    /// Scale factors
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    /// Create a new identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a transform with only position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create a transform with position and rotation
    pub fn from_position_rotation(position: Vec3, rotation: Quat) -> Self {
        Self {
            position,
            rotation,
            ..Default::default()
        }
    }

    /// Builder-style uniform scale
    #[must_use]
    pub fn with_uniform_scale(mut self, scale: f32) -> Self {
        self.scale = Vec3::new(scale, scale, scale);
        self
    }

    /// Builder-style non-uniform scale
    #[must_use]
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Heading of this transform (`rotation * Z+`)
    pub fn forward(&self) -> Vec3 {
        self.rotation * directions::forward()
    }

    /// Move along a direction expressed in this transform's local axes.
    ///
    /// Scale is not applied, matching how nodes are driven by movers and the
    /// fly camera.
    pub fn translate_local(&mut self, delta: Vec3) {
        self.position += self.rotation * delta;
    }

    /// Rotate around the local Y axis by `degrees`
    pub fn yaw(&mut self, degrees: f32) {
        let turn = Quat::from_axis_angle(&Vec3::y_axis(), utils::deg_to_rad(degrees));
        self.rotation *= turn;
    }

    /// Combine this transform with a child transform (parent * child)
    pub fn combine(&self, other: &Transform) -> Transform {
        Transform {
            position: self.position + self.rotation * (self.scale.component_mul(&other.position)),
            rotation: self.rotation * other.rotation,
            scale: self.scale.component_mul(&other.scale),
        }
    }
}

/// Build a rotation from Euler angles in degrees.
///
/// Applied as yaw (Y), then pitch (X), then roll (Z): `Ry * Rx * Rz`.
pub fn rotation_from_euler_degrees(pitch: f32, yaw: f32, roll: f32) -> Quat {
    let ry = Quat::from_axis_angle(&Vec3::y_axis(), utils::deg_to_rad(yaw));
    let rx = Quat::from_axis_angle(&Vec3::x_axis(), utils::deg_to_rad(pitch));
    let rz = Quat::from_axis_angle(&Vec3::z_axis(), utils::deg_to_rad(roll));
    ry * rx * rz
}

/// Rotation whose forward axis points along `direction`.
///
/// Falls back to an alternate up axis when `direction` is parallel to `up`,
/// and to identity for a zero direction.
pub fn look_rotation(direction: Vec3, up: Vec3) -> Quat {
    let Some(dir) = direction.try_normalize(f32::EPSILON) else {
        return Quat::identity();
    };
    let up = if dir.cross(&up).norm_squared() < 1e-8 {
        directions::forward()
    } else {
        up
    };
    Quat::face_towards(&dir, &up)
}

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;
}

/// Math utility functions
pub mod utils {
    use super::constants;

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_forward_of_identity_is_z() {
        assert_relative_eq!(Transform::identity().forward(), directions::forward(), epsilon = EPSILON);
    }

    #[test]
    fn test_yaw_ninety_points_along_x() {
        let mut transform = Transform::identity();
        transform.yaw(90.0);
        assert_relative_eq!(transform.forward(), Vec3::new(1.0, 0.0, 0.0), epsilon = EPSILON);
    }

    #[test]
    fn test_translate_local_follows_heading() {
        let mut transform = Transform::identity();
        transform.yaw(90.0);
        transform.translate_local(directions::forward() * 5.0);
        assert_relative_eq!(transform.position, Vec3::new(5.0, 0.0, 0.0), epsilon = EPSILON);
    }

    #[test]
    fn test_euler_yaw_then_pitch() {
        let rotation = rotation_from_euler_degrees(90.0, 0.0, 0.0);
        // Positive pitch tilts the heading downward
        assert_relative_eq!(rotation * directions::forward(), Vec3::new(0.0, -1.0, 0.0), epsilon = EPSILON);
    }

    #[test]
    fn test_look_rotation_faces_target() {
        let direction = Vec3::new(3.0, -4.0, 12.0);
        let rotation = look_rotation(direction, directions::up());
        assert_relative_eq!(rotation * directions::forward(), direction.normalize(), epsilon = EPSILON);
    }

    #[test]
    fn test_look_rotation_parallel_up_is_finite() {
        let rotation = look_rotation(Vec3::new(0.0, -200.0, 0.0), directions::up());
        let forward = rotation * directions::forward();
        assert!(forward.iter().all(|c| c.is_finite()));
        assert_relative_eq!(forward, Vec3::new(0.0, -1.0, 0.0), epsilon = EPSILON);
    }

    #[test]
    fn test_combine_applies_parent_rotation() {
        let mut parent = Transform::from_position(Vec3::new(10.0, 0.0, 0.0));
        parent.yaw(90.0);
        let child = Transform::from_position(Vec3::new(0.0, 0.0, 2.0));
        let world = parent.combine(&child);
        assert_relative_eq!(world.position, Vec3::new(12.0, 0.0, 0.0), epsilon = EPSILON);
    }
}
