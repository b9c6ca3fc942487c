//! # Camera Descriptors
//!
//! Projection and culling parameters of a camera. The pose lives on whatever
//! owns the camera (a scene node, the primary camera rig, or the reflection
//! rig), so a `Camera` here is pure configuration.
//!
//! ## Reflection and clipping
//! A camera can mirror its view across a [`Plane`] and cull everything on the
//! negative side of a second plane. The reflection rig uses both to render the
//! water surface without reflecting geometry below it.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::foundation::geometry::Plane;
use crate::foundation::math::{Transform, Vec3};

bitflags! {
    /// Visibility mask: a drawable is rendered by a camera when their masks overlap
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct ViewMask: u32 {
        /// Everything except the water surface
        const WORLD = 0x7FFF_FFFF;
        /// The water surface
        const WATER = 0x8000_0000;
    }
}

impl Default for ViewMask {
    fn default() -> Self {
        Self::all()
    }
}

/// Camera projection and culling configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Vertical field of view in degrees
    pub fov: f32,

    /// Distance to near clipping plane
    pub near_clip: f32,

    /// Distance to far clipping plane
    pub far_clip: f32,

    /// Width / height of the image the camera renders into
    aspect_ratio: f32,

    /// Whether the host derives the aspect ratio from the viewport
    pub auto_aspect_ratio: bool,

    /// Which drawables the camera sees
    pub view_mask: ViewMask,

    /// Mirror the view across `reflection_plane`
    pub use_reflection: bool,

    /// Plane the view is mirrored across
    pub reflection_plane: Plane,

    /// Cull geometry behind `clip_plane`
    pub use_clipping: bool,

    /// Plane used for culling
    pub clip_plane: Plane,
}

impl Default for Camera {
    fn default() -> Self {
        let horizon = Plane::from_normal_point(Vec3::y(), Vec3::zeros());
        Self {
            fov: 45.0,
            near_clip: 0.1,
            far_clip: 1000.0,
            aspect_ratio: 1.0,
            auto_aspect_ratio: true,
            view_mask: ViewMask::default(),
            use_reflection: false,
            reflection_plane: horizon,
            use_clipping: false,
            clip_plane: horizon,
        }
    }
}

impl Camera {
    /// Create a camera with the given far clip distance
    pub fn with_far_clip(far_clip: f32) -> Self {
        Self {
            far_clip,
            ..Default::default()
        }
    }

    /// Current aspect ratio
    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    /// Lock the aspect ratio to an explicit value.
    ///
    /// Disables automatic aspect ratio so the host stops overriding it.
    pub fn set_aspect_ratio(&mut self, aspect_ratio: f32) {
        if !aspect_ratio.is_finite() || aspect_ratio <= 0.0 {
            log::warn!("Ignoring invalid aspect ratio {aspect_ratio}");
            return;
        }

        let aspect_change = (aspect_ratio - self.aspect_ratio).abs();
        if aspect_change > 0.01 {
            log::trace!("Camera aspect ratio {:.3} -> {:.3}", self.aspect_ratio, aspect_ratio);
        }

        self.aspect_ratio = aspect_ratio;
        self.auto_aspect_ratio = false;
    }

    /// Mirror the view across `plane`
    pub fn enable_reflection(&mut self, plane: Plane) {
        self.use_reflection = true;
        self.reflection_plane = plane;
    }

    /// Cull geometry on the negative side of `plane`
    pub fn enable_clipping(&mut self, plane: Plane) {
        self.use_clipping = true;
        self.clip_plane = plane;
    }

    /// Whether a drawable with `mask` is visible to this camera
    pub fn sees(&self, mask: ViewMask) -> bool {
        self.view_mask.intersects(mask)
    }

    /// Pose the camera effectively renders from.
    ///
    /// With reflection enabled the position and heading are mirrored across the
    /// reflection plane.
    pub fn effective_view(&self, pose: &Transform) -> (Vec3, Vec3) {
        let forward = pose.forward();
        if !self.use_reflection {
            return (pose.position, forward);
        }
        let plane = &self.reflection_plane;
        let position = plane.reflect_point(pose.position);
        let forward = forward - plane.normal * (2.0 * plane.normal.dot(&forward));
        (position, forward)
    }

    /// Whether clip-plane culling removes the point
    pub fn is_clipped(&self, point: Vec3) -> bool {
        self.use_clipping && self.clip_plane.distance_to_point(point) < 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::rotation_from_euler_degrees;
    use approx::assert_relative_eq;

    #[test]
    fn test_world_mask_excludes_water() {
        let mut camera = Camera::default();
        assert!(camera.sees(ViewMask::WATER));

        camera.view_mask = ViewMask::WORLD;
        assert!(!camera.sees(ViewMask::WATER));
        assert!(camera.sees(ViewMask::WORLD));
        assert_eq!(ViewMask::WORLD.bits() | ViewMask::WATER.bits(), u32::MAX);
    }

    #[test]
    fn test_set_aspect_ratio_disables_auto() {
        let mut camera = Camera::default();
        camera.set_aspect_ratio(16.0 / 9.0);
        assert!(!camera.auto_aspect_ratio);
        assert_relative_eq!(camera.aspect_ratio(), 16.0 / 9.0);

        camera.set_aspect_ratio(0.0);
        assert_relative_eq!(camera.aspect_ratio(), 16.0 / 9.0);
    }

    #[test]
    fn test_reflected_view_mirrors_across_plane() {
        let mut camera = Camera::default();
        camera.enable_reflection(Plane::from_normal_point(Vec3::y(), Vec3::new(0.0, 5.0, 0.0)));

        let pose = Transform::from_position_rotation(Vec3::new(0.0, 50.0, 0.0), rotation_from_euler_degrees(45.0, 0.0, 0.0));
        let (position, forward) = camera.effective_view(&pose);

        assert_relative_eq!(position, Vec3::new(0.0, -40.0, 0.0), epsilon = 1e-4);
        assert!(forward.y > 0.0);
    }

    #[test]
    fn test_clipping_only_when_enabled() {
        let mut camera = Camera::default();
        let below = Vec3::new(0.0, -1.0, 0.0);
        assert!(!camera.is_clipped(below));

        camera.enable_clipping(Plane::from_normal_point(Vec3::y(), Vec3::zeros()));
        assert!(camera.is_clipped(below));
        assert!(!camera.is_clipped(Vec3::new(0.0, 1.0, 0.0)));
    }
}
