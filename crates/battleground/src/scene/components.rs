//! Node components
//!
//! Plain data attached to scene nodes. Rendering, physics and animation
//! blending act on these in the host; the episode only creates them, reads
//! them back after a load, and steps animation track time.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::foundation::geometry::BoundingBox;
use crate::foundation::math::Vec3;
use crate::movement::MovementConfig;
use crate::render::{Camera, ViewMask};

bitflags! {
    /// Physics collision layer
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct CollisionLayer: u32 {
        /// Moving bodies
        const DYNAMIC = 1 << 0;
        /// Terrain and other static geometry
        const STATIC = 1 << 1;
    }
}

impl Default for CollisionLayer {
    fn default() -> Self {
        Self::DYNAMIC
    }
}

/// Playback state of one animation on an animated model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationTrack {
    /// Animation resource
    pub animation: String,
    /// Clip length in seconds
    pub length: f32,
    /// Current playback time
    pub time: f32,
    /// Blend weight
    pub weight: f32,
    /// Wrap around at the end instead of stopping
    pub looped: bool,
}

impl AnimationTrack {
    /// Start a track at `time`
    pub fn new(animation: impl Into<String>, length: f32, time: f32) -> Self {
        let mut track = Self {
            animation: animation.into(),
            length,
            time: 0.0,
            weight: 1.0,
            looped: true,
        };
        track.set_time(time);
        track
    }

    /// Jump to a playback time
    pub fn set_time(&mut self, time: f32) {
        self.time = self.wrap(time);
    }

    /// Advance playback by `delta` seconds
    pub fn advance(&mut self, delta: f32) {
        self.time = self.wrap(self.time + delta);
    }

    fn wrap(&self, time: f32) -> f32 {
        if self.length <= 0.0 {
            return 0.0;
        }
        if self.looped {
            time.rem_euclid(self.length)
        } else {
            time.clamp(0.0, self.length)
        }
    }
}

/// Rigid body simulated by the host physics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RigidBody {
    /// Mass in kilograms
    pub mass: f32,
    /// Initial / current linear velocity
    pub linear_velocity: Vec3,
    /// Rolling friction coefficient
    pub rolling_friction: f32,
    /// Per-axis angular response; zero keeps the body upright
    pub angular_factor: Vec3,
    /// Collision layer
    pub collision_layer: CollisionLayer,
}

impl RigidBody {
    /// Dynamic body with the given mass
    pub fn dynamic(mass: f32) -> Self {
        Self {
            mass,
            linear_velocity: Vec3::zeros(),
            rolling_friction: 0.0,
            angular_factor: Vec3::new(1.0, 1.0, 1.0),
            collision_layer: CollisionLayer::DYNAMIC,
        }
    }

    /// Immovable body on the static layer
    pub fn fixed() -> Self {
        Self {
            mass: 0.0,
            collision_layer: CollisionLayer::STATIC,
            ..Self::dynamic(0.0)
        }
    }

    /// Body that cannot tip over
    #[must_use]
    pub fn upright(mut self) -> Self {
        self.angular_factor = Vec3::zeros();
        self
    }
}

/// Collision shape paired with a rigid body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CollisionShape {
    /// Sphere
    Sphere {
        /// Diameter before node scale
        diameter: f32,
    },
    /// Box
    Box {
        /// Size before node scale
        size: Vec3,
    },
    /// Upright capsule
    Capsule {
        /// Diameter
        diameter: f32,
        /// Total height
        height: f32,
        /// Offset from the node origin
        offset: Vec3,
    },
    /// Heightfield taken from the node's terrain
    Terrain,
}

/// Static mesh
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaticModel {
    /// Model resource
    pub model: String,
    /// Material resource
    pub material: String,
    /// Shadow casting
    pub cast_shadows: bool,
    /// Cameras that see this model
    pub view_mask: ViewMask,
}

impl StaticModel {
    /// Visible-to-all model
    pub fn new(model: impl Into<String>, material: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            material: material.into(),
            cast_shadows: false,
            view_mask: ViewMask::default(),
        }
    }

    /// Builder-style shadow casting
    #[must_use]
    pub fn with_shadows(mut self) -> Self {
        self.cast_shadows = true;
        self
    }
}

/// Skinned mesh with an optional playing track
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimatedModel {
    /// Model resource
    pub model: String,
    /// Material resource
    pub material: String,
    /// Active track; absent when the animation asset is missing
    pub track: Option<AnimationTrack>,
}

/// Ambient and fog settings for a region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    /// Region covered
    pub bounds: BoundingBox,
    /// Ambient light color
    pub ambient_color: Vec3,
    /// Fog color
    pub fog_color: Vec3,
    /// Distance fog starts
    pub fog_start: f32,
    /// Distance fog is opaque
    pub fog_end: f32,
}

/// Light source; directional lights shine along the node's forward axis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Light {
    /// Directional rather than point
    pub directional: bool,
    /// Shadow casting
    pub cast_shadows: bool,
}

/// Heightmap terrain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Terrain {
    /// Heightmap image resource
    pub heightmap: String,
    /// Material resource
    pub material: String,
    /// Vertices per patch side
    pub patch_size: u32,
    /// Distance between heightmap samples
    pub spacing: Vec3,
}

/// Sky model drawn behind everything
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skybox {
    /// Model resource
    pub model: String,
    /// Material resource
    pub material: String,
}

/// Everything a node can carry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Component {
    /// Static mesh
    StaticModel(StaticModel),
    /// Skinned mesh
    AnimatedModel(AnimatedModel),
    /// Camera
    Camera(Camera),
    /// Rigid body
    RigidBody(RigidBody),
    /// Collision shape
    CollisionShape(CollisionShape),
    /// Zone
    Zone(Zone),
    /// Light
    Light(Light),
    /// Terrain
    Terrain(Terrain),
    /// Skybox
    Skybox(Skybox),
    /// Autonomous movement parameters
    Movement(MovementConfig),
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_looped_track_wraps() {
        let mut track = AnimationTrack::new("Run", 1.0, 0.75);
        track.advance(0.5);
        assert_relative_eq!(track.time, 0.25, epsilon = 1e-6);
    }

    #[test]
    fn test_one_shot_track_clamps() {
        let mut track = AnimationTrack::new("Jump", 1.0, 0.0);
        track.looped = false;
        track.advance(3.0);
        assert_relative_eq!(track.time, 1.0);
    }

    #[test]
    fn test_start_time_is_wrapped_into_clip() {
        let track = AnimationTrack::new("Run", 2.0, 5.0);
        assert_relative_eq!(track.time, 1.0, epsilon = 1e-6);
        assert_relative_eq!(track.weight, 1.0);
    }

    #[test]
    fn test_upright_body_has_no_angular_response() {
        let body = RigidBody::dynamic(10.0).upright();
        assert_eq!(body.angular_factor, Vec3::zeros());
        assert_eq!(RigidBody::fixed().collision_layer, CollisionLayer::STATIC);
    }
}
