//! # Water Reflection Rig
//!
//! A secondary camera that follows the primary camera, mirrors its view across
//! the water surface and renders into an offscreen texture sampled by the water
//! material.
//!
//! ## Plane invariant
//! Both planes share the water's world-space up vector as normal, and
//! `clip_plane.distance == reflection_plane.distance - bias`. The planes are
//! derived from the water pose and recomputed whenever that pose changes.

use crate::core::ReflectionConfig;
use crate::foundation::geometry::Plane;
use crate::foundation::math::Transform;

use super::camera::{Camera, ViewMask};
use super::material::{MaterialLibrary, Technique, TextureRef, TextureUnit};
use super::texture::{CameraRef, RenderSurfaceBinding, RenderTexture, TextureFilter, TextureFormat, Viewport};

/// Name of the reflection render target
pub const REFLECTION_TEXTURE: &str = "ReflectionTexture";

/// Reflection and clip planes for a water surface pose
pub fn reflection_planes(water: &Transform, bias: f32) -> (Plane, Plane) {
    let reflection = Plane::from_surface(&water.rotation, water.position);
    let clip = Plane::from_normal_point(reflection.normal, water.position - reflection.normal * bias);
    (reflection, clip)
}

/// Reflection camera, its render target and the water material binding
#[derive(Debug)]
pub struct ReflectionRig {
    camera: Camera,
    pose: Transform,
    texture: RenderTexture,
    binding: RenderSurfaceBinding,
    water_pose: Transform,
    reflection_plane: Plane,
    clip_plane: Plane,
    bias: f32,
}

impl ReflectionRig {
    /// Build the rig for a water surface at world pose `water`.
    ///
    /// The reflection texture becomes the diffuse input of `water_material`.
    /// The camera starts at `aspect_ratio` and is resynced every frame.
    pub fn configure(
        config: &ReflectionConfig,
        water: &Transform,
        water_material: &str,
        aspect_ratio: f32,
        materials: &mut MaterialLibrary,
    ) -> Self {
        let (reflection_plane, clip_plane) = reflection_planes(water, config.clip_bias);

        let mut texture = RenderTexture::render_target(
            REFLECTION_TEXTURE,
            config.texture_size,
            config.texture_size,
            TextureFormat::Rgb,
            TextureFilter::Bilinear,
        );
        texture.set_viewport(Viewport::new(CameraRef::Reflection));

        let mut camera = Camera::with_far_clip(config.far_clip);
        camera.view_mask = ViewMask::WORLD;
        camera.enable_reflection(reflection_plane);
        camera.enable_clipping(clip_plane);
        camera.set_aspect_ratio(aspect_ratio);

        let water_mat = materials.get_or_load(water_material);
        water_mat.technique = Technique::Water;
        water_mat.set_texture(TextureUnit::Diffuse, TextureRef::RenderTarget(texture.name().to_string()));

        log::debug!(
            "Reflection rig: plane n={:?} d={:.3}, clip d={:.3}, far {}",
            reflection_plane.normal,
            reflection_plane.distance,
            clip_plane.distance,
            config.far_clip
        );

        let binding = RenderSurfaceBinding {
            camera: CameraRef::Reflection,
            texture: texture.name().to_string(),
            material: water_material.to_string(),
        };

        Self {
            camera,
            pose: Transform::identity(),
            texture,
            binding,
            water_pose: *water,
            reflection_plane,
            clip_plane,
            bias: config.clip_bias,
        }
    }

    /// Recompute both planes if the water surface moved.
    ///
    /// Returns whether anything changed.
    pub fn sync_water(&mut self, water: &Transform) -> bool {
        if water.position == self.water_pose.position && water.rotation == self.water_pose.rotation {
            return false;
        }

        let (reflection_plane, clip_plane) = reflection_planes(water, self.bias);
        self.reflection_plane = reflection_plane;
        self.clip_plane = clip_plane;
        self.camera.enable_reflection(reflection_plane);
        self.camera.enable_clipping(clip_plane);
        self.water_pose = *water;

        log::debug!("Water moved, reflection plane d={:.3}", reflection_plane.distance);
        true
    }

    /// Track the primary camera pose
    pub fn follow(&mut self, primary: &Transform) {
        self.pose = *primary;
    }

    /// Match the reflection camera to the output aspect ratio
    pub fn sync_aspect(&mut self, aspect_ratio: f32) {
        self.camera.set_aspect_ratio(aspect_ratio);
    }

    /// The reflection camera
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Pose the reflection camera shares with the primary camera
    pub fn pose(&self) -> &Transform {
        &self.pose
    }

    /// The reflection render target
    pub fn texture(&self) -> &RenderTexture {
        &self.texture
    }

    /// Camera / texture / material triple
    pub fn binding(&self) -> &RenderSurfaceBinding {
        &self.binding
    }

    /// Plane the view is mirrored across
    pub fn reflection_plane(&self) -> Plane {
        self.reflection_plane
    }

    /// Plane used for culling below the surface
    pub fn clip_plane(&self) -> Plane {
        self.clip_plane
    }

    /// Offset between the two planes
    pub fn bias(&self) -> f32 {
        self.bias
    }
}
