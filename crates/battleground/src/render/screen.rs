//! Security screen rig
//!
//! The observer camera renders into its own target, shown on an in-world
//! screen through an unlit material so the feed reads as a flat display.

use crate::core::ScreenConfig;
use crate::scene::Scene;

use super::material::{BiasParameters, Material, MaterialLibrary, Technique, TextureRef, TextureUnit};
use super::texture::{CameraRef, RenderSurfaceBinding, RenderTexture, TextureFilter, TextureFormat, Viewport};

/// Name of the screen render target
pub const SCREEN_TEXTURE: &str = "ScreenTexture";

/// Name of the screen material
pub const SCREEN_MATERIAL: &str = "ScreenMaterial";

/// Observer camera feed bound to the screen surface
#[derive(Debug)]
pub struct ScreenRig {
    texture: RenderTexture,
    binding: RenderSurfaceBinding,
}

impl ScreenRig {
    /// Allocate the feed target and the unlit screen material showing it
    pub fn configure(config: &ScreenConfig, source: CameraRef, materials: &mut MaterialLibrary) -> Self {
        let mut texture = RenderTexture::render_target(
            SCREEN_TEXTURE,
            config.texture_width,
            config.texture_height,
            TextureFormat::Rgb,
            TextureFilter::Bilinear,
        );
        texture.set_viewport(Viewport::new(source));

        let mut material = Material::new(SCREEN_MATERIAL, Technique::DiffUnlit);
        material.set_texture(TextureUnit::Diffuse, TextureRef::RenderTarget(texture.name().to_string()));
        material.depth_bias = BiasParameters::new(config.depth_bias, 0.0);
        materials.insert(material);

        log::debug!("Screen rig {}x{} fed by {:?}", texture.width(), texture.height(), source);

        let binding = RenderSurfaceBinding {
            camera: source,
            texture: texture.name().to_string(),
            material: SCREEN_MATERIAL.to_string(),
        };

        Self { texture, binding }
    }

    /// Switch the camera feeding the screen
    pub fn bind_source(&mut self, source: CameraRef) {
        self.texture.set_viewport(Viewport::new(source));
        self.binding.camera = source;
    }

    /// Camera currently feeding the screen
    pub fn source(&self) -> CameraRef {
        self.binding.camera
    }

    /// Match the feed camera to the output aspect ratio.
    ///
    /// Only scene-node cameras are synced here; the primary and reflection
    /// cameras are handled by their owners.
    pub fn sync_aspect(&self, scene: &mut Scene, aspect_ratio: f32) {
        if let CameraRef::Node(node) = self.binding.camera {
            if let Some(camera) = scene.camera_mut(node) {
                camera.set_aspect_ratio(aspect_ratio);
            }
        }
    }

    /// The feed render target
    pub fn texture(&self) -> &RenderTexture {
        &self.texture
    }

    /// Camera / texture / material triple
    pub fn binding(&self) -> &RenderSurfaceBinding {
        &self.binding
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Transform;
    use crate::render::camera::Camera;
    use crate::scene::Component;
    use approx::assert_relative_eq;

    #[test]
    fn test_screen_material_is_unlit_with_bias() {
        let mut materials = MaterialLibrary::new();
        let rig = ScreenRig::configure(&ScreenConfig::default(), CameraRef::Primary, &mut materials);

        let material = materials.get(SCREEN_MATERIAL).expect("screen material");
        assert_eq!(material.technique, Technique::DiffUnlit);
        assert_relative_eq!(material.depth_bias.constant, -0.001);
        assert_eq!(material.texture(TextureUnit::Diffuse), Some(&TextureRef::RenderTarget(SCREEN_TEXTURE.to_string())));
        assert_eq!((rig.texture().width(), rig.texture().height()), (1024, 768));
        assert_eq!(materials.consumers_of(SCREEN_TEXTURE), vec![SCREEN_MATERIAL]);
    }

    #[test]
    fn test_rebinding_source_and_aspect_sync() {
        let mut scene = Scene::new();
        let observer = scene.create_child(None, "ObserverCamera", Transform::identity());
        scene.add_component(observer, Component::Camera(Camera::with_far_clip(600.0)));

        let mut materials = MaterialLibrary::new();
        let mut rig = ScreenRig::configure(&ScreenConfig::default(), CameraRef::Primary, &mut materials);
        rig.bind_source(CameraRef::Node(observer));
        rig.sync_aspect(&mut scene, 2.0);

        assert_eq!(rig.source(), CameraRef::Node(observer));
        assert_eq!(rig.texture().viewport().map(|v| v.camera), Some(CameraRef::Node(observer)));
        let camera = scene.camera_mut(observer).expect("observer camera");
        assert_relative_eq!(camera.aspect_ratio(), 2.0);
    }
}
