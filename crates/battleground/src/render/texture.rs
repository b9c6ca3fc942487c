//! Offscreen render targets and viewports

use serde::{Deserialize, Serialize};

use crate::scene::NodeId;

/// Pixel format of a render target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextureFormat {
    /// 8-bit RGB
    Rgb,
}

/// Sampling filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextureFilter {
    /// Nearest texel
    Nearest,
    /// Bilinear
    Bilinear,
    /// Trilinear with mipmaps
    Trilinear,
}

/// Camera a viewport renders from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CameraRef {
    /// The episode's primary camera
    Primary,
    /// The reflection rig's camera
    Reflection,
    /// A camera component on a scene node
    Node(NodeId),
}

/// A camera view drawn into a surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    /// Source camera
    pub camera: CameraRef,
}

impl Viewport {
    /// Viewport rendering from `camera`
    pub fn new(camera: CameraRef) -> Self {
        Self { camera }
    }
}

/// Offscreen color texture with exactly one viewport drawn into it
#[derive(Debug, Clone, PartialEq)]
pub struct RenderTexture {
    name: String,
    width: u32,
    height: u32,
    format: TextureFormat,
    filter: TextureFilter,
    viewport: Option<Viewport>,
}

impl RenderTexture {
    /// Allocate a render target
    pub fn render_target(name: impl Into<String>, width: u32, height: u32, format: TextureFormat, filter: TextureFilter) -> Self {
        let name = name.into();
        log::debug!("Render target '{name}' {width}x{height} {format:?} {filter:?}");
        Self {
            name,
            width: width.max(1),
            height: height.max(1),
            format,
            filter,
            viewport: None,
        }
    }

    /// Resource name other materials refer to
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel format
    pub fn format(&self) -> TextureFormat {
        self.format
    }

    /// Sampling filter
    pub fn filter(&self) -> TextureFilter {
        self.filter
    }

    /// Width / height of the texture
    #[allow(clippy::cast_precision_loss)]
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Viewport currently bound to the surface
    pub fn viewport(&self) -> Option<&Viewport> {
        self.viewport.as_ref()
    }

    /// Bind the surface to render `viewport`, replacing any previous binding
    pub fn set_viewport(&mut self, viewport: Viewport) {
        if let Some(previous) = self.viewport.replace(viewport) {
            if previous != viewport {
                log::debug!("Render target '{}' source {:?} -> {:?}", self.name, previous.camera, viewport.camera);
            }
        }
    }
}

/// One camera rendering into one texture consumed by one material
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderSurfaceBinding {
    /// Camera drawn into the texture
    pub camera: CameraRef,
    /// Texture the camera draws into
    pub texture: String,
    /// Material sampling the texture
    pub material: String,
}
