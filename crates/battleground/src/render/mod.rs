//! # Render Descriptors
//!
//! The renderer itself is provided by the host. This module describes what the
//! episode asks of it: cameras, offscreen targets, materials, back buffer
//! viewports, and the two render-to-texture rigs built from them.

pub mod camera;
pub mod graphics;
pub mod material;
pub mod reflection;
pub mod screen;
pub mod texture;

pub use camera::{Camera, ViewMask};
pub use graphics::Graphics;
pub use material::{BiasParameters, Material, MaterialLibrary, Technique, TextureRef, TextureUnit};
pub use reflection::{reflection_planes, ReflectionRig};
pub use screen::ScreenRig;
pub use texture::{CameraRef, RenderSurfaceBinding, RenderTexture, TextureFilter, TextureFormat, Viewport};
