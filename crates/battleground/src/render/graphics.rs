//! Output surface state

use super::texture::Viewport;

/// Back buffer resolution and the viewports drawn into it
#[derive(Debug)]
pub struct Graphics {
    width: u32,
    height: u32,
    viewports: Vec<Viewport>,
}

impl Graphics {
    /// Create the output with an initial resolution
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
            viewports: Vec::new(),
        }
    }

    /// Output width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Output height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Width / height of the output
    #[allow(clippy::cast_precision_loss)]
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Apply a resize. A zero dimension (minimized window) is clamped to 1.
    pub fn resize(&mut self, width: u32, height: u32) {
        let (width, height) = (width.max(1), height.max(1));
        if (width, height) != (self.width, self.height) {
            log::info!("Output resized {}x{} -> {}x{}", self.width, self.height, width, height);
        }
        self.width = width;
        self.height = height;
    }

    /// Register the viewport drawn into back buffer slot `index`
    pub fn set_viewport(&mut self, index: usize, viewport: Viewport) {
        if index >= self.viewports.len() {
            self.viewports.resize(index + 1, viewport);
        }
        self.viewports[index] = viewport;
    }

    /// Viewport at a back buffer slot
    pub fn viewport(&self, index: usize) -> Option<&Viewport> {
        self.viewports.get(index)
    }

    /// Number of back buffer viewports
    pub fn num_viewports(&self) -> usize {
        self.viewports.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::texture::CameraRef;

    #[test]
    fn test_resize_updates_aspect() {
        let mut graphics = Graphics::new(1280, 720);
        graphics.resize(800, 800);
        assert_eq!(graphics.aspect_ratio(), 1.0);

        graphics.resize(640, 0);
        assert_eq!(graphics.height(), 1);
        assert_eq!(graphics.aspect_ratio(), 640.0);
    }

    #[test]
    fn test_set_viewport_slot() {
        let mut graphics = Graphics::new(100, 100);
        graphics.set_viewport(0, Viewport::new(CameraRef::Primary));
        assert_eq!(graphics.num_viewports(), 1);
        assert_eq!(graphics.viewport(0).map(|v| v.camera), Some(CameraRef::Primary));
    }
}
