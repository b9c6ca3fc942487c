//! Material descriptors and the material library

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Shading path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Technique {
    /// Lit diffuse texture
    Diffuse,
    /// Diffuse texture without lighting
    DiffUnlit,
    /// Animated water surface
    Water,
}

/// Texture slot of a material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TextureUnit {
    /// Primary color input
    Diffuse,
    /// Normal map
    Normal,
    /// Specular map
    Specular,
    /// Environment map
    Environment,
}

/// Where a texture input comes from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextureRef {
    /// Texture file on disk
    Resource(String),
    /// Offscreen render target by name
    RenderTarget(String),
}

/// Depth bias applied when rasterizing a material
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BiasParameters {
    /// Constant bias
    pub constant: f32,
    /// Slope-scaled bias
    pub slope_scaled: f32,
}

impl BiasParameters {
    /// Create bias parameters
    pub fn new(constant: f32, slope_scaled: f32) -> Self {
        Self { constant, slope_scaled }
    }
}

/// Surface material
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    /// Resource name
    pub name: String,
    /// Shading path
    pub technique: Technique,
    /// Bound textures
    pub textures: HashMap<TextureUnit, TextureRef>,
    /// Depth bias
    pub depth_bias: BiasParameters,
}

impl Material {
    /// Create a material with no textures
    pub fn new(name: impl Into<String>, technique: Technique) -> Self {
        Self {
            name: name.into(),
            technique,
            textures: HashMap::new(),
            depth_bias: BiasParameters::default(),
        }
    }

    /// Bind a texture to a unit
    pub fn set_texture(&mut self, unit: TextureUnit, texture: TextureRef) {
        self.textures.insert(unit, texture);
    }

    /// Texture bound to a unit
    pub fn texture(&self, unit: TextureUnit) -> Option<&TextureRef> {
        self.textures.get(&unit)
    }
}

/// Named materials shared by the episode
#[derive(Debug, Default)]
pub struct MaterialLibrary {
    materials: HashMap<String, Material>,
}

impl MaterialLibrary {
    /// Create an empty library
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch a material, creating a lit diffuse one on first use
    pub fn get_or_load(&mut self, name: &str) -> &mut Material {
        self.materials.entry(name.to_string()).or_insert_with(|| {
            log::debug!("Loaded material {name}");
            Material::new(name, Technique::Diffuse)
        })
    }

    /// Insert or replace a material
    pub fn insert(&mut self, material: Material) {
        self.materials.insert(material.name.clone(), material);
    }

    /// Look up a material
    pub fn get(&self, name: &str) -> Option<&Material> {
        self.materials.get(name)
    }

    /// Number of materials
    pub fn len(&self) -> usize {
        self.materials.len()
    }

    /// Whether the library is empty
    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    /// Materials sampling the given render target
    pub fn consumers_of(&self, render_target: &str) -> Vec<&str> {
        self.materials
            .values()
            .filter(|material| {
                material
                    .textures
                    .values()
                    .any(|texture| matches!(texture, TextureRef::RenderTarget(name) if name == render_target))
            })
            .map(|material| material.name.as_str())
            .collect()
    }
}
