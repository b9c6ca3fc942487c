//! Asset lookup
//!
//! Loading model and animation data is the host's job. The episode only needs
//! to know whether an animation exists and how long it runs, so assets are
//! reached through the [`AssetSource`] trait.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::config::Config;

/// Metadata of a loaded animation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationClip {
    /// Resource path of the animation
    pub name: String,
    /// Length in seconds
    pub length: f32,
}

/// Anything that can resolve animation resources
pub trait AssetSource {
    /// Look up an animation by resource path.
    ///
    /// `None` means the asset is missing; callers treat that as "no animation".
    fn animation(&self, path: &str) -> Option<AnimationClip>;
}

/// Known animation clips and their lengths
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetManifest {
    /// Clip length in seconds keyed by resource path
    pub animations: HashMap<String, f32>,
}

impl Default for AssetManifest {
    fn default() -> Self {
        let animations = [
            ("Models/Mutant/Mutant_Run.ani", 0.7),
            ("Models/Mutant/Mutant_Jump.ani", 1.2),
            ("Models/X_Bot/X_Bot_Run.ani", 0.73),
            ("Models/X_Bot/X_Bot_Run2.ani", 0.8),
            ("Models/Swat/Swat_SprintFwd.ani", 0.63),
        ]
        .into_iter()
        .map(|(name, length)| (name.to_string(), length))
        .collect();

        Self { animations }
    }
}

impl AssetManifest {
    /// Manifest without any clips
    pub fn empty() -> Self {
        Self {
            animations: HashMap::new(),
        }
    }

    /// Register a clip
    pub fn insert(&mut self, name: impl Into<String>, length: f32) {
        self.animations.insert(name.into(), length);
    }
}

impl Config for AssetManifest {}

impl AssetSource for AssetManifest {
    fn animation(&self, path: &str) -> Option<AnimationClip> {
        let length = *self.animations.get(path)?;
        if length <= 0.0 {
            log::warn!("Animation {path} has non-positive length {length}, ignoring");
            return None;
        }
        Some(AnimationClip {
            name: path.to_string(),
            length,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_manifest_resolves_run_clips() {
        let manifest = AssetManifest::default();
        let clip = manifest.animation("Models/Mutant/Mutant_Run.ani").expect("clip is known");
        assert_eq!(clip.name, "Models/Mutant/Mutant_Run.ani");
        assert!(clip.length > 0.0);
    }

    #[test]
    fn test_missing_and_degenerate_clips_are_absent() {
        let mut manifest = AssetManifest::empty();
        manifest.insert("Models/Broken.ani", 0.0);
        assert!(manifest.animation("Models/Unknown.ani").is_none());
        assert!(manifest.animation("Models/Broken.ani").is_none());
    }
}
