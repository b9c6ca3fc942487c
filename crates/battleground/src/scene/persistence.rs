//! Scene save / load
//!
//! The whole graph is written as one RON document. Loading parses and checks
//! the complete document before handing it back, so a failed load never
//! touches the scene currently in use.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::scene_graph::Scene;

/// Scene persistence errors
#[derive(Error, Debug)]
pub enum SceneIoError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The document could not be parsed
    #[error("Parse error: {0}")]
    Parse(String),

    /// The scene could not be serialized
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Parent / child links in the document disagree
    #[error("Inconsistent scene graph: {0}")]
    Inconsistent(String),

    /// A node the episode relies on is absent from the document
    #[error("Missing node: {0}")]
    MissingNode(String),
}

/// Reads and writes scene documents at a fixed path
#[derive(Debug, Clone)]
pub struct SceneStore {
    path: PathBuf,
}

impl SceneStore {
    /// Store backed by `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Document location
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the scene.
    ///
    /// The document goes to a sibling temp file first and is renamed into
    /// place, so an interrupted save leaves the previous document readable.
    pub fn save(&self, scene: &Scene) -> Result<(), SceneIoError> {
        let contents = ron::ser::to_string_pretty(scene, ron::ser::PrettyConfig::default())
            .map_err(|e| SceneIoError::Serialize(e.to_string()))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let temp = self.path.with_extension("ron.tmp");
        fs::write(&temp, contents)?;
        fs::rename(&temp, &self.path)?;

        log::info!("Saved {} nodes to {}", scene.node_count(), self.path.display());
        Ok(())
    }

    /// Read a scene with its behaviors rebuilt
    pub fn load(&self) -> Result<Scene, SceneIoError> {
        let contents = fs::read_to_string(&self.path)?;
        let mut scene: Scene = ron::from_str(&contents).map_err(|e| SceneIoError::Parse(e.to_string()))?;
        scene.check_links().map_err(SceneIoError::Inconsistent)?;
        scene.rebuild_behaviors();

        log::info!(
            "Loaded {} nodes ({} behaviors) from {}",
            scene.node_count(),
            scene.behavior_count(),
            self.path.display()
        );
        Ok(scene)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::{Transform, Vec3};
    use crate::scene::Component;
    use crate::render::Camera;

    fn temp_store(name: &str) -> SceneStore {
        let dir = std::env::temp_dir().join(format!("battleground-persistence-{}-{name}", std::process::id()));
        SceneStore::new(dir.join("scene.ron"))
    }

    #[test]
    fn test_save_then_load_keeps_handles() {
        let store = temp_store("handles");
        let mut scene = Scene::new();
        let root = scene.create_child(None, "Root", Transform::from_position(Vec3::new(1.0, 2.0, 3.0)));
        let camera = scene.create_child(Some(root), "Camera", Transform::identity());
        scene.add_component(camera, Component::Camera(Camera::with_far_clip(600.0)));

        store.save(&scene).expect("save succeeds");
        let loaded = store.load().expect("load succeeds");

        assert_eq!(loaded.node_count(), 2);
        assert_eq!(loaded.node(camera).map(|n| n.name.as_str()), Some("Camera"));
        assert_eq!(loaded.transform(root), scene.transform(root));
        assert!(loaded.node(camera).and_then(|n| n.camera()).is_some());

        let _ = fs::remove_dir_all(store.path().parent().expect("has parent"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let store = temp_store("missing");
        assert!(matches!(store.load(), Err(SceneIoError::Io(_))));
    }

    #[test]
    fn test_corrupt_file_is_parse_error() {
        let store = temp_store("corrupt");
        let dir = store.path().parent().expect("has parent").to_path_buf();
        fs::create_dir_all(&dir).expect("temp dir");
        fs::write(store.path(), "(nodes: [garbage").expect("write");

        assert!(matches!(store.load(), Err(SceneIoError::Parse(_))));
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_parent_cycle_is_inconsistent() {
        let store = temp_store("cycle");
        let mut scene = Scene::new();
        let root = scene.create_child(None, "Root", Transform::identity());
        let water = scene.create_child(Some(root), "Water", Transform::identity());
        let screen = scene.create_child(Some(water), "Screen", Transform::identity());
        if let Some(node) = scene.node_mut(root) {
            node.children.clear();
        }
        if let Some(node) = scene.node_mut(water) {
            node.parent = Some(screen);
        }
        if let Some(node) = scene.node_mut(screen) {
            node.children.push(water);
        }

        store.save(&scene).expect("save succeeds");
        assert!(matches!(store.load(), Err(SceneIoError::Inconsistent(_))));

        let _ = fs::remove_dir_all(store.path().parent().expect("has parent"));
    }
}
