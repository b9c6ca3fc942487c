//! Scene graph
//!
//! Nodes live in a slot map so their handles stay valid across a save/load
//! cycle. Each node has a local transform relative to its parent and a list
//! of components. Per-frame behaviors are held next to the node storage and
//! rebuilt from `Movement` components whenever a scene is loaded.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use slotmap::{new_key_type, SlotMap};

use crate::foundation::math::Transform;
use crate::movement::{Behavior, BehaviorScheduler, MovementConfig};
use crate::render::Camera;

use super::components::{AnimationTrack, Component};

new_key_type! {
    /// Stable handle to a scene node
    pub struct NodeId;
}

/// Node storage
pub type NodeArena = SlotMap<NodeId, Node>;

/// A named node with a local transform and components
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Display name
    pub name: String,
    /// Parent node, `None` for roots
    pub parent: Option<NodeId>,
    /// Child nodes in creation order
    pub children: Vec<NodeId>,
    /// Transform relative to the parent
    pub transform: Transform,
    /// Attached components
    pub components: Vec<Component>,
}

impl Node {
    fn new(name: &str, parent: Option<NodeId>, transform: Transform) -> Self {
        Self {
            name: name.to_string(),
            parent,
            children: Vec::new(),
            transform,
            components: Vec::new(),
        }
    }

    /// Movement parameters, if the node is autonomous
    pub fn movement(&self) -> Option<&MovementConfig> {
        self.components.iter().find_map(|component| match component {
            Component::Movement(config) => Some(config),
            _ => None,
        })
    }

    /// Mutable movement parameters
    pub fn movement_mut(&mut self) -> Option<&mut MovementConfig> {
        self.components.iter_mut().find_map(|component| match component {
            Component::Movement(config) => Some(config),
            _ => None,
        })
    }

    /// Camera component
    pub fn camera(&self) -> Option<&Camera> {
        self.components.iter().find_map(|component| match component {
            Component::Camera(camera) => Some(camera),
            _ => None,
        })
    }

    /// Mutable camera component
    pub fn camera_mut(&mut self) -> Option<&mut Camera> {
        self.components.iter_mut().find_map(|component| match component {
            Component::Camera(camera) => Some(camera),
            _ => None,
        })
    }

    /// Active animation track of an animated model on this node
    pub fn animation_track_mut(&mut self) -> Option<&mut AnimationTrack> {
        self.components.iter_mut().find_map(|component| match component {
            Component::AnimatedModel(model) => model.track.as_mut(),
            _ => None,
        })
    }
}

/// Scene graph root
#[derive(Serialize, Deserialize)]
pub struct Scene {
    nodes: NodeArena,
    roots: Vec<NodeId>,
    #[serde(skip)]
    behaviors: BehaviorScheduler,
}

impl fmt::Debug for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scene")
            .field("nodes", &self.nodes.len())
            .field("roots", &self.roots.len())
            .field("behaviors", &self.behaviors.len())
            .finish()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Create an empty scene
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            roots: Vec::new(),
            behaviors: BehaviorScheduler::new(),
        }
    }

    /// Create a node under `parent`, or a root node when `parent` is `None`
    ///
    /// # Panics
    /// Panics if `parent` is not a node of this scene.
    pub fn create_child(&mut self, parent: Option<NodeId>, name: &str, transform: Transform) -> NodeId {
        if let Some(parent) = parent {
            assert!(self.nodes.contains_key(parent), "parent of '{name}' is not in the scene");
        }

        let id = self.nodes.insert(Node::new(name, parent, transform));
        match parent {
            Some(parent) => self.nodes[parent].children.push(id),
            None => self.roots.push(id),
        }
        id
    }

    /// Attach a component to a node
    pub fn add_component(&mut self, id: NodeId, component: Component) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.components.push(component);
        } else {
            log::warn!("Dropping component for missing node {id:?}");
        }
    }

    /// Look up a node
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Look up a node mutably
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    /// Whether the handle refers to a live node
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Root nodes in creation order
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// All nodes
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter()
    }

    /// All nodes, mutably
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (NodeId, &mut Node)> {
        self.nodes.iter_mut()
    }

    /// Local transform of a node
    pub fn transform(&self, id: NodeId) -> Option<&Transform> {
        self.nodes.get(id).map(|node| &node.transform)
    }

    /// Mutable local transform of a node
    pub fn transform_mut(&mut self, id: NodeId) -> Option<&mut Transform> {
        self.nodes.get_mut(id).map(|node| &mut node.transform)
    }

    /// Transform of a node in world space
    pub fn world_transform(&self, id: NodeId) -> Option<Transform> {
        let node = self.nodes.get(id)?;
        match node.parent {
            Some(parent) => Some(self.world_transform(parent)?.combine(&node.transform)),
            None => Some(node.transform),
        }
    }

    /// Move a node under `parent`, or make it a root when `parent` is `None`.
    ///
    /// Returns `false` and changes nothing when either node is missing or
    /// the move would put the node under itself.
    pub fn set_parent(&mut self, id: NodeId, parent: Option<NodeId>) -> bool {
        if !self.nodes.contains_key(id) {
            return false;
        }
        if let Some(parent) = parent {
            let mut ancestor = Some(parent);
            while let Some(current) = ancestor {
                if current == id {
                    return false;
                }
                match self.nodes.get(current) {
                    Some(node) => ancestor = node.parent,
                    None => return false,
                }
            }
        }

        let old_parent = self.nodes[id].parent;
        match old_parent.and_then(|old| self.nodes.get_mut(old)) {
            Some(old) => old.children.retain(|&child| child != id),
            None => self.roots.retain(|&root| root != id),
        }
        match parent {
            Some(parent) => self.nodes[parent].children.push(id),
            None => self.roots.push(id),
        }
        self.nodes[id].parent = parent;
        true
    }

    /// Camera component on a node
    pub fn camera_mut(&mut self, id: NodeId) -> Option<&mut Camera> {
        self.nodes.get_mut(id)?.camera_mut()
    }

    /// First node with the given name
    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        self.nodes.iter().find(|(_, node)| node.name == name).map(|(id, _)| id)
    }

    /// Register a per-frame behavior
    pub fn add_behavior(&mut self, behavior: Box<dyn Behavior>) {
        self.behaviors.add(behavior);
    }

    /// Number of registered behaviors
    pub fn behavior_count(&self) -> usize {
        self.behaviors.len()
    }

    /// Recreate behaviors from the `Movement` components in the scene
    pub fn rebuild_behaviors(&mut self) {
        self.behaviors = BehaviorScheduler::from_nodes(&self.nodes);
    }

    /// Run every behavior once
    pub fn update(&mut self, delta_time: f32) {
        self.behaviors.tick(&mut self.nodes, delta_time);
    }

    /// Check that parent and child links agree.
    ///
    /// Returns a description of the first broken link.
    pub fn check_links(&self) -> Result<(), String> {
        for &root in &self.roots {
            match self.nodes.get(root) {
                Some(node) if node.parent.is_none() => {}
                Some(node) => return Err(format!("root '{}' has a parent", node.name)),
                None => return Err(format!("root {root:?} does not exist")),
            }
        }

        for (id, node) in &self.nodes {
            for &child in &node.children {
                match self.nodes.get(child) {
                    Some(child_node) if child_node.parent == Some(id) => {}
                    _ => return Err(format!("child {child:?} of '{}' is missing or detached", node.name)),
                }
            }
            match node.parent {
                Some(parent) if !self.nodes.get(parent).is_some_and(|p| p.children.contains(&id)) => {
                    return Err(format!("'{}' is not listed by its parent", node.name));
                }
                None if !self.roots.contains(&id) => {
                    return Err(format!("'{}' has no parent and is not a root", node.name));
                }
                _ => {}
            }
        }

        // Every node must hang off exactly one root; anything left over sits in a parent cycle
        let mut reached = HashSet::with_capacity(self.nodes.len());
        let mut pending = self.roots.clone();
        while let Some(id) = pending.pop() {
            if !reached.insert(id) {
                return Err(format!("node {id:?} is reached twice"));
            }
            if let Some(node) = self.nodes.get(id) {
                pending.extend_from_slice(&node.children);
            }
        }
        if reached.len() != self.nodes.len() {
            return Err(format!("{} nodes form a parent cycle", self.nodes.len() - reached.len()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;
    use approx::assert_relative_eq;

    #[test]
    fn test_create_child_links_parent() {
        let mut scene = Scene::new();
        let root = scene.create_child(None, "Root", Transform::identity());
        let child = scene.create_child(Some(root), "Child", Transform::identity());

        assert_eq!(scene.node_count(), 2);
        assert_eq!(scene.roots(), &[root]);
        assert_eq!(scene.node(root).map(|n| n.children.clone()), Some(vec![child]));
        assert_eq!(scene.node(child).and_then(|n| n.parent), Some(root));
        assert!(scene.check_links().is_ok());
    }

    #[test]
    fn test_world_transform_composes_parents() {
        let mut scene = Scene::new();
        let mut pose = Transform::from_position(Vec3::new(10.0, 0.0, 0.0));
        pose.yaw(180.0);
        let root = scene.create_child(None, "Root", pose);
        let child = scene.create_child(Some(root), "Child", Transform::from_position(Vec3::new(0.0, 1.0, 2.0)));

        let world = scene.world_transform(child).expect("child exists");
        assert_relative_eq!(world.position, Vec3::new(10.0, 1.0, -2.0), epsilon = 1e-5);
    }

    #[test]
    fn test_find_by_name_and_camera_lookup() {
        let mut scene = Scene::new();
        let id = scene.create_child(None, "Observer", Transform::identity());
        scene.add_component(id, Component::Camera(Camera::with_far_clip(600.0)));

        assert_eq!(scene.find_by_name("Observer"), Some(id));
        assert_eq!(scene.camera_mut(id).map(|c| c.far_clip), Some(600.0));
        assert!(scene.find_by_name("Nobody").is_none());
    }

    #[test]
    fn test_detached_parent_cycle_is_rejected() {
        let mut scene = Scene::new();
        let root = scene.create_child(None, "Root", Transform::identity());
        let a = scene.create_child(Some(root), "A", Transform::identity());
        let b = scene.create_child(Some(a), "B", Transform::identity());

        // A and B name each other as parent and child, and nothing reaches them
        if let Some(node) = scene.node_mut(root) {
            node.children.clear();
        }
        if let Some(node) = scene.node_mut(a) {
            node.parent = Some(b);
        }
        if let Some(node) = scene.node_mut(b) {
            node.children.push(a);
        }

        let err = scene.check_links().expect_err("cycle must be reported");
        assert!(err.contains("cycle"), "{err}");
    }

    #[test]
    fn test_set_parent_moves_node() {
        let mut scene = Scene::new();
        let water = scene.create_child(None, "Water", Transform::identity());
        let camera = scene.create_child(None, "Camera", Transform::identity());

        assert!(scene.set_parent(camera, Some(water)));
        assert_eq!(scene.roots(), &[water]);
        assert_eq!(scene.node(water).map(|n| n.children.clone()), Some(vec![camera]));
        assert!(scene.check_links().is_ok());

        assert!(scene.set_parent(camera, None));
        assert_eq!(scene.roots(), &[water, camera]);
        assert!(scene.node(water).is_some_and(|n| n.children.is_empty()));
        assert!(scene.check_links().is_ok());
    }

    #[test]
    fn test_set_parent_refuses_cycles() {
        let mut scene = Scene::new();
        let root = scene.create_child(None, "Root", Transform::identity());
        let child = scene.create_child(Some(root), "Child", Transform::identity());

        assert!(!scene.set_parent(root, Some(child)));
        assert!(!scene.set_parent(root, Some(root)));
        assert_eq!(scene.node(root).and_then(|n| n.parent), None);
        assert!(scene.check_links().is_ok());
    }

    #[test]
    #[should_panic(expected = "not in the scene")]
    fn test_create_child_of_foreign_parent_panics() {
        let mut other = Scene::new();
        let foreign = other.create_child(None, "Foreign", Transform::identity());
        let mut scene = Scene::new();
        scene.create_child(Some(foreign), "Orphan", Transform::identity());
    }
}
