//! Ground walker behavior

use crate::scene::{NodeArena, NodeId};

use super::{advance_pose, Behavior};

/// Walks a node forward and steps its run animation
#[derive(Debug, Clone, Copy)]
pub struct Mover {
    node: NodeId,
}

impl Mover {
    /// Drive `node` using its `Movement` component
    pub fn new(node: NodeId) -> Self {
        Self { node }
    }

    /// Move one node one tick. Returns `false` when the node is gone or has
    /// no movement parameters.
    pub(crate) fn step(nodes: &mut NodeArena, id: NodeId, delta_time: f32) -> bool {
        let Some(node) = nodes.get_mut(id) else {
            return false;
        };
        let Some(config) = node.movement().copied() else {
            return false;
        };

        node.transform = advance_pose(&node.transform, &config, delta_time);
        advance_animation(nodes, id, delta_time);
        true
    }
}

/// Step the first active animation track found on the node or its children.
///
/// A missing track means the asset was absent at spawn time; nothing happens.
fn advance_animation(nodes: &mut NodeArena, id: NodeId, delta_time: f32) {
    let Some(node) = nodes.get_mut(id) else {
        return;
    };
    if let Some(track) = node.animation_track_mut() {
        track.advance(delta_time);
        return;
    }

    let children = node.children.clone();
    for child in children {
        if let Some(track) = nodes.get_mut(child).and_then(|c| c.animation_track_mut()) {
            track.advance(delta_time);
            return;
        }
    }
}

impl Behavior for Mover {
    fn node(&self) -> NodeId {
        self.node
    }

    fn update(&mut self, nodes: &mut NodeArena, delta_time: f32) {
        Self::step(nodes, self.node, delta_time);
    }
}
