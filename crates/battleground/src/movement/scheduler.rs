//! Behavior scheduling
//!
//! Every registered behavior is visited once per tick. Visiting order is the
//! registration order but behaviors must not rely on it.

use crate::scene::NodeArena;

use super::{Behavior, DroneMover, Mover, MoverKind};

/// Holds the per-frame behaviors of a scene
#[derive(Default)]
pub struct BehaviorScheduler {
    behaviors: Vec<Box<dyn Behavior>>,
}

impl BehaviorScheduler {
    /// Create an empty scheduler
    pub fn new() -> Self {
        Self::default()
    }

    /// Build behaviors for every node carrying a `Movement` component
    pub fn from_nodes(nodes: &NodeArena) -> Self {
        let mut scheduler = Self::new();
        for (id, node) in nodes {
            let Some(config) = node.movement() else {
                continue;
            };
            match config.kind {
                MoverKind::Walker => scheduler.add(Box::new(Mover::new(id))),
                MoverKind::Drone { .. } => scheduler.add(Box::new(DroneMover::new(id))),
            }
        }
        log::debug!("Rebuilt {} behaviors", scheduler.len());
        scheduler
    }

    /// Register a behavior
    pub fn add(&mut self, behavior: Box<dyn Behavior>) {
        self.behaviors.push(behavior);
    }

    /// Run every behavior once, dropping those whose node is gone
    pub fn tick(&mut self, nodes: &mut NodeArena, delta_time: f32) {
        self.behaviors.retain(|behavior| nodes.contains_key(behavior.node()));
        for behavior in &mut self.behaviors {
            behavior.update(nodes, delta_time);
        }
    }

    /// Number of behaviors
    pub fn len(&self) -> usize {
        self.behaviors.len()
    }

    /// Whether no behaviors are registered
    pub fn is_empty(&self) -> bool {
        self.behaviors.is_empty()
    }
}
