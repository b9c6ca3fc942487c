//! Drone behavior
//!
//! Same walk-and-turn policy as [`Mover`], with the height hard-pinned to a
//! fixed altitude. A drone that carries the observer camera moves it to its
//! own position each tick and points it at a fixed world target, whatever
//! way the drone itself is heading.

use crate::foundation::math::{directions, look_rotation};
use crate::scene::{NodeArena, NodeId};

use super::{Behavior, MoverKind, Mover};

/// Flying mover that may carry the observer camera
#[derive(Debug, Clone, Copy)]
pub struct DroneMover {
    node: NodeId,
}

impl DroneMover {
    /// Drive `node` using its `Movement` component
    pub fn new(node: NodeId) -> Self {
        Self { node }
    }
}

impl Behavior for DroneMover {
    fn node(&self) -> NodeId {
        self.node
    }

    fn update(&mut self, nodes: &mut NodeArena, delta_time: f32) {
        if !Mover::step(nodes, self.node, delta_time) {
            return;
        }

        let Some(drone) = nodes.get_mut(self.node) else {
            return;
        };
        let Some(MoverKind::Drone { altitude, observer, observer_offset, look_target }) = drone.movement().map(|c| c.kind) else {
            return;
        };

        drone.transform.position.y = altitude;
        let position = drone.transform.position;

        // Observer cameras are root nodes, so local == world
        if let Some(camera) = observer.and_then(|id| nodes.get_mut(id)) {
            let eye = position + observer_offset;
            camera.transform.position = eye;
            camera.transform.rotation = look_rotation(look_target - eye, directions::up());
        }
    }
}
