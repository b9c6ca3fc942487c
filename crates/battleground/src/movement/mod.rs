//! Autonomous movement
//!
//! Humanoids and drones walk straight ahead at a constant speed and turn when
//! they leave their bounds. Containment is soft: crossing the boundary only
//! starts a turn, so an entity may stay outside for a few ticks while it
//! swings back.
//!
//! Parameters live on the node as a [`MovementConfig`] component, which keeps
//! them in saved scenes. Behaviors hold nothing but the node handle.

pub mod drone_mover;
pub mod mover;
pub mod scheduler;

use serde::{Deserialize, Serialize};

use crate::foundation::geometry::BoundingBox;
use crate::foundation::math::{directions, Transform, Vec3};
use crate::scene::{NodeArena, NodeId};

pub use drone_mover::DroneMover;
pub use mover::Mover;
pub use scheduler::BehaviorScheduler;

/// Per-frame logic attached to one node
pub trait Behavior {
    /// Node this behavior drives
    fn node(&self) -> NodeId;

    /// Advance by `delta_time` seconds.
    ///
    /// Must not read state another behavior writes in the same tick.
    fn update(&mut self, nodes: &mut NodeArena, delta_time: f32);
}

/// Which behavior drives a node
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MoverKind {
    /// Ground walker; height is left to physics
    Walker,
    /// Flying drone pinned to an altitude, optionally carrying the feed camera
    Drone {
        /// Height the drone is held at every tick
        altitude: f32,
        /// Camera placed at the drone each tick (not owned)
        observer: Option<NodeId>,
        /// Offset of the observer camera from the drone
        observer_offset: Vec3,
        /// World point the observer camera looks at
        look_target: Vec3,
    },
}

/// Movement parameters of an autonomous node
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MovementConfig {
    /// Units per second along the heading
    pub move_speed: f32,
    /// Degrees per second of yaw while outside `bounds`
    pub rotation_speed: f32,
    /// Containment region; only X and Z are enforced
    pub bounds: BoundingBox,
    /// Behavior variant
    pub kind: MoverKind,
}

impl MovementConfig {
    /// Walker parameters
    pub fn walker(move_speed: f32, rotation_speed: f32, bounds: BoundingBox) -> Self {
        Self {
            move_speed,
            rotation_speed,
            bounds,
            kind: MoverKind::Walker,
        }
    }

    /// Drone parameters without an observer camera
    pub fn drone(move_speed: f32, rotation_speed: f32, bounds: BoundingBox, altitude: f32) -> Self {
        Self {
            move_speed,
            rotation_speed,
            bounds,
            kind: MoverKind::Drone {
                altitude,
                observer: None,
                observer_offset: Vec3::zeros(),
                look_target: Vec3::zeros(),
            },
        }
    }

    /// Attach an observer camera to a drone configuration.
    ///
    /// Has no effect on walkers.
    #[must_use]
    pub fn with_observer(mut self, camera: NodeId, offset: Vec3) -> Self {
        if let MoverKind::Drone { observer, observer_offset, .. } = &mut self.kind {
            *observer = Some(camera);
            *observer_offset = offset;
        }
        self
    }

    /// Observer camera carried by a drone
    pub fn observer(&self) -> Option<NodeId> {
        match self.kind {
            MoverKind::Drone { observer, .. } => observer,
            MoverKind::Walker => None,
        }
    }

    /// Stop driving the observer camera
    pub fn release_observer(&mut self) {
        if let MoverKind::Drone { observer, .. } = &mut self.kind {
            *observer = None;
        }
    }
}

/// Next pose of an autonomous node.
///
/// Moves forward by `move_speed * dt`; if the new position is outside the
/// bounds on X or Z, yaws by `rotation_speed * dt`. Nothing else changes.
pub fn advance_pose(pose: &Transform, config: &MovementConfig, delta_time: f32) -> Transform {
    let mut next = *pose;
    next.translate_local(directions::forward() * (config.move_speed * delta_time));
    if config.bounds.is_outside_horizontal(next.position) {
        next.yaw(config.rotation_speed * delta_time);
    }
    next
}
