//! Spawning thrown balls and drones from the camera

use rand::Rng;

use crate::core::{DroneConfig, SpawnConfig};
use crate::foundation::geometry::BoundingBox;
use crate::foundation::math::{Quat, Transform, Vec3};
use crate::movement::{DroneMover, MovementConfig};
use crate::scene::{CollisionShape, Component, NodeId, RigidBody, Scene, StaticModel};

use super::world::random_scale;

/// Throw a ball from the camera.
///
/// The ball starts at the camera pose and flies along the camera's forward
/// axis with a slight upward bias.
pub fn spawn_object<R: Rng>(scene: &mut Scene, camera: &Transform, config: &SpawnConfig, rng: &mut R) -> NodeId {
    let scale = random_scale(rng, 7) + 0.5;
    let pose = Transform::from_position_rotation(camera.position, camera.rotation).with_uniform_scale(scale);
    let ball = scene.create_child(None, "Sphere", pose);

    scene.add_component(ball, Component::StaticModel(StaticModel::new("Models/Sphere.mdl", "Materials/Stone.xml").with_shadows()));

    let mut body = RigidBody::dynamic(scale * config.mass_per_scale);
    body.rolling_friction = 1.0;
    body.linear_velocity = camera.rotation * Vec3::new(0.0, config.upward_bias, 1.0) * config.launch_speed;
    log::debug!("Spawned ball scale {scale} velocity {:?}", body.linear_velocity);

    scene.add_component(ball, Component::RigidBody(body));
    scene.add_component(ball, Component::CollisionShape(CollisionShape::Sphere { diameter: 1.0 }));
    ball
}

/// Launch a drone at `position` heading along `heading`.
///
/// The drone takes over `observer`; every earlier drone lets go of it so only
/// one mover drives the feed camera.
pub fn spawn_drone(scene: &mut Scene, position: Vec3, heading: Quat, config: &DroneConfig, observer: NodeId) -> NodeId {
    for (_, node) in scene.iter_mut() {
        if let Some(movement) = node.movement_mut() {
            if movement.observer() == Some(observer) {
                movement.release_observer();
            }
        }
    }

    let pose = Transform::from_position_rotation(position, heading).with_uniform_scale(config.scale);
    let drone = scene.create_child(None, "MQ9", pose);
    scene.add_component(drone, Component::StaticModel(StaticModel::new("Models/MQ_9/MQ_9.mdl", "Materials/Mutant/Materials/mutant_M.xml").with_shadows()));

    let movement = MovementConfig::drone(
        config.move_speed,
        config.rotation_speed,
        BoundingBox::horizontal(config.bounds, config.bounds),
        config.altitude,
    )
    .with_observer(observer, config.observer_offset);
    scene.add_component(drone, Component::Movement(movement));
    scene.add_component(drone, Component::RigidBody(RigidBody::dynamic(config.mass).upright()));
    scene.add_component(drone, Component::CollisionShape(CollisionShape::Capsule {
        diameter: 3.7,
        height: 3.8,
        offset: Vec3::new(0.0, 0.9, 0.0),
    }));
    scene.add_behavior(Box::new(DroneMover::new(drone)));

    log::debug!("Spawned drone at {position:?} driving observer {observer:?}");
    drone
}
