//! Intro world construction
//!
//! The static environment (zone, light, sky, terrain, scattered props, water,
//! security screen) and the crowd of running humanoids.

use rand::Rng;

use crate::assets::AssetSource;
use crate::core::{IntroConfig, PropGroup, WorldConfig};
use crate::foundation::geometry::BoundingBox;
use crate::foundation::math::{directions, look_rotation, rotation_from_euler_degrees, Transform, Vec3};
use crate::movement::MovementConfig;
use crate::render::screen::SCREEN_MATERIAL;
use crate::render::{Camera, ViewMask};
use crate::scene::{
    AnimatedModel, AnimationTrack, CollisionShape, Component, Light, NodeId, RigidBody, Scene, Skybox, StaticModel,
    Terrain, Zone,
};

/// Material of the water surface; the reflection texture is bound to it
pub const WATER_MATERIAL: &str = "Materials/Water.xml";

/// Nodes of the static world the episode keeps handles to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntroNodes {
    /// Water plane
    pub water: NodeId,
    /// Camera feeding the security screen
    pub observer_camera: NodeId,
    /// Frame behind the screen
    pub screen_box: NodeId,
    /// Surface showing the feed
    pub screen: NodeId,
}

impl IntroNodes {
    /// Names and handles, for diagnostics
    pub fn named(&self) -> [(&'static str, NodeId); 4] {
        [
            ("water", self.water),
            ("observer camera", self.observer_camera),
            ("screen box", self.screen_box),
            ("screen", self.screen),
        ]
    }
}

/// Build the static environment
pub fn build_static_world<R: Rng>(scene: &mut Scene, config: &IntroConfig, rng: &mut R) -> IntroNodes {
    let zone = scene.create_child(None, "Zone", Transform::identity());
    scene.add_component(zone, Component::Zone(Zone {
        bounds: BoundingBox::symmetric(1000.0),
        ambient_color: Vec3::new(0.15, 0.15, 0.15),
        fog_color: Vec3::new(0.5, 0.5, 0.7),
        fog_start: 800.0,
        fog_end: 1000.0,
    }));

    let light_pose = Transform::from_position_rotation(
        Vec3::zeros(),
        look_rotation(Vec3::new(0.6, -1.0, 0.8), directions::up()),
    );
    let light = scene.create_child(None, "DirectionalLight", light_pose);
    scene.add_component(light, Component::Light(Light {
        directional: true,
        cast_shadows: true,
    }));

    let sky = scene.create_child(None, "Sky", Transform::identity().with_uniform_scale(500.0));
    scene.add_component(sky, Component::Skybox(Skybox {
        model: "Models/Box.mdl".to_string(),
        material: "Materials/Skybox.xml".to_string(),
    }));

    let terrain = scene.create_child(None, "Terrain", Transform::identity());
    scene.add_component(terrain, Component::Terrain(Terrain {
        heightmap: "Textures/HeightMap.png".to_string(),
        material: "Materials/Terrain.xml".to_string(),
        patch_size: 64,
        spacing: Vec3::new(3.0, 0.4, 3.0),
    }));
    scene.add_component(terrain, Component::RigidBody(RigidBody::fixed()));
    scene.add_component(terrain, Component::CollisionShape(CollisionShape::Terrain));

    for group in &config.world.props {
        scatter_props(scene, group, config.world.prop_spread, rng);
    }

    let water_pose = Transform::from_position(config.world.water_position).with_scale(config.world.water_scale);
    let water = scene.create_child(None, "Water", water_pose);
    let mut water_model = StaticModel::new("Models/Plane.mdl", WATER_MATERIAL);
    water_model.view_mask = ViewMask::WATER;
    scene.add_component(water, Component::StaticModel(water_model));

    let observer_camera = scene.create_child(None, "ObserverCamera", Transform::from_position(config.screen.observer_position));
    scene.add_component(observer_camera, Component::Camera(Camera::with_far_clip(config.screen.observer_far_clip)));

    let screen_box_pose = Transform::from_position_rotation(Vec3::new(0.0, 50.0, 0.0), rotation_from_euler_degrees(0.0, 180.0, 0.0))
        .with_scale(Vec3::new(21.0, 16.0, 0.5));
    let screen_box = scene.create_child(None, "ScreenBox", screen_box_pose);
    scene.add_component(screen_box, Component::StaticModel(StaticModel::new("Models/Box.mdl", WATER_MATERIAL)));

    let screen_pose = Transform::from_position_rotation(
        Vec3::new(0.0, 50.0, 0.0) + config.camera.screen_surface_offset,
        rotation_from_euler_degrees(90.0, 180.0, 0.0),
    )
    .with_scale(Vec3::new(20.0, 0.0, 15.0));
    let screen = scene.create_child(None, "Screen", screen_pose);
    scene.add_component(screen, Component::StaticModel(StaticModel::new("Models/Plane.mdl", SCREEN_MATERIAL)));

    log::info!("Static world built with {} nodes", scene.node_count());

    IntroNodes {
        water,
        observer_camera,
        screen_box,
        screen,
    }
}

/// Drop a group of physics props at random positions, rotations and sizes
fn scatter_props<R: Rng>(scene: &mut Scene, group: &PropGroup, spread: f32, rng: &mut R) {
    for _ in 0..group.count {
        let scale = random_scale(rng, 10) + 0.5;
        let rotation = rotation_from_euler_degrees(
            rng.gen_range(0.0..360.0),
            rng.gen_range(0.0..360.0),
            rng.gen_range(0.0..360.0),
        );
        let position = Vec3::new(rng.gen_range(0.0..spread), 100.0, rng.gen_range(0.0..spread));
        let pose = Transform::from_position_rotation(position, rotation).with_uniform_scale(scale);

        let node = scene.create_child(None, &group.name, pose);
        scene.add_component(node, Component::StaticModel(StaticModel::new(&group.model, &group.material).with_shadows()));

        let mut body = RigidBody::dynamic(scale * group.mass_per_scale);
        let shape = if group.name.contains("Sphere") {
            body.rolling_friction = 1.0;
            CollisionShape::Sphere { diameter: 1.0 }
        } else {
            CollisionShape::Box { size: Vec3::new(1.0, 1.0, 1.0) }
        };
        scene.add_component(node, Component::RigidBody(body));
        scene.add_component(node, Component::CollisionShape(shape));
    }
    log::debug!("Scattered {} x {}", group.count, group.name);
}

/// Add the running humanoids. Returns how many got an animation track.
pub fn populate_humanoids<R: Rng>(scene: &mut Scene, config: &WorldConfig, assets: &dyn AssetSource, rng: &mut R) -> usize {
    if config.humanoid_variants.is_empty() {
        return 0;
    }

    let bounds = BoundingBox::horizontal(config.humanoid_bounds, config.humanoid_bounds);
    let spawn_extent = config.humanoid_bounds / 2.0;
    let mut animated = 0;

    for _ in 0..config.humanoid_count {
        let scale = random_scale(rng, 10);
        let position = Vec3::new(rng.gen_range(0.0..spawn_extent), 100.0, rng.gen_range(0.0..spawn_extent));
        let rotation = rotation_from_euler_degrees(0.0, rng.gen_range(0.0..360.0), 0.0);
        let pose = Transform::from_position_rotation(position, rotation).with_uniform_scale(scale);
        let body = scene.create_child(None, "Jack", pose);

        // Models face -Z; the visual child turns them to the node heading
        let visual = scene.create_child(Some(body), "AdjNode", Transform::from_position_rotation(Vec3::zeros(), rotation_from_euler_degrees(0.0, 180.0, 0.0)));

        let variant = &config.humanoid_variants[rng.gen_range(0..config.humanoid_variants.len())];
        let track = assets
            .animation(&variant.animation)
            .map(|clip| AnimationTrack::new(clip.name, clip.length, rng.gen::<f32>() * clip.length));
        if track.is_some() {
            animated += 1;
        } else {
            log::warn!("Animation {} missing, humanoid will not animate", variant.animation);
        }
        scene.add_component(visual, Component::AnimatedModel(AnimatedModel {
            model: variant.model.clone(),
            material: variant.material.clone(),
            track,
        }));

        let movement = MovementConfig::walker(config.humanoid_move_speed - scale / 4.0, config.humanoid_rotation_speed, bounds);
        scene.add_component(body, Component::Movement(movement));
        scene.add_component(body, Component::RigidBody(RigidBody::dynamic(scale * 100.0).upright()));
        scene.add_component(body, Component::CollisionShape(CollisionShape::Capsule {
            diameter: 0.7,
            height: 1.8,
            offset: Vec3::new(0.0, 0.9, 0.0),
        }));
    }

    log::info!("Populated {} humanoids ({} animated)", config.humanoid_count, animated);
    animated
}

/// Integer scale in `[1, upper)` as a float
#[allow(clippy::cast_precision_loss)]
pub(crate) fn random_scale<R: Rng>(rng: &mut R, upper: u32) -> f32 {
    rng.gen_range(1..upper.max(2)) as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AssetManifest;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn small_config() -> IntroConfig {
        let mut config = IntroConfig::default();
        for group in &mut config.world.props {
            group.count = 3;
        }
        config.world.humanoid_count = 20;
        config
    }

    #[test]
    fn test_static_world_nodes() {
        let config = small_config();
        let mut scene = Scene::new();
        let nodes = build_static_world(&mut scene, &config, &mut StdRng::seed_from_u64(3));

        // zone, light, sky, terrain, 6 groups x 3 props, water, observer, screen box, screen
        assert_eq!(scene.node_count(), 4 + 18 + 4);

        let water = scene.node(nodes.water).expect("water");
        assert!(water.components.iter().any(|c| matches!(c, Component::StaticModel(m) if m.view_mask == ViewMask::WATER)));
        assert_eq!(scene.transform(nodes.water).map(|t| t.position), Some(Vec3::new(0.0, 5.0, 0.0)));

        let observer = scene.node(nodes.observer_camera).and_then(|n| n.camera()).expect("observer camera");
        assert_eq!(observer.far_clip, 600.0);

        let screen = scene.transform(nodes.screen).expect("screen");
        assert!((screen.position - Vec3::new(0.0, 50.0, -0.27)).norm() < 1e-6);
    }

    #[test]
    fn test_props_follow_placement_rules() {
        let config = small_config();
        let mut scene = Scene::new();
        build_static_world(&mut scene, &config, &mut StdRng::seed_from_u64(9));

        for (_, node) in scene.iter().filter(|(_, n)| n.name == "Mushroom") {
            let t = node.transform;
            assert!((0.0..700.0).contains(&t.position.x) && (0.0..700.0).contains(&t.position.z));
            assert_eq!(t.position.y, 100.0);
            assert!((1.5..=9.5).contains(&t.scale.x));
            let mass = node.components.iter().find_map(|c| match c {
                Component::RigidBody(body) => Some(body.mass),
                _ => None,
            });
            assert_eq!(mass, Some(t.scale.x * 1000.0));
        }
    }

    #[test]
    fn test_humanoids_get_movers_and_tracks() {
        let config = small_config();
        let mut scene = Scene::new();
        let animated = populate_humanoids(&mut scene, &config.world, &AssetManifest::default(), &mut StdRng::seed_from_u64(5));

        assert_eq!(animated, 20);
        assert_eq!(scene.node_count(), 40);

        for (_, node) in scene.iter().filter(|(_, n)| n.name == "Jack") {
            let movement = node.movement().expect("movement");
            let scale = node.transform.scale.x;
            assert!((1.0..10.0).contains(&scale));
            assert_eq!(movement.move_speed, 15.0 - scale / 4.0);
            assert_eq!(movement.bounds, BoundingBox::horizontal(1000.0, 1000.0));
            assert_eq!(node.children.len(), 1);
        }
    }

    #[test]
    fn test_missing_animations_leave_tracks_absent() {
        let config = small_config();
        let mut scene = Scene::new();
        let animated = populate_humanoids(&mut scene, &config.world, &AssetManifest::empty(), &mut StdRng::seed_from_u64(5));

        assert_eq!(animated, 0);
        let ids: Vec<NodeId> = scene.iter().filter(|(_, n)| n.name == "AdjNode").map(|(id, _)| id).collect();
        for id in ids {
            assert!(scene.node_mut(id).and_then(|n| n.animation_track_mut()).is_none());
        }
    }
}
