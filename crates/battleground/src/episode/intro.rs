//! # Intro Episode
//!
//! A battleground of running humanoids on a terrain with a reflecting water
//! plane. The user flies around, throws balls, launches drones whose camera
//! feeds an in-world security screen, and can save or reload the scene.
//!
//! ## Per-frame order
//! 1. Movement behaviors advance
//! 2. The camera flies from mouse and held keys
//! 3. At most one one-shot action runs
//! 4. Render rigs resync: water planes, reflection pose, aspect ratios

use crate::core::IntroConfig;
use crate::engine::Engine;
use crate::foundation::math::{Transform, Vec3};
use crate::input::FrameAction;
use crate::movement::MovementConfig;
use crate::render::{Camera, CameraRef, ReflectionRig, ScreenRig, Viewport};
use crate::scene::{Node, NodeId, Scene, SceneIoError, SceneStore};
use crate::ui::TextOverlay;

use super::camera_control::{FlyCamera, PrimaryCamera};
use super::spawn::{spawn_drone, spawn_object};
use super::world::{build_static_world, populate_humanoids, IntroNodes, WATER_MATERIAL};
use super::{Episode, LifecycleState};

const INSTRUCTIONS: &str = "Use WASD keys to move, mouse to rotate view\n\
    LMB to spawn ball object, MMB or O to spawn a MQ9 Reaper drone\n\
    RMB to go back and face the drone control display\n\
    F5 to save scene, F7 to load\n\
    F12 to toggle this instruction text";

/// The intro battleground
pub struct Intro {
    state: LifecycleState,
    config: IntroConfig,
    scene: Option<Scene>,
    nodes: Option<IntroNodes>,
    camera: Option<PrimaryCamera>,
    fly: FlyCamera,
    reflection: Option<ReflectionRig>,
    screen: Option<ScreenRig>,
    instructions: Option<TextOverlay>,
    store: Option<SceneStore>,
}

impl Default for Intro {
    fn default() -> Self {
        Self::new()
    }
}

impl Intro {
    /// Uninitialized episode; configuration is read from the engine in `init_scene`
    pub fn new() -> Self {
        let config = IntroConfig::default();
        let fly = FlyCamera::from_config(&config.camera);
        Self {
            state: LifecycleState::Uninitialized,
            config,
            scene: None,
            nodes: None,
            camera: None,
            fly,
            reflection: None,
            screen: None,
            instructions: None,
            store: None,
        }
    }

    fn built_scene(&mut self) -> (&mut Scene, IntroNodes) {
        match (self.scene.as_mut(), self.nodes) {
            (Some(scene), Some(nodes)) => (scene, nodes),
            _ => panic!("intro scene used before init_scene"),
        }
    }

    fn primary(&mut self) -> &mut PrimaryCamera {
        match self.camera.as_mut() {
            Some(camera) => camera,
            None => panic!("intro camera used before init_camera"),
        }
    }

    /// Handles of the static world nodes
    pub fn nodes(&self) -> Option<IntroNodes> {
        self.nodes
    }

    /// The primary camera
    pub fn primary_camera(&self) -> Option<&PrimaryCamera> {
        self.camera.as_ref()
    }

    /// Mouse-look controller
    pub fn fly_camera(&self) -> &FlyCamera {
        &self.fly
    }

    /// Water reflection rig
    pub fn reflection(&self) -> Option<&ReflectionRig> {
        self.reflection.as_ref()
    }

    /// Security screen rig
    pub fn screen(&self) -> Option<&ScreenRig> {
        self.screen.as_ref()
    }

    /// Instruction overlay
    pub fn instructions(&self) -> Option<&TextOverlay> {
        self.instructions.as_ref()
    }

    /// Mutable scene access
    pub fn scene_mut(&mut self) -> Option<&mut Scene> {
        self.scene.as_mut()
    }

    /// Throw a ball from the primary camera
    pub fn spawn_object(&mut self, engine: &mut Engine) -> NodeId {
        let camera = self.primary().transform;
        let spawn = self.config.spawn.clone();
        let (scene, _) = self.built_scene();
        spawn_object(scene, &camera, &spawn, &mut engine.rng)
    }

    /// Launch a drone from the primary camera and show its feed on the screen
    pub fn spawn_drone(&mut self) -> NodeId {
        let position = self.primary().transform.position;
        let heading = self.fly.heading();
        let drone_config = self.config.drone.clone();
        let (scene, nodes) = self.built_scene();
        let drone = spawn_drone(scene, position, heading, &drone_config, nodes.observer_camera);

        if let Some(screen) = self.screen.as_mut() {
            screen.bind_source(CameraRef::Node(nodes.observer_camera));
        }
        drone
    }

    /// Write the scene to the save path
    pub fn save_scene(&self) -> Result<(), SceneIoError> {
        match (self.scene.as_ref(), self.store.as_ref()) {
            (Some(scene), Some(store)) => store.save(scene),
            _ => panic!("save_scene called before init_scene"),
        }
    }

    /// Replace the scene with the saved one.
    ///
    /// The document is fully read and checked first; on any error the
    /// current scene stays untouched.
    pub fn load_scene(&mut self) -> Result<(), SceneIoError> {
        let Some(store) = self.store.as_ref() else {
            panic!("load_scene called before init_scene");
        };
        let loaded = store.load()?;

        let (_, nodes) = self.built_scene();
        for (role, id) in nodes.named() {
            if !loaded.contains(id) {
                return Err(SceneIoError::MissingNode(role.to_string()));
            }
        }
        let observer = loaded.node(nodes.observer_camera);
        if observer.and_then(Node::camera).is_none() {
            return Err(SceneIoError::MissingNode("observer camera component".to_string()));
        }
        // Drones write the observer's local pose as its world pose
        if observer.is_some_and(|n| n.parent.is_some()) {
            return Err(SceneIoError::Inconsistent("observer camera is not a root node".to_string()));
        }
        for (_, node) in loaded.iter() {
            if let Some(target) = node.movement().and_then(MovementConfig::observer) {
                if target != nodes.observer_camera {
                    return Err(SceneIoError::Inconsistent(format!("'{}' drives {target:?} instead of the observer camera", node.name)));
                }
            }
        }

        self.scene = Some(loaded);
        Ok(())
    }

    /// Walk up to the security screen: move the screen to the camera, then
    /// back the camera away from it.
    pub fn face_control_display(&mut self, delta_time: f32) {
        let offset = self.config.camera.screen_surface_offset;
        let pushback = self.fly.move_speed() * delta_time * self.config.camera.face_display_pushback;
        let camera_position = self.primary().transform.position;

        let (scene, nodes) = self.built_scene();
        if let Some(screen_box) = scene.transform_mut(nodes.screen_box) {
            screen_box.position = camera_position;
        }
        if let Some(screen) = scene.transform_mut(nodes.screen) {
            screen.position = camera_position + offset;
        }

        self.primary().transform.translate_local(Vec3::new(0.0, 0.0, -pushback));
    }

    fn run_action(&mut self, engine: &mut Engine, action: FrameAction, delta_time: f32) {
        log::debug!("Frame action {action:?}");
        match action {
            FrameAction::SpawnBall => {
                self.spawn_object(engine);
            }
            FrameAction::SpawnDrone => {
                self.spawn_drone();
            }
            FrameAction::SaveScene => {
                if let Err(e) = self.save_scene() {
                    log::warn!("Scene save failed: {e}");
                }
            }
            FrameAction::LoadScene => {
                if let Err(e) = self.load_scene() {
                    log::warn!("Scene load failed, keeping current scene: {e}");
                }
            }
            FrameAction::ToggleInstructions => {
                if let Some(overlay) = self.instructions.as_mut() {
                    overlay.toggle();
                }
            }
            FrameAction::FaceControlDisplay => self.face_control_display(delta_time),
        }
    }

    /// Keep both render rigs consistent with the scene and the output
    fn sync_render_rigs(&mut self, engine: &Engine) {
        let aspect_ratio = engine.graphics.aspect_ratio();
        let primary = self.primary().transform;
        let (scene, nodes) = self.built_scene();
        let water = scene.world_transform(nodes.water);

        if let Some(reflection) = self.reflection.as_mut() {
            if let Some(water) = water {
                reflection.sync_water(&water);
            }
            reflection.follow(&primary);
            reflection.sync_aspect(aspect_ratio);
        }

        if let (Some(screen), Some(scene)) = (self.screen.as_ref(), self.scene.as_mut()) {
            screen.sync_aspect(scene, aspect_ratio);
        }
    }
}

impl Episode for Intro {
    fn name(&self) -> &str {
        "Intro"
    }

    fn state(&self) -> LifecycleState {
        self.state
    }

    fn init_scene(&mut self, engine: &mut Engine) {
        self.state.advance("init_scene", LifecycleState::Uninitialized, LifecycleState::SceneReady);

        self.config = engine.intro_config().clone();
        self.fly = FlyCamera::from_config(&self.config.camera);
        self.store = Some(SceneStore::new(&self.config.save_path));

        let mut scene = Scene::new();
        let nodes = build_static_world(&mut scene, &self.config, &mut engine.rng);
        self.scene = Some(scene);
        self.nodes = Some(nodes);
    }

    fn init_camera(&mut self, _engine: &mut Engine) {
        self.state.advance("init_camera", LifecycleState::SceneReady, LifecycleState::CamReady);

        let camera = &self.config.camera;
        self.camera = Some(PrimaryCamera {
            transform: Transform::from_position_rotation(camera.start_position, self.fly.orientation()),
            camera: Camera::with_far_clip(camera.far_clip),
        });
    }

    fn init_objects(&mut self, engine: &mut Engine) {
        self.state.advance("init_objects", LifecycleState::CamReady, LifecycleState::ObjectsReady);

        let world = self.config.world.clone();
        let (scene, _) = self.built_scene();
        let (assets, rng) = engine.assets_and_rng();
        populate_humanoids(scene, &world, assets, rng);
        scene.rebuild_behaviors();
    }

    fn init_viewport(&mut self, engine: &mut Engine) {
        self.state.advance("init_viewport", LifecycleState::ObjectsReady, LifecycleState::ViewportReady);

        engine.graphics.set_viewport(0, Viewport::new(CameraRef::Primary));

        let aspect_ratio = engine.graphics.aspect_ratio();
        let primary = self.primary().transform;
        let reflection_config = self.config.reflection.clone();
        let screen_config = self.config.screen.clone();
        let (scene, nodes) = self.built_scene();
        let water = scene.world_transform(nodes.water).unwrap_or_else(Transform::identity);

        let mut reflection = ReflectionRig::configure(&reflection_config, &water, WATER_MATERIAL, aspect_ratio, &mut engine.materials);
        reflection.follow(&primary);

        let screen = ScreenRig::configure(&screen_config, CameraRef::Node(nodes.observer_camera), &mut engine.materials);
        screen.sync_aspect(scene, aspect_ratio);

        self.reflection = Some(reflection);
        self.screen = Some(screen);
    }

    fn create_instructions(&mut self, _engine: &mut Engine) {
        self.instructions = Some(TextOverlay::new(INSTRUCTIONS));
    }

    fn subscribe_to_events(&mut self, _engine: &mut Engine) {
        self.state.advance("subscribe_to_events", LifecycleState::ViewportReady, LifecycleState::Running);
    }

    fn handle_update(&mut self, engine: &mut Engine, delta_time: f32) {
        self.state.require("handle_update", LifecycleState::Running);

        let (scene, _) = self.built_scene();
        scene.update(delta_time);

        self.move_camera(engine, delta_time);

        if let Some(action) = FrameAction::resolve(&engine.input) {
            self.run_action(engine, action, delta_time);
        }

        self.sync_render_rigs(engine);
    }

    fn move_camera(&mut self, engine: &mut Engine, delta_time: f32) {
        let camera = match self.camera.as_mut() {
            Some(camera) => camera,
            None => panic!("move_camera called before init_camera"),
        };
        self.fly.apply(&mut camera.transform, &engine.input, delta_time);
    }

    fn scene(&self) -> Option<&Scene> {
        self.scene.as_ref()
    }
}
