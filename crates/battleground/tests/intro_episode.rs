//! End-to-end runs of the intro episode through the public API

use std::path::{Path, PathBuf};

use approx::assert_relative_eq;
use battleground::movement::MovementConfig;
use battleground::prelude::*;

fn save_path(test: &str) -> PathBuf {
    std::env::temp_dir().join(format!("battleground-{test}-{}.ron", std::process::id()))
}

fn engine(save_path: &Path) -> Engine {
    let mut config = ApplicationConfig::default();
    config.intro.seed = Some(99);
    config.intro.world.humanoid_count = 12;
    for group in &mut config.intro.world.props {
        group.count = 3;
    }
    config.intro.save_path = save_path.display().to_string();
    Engine::new(config, Box::new(AssetManifest::default())).expect("valid config")
}

fn running_intro(engine: &mut Engine) -> Intro {
    let mut intro = Intro::new();
    intro.init_scene(engine);
    intro.init_camera(engine);
    intro.init_objects(engine);
    intro.create_instructions(engine);
    intro.init_viewport(engine);
    intro.subscribe_to_events(engine);
    intro
}

fn run(intro: &mut Intro, engine: &mut Engine, frames: u32) {
    for _ in 0..frames {
        let delta_time = engine.begin_frame();
        intro.handle_update(engine, delta_time);
        engine.end_frame();
    }
}

fn snapshot(intro: &Intro) -> Vec<(NodeId, Transform)> {
    intro.scene().expect("scene").iter().map(|(id, node)| (id, node.transform)).collect()
}

#[test]
fn save_then_load_restores_the_saved_scene() {
    let path = save_path("roundtrip");
    let mut engine = engine(&path);
    let mut intro = running_intro(&mut engine);

    engine.handle_event(AppEvent::KeyInput { key: KeyCode::O, pressed: true });
    run(&mut intro, &mut engine, 10);
    intro.save_scene().expect("save");
    let saved = snapshot(&intro);
    let saved_behaviors = intro.scene().map(Scene::behavior_count);
    assert_eq!(saved_behaviors, Some(13));

    // Keep simulating and throw a ball so the live scene drifts away
    engine.handle_event(AppEvent::MouseButton { button: MouseButton::Left, pressed: true });
    run(&mut intro, &mut engine, 30);
    assert_eq!(intro.scene().map(Scene::node_count), Some(saved.len() + 1));

    intro.load_scene().expect("load");
    let scene = intro.scene().expect("scene");
    assert_eq!(scene.node_count(), saved.len());
    assert_eq!(scene.behavior_count(), 13);
    for (id, transform) in &saved {
        let loaded = scene.transform(*id).expect("node survives the round trip");
        assert_relative_eq!(loaded.position, transform.position, epsilon = 1e-4);
        assert_relative_eq!(loaded.scale, transform.scale, epsilon = 1e-4);
        assert!(loaded.rotation.angle_to(&transform.rotation) < 1e-3);
    }

    // Movers pick up where the saved scene left off
    run(&mut intro, &mut engine, 5);
    let _ = std::fs::remove_file(&path);
}

#[test]
fn corrupt_save_leaves_scene_untouched() {
    let path = save_path("corrupt");
    let mut engine = engine(&path);
    let mut intro = running_intro(&mut engine);
    run(&mut intro, &mut engine, 3);

    std::fs::write(&path, "Scene( nodes: [oops").expect("write corrupt file");
    let before = snapshot(&intro);

    assert!(matches!(intro.load_scene(), Err(SceneIoError::Parse(_))));
    assert_eq!(snapshot(&intro), before);

    // F7 with a corrupt file only logs; the episode keeps running
    engine.handle_event(AppEvent::KeyInput { key: KeyCode::F7, pressed: true });
    run(&mut intro, &mut engine, 1);
    assert_eq!(intro.scene().map(Scene::node_count), Some(before.len()));
    let _ = std::fs::remove_file(&path);
}

#[test]
fn missing_save_file_is_an_io_error() {
    let path = save_path("missing");
    let _ = std::fs::remove_file(&path);
    let mut engine = engine(&path);
    let mut intro = running_intro(&mut engine);

    assert!(matches!(intro.load_scene(), Err(SceneIoError::Io(_))));
    assert_eq!(intro.state(), LifecycleState::Running);
}

#[test]
fn foreign_scene_is_rejected() {
    let path = save_path("foreign");
    let mut engine = engine(&path);
    let mut intro = running_intro(&mut engine);
    let before = intro.scene().map(Scene::node_count);

    let mut foreign = Scene::new();
    foreign.create_child(None, "Lonely", Transform::identity());
    SceneStore::new(&path).save(&foreign).expect("save foreign scene");

    assert!(matches!(intro.load_scene(), Err(SceneIoError::MissingNode(_))));
    assert_eq!(intro.scene().map(Scene::node_count), before);
    let _ = std::fs::remove_file(&path);
}

/// Save the live scene, edit the saved document, and write it back
fn tamper_with_save(intro: &Intro, path: &Path, edit: impl FnOnce(&mut Scene)) {
    intro.save_scene().expect("save");
    let store = SceneStore::new(path);
    let mut document = store.load().expect("saved scene loads");
    edit(&mut document);
    store.save(&document).expect("save edited scene");
}

#[test]
fn parent_cycle_in_save_is_rejected() {
    let path = save_path("cycle");
    let mut engine = engine(&path);
    let mut intro = running_intro(&mut engine);

    tamper_with_save(&intro, &path, |scene| {
        let humanoid = scene.find_by_name("Jack").expect("humanoid");
        let visual = scene.node(humanoid).map(|n| n.children[0]).expect("visual child");
        let loop_node = scene.create_child(Some(visual), "Loop", Transform::identity());
        if let Some(node) = scene.node_mut(humanoid) {
            node.children.retain(|&child| child != visual);
        }
        if let Some(node) = scene.node_mut(visual) {
            node.parent = Some(loop_node);
        }
        if let Some(node) = scene.node_mut(loop_node) {
            node.children.push(visual);
        }
    });
    let before = snapshot(&intro);

    assert!(matches!(intro.load_scene(), Err(SceneIoError::Inconsistent(_))));
    assert_eq!(snapshot(&intro), before);

    // The rejected document never reaches the frame loop
    run(&mut intro, &mut engine, 2);
    let _ = std::fs::remove_file(&path);
}

#[test]
fn observer_camera_under_a_parent_is_rejected() {
    let path = save_path("observer-parent");
    let mut engine = engine(&path);
    let mut intro = running_intro(&mut engine);
    let nodes = intro.nodes().expect("nodes");

    tamper_with_save(&intro, &path, |scene| {
        assert!(scene.set_parent(nodes.observer_camera, Some(nodes.water)));
    });
    let before = snapshot(&intro);

    assert!(matches!(intro.load_scene(), Err(SceneIoError::Inconsistent(_))));
    assert_eq!(snapshot(&intro), before);
    let _ = std::fs::remove_file(&path);
}

#[test]
fn drone_driving_another_node_is_rejected() {
    let path = save_path("drone-target");
    let mut engine = engine(&path);
    let mut intro = running_intro(&mut engine);
    let nodes = intro.nodes().expect("nodes");
    let drone = intro.spawn_drone();

    tamper_with_save(&intro, &path, |scene| {
        let movement = scene.node_mut(drone).and_then(|n| n.movement_mut()).expect("drone movement");
        *movement = movement.with_observer(nodes.water, Vec3::zeros());
    });
    let before = snapshot(&intro);

    assert!(matches!(intro.load_scene(), Err(SceneIoError::Inconsistent(_))));
    assert_eq!(snapshot(&intro), before);
    assert_eq!(
        intro.scene().and_then(|s| s.node(drone)).and_then(|n| n.movement()).and_then(MovementConfig::observer),
        Some(nodes.observer_camera)
    );
    let _ = std::fs::remove_file(&path);
}

#[test]
fn application_tracks_window_aspect() {
    let path = save_path("aspect");
    let mut app = Application::new(engine(&path), Box::new(Intro::new()));
    app.start();
    assert_eq!(app.episode().state(), LifecycleState::Running);

    app.handle_event(AppEvent::WindowResized { width: 1920, height: 800 });
    app.frame();
    assert_relative_eq!(app.engine().graphics.aspect_ratio(), 2.4);

    app.handle_event(AppEvent::WindowCloseRequested);
    assert_eq!(app.run_frames(10), 0);
}

#[test]
fn rigs_follow_the_output_aspect() {
    let path = save_path("rigs");
    let mut engine = engine(&path);
    let mut intro = running_intro(&mut engine);

    engine.handle_event(AppEvent::WindowResized { width: 640, height: 480 });
    run(&mut intro, &mut engine, 1);

    let reflection = intro.reflection().expect("reflection rig");
    assert_relative_eq!(reflection.camera().aspect_ratio(), 640.0 / 480.0);
    assert!(!reflection.camera().auto_aspect_ratio);

    let observer = intro.nodes().expect("nodes").observer_camera;
    let observer_camera = intro.scene().and_then(|s| s.node(observer)).and_then(|n| n.camera()).expect("observer camera");
    assert_relative_eq!(observer_camera.aspect_ratio(), 640.0 / 480.0);
}

#[test]
#[should_panic(expected = "requires state")]
fn init_out_of_order_panics() {
    let path = save_path("order");
    let mut engine = engine(&path);
    let mut intro = Intro::new();
    intro.init_camera(&mut engine);
}
