//! Headless battleground run
//!
//! Builds the intro episode and drives it with a short scripted input
//! sequence: look around, launch a drone, throw a ball, then save and
//! reload the scene. A windowed host would feed real platform events
//! through the same `Application::handle_event`.

use battleground::foundation::logging;
use battleground::prelude::*;

const CONFIG_PATH: &str = "battleground.toml";
const ASSET_MANIFEST_PATH: &str = "assets.ron";

/// Input injected at a given frame
fn scripted_events(frame: u32) -> Vec<AppEvent> {
    match frame {
        5 => vec![AppEvent::MouseMotion { dx: 300.0, dy: 80.0 }],
        10 => vec![AppEvent::KeyInput { key: KeyCode::O, pressed: true }],
        11 => vec![AppEvent::KeyInput { key: KeyCode::O, pressed: false }],
        20 => vec![AppEvent::KeyInput { key: KeyCode::W, pressed: true }],
        40 => vec![
            AppEvent::KeyInput { key: KeyCode::W, pressed: false },
            AppEvent::MouseButton { button: MouseButton::Left, pressed: true },
        ],
        41 => vec![AppEvent::MouseButton { button: MouseButton::Left, pressed: false }],
        50 => vec![AppEvent::KeyInput { key: KeyCode::F5, pressed: true }],
        51 => vec![AppEvent::KeyInput { key: KeyCode::F5, pressed: false }],
        60 => vec![AppEvent::KeyInput { key: KeyCode::F7, pressed: true }],
        61 => vec![AppEvent::KeyInput { key: KeyCode::F7, pressed: false }],
        _ => Vec::new(),
    }
}

fn main() -> Result<(), AppError> {
    let config = ApplicationConfig::load_or_default(CONFIG_PATH).map_err(|e| AppError::Config(format!("{CONFIG_PATH}: {e}")))?;
    logging::init(&config.engine.log_level);

    log::info!("Starting {}", config.output.title);
    let frames = config.engine.frames;
    let assets = AssetManifest::load_or_default(ASSET_MANIFEST_PATH).map_err(|e| AppError::Config(format!("{ASSET_MANIFEST_PATH}: {e}")))?;

    let engine = Engine::new(config, Box::new(assets))?;
    let mut app = Application::new(engine, Box::new(Intro::new()));
    app.start();

    let mut frame = 0;
    while frame < frames && app.is_running() {
        for event in scripted_events(frame) {
            app.handle_event(event);
        }
        app.frame();
        frame += 1;
    }

    let nodes = app.episode().scene().map_or(0, Scene::node_count);
    log::info!("Finished after {frame} frames with {nodes} scene nodes");
    Ok(())
}
