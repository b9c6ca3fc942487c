//! Application lifecycle and event plumbing
//!
//! The application owns the engine and one episode. It runs the episode's
//! init sequence once, forwards platform events to the engine, and drives
//! the per-frame update.

use crate::engine::{Engine, EngineError};
use crate::episode::Episode;
use thiserror::Error;

/// Application-level errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Engine error propagated to application level
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),
}

/// Application events
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Window was resized
    WindowResized {
        /// New window width
        width: u32,
        /// New window height
        height: u32,
    },

    /// Window close requested
    WindowCloseRequested,

    /// Window lost focus
    WindowUnfocused,

    /// Key input event
    KeyInput {
        /// The key that was pressed/released
        key: crate::input::KeyCode,
        /// Whether the key was pressed (true) or released (false)
        pressed: bool,
    },

    /// Mouse button event
    MouseButton {
        /// The mouse button that was pressed/released
        button: crate::input::MouseButton,
        /// Whether the button was pressed (true) or released (false)
        pressed: bool,
    },

    /// Absolute cursor position
    MouseMoved {
        /// New X coordinate
        x: f64,
        /// New Y coordinate
        y: f64,
    },

    /// Relative mouse motion, e.g. with a captured cursor
    MouseMotion {
        /// Horizontal motion in pixels
        dx: f32,
        /// Vertical motion in pixels
        dy: f32,
    },
}

/// An engine running one episode
pub struct Application {
    engine: Engine,
    episode: Box<dyn Episode>,
    started: bool,
}

impl Application {
    /// Pair an engine with an uninitialized episode
    pub fn new(engine: Engine, episode: Box<dyn Episode>) -> Self {
        Self {
            engine,
            episode,
            started: false,
        }
    }

    /// Run the episode's init sequence. Calling it again does nothing.
    pub fn start(&mut self) {
        if self.started {
            log::warn!("Episode {} already started", self.episode.name());
            return;
        }

        log::info!("Starting episode {}", self.episode.name());
        let engine = &mut self.engine;
        let episode = &mut self.episode;
        episode.init_scene(engine);
        episode.init_camera(engine);
        episode.init_objects(engine);
        episode.create_instructions(engine);
        episode.init_viewport(engine);
        episode.subscribe_to_events(engine);
        self.started = true;
    }

    /// Forward a platform event to the engine
    pub fn handle_event(&mut self, event: AppEvent) {
        self.engine.handle_event(event);
    }

    /// Run one frame and return its time step
    pub fn frame(&mut self) -> f32 {
        let delta_time = self.engine.begin_frame();
        self.episode.handle_update(&mut self.engine, delta_time);
        self.episode.handle_post_render_update(&mut self.engine, delta_time);
        self.engine.end_frame();
        delta_time
    }

    /// Run up to `count` frames, stopping early if the engine quits.
    /// Returns the number of frames run.
    pub fn run_frames(&mut self, count: u32) -> u32 {
        let mut frames = 0;
        while frames < count && self.engine.is_running() {
            self.frame();
            frames += 1;
        }
        frames
    }

    /// Whether the main loop should keep going
    pub fn is_running(&self) -> bool {
        self.engine.is_running()
    }

    /// The engine
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Mutable engine access
    pub fn engine_mut(&mut self) -> &mut Engine {
        &mut self.engine
    }

    /// The running episode
    pub fn episode(&self) -> &dyn Episode {
        self.episode.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AssetManifest;
    use crate::core::ApplicationConfig;
    use crate::episode::{Intro, LifecycleState};

    fn small_application() -> Application {
        let mut config = ApplicationConfig::default();
        config.intro.seed = Some(3);
        config.intro.world.humanoid_count = 4;
        let engine = Engine::new(config, Box::new(AssetManifest::default())).expect("valid config");
        Application::new(engine, Box::new(Intro::new()))
    }

    #[test]
    fn test_start_runs_init_sequence() {
        let mut app = small_application();
        assert_eq!(app.episode().state(), LifecycleState::Uninitialized);
        app.start();
        assert_eq!(app.episode().state(), LifecycleState::Running);

        // A second start is ignored rather than re-running init
        app.start();
        assert_eq!(app.episode().state(), LifecycleState::Running);
    }

    #[test]
    fn test_run_frames_stops_on_close() {
        let mut app = small_application();
        app.start();
        assert_eq!(app.run_frames(3), 3);

        app.handle_event(AppEvent::WindowCloseRequested);
        assert_eq!(app.run_frames(3), 0);
        assert!(!app.is_running());
    }
}
