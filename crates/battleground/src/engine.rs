//! Engine context shared with the episode
//!
//! Owns the subsystems an episode talks to: output graphics, input, asset
//! lookup, the material library, the random source and the frame clock.

use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;

use crate::application::AppEvent;
use crate::assets::AssetSource;
use crate::core::{ApplicationConfig, IntroConfig};
use crate::foundation::time::FrameClock;
use crate::input::InputManager;
use crate::render::{Graphics, MaterialLibrary};

/// Main engine struct
pub struct Engine {
    /// Output surface
    pub graphics: Graphics,

    /// Input handling system
    pub input: InputManager,

    /// Materials shared by the scene and the render rigs
    pub materials: MaterialLibrary,

    /// Random source for scene population and spawning
    pub rng: StdRng,

    /// Asset lookup
    assets: Box<dyn AssetSource>,

    /// Frame timing
    clock: FrameClock,

    /// Application configuration
    config: ApplicationConfig,

    /// Whether the engine should continue running
    running: bool,
}

impl Engine {
    /// Create a new engine instance
    pub fn new(config: ApplicationConfig, assets: Box<dyn AssetSource>) -> Result<Self, EngineError> {
        log::info!("Initializing engine...");

        config.validate().map_err(|e| EngineError::ConfigError(e.to_string()))?;

        let rng = match config.intro.seed {
            Some(seed) => {
                log::info!("Using fixed seed {seed}");
                StdRng::seed_from_u64(seed)
            }
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            graphics: Graphics::new(config.output.width, config.output.height),
            input: InputManager::new(),
            materials: MaterialLibrary::new(),
            rng,
            assets,
            clock: FrameClock::new(config.engine.step_mode()),
            config,
            running: true,
        })
    }

    /// Handle an application event
    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::WindowCloseRequested => self.quit(),
            AppEvent::WindowResized { width, height } => self.graphics.resize(width, height),
            AppEvent::WindowUnfocused => self.input.reset(),
            AppEvent::KeyInput { key, pressed } => self.input.handle_key_input(key, pressed),
            AppEvent::MouseButton { button, pressed } => self.input.handle_mouse_button(button, pressed),
            AppEvent::MouseMoved { x, y } => self.input.handle_mouse_move(x, y),
            AppEvent::MouseMotion { dx, dy } => self.input.handle_mouse_motion(dx, dy),
        }
    }

    /// Advance the frame clock and return this frame's time step
    pub fn begin_frame(&mut self) -> f32 {
        self.clock.tick()
    }

    /// Clear per-frame input state
    pub fn end_frame(&mut self) {
        self.input.end_frame();
    }

    /// Asset lookup together with the random source, for populating a scene
    pub fn assets_and_rng(&mut self) -> (&dyn AssetSource, &mut StdRng) {
        (self.assets.as_ref(), &mut self.rng)
    }

    /// Application configuration
    pub fn config(&self) -> &ApplicationConfig {
        &self.config
    }

    /// Intro episode configuration
    pub fn intro_config(&self) -> &IntroConfig {
        &self.config.intro
    }

    /// Frame clock
    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    /// Get the current frame delta time
    pub fn delta_time(&self) -> f32 {
        self.clock.delta_time()
    }

    /// Whether the main loop should keep going
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Request engine shutdown
    pub fn quit(&mut self) {
        log::info!("Engine shutdown requested");
        self.running = false;
    }
}

/// Engine-level errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AssetManifest;
    use crate::input::KeyCode;
    use rand::Rng;

    fn engine_with_seed(seed: u64) -> Engine {
        let mut config = ApplicationConfig::default();
        config.intro.seed = Some(seed);
        Engine::new(config, Box::new(AssetManifest::default())).expect("valid config")
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = ApplicationConfig::default();
        config.output.width = 0;
        assert!(matches!(
            Engine::new(config, Box::new(AssetManifest::default())),
            Err(EngineError::ConfigError(_))
        ));
    }

    #[test]
    fn test_seeded_rng_is_deterministic() {
        let mut a = engine_with_seed(42);
        let mut b = engine_with_seed(42);
        assert_eq!(a.rng.gen::<u64>(), b.rng.gen::<u64>());
    }

    #[test]
    fn test_events_reach_subsystems() {
        let mut engine = engine_with_seed(1);
        engine.handle_event(AppEvent::WindowResized { width: 800, height: 400 });
        engine.handle_event(AppEvent::KeyInput { key: KeyCode::W, pressed: true });
        assert_eq!(engine.graphics.aspect_ratio(), 2.0);
        assert!(engine.input.is_key_down(KeyCode::W));

        engine.handle_event(AppEvent::WindowCloseRequested);
        assert!(!engine.is_running());
    }

    #[test]
    fn test_fixed_step_frames() {
        let mut engine = engine_with_seed(1);
        let step = engine.config().engine.fixed_time_step;
        assert_eq!(engine.begin_frame(), step);
        assert_eq!(engine.clock().frame_count(), 1);
    }
}
