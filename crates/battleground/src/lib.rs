//! # Battleground
//!
//! Scenario orchestration for a real-time 3D battleground. The host supplies
//! the renderer, physics and audio; this crate decides what is in the scene
//! and how it behaves from frame to frame.
//!
//! ## Features
//!
//! - **Episodes**: A fixed init sequence guarded by a lifecycle state machine
//! - **Autonomous Movers**: Humanoids and drones with soft boundary steering
//! - **Render Rigs**: Planar water reflection and a live security screen feed
//! - **Scene Persistence**: Save and reload the whole scene as RON
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use battleground::prelude::*;
//!
//! fn main() -> Result<(), AppError> {
//!     let config = ApplicationConfig::default();
//!     let engine = Engine::new(config, Box::new(AssetManifest::default()))?;
//!     let mut app = Application::new(engine, Box::new(Intro::new()));
//!     app.start();
//!     app.run_frames(60);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

// Core engine modules
pub mod core;
pub mod config;

pub mod foundation;
pub mod assets;
pub mod render;
pub mod scene;
pub mod movement;
pub mod input;
pub mod ui;
pub mod episode;

pub mod application;
mod engine;

pub use application::{AppError, AppEvent, Application};
pub use engine::{Engine, EngineError};

/// Common imports for crate users
pub mod prelude {
    pub use crate::{
        AppError, AppEvent, Application,
        Engine, EngineError,
        assets::{AssetManifest, AssetSource},
        core::{ApplicationConfig, Config, ConfigError, IntroConfig},
        episode::{Episode, Intro, LifecycleState},
        foundation::math::{Quat, Transform, Vec3},
        input::{FrameAction, InputManager, KeyCode, MouseButton},
        render::{Camera, CameraRef, ReflectionRig, ScreenRig},
        scene::{NodeId, Scene, SceneIoError, SceneStore},
    };
}
