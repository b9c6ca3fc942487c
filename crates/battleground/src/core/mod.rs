//! # Core Module
//!
//! Shared abstractions the rest of the crate is configured through.
//!
//! ## Organization
//!
//! - **Config**: Unified configuration tree for the engine, output and episode

pub mod config;

pub use crate::config::{Config, ConfigError};

pub use config::{
    ApplicationConfig,
    CameraControlConfig,
    DroneConfig,
    EngineConfig,
    HumanoidVariant,
    IntroConfig,
    OutputConfig,
    PropGroup,
    ReflectionConfig,
    ScreenConfig,
    SpawnConfig,
    WorldConfig,
};
