//! # Unified Configuration
//!
//! All tunables of the application in one serializable tree:
//!
//! - **Engine**: logging and frame loop behaviour
//! - **Output**: initial back buffer resolution
//! - **Intro**: every constant the intro episode uses for its world, camera,
//!   spawning, movers and render-to-texture rigs
//!
//! Defaults reproduce the reference scenario exactly; a TOML or RON file only
//! needs to list the values it changes.

use serde::{Deserialize, Serialize};

use crate::config::{Config, ConfigError};
use crate::foundation::math::Vec3;
use crate::foundation::time::StepMode;

/// # Engine Configuration
///
/// Core engine behaviour: logging and the headless frame loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Log level used when `RUST_LOG` is unset
    pub log_level: String,
    /// Number of frames a headless run executes
    pub frames: u32,
    /// Fixed time step for headless runs, in seconds
    pub fixed_time_step: f32,
    /// Measure wall-clock frame time instead of using the fixed step
    pub real_time: bool,
}

impl EngineConfig {
    /// Where frame time steps come from
    pub fn step_mode(&self) -> StepMode {
        if self.real_time {
            StepMode::RealTime
        } else {
            StepMode::Fixed(self.fixed_time_step)
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            frames: 600,
            fixed_time_step: 1.0 / 60.0,
            real_time: false,
        }
    }
}

/// # Output Configuration
///
/// Initial output resolution. Resizes arrive later as events.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Window / output title
    pub title: String,
    /// Output width in pixels
    pub width: u32,
    /// Output height in pixels
    pub height: u32,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            title: "AI Battleground".to_string(),
            width: 1280,
            height: 720,
        }
    }
}

/// Fly camera controls
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraControlConfig {
    /// Translation speed in world units per second
    pub move_speed: f32,
    /// Mouse sensitivity in degrees per pixel
    pub mouse_sensitivity: f32,
    /// Far clip distance of the primary camera
    pub far_clip: f32,
    /// Initial camera position
    pub start_position: Vec3,
    /// Multiple of `move_speed * Δt` the camera backs away after facing the display
    pub face_display_pushback: f32,
    /// Offset of the screen surface from its backing box
    pub screen_surface_offset: Vec3,
}

impl Default for CameraControlConfig {
    fn default() -> Self {
        Self {
            move_speed: 60.0,
            mouse_sensitivity: 0.1,
            far_clip: 1000.0,
            start_position: Vec3::new(0.0, 50.0, 50.0),
            face_display_pushback: 5.0,
            screen_surface_offset: Vec3::new(0.0, 0.0, -0.27),
        }
    }
}

/// One group of scattered physics props
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropGroup {
    /// Node name
    pub name: String,
    /// Model resource
    pub model: String,
    /// Material resource
    pub material: String,
    /// Number of props
    pub count: u32,
    /// Mass per unit of scale
    pub mass_per_scale: f32,
}

impl PropGroup {
    fn new(name: &str, model: &str, material: &str, count: u32, mass_per_scale: f32) -> Self {
        Self {
            name: name.to_string(),
            model: model.to_string(),
            material: material.to_string(),
            count,
            mass_per_scale,
        }
    }
}

/// One humanoid model variant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HumanoidVariant {
    /// Model resource
    pub model: String,
    /// Run animation resource
    pub animation: String,
    /// Material resource
    pub material: String,
}

impl HumanoidVariant {
    fn new(model: &str, animation: &str, material: &str) -> Self {
        Self {
            model: model.to_string(),
            animation: animation.to_string(),
            material: material.to_string(),
        }
    }
}

/// Static world and population
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Props are scattered in `[0, prop_spread)` on X and Z
    pub prop_spread: f32,
    /// Prop groups created by the scene step
    pub props: Vec<PropGroup>,
    /// Water plane position
    pub water_position: Vec3,
    /// Water plane scale
    pub water_scale: Vec3,
    /// Number of humanoids created by the objects step
    pub humanoid_count: u32,
    /// Base humanoid move speed (reduced by a quarter of the scale)
    pub humanoid_move_speed: f32,
    /// Humanoid turn speed in degrees per second
    pub humanoid_rotation_speed: f32,
    /// Humanoid containment half extent on X and Z
    pub humanoid_bounds: f32,
    /// Humanoid model variants
    pub humanoid_variants: Vec<HumanoidVariant>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            prop_spread: 700.0,
            props: vec![
                PropGroup::new("Cylinder", "Models/Cylinder.mdl", "Materials/RibbonTrail.xml", 100, 100.0),
                PropGroup::new("Cone", "Models/Cone.mdl", "Materials/Mushroom.xml", 100, 300.0),
                PropGroup::new("Torus", "Models/Torus.mdl", "Materials/Water.xml", 100, 150.0),
                PropGroup::new("Mushroom", "Models/Mushroom.mdl", "Materials/Mushroom.xml", 100, 1000.0),
                PropGroup::new("Box", "Models/Box.mdl", "Materials/Particle.xml", 300, 30.0),
                PropGroup::new("Sphere", "Models/Sphere.mdl", "Materials/Stone.xml", 300, 10.0),
            ],
            water_position: Vec3::new(0.0, 5.0, 0.0),
            water_scale: Vec3::new(2048.0, 1.0, 2048.0),
            humanoid_count: 700,
            humanoid_move_speed: 15.0,
            humanoid_rotation_speed: 100.0,
            humanoid_bounds: 1000.0,
            humanoid_variants: vec![
                HumanoidVariant::new("Models/Mutant/Mutant.mdl", "Models/Mutant/Mutant_Run.ani", "Models/Mutant/Materials/mutant_M.xml"),
                HumanoidVariant::new("Models/X_Bot/X_Bot.mdl", "Models/X_Bot/X_Bot_Run.ani", "Models/X_Bot/Materials/X_BotSurface.xml"),
                HumanoidVariant::new("Models/X_Bot/X_Bot.mdl", "Models/X_Bot/X_Bot_Run2.ani", "Models/X_Bot/Materials/X_BotSurface.xml"),
                HumanoidVariant::new("Models/Swat/Swat.mdl", "Models/Swat/Swat_SprintFwd.ani", "Models/Mutant/Materials/mutant_M.xml"),
                HumanoidVariant::new("Models/Mutant/Mutant.mdl", "Models/Mutant/Mutant_Jump.ani", "Models/Mutant/Materials/mutant_M.xml"),
            ],
        }
    }
}

/// Thrown ball spawning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    /// Launch speed in units per second
    pub launch_speed: f32,
    /// Upward component added to the camera-local launch direction
    pub upward_bias: f32,
    /// Mass per unit of scale
    pub mass_per_scale: f32,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            launch_speed: 70.0,
            upward_bias: 0.25,
            mass_per_scale: 50.0,
        }
    }
}

/// Drone spawning and movement
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DroneConfig {
    /// Move speed in units per second
    pub move_speed: f32,
    /// Turn speed in degrees per second
    pub rotation_speed: f32,
    /// Containment half extent on X and Z
    pub bounds: f32,
    /// Altitude the drone is pinned to every tick
    pub altitude: f32,
    /// Uniform scale of the drone node
    pub scale: f32,
    /// Rigid body mass
    pub mass: f32,
    /// Observer camera offset from the drone position
    pub observer_offset: Vec3,
}

impl Default for DroneConfig {
    fn default() -> Self {
        Self {
            move_speed: 30.0,
            rotation_speed: 200.0,
            bounds: 900.0,
            altitude: 200.0,
            scale: 3.0,
            mass: 10.0,
            observer_offset: Vec3::zeros(),
        }
    }
}

/// Water reflection rig
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReflectionConfig {
    /// Square reflection texture size in pixels
    pub texture_size: u32,
    /// Far clip of the reflection camera
    pub far_clip: f32,
    /// Distance the clip plane sits below the reflection plane
    pub clip_bias: f32,
}

impl Default for ReflectionConfig {
    fn default() -> Self {
        Self {
            texture_size: 1024,
            far_clip: 750.0,
            clip_bias: 0.1,
        }
    }
}

/// Drone security screen rig
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    /// Feed texture width in pixels
    pub texture_width: u32,
    /// Feed texture height in pixels
    pub texture_height: u32,
    /// Far clip of the observer camera
    pub observer_far_clip: f32,
    /// Initial observer camera position
    pub observer_position: Vec3,
    /// Constant depth bias of the screen material
    pub depth_bias: f32,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            texture_width: 1024,
            texture_height: 768,
            observer_far_clip: 600.0,
            observer_position: Vec3::new(0.0, 300.0, -20.0),
            depth_bias: -0.001,
        }
    }
}

/// # Intro Episode Configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IntroConfig {
    /// Fly camera controls
    pub camera: CameraControlConfig,
    /// World construction
    pub world: WorldConfig,
    /// Ball spawning
    pub spawn: SpawnConfig,
    /// Drone spawning
    pub drone: DroneConfig,
    /// Water reflection
    pub reflection: ReflectionConfig,
    /// Security screen
    pub screen: ScreenConfig,
    /// Scene document written by F5 and read by F7
    pub save_path: String,
    /// Seed for world population; entropy when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for IntroConfig {
    fn default() -> Self {
        Self {
            camera: CameraControlConfig::default(),
            world: WorldConfig::default(),
            spawn: SpawnConfig::default(),
            drone: DroneConfig::default(),
            reflection: ReflectionConfig::default(),
            screen: ScreenConfig::default(),
            save_path: "Data/Scenes/battleground.ron".to_string(),
            seed: None,
        }
    }
}

impl IntroConfig {
    /// Validate the episode tunables
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("camera.move_speed", self.camera.move_speed),
            ("camera.far_clip", self.camera.far_clip),
            ("spawn.launch_speed", self.spawn.launch_speed),
            ("spawn.mass_per_scale", self.spawn.mass_per_scale),
            ("drone.scale", self.drone.scale),
            ("drone.bounds", self.drone.bounds),
            ("world.humanoid_bounds", self.world.humanoid_bounds),
            ("world.prop_spread", self.world.prop_spread),
            ("reflection.far_clip", self.reflection.far_clip),
        ];
        for (name, value) in positive {
            if value <= 0.0 {
                return Err(ConfigError::Invalid(format!("{name} must be positive, got {value}")));
            }
        }

        if self.reflection.far_clip > self.camera.far_clip {
            return Err(ConfigError::Invalid(format!(
                "reflection.far_clip ({}) must not exceed camera.far_clip ({})",
                self.reflection.far_clip, self.camera.far_clip
            )));
        }

        if self.reflection.clip_bias < 0.0 {
            return Err(ConfigError::Invalid("reflection.clip_bias must not be negative".to_string()));
        }

        if self.reflection.texture_size == 0 || self.screen.texture_width == 0 || self.screen.texture_height == 0 {
            return Err(ConfigError::Invalid("render target sizes must be non-zero".to_string()));
        }

        if self.world.humanoid_count > 0 && self.world.humanoid_variants.is_empty() {
            return Err(ConfigError::Invalid("humanoids requested but no humanoid variants configured".to_string()));
        }

        if self.save_path.is_empty() {
            return Err(ConfigError::Invalid("save_path cannot be empty".to_string()));
        }

        Ok(())
    }
}

/// # Complete Application Configuration
///
/// Top-level configuration that encompasses all subsystems.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationConfig {
    /// Engine core configuration
    pub engine: EngineConfig,
    /// Output configuration
    pub output: OutputConfig,
    /// Intro episode configuration
    pub intro: IntroConfig,
}

impl ApplicationConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.output.width == 0 || self.output.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "output resolution must be non-zero, got {}x{}",
                self.output.width, self.output.height
            )));
        }
        if self.engine.fixed_time_step <= 0.0 {
            return Err(ConfigError::Invalid("engine.fixed_time_step must be positive".to_string()));
        }
        self.intro.validate()
    }
}

impl Config for ApplicationConfig {}
