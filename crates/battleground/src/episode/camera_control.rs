//! Free-flying primary camera

use crate::core::CameraControlConfig;
use crate::foundation::math::{directions, rotation_from_euler_degrees, Quat, Transform, Vec2, Vec3};
use crate::input::{InputManager, KeyCode};
use crate::render::Camera;

/// The primary camera. Lives outside the scene so a scene load leaves it alone.
#[derive(Debug, Clone)]
pub struct PrimaryCamera {
    /// World pose
    pub transform: Transform,
    /// Projection settings
    pub camera: Camera,
}

/// Mouse-look and WASD controller
#[derive(Debug, Clone)]
pub struct FlyCamera {
    yaw: f32,
    pitch: f32,
    move_speed: f32,
    mouse_sensitivity: f32,
}

impl FlyCamera {
    /// Controller with the given speed (units/s) and sensitivity (degrees/pixel)
    pub fn new(move_speed: f32, mouse_sensitivity: f32) -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            move_speed,
            mouse_sensitivity,
        }
    }

    /// Controller from configuration
    pub fn from_config(config: &CameraControlConfig) -> Self {
        Self::new(config.move_speed, config.mouse_sensitivity)
    }

    /// Accumulated yaw in degrees
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Accumulated pitch in degrees, within [-90, 90]
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Translation speed in units per second
    pub fn move_speed(&self) -> f32 {
        self.move_speed
    }

    /// Apply mouse movement and return the resulting orientation.
    ///
    /// Horizontal motion yaws, vertical motion pitches; roll stays zero.
    pub fn look(&mut self, mouse_delta: Vec2) -> Quat {
        self.yaw += self.mouse_sensitivity * mouse_delta.x;
        self.pitch = (self.pitch + self.mouse_sensitivity * mouse_delta.y).clamp(-90.0, 90.0);
        self.orientation()
    }

    /// Orientation for the current yaw and pitch
    pub fn orientation(&self) -> Quat {
        rotation_from_euler_degrees(self.pitch, self.yaw, 0.0)
    }

    /// Heading without pitch
    pub fn heading(&self) -> Quat {
        rotation_from_euler_degrees(0.0, self.yaw, 0.0)
    }

    /// Local-space movement for the held keys this frame
    pub fn translation(&self, input: &InputManager, delta_time: f32) -> Vec3 {
        let step = self.move_speed * delta_time;
        [
            (KeyCode::W, directions::forward()),
            (KeyCode::S, directions::back()),
            (KeyCode::A, directions::left()),
            (KeyCode::D, directions::right()),
        ]
        .into_iter()
        .filter(|(key, _)| input.is_key_down(*key))
        .fold(Vec3::zeros(), |sum, (_, direction)| sum + direction * step)
    }

    /// Rotate and move `pose` from this frame's input
    pub fn apply(&mut self, pose: &mut Transform, input: &InputManager, delta_time: f32) {
        pose.rotation = self.look(input.mouse_delta());
        let delta = self.translation(input, delta_time);
        if delta != Vec3::zeros() {
            pose.translate_local(delta);
            log::trace!("Camera at {:?}", pose.position);
        }
    }
}
