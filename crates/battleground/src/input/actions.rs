//! One-shot actions resolved from the frame's press edges

use super::{InputManager, KeyCode, MouseButton};

/// Discrete action taken in a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameAction {
    /// Throw a ball from the camera
    SpawnBall,
    /// Launch a drone carrying the feed camera
    SpawnDrone,
    /// Write the scene to disk
    SaveScene,
    /// Replace the scene with the saved one
    LoadScene,
    /// Show or hide the instruction overlay
    ToggleInstructions,
    /// Walk up to the security screen
    FaceControlDisplay,
}

impl FrameAction {
    /// Resolve at most one action; earlier entries win.
    ///
    /// Order: spawn ball, spawn drone, save, load, toggle instructions,
    /// face control display.
    pub fn resolve(input: &InputManager) -> Option<Self> {
        if input.mouse_button_pressed(MouseButton::Left) {
            Some(Self::SpawnBall)
        } else if input.mouse_button_pressed(MouseButton::Middle) || input.key_pressed(KeyCode::O) {
            Some(Self::SpawnDrone)
        } else if input.key_pressed(KeyCode::F5) {
            Some(Self::SaveScene)
        } else if input.key_pressed(KeyCode::F7) {
            Some(Self::LoadScene)
        } else if input.key_pressed(KeyCode::F12) {
            Some(Self::ToggleInstructions)
        } else if input.mouse_button_pressed(MouseButton::Right) {
            Some(Self::FaceControlDisplay)
        } else {
            None
        }
    }
}
