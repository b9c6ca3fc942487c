//! Input management system
//!
//! Tracks held keys for continuous camera movement, press edges for one-shot
//! actions, and the mouse movement accumulated since the last frame.

pub mod actions;

use std::collections::HashSet;

use crate::foundation::math::Vec2;

pub use actions::FrameAction;

/// Input manager
#[derive(Debug, Default)]
pub struct InputManager {
    held_keys: HashSet<KeyCode>,
    pressed_keys: HashSet<KeyCode>,
    held_buttons: HashSet<MouseButton>,
    pressed_buttons: HashSet<MouseButton>,
    mouse_delta: Vec2,
    cursor: Option<(f64, f64)>,
}

impl InputManager {
    /// Create a new input manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle key input
    pub fn handle_key_input(&mut self, key: KeyCode, pressed: bool) {
        if pressed {
            if self.held_keys.insert(key) {
                self.pressed_keys.insert(key);
            }
        } else {
            self.held_keys.remove(&key);
        }
    }

    /// Handle mouse button input
    pub fn handle_mouse_button(&mut self, button: MouseButton, pressed: bool) {
        if pressed {
            if self.held_buttons.insert(button) {
                self.pressed_buttons.insert(button);
            }
        } else {
            self.held_buttons.remove(&button);
        }
    }

    /// Handle an absolute cursor position; the first sample only sets the origin
    #[allow(clippy::cast_possible_truncation)]
    pub fn handle_mouse_move(&mut self, x: f64, y: f64) {
        if let Some((last_x, last_y)) = self.cursor {
            self.mouse_delta += Vec2::new((x - last_x) as f32, (y - last_y) as f32);
        }
        self.cursor = Some((x, y));
    }

    /// Handle relative mouse motion
    pub fn handle_mouse_motion(&mut self, dx: f32, dy: f32) {
        self.mouse_delta += Vec2::new(dx, dy);
    }

    /// Whether a key is held down
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.held_keys.contains(&key)
    }

    /// Whether a key went down this frame
    pub fn key_pressed(&self, key: KeyCode) -> bool {
        self.pressed_keys.contains(&key)
    }

    /// Whether a mouse button went down this frame
    pub fn mouse_button_pressed(&self, button: MouseButton) -> bool {
        self.pressed_buttons.contains(&button)
    }

    /// Mouse movement accumulated this frame, in pixels
    pub fn mouse_delta(&self) -> Vec2 {
        self.mouse_delta
    }

    /// Forget press edges and mouse movement; called after each frame
    pub fn end_frame(&mut self) {
        self.pressed_keys.clear();
        self.pressed_buttons.clear();
        self.mouse_delta = Vec2::zeros();
    }

    /// Drop all input state, e.g. when the window loses focus
    pub fn reset(&mut self) {
        self.end_frame();
        self.held_keys.clear();
        self.held_buttons.clear();
        self.cursor = None;
    }
}

/// Key codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A key
    A,
    /// D key
    D,
    /// O key
    O,
    /// S key
    S,
    /// W key
    W,
    /// F5 key
    F5,
    /// F7 key
    F7,
    /// F12 key
    F12,
}

/// Mouse buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left mouse button
    Left,
    /// Right mouse button
    Right,
    /// Middle mouse button
    Middle,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_edge_only_on_first_down() {
        let mut input = InputManager::new();
        input.handle_key_input(KeyCode::F5, true);
        assert!(input.key_pressed(KeyCode::F5));

        input.end_frame();
        input.handle_key_input(KeyCode::F5, true);
        assert!(!input.key_pressed(KeyCode::F5));
        assert!(input.is_key_down(KeyCode::F5));

        input.handle_key_input(KeyCode::F5, false);
        input.handle_key_input(KeyCode::F5, true);
        assert!(input.key_pressed(KeyCode::F5));
    }

    #[test]
    fn test_mouse_delta_accumulates_until_end_frame() {
        let mut input = InputManager::new();
        input.handle_mouse_move(100.0, 100.0);
        input.handle_mouse_move(110.0, 95.0);
        input.handle_mouse_motion(2.0, 1.0);
        assert_eq!(input.mouse_delta(), Vec2::new(12.0, -4.0));

        input.end_frame();
        assert_eq!(input.mouse_delta(), Vec2::zeros());
    }

    #[test]
    fn test_button_press_edge() {
        let mut input = InputManager::new();
        input.handle_mouse_button(MouseButton::Left, true);
        assert!(input.mouse_button_pressed(MouseButton::Left));
        input.end_frame();
        assert!(!input.mouse_button_pressed(MouseButton::Left));
    }
}
