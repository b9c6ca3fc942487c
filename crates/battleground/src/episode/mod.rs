//! # Episodes
//!
//! An episode is a self-contained scene plus the rules that run it. The
//! application owns exactly one and drives it through a fixed init sequence:
//!
//! ```text
//! Uninitialized -> SceneReady -> CamReady -> ObjectsReady -> ViewportReady -> Running
//! ```
//!
//! Each step needs what the previous one produced. Calling a step out of
//! order is a bug in the caller and panics.

pub mod camera_control;
pub mod intro;
pub mod spawn;
pub mod world;

use crate::engine::Engine;
use crate::scene::Scene;

pub use camera_control::{FlyCamera, PrimaryCamera};
pub use intro::Intro;

/// Position of an episode in its init sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LifecycleState {
    /// Nothing built yet
    Uninitialized,
    /// Static world exists
    SceneReady,
    /// Primary camera exists
    CamReady,
    /// Dynamic entities exist
    ObjectsReady,
    /// Viewports and render-to-texture rigs are bound
    ViewportReady,
    /// Receiving frame updates
    Running,
}

impl LifecycleState {
    /// Move from `from` to `to`.
    ///
    /// # Panics
    /// Panics when the current state is not `from`.
    pub fn advance(&mut self, step: &str, from: Self, to: Self) {
        assert!(*self == from, "{step} requires state {from:?}, but the episode is {self:?}");
        log::info!("{step}: {from:?} -> {to:?}");
        *self = to;
    }

    /// Panic unless the current state is `expected`
    pub fn require(&self, step: &str, expected: Self) {
        assert!(*self == expected, "{step} requires state {expected:?}, but the episode is {self:?}");
    }
}

/// A scene and its ruleset, driven by the application
pub trait Episode {
    /// Display name
    fn name(&self) -> &str;

    /// Current lifecycle state
    fn state(&self) -> LifecycleState;

    /// Build the static world. `Uninitialized -> SceneReady`
    fn init_scene(&mut self, engine: &mut Engine);

    /// Create the primary camera outside the scene so it survives a scene
    /// load. `SceneReady -> CamReady`
    fn init_camera(&mut self, engine: &mut Engine);

    /// Populate dynamic and autonomous entities. `CamReady -> ObjectsReady`
    fn init_objects(&mut self, engine: &mut Engine);

    /// Register the main viewport and bind the render-to-texture rigs.
    /// `ObjectsReady -> ViewportReady`
    fn init_viewport(&mut self, engine: &mut Engine);

    /// Create the instruction overlay
    fn create_instructions(&mut self, engine: &mut Engine);

    /// Start receiving frame updates. `ViewportReady -> Running`
    fn subscribe_to_events(&mut self, engine: &mut Engine);

    /// Per-frame logic while running
    fn handle_update(&mut self, engine: &mut Engine, delta_time: f32);

    /// Fly the primary camera from this frame's input
    fn move_camera(&mut self, engine: &mut Engine, delta_time: f32);

    /// Called after the renderer has collected the frame's draw calls
    fn handle_post_render_update(&mut self, _engine: &mut Engine, _delta_time: f32) {}

    /// The episode's scene, once built
    fn scene(&self) -> Option<&Scene>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_states_are_ordered() {
        assert!(LifecycleState::Uninitialized < LifecycleState::SceneReady);
        assert!(LifecycleState::ViewportReady < LifecycleState::Running);
    }

    #[test]
    fn test_advance_in_order() {
        let mut state = LifecycleState::Uninitialized;
        state.advance("init_scene", LifecycleState::Uninitialized, LifecycleState::SceneReady);
        state.advance("init_camera", LifecycleState::SceneReady, LifecycleState::CamReady);
        assert_eq!(state, LifecycleState::CamReady);
    }

    #[test]
    #[should_panic(expected = "requires state")]
    fn test_advance_out_of_order_panics() {
        let mut state = LifecycleState::Uninitialized;
        state.advance("init_viewport", LifecycleState::ObjectsReady, LifecycleState::ViewportReady);
    }
}
