// Per-player input state management

use super::action::{Action, InputSource};
use std::collections::HashSet;

/// Input state for the local player
#[derive(Debug, Default)]
pub struct PlayerInput {
    /// Actions that are currently pressed
    pressed: HashSet<Action>,

    /// Actions that were pressed this frame
    just_pressed: HashSet<Action>,

    /// Actions that were released this frame
    just_released: HashSet<Action>,

    /// Raw sources currently held, used to evaluate key axes
    held_sources: HashSet<InputSource>,

    /// Mouse motion accumulated since the last update
    mouse_delta: (f32, f32),
}

impl PlayerInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if an action is currently pressed
    pub fn is_pressed(&self, action: Action) -> bool {
        self.pressed.contains(&action)
    }

    /// Check if an action was just pressed this frame
    pub fn just_pressed(&self, action: Action) -> bool {
        self.just_pressed.contains(&action)
    }

    /// Check if an action was just released this frame
    pub fn just_released(&self, action: Action) -> bool {
        self.just_released.contains(&action)
    }

    /// Check if a raw source is held down
    pub fn is_source_held(&self, source: InputSource) -> bool {
        self.held_sources.contains(&source)
    }

    /// Mouse motion accumulated this frame as (x, y)
    pub fn mouse_delta(&self) -> (f32, f32) {
        self.mouse_delta
    }

    pub(crate) fn press(&mut self, action: Action) {
        if self.pressed.insert(action) {
            self.just_pressed.insert(action);
        }
    }

    pub(crate) fn release(&mut self, action: Action) {
        if self.pressed.remove(&action) {
            self.just_released.insert(action);
        }
    }

    pub(crate) fn hold_source(&mut self, source: InputSource) {
        self.held_sources.insert(source);
    }

    pub(crate) fn release_source(&mut self, source: InputSource) {
        self.held_sources.remove(&source);
    }

    pub(crate) fn add_mouse_delta(&mut self, dx: f32, dy: f32) {
        self.mouse_delta.0 += dx;
        self.mouse_delta.1 += dy;
    }

    /// Forget this frame's edges for one action, leaving the others intact
    pub(crate) fn consume(&mut self, action: Action) {
        self.just_pressed.remove(&action);
        self.just_released.remove(&action);
    }

    /// Start a new frame: clear edges and mouse motion
    pub(crate) fn update(&mut self) {
        self.just_pressed.clear();
        self.just_released.clear();
        self.mouse_delta = (0.0, 0.0);
    }

    /// Release everything (e.g. when the window loses focus). Held actions
    /// report a release edge on the next read.
    pub fn reset(&mut self) {
        self.just_pressed.clear();
        self.just_released.extend(self.pressed.drain());
        self.held_sources.clear();
        self.mouse_delta = (0.0, 0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::keyboard::KeyCode;

    #[test]
    fn test_player_input_creation() {
        let input = PlayerInput::new();
        assert!(!input.is_pressed(Action::Jump));
        assert_eq!(input.mouse_delta(), (0.0, 0.0));
    }

    #[test]
    fn test_press_action() {
        let mut input = PlayerInput::new();
        input.press(Action::Sprint);
        assert!(input.is_pressed(Action::Sprint));
        assert!(input.just_pressed(Action::Sprint));
    }

    #[test]
    fn test_release_action() {
        let mut input = PlayerInput::new();
        input.press(Action::Sprint);
        input.update();
        input.release(Action::Sprint);
        assert!(!input.is_pressed(Action::Sprint));
        assert!(input.just_released(Action::Sprint));
    }

    #[test]
    fn test_just_pressed_cleared_on_update() {
        let mut input = PlayerInput::new();
        input.press(Action::Jump);
        input.update();
        assert!(input.is_pressed(Action::Jump));
        assert!(!input.just_pressed(Action::Jump));
    }

    #[test]
    fn test_repeat_press_is_not_a_new_edge() {
        let mut input = PlayerInput::new();
        input.press(Action::Interact);
        input.update();
        input.press(Action::Interact);
        assert!(!input.just_pressed(Action::Interact));
    }

    #[test]
    fn test_consume_keeps_other_edges() {
        let mut input = PlayerInput::new();
        input.press(Action::Pause);
        input.press(Action::Jump);
        input.consume(Action::Pause);

        assert!(!input.just_pressed(Action::Pause));
        assert!(input.is_pressed(Action::Pause));
        assert!(input.just_pressed(Action::Jump));
    }

    #[test]
    fn test_release_unpressed_action() {
        let mut input = PlayerInput::new();
        input.release(Action::Jump);
        assert!(!input.just_released(Action::Jump));
    }

    #[test]
    fn test_mouse_delta_accumulates_and_clears() {
        let mut input = PlayerInput::new();
        input.add_mouse_delta(2.0, -1.0);
        input.add_mouse_delta(3.0, -1.0);
        assert_eq!(input.mouse_delta(), (5.0, -2.0));

        input.update();
        assert_eq!(input.mouse_delta(), (0.0, 0.0));
    }

    #[test]
    fn test_held_sources() {
        let mut input = PlayerInput::new();
        let w = InputSource::key(KeyCode::KeyW);
        input.hold_source(w);
        assert!(input.is_source_held(w));

        // Held state survives frame updates
        input.update();
        assert!(input.is_source_held(w));

        input.release_source(w);
        assert!(!input.is_source_held(w));
    }

    #[test]
    fn test_reset() {
        let mut input = PlayerInput::new();
        input.press(Action::Jump);
        input.hold_source(InputSource::key(KeyCode::KeyW));
        input.reset();

        assert!(!input.is_pressed(Action::Jump));
        assert!(!input.is_source_held(InputSource::key(KeyCode::KeyW)));
    }

    #[test]
    fn test_reset_reports_releases() {
        let mut input = PlayerInput::new();
        input.press(Action::Sprint);
        input.press(Action::Jump);
        input.update();
        input.reset();

        assert!(input.just_released(Action::Sprint));
        assert!(input.just_released(Action::Jump));
        assert!(!input.just_pressed(Action::Sprint));
        assert!(!input.just_released(Action::Interact));
    }
}
