// Input manager - turns raw window events into action and axis state

use super::action::{Action, Axis, InputSource};
use super::config::InputConfig;
use super::player::PlayerInput;
use winit::event::{ElementState, KeyEvent, MouseButton};
use winit::keyboard::PhysicalKey;

/// Owns the binding configuration and the local player's input state
#[derive(Debug, Default)]
pub struct InputManager {
    config: InputConfig,
    player: PlayerInput,
}

impl InputManager {
    /// Create an input manager with the default bindings
    pub fn new() -> Self {
        Self::with_config(InputConfig::default())
    }

    pub fn with_config(config: InputConfig) -> Self {
        Self {
            config,
            player: PlayerInput::new(),
        }
    }

    /// Process a keyboard event from winit
    pub fn process_keyboard_event(&mut self, event: &KeyEvent) {
        if let PhysicalKey::Code(key_code) = event.physical_key {
            let source = InputSource::key(key_code);
            match event.state {
                // Key repeats are not new presses
                ElementState::Pressed if !event.repeat => self.press_source(source),
                ElementState::Pressed => {}
                ElementState::Released => self.release_source(source),
            }
        }
    }

    /// Process a mouse button event from winit
    pub fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        let source = InputSource::mouse(button);
        match state {
            ElementState::Pressed => self.press_source(source),
            ElementState::Released => self.release_source(source),
        }
    }

    /// Process raw mouse motion (device event deltas)
    pub fn process_mouse_motion(&mut self, dx: f64, dy: f64) {
        self.player.add_mouse_delta(dx as f32, dy as f32);
    }

    pub(crate) fn press_source(&mut self, source: InputSource) {
        self.player.hold_source(source);
        if let Some(action) = self.config.get_action(source) {
            self.player.press(action);
        }
    }

    pub(crate) fn release_source(&mut self, source: InputSource) {
        self.player.release_source(source);
        if let Some(action) = self.config.get_action(source) {
            // Another source bound to the same action may still be down
            let still_held = self
                .config
                .get_sources(action)
                .into_iter()
                .any(|s| self.player.is_source_held(s));
            if !still_held {
                self.player.release(action);
            }
        }
    }

    /// Current value of an axis: the sum of every active mapping's scale,
    /// with mouse motion mappings weighted by this frame's delta
    pub fn axis_value(&self, axis: Axis) -> f32 {
        let (mouse_x, mouse_y) = self.player.mouse_delta();
        self.config
            .axis_bindings(axis)
            .map(|binding| match binding.source {
                InputSource::MouseMotionX => mouse_x * binding.scale,
                InputSource::MouseMotionY => mouse_y * binding.scale,
                source if self.player.is_source_held(source) => binding.scale,
                _ => 0.0,
            })
            .sum()
    }

    pub fn is_pressed(&self, action: Action) -> bool {
        self.player.is_pressed(action)
    }

    pub fn just_pressed(&self, action: Action) -> bool {
        self.player.just_pressed(action)
    }

    pub fn just_released(&self, action: Action) -> bool {
        self.player.just_released(action)
    }

    /// Take the edge of `action` if it fired this frame. Other actions keep
    /// theirs for the simulation.
    pub fn take_just_pressed(&mut self, action: Action) -> bool {
        let pressed = self.player.just_pressed(action);
        self.player.consume(action);
        pressed
    }

    /// Start a new frame. Call once per frame after the simulation has
    /// consumed this frame's input.
    pub fn update(&mut self) {
        self.player.update();
    }

    pub fn player(&self) -> &PlayerInput {
        &self.player
    }

    pub fn config(&self) -> &InputConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut InputConfig {
        &mut self.config
    }

    /// Drop all held input (focus loss)
    pub fn reset(&mut self) {
        self.player.reset();
    }
}
