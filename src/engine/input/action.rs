// Game action and axis definitions with their default bindings

use winit::event::MouseButton;
use winit::keyboard::KeyCode;

/// Discrete in-game actions (pressed / released)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Jump,
    Sprint,
    /// Primary mouse button: equips the weapon the character is standing on
    Interact,
    Pause,
    /// Debug: mark where coins were collected
    ShowPickupLocations,
}

/// Continuous input axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    MoveForward,
    MoveRight,
    /// Mouse yaw, applied as-is
    Turn,
    /// Mouse pitch, applied as-is
    LookUp,
    /// Keyboard yaw, scaled by turn rate and frame time
    TurnRate,
    /// Keyboard pitch, scaled by look-up rate and frame time
    LookUpRate,
}

/// Represents an input source (keyboard key, mouse button or mouse motion)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputSource {
    Keyboard(KeyCode),
    Mouse(MouseButton),
    /// Horizontal mouse motion; only meaningful in axis bindings
    MouseMotionX,
    /// Vertical mouse motion; only meaningful in axis bindings
    MouseMotionY,
}

impl InputSource {
    pub fn key(code: KeyCode) -> Self {
        Self::Keyboard(code)
    }

    pub fn mouse(button: MouseButton) -> Self {
        Self::Mouse(button)
    }

    /// Mouse motion sources carry a per-frame delta rather than a held state
    pub fn is_motion(&self) -> bool {
        matches!(self, Self::MouseMotionX | Self::MouseMotionY)
    }
}

/// An axis mapping: while `source` is active it contributes `scale` to `axis`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisBinding {
    pub source: InputSource,
    pub axis: Axis,
    pub scale: f32,
}

impl AxisBinding {
    pub fn new(source: InputSource, axis: Axis, scale: f32) -> Self {
        Self {
            source,
            axis,
            scale,
        }
    }
}

/// Default keyboard/mouse action bindings
pub fn default_action_bindings() -> Vec<(InputSource, Action)> {
    vec![
        (InputSource::key(KeyCode::Space), Action::Jump),
        (InputSource::key(KeyCode::ShiftLeft), Action::Sprint),
        (InputSource::key(KeyCode::ShiftRight), Action::Sprint),
        (InputSource::mouse(MouseButton::Left), Action::Interact),
        (InputSource::key(KeyCode::Escape), Action::Pause),
        (InputSource::key(KeyCode::KeyP), Action::ShowPickupLocations),
    ]
}

/// Default axis bindings (WASD move, mouse look, arrow keys turn)
pub fn default_axis_bindings() -> Vec<AxisBinding> {
    vec![
        AxisBinding::new(InputSource::key(KeyCode::KeyW), Axis::MoveForward, 1.0),
        AxisBinding::new(InputSource::key(KeyCode::KeyS), Axis::MoveForward, -1.0),
        AxisBinding::new(InputSource::key(KeyCode::KeyD), Axis::MoveRight, 1.0),
        AxisBinding::new(InputSource::key(KeyCode::KeyA), Axis::MoveRight, -1.0),
        AxisBinding::new(InputSource::MouseMotionX, Axis::Turn, 1.0),
        // Screen Y grows downward
        AxisBinding::new(InputSource::MouseMotionY, Axis::LookUp, -1.0),
        AxisBinding::new(InputSource::key(KeyCode::ArrowRight), Axis::TurnRate, 1.0),
        AxisBinding::new(InputSource::key(KeyCode::ArrowLeft), Axis::TurnRate, -1.0),
        AxisBinding::new(InputSource::key(KeyCode::ArrowUp), Axis::LookUpRate, 1.0),
        AxisBinding::new(InputSource::key(KeyCode::ArrowDown), Axis::LookUpRate, -1.0),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_source_keyboard_creation() {
        let source = InputSource::key(KeyCode::KeyA);
        assert_eq!(source, InputSource::Keyboard(KeyCode::KeyA));
        assert!(!source.is_motion());
    }

    #[test]
    fn test_input_source_mouse_creation() {
        let source = InputSource::mouse(MouseButton::Left);
        assert_eq!(source, InputSource::Mouse(MouseButton::Left));
    }

    #[test]
    fn test_default_bindings_cover_every_action() {
        let bindings = default_action_bindings();
        for action in [Action::Jump, Action::Sprint, Action::Interact, Action::Pause] {
            assert!(
                bindings.iter().any(|(_, a)| *a == action),
                "{action:?} has no default binding"
            );
        }
    }

    #[test]
    fn test_default_axes_are_opposed_pairs() {
        let bindings = default_axis_bindings();
        for axis in [Axis::MoveForward, Axis::MoveRight, Axis::TurnRate, Axis::LookUpRate] {
            let sum: f32 = bindings
                .iter()
                .filter(|b| b.axis == axis)
                .map(|b| b.scale)
                .sum();
            assert_eq!(sum, 0.0, "{axis:?} bindings should cancel out");
        }
    }

    #[test]
    fn test_no_duplicate_action_sources() {
        let bindings = default_action_bindings();
        let mut seen_sources = std::collections::HashSet::new();
        for (source, _) in bindings {
            assert!(seen_sources.insert(source), "Duplicate input source");
        }
    }
}
