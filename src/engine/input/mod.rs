// Input handling system
//
// Raw winit events go into the `InputManager`, which resolves them through
// an `InputConfig` into two kinds of state:
//
// - actions (`Jump`, `Sprint`, `Interact`, `Pause`) with press/release edges
// - axes (`MoveForward`, `MoveRight`, `Turn`, ...) summed from every active
//   mapping, mouse motion weighted by this frame's delta
//
// ```rust
// input.process_keyboard_event(&key_event);
// let forward = input.axis_value(Axis::MoveForward);
// if input.just_pressed(Action::Jump) { /* ... */ }
// input.update(); // end of frame
// ```

pub mod action;
pub mod config;
pub mod manager;
pub mod player;

pub use action::{Action, Axis, AxisBinding, InputSource};
pub use config::InputConfig;
pub use manager::InputManager;
