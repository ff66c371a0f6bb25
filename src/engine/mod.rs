// Engine modules: frame timing, input, physics, timers, debug drawing

pub mod debug_draw;
pub mod game_loop;
pub mod input;
pub mod physics;
pub mod timer;
