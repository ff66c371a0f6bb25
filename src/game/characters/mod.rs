// Character system
//
// Everything about the player-controlled character:
// - Tuning stats and the stamina/movement state machine
// - Movement component and follow camera
// - The character itself and its animation driver

pub mod animation;
pub mod camera;
pub mod character;
pub mod movement;
pub mod stamina;
pub mod stats;

// Re-export commonly used types
pub use animation::{AnimationDriver, LocomotionPose, PawnView};
pub use character::{CharacterEvent, ControlInput, PlayerCharacter};
pub use stamina::{MovementStatus, StaminaStatus};
pub use stats::CharacterStats;
