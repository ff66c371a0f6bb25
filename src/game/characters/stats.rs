// Character stats - tuning constants for the player character

use crate::game::error::{self, ConfigError};

/// Tuning for the player character. Distances are in centimetres, speeds
/// in cm/s, angles in degrees.
#[derive(Debug, Clone, PartialEq)]
pub struct CharacterStats {
    // Health
    pub max_health: f32,
    /// Health the character spawns with
    pub starting_health: f32,

    // Stamina
    pub max_stamina: f32,
    /// Stamina the character spawns with
    pub starting_stamina: f32,
    /// Stamina drained per second while sprinting, and regained per second
    /// otherwise
    pub stamina_drain_rate: f32,
    /// Below this the character is warned (BelowMinimum) and, once
    /// exhausted, must recover past it before sprinting again
    pub min_sprint_stamina: f32,

    // Movement
    /// Max walk speed with Normal movement status
    pub running_speed: f32,
    /// Max walk speed with Sprinting movement status
    pub sprinting_speed: f32,
    pub jump_z_velocity: f32,
    /// How much of the desired horizontal velocity is applied per second
    /// in the air (0 = none, 1 = full)
    pub air_control: f32,
    /// Yaw degrees per second when turning to face the movement direction
    pub rotation_rate: f32,

    // Camera
    /// Keyboard turn rate, degrees per second at full deflection
    pub base_turn_rate: f32,
    /// Keyboard look-up rate, degrees per second at full deflection
    pub base_look_up_rate: f32,
    /// Distance the follow camera trails behind the character
    pub camera_arm_length: f32,

    // Collision capsule
    pub capsule_radius: f32,
    pub capsule_half_height: f32,
}

pub const BASE_STATS: CharacterStats = CharacterStats {
    max_health: 100.0,
    starting_health: 65.0,

    max_stamina: 150.0,
    starting_stamina: 120.0,
    stamina_drain_rate: 25.0,
    min_sprint_stamina: 50.0,

    running_speed: 650.0,
    sprinting_speed: 950.0,
    jump_z_velocity: 650.0,
    air_control: 0.2,
    rotation_rate: 540.0,

    base_turn_rate: 65.0,
    base_look_up_rate: 65.0,
    camera_arm_length: 600.0,

    capsule_radius: 48.0,
    capsule_half_height: 105.0,
};

impl Default for CharacterStats {
    fn default() -> Self {
        BASE_STATS
    }
}

impl CharacterStats {
    /// Reject constants the simulation cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        error::positive("max_health", self.max_health)?;
        error::in_range("starting_health", self.starting_health, 0.0, self.max_health)?;

        error::positive("max_stamina", self.max_stamina)?;
        error::in_range(
            "starting_stamina",
            self.starting_stamina,
            0.0,
            self.max_stamina,
        )?;
        error::non_negative("stamina_drain_rate", self.stamina_drain_rate)?;
        error::in_range(
            "min_sprint_stamina",
            self.min_sprint_stamina,
            0.0,
            self.max_stamina,
        )?;

        error::positive("running_speed", self.running_speed)?;
        error::positive("sprinting_speed", self.sprinting_speed)?;
        error::non_negative("jump_z_velocity", self.jump_z_velocity)?;
        error::in_range("air_control", self.air_control, 0.0, 1.0)?;
        error::non_negative("rotation_rate", self.rotation_rate)?;

        error::finite("base_turn_rate", self.base_turn_rate)?;
        error::finite("base_look_up_rate", self.base_look_up_rate)?;
        error::non_negative("camera_arm_length", self.camera_arm_length)?;

        error::positive("capsule_radius", self.capsule_radius)?;
        error::in_range(
            "capsule_half_height",
            self.capsule_half_height,
            self.capsule_radius,
            f32::MAX,
        )?;
        Ok(())
    }
}
