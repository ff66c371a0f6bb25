// Stamina / movement state machine

use log::debug;

/// How fast the character is allowed to move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MovementStatus {
    #[default]
    Normal,
    Sprinting,
}

/// Where the character's stamina sits relative to the sprint thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StaminaStatus {
    /// Above the minimum sprint stamina
    #[default]
    Normal,
    /// At or below the minimum, still allowed to sprint
    BelowMinimum,
    /// Ran dry while sprinting; sprint must be released to recover
    Exhausted,
    /// Regenerating after exhaustion; no sprinting until back above the
    /// minimum
    ExhaustedRecovering,
}

impl StaminaStatus {
    /// Whether a held sprint key can produce Sprinting movement
    pub fn can_sprint(&self) -> bool {
        matches!(self, Self::Normal | Self::BelowMinimum)
    }

    /// Whether the HUD should flag stamina as low
    pub fn is_low(&self) -> bool {
        !matches!(self, Self::Normal)
    }
}

/// Constants the machine reads each tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaminaParams {
    /// Stamina per second drained while sprinting and regained otherwise
    pub drain_rate: f32,
    pub min_sprint_stamina: f32,
    pub max_stamina: f32,
}

/// Result of one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaminaTick {
    pub stamina: f32,
    pub status: StaminaStatus,
    pub movement: MovementStatus,
    /// Status before the tick, for edge detection
    pub previous_status: StaminaStatus,
}

impl StaminaTick {
    pub fn status_changed(&self) -> bool {
        self.status != self.previous_status
    }
}

/// Per-character stamina state
#[derive(Debug, Clone)]
pub struct StaminaMachine {
    stamina: f32,
    status: StaminaStatus,
    movement: MovementStatus,
}

impl StaminaMachine {
    /// Start in Normal status with `stamina` (clamped to `[0, max]`)
    pub fn new(stamina: f32, max_stamina: f32) -> Self {
        Self {
            stamina: stamina.clamp(0.0, max_stamina.max(0.0)),
            status: StaminaStatus::Normal,
            movement: MovementStatus::Normal,
        }
    }

    pub fn stamina(&self) -> f32 {
        self.stamina
    }

    pub fn status(&self) -> StaminaStatus {
        self.status
    }

    pub fn movement(&self) -> MovementStatus {
        self.movement
    }

    /// Advance one frame.
    ///
    /// Sprinting drains `drain_rate * dt`; anything else regenerates the same
    /// amount. Stamina is kept inside `[0, max_stamina]`.
    pub fn tick(&mut self, sprint_held: bool, dt: f32, params: &StaminaParams) -> StaminaTick {
        let previous_status = self.status;
        let delta = params.drain_rate * dt;
        let min = params.min_sprint_stamina;

        let (stamina, status, movement) = match (self.status, sprint_held) {
            (StaminaStatus::Normal, true) => {
                let next = if self.stamina - delta <= min {
                    StaminaStatus::BelowMinimum
                } else {
                    StaminaStatus::Normal
                };
                (self.stamina - delta, next, MovementStatus::Sprinting)
            }
            (StaminaStatus::Normal, false) => (
                (self.stamina + delta).min(params.max_stamina),
                StaminaStatus::Normal,
                MovementStatus::Normal,
            ),

            (StaminaStatus::BelowMinimum, true) => {
                if self.stamina - delta <= 0.0 {
                    (0.0, StaminaStatus::Exhausted, MovementStatus::Normal)
                } else {
                    (
                        self.stamina - delta,
                        StaminaStatus::BelowMinimum,
                        MovementStatus::Sprinting,
                    )
                }
            }
            (StaminaStatus::BelowMinimum, false) => {
                let next = if self.stamina + delta >= min {
                    StaminaStatus::Normal
                } else {
                    StaminaStatus::BelowMinimum
                };
                (self.stamina + delta, next, MovementStatus::Normal)
            }

            (StaminaStatus::Exhausted, true) => {
                (0.0, StaminaStatus::Exhausted, MovementStatus::Normal)
            }
            (StaminaStatus::Exhausted, false) => (
                self.stamina + delta,
                StaminaStatus::ExhaustedRecovering,
                MovementStatus::Normal,
            ),

            // Sprint input is ignored until recovery completes
            (StaminaStatus::ExhaustedRecovering, _) => {
                let next = if self.stamina + delta >= min {
                    StaminaStatus::Normal
                } else {
                    StaminaStatus::ExhaustedRecovering
                };
                (self.stamina + delta, next, MovementStatus::Normal)
            }
        };

        self.stamina = stamina.clamp(0.0, params.max_stamina);
        self.status = status;
        self.movement = movement;

        if status != previous_status {
            debug!(
                "Stamina status {:?} -> {:?} (stamina {:.1})",
                previous_status, status, self.stamina
            );
        }

        StaminaTick {
            stamina: self.stamina,
            status,
            movement,
            previous_status,
        }
    }
}
