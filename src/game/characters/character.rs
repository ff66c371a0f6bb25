// Player character: health, coins, stamina and input handling

use glam::Vec3;
use log::{debug, info};

use crate::engine::debug_draw::{DebugDraw, DebugSphere, GREEN};
use crate::engine::input::{Action, Axis, InputManager};
use crate::engine::physics::{body::presets, ColliderHandle, PhysicsWorld, RigidBodyHandle};
use crate::game::error::ConfigError;
use crate::game::ActorId;

use super::camera::{CameraBoom, ControlRotation};
use super::movement::CharacterMovement;
use super::stamina::{MovementStatus, StaminaMachine, StaminaParams, StaminaStatus};
use super::stats::CharacterStats;

/// How long pickup markers stay on screen (seconds)
const PICKUP_MARKER_DURATION: f32 = 10.0;

/// Things the character reports to the world
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CharacterEvent {
    /// Health reached zero
    Died,
    StaminaStatusChanged {
        from: StaminaStatus,
        to: StaminaStatus,
    },
}

/// One frame of player intent, sampled from the input manager
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ControlInput {
    pub move_forward: f32,
    pub move_right: f32,
    /// Mouse yaw, degrees
    pub turn: f32,
    /// Mouse pitch, degrees
    pub look_up: f32,
    /// Keyboard yaw rate, -1..1
    pub turn_rate: f32,
    /// Keyboard pitch rate, -1..1
    pub look_up_rate: f32,
    pub jump_pressed: bool,
    pub jump_released: bool,
    /// Sprint is held this frame
    pub sprint_held: bool,
    pub interact_pressed: bool,
    /// Interact is held this frame
    pub interact_held: bool,
}

impl ControlInput {
    pub fn from_input(input: &InputManager) -> Self {
        Self {
            move_forward: input.axis_value(Axis::MoveForward),
            move_right: input.axis_value(Axis::MoveRight),
            turn: input.axis_value(Axis::Turn),
            look_up: input.axis_value(Axis::LookUp),
            turn_rate: input.axis_value(Axis::TurnRate),
            look_up_rate: input.axis_value(Axis::LookUpRate),
            jump_pressed: input.just_pressed(Action::Jump),
            jump_released: input.just_released(Action::Jump),
            sprint_held: input.is_pressed(Action::Sprint),
            interact_pressed: input.just_pressed(Action::Interact),
            interact_held: input.is_pressed(Action::Interact),
        }
    }
}

/// The player-controlled character
#[derive(Debug)]
pub struct PlayerCharacter {
    pub id: ActorId,
    pub stats: CharacterStats,

    // Physics
    pub body_handle: RigidBodyHandle,
    pub collider_handle: ColliderHandle,

    health: f32,
    coins: u32,
    stamina: StaminaMachine,
    movement_status: MovementStatus,

    // Held buttons
    shift_key_down: bool,
    lmb_down: bool,

    pub control_rotation: ControlRotation,
    pub camera_boom: CameraBoom,
    pub movement: CharacterMovement,

    /// Item the character currently stands in, if any
    active_overlapping_item: Option<ActorId>,
    equipped_weapon: Option<ActorId>,
    pickup_locations: Vec<Vec3>,

    events: Vec<CharacterEvent>,
}

impl PlayerCharacter {
    /// Validate `stats` and spawn the character's capsule at `spawn`
    pub fn new(
        id: ActorId,
        stats: CharacterStats,
        physics: &mut PhysicsWorld,
        spawn: Vec3,
    ) -> Result<Self, ConfigError> {
        stats.validate()?;

        let body_handle = physics.add_rigid_body(presets::character_body(spawn));
        let collider = presets::character_collider(stats.capsule_radius, stats.capsule_half_height);
        let collider_handle = physics.add_collider(collider, body_handle);
        physics.set_entity_mapping(collider_handle, u64::from(id));

        let movement = CharacterMovement::new(
            stats.running_speed,
            stats.jump_z_velocity,
            stats.air_control,
            stats.rotation_rate,
        );

        Ok(Self {
            id,
            body_handle,
            collider_handle,
            health: stats.starting_health,
            coins: 0,
            stamina: StaminaMachine::new(stats.starting_stamina, stats.max_stamina),
            movement_status: MovementStatus::Normal,
            shift_key_down: false,
            lmb_down: false,
            control_rotation: ControlRotation::default(),
            camera_boom: CameraBoom::new(stats.camera_arm_length),
            movement,
            active_overlapping_item: None,
            equipped_weapon: None,
            pickup_locations: Vec::new(),
            events: Vec::new(),
            stats,
        })
    }

    /// Advance the stamina machine and apply the resulting movement status
    pub fn tick(&mut self, dt: f32) {
        let params = StaminaParams {
            drain_rate: self.stats.stamina_drain_rate,
            min_sprint_stamina: self.stats.min_sprint_stamina,
            max_stamina: self.stats.max_stamina,
        };
        let result = self.stamina.tick(self.shift_key_down, dt, &params);

        if result.status_changed() {
            self.events.push(CharacterEvent::StaminaStatusChanged {
                from: result.previous_status,
                to: result.status,
            });
        }
        if result.movement != self.movement_status {
            self.set_movement_status(result.movement);
        }
    }

    /// Run the movement component against the physics body
    pub fn update_movement(&mut self, physics: &mut PhysicsWorld, dt: f32) {
        self.movement
            .step(physics, self.body_handle, self.stats.capsule_half_height, dt);
    }

    /// Feed one frame of input. Returns the item picked up by an interact
    /// press, for the caller to equip.
    pub fn apply_input(&mut self, input: &ControlInput, dt: f32) -> Option<ActorId> {
        self.move_forward(input.move_forward);
        self.move_right(input.move_right);
        self.add_controller_yaw_input(input.turn);
        self.add_controller_pitch_input(input.look_up);
        self.turn_at_rate(input.turn_rate, dt);
        self.look_up_at_rate(input.look_up_rate, dt);

        if input.jump_pressed {
            self.jump();
        }
        if input.jump_released {
            self.stop_jumping();
        }
        // Held buttons follow the input state, not its edges
        if input.sprint_held != self.shift_key_down {
            if input.sprint_held {
                self.shift_key_down();
            } else {
                self.shift_key_up();
            }
        }

        let mut interacted = None;
        if input.interact_pressed {
            interacted = self.lmb_down();
        }
        if !input.interact_held && !input.interact_pressed && self.lmb_down {
            self.lmb_up();
        }
        interacted
    }

    pub fn set_movement_status(&mut self, status: MovementStatus) {
        self.movement_status = status;
        self.movement.max_walk_speed = match status {
            MovementStatus::Sprinting => self.stats.sprinting_speed,
            MovementStatus::Normal => self.stats.running_speed,
        };
        debug!(
            "Character {} movement {:?} (max walk speed {})",
            self.id, status, self.movement.max_walk_speed
        );
    }

    /// Move along the control yaw
    pub fn move_forward(&mut self, value: f32) {
        if value != 0.0 {
            let direction = self.control_rotation.ground_forward();
            self.movement.add_input_vector(direction, value);
        }
    }

    /// Strafe along the control yaw
    pub fn move_right(&mut self, value: f32) {
        if value != 0.0 {
            let direction = self.control_rotation.ground_right();
            self.movement.add_input_vector(direction, value);
        }
    }

    /// Keyboard turn; `rate` is normalised, 1.0 = full rate
    pub fn turn_at_rate(&mut self, rate: f32, dt: f32) {
        self.add_controller_yaw_input(rate * self.stats.base_turn_rate * dt);
    }

    /// Keyboard look; `rate` is normalised, 1.0 = full rate
    pub fn look_up_at_rate(&mut self, rate: f32, dt: f32) {
        self.add_controller_pitch_input(rate * self.stats.base_look_up_rate * dt);
    }

    pub fn add_controller_yaw_input(&mut self, degrees: f32) {
        if degrees != 0.0 {
            self.control_rotation.add_yaw(degrees);
        }
    }

    pub fn add_controller_pitch_input(&mut self, degrees: f32) {
        if degrees != 0.0 {
            self.control_rotation.add_pitch(degrees);
        }
    }

    pub fn jump(&mut self) {
        self.movement.jump();
    }

    pub fn stop_jumping(&mut self) {
        self.movement.stop_jumping();
    }

    pub fn shift_key_down(&mut self) {
        self.shift_key_down = true;
    }

    pub fn shift_key_up(&mut self) {
        self.shift_key_down = false;
    }

    /// Interact pressed. Hands back the overlapping item (and forgets it)
    /// so the caller can equip it.
    pub fn lmb_down(&mut self) -> Option<ActorId> {
        self.lmb_down = true;
        let item = self.active_overlapping_item.take();
        if item.is_none() {
            debug!("Character {} interact: nothing to pick up", self.id);
        }
        item
    }

    pub fn lmb_up(&mut self) {
        self.lmb_down = false;
    }

    pub fn is_lmb_down(&self) -> bool {
        self.lmb_down
    }

    pub fn is_shift_key_down(&self) -> bool {
        self.shift_key_down
    }

    /// Apply damage; health never drops below zero
    pub fn decrement_health(&mut self, amount: f32) {
        let was_alive = self.health > 0.0;
        self.health = (self.health - amount).max(0.0);
        if self.health <= 0.0 && was_alive {
            self.die();
        }
    }

    /// Signal death. Nothing else happens to the character.
    pub fn die(&mut self) {
        info!("Character {} died", self.id);
        self.events.push(CharacterEvent::Died);
    }

    pub fn increment_coins(&mut self, amount: u32) {
        self.coins = self.coins.saturating_add(amount);
    }

    pub fn add_pickup_location(&mut self, location: Vec3) {
        self.pickup_locations.push(location);
    }

    pub fn pickup_locations(&self) -> &[Vec3] {
        &self.pickup_locations
    }

    /// Mark every collected pickup location with a debug sphere
    pub fn show_pickup_locations(&self, draw: &mut DebugDraw) {
        for location in &self.pickup_locations {
            draw.draw_sphere(
                DebugSphere {
                    center: *location,
                    radius: 25.0,
                    segments: 12,
                    color: GREEN,
                    thickness: 0.5,
                },
                PICKUP_MARKER_DURATION,
            );
        }
    }

    /// Record the newly equipped weapon. Returns the one it replaces, which
    /// the caller destroys.
    pub fn set_equipped_weapon(&mut self, weapon: ActorId) -> Option<ActorId> {
        match self.equipped_weapon.replace(weapon) {
            Some(previous) if previous != weapon => Some(previous),
            _ => None,
        }
    }

    pub fn equipped_weapon(&self) -> Option<ActorId> {
        self.equipped_weapon
    }

    pub fn set_active_overlapping_item(&mut self, item: Option<ActorId>) {
        self.active_overlapping_item = item;
    }

    pub fn active_overlapping_item(&self) -> Option<ActorId> {
        self.active_overlapping_item
    }

    pub fn health(&self) -> f32 {
        self.health
    }

    pub fn coins(&self) -> u32 {
        self.coins
    }

    pub fn stamina(&self) -> f32 {
        self.stamina.stamina()
    }

    pub fn stamina_status(&self) -> StaminaStatus {
        self.stamina.status()
    }

    pub fn movement_status(&self) -> MovementStatus {
        self.movement_status
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    pub fn location(&self, physics: &PhysicsWorld) -> Option<Vec3> {
        physics.translation(self.body_handle)
    }

    pub fn velocity(&self, physics: &PhysicsWorld) -> Option<Vec3> {
        physics.linvel(self.body_handle)
    }

    /// Where the follow camera sits this frame
    pub fn camera_location(&self, physics: &PhysicsWorld) -> Option<Vec3> {
        self.location(physics)
            .map(|pivot| self.camera_boom.camera_location(pivot, &self.control_rotation))
    }

    /// Take the events raised since the last call
    pub fn drain_events(&mut self) -> Vec<CharacterEvent> {
        std::mem::take(&mut self.events)
    }
}
