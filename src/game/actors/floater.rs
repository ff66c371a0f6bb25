// Floater - platform that bobs on a sine wave, or gets one physics kick

use glam::Vec3;
use log::debug;

use crate::core::math::sine_wave;
use crate::engine::physics::{body::presets, to_physics, ColliderHandle, PhysicsWorld, RigidBodyHandle};
use crate::game::error::{self, ConfigError};
use crate::game::ActorId;

/// Editor-style properties of a floater
#[derive(Debug, Clone, PartialEq)]
pub struct FloaterConfig {
    /// Where the floater was placed in the level
    pub placed_location: Vec3,
    /// Spawn location used instead of `placed_location` when
    /// `initialize_location` is set
    pub initial_location: Vec3,
    pub initialize_location: bool,
    pub should_float: bool,
    /// A: amplitude
    pub amplitude: f32,
    /// B: period (angular frequency, rad/s)
    pub period: f32,
    /// C: phase shift
    pub phase_shift: f32,
    /// D: vertical shift
    pub vertical_shift: f32,
    /// Force applied on the first physics step; non-zero hands the floater
    /// to the physics simulation
    pub initial_force: Vec3,
    /// Torque applied on the first physics step; same rule as the force
    pub initial_torque: Vec3,
    pub half_extents: Vec3,
}

impl Default for FloaterConfig {
    fn default() -> Self {
        Self {
            placed_location: Vec3::ZERO,
            initial_location: Vec3::ZERO,
            initialize_location: false,
            should_float: true,
            amplitude: 1.0,
            period: 1.0,
            phase_shift: 0.0,
            vertical_shift: 0.0,
            initial_force: Vec3::ZERO,
            initial_torque: Vec3::ZERO,
            half_extents: Vec3::new(50.0, 50.0, 10.0),
        }
    }
}

impl FloaterConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        error::finite("amplitude", self.amplitude)?;
        error::finite("period", self.period)?;
        error::finite("phase_shift", self.phase_shift)?;
        error::finite("vertical_shift", self.vertical_shift)?;
        error::finite("initial_force", self.initial_force.length_squared())?;
        error::finite("initial_torque", self.initial_torque.length_squared())?;
        error::positive("half_extents", self.half_extents.min_element())?;
        Ok(())
    }

    /// Whether physics owns the floater's motion
    pub fn simulates_physics(&self) -> bool {
        self.initial_force != Vec3::ZERO || self.initial_torque != Vec3::ZERO
    }

    /// Location the floater starts at
    pub fn spawn_location(&self) -> Vec3 {
        if self.initialize_location {
            self.initial_location
        } else {
            self.placed_location
        }
    }
}

#[derive(Debug)]
pub struct Floater {
    pub id: ActorId,
    pub config: FloaterConfig,
    pub body_handle: RigidBodyHandle,
    pub collider_handle: ColliderHandle,
    /// Horizontal position the wave is applied at
    anchor: Vec3,
    base_z: f32,
    running_time: f32,
    simulate_physics: bool,
    /// Initial force/torque still applied to the body
    kick_pending: bool,
}

impl Floater {
    /// Validate the config, spawn the body and apply any initial kick
    pub fn new(id: ActorId, config: FloaterConfig, physics: &mut PhysicsWorld) -> Result<Self, ConfigError> {
        config.validate()?;

        let location = config.spawn_location();
        let simulate_physics = config.simulates_physics();

        let body_handle = physics.add_rigid_body(presets::floater_body(location, simulate_physics));
        let collider_handle = physics.add_collider(presets::floater_collider(config.half_extents), body_handle);
        physics.set_entity_mapping(collider_handle, u64::from(id));

        let mut kick_pending = false;
        if simulate_physics {
            if let Some(body) = physics.get_rigid_body_mut(body_handle) {
                body.add_force(to_physics(config.initial_force), true);
                body.add_torque(to_physics(config.initial_torque), true);
                kick_pending = true;
            }
            debug!(
                "Floater {} simulating physics (force {:?}, torque {:?})",
                id, config.initial_force, config.initial_torque
            );
        }

        Ok(Self {
            id,
            body_handle,
            collider_handle,
            anchor: location,
            base_z: location.z,
            running_time: 0.0,
            simulate_physics,
            kick_pending,
            config,
        })
    }

    /// Height of the floater after `t` seconds of floating
    pub fn height_at(&self, t: f32) -> f32 {
        self.base_z
            + sine_wave(
                self.config.amplitude,
                self.config.period,
                self.config.phase_shift,
                self.config.vertical_shift,
                t,
            )
    }

    /// Advance the wave and move the body. Physics-driven floaters are left
    /// alone.
    pub fn tick(&mut self, physics: &mut PhysicsWorld, dt: f32) {
        if !self.config.should_float || self.simulate_physics {
            return;
        }
        self.running_time += dt;
        let z = self.height_at(self.running_time);
        physics.set_position(self.body_handle, Vec3::new(self.anchor.x, self.anchor.y, z));
    }

    /// Called after each physics step; the initial kick lasts one step
    pub fn after_physics_step(&mut self, physics: &mut PhysicsWorld) {
        if !self.kick_pending {
            return;
        }
        if let Some(body) = physics.get_rigid_body_mut(self.body_handle) {
            body.reset_forces(false);
            body.reset_torques(false);
        }
        self.kick_pending = false;
    }

    pub fn running_time(&self) -> f32 {
        self.running_time
    }

    pub fn base_z(&self) -> f32 {
        self.base_z
    }

    pub fn simulates_physics(&self) -> bool {
        self.simulate_physics
    }

    pub fn location(&self, physics: &PhysicsWorld) -> Option<Vec3> {
        physics.translation(self.body_handle)
    }
}
