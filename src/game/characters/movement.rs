// Character movement: turns accumulated movement input into body velocity

use glam::Vec3;
use log::debug;

use crate::core::math::{approach_degrees, lateral};
use crate::engine::physics::{from_physics, to_physics, PhysicsWorld, QueryFilter, RigidBodyHandle, Vector};

/// Fraction of the remaining air-control blend applied per second
const AIR_CONTROL_RESPONSE: f32 = 10.0;

/// How far below the capsule the ground probe reaches (cm)
const GROUND_PROBE_DISTANCE: f32 = 4.0;

/// Input magnitudes below this are treated as no input
const INPUT_DEADZONE: f32 = 1e-4;

/// Movement component for a walking character
#[derive(Debug, Clone)]
pub struct CharacterMovement {
    /// Horizontal speed at full input; set from the movement status
    pub max_walk_speed: f32,
    pub jump_z_velocity: f32,
    pub air_control: f32,
    /// Degrees per second the body yaws toward its movement direction
    pub rotation_rate: f32,
    pending_input: Vec3,
    wants_jump: bool,
    is_falling: bool,
    facing_yaw: f32,
}

impl CharacterMovement {
    pub fn new(max_walk_speed: f32, jump_z_velocity: f32, air_control: f32, rotation_rate: f32) -> Self {
        Self {
            max_walk_speed,
            jump_z_velocity,
            air_control,
            rotation_rate,
            pending_input: Vec3::ZERO,
            wants_jump: false,
            is_falling: false,
            facing_yaw: 0.0,
        }
    }

    /// Accumulate movement input for this tick
    pub fn add_input_vector(&mut self, direction: Vec3, scale: f32) {
        self.pending_input += direction * scale;
    }

    /// Take the accumulated input, clamped to unit length
    pub fn consume_input_vector(&mut self) -> Vec3 {
        let input = self.pending_input.clamp_length_max(1.0);
        self.pending_input = Vec3::ZERO;
        input
    }

    /// Input accumulated so far this tick
    pub fn pending_input(&self) -> Vec3 {
        self.pending_input
    }

    /// Request a jump; performed on the next grounded tick
    pub fn jump(&mut self) {
        self.wants_jump = true;
    }

    pub fn stop_jumping(&mut self) {
        self.wants_jump = false;
    }

    pub fn is_falling(&self) -> bool {
        self.is_falling
    }

    /// Yaw the body currently faces (degrees)
    pub fn facing_yaw(&self) -> f32 {
        self.facing_yaw
    }

    /// Velocity for the next tick given the current one and the input
    pub fn compute_velocity(&self, current: Vec3, input: Vec3, grounded: bool, dt: f32) -> Vec3 {
        let desired = lateral(input) * self.max_walk_speed;
        let current_lateral = lateral(current);

        let horizontal = if grounded {
            desired
        } else if input.length_squared() > INPUT_DEADZONE {
            let t = (self.air_control * AIR_CONTROL_RESPONSE * dt).min(1.0);
            current_lateral + (desired - current_lateral) * t
        } else {
            // Keep momentum through the air
            current_lateral
        };

        Vec3::new(horizontal.x, horizontal.y, current.z)
    }

    /// Turn the body toward the direction of travel
    pub fn orient_to_movement(&mut self, input: Vec3, dt: f32) {
        let flat = lateral(input);
        if flat.length_squared() <= INPUT_DEADZONE {
            return;
        }
        let target = flat.y.atan2(flat.x).to_degrees();
        self.facing_yaw = approach_degrees(self.facing_yaw, target, self.rotation_rate * dt);
    }

    /// Run one movement tick against the physics body
    pub fn step(
        &mut self,
        physics: &mut PhysicsWorld,
        body: RigidBodyHandle,
        capsule_half_height: f32,
        dt: f32,
    ) {
        let input = self.consume_input_vector();

        let grounded = Self::probe_ground(physics, body, capsule_half_height);
        let Some(current) = physics.linvel(body) else {
            return;
        };

        let mut velocity = self.compute_velocity(current, input, grounded, dt);
        let jumped = self.wants_jump && grounded;
        if jumped {
            velocity.z = self.jump_z_velocity;
            self.wants_jump = false;
            debug!("Jump (z velocity {})", self.jump_z_velocity);
        }

        self.orient_to_movement(input, dt);

        if let Some(rigid_body) = physics.get_rigid_body_mut(body) {
            rigid_body.set_linvel(to_physics(velocity), true);
        }

        // Leaving the ground this tick counts as falling
        self.is_falling = !grounded || jumped;
    }

    /// Cast a short ray down from the bottom of the capsule
    fn probe_ground(physics: &PhysicsWorld, body: RigidBodyHandle, capsule_half_height: f32) -> bool {
        let Some(rigid_body) = physics.get_rigid_body(body) else {
            return false;
        };
        let position = from_physics(rigid_body.translation());

        // Start just inside the capsule so a resting body still hits
        let origin = Vector::new(position.x, position.y, position.z - capsule_half_height + 1.0);
        let direction = Vector::new(0.0, 0.0, -1.0);

        physics
            .raycast(
                origin,
                direction,
                GROUND_PROBE_DISTANCE,
                true,
                QueryFilter::default()
                    .exclude_rigid_body(body)
                    .exclude_sensors(),
            )
            .is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::physics::body::presets;
    use approx::assert_relative_eq;

    fn movement() -> CharacterMovement {
        CharacterMovement::new(650.0, 650.0, 0.2, 540.0)
    }

    #[test]
    fn test_input_is_clamped_and_consumed() {
        let mut movement = movement();
        movement.add_input_vector(Vec3::X, 1.0);
        movement.add_input_vector(Vec3::Y, 1.0);

        let input = movement.consume_input_vector();
        assert_relative_eq!(input.length(), 1.0, epsilon = 1e-6);
        assert_eq!(movement.pending_input(), Vec3::ZERO);
    }

    #[test]
    fn test_ground_velocity_is_input_times_speed() {
        let movement = movement();
        let v = movement.compute_velocity(Vec3::new(0.0, 0.0, -3.0), Vec3::X, true, 1.0 / 60.0);
        assert_relative_eq!(v.x, 650.0);
        assert_relative_eq!(v.z, -3.0);
    }

    #[test]
    fn test_ground_stops_without_input() {
        let movement = movement();
        let v = movement.compute_velocity(Vec3::new(300.0, 0.0, 0.0), Vec3::ZERO, true, 0.1);
        assert_eq!(v, Vec3::ZERO);
    }

    #[test]
    fn test_air_control_is_partial() {
        let movement = movement();
        let v = movement.compute_velocity(Vec3::ZERO, Vec3::X, false, 0.1);
        // 0.2 * 10 * 0.1 = 20% of the way
        assert_relative_eq!(v.x, 130.0, epsilon = 1e-3);
    }

    #[test]
    fn test_air_keeps_momentum_without_input() {
        let movement = movement();
        let v = movement.compute_velocity(Vec3::new(400.0, 0.0, 50.0), Vec3::ZERO, false, 0.1);
        assert_eq!(v, Vec3::new(400.0, 0.0, 50.0));
    }

    #[test]
    fn test_orient_to_movement_is_rate_limited() {
        let mut movement = movement();
        movement.orient_to_movement(Vec3::Y, 0.1);
        // 540 deg/s * 0.1 s = 54 degrees toward 90
        assert_relative_eq!(movement.facing_yaw(), 54.0, epsilon = 1e-3);

        movement.orient_to_movement(Vec3::Y, 1.0);
        assert_relative_eq!(movement.facing_yaw(), 90.0, epsilon = 1e-3);
    }

    #[test]
    fn test_jump_only_from_ground() {
        let mut physics = PhysicsWorld::new();
        let ground = physics.add_rigid_body(presets::static_body(Vec3::ZERO));
        physics.add_collider(
            presets::static_box_collider(Vec3::new(1000.0, 1000.0, 10.0)),
            ground,
        );
        // Capsule bottom rests on the ground top (z = 10)
        let body = physics.add_rigid_body(presets::character_body(Vec3::new(0.0, 0.0, 115.0)));
        physics.add_collider(presets::character_collider(48.0, 105.0), body);
        physics.step();

        let mut movement = movement();
        movement.jump();
        movement.step(&mut physics, body, 105.0, 1.0 / 60.0);

        let vz = physics.linvel(body).map(|v| v.z).unwrap_or_default();
        assert_relative_eq!(vz, 650.0);
        assert!(movement.is_falling());

        // Airborne: a second jump request is held until landing
        for _ in 0..5 {
            physics.step();
        }
        movement.jump();
        movement.step(&mut physics, body, 105.0, 1.0 / 60.0);
        let vz = physics.linvel(body).map(|v| v.z).unwrap_or_default();
        assert!(vz < 650.0);
    }
}
