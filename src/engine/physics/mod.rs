// Physics system using rapier3d
//
// World space is Z-up and measured in centimetres, matching the scale the
// gameplay constants (speeds, capsule sizes, jump velocity) are tuned for.

pub mod body;
mod collision;
mod world;

use glam::Vec3;

pub use body::{ColliderHandle, RigidBodyHandle};
pub use collision::{CollisionEvent, CollisionGroups};
pub use world::PhysicsWorld;

// Re-export commonly used rapier types for convenience
pub use rapier3d::prelude::{QueryFilter, Real, RigidBodyType, Vector};

/// Default gravity in cm/s²
pub const GRAVITY_Z: Real = -980.0;

/// World units per metre, for the solver's contact tolerances
pub const LENGTH_UNIT: Real = 100.0;

/// Convert a gameplay vector into a physics vector
pub fn to_physics(v: Vec3) -> Vector<Real> {
    Vector::new(v.x, v.y, v.z)
}

/// Convert a physics vector into a gameplay vector
pub fn from_physics(v: &Vector<Real>) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vector_conversion() {
        let v = Vec3::new(1.0, -2.0, 3.5);
        assert_eq!(from_physics(&to_physics(v)), v);
    }
}
