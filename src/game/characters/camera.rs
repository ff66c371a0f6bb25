// Control rotation and follow camera

use glam::Vec3;

use crate::core::math::{normalize_degrees, yaw_forward, yaw_right};

/// Pitch limits applied to the control rotation (degrees)
pub const MIN_PITCH: f32 = -89.9;
pub const MAX_PITCH: f32 = 89.9;

/// The rotation the player is aiming with. The camera boom follows it; the
/// character body only uses its yaw for movement directions.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ControlRotation {
    /// Degrees around Z, 0 = +X
    pub yaw: f32,
    /// Degrees above the horizon
    pub pitch: f32,
}

impl ControlRotation {
    pub fn add_yaw(&mut self, degrees: f32) {
        self.yaw = normalize_degrees(self.yaw + degrees);
    }

    pub fn add_pitch(&mut self, degrees: f32) {
        self.pitch = (self.pitch + degrees).clamp(MIN_PITCH, MAX_PITCH);
    }

    /// Forward on the ground plane (yaw only)
    pub fn ground_forward(&self) -> Vec3 {
        yaw_forward(self.yaw)
    }

    /// Right on the ground plane (yaw only)
    pub fn ground_right(&self) -> Vec3 {
        yaw_right(self.yaw)
    }

    /// Full aim direction including pitch
    pub fn aim_direction(&self) -> Vec3 {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        Vec3::new(pitch.cos() * yaw.cos(), pitch.cos() * yaw.sin(), pitch.sin())
    }
}

/// Spring-arm style boom holding the follow camera behind the character
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraBoom {
    pub arm_length: f32,
}

impl CameraBoom {
    pub fn new(arm_length: f32) -> Self {
        Self { arm_length }
    }

    /// Where the camera sits for a given pivot and control rotation
    pub fn camera_location(&self, pivot: Vec3, rotation: &ControlRotation) -> Vec3 {
        pivot - rotation.aim_direction() * self.arm_length
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_pitch_is_clamped() {
        let mut rotation = ControlRotation::default();
        rotation.add_pitch(200.0);
        assert_eq!(rotation.pitch, MAX_PITCH);
        rotation.add_pitch(-500.0);
        assert_eq!(rotation.pitch, MIN_PITCH);
    }

    #[test]
    fn test_yaw_wraps() {
        let mut rotation = ControlRotation::default();
        rotation.add_yaw(270.0);
        assert_relative_eq!(rotation.yaw, -90.0);
    }

    #[test]
    fn test_ground_axes_ignore_pitch() {
        let rotation = ControlRotation {
            yaw: 0.0,
            pitch: 45.0,
        };
        assert_relative_eq!(rotation.ground_forward().z, 0.0);
        assert_relative_eq!(rotation.ground_forward().x, 1.0);
    }

    #[test]
    fn test_camera_trails_behind() {
        let boom = CameraBoom::new(600.0);
        let rotation = ControlRotation::default();
        let camera = boom.camera_location(Vec3::new(0.0, 0.0, 100.0), &rotation);
        assert_relative_eq!(camera.x, -600.0);
        assert_relative_eq!(camera.z, 100.0);
    }

    #[test]
    fn test_camera_rises_when_looking_down() {
        let boom = CameraBoom::new(600.0);
        let rotation = ControlRotation {
            yaw: 0.0,
            pitch: -30.0,
        };
        let camera = boom.camera_location(Vec3::ZERO, &rotation);
        assert_relative_eq!(camera.z, 300.0, epsilon = 1e-3);
    }
}
