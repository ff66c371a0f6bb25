// Math utilities and helper functions

use glam::Vec3;

/// Evaluate `amplitude * sin(period * t + phase) + shift`
pub fn sine_wave(amplitude: f32, period: f32, phase: f32, shift: f32, t: f32) -> f32 {
    amplitude * (period * t + phase).sin() + shift
}

/// Drop the vertical (Z) component of a vector
pub fn lateral(v: Vec3) -> Vec3 {
    Vec3::new(v.x, v.y, 0.0)
}

/// Wrap an angle in degrees into (-180, 180]
pub fn normalize_degrees(angle: f32) -> f32 {
    let mut a = angle % 360.0;
    if a > 180.0 {
        a -= 360.0;
    } else if a <= -180.0 {
        a += 360.0;
    }
    a
}

/// Rotate `current` toward `target` (degrees) by at most `max_delta`,
/// taking the shortest way around the circle.
pub fn approach_degrees(current: f32, target: f32, max_delta: f32) -> f32 {
    let diff = normalize_degrees(target - current);
    if diff.abs() <= max_delta {
        normalize_degrees(target)
    } else {
        normalize_degrees(current + max_delta * diff.signum())
    }
}

/// Unit forward vector (X axis) of a yaw-only rotation, Z up
pub fn yaw_forward(yaw_degrees: f32) -> Vec3 {
    let yaw = yaw_degrees.to_radians();
    Vec3::new(yaw.cos(), yaw.sin(), 0.0)
}

/// Unit right vector (Y axis) of a yaw-only rotation, Z up
pub fn yaw_right(yaw_degrees: f32) -> Vec3 {
    let yaw = yaw_degrees.to_radians();
    Vec3::new(-yaw.sin(), yaw.cos(), 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sine_wave() {
        assert_relative_eq!(sine_wave(2.0, 1.0, 0.0, 3.0, 0.0), 3.0);
        let quarter = std::f32::consts::FRAC_PI_2;
        assert_relative_eq!(sine_wave(2.0, 1.0, 0.0, 3.0, quarter), 5.0);
        assert_relative_eq!(sine_wave(2.0, 2.0, quarter, 0.0, 0.0), 2.0);
    }

    #[test]
    fn test_lateral_drops_z() {
        assert_eq!(lateral(Vec3::new(3.0, 4.0, 9.0)), Vec3::new(3.0, 4.0, 0.0));
        assert_relative_eq!(lateral(Vec3::new(3.0, 4.0, 9.0)).length(), 5.0);
    }

    #[test]
    fn test_normalize_degrees() {
        assert_relative_eq!(normalize_degrees(190.0), -170.0);
        assert_relative_eq!(normalize_degrees(-190.0), 170.0);
        assert_relative_eq!(normalize_degrees(180.0), 180.0);
        assert_relative_eq!(normalize_degrees(720.0), 0.0);
    }

    #[test]
    fn test_approach_degrees_shortest_path() {
        // 170 -> -170 is 20 degrees across the seam
        assert_relative_eq!(approach_degrees(170.0, -170.0, 5.0), 175.0);
        assert_relative_eq!(approach_degrees(170.0, -170.0, 50.0), -170.0);
        assert_relative_eq!(approach_degrees(0.0, 90.0, 30.0), 30.0);
    }

    #[test]
    fn test_yaw_axes() {
        let f = yaw_forward(90.0);
        assert_relative_eq!(f.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(f.y, 1.0, epsilon = 1e-6);
        let r = yaw_right(0.0);
        assert_relative_eq!(r.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(r.y, 1.0, epsilon = 1e-6);
    }
}
