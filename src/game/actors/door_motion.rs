// Raise/lower animation for doors and switch plates

/// Moves a vertical offset toward a target at a fixed speed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DoorMotion {
    offset: f32,
    target: f32,
    /// cm per second
    speed: f32,
}

impl DoorMotion {
    pub fn new(speed: f32) -> Self {
        Self {
            offset: 0.0,
            target: 0.0,
            speed,
        }
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    pub fn is_settled(&self) -> bool {
        self.offset == self.target
    }

    /// Advance toward the target. Returns the new offset if it moved.
    pub fn step(&mut self, dt: f32) -> Option<f32> {
        if self.is_settled() {
            return None;
        }
        let remaining = self.target - self.offset;
        let max_step = self.speed * dt;
        self.offset = if remaining.abs() <= max_step {
            self.target
        } else {
            self.offset + max_step * remaining.signum()
        };
        Some(self.offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_moves_at_speed_and_stops_on_target() {
        let mut motion = DoorMotion::new(100.0);
        motion.set_target(150.0);

        assert_eq!(motion.step(1.0), Some(100.0));
        assert_eq!(motion.step(1.0), Some(150.0));
        assert!(motion.is_settled());
        assert_eq!(motion.step(1.0), None);
    }

    #[test]
    fn test_reverses_mid_way() {
        let mut motion = DoorMotion::new(100.0);
        motion.set_target(-20.0);
        motion.step(0.1);
        assert_relative_eq!(motion.offset(), -10.0);

        motion.set_target(0.0);
        motion.step(1.0);
        assert_eq!(motion.offset(), 0.0);
    }
}
