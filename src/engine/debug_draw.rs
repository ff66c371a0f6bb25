// Timed debug shapes
//
// Gameplay code queues shapes here; whatever presents the world reads
// `spheres()` each frame.

use glam::{Vec3, Vec4};

pub const GREEN: Vec4 = Vec4::new(0.0, 1.0, 0.0, 1.0);

/// A wireframe sphere
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DebugSphere {
    pub center: Vec3,
    pub radius: f32,
    pub segments: u32,
    pub color: Vec4,
    pub thickness: f32,
}

#[derive(Debug, Clone, Copy)]
struct TimedSphere {
    sphere: DebugSphere,
    remaining: f32,
}

/// Queue of debug shapes with lifetimes
#[derive(Debug, Default)]
pub struct DebugDraw {
    spheres: Vec<TimedSphere>,
}

impl DebugDraw {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a sphere that stays visible for `duration` seconds
    pub fn draw_sphere(&mut self, sphere: DebugSphere, duration: f32) {
        self.spheres.push(TimedSphere {
            sphere,
            remaining: duration,
        });
    }

    /// Age every shape and drop the expired ones
    pub fn tick(&mut self, dt: f32) {
        for timed in &mut self.spheres {
            timed.remaining -= dt;
        }
        self.spheres.retain(|timed| timed.remaining > 0.0);
    }

    /// Shapes currently visible
    pub fn spheres(&self) -> impl Iterator<Item = &DebugSphere> {
        self.spheres.iter().map(|timed| &timed.sphere)
    }

    pub fn len(&self) -> usize {
        self.spheres.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spheres.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sphere_at(x: f32) -> DebugSphere {
        DebugSphere {
            center: Vec3::new(x, 0.0, 0.0),
            radius: 25.0,
            segments: 12,
            color: GREEN,
            thickness: 0.5,
        }
    }

    #[test]
    fn test_spheres_expire() {
        let mut draw = DebugDraw::new();
        draw.draw_sphere(sphere_at(0.0), 1.0);
        draw.draw_sphere(sphere_at(1.0), 3.0);
        assert_eq!(draw.len(), 2);

        draw.tick(1.5);
        assert_eq!(draw.len(), 1);
        assert_eq!(draw.spheres().next().map(|s| s.center.x), Some(1.0));

        draw.tick(2.0);
        assert!(draw.is_empty());
    }
}
