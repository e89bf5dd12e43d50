// Cubefall
// copyright zipxing@hotmail.com 2022～2025

use nalgebra_glm as glm;
use nalgebra_glm::Vec2;

/// Point mass integrated with position Verlet
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub previous_position: Vec2,
    pub acceleration: Vec2,
}

impl Particle {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            position: glm::vec2(x, y),
            previous_position: glm::vec2(x, y),
            acceleration: Vec2::zeros(),
        }
    }

    /// Forces accumulate until the next update
    pub fn apply_force(&mut self, force: &Vec2) {
        self.acceleration += force;
    }

    pub fn velocity(&self) -> Vec2 {
        self.position - self.previous_position
    }

    pub fn update(&mut self, time_step: f32) {
        let velocity = self.velocity();
        self.previous_position = self.position;
        self.position += velocity + self.acceleration * time_step * time_step;
        self.acceleration = Vec2::zeros();
    }

    /// Clamps into `[0, width] x [0, height]`, velocity is not touched
    pub fn constrain_to_bounds(&mut self, width: f32, height: f32) {
        self.position.x = self.position.x.clamp(0.0, width);
        self.position.y = self.position.y.clamp(0.0, height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn force_is_consumed_by_update() {
        let mut p = Particle::new(0.0, 0.0);
        p.apply_force(&glm::vec2(0.0, 10.0));
        p.apply_force(&glm::vec2(0.0, 10.0));
        p.update(0.5);
        // 20 * 0.5^2
        assert_relative_eq!(p.position.y, 5.0);
        assert_eq!(p.acceleration, Vec2::zeros());
    }

    #[test]
    fn velocity_carries_over() {
        let mut p = Particle::new(1.0, 1.0);
        p.apply_force(&glm::vec2(4.0, 0.0));
        p.update(1.0);
        assert_relative_eq!(p.position.x, 5.0);
        p.update(1.0);
        assert_relative_eq!(p.position.x, 9.0);
        assert_relative_eq!(p.velocity().x, 4.0);
    }

    #[test]
    fn bounds_clamp_each_axis() {
        let mut p = Particle::new(-3.0, 12.0);
        p.constrain_to_bounds(10.0, 10.0);
        assert_eq!(p.position, glm::vec2(0.0, 10.0));

        let mut q = Particle::new(4.0, 5.0);
        q.constrain_to_bounds(10.0, 10.0);
        assert_eq!(q.position, glm::vec2(4.0, 5.0));
    }
}
