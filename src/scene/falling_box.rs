// Cubefall
// copyright zipxing@hotmail.com 2022～2025

use crate::math::{Aabb, AabbSeed};
use nalgebra_glm as glm;
use nalgebra_glm::{Mat4, Vec3};

#[derive(Debug, Clone, PartialEq)]
pub struct FallingBox {
    pub position: Vec3,
    pub scale: f32,
    /// World transform, rebuilt whenever the box moves
    pub model: Mat4,
    /// World bounds of the last update
    pub aabb: Aabb,
    pub collided: bool,
    pub marked_for_deletion: bool,
}

impl FallingBox {
    pub fn new(position: Vec3, scale: f32) -> Self {
        let mut b = Self {
            position,
            scale,
            model: Mat4::identity(),
            aabb: Aabb::empty(),
            collided: false,
            marked_for_deletion: false,
        };
        b.rebuild_model();
        b
    }

    /// Name of the deletion timer of box `idx`
    pub fn timer_name(idx: usize) -> String {
        format!("glass.delete.{}", idx)
    }

    pub fn advance(&mut self, z_step: f32) {
        self.position.z += z_step;
        self.rebuild_model();
    }

    pub fn refresh_aabb(&mut self, local_vertices: &[Vec3], seed: AabbSeed) {
        self.aabb = Aabb::transformed(&self.model, local_vertices, seed);
    }

    pub fn is_visible(&self) -> bool {
        !self.marked_for_deletion
    }

    fn rebuild_model(&mut self) {
        self.model = glm::scale(
            &glm::translation(&self.position),
            &Vec3::repeat(self.scale),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::mesh::ModelData;
    use approx::assert_relative_eq;

    #[test]
    fn advance_moves_transform_along_z() {
        let mut b = FallingBox::new(glm::vec3(1.0, 2.0, -10.0), 0.5);
        b.advance(0.05);
        b.advance(0.05);
        assert_relative_eq!(b.position.z, -9.9, epsilon = 1e-5);
        assert_relative_eq!(b.model[(2, 3)], -9.9, epsilon = 1e-5);
        assert_relative_eq!(b.model[(0, 0)], 0.5);
    }

    #[test]
    fn aabb_follows_model() {
        let cube = ModelData::cube().positions();
        let mut b = FallingBox::new(glm::vec3(0.0, 0.0, -4.0), 0.5);
        b.refresh_aabb(&cube, AabbSeed::Infinity);
        assert_relative_eq!(*b.aabb.min(), glm::vec3(-0.5, -0.5, -4.5));
        assert_relative_eq!(*b.aabb.max(), glm::vec3(0.5, 0.5, -3.5));
    }

    #[test]
    fn timer_names_are_per_box() {
        assert_ne!(FallingBox::timer_name(1), FallingBox::timer_name(11));
    }
}
