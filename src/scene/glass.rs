// Cubefall
// copyright zipxing@hotmail.com 2022～2025

use crate::math::{Aabb, AabbSeed};
use nalgebra_glm as glm;
use nalgebra_glm::{Mat4, Vec3};

/// The static plane boxes collide with. Its bounds are computed once.
#[derive(Debug, Clone, PartialEq)]
pub struct GlassPlane {
    pub model: Mat4,
    aabb: Aabb,
}

impl GlassPlane {
    pub fn new(position: &Vec3, scale: &Vec3, local_vertices: &[Vec3]) -> Self {
        let model = glm::scale(&glm::translation(position), scale);
        Self {
            model,
            aabb: Aabb::transformed(&model, local_vertices, AabbSeed::Infinity),
        }
    }

    pub fn aabb(&self) -> &Aabb {
        &self.aabb
    }
}
