// Cubefall
// copyright zipxing@hotmail.com 2022～2025

use nalgebra_glm as glm;
use nalgebra_glm::{Mat4, Vec3};
use serde::Deserialize;

/// Starting value of the min/max fold when a box is rebuilt from vertices.
///
/// `StaleVertex` seeds both corners with the untransformed first vertex of
/// the mesh, so the result may include that point even if no transformed
/// vertex lies near it. It exists to reproduce that legacy behaviour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AabbSeed {
    #[default]
    Infinity,
    StaleVertex,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    min: Vec3,
    max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Box with inverted infinite corners, the start of a min/max fold
    pub fn empty() -> Self {
        Self {
            min: Vec3::repeat(f32::INFINITY),
            max: Vec3::repeat(f32::NEG_INFINITY),
        }
    }

    pub fn from_points<'a, I>(points: I) -> Self
    where
        I: IntoIterator<Item = &'a Vec3>,
    {
        Self::empty().extend(points)
    }

    /// Fold starting from a single point instead of infinity
    pub fn from_points_seeded<'a, I>(seed: &Vec3, points: I) -> Self
    where
        I: IntoIterator<Item = &'a Vec3>,
    {
        Self::new(*seed, *seed).extend(points)
    }

    /// World box of a mesh: every local vertex goes through `model`.
    pub fn transformed(model: &Mat4, local_vertices: &[Vec3], seed: AabbSeed) -> Self {
        let start = match (seed, local_vertices.first()) {
            (AabbSeed::StaleVertex, Some(first)) => Self::new(*first, *first),
            _ => Self::empty(),
        };
        local_vertices.iter().fold(start, |acc, v| {
            let p = model * glm::vec4(v.x, v.y, v.z, 1.0);
            acc.include(&glm::vec3(p.x, p.y, p.z))
        })
    }

    pub fn min(&self) -> &Vec3 {
        &self.min
    }

    pub fn max(&self) -> &Vec3 {
        &self.max
    }

    pub fn is_empty(&self) -> bool {
        (0..3).any(|i| self.min[i] > self.max[i])
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn translate(&self, translation: &Vec3) -> Self {
        Self {
            min: self.min + translation,
            max: self.max + translation,
        }
    }

    pub fn include(&self, p: &Vec3) -> Self {
        Self {
            min: self.min.inf(p),
            max: self.max.sup(p),
        }
    }

    /// Separating axis test on x, y and z. Boxes sharing a face overlap.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        (0..3).all(|i| self.min[i] <= other.max[i] && self.max[i] >= other.min[i])
    }

    fn extend<'a, I>(self, points: I) -> Self
    where
        I: IntoIterator<Item = &'a Vec3>,
    {
        points.into_iter().fold(self, |acc, p| acc.include(p))
    }
}
