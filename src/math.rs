// Cubefall
// copyright zipxing@hotmail.com 2022～2025

//! Vector math on top of nalgebra-glm: bounding boxes and the fly camera.

mod aabb;
pub use aabb::*;
mod camera;
pub use camera::*;
