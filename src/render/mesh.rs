// Cubefall
// copyright zipxing@hotmail.com 2022～2025

//! CPU side geometry: the interleaved vertex layout and the built-in meshes.

use nalgebra_glm as glm;
use nalgebra_glm::Vec3;
use std::path::PathBuf;

/// Interleaved vertex, 8 floats: position, normal, uv.
/// Attribute locations 0, 1 and 2 follow the field order.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl Vertex {
    pub const fn new(position: [f32; 3], normal: [f32; 3], uv: [f32; 2]) -> Self {
        Self {
            position,
            normal,
            uv,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    /// Diffuse texture of the first material, if any
    pub texture_path: Option<PathBuf>,
}

/// Unit cube with extent ±1, 12 triangles
#[rustfmt::skip]
pub const CUBE_POSITIONS: [[f32; 3]; 36] = [
    [-1.0, -1.0, -1.0], [-1.0, -1.0,  1.0], [-1.0,  1.0,  1.0],
    [ 1.0,  1.0, -1.0], [-1.0, -1.0, -1.0], [-1.0,  1.0, -1.0],
    [ 1.0, -1.0,  1.0], [-1.0, -1.0, -1.0], [ 1.0, -1.0, -1.0],
    [ 1.0,  1.0, -1.0], [ 1.0, -1.0, -1.0], [-1.0, -1.0, -1.0],
    [-1.0, -1.0, -1.0], [-1.0,  1.0,  1.0], [-1.0,  1.0, -1.0],
    [ 1.0, -1.0,  1.0], [-1.0, -1.0,  1.0], [-1.0, -1.0, -1.0],
    [-1.0,  1.0,  1.0], [-1.0, -1.0,  1.0], [ 1.0, -1.0,  1.0],
    [ 1.0,  1.0,  1.0], [ 1.0, -1.0, -1.0], [ 1.0,  1.0, -1.0],
    [ 1.0, -1.0, -1.0], [ 1.0,  1.0,  1.0], [ 1.0, -1.0,  1.0],
    [ 1.0,  1.0,  1.0], [ 1.0,  1.0, -1.0], [-1.0,  1.0, -1.0],
    [ 1.0,  1.0,  1.0], [-1.0,  1.0, -1.0], [-1.0,  1.0,  1.0],
    [ 1.0,  1.0,  1.0], [-1.0,  1.0,  1.0], [ 1.0, -1.0,  1.0],
];

impl ModelData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one mesh; its indices are local and get offset by the
    /// number of vertices already present.
    pub fn append_mesh<I>(&mut self, vertices: &[Vertex], indices: I)
    where
        I: IntoIterator<Item = u32>,
    {
        let offset = self.vertices.len() as u32;
        self.vertices.extend_from_slice(vertices);
        self.indices.extend(indices.into_iter().map(|i| i + offset));
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn positions(&self) -> Vec<Vec3> {
        self.vertices
            .iter()
            .map(|v| glm::vec3(v.position[0], v.position[1], v.position[2]))
            .collect()
    }

    /// The ±1 cube. Each triangle lies on one face; the normal points along
    /// the axis all three corners share, uvs are planar on the other two.
    pub fn cube() -> Self {
        let mut vertices = Vec::with_capacity(CUBE_POSITIONS.len());
        for tri in CUBE_POSITIONS.chunks(3) {
            let axis = (0..3)
                .find(|&k| tri[0][k] == tri[1][k] && tri[1][k] == tri[2][k])
                .unwrap_or(2);
            let mut normal = [0.0; 3];
            normal[axis] = tri[0][axis].signum();
            let (u, v) = ((axis + 1) % 3, (axis + 2) % 3);
            for p in tri {
                vertices.push(Vertex::new(
                    *p,
                    normal,
                    [(p[u] + 1.0) * 0.5, (p[v] + 1.0) * 0.5],
                ));
            }
        }
        let mut m = Self::new();
        let n = vertices.len() as u32;
        m.append_mesh(&vertices, 0..n);
        m
    }

    /// Textured quad in the xy plane facing +z, extent ±1.
    /// Drawn untransformed it covers clip space, the 2D composite relies on that.
    pub fn quad() -> Self {
        let n = [0.0, 0.0, 1.0];
        let vertices = [
            Vertex::new([-1.0, -1.0, 0.0], n, [0.0, 0.0]),
            Vertex::new([1.0, -1.0, 0.0], n, [1.0, 0.0]),
            Vertex::new([1.0, 1.0, 0.0], n, [1.0, 1.0]),
            Vertex::new([-1.0, 1.0, 0.0], n, [0.0, 1.0]),
        ];
        let mut m = Self::new();
        m.append_mesh(&vertices, [0, 1, 2, 2, 3, 0]);
        m
    }

    /// The worksheet triangle in normalized device coordinates
    pub fn triangle() -> Self {
        let n = [0.0, 0.0, 1.0];
        let vertices = [
            Vertex::new([-0.5, -0.5, 0.0], n, [0.0, 0.0]),
            Vertex::new([0.5, -0.5, 0.0], n, [1.0, 0.0]),
            Vertex::new([0.0, 0.5, 0.0], n, [0.5, 1.0]),
        ];
        let mut m = Self::new();
        m.append_mesh(&vertices, 0..3);
        m
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Aabb;

    #[test]
    fn vertex_is_eight_floats() {
        assert_eq!(std::mem::size_of::<Vertex>(), 8 * std::mem::size_of::<f32>());
    }

    #[test]
    fn append_offsets_indices() {
        let mut m = ModelData::new();
        let tri = ModelData::triangle();
        m.append_mesh(&tri.vertices, tri.indices.iter().copied());
        m.append_mesh(&tri.vertices, tri.indices.iter().copied());
        assert_eq!(m.vertices.len(), 6);
        assert_eq!(m.indices, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn cube_normals_point_outwards() {
        let cube = ModelData::cube();
        assert_eq!(cube.vertices.len(), 36);
        assert_eq!(cube.indices.len(), 36);
        for v in &cube.vertices {
            let n = glm::vec3(v.normal[0], v.normal[1], v.normal[2]);
            let p = glm::vec3(v.position[0], v.position[1], v.position[2]);
            assert_eq!(glm::length(&n), 1.0);
            // the face normal and the corner agree on that axis
            assert_eq!(n.dot(&p), 1.0);
            assert!(v.uv.iter().all(|c| (0.0..=1.0).contains(c)));
        }
    }

    #[test]
    fn cube_bounds_are_unit() {
        let b = Aabb::from_points(&ModelData::cube().positions());
        assert_eq!(*b.min(), glm::vec3(-1.0, -1.0, -1.0));
        assert_eq!(*b.max(), glm::vec3(1.0, 1.0, 1.0));
    }

    #[test]
    fn quad_is_two_triangles() {
        let q = ModelData::quad();
        assert_eq!(q.vertices.len(), 4);
        assert_eq!(q.indices.len(), 6);
        assert!(q.texture_path.is_none());
    }

    #[test]
    fn quad_uvs_follow_clip_space_corners() {
        let q = ModelData::quad();
        for v in &q.vertices {
            assert_eq!(v.position[2], 0.0);
            assert_eq!(v.uv[0], (v.position[0] + 1.0) * 0.5);
            assert_eq!(v.uv[1], (v.position[1] + 1.0) * 0.5);
        }
        let corners: Vec<[f32; 2]> = q
            .vertices
            .iter()
            .map(|v| [v.position[0], v.position[1]])
            .collect();
        for c in [[-1.0, -1.0], [1.0, -1.0], [1.0, 1.0], [-1.0, 1.0]] {
            assert!(corners.contains(&c));
        }
    }
}
