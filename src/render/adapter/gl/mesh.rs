// Cubefall
// copyright zipxing@hotmail.com 2022～2025

use crate::{
    error::Result,
    render::mesh::{ModelData, Vertex},
};
use glow::HasContext;
use std::mem::{offset_of, size_of};

/// GPU copy of a `ModelData`: one VAO with VBO + EBO.
///
/// Attribute 0 position (vec3), 1 normal (vec3), 2 uv (vec2), stride one `Vertex`.
pub struct GlMesh {
    pub vao: glow::VertexArray,
    pub vbo: glow::Buffer,
    pub ebo: glow::Buffer,
    pub index_count: i32,
}

impl GlMesh {
    pub fn upload(gl: &glow::Context, model: &ModelData) -> Result<Self> {
        let stride = size_of::<Vertex>() as i32;
        unsafe {
            let vao = gl.create_vertex_array()?;
            gl.bind_vertex_array(Some(vao));

            let vbo = match gl.create_buffer() {
                Ok(b) => b,
                Err(e) => {
                    gl.bind_vertex_array(None);
                    gl.delete_vertex_array(vao);
                    return Err(e.into());
                }
            };
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
            gl.buffer_data_u8_slice(
                glow::ARRAY_BUFFER,
                model.vertices.align_to::<u8>().1,
                glow::STATIC_DRAW,
            );

            let ebo = match gl.create_buffer() {
                Ok(b) => b,
                Err(e) => {
                    gl.bind_vertex_array(None);
                    gl.delete_vertex_array(vao);
                    gl.delete_buffer(vbo);
                    return Err(e.into());
                }
            };
            gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(ebo));
            gl.buffer_data_u8_slice(
                glow::ELEMENT_ARRAY_BUFFER,
                model.indices.align_to::<u8>().1,
                glow::STATIC_DRAW,
            );

            gl.enable_vertex_attrib_array(0);
            gl.vertex_attrib_pointer_f32(
                0,
                3,
                glow::FLOAT,
                false,
                stride,
                offset_of!(Vertex, position) as i32,
            );
            gl.enable_vertex_attrib_array(1);
            gl.vertex_attrib_pointer_f32(
                1,
                3,
                glow::FLOAT,
                false,
                stride,
                offset_of!(Vertex, normal) as i32,
            );
            gl.enable_vertex_attrib_array(2);
            gl.vertex_attrib_pointer_f32(
                2,
                2,
                glow::FLOAT,
                false,
                stride,
                offset_of!(Vertex, uv) as i32,
            );

            gl.bind_vertex_array(None);

            Ok(Self {
                vao,
                vbo,
                ebo,
                index_count: model.indices.len() as i32,
            })
        }
    }

    pub fn draw(&self, gl: &glow::Context) {
        unsafe {
            gl.bind_vertex_array(Some(self.vao));
            gl.draw_elements(glow::TRIANGLES, self.index_count, glow::UNSIGNED_INT, 0);
            gl.bind_vertex_array(None);
        }
    }

    pub fn free(&self, gl: &glow::Context) {
        unsafe {
            gl.delete_vertex_array(self.vao);
            gl.delete_buffer(self.vbo);
            gl.delete_buffer(self.ebo);
        }
    }
}
