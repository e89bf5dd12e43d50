// Cubefall
// copyright zipxing@hotmail.com 2022～2025

use crate::error::Result;
use crate::render::adapter::gl::{
    mesh::GlMesh,
    shader::GlShader,
    shader_source::{GENERAL2D_FRAGMENT_SRC, GENERAL2D_VERTEX_SRC},
    GlRender, GlRenderBase,
};
use crate::render::mesh::ModelData;
use glow::HasContext;
use nalgebra_glm::Mat4;

/// Copies a texture onto the current framebuffer through `ModelData::quad`
pub struct GlRenderGeneral2d {
    pub base: GlRenderBase,
    pub area: [f32; 4],
    pub transform: Mat4,
    pub color: [f32; 4],
}

impl GlRender for GlRenderGeneral2d {
    fn new(canvas_width: u32, canvas_height: u32) -> Self {
        Self {
            base: GlRenderBase::new(2, canvas_width, canvas_height),
            area: [0.0, 0.0, 1.0, 1.0],
            transform: Mat4::identity(),
            color: [1.0, 1.0, 1.0, 1.0],
        }
    }

    fn get_base(&mut self) -> &mut GlRenderBase {
        &mut self.base
    }

    fn create_shader(&mut self, gl: &glow::Context, ver: &str) -> Result<()> {
        let rbs = self.get_base();
        rbs.shader.clear();
        rbs.shader.push(GlShader::new(
            gl,
            ver,
            GENERAL2D_VERTEX_SRC,
            GENERAL2D_FRAGMENT_SRC,
        )?);
        Ok(())
    }

    fn create_buffer(&mut self, gl: &glow::Context) -> Result<()> {
        self.base.meshes.clear();
        self.base.meshes.push(GlMesh::upload(gl, &ModelData::quad())?);
        Ok(())
    }

    fn prepare_draw(&mut self, gl: &glow::Context) {
        let shader = &self.base.shader[0];
        shader.bind(gl);
        unsafe {
            gl.active_texture(glow::TEXTURE0);
            gl.bind_texture(glow::TEXTURE_2D, self.base.textures.first().copied());
        }
        shader.set_i32(gl, "texture1", 0);
        shader.set_mat4(gl, "transform", &self.transform);
        shader.set_vec4(gl, "area", &self.area);
        shader.set_vec4(gl, "color", &self.color);
    }

    fn draw(&mut self, gl: &glow::Context) {
        self.base.meshes[0].draw(gl);
    }
}

impl GlRenderGeneral2d {
    /// The texture stays owned by the caller
    pub fn set_texture(&mut self, tex1: glow::Texture) -> &mut Self {
        self.base.textures.clear();
        self.base.textures.push(tex1);
        self
    }

    pub fn set_area(&mut self, area: &[f32; 4]) -> &mut Self {
        self.area = *area;
        self
    }

    pub fn set_transform(&mut self, transform: &Mat4) -> &mut Self {
        self.transform = *transform;
        self
    }

    pub fn set_color(&mut self, color: &[f32; 4]) -> &mut Self {
        self.color = *color;
        self
    }
}
