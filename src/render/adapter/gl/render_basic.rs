// Cubefall
// copyright zipxing@hotmail.com 2022～2025

use crate::error::Result;
use crate::render::{
    adapter::gl::{
        mesh::GlMesh,
        shader::GlShader,
        shader_source::{BASIC_FRAGMENT_SRC, BASIC_VERTEX_SRC},
        GlRender, GlRenderBase,
    },
    mesh::ModelData,
};
use nalgebra_glm::Mat4;

/// Draws one mesh in a single color
pub struct GlRenderBasic {
    pub base: GlRenderBase,
    pub geometry: ModelData,
    pub mvp: Mat4,
    pub color: [f32; 4],
}

impl GlRender for GlRenderBasic {
    fn new(canvas_width: u32, canvas_height: u32) -> Self {
        Self {
            base: GlRenderBase::new(0, canvas_width, canvas_height),
            geometry: ModelData::triangle(),
            mvp: Mat4::identity(),
            color: [1.0, 0.5, 0.2, 1.0],
        }
    }

    fn get_base(&mut self) -> &mut GlRenderBase {
        &mut self.base
    }

    fn create_shader(&mut self, gl: &glow::Context, ver: &str) -> Result<()> {
        self.base.shader.clear();
        self.base
            .shader
            .push(GlShader::new(gl, ver, BASIC_VERTEX_SRC, BASIC_FRAGMENT_SRC)?);
        Ok(())
    }

    fn create_buffer(&mut self, gl: &glow::Context) -> Result<()> {
        self.base.meshes.clear();
        self.base.meshes.push(GlMesh::upload(gl, &self.geometry)?);
        Ok(())
    }

    fn prepare_draw(&mut self, gl: &glow::Context) {
        let shader = &self.base.shader[0];
        shader.bind(gl);
        shader.set_mat4(gl, "mvp", &self.mvp);
        shader.set_vec4(gl, "color", &self.color);
    }

    fn draw(&mut self, gl: &glow::Context) {
        self.base.meshes[0].draw(gl);
    }
}

impl GlRenderBasic {
    /// Replaces the default triangle, call before `init`
    pub fn set_geometry(&mut self, geometry: ModelData) -> &mut Self {
        self.geometry = geometry;
        self
    }

    pub fn set_mvp(&mut self, mvp: &Mat4) -> &mut Self {
        self.mvp = *mvp;
        self
    }

    pub fn set_color(&mut self, color: &[f32; 4]) -> &mut Self {
        self.color = *color;
        self
    }
}
