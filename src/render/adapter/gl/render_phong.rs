// Cubefall
// copyright zipxing@hotmail.com 2022～2025

use crate::error::Result;
use crate::render::{
    adapter::gl::{mesh::GlMesh, shader::GlShader, texture::GlTexture, GlRender, GlRenderBase},
    mesh::ModelData,
};
use crate::util::get_asset_path;
use log::warn;
use nalgebra_glm::{Mat4, Vec3};
use std::path::PathBuf;

/// Must match `MAX_LIGHTS` in phong.frag
pub const MAX_LIGHTS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub color: Vec3,
}

/// Textured mesh lit by ambient + diffuse + specular terms of up to
/// `MAX_LIGHTS` point lights. Shader sources are read from
/// `assets/shaders/phong.{vert,frag}`.
pub struct GlRenderPhong {
    pub base: GlRenderBase,
    pub geometry: ModelData,
    pub texture: Option<GlTexture>,
    pub vert_path: PathBuf,
    pub frag_path: PathBuf,
    pub model: Mat4,
    pub view: Mat4,
    pub projection: Mat4,
    pub view_pos: Vec3,
    pub lights: Vec<PointLight>,
    /// Multiplies the texture color, alpha included
    pub tint: [f32; 4],
    pub ambient: f32,
    pub specular: f32,
    pub shininess: f32,
}

impl GlRender for GlRenderPhong {
    fn new(canvas_width: u32, canvas_height: u32) -> Self {
        Self {
            base: GlRenderBase::new(1, canvas_width, canvas_height),
            geometry: ModelData::cube(),
            texture: None,
            vert_path: get_asset_path("shaders/phong.vert"),
            frag_path: get_asset_path("shaders/phong.frag"),
            model: Mat4::identity(),
            view: Mat4::identity(),
            projection: Mat4::identity(),
            view_pos: Vec3::zeros(),
            lights: vec![],
            tint: [1.0, 1.0, 1.0, 1.0],
            ambient: 0.1,
            specular: 0.5,
            shininess: 32.0,
        }
    }

    fn get_base(&mut self) -> &mut GlRenderBase {
        &mut self.base
    }

    fn create_shader(&mut self, gl: &glow::Context, ver: &str) -> Result<()> {
        self.base.shader.clear();
        self.base.shader.push(GlShader::from_files(
            gl,
            ver,
            &self.vert_path,
            &self.frag_path,
        )?);
        Ok(())
    }

    /// Uploads the mesh and its diffuse texture; a mesh without texture is
    /// drawn with a 1x1 white one.
    fn create_buffer(&mut self, gl: &glow::Context) -> Result<()> {
        self.base.meshes.clear();
        self.base.meshes.push(GlMesh::upload(gl, &self.geometry)?);
        let texture = match &self.geometry.texture_path {
            Some(path) => GlTexture::from_file(gl, path)?,
            None => GlTexture::solid(gl, [255, 255, 255, 255])?,
        };
        self.base.textures.clear();
        self.base.textures.push(texture.get_texture());
        self.texture = Some(texture);
        Ok(())
    }

    fn prepare_draw(&mut self, gl: &glow::Context) {
        let shader = &self.base.shader[0];
        shader.bind(gl);
        shader.set_mat4(gl, "model", &self.model);
        shader.set_mat4(gl, "view", &self.view);
        shader.set_mat4(gl, "projection", &self.projection);
        shader.set_vec3(gl, "viewPos", &self.view_pos);
        shader.set_vec4(gl, "tint", &self.tint);
        shader.set_f32(gl, "ambientStrength", self.ambient);
        shader.set_f32(gl, "specularStrength", self.specular);
        shader.set_f32(gl, "shininess", self.shininess);
        shader.set_i32(gl, "numLights", self.lights.len() as i32);
        for (i, l) in self.lights.iter().enumerate() {
            shader.set_vec3(gl, &format!("lights[{}].position", i), &l.position);
            shader.set_vec3(gl, &format!("lights[{}].color", i), &l.color);
        }
        if let Some(t) = &self.texture {
            t.bind(gl, 0);
        }
        shader.set_i32(gl, "diffuseTexture", 0);
    }

    fn draw(&mut self, gl: &glow::Context) {
        self.base.meshes[0].draw(gl);
    }

    fn cleanup(&mut self, gl: &glow::Context) {
        if let Some(t) = self.texture.take() {
            t.free(gl);
        }
        self.base.free(gl);
    }
}

impl GlRenderPhong {
    /// Call before `init`
    pub fn set_geometry(&mut self, geometry: ModelData) -> &mut Self {
        self.geometry = geometry;
        self
    }

    pub fn set_model(&mut self, model: &Mat4) -> &mut Self {
        self.model = *model;
        self
    }

    pub fn set_camera(&mut self, view: &Mat4, projection: &Mat4, view_pos: &Vec3) -> &mut Self {
        self.view = *view;
        self.projection = *projection;
        self.view_pos = *view_pos;
        self
    }

    pub fn set_lights(&mut self, lights: &[PointLight]) -> &mut Self {
        if lights.len() > MAX_LIGHTS {
            warn!("{} lights given, only {} used", lights.len(), MAX_LIGHTS);
        }
        self.lights = lights.iter().take(MAX_LIGHTS).copied().collect();
        self
    }

    pub fn set_tint(&mut self, tint: &[f32; 4]) -> &mut Self {
        self.tint = *tint;
        self
    }
}
