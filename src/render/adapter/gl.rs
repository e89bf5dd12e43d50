// Cubefall
// copyright zipxing@hotmail.com 2022～2025

//! # OpenGL Rendering Module
//!
//! glow based renderers for the scenes. Each renderer owns its shader
//! program and GPU buffers and follows the same lifecycle:
//!
//! ```text
//!  new() ──► init() ──► { prepare_draw() ──► draw() }* ──► cleanup()
//!            │
//!            ├─ create_shader()  compile + link
//!            └─ create_buffer()  VAO / VBO / EBO, textures
//! ```
//!
//! - **`GlRenderBasic`**: flat color, position only
//! - **`GlRenderPhong`**: textured Phong with several point lights
//! - **`GlRenderGeneral2d`**: full screen textured quad, composites an
//!   off-screen `GlRenderTexture` onto the window
//!
//! Errors while building GL objects are returned, never panicked on.

#![allow(unused_variables)]

/// Sampled textures and off-screen render targets
pub mod texture;

/// Shader compilation, linking and uniform helpers
pub mod shader;

/// GLSL sources compiled into the binary
pub mod shader_source;

/// VAO/VBO/EBO upload of a `ModelData`
pub mod mesh;

/// Flat colored geometry
pub mod render_basic;

/// Textured Phong lighting
pub mod render_phong;

/// Final composition and screen mapping
pub mod render_general2d;

use crate::error::Result;
use mesh::GlMesh;
use shader::GlShader;

/// OpenGL Renderer Interface Definition
///
/// `init()` must run after the GL context is current. `prepare_draw()` sets
/// uniforms and binds state for one draw call, `draw()` issues it. GPU
/// objects are released by `cleanup()`, which must be called explicitly
/// while the context is still alive.
pub trait GlRender {
    /// No GL calls happen here
    fn new(canvas_width: u32, canvas_height: u32) -> Self
    where
        Self: Sized;

    fn get_base(&mut self) -> &mut GlRenderBase;

    /// `ver` is the GLSL version line, e.g. "#version 330 core"
    fn create_shader(&mut self, gl: &glow::Context, ver: &str) -> Result<()>;

    fn create_buffer(&mut self, gl: &glow::Context) -> Result<()>;

    fn init(&mut self, gl: &glow::Context, ver: &str) -> Result<()> {
        self.create_shader(gl, ver)?;
        self.create_buffer(gl)
    }

    fn prepare_draw(&mut self, gl: &glow::Context);

    fn draw(&mut self, gl: &glow::Context);

    /// Frees every GL object held in the base
    fn cleanup(&mut self, gl: &glow::Context) {
        self.get_base().free(gl);
    }
}

/// GL objects shared by all renderers
pub struct GlRenderBase {
    pub id: usize,
    pub shader: Vec<GlShader>,
    pub meshes: Vec<GlMesh>,
    pub textures: Vec<glow::Texture>,
    pub canvas_width: u32,
    pub canvas_height: u32,
}

impl GlRenderBase {
    pub fn new(id: usize, canvas_width: u32, canvas_height: u32) -> Self {
        Self {
            id,
            shader: Vec::new(),
            meshes: Vec::new(),
            textures: Vec::new(),
            canvas_width,
            canvas_height,
        }
    }

    pub fn resize(&mut self, canvas_width: u32, canvas_height: u32) {
        self.canvas_width = canvas_width;
        self.canvas_height = canvas_height;
    }

    /// Textures are not freed here, their owners free them
    pub fn free(&mut self, gl: &glow::Context) {
        for s in self.shader.drain(..) {
            s.free(gl);
        }
        for m in self.meshes.drain(..) {
            m.free(gl);
        }
        self.textures.clear();
    }
}
