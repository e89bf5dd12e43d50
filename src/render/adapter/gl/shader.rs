// Cubefall
// copyright zipxing@hotmail.com 2022～2025

use crate::error::{CubefallError, Result};
use glow::HasContext;
use log::info;
use nalgebra_glm::{Mat4, Vec3};
use std::{fs, path::Path};

#[derive(Clone)]
pub struct GlShader {
    pub program: glow::Program,
}

unsafe fn compile(
    gl: &glow::Context,
    kind: u32,
    stage: &'static str,
    ver: &str,
    source: &str,
) -> Result<glow::Shader> {
    let shader = gl.create_shader(kind)?;
    gl.shader_source(shader, &format!("{}\n{}", ver, source));
    gl.compile_shader(shader);
    if !gl.get_shader_compile_status(shader) {
        let log = gl.get_shader_info_log(shader);
        gl.delete_shader(shader);
        return Err(CubefallError::ShaderCompile { stage, log });
    }
    Ok(shader)
}

fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| CubefallError::Io {
        path: path.to_path_buf(),
        source,
    })
}

impl GlShader {
    /// `ver` is the full version line, prepended to both sources
    pub fn new(
        gl: &glow::Context,
        ver: &str,
        vertex_source: &str,
        fragment_source: &str,
    ) -> Result<Self> {
        unsafe {
            let vertex_shader = compile(gl, glow::VERTEX_SHADER, "vertex", ver, vertex_source)?;
            let fragment_shader =
                match compile(gl, glow::FRAGMENT_SHADER, "fragment", ver, fragment_source) {
                    Ok(s) => s,
                    Err(e) => {
                        gl.delete_shader(vertex_shader);
                        return Err(e);
                    }
                };

            let program = match gl.create_program() {
                Ok(p) => p,
                Err(e) => {
                    gl.delete_shader(vertex_shader);
                    gl.delete_shader(fragment_shader);
                    return Err(e.into());
                }
            };
            gl.attach_shader(program, vertex_shader);
            gl.attach_shader(program, fragment_shader);
            gl.link_program(program);
            gl.detach_shader(program, vertex_shader);
            gl.detach_shader(program, fragment_shader);
            gl.delete_shader(vertex_shader);
            gl.delete_shader(fragment_shader);
            if !gl.get_program_link_status(program) {
                let log = gl.get_program_info_log(program);
                gl.delete_program(program);
                return Err(CubefallError::ShaderLink(log));
            }

            Ok(Self { program })
        }
    }

    /// Sources without a `#version` line, read from disk
    pub fn from_files(
        gl: &glow::Context,
        ver: &str,
        vertex_path: &Path,
        fragment_path: &Path,
    ) -> Result<Self> {
        info!(
            "compile shader {} + {}",
            vertex_path.display(),
            fragment_path.display()
        );
        let vs = read_source(vertex_path)?;
        let fs = read_source(fragment_path)?;
        Self::new(gl, ver, &vs, &fs)
    }

    pub fn bind(&self, gl: &glow::Context) {
        unsafe {
            gl.use_program(Some(self.program));
        }
    }

    pub fn get_program(&self) -> glow::Program {
        self.program
    }

    pub fn set_mat4(&self, gl: &glow::Context, name: &str, m: &Mat4) {
        unsafe {
            let loc = gl.get_uniform_location(self.program, name);
            gl.uniform_matrix_4_f32_slice(loc.as_ref(), false, m.as_slice());
        }
    }

    pub fn set_vec3(&self, gl: &glow::Context, name: &str, v: &Vec3) {
        unsafe {
            let loc = gl.get_uniform_location(self.program, name);
            gl.uniform_3_f32(loc.as_ref(), v.x, v.y, v.z);
        }
    }

    pub fn set_vec4(&self, gl: &glow::Context, name: &str, v: &[f32; 4]) {
        unsafe {
            let loc = gl.get_uniform_location(self.program, name);
            gl.uniform_4_f32_slice(loc.as_ref(), v);
        }
    }

    pub fn set_f32(&self, gl: &glow::Context, name: &str, v: f32) {
        unsafe {
            let loc = gl.get_uniform_location(self.program, name);
            gl.uniform_1_f32(loc.as_ref(), v);
        }
    }

    pub fn set_i32(&self, gl: &glow::Context, name: &str, v: i32) {
        unsafe {
            let loc = gl.get_uniform_location(self.program, name);
            gl.uniform_1_i32(loc.as_ref(), v);
        }
    }

    pub fn free(&self, gl: &glow::Context) {
        unsafe {
            gl.delete_program(self.program);
        }
    }
}
