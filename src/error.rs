// Cubefall
// copyright zipxing@hotmail.com 2022～2025

//! Error type shared by every fallible step of a scene: window and context
//! creation, asset loading, shader building and GL object allocation.
//! Nothing is retried; errors travel up to `main` which reports and exits.

use std::{fmt, io, path::PathBuf};

#[derive(Debug)]
pub enum CubefallError {
    /// Window, event loop or GL context could not be created
    Window(String),
    /// A GL object (shader, buffer, texture, framebuffer) could not be created
    Gl(String),
    ShaderCompile { stage: &'static str, log: String },
    ShaderLink(String),
    FramebufferIncomplete(u32),
    Io { path: PathBuf, source: io::Error },
    Image { path: PathBuf, source: image::ImageError },
    Gltf { path: PathBuf, source: gltf::Error },
    /// The model file parsed but contained no usable vertices
    EmptyModel(PathBuf),
    Config { path: PathBuf, source: toml::de::Error },
    /// The config parsed but a value is out of range
    InvalidConfig { path: PathBuf, reason: String },
}

pub type Result<T> = std::result::Result<T, CubefallError>;

impl fmt::Display for CubefallError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CubefallError::Window(msg) => write!(f, "window creation failed: {}", msg),
            CubefallError::Gl(msg) => write!(f, "OpenGL error: {}", msg),
            CubefallError::ShaderCompile { stage, log } => {
                write!(f, "{} shader compilation error: {}", stage, log)
            }
            CubefallError::ShaderLink(log) => write!(f, "program linking error: {}", log),
            CubefallError::FramebufferIncomplete(status) => {
                write!(f, "framebuffer is not complete (status 0x{:x})", status)
            }
            CubefallError::Io { path, source } => {
                write!(f, "cannot read {}: {}", path.display(), source)
            }
            CubefallError::Image { path, source } => {
                write!(f, "cannot load texture {}: {}", path.display(), source)
            }
            CubefallError::Gltf { path, source } => {
                write!(f, "cannot import model {}: {}", path.display(), source)
            }
            CubefallError::EmptyModel(path) => {
                write!(f, "model {} contains no meshes", path.display())
            }
            CubefallError::Config { path, source } => {
                write!(f, "bad config {}: {}", path.display(), source)
            }
            CubefallError::InvalidConfig { path, reason } => {
                write!(f, "bad config {}: {}", path.display(), reason)
            }
        }
    }
}

impl std::error::Error for CubefallError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CubefallError::Io { source, .. } => Some(source),
            CubefallError::Image { source, .. } => Some(source),
            CubefallError::Gltf { source, .. } => Some(source),
            CubefallError::Config { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// glow reports object creation failures as plain strings
impl From<String> for CubefallError {
    fn from(msg: String) -> Self {
        CubefallError::Gl(msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_failing_file() {
        let e = CubefallError::EmptyModel(PathBuf::from("assets/models/none.gltf"));
        assert_eq!(e.to_string(), "model assets/models/none.gltf contains no meshes");

        let e = CubefallError::ShaderCompile {
            stage: "vertex",
            log: "0:1: syntax error".to_string(),
        };
        assert!(e.to_string().starts_with("vertex shader compilation error"));
    }

    #[test]
    fn io_error_is_exposed_as_source() {
        use std::error::Error;
        let e = CubefallError::Io {
            path: PathBuf::from("missing.glsl"),
            source: io::Error::new(io::ErrorKind::NotFound, "gone"),
        };
        assert!(e.source().is_some());
        assert!(CubefallError::Gl("x".into()).source().is_none());
    }
}
