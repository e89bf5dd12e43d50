// Cubefall
// copyright zipxing@hotmail.com 2022～2025

use crate::error::{CubefallError, Result};
use glow::HasContext;
use log::info;
use std::path::Path;

/// Off-screen render target: color texture plus depth renderbuffer
pub struct GlRenderTexture {
    pub framebuffer: glow::Framebuffer,
    pub texture: glow::Texture,
    pub depth: glow::Renderbuffer,
    pub width: u32,
    pub height: u32,
}

impl GlRenderTexture {
    pub fn new(gl: &glow::Context, width: u32, height: u32) -> Result<Self> {
        unsafe {
            let framebuffer = gl.create_framebuffer()?;
            gl.bind_framebuffer(glow::FRAMEBUFFER, Some(framebuffer));

            let texture = gl.create_texture()?;
            gl.bind_texture(glow::TEXTURE_2D, Some(texture));
            gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                glow::RGBA as i32,
                width as i32,
                height as i32,
                0,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                None,
            );
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MIN_FILTER, glow::LINEAR as i32);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MAG_FILTER, glow::LINEAR as i32);
            gl.framebuffer_texture_2d(
                glow::FRAMEBUFFER,
                glow::COLOR_ATTACHMENT0,
                glow::TEXTURE_2D,
                Some(texture),
                0,
            );

            let depth = gl.create_renderbuffer()?;
            gl.bind_renderbuffer(glow::RENDERBUFFER, Some(depth));
            gl.renderbuffer_storage(
                glow::RENDERBUFFER,
                glow::DEPTH24_STENCIL8,
                width as i32,
                height as i32,
            );
            gl.framebuffer_renderbuffer(
                glow::FRAMEBUFFER,
                glow::DEPTH_STENCIL_ATTACHMENT,
                glow::RENDERBUFFER,
                Some(depth),
            );

            let status = gl.check_framebuffer_status(glow::FRAMEBUFFER);
            gl.bind_framebuffer(glow::FRAMEBUFFER, None);
            gl.bind_texture(glow::TEXTURE_2D, None);
            gl.bind_renderbuffer(glow::RENDERBUFFER, None);

            if status != glow::FRAMEBUFFER_COMPLETE {
                gl.delete_framebuffer(framebuffer);
                gl.delete_texture(texture);
                gl.delete_renderbuffer(depth);
                return Err(CubefallError::FramebufferIncomplete(status));
            }

            Ok(Self {
                framebuffer,
                texture,
                depth,
                width,
                height,
            })
        }
    }

    pub fn bind(&self, gl: &glow::Context) {
        unsafe {
            gl.bind_framebuffer(glow::FRAMEBUFFER, Some(self.framebuffer));
            gl.viewport(0, 0, self.width as i32, self.height as i32);
        }
    }

    pub fn unbind(&self, gl: &glow::Context) {
        unsafe {
            gl.bind_framebuffer(glow::FRAMEBUFFER, None);
        }
    }

    pub fn get_texture(&self) -> glow::Texture {
        self.texture
    }

    pub fn free(&self, gl: &glow::Context) {
        unsafe {
            gl.delete_framebuffer(self.framebuffer);
            gl.delete_texture(self.texture);
            gl.delete_renderbuffer(self.depth);
        }
    }
}

/// GL reads exactly `w * h * 4` bytes, a shorter slice would be read past its end
fn check_rgba_len(w: u32, h: u32, data: &[u8]) -> Result<()> {
    let expected = w as usize * h as usize * 4;
    if w == 0 || h == 0 || data.len() != expected {
        return Err(CubefallError::Gl(format!(
            "texture {}x{} needs {} RGBA bytes, got {}",
            w,
            h,
            expected,
            data.len()
        )));
    }
    Ok(())
}

/// Sampled 2D texture loaded from an image file
pub struct GlTexture {
    pub texture: glow::Texture,
    pub width: u32,
    pub height: u32,
}

impl GlTexture {
    /// RGBA8 upload with mipmaps and repeat wrapping
    pub fn new(gl: &glow::Context, w: u32, h: u32, data: &[u8]) -> Result<Self> {
        check_rgba_len(w, h, data)?;
        unsafe {
            let texture = gl.create_texture()?;
            gl.active_texture(glow::TEXTURE0);
            gl.bind_texture(glow::TEXTURE_2D, Some(texture));
            gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                glow::RGBA as i32,
                w as i32,
                h as i32,
                0,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                Some(data),
            );
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_S, glow::REPEAT as i32);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_T, glow::REPEAT as i32);
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MIN_FILTER,
                glow::LINEAR_MIPMAP_LINEAR as i32,
            );
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MAG_FILTER, glow::LINEAR as i32);
            gl.generate_mipmap(glow::TEXTURE_2D);
            gl.bind_texture(glow::TEXTURE_2D, None);

            Ok(Self {
                texture,
                width: w,
                height: h,
            })
        }
    }

    pub fn from_file(gl: &glow::Context, path: &Path) -> Result<Self> {
        let img = image::open(path)
            .map_err(|source| CubefallError::Image {
                path: path.to_path_buf(),
                source,
            })?
            .to_rgba8();
        info!(
            "texture {} ({}x{})",
            path.display(),
            img.width(),
            img.height()
        );
        Self::new(gl, img.width(), img.height(), img.as_raw())
    }

    /// 1x1 texture of one color, stands in when a model has no texture
    pub fn solid(gl: &glow::Context, rgba: [u8; 4]) -> Result<Self> {
        Self::new(gl, 1, 1, &rgba)
    }

    pub fn bind(&self, gl: &glow::Context, unit: u32) {
        unsafe {
            gl.active_texture(glow::TEXTURE0 + unit);
            gl.bind_texture(glow::TEXTURE_2D, Some(self.texture));
        }
    }

    pub fn get_texture(&self) -> glow::Texture {
        self.texture
    }

    pub fn free(&self, gl: &glow::Context) {
        unsafe {
            gl.delete_texture(self.texture);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgba_upload_size_must_match() {
        assert!(check_rgba_len(1, 1, &[255, 255, 255, 255]).is_ok());
        assert!(check_rgba_len(2, 2, &[0; 16]).is_ok());
        assert!(matches!(
            check_rgba_len(2, 2, &[0; 12]),
            Err(CubefallError::Gl(_))
        ));
        assert!(check_rgba_len(0, 4, &[]).is_err());
    }
}
