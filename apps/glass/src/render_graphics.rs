// Cubefall
// copyright zipxing@hotmail.com 2022～2025

use crate::model::GlassModel;
use cubefall::{
    context::Context,
    error::{CubefallError, Result},
    game::Render,
    render::{
        adapter::gl::{
            render_basic::GlRenderBasic, render_general2d::GlRenderGeneral2d,
            render_phong::{GlRenderPhong, PointLight},
            texture::GlRenderTexture,
            GlRender,
        },
        mesh::ModelData,
    },
    scene::FallingBox,
    util::get_asset_path,
};
use glow::HasContext;
use log::{error, info};
use nalgebra_glm as glm;

pub const BOX_TEXTURE: &str = "models/crate.png";
pub const GLASS_COLOR: [f32; 4] = [0.6, 0.8, 1.0, 0.35];
pub const CLEAR_COLOR: [f32; 4] = [0.1, 0.1, 0.12, 1.0];

/// The scene is drawn into `target`, then `composite` copies it to the window.
pub struct GlassRender {
    pub boxes: GlRenderPhong,
    pub glass: GlRenderBasic,
    pub composite: GlRenderGeneral2d,
    pub target: Option<GlRenderTexture>,
    pub lights: Vec<PointLight>,
}

impl GlassRender {
    pub fn new() -> Self {
        let mut boxes = GlRenderPhong::new(0, 0);
        let mut cube = ModelData::cube();
        cube.texture_path = Some(get_asset_path(BOX_TEXTURE));
        boxes.set_geometry(cube);

        let mut glass = GlRenderBasic::new(0, 0);
        glass.set_geometry(ModelData::cube()).set_color(&GLASS_COLOR);

        Self {
            boxes,
            glass,
            composite: GlRenderGeneral2d::new(0, 0),
            target: None,
            lights: vec![
                PointLight {
                    position: glm::vec3(0.0, 4.0, 4.0),
                    color: glm::vec3(1.0, 1.0, 1.0),
                },
                PointLight {
                    position: glm::vec3(-5.0, 1.0, -10.0),
                    color: glm::vec3(0.4, 0.4, 0.8),
                },
            ],
        }
    }

    /// Recreates the off-screen target when the window size changed
    fn ensure_target(&mut self, gl: &glow::Context, w: u32, h: u32) -> Result<()> {
        if let Some(t) = &self.target {
            if (t.width, t.height) == (w, h) {
                return Ok(());
            }
            t.free(gl);
            self.target = None;
        }
        let t = GlRenderTexture::new(gl, w, h)?;
        info!("render target {}x{}", w, h);
        self.composite.set_texture(t.get_texture());
        self.target = Some(t);
        Ok(())
    }
}

impl Render for GlassRender {
    type Model = GlassModel;

    fn init(&mut self, ctx: &mut Context, _model: &mut Self::Model) -> Result<()> {
        let base = ctx.adapter.get_base();
        let (ver, w, h) = (base.glsl_version.clone(), base.width, base.height);
        let gl = ctx
            .adapter
            .gl()
            .ok_or_else(|| CubefallError::Gl("no GL context".to_string()))?;
        self.boxes.init(gl, &ver)?;
        self.glass.init(gl, &ver)?;
        self.composite.init(gl, &ver)?;
        self.boxes.set_lights(&self.lights);
        for r in [self.boxes.get_base(), self.glass.get_base(), self.composite.get_base()] {
            r.resize(w, h);
        }
        self.ensure_target(gl, w.max(1), h.max(1))
    }

    fn handle_event(&mut self, _ctx: &mut Context, _model: &mut Self::Model, _dt: f32) {}

    fn handle_timer(&mut self, _ctx: &mut Context, _model: &mut Self::Model, _dt: f32) {}

    fn draw(&mut self, ctx: &mut Context, model: &mut Self::Model, _dt: f32) {
        let base = ctx.adapter.get_base();
        let (w, h, aspect) = (base.width, base.height, base.aspect());
        if w == 0 || h == 0 {
            return;
        }
        let Some(gl) = ctx.adapter.gl() else {
            return;
        };
        if let Err(e) = self.ensure_target(gl, w, h) {
            error!("{}", e);
            return;
        }
        let Some(target) = &self.target else {
            return;
        };

        let [r, g, b, a] = CLEAR_COLOR;
        target.bind(gl);
        unsafe {
            gl.enable(glow::DEPTH_TEST);
            gl.clear_color(r, g, b, a);
            gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
        }

        let cam = &model.camera;
        let (view, projection) = (cam.view(), cam.projection(aspect));
        self.boxes.set_camera(&view, &projection, &cam.position);
        for (idx, bx) in model.world.visible_boxes() {
            // collided boxes cool down to red while their timer runs
            let p = if bx.collided {
                ctx.timers.percent(&FallingBox::timer_name(idx))
            } else {
                1.0
            };
            self.boxes.set_model(&bx.model).set_tint(&[1.0, p, p, 1.0]);
            self.boxes.prepare_draw(gl);
            self.boxes.draw(gl);
        }

        // glass last, blended over the opaque boxes
        self.glass
            .set_mvp(&(projection * view * model.world.glass.model));
        unsafe {
            gl.enable(glow::BLEND);
            gl.blend_func(glow::SRC_ALPHA, glow::ONE_MINUS_SRC_ALPHA);
            gl.depth_mask(false);
        }
        self.glass.prepare_draw(gl);
        self.glass.draw(gl);
        unsafe {
            gl.depth_mask(true);
            gl.disable(glow::BLEND);
        }

        target.unbind(gl);
        unsafe {
            gl.viewport(0, 0, w as i32, h as i32);
            gl.disable(glow::DEPTH_TEST);
            gl.clear(glow::COLOR_BUFFER_BIT);
        }
        self.composite.prepare_draw(gl);
        self.composite.draw(gl);
    }

    fn cleanup(&mut self, ctx: &mut Context) {
        if let Some(gl) = ctx.adapter.gl() {
            if let Some(t) = self.target.take() {
                t.free(gl);
            }
            self.boxes.cleanup(gl);
            self.glass.cleanup(gl);
            self.composite.cleanup(gl);
        }
    }
}
