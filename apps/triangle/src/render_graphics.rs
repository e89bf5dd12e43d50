// Cubefall
// copyright zipxing@hotmail.com 2022～2025

use crate::model::TriangleModel;
use cubefall::{
    context::Context,
    error::{CubefallError, Result},
    game::Render,
    render::adapter::gl::{render_basic::GlRenderBasic, GlRender},
};
use glow::HasContext;
use log::info;

pub struct TriangleRender {
    pub basic: GlRenderBasic,
}

impl TriangleRender {
    pub fn new() -> Self {
        Self {
            basic: GlRenderBasic::new(0, 0),
        }
    }
}

impl Render for TriangleRender {
    type Model = TriangleModel;

    fn init(&mut self, ctx: &mut Context, _model: &mut Self::Model) -> Result<()> {
        let base = ctx.adapter.get_base();
        let (ver, w, h) = (base.glsl_version.clone(), base.width, base.height);
        self.basic.get_base().resize(w, h);
        let gl = ctx
            .adapter
            .gl()
            .ok_or_else(|| CubefallError::Gl("no GL context".to_string()))?;
        self.basic.init(gl, &ver)?;
        info!("triangle ready, {}", ver);
        Ok(())
    }

    fn handle_event(&mut self, _ctx: &mut Context, _model: &mut Self::Model, _dt: f32) {}

    fn handle_timer(&mut self, _ctx: &mut Context, _model: &mut Self::Model, _dt: f32) {}

    fn draw(&mut self, ctx: &mut Context, model: &mut Self::Model, _dt: f32) {
        let base = ctx.adapter.get_base();
        let (w, h) = (base.width, base.height);
        let Some(gl) = ctx.adapter.gl() else {
            return;
        };
        let [r, g, b, a] = model.clear_color;
        unsafe {
            gl.viewport(0, 0, w as i32, h as i32);
            gl.clear_color(r, g, b, a);
            gl.clear(glow::COLOR_BUFFER_BIT);
        }
        self.basic.prepare_draw(gl);
        self.basic.draw(gl);
    }

    fn cleanup(&mut self, ctx: &mut Context) {
        if let Some(gl) = ctx.adapter.gl() {
            self.basic.cleanup(gl);
        }
    }
}
