// Cubefall
// copyright zipxing@hotmail.com 2022～2025

use crate::model::LitCubeModel;
use cubefall::{
    context::Context,
    error::{CubefallError, Result},
    game::Render,
    render::{
        adapter::gl::{render_phong::GlRenderPhong, GlRender},
        load_model,
    },
    util::get_asset_path,
};
use glow::HasContext;
use nalgebra_glm as glm;

pub const MODEL_PATH: &str = "models/crate.gltf";

pub struct LitCubeRender {
    pub phong: GlRenderPhong,
    pub clear_color: [f32; 4],
}

impl LitCubeRender {
    pub fn new() -> Self {
        Self {
            phong: GlRenderPhong::new(0, 0),
            clear_color: [0.05, 0.05, 0.08, 1.0],
        }
    }
}

impl Render for LitCubeRender {
    type Model = LitCubeModel;

    fn init(&mut self, ctx: &mut Context, _model: &mut Self::Model) -> Result<()> {
        let geometry = load_model(get_asset_path(MODEL_PATH))?;
        self.phong.set_geometry(geometry);

        let base = ctx.adapter.get_base();
        let (ver, w, h) = (base.glsl_version.clone(), base.width, base.height);
        self.phong.get_base().resize(w, h);
        let gl = ctx
            .adapter
            .gl()
            .ok_or_else(|| CubefallError::Gl("no GL context".to_string()))?;
        self.phong.init(gl, &ver)?;
        unsafe {
            gl.enable(glow::DEPTH_TEST);
        }
        Ok(())
    }

    fn handle_event(&mut self, _ctx: &mut Context, _model: &mut Self::Model, _dt: f32) {}

    fn handle_timer(&mut self, _ctx: &mut Context, _model: &mut Self::Model, _dt: f32) {}

    fn draw(&mut self, ctx: &mut Context, model: &mut Self::Model, _dt: f32) {
        let base = ctx.adapter.get_base();
        let (w, h, aspect) = (base.width, base.height, base.aspect());
        let Some(gl) = ctx.adapter.gl() else {
            return;
        };
        let [r, g, b, a] = self.clear_color;
        unsafe {
            gl.viewport(0, 0, w as i32, h as i32);
            gl.clear_color(r, g, b, a);
            gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
        }

        let cam = &model.camera;
        let spin = glm::rotate(
            &glm::Mat4::identity(),
            model.spin.to_radians(),
            &glm::vec3(0.0, 1.0, 0.0),
        );
        self.phong
            .set_model(&spin)
            .set_camera(&cam.view(), &cam.projection(aspect), &cam.position)
            .set_lights(&model.lights);
        self.phong.prepare_draw(gl);
        self.phong.draw(gl);
    }

    fn cleanup(&mut self, ctx: &mut Context) {
        if let Some(gl) = ctx.adapter.gl() {
            self.phong.cleanup(gl);
        }
    }
}
