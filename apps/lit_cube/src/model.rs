// Cubefall
// copyright zipxing@hotmail.com 2022～2025

use cubefall::{
    context::Context,
    game::Model,
    init::AppConfig,
    math::Camera,
    render::adapter::gl::render_phong::PointLight,
};
use nalgebra_glm as glm;

/// Degrees per tick
pub const SPIN_SPEED: f32 = 0.5;
/// Radius of the light orbit around the model
pub const LIGHT_ORBIT: f32 = 3.0;

pub struct LitCubeModel {
    pub camera: Camera,
    pub lights: Vec<PointLight>,
    /// Model yaw in degrees
    pub spin: f32,
}

impl LitCubeModel {
    pub fn new() -> Self {
        Self {
            camera: Camera::default(),
            lights: vec![],
            spin: 0.0,
        }
    }

    /// Lights spread evenly on a circle around y, `phase` in radians
    fn place_lights(&mut self, phase: f32) {
        const COLORS: [[f32; 3]; 3] = [[1.0, 0.9, 0.8], [0.3, 0.5, 1.0], [1.0, 0.3, 0.3]];
        let n = COLORS.len() as f32;
        self.lights = COLORS
            .iter()
            .enumerate()
            .map(|(i, c)| {
                let a = phase + i as f32 * std::f32::consts::TAU / n;
                PointLight {
                    position: glm::vec3(LIGHT_ORBIT * a.cos(), 1.5, LIGHT_ORBIT * a.sin()),
                    color: glm::vec3(c[0], c[1], c[2]),
                }
            })
            .collect();
    }
}

impl Model for LitCubeModel {
    fn init(&mut self, ctx: &mut Context, _cfg: &AppConfig) {
        self.camera = Camera::default();
        self.place_lights(0.0);
        ctx.input_events.clear();
    }

    fn handle_input(&mut self, ctx: &mut Context, _dt: f32) {
        for e in ctx.input_events.drain(..) {
            self.camera.handle_event(&e);
        }
    }

    fn handle_auto(&mut self, ctx: &mut Context, _dt: f32) {
        self.spin = (self.spin + SPIN_SPEED) % 360.0;
        self.place_lights(ctx.stage as f32 * 0.01);
    }

    fn handle_event(&mut self, _ctx: &mut Context, _dt: f32) {}
    fn handle_timer(&mut self, _ctx: &mut Context, _dt: f32) {}
}
