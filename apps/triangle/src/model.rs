// Cubefall
// copyright zipxing@hotmail.com 2022～2025

use cubefall::{
    context::Context,
    event::Event,
    game::Model,
    init::AppConfig,
};
use log::info;

pub struct TriangleModel {
    pub clear_color: [f32; 4],
    /// Resize events seen so far
    pub resizes: u32,
}

impl TriangleModel {
    pub fn new() -> Self {
        Self {
            clear_color: [0.2, 0.3, 0.3, 1.0],
            resizes: 0,
        }
    }
}

impl Model for TriangleModel {
    fn init(&mut self, _ctx: &mut Context, cfg: &AppConfig) {
        self.clear_color = cfg.window.clear_color;
    }

    fn handle_input(&mut self, ctx: &mut Context, _dt: f32) {
        for e in ctx.input_events.drain(..) {
            if let Event::Resized { width, height } = e {
                self.resizes += 1;
                info!("resize #{} to {}x{}", self.resizes, width, height);
            }
        }
    }

    fn handle_auto(&mut self, _ctx: &mut Context, _dt: f32) {}
    fn handle_event(&mut self, _ctx: &mut Context, _dt: f32) {}
    fn handle_timer(&mut self, _ctx: &mut Context, _dt: f32) {}
}
