// Cubefall
// copyright zipxing@hotmail.com 2022～2025

use cubefall::{
    context::Context,
    game::Model,
    init::{AppConfig, SimConfig},
    math::Camera,
    scene::World,
    util::Rand,
};
use log::info;
use nalgebra_glm as glm;

pub struct GlassModel {
    pub camera: Camera,
    pub world: World,
    /// Last logged (collided, deleted) counts
    pub reported: (usize, usize),
}

impl GlassModel {
    pub fn new() -> Self {
        let cfg = SimConfig {
            box_count: 0,
            ..SimConfig::default()
        };
        Self {
            camera: Camera::default(),
            world: World::from_config(&cfg, &mut Rand::new()),
            reported: (0, 0),
        }
    }
}

impl Model for GlassModel {
    fn init(&mut self, ctx: &mut Context, cfg: &AppConfig) {
        match cfg.sim.seed {
            Some(seed) => ctx.rand.srand(seed),
            None => ctx.rand.srand_now(),
        }
        self.camera = Camera::new(glm::vec3(0.0, 0.0, 6.0));
        self.world = World::from_config(&cfg.sim, &mut ctx.rand);
        info!(
            "glass scene: {} boxes, seed policy {:?}",
            self.world.boxes.len(),
            cfg.sim.aabb_seed
        );
        ctx.input_events.clear();
    }

    fn handle_input(&mut self, ctx: &mut Context, _dt: f32) {
        for e in ctx.input_events.drain(..) {
            self.camera.handle_event(&e);
        }
    }

    fn handle_auto(&mut self, ctx: &mut Context, _dt: f32) {
        self.world.update(&mut ctx.timers, &mut ctx.events);
    }

    fn handle_event(&mut self, _ctx: &mut Context, _dt: f32) {}

    fn handle_timer(&mut self, _ctx: &mut Context, _dt: f32) {
        let counts = (self.world.collided_count(), self.world.deleted_count());
        if counts != self.reported {
            info!(
                "{} of {} boxes collided, {} deleted",
                counts.0,
                self.world.boxes.len(),
                counts.1
            );
            self.reported = counts;
        }
    }
}
