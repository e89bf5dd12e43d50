// Cubefall
// copyright zipxing@hotmail.com 2022～2025

//! Game encapsulates Model and Render classes and implements the main loop.
//! Be aware that all the Game, Model and Render instances have the same lifetime.
//!
//! # Example
//!
//! ```ignore
//! fn main() -> cubefall::error::Result<()> {
//!     init_game_config("glass", &get_project_path());
//!     let mut g = Game::new(GlassModel::new(), GlassRender::new());
//!     g.init()?;
//!     let r = g.run();
//!     g.term();
//!     r
//! }
//! ```

use crate::{
    context::Context,
    error::Result,
    init::{get_game_config, load_app_config, AppConfig},
    log::init_log,
    GAME_FRAME,
};
use log::info;
use std::time::{Duration, Instant};

/// The Model interface, main entrance for data and core logic
pub trait Model {
    fn init(&mut self, ctx: &mut Context, cfg: &AppConfig);
    fn update(&mut self, ctx: &mut Context, dt: f32) {
        ctx.update_timers();
        self.handle_event(ctx, dt);
        self.handle_timer(ctx, dt);
        self.handle_input(ctx, dt);
        self.handle_auto(ctx, dt);
    }
    fn handle_timer(&mut self, ctx: &mut Context, dt: f32);
    fn handle_event(&mut self, ctx: &mut Context, dt: f32);
    fn handle_input(&mut self, ctx: &mut Context, dt: f32);
    fn handle_auto(&mut self, ctx: &mut Context, dt: f32);
}

/// The Render interface, takes context and model as input params. It renders every single frame
pub trait Render {
    type Model: Model;

    /// Runs once the GL context exists; GPU resources are created here
    fn init(&mut self, ctx: &mut Context, m: &mut Self::Model) -> Result<()>;
    fn update(&mut self, ctx: &mut Context, m: &mut Self::Model, dt: f32) {
        self.handle_event(ctx, m, dt);
        self.handle_timer(ctx, m, dt);
        self.draw(ctx, m, dt);
        ctx.adapter.post_draw();
    }
    fn handle_event(&mut self, ctx: &mut Context, model: &mut Self::Model, dt: f32);
    fn handle_timer(&mut self, ctx: &mut Context, model: &mut Self::Model, dt: f32);
    fn draw(&mut self, ctx: &mut Context, model: &mut Self::Model, dt: f32);
    /// Frees GPU resources while the context is alive
    fn cleanup(&mut self, _ctx: &mut Context) {}
}

/// Game encapsulates a Model，a Render and a Context structure
pub struct Game<M, R>
where
    M: Model,
    R: Render<Model = M>,
{
    pub context: Context,
    pub model: M,
    pub render: R,
}

impl<M, R> Game<M, R>
where
    M: Model,
    R: Render<Model = M>,
{
    /// Note: call `init_game_config()` before this.
    pub fn new(m: M, r: R) -> Self {
        let config = get_game_config();
        let name = &config.game_name;
        let project_path = &config.project_path;

        init_log(
            log::LevelFilter::Info,
            &format!("log{}{}.log", std::path::MAIN_SEPARATOR, name),
        );
        info!("{}(cubefall) start...{:?}", name, project_path);
        Self {
            context: Context::new(name, project_path),
            model: m,
            render: r,
        }
    }

    /// Opens the window, then inits model and render
    pub fn init(&mut self) -> Result<()> {
        info!("Init game...");
        let cfg = load_app_config()?;
        self.context.adapter.init(&cfg.window)?;
        self.model.init(&mut self.context, &cfg);
        self.render.init(&mut self.context, &mut self.model)
    }

    /// Main loop, polling input events, processing timer and other events.
    /// It also calls tick at a constant framerate per second, executing the
    /// update method of model and render.
    pub fn run(&mut self) -> Result<()> {
        info!("Begin run...");

        let mut last_tick = Instant::now();
        let tick_rate = Duration::from_nanos(1_000_000_000 / GAME_FRAME as u64);

        loop {
            let timeout = tick_rate
                .checked_sub(last_tick.elapsed())
                .unwrap_or_else(|| Duration::from_nanos(100));

            if self
                .context
                .adapter
                .poll_event(timeout, &mut self.context.input_events)
            {
                info!("Exit run...");
                return Ok(());
            }

            let et = last_tick.elapsed();
            if et >= tick_rate {
                self.on_tick(et.as_secs_f32());
                last_tick = Instant::now();
            }
        }
    }

    /// calls every frame, update timer, model logic and does rendering
    pub fn on_tick(&mut self, dt: f32) {
        self.context.stage += 1;
        self.model.update(&mut self.context, dt);
        self.render.update(&mut self.context, &mut self.model, dt);
    }

    /// Releases GPU resources before the context goes away
    pub fn term(&mut self) {
        self.render.cleanup(&mut self.context);
        info!("Game terminated");
    }
}
