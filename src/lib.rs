// Cubefall
// copyright zipxing@hotmail.com 2022～2025

//! Cubefall is a small OpenGL engine carrying a series of rendering scenes:
//! a triangle, a textured model lit by point lights, and a field of cubes
//! falling onto a glass plane.
//!
//! Every scene is an app under `apps/` built from a Model (data and logic)
//! and a Render (GL drawing) driven by `Game` at a fixed tick rate. The
//! window and GL context come from winit + glutin, drawing goes through glow.
//!
//! The collision logic in `scene` and `math` does not touch GL and is
//! exercised by plain unit tests.

/// framerate per second
pub const GAME_FRAME: u32 = 60;

/// Re-export paste for use in macros
pub use paste;

/// cubefall_app macro for creating scene applications
///
/// The app crate provides `model.rs` with `{Name}Model` and
/// `render_graphics.rs` with `{Name}Render`, both with a `new()`. The macro
/// generates:
///
/// ```ignore
/// mod model;
/// mod render_graphics;
///
/// pub struct {Name}Game {
///     g: Game<{Name}Model, {Name}Render>,
/// }
///
/// pub fn init_game() -> cubefall::error::Result<{Name}Game> { ... }
/// pub fn run() { ... }  // called by main.rs
/// ```
///
/// The package name of the app names its asset directory and log file.
#[macro_export]
macro_rules! cubefall_app {
    ($name:ident) => {
        mod model;
        mod render_graphics;

        use crate::{model::*, render_graphics::*};
        use cubefall::game::Game;
        use cubefall::util::get_project_path;

        cubefall::paste::paste! {
            pub struct [<$name Game>] {
                pub g: Game<[<$name Model>], [<$name Render>]>,
            }

            pub fn init_game() -> cubefall::error::Result<[<$name Game>]> {
                let pp = get_project_path();
                println!("asset path : {:?}", pp);
                cubefall::init_game_config(env!("CARGO_PKG_NAME"), &pp);
                let m = [<$name Model>]::new();
                let r = [<$name Render>]::new();
                let mut g = Game::new(m, r);
                g.init()?;
                Ok([<$name Game>] { g })
            }

            pub fn run() {
                let result = init_game().and_then(|mut game| {
                    let r = game.g.run();
                    game.g.term();
                    r
                });
                if let Err(e) = result {
                    log::error!("{}", e);
                    eprintln!("{}: {}", env!("CARGO_PKG_NAME"), e);
                    std::process::exit(1);
                }
            }
        }
    };
}

/// shared state passed to model and render every tick
pub mod context;

/// error type of window, GL and asset failures
pub mod error;

/// timers, custom events and input events
pub mod event;

/// integrates model and render, encapsulates the main loop
pub mod game;

/// game and scene configuration
pub mod init;
pub use init::{get_game_config, init_game_config};

/// log
pub mod log;

/// bounding boxes and the fly camera
pub mod math;

/// Render module.
/// adapter: window, GL context and input (winit + glutin + glow).
/// mesh: vertex layout and built-in geometry.
/// model: glTF import.
pub mod render;

/// falling boxes, the glass plane and their per-tick update
pub mod scene;

/// common tools: project paths, RNG, Verlet particle
pub mod util;
