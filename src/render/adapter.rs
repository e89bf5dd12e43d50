// Cubefall
// copyright zipxing@hotmail.com 2022～2025

//! # Render Adapter Module
//!
//! The adapter owns the OS window and the GL context and hands both to the
//! game loop:
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │               Game Loop (Frame-based)        │
//! │   ┌───────────┐  events  ┌──────────────┐    │
//! │   │  Model    │◄────────►│   Render     │    │
//! │   └───────────┘          └──────────────┘    │
//! │         ▲ poll_event()          │ gl()       │
//! └─────────┼───────────────────────┼────────────┘
//!           │                       ▼
//! ┌─────────┴────────────────────────────────────┐
//! │             Adapter Interface                │
//! │   WinitGlowAdapter: winit + glutin + glow    │
//! └──────────────────────────────────────────────┘
//! ```

use crate::{error::Result, event::Event, init::WindowConfig};
use std::time::Duration;

/// OpenGL renderers
pub mod gl;

/// winit window, glutin context, glow loader
pub mod winit_glow_adapter;

/// Window state shared by every adapter
pub struct AdapterBase {
    pub game_name: String,
    pub project_path: String,
    pub title: String,
    /// Current framebuffer size in physical pixels
    pub width: u32,
    pub height: u32,
    /// GLSL version line for the created context
    pub glsl_version: String,
}

impl AdapterBase {
    pub fn new(gn: &str, project_path: &str) -> Self {
        Self {
            game_name: gn.to_string(),
            project_path: project_path.to_string(),
            title: "".to_string(),
            width: 0,
            height: 0,
            glsl_version: "#version 330 core".to_string(),
        }
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }
}

pub trait Adapter {
    /// Opens the window and makes its GL context current
    fn init(&mut self, cfg: &WindowConfig) -> Result<()>;

    fn get_base(&mut self) -> &mut AdapterBase;

    /// Collects pending input into `es`, returns true when the app should quit
    fn poll_event(&mut self, timeout: Duration, es: &mut Vec<Event>) -> bool;

    /// None until `init` succeeded
    fn gl(&self) -> Option<&glow::Context>;

    /// Presents the frame
    fn post_draw(&mut self);
}
