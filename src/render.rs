// Cubefall
// copyright zipxing@hotmail.com 2022～2025

//! # 渲染模块
//!
//! ## 子模块
//! - `mesh`: CPU side vertices and the built-in cube / quad / triangle
//! - `model`: glTF import into `ModelData`
//! - `adapter`: window adapter interface, winit + glutin + glow backend
//!   and the OpenGL renderers

pub mod adapter;
pub mod mesh;
pub mod model;

pub use adapter::{Adapter, AdapterBase};
pub use mesh::{ModelData, Vertex};
pub use model::load_model;
