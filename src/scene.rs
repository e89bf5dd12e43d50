// Cubefall
// copyright zipxing@hotmail.com 2022～2025

//! GL independent simulation of the glass scene: boxes move toward a static
//! plane, stop on first contact and are deleted after a delay.

mod falling_box;
pub use falling_box::*;
mod glass;
pub use glass::*;
mod world;
pub use world::*;
