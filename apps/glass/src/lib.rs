// Cubefall
// copyright zipxing@hotmail.com 2022～2025

//! Cubes spawned at random move toward a glass plane, stop when their
//! bounding boxes touch it and disappear after a delay.

cubefall::cubefall_app!(Glass);
