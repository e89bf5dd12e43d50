// Cubefall
// copyright zipxing@hotmail.com 2022～2025

//! A textured glTF model lit by coloured point lights, with a fly camera.

cubefall::cubefall_app!(LitCube);
