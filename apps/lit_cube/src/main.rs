// Cubefall
// copyright zipxing@hotmail.com 2022～2025

use lit_cube::run;

fn main() {
    run()
}
