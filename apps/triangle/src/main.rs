// Cubefall
// copyright zipxing@hotmail.com 2022～2025

use triangle::run;

fn main() {
    run()
}
