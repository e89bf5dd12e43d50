// Cubefall
// copyright zipxing@hotmail.com 2022～2025

use glass::run;

fn main() {
    run()
}
