// Cubefall
// copyright zipxing@hotmail.com 2022～2025

//! Utilities: project and asset path lookup, RNG, a Verlet particle.

use crate::init::get_game_config;
use std::{
    env,
    fs::read_dir,
    io::{self, ErrorKind},
    path::{Path, PathBuf},
};

mod particle;
pub use particle::*;
mod rand;
pub use rand::*;

/// The repository root is the nearest ancestor holding this directory
pub const ROOT_FLAG: &str = "assets";

/// Resolves the directory of the running app.
///
/// `cargo run -p <app>` exports `CARGO_MANIFEST_DIR`, which points at
/// `apps/<app>`. Without it the current directory is used.
pub fn get_project_path() -> String {
    match env::var("CARGO_MANIFEST_DIR") {
        Ok(manifest_dir) => manifest_dir,
        Err(_) => ".".to_string(),
    }
}

/// Walks up from `start` until a directory containing `flag_file` is found
pub fn get_project_root(start: &Path, flag_file: &str) -> io::Result<PathBuf> {
    let start = start.canonicalize()?;
    for p in start.ancestors() {
        let found = match read_dir(p) {
            Ok(entries) => entries
                .filter_map(|e| e.ok())
                .any(|e| e.file_name() == *flag_file),
            Err(_) => false,
        };
        if found {
            return Ok(PathBuf::from(p));
        }
    }
    Err(io::Error::new(
        ErrorKind::NotFound,
        "Ran out of places to find flag_file",
    ))
}

/// Root of the shared assets and log directories.
///
/// Searched from the configured project path first, then from the current
/// directory, so a binary started from anywhere inside the tree finds it.
pub fn get_root_path() -> PathBuf {
    let project = PathBuf::from(&get_game_config().project_path);
    get_project_root(&project, ROOT_FLAG)
        .or_else(|_| env::current_dir().and_then(|cwd| get_project_root(&cwd, ROOT_FLAG)))
        .unwrap_or_else(|_| PathBuf::from("."))
}

pub fn get_abs_path(fpath: &str) -> PathBuf {
    let p = Path::new(fpath);
    if p.is_relative() {
        get_root_path().join(p)
    } else {
        p.to_path_buf()
    }
}

/// Path of a file under `assets/`
pub fn get_asset_path(rel: &str) -> PathBuf {
    get_root_path().join(ROOT_FLAG).join(rel)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_lookup_finds_flag_in_ancestor() {
        let base = env::temp_dir().join(format!("cubefall_root_{}", std::process::id()));
        let nested = base.join("apps").join("glass");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::create_dir_all(base.join(ROOT_FLAG)).unwrap();

        let root = get_project_root(&nested, ROOT_FLAG).unwrap();
        assert_eq!(root, base.canonicalize().unwrap());

        std::fs::remove_dir_all(&base).unwrap();
    }

    #[test]
    fn absolute_paths_pass_through() {
        let abs = env::temp_dir().join("x.log");
        assert_eq!(get_abs_path(abs.to_str().unwrap()), abs);
    }
}
