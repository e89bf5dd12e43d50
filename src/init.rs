// Cubefall
// copyright zipxing@hotmail.com 2022～2025

//! Start-up configuration.
//!
//! `GameConfig` names the running app and its directory and is set once at
//! program start. `AppConfig` carries the tunables of a scene, read from
//! `assets/<game_name>/config.toml`; every field has a default so the file
//! may be partial or absent.

use crate::{
    error::{CubefallError, Result},
    math::AabbSeed,
    util::get_asset_path,
};
use log::info;
use serde::Deserialize;
use std::{fs, io::ErrorKind, path::Path, sync::OnceLock};

/// Global game configuration - initialized once at startup
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Game name identifier, also the asset sub-directory
    pub game_name: String,
    /// Directory of the running app
    pub project_path: String,
}

pub static GAME_CONFIG: OnceLock<GameConfig> = OnceLock::new();

/// Should be called once at program startup before `Game::new`
pub fn init_game_config(game_name: &str, project_path: &str) {
    let _ = GAME_CONFIG.set(GameConfig {
        game_name: game_name.to_string(),
        project_path: project_path.to_string(),
    });
}

/// If not initialized, returns a config with empty game_name and "." as project_path.
pub fn get_game_config() -> &'static GameConfig {
    GAME_CONFIG.get_or_init(|| GameConfig {
        game_name: String::new(),
        project_path: ".".to_string(),
    })
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub gl_major: u8,
    pub gl_minor: u8,
    /// Grab and hide the cursor, report raw mouse motion
    pub relative_mouse: bool,
    pub resizable: bool,
    pub clear_color: [f32; 4],
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Cubefall".to_string(),
            width: 960,
            height: 720,
            gl_major: 3,
            gl_minor: 3,
            relative_mouse: true,
            resizable: true,
            clear_color: [0.2, 0.3, 0.3, 1.0],
        }
    }
}

impl WindowConfig {
    /// GLSL version line matching the requested core context
    pub fn glsl_version(&self) -> String {
        format!("#version {}{}0 core", self.gl_major, self.gl_minor)
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Fixed RNG seed, time seeded when absent
    pub seed: Option<u64>,
    pub box_count: usize,
    pub box_scale: f32,
    /// Distance a box travels along +z every tick
    pub z_step: f32,
    /// Seconds between collision and deletion
    pub delete_delay: f32,
    pub aabb_seed: AabbSeed,
    pub spawn_min: [f32; 3],
    pub spawn_max: [f32; 3],
    pub glass_position: [f32; 3],
    pub glass_scale: [f32; 3],
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: None,
            box_count: 12,
            box_scale: 0.5,
            z_step: 0.05,
            delete_delay: 2.0,
            aabb_seed: AabbSeed::Infinity,
            spawn_min: [-6.0, -2.5, -20.0],
            spawn_max: [6.0, 2.5, -8.0],
            glass_position: [0.0, 0.0, 0.0],
            glass_scale: [4.0, 3.0, 0.05],
        }
    }
}

impl SimConfig {
    /// TOML accepts `inf` and `nan`, so parsed values still need a range check
    pub fn validate(&self) -> std::result::Result<(), String> {
        let finite = |name: &str, v: &[f32]| {
            if v.iter().all(|x| x.is_finite()) {
                Ok(())
            } else {
                Err(format!("sim.{} must be finite, got {:?}", name, v))
            }
        };
        finite("spawn_min", &self.spawn_min)?;
        finite("spawn_max", &self.spawn_max)?;
        finite("z_step", &[self.z_step])?;
        finite("delete_delay", &[self.delete_delay])?;
        finite("box_scale", &[self.box_scale])?;
        finite("glass_position", &self.glass_position)?;
        finite("glass_scale", &self.glass_scale)?;

        for k in 0..3 {
            if self.spawn_min[k] > self.spawn_max[k] {
                return Err(format!(
                    "sim.spawn_min[{}] = {} is above sim.spawn_max[{}] = {}",
                    k, self.spawn_min[k], k, self.spawn_max[k]
                ));
            }
        }
        if self.delete_delay < 0.0 {
            return Err(format!("sim.delete_delay is negative: {}", self.delete_delay));
        }
        if self.box_scale <= 0.0 {
            return Err(format!("sim.box_scale must be positive: {}", self.box_scale));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub window: WindowConfig,
    pub sim: SimConfig,
}

impl AppConfig {
    pub fn from_toml(text: &str, path: &Path) -> Result<Self> {
        let cfg: Self = toml::from_str(text).map_err(|source| CubefallError::Config {
            path: path.to_path_buf(),
            source,
        })?;
        cfg.sim
            .validate()
            .map_err(|reason| CubefallError::InvalidConfig {
                path: path.to_path_buf(),
                reason,
            })?;
        Ok(cfg)
    }

    /// Reads `path`, a missing file yields the defaults
    pub fn load(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(text) => {
                info!("load config {}", path.display());
                Self::from_toml(&text, path)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("no config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(source) => Err(CubefallError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

/// Config of the running app, `assets/<game_name>/config.toml`
pub fn load_app_config() -> Result<AppConfig> {
    let name = &get_game_config().game_name;
    AppConfig::load(&get_asset_path(&format!("{}/config.toml", name)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn partial_file_keeps_defaults() {
        let text = r#"
            [window]
            title = "Comp305 Worksheet 1 OpenGL Window"
            width = 800
            height = 600

            [sim]
            seed = 9
            aabb_seed = "stale_vertex"
        "#;
        let cfg = AppConfig::from_toml(text, Path::new("config.toml")).unwrap();
        assert_eq!(cfg.window.width, 800);
        assert_eq!(cfg.window.gl_major, 3);
        assert!(cfg.window.relative_mouse);
        assert_eq!(cfg.sim.seed, Some(9));
        assert_eq!(cfg.sim.aabb_seed, AabbSeed::StaleVertex);
        assert_eq!(cfg.sim.z_step, 0.05);
        assert_eq!(cfg.sim.delete_delay, 2.0);
    }

    #[test]
    fn missing_file_is_default() {
        let cfg = AppConfig::load(&PathBuf::from("/nonexistent/cubefall/config.toml")).unwrap();
        assert_eq!(cfg, AppConfig::default());
    }

    #[test]
    fn bad_value_is_config_error() {
        let err = AppConfig::from_toml("[sim]\nz_step = \"fast\"", Path::new("c.toml"));
        assert!(matches!(err, Err(CubefallError::Config { .. })));
    }

    fn rejected(text: &str) -> String {
        match AppConfig::from_toml(text, Path::new("c.toml")) {
            Err(CubefallError::InvalidConfig { reason, .. }) => reason,
            other => panic!("expected InvalidConfig, got {:?}", other),
        }
    }

    #[test]
    fn infinite_spawn_range_is_rejected() {
        let reason = rejected("[sim]\nspawn_max = [inf, 2.5, -8.0]");
        assert!(reason.contains("spawn_max"));
        let reason = rejected("[sim]\nspawn_min = [-6.0, -inf, -20.0]");
        assert!(reason.contains("spawn_min"));
    }

    #[test]
    fn nan_spawn_range_is_rejected() {
        let reason = rejected("[sim]\nspawn_min = [nan, -2.5, -20.0]");
        assert!(reason.contains("spawn_min"));
    }

    #[test]
    fn inverted_spawn_range_is_rejected() {
        let reason =
            rejected("[sim]\nspawn_min = [0.0, 3.0, -20.0]\nspawn_max = [1.0, 2.5, -8.0]");
        assert!(reason.contains("spawn_min[1]"));
    }

    #[test]
    fn non_finite_z_step_is_rejected() {
        assert!(rejected("[sim]\nz_step = inf").contains("z_step"));
        assert!(rejected("[sim]\nz_step = nan").contains("z_step"));
    }

    #[test]
    fn bad_delete_delay_is_rejected() {
        assert!(rejected("[sim]\ndelete_delay = nan").contains("delete_delay"));
        assert!(rejected("[sim]\ndelete_delay = -1.0").contains("delete_delay"));
    }

    #[test]
    fn equal_spawn_bounds_are_accepted() {
        let cfg = AppConfig::from_toml(
            "[sim]\nspawn_min = [1.0, 1.0, -5.0]\nspawn_max = [1.0, 1.0, -5.0]",
            Path::new("c.toml"),
        )
        .unwrap();
        assert_eq!(cfg.sim.spawn_min, cfg.sim.spawn_max);
        assert_eq!(cfg.sim.validate(), Ok(()));
    }

    #[test]
    fn glsl_version_follows_gl_version() {
        let w = WindowConfig::default();
        assert_eq!(w.glsl_version(), "#version 330 core");
        assert_eq!(w.aspect(), 960.0 / 720.0);
    }
}
