// Cubefall
// copyright zipxing@hotmail.com 2022～2025

use cubefall::{
    event::{EventCenter, Timers},
    error::CubefallError,
    init::{AppConfig, SimConfig},
    math::AabbSeed,
    render::load_model,
    scene::{FallingBox, World},
    util::Rand,
    GAME_FRAME,
};
use nalgebra_glm as glm;
use std::path::{Path, PathBuf};

struct Sim {
    world: World,
    timers: Timers,
    events: EventCenter,
}

impl Sim {
    fn new(cfg: &SimConfig) -> Self {
        let mut rand = Rand::new();
        rand.srand(cfg.seed.unwrap_or(7));
        Self {
            world: World::from_config(cfg, &mut rand),
            timers: Timers::new(),
            events: EventCenter::new(),
        }
    }

    /// Same order as a game tick: timers first, then the model
    fn tick(&mut self) {
        self.timers.update(&mut self.events);
        self.world.update(&mut self.timers, &mut self.events);
    }
}

fn assets() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("assets")
}

#[test]
fn every_box_in_front_of_the_glass_is_eventually_deleted() {
    let cfg = SimConfig {
        seed: Some(42),
        box_count: 20,
        spawn_min: [-3.0, -2.0, -12.0],
        spawn_max: [3.0, 2.0, -4.0],
        ..SimConfig::default()
    };
    let mut sim = Sim::new(&cfg);

    // furthest box needs (12 + 0.5) / 0.05 ticks to reach the glass
    let travel = (12.5 / cfg.z_step) as u32 + 1;
    let delay = (cfg.delete_delay * GAME_FRAME as f32) as u32;
    for _ in 0..travel + delay + 1 {
        sim.tick();
    }
    assert_eq!(sim.world.collided_count(), 20);
    assert_eq!(sim.world.deleted_count(), 20);
    assert_eq!(sim.world.visible_boxes().count(), 0);
    for b in &sim.world.boxes {
        // stopped right at the glass, not beyond it
        assert!(b.aabb.max().z >= -0.05 && b.aabb.max().z < 0.05 + cfg.z_step);
    }
}

#[test]
fn boxes_beside_the_glass_keep_moving() {
    let cfg = SimConfig {
        box_count: 10,
        spawn_min: [5.0, -1.0, -10.0],
        spawn_max: [8.0, 1.0, -5.0],
        ..SimConfig::default()
    };
    let mut sim = Sim::new(&cfg);
    let start: Vec<f32> = sim.world.boxes.iter().map(|b| b.position.z).collect();
    for _ in 0..400 {
        sim.tick();
    }
    assert_eq!(sim.world.collided_count(), 0);
    for (b, z0) in sim.world.boxes.iter().zip(start) {
        assert!(b.position.z > z0 + 19.0);
        assert!(b.is_visible());
    }
}

#[test]
fn deletion_timer_carries_box_index() {
    let cfg = SimConfig {
        box_count: 0,
        ..SimConfig::default()
    };
    let mut sim = Sim::new(&cfg);
    sim.world.add_box(glm::vec3(20.0, 0.0, -5.0), 0.5);
    let hit = sim.world.add_box(glm::vec3(0.0, 0.0, 0.0), 0.5);
    sim.tick();

    let name = FallingBox::timer_name(hit);
    assert!(sim.timers.contains(&name));
    assert_eq!(sim.timers.exdata::<usize>(&name), Some(hit));
    assert!(!sim.timers.contains(&FallingBox::timer_name(0)));
    assert_eq!(sim.timers.rstage(&name), 0);
    sim.tick();
    assert_eq!(sim.timers.rstage(&name), 1);
}

#[test]
fn stale_seed_is_only_used_when_asked_for() {
    let text = std::fs::read_to_string(assets().join("glass/config.toml")).unwrap();
    let cfg = AppConfig::from_toml(&text, Path::new("glass/config.toml")).unwrap();
    assert_eq!(cfg.sim.aabb_seed, AabbSeed::Infinity);
    assert_eq!(cfg.sim.box_count, 16);

    let cfg = AppConfig::from_toml("[sim]\naabb_seed = \"stale_vertex\"", Path::new("x.toml"))
        .unwrap();
    assert_eq!(cfg.sim.aabb_seed, AabbSeed::StaleVertex);
}

#[test]
fn shipped_crate_model_loads_with_texture() {
    let model = load_model(assets().join("models/crate.gltf")).unwrap();
    assert_eq!(model.vertices.len(), 24);
    assert_eq!(model.indices.len(), 36);
    assert!(model.indices.iter().all(|&i| (i as usize) < model.vertices.len()));
    let tex = model.texture_path.unwrap();
    assert!(tex.ends_with("crate.png"));
    assert!(tex.exists());
}

#[test]
fn worksheet_window_config() {
    let text = std::fs::read_to_string(assets().join("triangle/config.toml")).unwrap();
    let cfg = AppConfig::from_toml(&text, Path::new("triangle/config.toml")).unwrap();
    assert_eq!(cfg.window.title, "Comp305 Worksheet 1 OpenGL Window");
    assert_eq!((cfg.window.width, cfg.window.height), (800, 600));
    assert!(!cfg.window.relative_mouse);
}

#[test]
fn infinite_spawn_bound_never_reaches_the_world() {
    let err = AppConfig::from_toml("[sim]\nspawn_max = [inf, 2.5, -8.0]", Path::new("glass.toml"));
    assert!(matches!(err, Err(CubefallError::InvalidConfig { .. })));

    // a hand built config skips validation, spawning still must not panic
    let cfg = SimConfig {
        box_count: 4,
        spawn_max: [f32::INFINITY, 2.5, -8.0],
        ..SimConfig::default()
    };
    let sim = Sim::new(&cfg);
    assert_eq!(sim.world.boxes.len(), 4);
    assert!(sim.world.boxes.iter().all(|b| b.position.x == cfg.spawn_min[0]));
}
