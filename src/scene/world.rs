// Cubefall
// copyright zipxing@hotmail.com 2022～2025

use crate::{
    event::{EventCenter, Timers},
    init::SimConfig,
    math::AabbSeed,
    render::mesh::ModelData,
    scene::{FallingBox, GlassPlane},
    util::Rand,
};
use log::info;
use nalgebra_glm as glm;
use nalgebra_glm::Vec3;

/// Callback name the world registers on every deletion timer
pub const DELETE_CALLBACK: &str = "glass.mark_deleted";

/// Boxes, the glass plane and the parameters of one simulation.
///
/// Boxes are never removed from `boxes`, so a box index stays valid for the
/// lifetime of its deletion timer.
pub struct World {
    pub boxes: Vec<FallingBox>,
    pub glass: GlassPlane,
    /// Local vertices shared by all boxes
    pub mesh_positions: Vec<Vec3>,
    pub z_step: f32,
    pub delete_delay: f32,
    pub aabb_seed: AabbSeed,
}

impl World {
    pub fn new(mesh_positions: Vec<Vec3>, glass: GlassPlane, cfg: &SimConfig) -> Self {
        Self {
            boxes: vec![],
            glass,
            mesh_positions,
            z_step: cfg.z_step,
            delete_delay: cfg.delete_delay,
            aabb_seed: cfg.aabb_seed,
        }
    }

    /// Cube boxes, cube shaped glass, `box_count` boxes at random positions
    pub fn from_config(cfg: &SimConfig, rand: &mut Rand) -> Self {
        let mesh = ModelData::cube().positions();
        let glass = GlassPlane::new(
            &Vec3::from(cfg.glass_position),
            &Vec3::from(cfg.glass_scale),
            &mesh,
        );
        let mut world = Self::new(mesh, glass, cfg);
        for _ in 0..cfg.box_count {
            let p = glm::vec3(
                rand.gen_range(cfg.spawn_min[0], cfg.spawn_max[0]),
                rand.gen_range(cfg.spawn_min[1], cfg.spawn_max[1]),
                rand.gen_range(cfg.spawn_min[2], cfg.spawn_max[2]),
            );
            world.add_box(p, cfg.box_scale);
        }
        info!("spawned {} boxes", world.boxes.len());
        world
    }

    pub fn add_box(&mut self, position: Vec3, scale: f32) -> usize {
        let mut b = FallingBox::new(position, scale);
        b.refresh_aabb(&self.mesh_positions, self.aabb_seed);
        self.boxes.push(b);
        self.boxes.len() - 1
    }

    /// One tick. Per box:
    /// - a fired deletion timer marks it for deletion
    /// - a box that has not collided advances by `z_step`
    /// - its world bounds are rebuilt from the mesh
    /// - first overlap with the glass sets `collided` and starts the timer
    pub fn update(&mut self, timers: &mut Timers, events: &mut EventCenter) {
        for (idx, b) in self.boxes.iter_mut().enumerate() {
            let name = FallingBox::timer_name(idx);
            if b.collided && !b.marked_for_deletion && events.check(&name, DELETE_CALLBACK) {
                b.marked_for_deletion = true;
                info!("box {} marked for deletion", idx);
            }

            if !b.collided {
                b.advance(self.z_step);
            }
            b.refresh_aabb(&self.mesh_positions, self.aabb_seed);

            if !b.collided && b.aabb.overlaps(self.glass.aabb()) {
                b.collided = true;
                info!("box {} collided with glass at {:?}", idx, b.position);
                timers.register(events, &name, self.delete_delay, DELETE_CALLBACK);
                timers.fire(&name, idx);
            }
        }
    }

    /// Boxes still drawn this frame, with their index
    pub fn visible_boxes(&self) -> impl Iterator<Item = (usize, &FallingBox)> {
        self.boxes.iter().enumerate().filter(|(_, b)| b.is_visible())
    }

    pub fn collided_count(&self) -> usize {
        self.boxes.iter().filter(|b| b.collided).count()
    }

    pub fn deleted_count(&self) -> usize {
        self.boxes.iter().filter(|b| b.marked_for_deletion).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GAME_FRAME;

    fn world(seed: AabbSeed) -> World {
        let cfg = SimConfig {
            box_count: 0,
            aabb_seed: seed,
            ..SimConfig::default()
        };
        World::from_config(&cfg, &mut Rand::new())
    }

    fn tick(w: &mut World, timers: &mut Timers, events: &mut EventCenter) {
        timers.update(events);
        w.update(timers, events);
    }

    #[test]
    fn spawn_respects_ranges() {
        let cfg = SimConfig {
            box_count: 50,
            ..SimConfig::default()
        };
        let mut rand = Rand::new();
        rand.srand(3);
        let w = World::from_config(&cfg, &mut rand);
        assert_eq!(w.boxes.len(), 50);
        for b in &w.boxes {
            for k in 0..3 {
                assert!(b.position[k] >= cfg.spawn_min[k] && b.position[k] < cfg.spawn_max[k]);
            }
            assert!(!b.collided);
        }
    }

    #[test]
    fn collision_happens_once_and_stops_motion() {
        let mut w = world(AabbSeed::Infinity);
        let (mut timers, mut events) = (Timers::new(), EventCenter::new());
        w.add_box(glm::vec3(0.0, 0.0, -2.02), 0.5);

        for _ in 0..29 {
            tick(&mut w, &mut timers, &mut events);
        }
        assert!(!w.boxes[0].collided);
        tick(&mut w, &mut timers, &mut events);
        assert!(w.boxes[0].collided);
        assert!(timers.contains(&FallingBox::timer_name(0)));
        assert_eq!(timers.exdata::<usize>(&FallingBox::timer_name(0)), Some(0));

        let z = w.boxes[0].position.z;
        for _ in 0..10 {
            tick(&mut w, &mut timers, &mut events);
        }
        assert_eq!(w.boxes[0].position.z, z);
        assert_eq!(w.collided_count(), 1);
    }

    #[test]
    fn deletion_after_delay_in_frames() {
        let mut w = world(AabbSeed::Infinity);
        let (mut timers, mut events) = (Timers::new(), EventCenter::new());
        // already inside the glass
        w.add_box(glm::vec3(0.0, 0.0, 0.0), 0.5);
        tick(&mut w, &mut timers, &mut events);
        assert!(w.boxes[0].collided);

        let delay = (w.delete_delay * GAME_FRAME as f32) as u32;
        for _ in 0..delay - 1 {
            tick(&mut w, &mut timers, &mut events);
        }
        assert!(!w.boxes[0].marked_for_deletion);
        assert_eq!(w.visible_boxes().count(), 1);
        tick(&mut w, &mut timers, &mut events);
        assert!(w.boxes[0].marked_for_deletion);
        assert_eq!(w.visible_boxes().count(), 0);
        assert_eq!(w.deleted_count(), 1);
    }

    #[test]
    fn stale_vertex_seed_collides_from_afar() {
        let mut stale = world(AabbSeed::StaleVertex);
        let mut clean = world(AabbSeed::Infinity);
        let (mut timers, mut events) = (Timers::new(), EventCenter::new());
        // x in [5.5, 6.5] misses a glass spanning x in [-4, 4]
        for w in [&mut stale, &mut clean] {
            w.add_box(glm::vec3(6.0, 0.0, -2.0), 0.5);
        }
        for _ in 0..60 {
            tick(&mut stale, &mut timers, &mut events);
            tick(&mut clean, &mut timers, &mut events);
        }
        assert!(stale.boxes[0].collided);
        assert!(!clean.boxes[0].collided);
    }
}
