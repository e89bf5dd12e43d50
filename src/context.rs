// Cubefall
// copyright zipxing@hotmail.com 2022～2025

//! Context bundles the state shared by model and render: the tick counter,
//! an RNG, the timer queue and event center, pending input events and the
//! window adapter. It replaces process-wide globals; everything is passed
//! by reference through `Model::update` and `Render::update`.

use crate::{
    event::{Event, EventCenter, Timers},
    render::adapter::{winit_glow_adapter::WinitGlowAdapter, Adapter},
    util::Rand,
};

pub struct Context {
    pub game_name: String,
    pub project_path: String,
    /// Ticks since start
    pub stage: u32,
    pub rand: Rand,
    pub timers: Timers,
    pub events: EventCenter,
    pub input_events: Vec<Event>,
    pub adapter: Box<dyn Adapter>,
}

impl Context {
    pub fn new(name: &str, project_path: &str) -> Self {
        Self {
            game_name: name.to_string(),
            project_path: project_path.to_string(),
            stage: 0,
            rand: Rand::new(),
            timers: Timers::new(),
            events: EventCenter::new(),
            input_events: vec![],
            adapter: Box::new(WinitGlowAdapter::new(name, project_path)),
        }
    }

    /// Runs pending timers, called once per tick before the model
    pub fn update_timers(&mut self) {
        self.timers.update(&mut self.events);
    }
}
