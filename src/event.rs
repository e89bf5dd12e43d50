// Cubefall
// copyright zipxing@hotmail.com 2022～2025

//! Event module: a frame counted timer queue and an event center.
//!
//! Both live in `Context`. A timer that runs out emits an event named after
//! it; whoever registered a callback name for that event consumes it later
//! with `EventCenter::check`, so everything happens on the main thread
//! between two ticks.
//!
//! Input events from the window adapter are converted to the unified
//! `Event` type in the `input` submodule.

use crate::GAME_FRAME;
use log::warn;
use serde::{de::DeserializeOwned, Serialize};
use std::collections::HashMap;

/// Callback flags per event name, set by emit and cleared by check
#[derive(Debug, Default)]
pub struct EventCenter {
    events: HashMap<String, HashMap<String, bool>>,
}

impl EventCenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, event: &str, func: &str) {
        self.events
            .entry(event.to_string())
            .or_default()
            .insert(func.to_string(), false);
    }

    pub fn unregister(&mut self, event: &str) {
        self.events.remove(event);
    }

    pub fn emit(&mut self, event: &str) {
        if let Some(ht) = self.events.get_mut(event) {
            for value in ht.values_mut() {
                *value = true;
            }
        }
    }

    /// True once per emit
    pub fn check(&mut self, event: &str, func: &str) -> bool {
        if let Some(flag) = self.events.get_mut(event).and_then(|ht| ht.get_mut(func)) {
            if *flag {
                *flag = false;
                return true;
            }
        }
        false
    }
}

pub struct Timer {
    time: u32,
    count: u32,
    exdata: Vec<u8>,
}

fn frames(time: f32) -> u32 {
    // a positive delay shorter than one frame still fires
    ((time * GAME_FRAME as f32) as u32).max(1)
}

#[derive(Default)]
pub struct Timers {
    pub timers: HashMap<String, Timer>,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a stopped timer of `time` seconds and its event callback.
    /// Registering an existing name is a no-op.
    pub fn register(&mut self, events: &mut EventCenter, name: &str, time: f32, callback: &str) {
        if self.timers.contains_key(name) {
            return;
        }
        self.timers.insert(
            name.to_string(),
            Timer {
                time: 0,
                count: frames(time),
                exdata: vec![],
            },
        );
        events.register(name, callback);
    }

    pub fn remove(&mut self, events: &mut EventCenter, name: &str) {
        self.timers.remove(name);
        events.unregister(name);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.timers.contains_key(name)
    }

    /// Frames left before firing, 0 when stopped
    pub fn stage(&self, name: &str) -> u32 {
        self.timers.get(name).map_or(0, |t| t.time)
    }

    /// Frames elapsed since fire
    pub fn rstage(&self, name: &str) -> u32 {
        self.timers.get(name).map_or(0, |t| t.count - t.time)
    }

    /// Remaining fraction, 1.0 right after fire
    pub fn percent(&self, name: &str) -> f32 {
        self.timers
            .get(name)
            .map_or(0.0, |t| t.time as f32 / t.count as f32)
    }

    pub fn set_time(&mut self, name: &str, time: f32) {
        if let Some(timer) = self.timers.get_mut(name) {
            timer.count = frames(time);
        }
    }

    pub fn exdata<T: DeserializeOwned>(&self, name: &str) -> Option<T> {
        let timer = self.timers.get(name)?;
        bincode::serde::decode_from_slice(&timer.exdata, bincode::config::standard())
            .map(|(v, _)| v)
            .ok()
    }

    /// Starts the countdown, `value` travels with the timer
    pub fn fire<T: Serialize>(&mut self, name: &str, value: T) {
        if let Some(timer) = self.timers.get_mut(name) {
            timer.time = timer.count;
            match bincode::serde::encode_to_vec(&value, bincode::config::standard()) {
                Ok(data) => timer.exdata = data,
                Err(e) => warn!("timer {} payload not stored: {}", name, e),
            }
        }
    }

    /// Stops a running timer, emitting its event unless `nocall`
    pub fn cancel(&mut self, events: &mut EventCenter, name: &str, nocall: bool) {
        if let Some(timer) = self.timers.get_mut(name) {
            timer.time = 0;
            if !nocall {
                events.emit(name);
            }
        }
    }

    /// Called once per tick
    pub fn update(&mut self, events: &mut EventCenter) {
        for (name, timer) in &mut self.timers {
            if timer.time > 0 {
                timer.time -= 1;
                if timer.time == 0 {
                    events.emit(name);
                }
            }
        }
    }
}

mod input;
pub use input::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_check_consumes_emit() {
        let mut ec = EventCenter::new();
        ec.register("test_event", "test_callback");
        assert!(!ec.check("test_event", "test_callback"));
        ec.emit("test_event");
        assert!(ec.check("test_event", "test_callback"));
        assert!(!ec.check("test_event", "test_callback"));
        // unknown names are never set
        assert!(!ec.check("nope", "test_callback"));
    }

    #[test]
    fn emit_reaches_every_callback() {
        let mut ec = EventCenter::new();
        ec.register("hit", "a");
        ec.register("hit", "b");
        ec.emit("hit");
        assert!(ec.check("hit", "a"));
        assert!(ec.check("hit", "b"));
    }

    #[test]
    fn timer_counts_in_frames() {
        let mut ec = EventCenter::new();
        let mut ts = Timers::new();
        ts.register(&mut ec, "test_timer", 1.0, "timer_callback");
        assert_eq!(ts.stage("test_timer"), 0);
        assert_eq!(ts.rstage("test_timer"), GAME_FRAME);
        assert_eq!(ts.percent("test_timer"), 0.0);

        ts.set_time("test_timer", 2.0);
        assert_eq!(ts.rstage("test_timer"), 2 * GAME_FRAME);

        ts.fire("test_timer", 7usize);
        assert_eq!(ts.percent("test_timer"), 1.0);
        assert_eq!(ts.exdata::<usize>("test_timer"), Some(7));

        for _ in 0..2 * GAME_FRAME - 1 {
            ts.update(&mut ec);
            assert!(!ec.check("test_timer", "timer_callback"));
        }
        ts.update(&mut ec);
        assert!(ec.check("test_timer", "timer_callback"));
        assert_eq!(ts.stage("test_timer"), 0);

        // stopped timers stay silent
        ts.update(&mut ec);
        assert!(!ec.check("test_timer", "timer_callback"));
    }

    #[test]
    fn cancel_emits_unless_nocall() {
        let mut ec = EventCenter::new();
        let mut ts = Timers::new();
        ts.register(&mut ec, "t", 0.5, "cb");
        ts.fire("t", ());
        ts.cancel(&mut ec, "t", true);
        assert!(!ec.check("t", "cb"));
        ts.fire("t", ());
        ts.cancel(&mut ec, "t", false);
        assert!(ec.check("t", "cb"));
    }

    #[test]
    fn tiny_delay_still_fires() {
        let mut ec = EventCenter::new();
        let mut ts = Timers::new();
        ts.register(&mut ec, "t", 0.001, "cb");
        ts.fire("t", ());
        ts.update(&mut ec);
        assert!(ec.check("t", "cb"));
    }

    #[test]
    fn second_register_keeps_first_timer() {
        let mut ec = EventCenter::new();
        let mut ts = Timers::new();
        ts.register(&mut ec, "t", 1.0, "cb");
        ts.register(&mut ec, "t", 3.0, "cb");
        assert_eq!(ts.rstage("t"), GAME_FRAME);
        ts.remove(&mut ec, "t");
        assert!(!ts.contains("t"));
    }
}
