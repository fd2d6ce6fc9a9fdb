//! Mock hardware adapters for integration tests.
//!
//! Record every actuator, display, and clock call so tests can assert on
//! the full command history without touching real GPIO.

use std::sync::{Arc, Mutex};

use arrosoir::app::events::AppEvent;
use arrosoir::app::ports::{
    ActuatorPort, ClockField, DisplayPort, EventSink, IndicatorWriter, SystemClockPort,
};
use arrosoir::menu::render::Frame;

// ── Actuator call record ──────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorCall {
    Relay(bool),
    Green(bool),
    Red(bool),
    AllOff,
}

// ── MockHardware ──────────────────────────────────────────────

pub struct MockHardware {
    pub calls: Vec<ActuatorCall>,
    green_writes: Arc<Mutex<Vec<bool>>>,
    red_writes: Arc<Mutex<Vec<bool>>>,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            green_writes: Arc::new(Mutex::new(Vec::new())),
            red_writes: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Relay state after the most recent relevant call.
    pub fn relay_on(&self) -> bool {
        self.calls
            .iter()
            .rev()
            .find_map(|c| match c {
                ActuatorCall::Relay(on) => Some(*on),
                ActuatorCall::AllOff => Some(false),
                _ => None,
            })
            .unwrap_or(false)
    }

    /// Number of pin toggles issued by the green blink task so far.
    pub fn green_write_count(&self) -> usize {
        self.green_writes.lock().unwrap().len()
    }

    /// Number of pin toggles issued by the red blink task so far.
    pub fn red_write_count(&self) -> usize {
        self.red_writes.lock().unwrap().len()
    }
}

impl Default for MockHardware {
    fn default() -> Self {
        Self::new()
    }
}

impl ActuatorPort for MockHardware {
    fn set_relay(&mut self, on: bool) {
        self.calls.push(ActuatorCall::Relay(on));
    }

    fn set_green(&mut self, on: bool) {
        self.calls.push(ActuatorCall::Green(on));
    }

    fn set_red(&mut self, on: bool) {
        self.calls.push(ActuatorCall::Red(on));
    }

    fn all_off(&mut self) {
        self.calls.push(ActuatorCall::AllOff);
    }

    fn green_writer(&self) -> IndicatorWriter {
        let sink = Arc::clone(&self.green_writes);
        Arc::new(move |level| {
            sink.lock().unwrap().push(level);
        })
    }

    fn red_writer(&self) -> IndicatorWriter {
        let sink = Arc::clone(&self.red_writes);
        Arc::new(move |level| {
            sink.lock().unwrap().push(level);
        })
    }
}

// ── MockDisplay ───────────────────────────────────────────────

pub struct MockDisplay {
    pub frames: Vec<Frame>,
    pub power_calls: Vec<bool>,
}

#[allow(dead_code)]
impl MockDisplay {
    pub fn new() -> Self {
        Self {
            frames: Vec::new(),
            power_calls: Vec::new(),
        }
    }

    pub fn last_frame(&self) -> Option<&Frame> {
        self.frames.last()
    }
}

impl Default for MockDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayPort for MockDisplay {
    fn write_frame(&mut self, frame: &Frame) {
        self.frames.push(frame.clone());
    }

    fn set_powered(&mut self, on: bool) {
        self.power_calls.push(on);
    }
}

// ── MockSystemClock ───────────────────────────────────────────

pub struct MockSystemClock {
    pub adjustments: Vec<(ClockField, i8)>,
}

impl MockSystemClock {
    pub fn new() -> Self {
        Self {
            adjustments: Vec::new(),
        }
    }
}

impl Default for MockSystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClockPort for MockSystemClock {
    fn adjust(&mut self, field: ClockField, delta: i8) {
        self.adjustments.push((field, delta));
    }
}

// ── RecordingSink ─────────────────────────────────────────────

pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn contains(&self, event: &AppEvent) -> bool {
        self.events.contains(event)
    }
}

impl Default for RecordingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
