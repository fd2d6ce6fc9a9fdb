//! Emergency override controller.
//!
//! The highest-priority override in the system: while active, the valve
//! is forced closed, menu navigation is locked out, and the red indicator
//! blinks at 1 Hz from a dedicated background task. The controller owns
//! that task's handle; activation is always cancel-then-spawn so a stale
//! task can never keep toggling the pin after supersession.
//!
//! The service layer performs the surrounding side effects on toggle
//! (bypassed scheduler stop, menu forcing, red LED final level).

use log::warn;

use crate::app::ports::IndicatorWriter;
use crate::drivers::blink::{BlinkPattern, BlinkTask};

pub struct EmergencyController {
    active: bool,
    blink: Option<BlinkTask>,
}

impl EmergencyController {
    pub fn new() -> Self {
        Self {
            active: false,
            blink: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Engage the override and start the red 1 Hz blink task.
    /// Any leftover task is cancelled before the replacement is spawned.
    pub fn activate(&mut self, red: IndicatorWriter) {
        warn!("EMERGENCY engaged — valve forced closed, menu locked");
        self.active = true;

        if let Some(mut stale) = self.blink.take() {
            stale.cancel();
        }
        self.blink = Some(BlinkTask::spawn(BlinkPattern::Emergency, red));
    }

    /// Release the override and cancel the blink task. The caller turns
    /// the red indicator off afterwards (the cancel does not wait).
    pub fn deactivate(&mut self) {
        warn!("EMERGENCY released — resuming normal operation");
        self.active = false;

        if let Some(mut task) = self.blink.take() {
            task.cancel();
        }
    }
}
