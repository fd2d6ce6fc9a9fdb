//! Application service — the hexagonal core.
//!
//! [`WateringService`] owns the scheduler, emergency controller, menu
//! navigator, and display-idle state. It exposes a clean,
//! hardware-agnostic API: the main loop feeds it debounced button events
//! and a tick; all I/O flows through port traits injected at call sites,
//! making the entire service testable with mock adapters.
//!
//! ```text
//!  Button queue ──▶ ┌──────────────────────────────┐ ──▶ EventSink
//!                   │        WateringService        │
//!  ActuatorPort ◀── │  Scheduler · Emergency · Menu │ ──▶ DisplayPort
//!                   └──────────────────────────────┘
//! ```

use chrono::{Duration, NaiveDateTime};
use log::info;

use crate::config::WateringConfig;
use crate::drivers::blink::{BlinkPattern, BlinkTask};
use crate::emergency::EmergencyController;
use crate::events::Button;
use crate::menu::{MenuAction, MenuNavigator};
use crate::scheduler::{Action, WateringScheduler};

use super::events::AppEvent;
use super::ports::{ActuatorPort, DisplayPort, EventSink, SystemClockPort};

pub struct WateringService {
    scheduler: WateringScheduler,
    emergency: EmergencyController,
    menu: MenuNavigator,

    display_on: bool,
    last_activity: NaiveDateTime,
    display_timeout: Duration,

    /// Green-indicator blink task for the running watering cycle.
    /// Replacement is always cancel-then-spawn.
    green_blink: Option<BlinkTask>,
}

impl WateringService {
    /// Construct the service. `boot_time` seeds the inactivity timer so
    /// the display stays lit through the boot sequence.
    pub fn new(config: WateringConfig, boot_time: NaiveDateTime) -> Self {
        let display_timeout = Duration::seconds(config.display_timeout_secs as i64);
        Self {
            scheduler: WateringScheduler::new(config),
            emergency: EmergencyController::new(),
            menu: MenuNavigator::new(),
            display_on: true,
            last_activity: boot_time,
            display_timeout,
            green_blink: None,
        }
    }

    /// Announce startup. State is volatile: every boot begins in AUTO
    /// with no prior watering.
    pub fn start(&mut self, sink: &mut impl EventSink) {
        sink.emit(&AppEvent::Started(self.scheduler.mode()));
        info!("WateringService started (mode {})", self.scheduler.mode().label());
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one control cycle: display idle handling → render →
    /// menu housekeeping → schedule evaluation.
    pub fn tick(
        &mut self,
        now: NaiveDateTime,
        hw: &mut impl ActuatorPort,
        display: &mut impl DisplayPort,
        sink: &mut impl EventSink,
    ) {
        // 1. Display power follows the inactivity timer. Switching off
        //    also snaps the menu back to the home screen.
        let idle = now.signed_duration_since(self.last_activity);
        if self.display_on && idle >= self.display_timeout {
            self.display_on = false;
            display.set_powered(false);
            self.menu.reset_home();
            sink.emit(&AppEvent::DisplaySleep);
        } else if !self.display_on && idle < self.display_timeout {
            self.display_on = true;
            display.set_powered(true);
            sink.emit(&AppEvent::DisplayWake);
        }

        // 2. Render the active screen (skipped while dark).
        if self.display_on {
            let frame = self.menu.render(now, &self.scheduler);
            display.write_frame(&frame);
        }

        // 3. Menu housekeeping (start/stop notice countdown).
        self.menu.tick();

        // 4. Schedule evaluation.
        match self.scheduler.evaluate(now, self.emergency.is_active()) {
            Some(Action::Start) => self.start_watering(now, hw, sink),
            Some(Action::Stop) => self.stop_watering(hw, sink),
            None => {}
        }
    }

    // ── Button handling ───────────────────────────────────────

    /// Handle one debounced button press drained from the event queue.
    ///
    /// Every press feeds the inactivity timer. While the display is dark,
    /// navigation presses only wake it (the event is swallowed); the
    /// emergency button always acts. Navigation is locked out entirely
    /// while the emergency override is active.
    pub fn handle_button(
        &mut self,
        button: Button,
        now: NaiveDateTime,
        hw: &mut impl ActuatorPort,
        sysclock: &mut impl SystemClockPort,
        sink: &mut impl EventSink,
    ) {
        let was_dark = !self.display_on;
        self.last_activity = now;

        if button == Button::Emergency {
            self.toggle_emergency(hw, sink);
            return;
        }

        if was_dark || self.emergency.is_active() {
            return;
        }

        match self.menu.handle_button(button, &mut self.scheduler) {
            MenuAction::None => {}
            MenuAction::StartWatering => self.start_watering(now, hw, sink),
            MenuAction::StopWatering => self.stop_watering(hw, sink),
            MenuAction::AdjustClock(field, delta) => {
                sysclock.adjust(field, delta);
                sink.emit(&AppEvent::ClockAdjusted { field, delta });
            }
        }
    }

    // ── Watering side effects ─────────────────────────────────

    /// Open the valve and start the green blink task. Silently refused
    /// by the scheduler guards (mode OFF, emergency, already running).
    fn start_watering(
        &mut self,
        now: NaiveDateTime,
        hw: &mut impl ActuatorPort,
        sink: &mut impl EventSink,
    ) {
        if !self.scheduler.start(now, self.emergency.is_active()) {
            return;
        }

        hw.set_relay(true);

        if let Some(mut stale) = self.green_blink.take() {
            stale.cancel();
        }
        self.green_blink = Some(BlinkTask::spawn(BlinkPattern::Watering, hw.green_writer()));

        if let Some(until) = self.scheduler.state().end_at {
            info!("watering started, valve closes at {}", until);
            sink.emit(&AppEvent::WateringStarted { until });
        }
    }

    /// Close the valve, cancel the blink task, settle the green LED dark.
    /// Silently refused while the mode is ON unless the emergency
    /// override is active.
    fn stop_watering(&mut self, hw: &mut impl ActuatorPort, sink: &mut impl EventSink) {
        if !self.scheduler.stop(self.emergency.is_active()) {
            return;
        }

        if let Some(mut task) = self.green_blink.take() {
            task.cancel();
        }
        hw.set_relay(false);
        // The cancel does not wait for the task; the LED's final level is
        // set here, after the request.
        hw.set_green(false);

        info!("watering stopped");
        sink.emit(&AppEvent::WateringStopped);
    }

    // ── Emergency ─────────────────────────────────────────────

    fn toggle_emergency(&mut self, hw: &mut impl ActuatorPort, sink: &mut impl EventSink) {
        if self.emergency.is_active() {
            self.emergency.deactivate();
            hw.set_red(false);
            self.menu.reset_home();
            sink.emit(&AppEvent::EmergencyCleared);
        } else {
            self.menu.force_emergency();
            self.emergency.activate(hw.red_writer());
            // Emergency always wins: the stop below bypasses the ON-mode
            // refusal and tears down the green blink task.
            self.stop_watering(hw, sink);
            sink.emit(&AppEvent::EmergencyActivated);
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn scheduler(&self) -> &WateringScheduler {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut WateringScheduler {
        &mut self.scheduler
    }

    pub fn menu(&self) -> &MenuNavigator {
        &self.menu
    }

    pub fn emergency_active(&self) -> bool {
        self.emergency.is_active()
    }

    pub fn display_is_on(&self) -> bool {
        self.display_on
    }
}
