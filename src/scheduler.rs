//! Watering scheduler — mode, schedule, and active-watering lifecycle.
//!
//! The scheduler is a pure decision engine: [`WateringScheduler::evaluate`]
//! is called once per control tick and returns the action (if any) the
//! service must execute. Actuator side effects (relay, indicator blink
//! tasks) live in [`crate::app::service`]; this module only owns state.
//!
//! ```text
//!           ┌── emergency ──▶ no action (the override owns the relay)
//! evaluate ─┼── mode ON  ───▶ start unless already running
//!           ├── mode OFF ───▶ stop if running
//!           └── mode AUTO ──▶ start when the schedule is due,
//!                             stop when the duration has elapsed
//! ```

use chrono::{Days, Duration, NaiveDateTime};
use log::debug;

use crate::config::WateringConfig;

// ---------------------------------------------------------------------------
// Mode
// ---------------------------------------------------------------------------

/// Watering operating mode, cycled by index with wraparound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum WateringMode {
    Auto = 0,
    Off = 1,
    On = 2,
}

impl WateringMode {
    pub const ALL: [WateringMode; 3] = [Self::Auto, Self::Off, Self::On];

    /// Next mode in cycling order (AUTO -> OFF -> ON -> AUTO).
    pub fn next(self) -> Self {
        match self {
            Self::Auto => Self::Off,
            Self::Off => Self::On,
            Self::On => Self::Auto,
        }
    }

    /// Previous mode in cycling order.
    pub fn prev(self) -> Self {
        match self {
            Self::Auto => Self::On,
            Self::Off => Self::Auto,
            Self::On => Self::Off,
        }
    }

    /// Display label, as shown on the home and mode screens.
    pub fn label(self) -> &'static str {
        match self {
            Self::Auto => "AUTO",
            Self::Off => "OFF",
            Self::On => "ON",
        }
    }
}

// ---------------------------------------------------------------------------
// Watering state
// ---------------------------------------------------------------------------

/// Lifecycle of the current/most recent watering cycle.
#[derive(Debug, Clone, Copy, Default)]
pub struct WateringState {
    /// True while the valve is commanded open.
    pub ongoing: bool,
    /// Set exactly when a watering starts; drives the AUTO schedule.
    pub last_start: Option<NaiveDateTime>,
    /// `last_start + duration`; the AUTO mode stop deadline.
    pub end_at: Option<NaiveDateTime>,
}

/// Action requested from the service for this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Start,
    Stop,
}

// ---------------------------------------------------------------------------
// Scheduler
// ---------------------------------------------------------------------------

pub struct WateringScheduler {
    config: WateringConfig,
    mode: WateringMode,
    state: WateringState,
}

impl WateringScheduler {
    pub fn new(config: WateringConfig) -> Self {
        Self {
            config,
            mode: WateringMode::Auto,
            state: WateringState::default(),
        }
    }

    // ── Decision policy ───────────────────────────────────────

    /// Decide what to do this tick. Pure — no side effects.
    ///
    /// Priority order: emergency owns the relay, then the forced modes,
    /// then the AUTO schedule.
    pub fn evaluate(&self, now: NaiveDateTime, emergency_active: bool) -> Option<Action> {
        if emergency_active {
            return None;
        }

        match self.mode {
            WateringMode::On if !self.state.ongoing => Some(Action::Start),
            WateringMode::Off if self.state.ongoing => Some(Action::Stop),
            WateringMode::Auto => {
                if !self.state.ongoing && self.has_to_water(now) {
                    Some(Action::Start)
                } else if self.state.ongoing && self.end_reached(now) {
                    Some(Action::Stop)
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    /// Begin a watering cycle. Refused (returns `false`) when the mode is
    /// OFF, the emergency override is active, or a cycle is already running.
    pub fn start(&mut self, now: NaiveDateTime, emergency_active: bool) -> bool {
        if self.mode == WateringMode::Off || emergency_active {
            debug!("watering start refused (mode={:?})", self.mode);
            return false;
        }
        if self.state.ongoing {
            return false;
        }

        self.state.ongoing = true;
        self.state.last_start = Some(now);
        self.state.end_at = Some(now + Duration::minutes(self.config.duration_minutes as i64));
        true
    }

    /// End the current watering cycle. Refused (returns `false`) while the
    /// mode is ON unless `bypass` is set — only the emergency override may
    /// interrupt a forced-on watering.
    pub fn stop(&mut self, bypass: bool) -> bool {
        if self.mode == WateringMode::On && !bypass {
            debug!("watering stop refused (mode ON)");
            return false;
        }
        if !self.state.ongoing {
            return false;
        }

        self.state.ongoing = false;
        true
    }

    // ── Schedule arithmetic ───────────────────────────────────

    /// True when the AUTO schedule is due.
    pub fn has_to_water(&self, now: NaiveDateTime) -> bool {
        now >= self.next_watering_date(now)
    }

    /// The next scheduled watering instant: `last_start + interval` at the
    /// configured start time of day. A system that has never watered is
    /// due immediately.
    pub fn next_watering_date(&self, now: NaiveDateTime) -> NaiveDateTime {
        match self.state.last_start {
            None => now,
            Some(last) => {
                let date = last
                    .date()
                    .checked_add_days(Days::new(self.config.days_between_watering as u64))
                    .unwrap_or_else(|| last.date());
                date.and_time(self.config.start_time.to_naive_time())
            }
        }
    }

    /// Countdown to the next scheduled watering (home screen).
    pub fn next_watering_in(&self, now: NaiveDateTime) -> String {
        format_countdown(self.next_watering_date(now) - now)
    }

    /// Countdown to the end of the running watering (home screen).
    /// Empty when no cycle is running.
    pub fn end_watering_in(&self, now: NaiveDateTime) -> String {
        match self.state.end_at {
            Some(end) => format_countdown(end - now),
            None => String::new(),
        }
    }

    fn end_reached(&self, now: NaiveDateTime) -> bool {
        self.state.end_at.is_some_and(|end| now >= end)
    }

    // ── Mode ──────────────────────────────────────────────────

    pub fn mode(&self) -> WateringMode {
        self.mode
    }

    pub fn cycle_mode_next(&mut self) {
        self.mode = self.mode.next();
    }

    pub fn cycle_mode_prev(&mut self) {
        self.mode = self.mode.prev();
    }

    // ── Accessors ─────────────────────────────────────────────

    pub fn is_ongoing(&self) -> bool {
        self.state.ongoing
    }

    pub fn state(&self) -> &WateringState {
        &self.state
    }

    pub fn config(&self) -> &WateringConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut WateringConfig {
        &mut self.config
    }
}

// ---------------------------------------------------------------------------
// Countdown formatting
// ---------------------------------------------------------------------------

/// Format a remaining-time span for the 20-column display.
///
/// `2j 5h` when at least a day remains, `5h07` for hours, `42 min` for
/// minutes, `30 sec` below a minute. All divisions floor.
pub fn format_countdown(diff: Duration) -> String {
    let total_secs = diff.num_seconds().max(0);
    let days = total_secs / 86_400;
    let secs_in_day = total_secs % 86_400;

    if days > 0 {
        format!("{}j {}h", days, secs_in_day / 3600)
    } else if secs_in_day >= 3600 {
        let hours = secs_in_day / 3600;
        format!("{}h{:02}", hours, (secs_in_day - hours * 3600) / 60)
    } else if secs_in_day >= 60 {
        format!("{} min", secs_in_day / 60)
    } else {
        format!("{} sec", secs_in_day)
    }
}
