//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ WateringService (domain)
//! ```
//!
//! Driven adapters (actuators, display, clock, event sinks) implement
//! these traits. The [`WateringService`](super::service::WateringService)
//! consumes them via generics, so the domain core never touches hardware
//! directly.
//!
//! The actuator and display ports are deliberately infallible: a failed
//! GPIO or LCD write is logged inside the adapter and swallowed — the UI
//! never surfaces recoverable errors (guarded transitions are silent
//! no-ops, not faults).

use std::sync::Arc;

use chrono::NaiveDateTime;

use crate::menu::render::Frame;

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → relay + indicators)
// ───────────────────────────────────────────────────────────────

/// Thread-safe handle a background blink task uses to drive one
/// indicator pin. `Arc` so a superseded task can keep its (now inert)
/// clone while the replacement holds a fresh one.
pub type IndicatorWriter = Arc<dyn Fn(bool) + Send + Sync>;

/// Write-side port: the domain calls this to command actuators.
pub trait ActuatorPort {
    /// Energise (open valve) or release the watering relay.
    fn set_relay(&mut self, on: bool);

    /// Set the green (watering) indicator level.
    fn set_green(&mut self, on: bool);

    /// Set the red (emergency) indicator level.
    fn set_red(&mut self, on: bool);

    /// Kill relay and both indicators — safe shutdown.
    fn all_off(&mut self);

    /// Writer handle for the green-indicator blink task.
    fn green_writer(&self) -> IndicatorWriter;

    /// Writer handle for the red-indicator blink task.
    fn red_writer(&self) -> IndicatorWriter;
}

// ───────────────────────────────────────────────────────────────
// Display port (driven adapter: domain → character LCD)
// ───────────────────────────────────────────────────────────────

/// 4x20 character display sink.
pub trait DisplayPort {
    /// Overwrite the full display. `None` lines are rendered as padded
    /// spaces so no stale characters survive from the previous frame.
    fn write_frame(&mut self, frame: &Frame);

    /// Display/backlight power (idle timeout handling).
    fn set_powered(&mut self, on: bool);
}

// ───────────────────────────────────────────────────────────────
// Clock ports
// ───────────────────────────────────────────────────────────────

/// Read-side wall-clock port (minute resolution is sufficient).
pub trait ClockPort {
    fn now(&self) -> NaiveDateTime;
}

/// One field of the OS clock, as edited from the config menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockField {
    Day,
    Month,
    Year,
    Hour,
    Minute,
}

/// Privileged, fire-and-forget system clock mutation. Failures are
/// logged by the adapter; the domain never observes them.
pub trait SystemClockPort {
    fn adjust(&mut self, field: ClockField, delta: i8);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port. Adapters decide where they go (serial log today;
/// the trait keeps the domain indifferent).
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
