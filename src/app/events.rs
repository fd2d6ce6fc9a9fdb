//! Outbound application events.
//!
//! The [`WateringService`](super::service::WateringService) emits these
//! through the [`EventSink`](super::ports::EventSink) port. Guarded
//! refusals (start while OFF, stop while ON) are normal transitions and
//! deliberately have no event.

use chrono::NaiveDateTime;

use crate::app::ports::ClockField;
use crate::scheduler::WateringMode;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// The service has started (carries the boot mode).
    Started(WateringMode),

    /// A watering cycle began; the valve closes again at `until`.
    WateringStarted { until: NaiveDateTime },

    /// The watering cycle ended (schedule, mode change, or emergency).
    WateringStopped,

    /// The emergency override was engaged.
    EmergencyActivated,

    /// The emergency override was released.
    EmergencyCleared,

    /// The display went dark after the inactivity timeout.
    DisplaySleep,

    /// A button press woke the display.
    DisplayWake,

    /// A config-menu edit nudged the OS clock.
    ClockAdjusted { field: ClockField, delta: i8 },
}
