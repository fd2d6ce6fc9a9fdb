//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the logger (UART / USB-CDC in production). The only sink today, but
//! the trait keeps the domain indifferent to where events end up.

use log::info;

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started(mode) => {
                info!("START | mode={}", mode.label());
            }
            AppEvent::WateringStarted { until } => {
                info!("WATER | started, until={}", until);
            }
            AppEvent::WateringStopped => {
                info!("WATER | stopped");
            }
            AppEvent::EmergencyActivated => {
                info!("EMRGY | activated");
            }
            AppEvent::EmergencyCleared => {
                info!("EMRGY | cleared");
            }
            AppEvent::DisplaySleep => {
                info!("LCD   | sleep (idle timeout)");
            }
            AppEvent::DisplayWake => {
                info!("LCD   | wake");
            }
            AppEvent::ClockAdjusted { field, delta } => {
                info!("CLOCK | {:?} {:+}", field, delta);
            }
        }
    }
}
