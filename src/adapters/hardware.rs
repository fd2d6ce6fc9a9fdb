//! Hardware adapter — bridges real actuators to the domain port traits.
//!
//! Owns the relay and indicator drivers, exposing them through
//! [`ActuatorPort`]. The writer handles hand raw pin access to the
//! background blink tasks: they close over the pin number and go through
//! the same `hw_init` helpers, so no driver borrow crosses a thread.

use std::sync::Arc;

use crate::app::ports::{ActuatorPort, IndicatorWriter};
use crate::drivers::hw_init;
use crate::drivers::indicator::IndicatorLed;
use crate::drivers::relay::RelayDriver;

/// Concrete adapter that combines all actuators behind the port trait.
pub struct HardwareAdapter {
    relay: RelayDriver,
    green: IndicatorLed,
    red: IndicatorLed,
}

impl HardwareAdapter {
    pub fn new(relay: RelayDriver, green: IndicatorLed, red: IndicatorLed) -> Self {
        Self { relay, green, red }
    }

    /// Boot-time lamp test: both indicators lit, caller delays, then off.
    pub fn lamp_test(&mut self, lit: bool) {
        self.green.set(lit);
        self.red.set(lit);
    }
}

impl ActuatorPort for HardwareAdapter {
    fn set_relay(&mut self, on: bool) {
        self.relay.set(on);
    }

    fn set_green(&mut self, on: bool) {
        self.green.set(on);
    }

    fn set_red(&mut self, on: bool) {
        self.red.set(on);
    }

    fn all_off(&mut self) {
        self.relay.set(false);
        self.green.off();
        self.red.off();
    }

    fn green_writer(&self) -> IndicatorWriter {
        let pin = self.green.gpio();
        Arc::new(move |on| hw_init::gpio_write(pin, on))
    }

    fn red_writer(&self) -> IndicatorWriter {
        let pin = self.red.gpio();
        Arc::new(move |on| hw_init::gpio_write(pin, on))
    }
}
