//! Actuator drivers, hardware initialisation, and background blink tasks.

pub mod blink;
pub mod buttons;
pub mod hw_init;
pub mod indicator;
pub mod relay;
