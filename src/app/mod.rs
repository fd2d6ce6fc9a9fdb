//! Application core — pure domain orchestration, zero I/O.
//!
//! This module ties the watering scheduler, the emergency controller, and
//! the menu navigator together. All interaction with hardware happens
//! through **port traits** defined in [`ports`], keeping this layer fully
//! testable without real peripherals.

pub mod events;
pub mod ports;
pub mod service;
