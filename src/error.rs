#![allow(dead_code)] // Only the LCD init path produces errors on the host build

//! Unified error types for the watering firmware.
//!
//! A single `Error` enum that every fallible init path can convert into,
//! keeping the top-level error handling uniform. Guarded domain transitions
//! (refused starts/stops) are deliberately *not* errors — they are normal
//! silent no-ops.

use core::fmt;

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Peripheral initialisation failed.
    Init(&'static str),
    /// The LCD could not be initialised or reset.
    Display(&'static str),
    /// The system clock could not be read or adjusted.
    Clock(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Init(msg) => write!(f, "init: {msg}"),
            Self::Display(msg) => write!(f, "display: {msg}"),
            Self::Clock(msg) => write!(f, "clock: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
