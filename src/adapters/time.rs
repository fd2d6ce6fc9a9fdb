//! System clock adapter.
//!
//! Read side: [`ClockPort`] from the local wall clock via chrono (which
//! wraps `gettimeofday` on ESP-IDF). Write side: [`SystemClockPort`]
//! nudges one date/time field by ±1 for the config-menu clock editors —
//! fire-and-forget, a failed adjustment is logged and dropped.
//!
//! On non-ESP targets the write side only logs the adjustment it would
//! have made.

use chrono::{DateTime, Datelike, Duration, Local, Months, NaiveDateTime};
use log::{info, warn};

use crate::app::ports::{ClockField, ClockPort, SystemClockPort};

pub struct SystemClockAdapter;

impl SystemClockAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl ClockPort for SystemClockAdapter {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

impl SystemClockPort for SystemClockAdapter {
    fn adjust(&mut self, field: ClockField, delta: i8) {
        let current = Local::now();
        let Some(target) = shifted(current, field, delta) else {
            warn!("clock: adjustment {:?} {:+} out of range, ignored", field, delta);
            return;
        };

        info!("clock: {:?} {:+} -> {}", field, delta, target.naive_local());
        set_system_time(target.timestamp());
    }
}

/// The current instant with one field nudged by `delta`.
fn shifted(current: DateTime<Local>, field: ClockField, delta: i8) -> Option<DateTime<Local>> {
    match field {
        ClockField::Day => current.checked_add_signed(Duration::days(delta as i64)),
        ClockField::Month => {
            if delta >= 0 {
                current.checked_add_months(Months::new(delta as u32))
            } else {
                current.checked_sub_months(Months::new((-(delta as i32)) as u32))
            }
        }
        ClockField::Year => current.with_year(current.year() + delta as i32),
        ClockField::Hour => current.checked_add_signed(Duration::hours(delta as i64)),
        ClockField::Minute => current.checked_add_signed(Duration::minutes(delta as i64)),
    }
}

#[cfg(target_os = "espidf")]
fn set_system_time(epoch_secs: i64) {
    let tv = esp_idf_svc::sys::timeval {
        tv_sec: epoch_secs as _,
        tv_usec: 0,
    };
    // SAFETY: settimeofday copies from the provided struct; no aliasing.
    let rc = unsafe { esp_idf_svc::sys::settimeofday(&tv, core::ptr::null_mut()) };
    if rc != 0 {
        warn!("clock: settimeofday failed (rc={})", rc);
    }
}

#[cfg(not(target_os = "espidf"))]
fn set_system_time(epoch_secs: i64) {
    info!("clock(sim): would set system time to epoch {}", epoch_secs);
}
