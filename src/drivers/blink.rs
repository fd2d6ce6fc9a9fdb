//! Cancellable background indicator blink tasks.
//!
//! A [`BlinkTask`] is an isolated unit of execution that owns nothing but
//! a pin writer and a cooperative cancellation flag. At most one task per
//! indicator may be alive: replacing one is always cancel-then-spawn,
//! never spawn-over. `cancel()` only issues the request — it does not wait
//! for the thread to observe it — so the owner is responsible for setting
//! the indicator's final level after cancelling.
//!
//! On ESP-IDF, `std::thread` maps to a FreeRTOS task (pthread wrapper),
//! so these run exactly like any other firmware task.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::JoinHandle;
use std::time::Duration;

use crate::app::ports::IndicatorWriter;

/// Blink cadences for the two indicator roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlinkPattern {
    /// Watering feedback: 5 fast blinks (100 ms on / 100 ms off), then a
    /// steady 1 Hz blink for the remainder of the watering window.
    Watering,
    /// Emergency: steady 1 Hz blink until deactivation.
    Emergency,
}

/// Cancellation is polled in slices this long, bounding how stale a
/// superseded task can be.
const CANCEL_POLL_MS: u64 = 25;

/// Thread stack for a blink task — it only toggles a pin and sleeps.
const BLINK_STACK_BYTES: usize = 4 * 1024;

pub struct BlinkTask {
    cancel: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl BlinkTask {
    /// Spawn a new blink task driving `write`.
    pub fn spawn(pattern: BlinkPattern, write: IndicatorWriter) -> Self {
        let cancel = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancel);

        let handle = std::thread::Builder::new()
            .name("blink".into())
            .stack_size(BLINK_STACK_BYTES)
            .spawn(move || run_pattern(pattern, &write, &flag))
            .ok();

        if handle.is_none() {
            log::warn!("blink: thread spawn failed, indicator will stay static");
        }

        Self {
            cancel,
            handle,
        }
    }

    /// Request termination. Fire-and-forget: the thread exits within one
    /// cancellation-poll slice but this call does not wait for it.
    pub fn cancel(&mut self) {
        self.cancel.store(true, Ordering::Release);
        // Detach — the thread holds its own Arc clones.
        drop(self.handle.take());
    }

    /// Request termination and wait for the thread to exit.
    /// Used by tests that need a deterministic "no more toggles" point.
    pub fn cancel_and_join(mut self) {
        self.cancel.store(true, Ordering::Release);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for BlinkTask {
    fn drop(&mut self) {
        self.cancel.store(true, Ordering::Release);
    }
}

// ── Pattern execution (blink thread body) ─────────────────────

fn run_pattern(pattern: BlinkPattern, write: &IndicatorWriter, cancel: &AtomicBool) {
    if pattern == BlinkPattern::Watering {
        // Fast greeting burst.
        for _ in 0..5 {
            if pulse(write, cancel, 100, 100) {
                return;
            }
        }
    }

    // Steady 1 Hz until cancelled.
    loop {
        if pulse(write, cancel, 1000, 1000) {
            return;
        }
    }
}

/// One on/off pulse. Returns `true` when cancellation was observed.
fn pulse(write: &IndicatorWriter, cancel: &AtomicBool, on_ms: u64, off_ms: u64) -> bool {
    if cancel.load(Ordering::Acquire) {
        return true;
    }
    write(true);
    if sliced_sleep(cancel, on_ms) {
        return true;
    }
    write(false);
    sliced_sleep(cancel, off_ms)
}

/// Sleep `ms` in cancellation-poll slices. Returns `true` on cancel.
fn sliced_sleep(cancel: &AtomicBool, ms: u64) -> bool {
    let mut remaining = ms;
    while remaining > 0 {
        if cancel.load(Ordering::Acquire) {
            return true;
        }
        let slice = remaining.min(CANCEL_POLL_MS);
        std::thread::sleep(Duration::from_millis(slice));
        remaining -= slice;
    }
    cancel.load(Ordering::Acquire)
}
