//! Arrosoir firmware — main entry point.
//!
//! Hexagonal architecture with a single driving control loop and
//! ISR-fed button events.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                    Adapters (outer ring)                   │
//! │                                                            │
//! │  HardwareAdapter   Hd44780Display   SystemClockAdapter     │
//! │  (ActuatorPort)    (DisplayPort)    (Clock/SystemClock)    │
//! │  LogEventSink                                              │
//! │                                                            │
//! │  ──────────────── Port Trait Boundary ──────────────       │
//! │                                                            │
//! │  ┌──────────────────────────────────────────────────┐      │
//! │  │           WateringService (pure logic)           │      │
//! │  │  Scheduler · Emergency · Menu · Display idle     │      │
//! │  └──────────────────────────────────────────────────┘      │
//! │                                                            │
//! │  Button ISRs ──▶ debouncer ──▶ lock-free queue ──▶ loop    │
//! └────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

// ── Module declarations ───────────────────────────────────────
pub mod config;
mod emergency;
mod error;
mod events;
mod pins;
mod scheduler;

pub mod app;
mod adapters;
mod drivers;
pub mod menu;

// ── Imports ───────────────────────────────────────────────────
use anyhow::Result;
use log::info;

use adapters::display::Hd44780Display;
use adapters::hardware::HardwareAdapter;
use adapters::log_sink::LogEventSink;
use adapters::time::SystemClockAdapter;
use app::ports::{ActuatorPort, ClockPort, DisplayPort};
use app::service::WateringService;
use config::WateringConfig;
use drivers::indicator::IndicatorLed;
use drivers::relay::RelayDriver;
use menu::render::Frame;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("arrosoir v{} starting", env!("CARGO_PKG_VERSION"));

    // ── 2. Peripherals ────────────────────────────────────────
    if let Err(e) = drivers::hw_init::init_peripherals() {
        // Peripheral init failure is critical — log and halt.
        log::error!("HAL init failed: {} — halting", e);
        #[allow(clippy::empty_loop)]
        loop {}
    }
    if let Err(e) = drivers::hw_init::init_isr_service() {
        log::error!("ISR service init failed: {} — continuing without buttons", e);
    }

    let config = WateringConfig::default();

    // ── 3. LCD + boot banner ──────────────────────────────────
    let mut display = match Hd44780Display::new() {
        Ok(d) => d,
        Err(e) => {
            log::error!("LCD init failed: {} — halting", e);
            #[allow(clippy::empty_loop)]
            loop {}
        }
    };
    display.write_frame(&Frame::new([
        Some("Demarrage en cours.."),
        Some("Initialisation des"),
        Some("parametres"),
        None,
    ]));

    // ── 4. Actuators + lamp test ──────────────────────────────
    let mut hw = HardwareAdapter::new(
        RelayDriver::new(pins::RELAY_GPIO),
        IndicatorLed::new(pins::LED_GREEN_GPIO),
        IndicatorLed::new(pins::LED_RED_GPIO),
    );

    hw.lamp_test(true);
    std::thread::sleep(std::time::Duration::from_secs(5));
    hw.lamp_test(false);

    // The valve must be released before the loop takes over.
    hw.set_relay(false);

    // ── 5. Clock, sink, service ───────────────────────────────
    let mut clock = SystemClockAdapter::new();
    let mut sink = LogEventSink::new();

    let mut service = WateringService::new(config.clone(), clock.now());
    service.start(&mut sink);

    info!("System ready. Entering control loop.");

    // ── 6. Control loop ───────────────────────────────────────
    let tick = std::time::Duration::from_millis(config.control_loop_interval_ms as u64);

    loop {
        std::thread::sleep(tick);
        let now = clock.now();

        // Drain the debounced button presses queued by the ISRs since the
        // last tick — the loop is the queue's only consumer.
        events::drain_events(|button| {
            service.handle_button(button, now, &mut hw, &mut clock, &mut sink);
        });

        service.tick(now, &mut hw, &mut display, &mut sink);
    }
}
