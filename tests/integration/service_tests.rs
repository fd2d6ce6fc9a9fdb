//! Integration tests for the full button → service → actuator pipeline.
//!
//! These drive the [`WateringService`] exactly like the firmware control
//! loop does — `handle_button` for drained presses, `tick` per period —
//! and assert on the recorded actuator/display/event histories.

use chrono::{Duration, NaiveDate, NaiveDateTime};

use arrosoir::app::events::AppEvent;
use arrosoir::app::ports::ClockField;
use arrosoir::app::service::WateringService;
use arrosoir::config::WateringConfig;
use arrosoir::events::Button;
use arrosoir::menu::MenuScreen;
use arrosoir::scheduler::WateringMode;

use crate::mock_hw::{ActuatorCall, MockDisplay, MockHardware, MockSystemClock, RecordingSink};

fn boot_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 6, 1)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

struct Rig {
    service: WateringService,
    hw: MockHardware,
    display: MockDisplay,
    sysclock: MockSystemClock,
    sink: RecordingSink,
}

impl Rig {
    fn new() -> Self {
        let mut service = WateringService::new(WateringConfig::default(), boot_time());
        let mut sink = RecordingSink::new();
        service.start(&mut sink);
        Self {
            service,
            hw: MockHardware::new(),
            display: MockDisplay::new(),
            sysclock: MockSystemClock::new(),
            sink,
        }
    }

    fn tick(&mut self, now: NaiveDateTime) {
        self.service
            .tick(now, &mut self.hw, &mut self.display, &mut self.sink);
    }

    fn press(&mut self, button: Button, now: NaiveDateTime) {
        self.service.handle_button(
            button,
            now,
            &mut self.hw,
            &mut self.sysclock,
            &mut self.sink,
        );
    }
}

// ── AUTO schedule lifecycle ───────────────────────────────────

#[test]
fn first_boot_waters_immediately_and_stops_after_duration() {
    let mut rig = Rig::new();
    let t0 = boot_time();

    // Never watered: the first tick opens the valve.
    rig.tick(t0);
    assert!(rig.hw.relay_on(), "valve must open on the first AUTO tick");
    assert!(rig.sink.contains(&AppEvent::WateringStarted {
        until: t0 + Duration::minutes(60)
    }));

    // Mid-cycle: still open.
    rig.tick(t0 + Duration::minutes(30));
    assert!(rig.hw.relay_on());

    // Past the 60-minute duration: closed, green settled dark.
    rig.tick(t0 + Duration::minutes(61));
    assert!(!rig.hw.relay_on(), "valve must close after the duration");
    assert!(rig.sink.contains(&AppEvent::WateringStopped));
    assert_eq!(rig.hw.calls.last(), Some(&ActuatorCall::Green(false)));
}

#[test]
fn next_cycle_waits_for_the_configured_interval() {
    let mut rig = Rig::new();
    let t0 = boot_time();

    rig.tick(t0);
    rig.tick(t0 + Duration::minutes(61));
    assert!(!rig.hw.relay_on());

    // Three days later: not due yet (interval is 4 days at 23:00).
    rig.tick(t0 + Duration::days(3));
    assert!(!rig.hw.relay_on());

    // 4 days later at 23:00 sharp: due again.
    let due = NaiveDate::from_ymd_opt(2024, 6, 5)
        .unwrap()
        .and_hms_opt(23, 0, 0)
        .unwrap();
    rig.tick(due);
    assert!(rig.hw.relay_on());
}

#[test]
fn off_mode_never_opens_the_valve() {
    let mut rig = Rig::new();
    let t0 = boot_time();
    rig.service.scheduler_mut().cycle_mode_next(); // AUTO -> OFF

    for minutes in 0..5 {
        rig.tick(t0 + Duration::minutes(minutes));
    }
    assert!(!rig.hw.relay_on());
    assert!(!rig.sink.contains(&AppEvent::WateringStopped));
}

// ── Emergency override ────────────────────────────────────────

#[test]
fn emergency_preempts_a_running_watering() {
    let mut rig = Rig::new();
    let t0 = boot_time();

    rig.tick(t0);
    assert!(rig.hw.relay_on());
    // Give the green blink task a moment to run.
    std::thread::sleep(std::time::Duration::from_millis(60));
    assert!(rig.hw.green_write_count() > 0, "green task must be blinking");

    rig.press(Button::Emergency, t0 + Duration::seconds(10));
    assert!(!rig.hw.relay_on(), "emergency forces the valve closed");
    assert!(rig.service.emergency_active());
    assert_eq!(rig.service.menu().screen(), MenuScreen::Emergency);
    assert!(rig.sink.contains(&AppEvent::WateringStopped));
    assert!(rig.sink.contains(&AppEvent::EmergencyActivated));

    // Red task starts blinking...
    std::thread::sleep(std::time::Duration::from_millis(60));
    assert!(rig.hw.red_write_count() > 0, "red task must be blinking");

    // ...and the green task terminates (within one cancellation slice).
    std::thread::sleep(std::time::Duration::from_millis(120));
    let settled = rig.hw.green_write_count();
    std::thread::sleep(std::time::Duration::from_millis(120));
    assert_eq!(
        rig.hw.green_write_count(),
        settled,
        "green task must stop toggling after the emergency"
    );
}

#[test]
fn emergency_wins_over_mode_on_and_releases_cleanly() {
    let mut rig = Rig::new();
    let t0 = boot_time();
    rig.service.scheduler_mut().cycle_mode_next();
    rig.service.scheduler_mut().cycle_mode_next(); // AUTO -> OFF -> ON

    rig.tick(t0);
    assert!(rig.hw.relay_on(), "ON mode starts unconditionally");

    rig.press(Button::Emergency, t0 + Duration::seconds(5));
    assert!(!rig.hw.relay_on(), "emergency bypasses the ON-mode stop refusal");

    // While active, the schedule stays suppressed.
    rig.tick(t0 + Duration::seconds(6));
    assert!(!rig.hw.relay_on());

    // Release: menu home, red settled dark, and — mode still ON — the
    // next tick restarts the watering.
    rig.press(Button::Emergency, t0 + Duration::seconds(10));
    assert!(!rig.service.emergency_active());
    assert_eq!(rig.service.menu().screen(), MenuScreen::Home);
    assert!(rig.sink.contains(&AppEvent::EmergencyCleared));
    assert!(rig.hw.calls.contains(&ActuatorCall::Red(false)));

    rig.tick(t0 + Duration::seconds(11));
    assert!(rig.hw.relay_on(), "ON mode restarts on the next tick");
}

#[test]
fn navigation_is_locked_out_during_emergency() {
    let mut rig = Rig::new();
    let t0 = boot_time();

    rig.press(Button::Emergency, t0);
    for button in [Button::Left, Button::Right, Button::Up, Button::Down] {
        rig.press(button, t0 + Duration::seconds(1));
    }
    assert_eq!(rig.service.menu().screen(), MenuScreen::Emergency);
    assert_eq!(rig.service.scheduler().mode(), WateringMode::Auto, "no edits leak through");
}

// ── Display idle timeout ──────────────────────────────────────

#[test]
fn display_sleeps_after_timeout_and_a_press_wakes_it() {
    let mut rig = Rig::new();
    let t0 = boot_time();

    // Navigate away from home so the reset is observable.
    rig.press(Button::Right, t0);
    rig.tick(t0);
    assert_eq!(rig.service.menu().screen(), MenuScreen::ConfigList);
    let frames_before = rig.display.frames.len();

    // 300 s idle: display off, menu home.
    let asleep = t0 + Duration::seconds(301);
    rig.tick(asleep);
    assert!(!rig.service.display_is_on());
    assert_eq!(rig.display.power_calls.last(), Some(&false));
    assert_eq!(rig.service.menu().screen(), MenuScreen::Home);
    assert!(rig.sink.contains(&AppEvent::DisplaySleep));
    assert_eq!(rig.display.frames.len(), frames_before, "no rendering while dark");

    // A press while dark is swallowed (wake only)...
    rig.press(Button::Right, asleep + Duration::seconds(5));
    assert_eq!(rig.service.menu().screen(), MenuScreen::Home);

    // ...and the next tick powers the panel back on.
    rig.tick(asleep + Duration::seconds(5));
    assert!(rig.service.display_is_on());
    assert_eq!(rig.display.power_calls.last(), Some(&true));
    assert!(rig.sink.contains(&AppEvent::DisplayWake));
}

// ── Menu-driven actions ───────────────────────────────────────

#[test]
fn start_stop_item_opens_the_valve_from_the_menu() {
    let mut rig = Rig::new();
    // Move the schedule far away so only the manual action can start.
    let t0 = boot_time();
    rig.tick(t0);
    rig.tick(t0 + Duration::minutes(61)); // finish the boot cycle

    let t1 = t0 + Duration::minutes(90);
    rig.press(Button::Right, t1); // ConfigList
    rig.press(Button::Right, t1); // StartStop detail -> acts
    assert!(rig.hw.relay_on(), "manual start must open the valve");

    assert!(rig.service.scheduler().is_ongoing());
}

#[test]
fn clock_editors_emit_fire_and_forget_adjustments() {
    let mut rig = Rig::new();
    let t0 = boot_time();

    rig.press(Button::Right, t0); // ConfigList
    for _ in 0..5 {
        rig.press(Button::Down, t0); // select SetDay
    }
    rig.press(Button::Right, t0); // detail

    rig.press(Button::Up, t0);
    rig.press(Button::Down, t0);
    assert_eq!(
        rig.sysclock.adjustments,
        vec![(ClockField::Day, 1), (ClockField::Day, -1)]
    );
    assert!(rig.sink.contains(&AppEvent::ClockAdjusted {
        field: ClockField::Day,
        delta: 1
    }));
}

#[test]
fn config_edits_change_the_live_schedule() {
    let mut rig = Rig::new();
    let t0 = boot_time();

    rig.press(Button::Right, t0); // ConfigList
    rig.press(Button::Down, t0); // WateringDays
    rig.press(Button::Right, t0); // detail
    rig.press(Button::Up, t0);
    assert_eq!(rig.service.scheduler().config().days_between_watering, 5);

    // Back out via Home and verify the selection reset.
    rig.press(Button::Right, t0);
    assert_eq!(rig.service.menu().screen(), MenuScreen::Home);
}
