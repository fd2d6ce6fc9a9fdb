//! Menu navigation flows observed through the rendered frames.

use chrono::{Duration, NaiveDate, NaiveDateTime};

use arrosoir::app::service::WateringService;
use arrosoir::config::WateringConfig;
use arrosoir::events::Button;
use arrosoir::menu::MenuScreen;
use arrosoir::menu::render::FRAME_COLS;

use crate::mock_hw::{MockDisplay, MockHardware, MockSystemClock, RecordingSink};

fn boot_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 6, 1)
        .unwrap()
        .and_hms_opt(9, 0, 0)
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
        Self {
            service: WateringService::new(WateringConfig::default(), boot_time()),
            hw: MockHardware::new(),
            display: MockDisplay::new(),
            sysclock: MockSystemClock::new(),
            sink: RecordingSink::new(),
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

    fn rendered_line(&self, row: usize) -> String {
        self.display
            .last_frame()
            .and_then(|f| f.lines[row].as_ref())
            .map(|l| l.to_string())
            .unwrap_or_default()
    }
}

#[test]
fn every_rendered_line_fits_the_panel() {
    let mut rig = Rig::new();
    let t0 = boot_time();

    // Walk a representative set of screens.
    rig.tick(t0);
    rig.press(Button::Right, t0);
    rig.tick(t0);
    rig.press(Button::Down, t0);
    rig.press(Button::Right, t0);
    rig.tick(t0);

    for frame in &rig.display.frames {
        for line in frame.lines.iter().flatten() {
            assert!(line.chars().count() <= FRAME_COLS);
        }
    }
}

#[test]
fn config_list_window_follows_the_selection_to_the_end() {
    let mut rig = Rig::new();
    let t0 = boot_time();

    rig.press(Button::Right, t0);
    // Wrap upward to the last of the 10 items.
    rig.press(Button::Up, t0);
    rig.tick(t0);

    // Window clamps to the last three items, selection marked on row 2.
    assert!(rig.rendered_line(0).contains("Changer l'annee"));
    assert!(rig.rendered_line(1).contains("Changer l'heure"));
    assert!(rig.rendered_line(2).contains(">Changer les min<"));
    assert!(rig.rendered_line(3).starts_with("<Home"));
}

#[test]
fn start_stop_notice_returns_home_after_five_seconds() {
    let mut rig = Rig::new();
    let t0 = boot_time();

    rig.press(Button::Right, t0);
    rig.press(Button::Right, t0); // StartStop detail, watering starts
    assert_eq!(rig.service.menu().screen(), MenuScreen::ConfigDetail);

    rig.tick(t0);
    assert!(rig.rendered_line(1).contains("Demarrage de"));

    // 10 ticks at 500 ms = the 5 s notice window.
    for i in 1..=10 {
        rig.tick(t0 + Duration::milliseconds(500 * i));
    }
    assert_eq!(rig.service.menu().screen(), MenuScreen::Home);
}

#[test]
fn emergency_screen_is_rendered_while_active() {
    let mut rig = Rig::new();
    let t0 = boot_time();

    rig.press(Button::Emergency, t0);
    rig.tick(t0);
    assert!(rig.rendered_line(0).contains("Urgence activee !"));
    assert!(rig.rendered_line(2).contains("Systeme desactive"));
}

#[test]
fn home_screen_shows_clock_mode_and_countdown() {
    let mut rig = Rig::new();
    let t0 = boot_time();

    rig.tick(t0); // watering starts immediately (never watered)
    assert!(rig.rendered_line(0).contains("01/06/2024 09:00"));
    assert!(rig.rendered_line(1).contains("Mode AUTO"));
    assert!(rig.rendered_line(2).contains("Proch. arro. dans:"));
}
