//! Frame construction for the 20x4 character LCD.
//!
//! Every screen produces a fixed [`Frame`] of four nullable lines; `None`
//! lines are rendered as 20 spaces by the display adapter so stale
//! characters from a previous screen can never survive. Lines longer than
//! the display are truncated at 20 columns.

use core::fmt::Write as _;

use chrono::NaiveDateTime;

use crate::scheduler::{WateringMode, WateringScheduler};

use super::{ConfigItem, StartStopNotice};

pub const FRAME_ROWS: usize = 4;
pub const FRAME_COLS: usize = 20;

/// One display line, bounded to the panel width.
pub type Line = heapless::String<FRAME_COLS>;

/// A full display refresh: four lines, `None` meaning "blank".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    pub lines: [Option<Line>; FRAME_ROWS],
}

impl Frame {
    pub fn new(lines: [Option<&str>; FRAME_ROWS]) -> Self {
        Self {
            lines: lines.map(|l| l.map(line)),
        }
    }
}

// ── Line helpers ──────────────────────────────────────────────

/// Truncate `s` to the display width.
pub fn line(s: &str) -> Line {
    let mut out = Line::new();
    for c in s.chars().take(FRAME_COLS) {
        let _ = out.push(c);
    }
    out
}

/// Centre `s` in the display width, padding with `fill`.
pub fn center_fill(s: &str, fill: char) -> Line {
    let len = s.chars().count().min(FRAME_COLS);
    let pad = FRAME_COLS - len;
    let left = pad / 2;

    let mut out = Line::new();
    for _ in 0..left {
        let _ = out.push(fill);
    }
    for c in s.chars().take(FRAME_COLS) {
        let _ = out.push(c);
    }
    for _ in 0..pad - left {
        let _ = out.push(fill);
    }
    out
}

/// Centre `s` with space padding.
pub fn center(s: &str) -> Line {
    center_fill(s, ' ')
}

// ── Screens ───────────────────────────────────────────────────

/// Home: clock, mode, and the relevant countdown.
pub fn home(now: NaiveDateTime, sched: &WateringScheduler) -> Frame {
    let clock = now.format("%d/%m/%Y %H:%M").to_string();
    let mode_line = format!("Mode {}", sched.mode().label());

    let mut frame = Frame::default();
    frame.lines[0] = Some(center(&clock));
    frame.lines[1] = Some(center(&mode_line));

    match sched.mode() {
        WateringMode::On => {
            frame.lines[2] = Some(line("! Arrosage infini ! "));
        }
        WateringMode::Off => {
            frame.lines[2] = Some(line("Arrosage desactive  "));
        }
        WateringMode::Auto if sched.is_ongoing() => {
            frame.lines[2] = Some(line("Arrosage en cours   "));
            frame.lines[3] = Some(center(&sched.end_watering_in(now)));
        }
        WateringMode::Auto => {
            frame.lines[2] = Some(line("Proch. arro. dans:  "));
            frame.lines[3] = Some(center(&sched.next_watering_in(now)));
        }
    }
    frame
}

/// Config list: a 3-row window over the items plus the key legend.
pub fn config_list(selected: usize) -> Frame {
    let window = visible_window(selected, ConfigItem::COUNT);

    let mut frame = Frame::default();
    for (row, idx) in window.into_iter().enumerate() {
        let label = ConfigItem::from_index(idx).label();
        frame.lines[row] = Some(if idx == selected {
            let marked = format!(">{}<", label);
            center_fill(&marked, '-')
        } else {
            center(label)
        });
    }
    frame.lines[3] = Some(line("<Home        Select>"));
    frame
}

/// The 3-row window over the config list keeping the selection visible:
/// interior selections are centred, the edges clamp.
pub fn visible_window(selected: usize, len: usize) -> [usize; 3] {
    if (1..len.saturating_sub(1)).contains(&selected) {
        [selected - 1, selected, selected + 1]
    } else if selected + 1 == len {
        [selected - 2, selected - 1, selected]
    } else {
        [0, 1, 2]
    }
}

/// Detail editor screen for one config item.
pub fn config_detail(
    item: ConfigItem,
    notice: Option<StartStopNotice>,
    now: NaiveDateTime,
    sched: &WateringScheduler,
) -> Frame {
    match item {
        ConfigItem::StartStop => start_stop_notice(notice),
        ConfigItem::WateringDays => {
            let value = format!("{} jours", sched.config().days_between_watering);
            detail_screen("Arrosage tous les", &value)
        }
        ConfigItem::StartTime => {
            let value = sched.config().start_time.to_string();
            detail_screen("Arrosage a partir de", &value)
        }
        ConfigItem::Duration => {
            let value = format!("{} min", sched.config().duration_minutes);
            detail_screen("Arrosage pendant", &value)
        }
        ConfigItem::Mode => mode_screen(sched.mode()),
        ConfigItem::SetDay => date_screen("Changement du jour", now, DateMark::Day),
        ConfigItem::SetMonth => date_screen("Changement du mois", now, DateMark::Month),
        ConfigItem::SetYear => date_screen("Changement de l'an", now, DateMark::Year),
        ConfigItem::SetHour => date_screen("Changement de l'heure", now, DateMark::Hour),
        ConfigItem::SetMinute => date_screen("Changement des min", now, DateMark::Minute),
    }
}

/// Emergency lock-out screen.
pub fn emergency() -> Frame {
    let mut frame = Frame::default();
    frame.lines[0] = Some(center("Urgence activee !"));
    frame.lines[2] = Some(center("Systeme desactive"));
    frame
}

// ── Detail building blocks ────────────────────────────────────

fn detail_screen(title: &str, value: &str) -> Frame {
    let mut frame = Frame::default();
    frame.lines[0] = Some(line(title));
    frame.lines[1] = Some(center(value));
    frame.lines[3] = Some(line("<Retour        Home>"));
    frame
}

fn mode_screen(current: WateringMode) -> Frame {
    let mut selector = String::new();
    for mode in WateringMode::ALL {
        if mode == current {
            let _ = write!(selector, " >{}< ", mode.label());
        } else {
            let _ = write!(selector, " {} ", mode.label().to_lowercase());
        }
    }

    let mut frame = Frame::default();
    frame.lines[0] = Some(line("Mode d'arrosage"));
    frame.lines[1] = Some(center(&selector));
    frame.lines[3] = Some(line("<Retour        Home>"));
    frame
}

/// Which date/time field is being edited (wrapped in `>`...`<`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DateMark {
    Day,
    Month,
    Year,
    Hour,
    Minute,
}

fn date_screen(title: &str, now: NaiveDateTime, mark: DateMark) -> Frame {
    let day = now.format("%d").to_string();
    let month = now.format("%m").to_string();
    let year = now.format("%Y").to_string();
    let hour = now.format("%H").to_string();
    let minute = now.format("%M").to_string();

    let date_line = match mark {
        DateMark::Day => format!(">{}</{}/{}", day, month, year),
        DateMark::Month => format!("{}/>{}</{}", day, month, year),
        DateMark::Year => format!("{}/{}/>{}<", day, month, year),
        _ => format!("{}/{}/{}", day, month, year),
    };
    let time_line = match mark {
        DateMark::Hour => format!(">{}<:{}", hour, minute),
        DateMark::Minute => format!("{}:>{}<", hour, minute),
        _ => format!("{}:{}", hour, minute),
    };

    let mut frame = Frame::default();
    frame.lines[0] = Some(line(title));
    frame.lines[1] = Some(center(&date_line));
    frame.lines[2] = Some(center(&time_line));
    frame.lines[3] = Some(line("<Retour        Home>"));
    frame
}

fn start_stop_notice(notice: Option<StartStopNotice>) -> Frame {
    match notice {
        Some(StartStopNotice::CannotStopModeOn) => Frame::new([
            Some("Impossible d'arreter"),
            Some("l'arrosage en cours"),
            Some(&center("Mode ON active")),
            None,
        ]),
        Some(StartStopNotice::Stopping) => Frame::new([
            None,
            Some(&center("Arret de l'arrosage")),
            Some(&center("en cours...")),
            None,
        ]),
        Some(StartStopNotice::CannotStartModeOff) => Frame::new([
            Some("Impossible d'allumer"),
            Some("l'arrosage"),
            Some(&center("Mode OFF active")),
            None,
        ]),
        Some(StartStopNotice::Starting) => Frame::new([
            None,
            Some(&center("Demarrage de")),
            Some(&center("l'arrosage en cours.")),
            None,
        ]),
        // Notice expires a tick before the auto-return; keep the screen blank.
        None => Frame::default(),
    }
}
