//! Two-level menu state machine.
//!
//! Screens are a closed tagged union dispatched by `match` — no closures,
//! no dynamic dispatch. The navigator mutates the scheduler's config
//! directly for value edits and reports the side effects it cannot
//! perform itself (watering start/stop, system-clock adjustment) back to
//! the service as a [`MenuAction`].
//!
//! ```text
//!          right            right             right
//!  HOME ─────────▶ CONFIG ─────────▶ DETAIL ─────────▶ HOME
//!   ▲ │    left      LIST    left      (item)
//!   └─┘ (left on Home stays)   ◀─────────┘
//!
//!  up/down: list selection (wraps) │ field edit (in a detail screen)
//!  EMERGENCY screen is forced out-of-band and locks navigation out.
//! ```

pub mod render;

use chrono::NaiveDateTime;

use crate::app::ports::ClockField;
use crate::events::Button;
use crate::scheduler::{WateringMode, WateringScheduler};

use render::Frame;

// ---------------------------------------------------------------------------
// Screens and items
// ---------------------------------------------------------------------------

/// Main menu screens, in the left/right cycling order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum MenuScreen {
    Home = 0,
    ConfigList = 1,
    ConfigDetail = 2,
    Emergency = 3,
}

/// The closed, ordered list of configurable items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ConfigItem {
    StartStop = 0,
    WateringDays = 1,
    StartTime = 2,
    Duration = 3,
    Mode = 4,
    SetDay = 5,
    SetMonth = 6,
    SetYear = 7,
    SetHour = 8,
    SetMinute = 9,
}

impl ConfigItem {
    pub const COUNT: usize = 10;

    pub fn from_index(idx: usize) -> Self {
        match idx {
            0 => Self::StartStop,
            1 => Self::WateringDays,
            2 => Self::StartTime,
            3 => Self::Duration,
            4 => Self::Mode,
            5 => Self::SetDay,
            6 => Self::SetMonth,
            7 => Self::SetYear,
            8 => Self::SetHour,
            _ => Self::SetMinute,
        }
    }

    /// List label (20-column budget).
    pub fn label(self) -> &'static str {
        match self {
            Self::StartStop => "Demarrer/Arreter",
            Self::WateringDays => "Jours d'arro.",
            Self::StartTime => "Heure de debut",
            Self::Duration => "Duree d'arro.",
            Self::Mode => "Mode d'arro.",
            Self::SetDay => "Changer le jour",
            Self::SetMonth => "Changer le mois",
            Self::SetYear => "Changer l'annee",
            Self::SetHour => "Changer l'heure",
            Self::SetMinute => "Changer les min",
        }
    }
}

/// Outcome screen shown after entering the start/stop item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartStopNotice {
    CannotStopModeOn,
    Stopping,
    CannotStartModeOff,
    Starting,
}

/// Side effects the navigator asks the service to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    None,
    /// Begin a watering cycle (start/stop item, nothing running).
    StartWatering,
    /// End the running watering cycle (start/stop item).
    StopWatering,
    /// Nudge one field of the OS clock by ±1 (date/time editors).
    AdjustClock(ClockField, i8),
}

/// Ticks the start/stop notice stays up before auto-returning Home
/// (5 s at the 500 ms control tick).
const NOTICE_TICKS: u8 = 10;

// ---------------------------------------------------------------------------
// Navigator
// ---------------------------------------------------------------------------

pub struct MenuNavigator {
    screen: MenuScreen,
    /// Selected index in the config submenu.
    selected: usize,
    notice: Option<StartStopNotice>,
    notice_ticks_left: u8,
}

impl MenuNavigator {
    pub fn new() -> Self {
        Self {
            screen: MenuScreen::Home,
            selected: 0,
            notice: None,
            notice_ticks_left: 0,
        }
    }

    pub fn screen(&self) -> MenuScreen {
        self.screen
    }

    pub fn selected_item(&self) -> ConfigItem {
        ConfigItem::from_index(self.selected)
    }

    /// Back to the home screen; the submenu selection resets with it.
    pub fn reset_home(&mut self) {
        self.screen = MenuScreen::Home;
        self.selected = 0;
        self.notice = None;
        self.notice_ticks_left = 0;
    }

    /// Jump to the emergency screen (out-of-band, emergency controller only).
    pub fn force_emergency(&mut self) {
        self.screen = MenuScreen::Emergency;
        self.notice = None;
        self.notice_ticks_left = 0;
    }

    /// Per-tick housekeeping: counts the start/stop notice down and
    /// auto-returns Home when it expires.
    pub fn tick(&mut self) {
        if self.notice.is_some() {
            self.notice_ticks_left = self.notice_ticks_left.saturating_sub(1);
            if self.notice_ticks_left == 0 {
                self.reset_home();
            }
        }
    }

    /// Handle one debounced button press. The emergency button never
    /// reaches this — it is routed to the emergency controller upstream.
    pub fn handle_button(&mut self, button: Button, sched: &mut WateringScheduler) -> MenuAction {
        match button {
            Button::Left => {
                self.navigate_left();
                MenuAction::None
            }
            Button::Right => self.navigate_right(sched),
            Button::Up => self.edit(sched, true),
            Button::Down => self.edit(sched, false),
            Button::Emergency => MenuAction::None,
        }
    }

    /// Render the active screen.
    pub fn render(&self, now: NaiveDateTime, sched: &WateringScheduler) -> Frame {
        match self.screen {
            MenuScreen::Home => render::home(now, sched),
            MenuScreen::ConfigList => render::config_list(self.selected),
            MenuScreen::ConfigDetail => {
                render::config_detail(self.selected_item(), self.notice, now, sched)
            }
            MenuScreen::Emergency => render::emergency(),
        }
    }

    // ── Navigation ────────────────────────────────────────────

    fn navigate_left(&mut self) {
        match self.screen {
            MenuScreen::Home | MenuScreen::Emergency => {}
            MenuScreen::ConfigList => self.reset_home(),
            MenuScreen::ConfigDetail => {
                // "<Retour" — back to the list, selection kept.
                self.screen = MenuScreen::ConfigList;
                self.notice = None;
                self.notice_ticks_left = 0;
            }
        }
    }

    fn navigate_right(&mut self, sched: &mut WateringScheduler) -> MenuAction {
        match self.screen {
            MenuScreen::Home => {
                self.screen = MenuScreen::ConfigList;
                MenuAction::None
            }
            MenuScreen::ConfigList => self.enter_detail(sched),
            // "Home>" — the cycle wraps back to the home screen.
            MenuScreen::ConfigDetail => {
                self.reset_home();
                MenuAction::None
            }
            MenuScreen::Emergency => MenuAction::None,
        }
    }

    /// Enter the detail screen for the selected item. The start/stop item
    /// acts immediately: its outcome notice is computed from the scheduler
    /// state *before* the action runs, held for 5 s, then Home.
    fn enter_detail(&mut self, sched: &mut WateringScheduler) -> MenuAction {
        self.screen = MenuScreen::ConfigDetail;

        if self.selected_item() != ConfigItem::StartStop {
            return MenuAction::None;
        }

        let (notice, action) = if sched.is_ongoing() {
            if sched.mode() == WateringMode::On {
                (StartStopNotice::CannotStopModeOn, MenuAction::None)
            } else {
                (StartStopNotice::Stopping, MenuAction::StopWatering)
            }
        } else if sched.mode() == WateringMode::Off {
            (StartStopNotice::CannotStartModeOff, MenuAction::None)
        } else {
            (StartStopNotice::Starting, MenuAction::StartWatering)
        };

        self.notice = Some(notice);
        self.notice_ticks_left = NOTICE_TICKS;
        action
    }

    // ── Value editing ─────────────────────────────────────────

    fn edit(&mut self, sched: &mut WateringScheduler, up: bool) -> MenuAction {
        match self.screen {
            MenuScreen::ConfigList => {
                self.move_selection(up);
                MenuAction::None
            }
            MenuScreen::ConfigDetail => self.edit_item(sched, up),
            MenuScreen::Home | MenuScreen::Emergency => MenuAction::None,
        }
    }

    fn move_selection(&mut self, up: bool) {
        self.selected = if up {
            if self.selected > 0 {
                self.selected - 1
            } else {
                ConfigItem::COUNT - 1
            }
        } else if self.selected < ConfigItem::COUNT - 1 {
            self.selected + 1
        } else {
            0
        };
    }

    fn edit_item(&mut self, sched: &mut WateringScheduler, up: bool) -> MenuAction {
        let delta: i8 = if up { 1 } else { -1 };
        match self.selected_item() {
            ConfigItem::StartStop => MenuAction::None,
            ConfigItem::WateringDays => {
                if up {
                    sched.config_mut().increment_days();
                } else {
                    sched.config_mut().decrement_days();
                }
                MenuAction::None
            }
            ConfigItem::StartTime => {
                if up {
                    sched.config_mut().start_time.step_forward();
                } else {
                    sched.config_mut().start_time.step_back();
                }
                MenuAction::None
            }
            ConfigItem::Duration => {
                if up {
                    sched.config_mut().increment_duration();
                } else {
                    sched.config_mut().decrement_duration();
                }
                MenuAction::None
            }
            ConfigItem::Mode => {
                if up {
                    sched.cycle_mode_next();
                } else {
                    sched.cycle_mode_prev();
                }
                MenuAction::None
            }
            ConfigItem::SetDay => MenuAction::AdjustClock(ClockField::Day, delta),
            ConfigItem::SetMonth => MenuAction::AdjustClock(ClockField::Month, delta),
            ConfigItem::SetYear => MenuAction::AdjustClock(ClockField::Year, delta),
            ConfigItem::SetHour => MenuAction::AdjustClock(ClockField::Hour, delta),
            ConfigItem::SetMinute => MenuAction::AdjustClock(ClockField::Minute, delta),
        }
    }
}
