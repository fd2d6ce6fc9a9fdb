//! GPIO pin assignments for the watering controller board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers. Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// Valve relay
// ---------------------------------------------------------------------------

/// Digital output driving the watering valve relay (active HIGH).
pub const RELAY_GPIO: i32 = 4;

// ---------------------------------------------------------------------------
// Indicator LEDs
// ---------------------------------------------------------------------------

/// Green indicator — blinks while a watering cycle runs.
pub const LED_GREEN_GPIO: i32 = 8;
/// Red indicator — blinks while the emergency override is active.
pub const LED_RED_GPIO: i32 = 7;

// ---------------------------------------------------------------------------
// Buttons (active-low momentary switches with internal pull-ups)
// ---------------------------------------------------------------------------

pub const BTN_RIGHT_GPIO: i32 = 14;
pub const BTN_LEFT_GPIO: i32 = 15;
pub const BTN_DOWN_GPIO: i32 = 18;
pub const BTN_UP_GPIO: i32 = 23;
/// Emergency stop button — longer debounce window than the navigation keys.
pub const BTN_EMERGENCY_GPIO: i32 = 24;

// ---------------------------------------------------------------------------
// Character LCD (HD44780, 4-bit bus, 20 columns x 4 rows)
// ---------------------------------------------------------------------------

pub const LCD_RS_GPIO: i32 = 38;
pub const LCD_EN_GPIO: i32 = 39;
pub const LCD_D4_GPIO: i32 = 40;
pub const LCD_D5_GPIO: i32 = 41;
pub const LCD_D6_GPIO: i32 = 42;
pub const LCD_D7_GPIO: i32 = 45;
/// Backlight transistor gate (active HIGH).
pub const LCD_BACKLIGHT_GPIO: i32 = 48;
