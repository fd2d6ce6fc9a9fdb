//! HD44780 character LCD adapter (20x4, 4-bit bus).
//!
//! Implements [`DisplayPort`] over the `hd44780-driver` crate. The bus
//! pins are tiny newtypes around the raw `hw_init` GPIO helpers, so the
//! LCD shares the one-shot peripheral initialisation with everything
//! else. Write failures are logged and swallowed — the UI contract has
//! no recoverable display errors.
//!
//! Frame lines are padded to the full 20 columns (blank lines become all
//! spaces) so every refresh fully overwrites the previous content.

#[cfg(target_os = "espidf")]
mod esp_impl {
    use core::convert::Infallible;
    use std::time::Duration;

    use embedded_hal::blocking::delay::{DelayMs, DelayUs};
    use embedded_hal::digital::v2::OutputPin;
    use hd44780_driver::bus::FourBitBus;
    use hd44780_driver::{Cursor, CursorBlink, Display, DisplayMode, HD44780};
    use log::warn;

    use crate::app::ports::DisplayPort;
    use crate::drivers::hw_init;
    use crate::error::{Error, Result};
    use crate::menu::render::{FRAME_COLS, Frame};
    use crate::pins;

    /// DDRAM row start addresses for a 20x4 panel.
    const ROW_OFFSETS: [u8; 4] = [0x00, 0x40, 0x14, 0x54];

    /// One LCD bus pin, driven through the shared GPIO helpers.
    pub struct LcdPin(i32);

    impl OutputPin for LcdPin {
        type Error = Infallible;

        fn set_low(&mut self) -> core::result::Result<(), Infallible> {
            hw_init::gpio_write(self.0, false);
            Ok(())
        }

        fn set_high(&mut self) -> core::result::Result<(), Infallible> {
            hw_init::gpio_write(self.0, true);
            Ok(())
        }
    }

    /// Blocking delay for the HD44780 timing requirements.
    pub struct LcdDelay;

    impl DelayUs<u16> for LcdDelay {
        fn delay_us(&mut self, us: u16) {
            std::thread::sleep(Duration::from_micros(us as u64));
        }
    }

    impl DelayMs<u8> for LcdDelay {
        fn delay_ms(&mut self, ms: u8) {
            std::thread::sleep(Duration::from_millis(ms as u64));
        }
    }

    type Lcd = HD44780<FourBitBus<LcdPin, LcdPin, LcdPin, LcdPin, LcdPin, LcdPin>>;

    pub struct Hd44780Display {
        lcd: Lcd,
        delay: LcdDelay,
        powered: bool,
    }

    impl Hd44780Display {
        /// Bring the panel up: 4-bit init, cleared, cursor hidden,
        /// backlight on.
        pub fn new() -> Result<Self> {
            let mut delay = LcdDelay;
            let mut lcd = HD44780::new_4bit(
                LcdPin(pins::LCD_RS_GPIO),
                LcdPin(pins::LCD_EN_GPIO),
                LcdPin(pins::LCD_D4_GPIO),
                LcdPin(pins::LCD_D5_GPIO),
                LcdPin(pins::LCD_D6_GPIO),
                LcdPin(pins::LCD_D7_GPIO),
                &mut delay,
            )
            .map_err(|_| Error::Display("4-bit init failed"))?;

            lcd.reset(&mut delay)
                .map_err(|_| Error::Display("reset failed"))?;
            lcd.clear(&mut delay)
                .map_err(|_| Error::Display("clear failed"))?;
            lcd.set_display_mode(
                DisplayMode {
                    display: Display::On,
                    cursor_visibility: Cursor::Invisible,
                    cursor_blink: CursorBlink::Off,
                },
                &mut delay,
            )
            .map_err(|_| Error::Display("display mode failed"))?;

            hw_init::gpio_write(pins::LCD_BACKLIGHT_GPIO, true);

            Ok(Self {
                lcd,
                delay: LcdDelay,
                powered: true,
            })
        }

        fn write_row(&mut self, row: usize, text: &str) {
            let mut padded = std::string::String::with_capacity(FRAME_COLS);
            for c in text.chars().take(FRAME_COLS) {
                padded.push(c);
            }
            while padded.chars().count() < FRAME_COLS {
                padded.push(' ');
            }

            if self
                .lcd
                .set_cursor_pos(ROW_OFFSETS[row], &mut self.delay)
                .and_then(|()| self.lcd.write_str(&padded, &mut self.delay))
                .is_err()
            {
                warn!("lcd: row {} write failed", row);
            }
        }
    }

    impl DisplayPort for Hd44780Display {
        fn write_frame(&mut self, frame: &Frame) {
            if !self.powered {
                return;
            }
            for (row, line) in frame.lines.iter().enumerate() {
                match line {
                    Some(text) => self.write_row(row, text),
                    None => self.write_row(row, ""),
                }
            }
        }

        fn set_powered(&mut self, on: bool) {
            if self.powered == on {
                return;
            }
            self.powered = on;

            let mode = DisplayMode {
                display: if on { Display::On } else { Display::Off },
                cursor_visibility: Cursor::Invisible,
                cursor_blink: CursorBlink::Off,
            };
            if self.lcd.set_display_mode(mode, &mut self.delay).is_err() {
                warn!("lcd: display power change failed");
            }
            hw_init::gpio_write(pins::LCD_BACKLIGHT_GPIO, on);
        }
    }
}

#[cfg(target_os = "espidf")]
pub use esp_impl::Hd44780Display;
