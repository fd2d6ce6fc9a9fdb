//! One-shot hardware peripheral initialization.
//!
//! Configures GPIO directions and registers the button interrupt handlers
//! using raw ESP-IDF sys calls. Called once from `main()` before the
//! control loop starts.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::info;

use crate::pins;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    GpioConfigFailed(i32),
    IsrInstallFailed(i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::GpioConfigFailed(rc) => write!(f, "GPIO config failed (rc={})", rc),
            Self::IsrInstallFailed(rc) => write!(f, "GPIO ISR service install failed (rc={})", rc),
        }
    }
}

#[cfg(target_os = "espidf")]
pub fn init_peripherals() -> Result<(), HwInitError> {
    // SAFETY: Called once from main() before the control loop; single-threaded.
    unsafe {
        init_gpio_outputs()?;
        init_gpio_inputs()?;
    }
    info!("hw_init: all peripherals configured");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_peripherals() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): peripheral init skipped");
    Ok(())
}

// ── GPIO Outputs ──────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_gpio_outputs() -> Result<(), HwInitError> {
    let output_pins = [
        pins::RELAY_GPIO,
        pins::LED_GREEN_GPIO,
        pins::LED_RED_GPIO,
        pins::LCD_RS_GPIO,
        pins::LCD_EN_GPIO,
        pins::LCD_D4_GPIO,
        pins::LCD_D5_GPIO,
        pins::LCD_D6_GPIO,
        pins::LCD_D7_GPIO,
        pins::LCD_BACKLIGHT_GPIO,
    ];

    for &pin in &output_pins {
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pin,
            mode: gpio_mode_t_GPIO_MODE_OUTPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
        };
        let ret = unsafe { gpio_config(&cfg) };
        if ret != ESP_OK as i32 {
            return Err(HwInitError::GpioConfigFailed(ret));
        }
        // Everything starts released/dark; the valve must never open on boot.
        unsafe { gpio_set_level(pin, 0) };
    }

    info!("hw_init: GPIO outputs configured");
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn gpio_write(pin: i32, high: bool) {
    // SAFETY: gpio_set_level writes to an already-configured output pin;
    // pin was validated during init_gpio_outputs().
    unsafe {
        gpio_set_level(pin, if high { 1 } else { 0 });
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_write(_pin: i32, _high: bool) {}

// ── GPIO Inputs (buttons) ─────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_gpio_inputs() -> Result<(), HwInitError> {
    let button_pins = [
        pins::BTN_LEFT_GPIO,
        pins::BTN_RIGHT_GPIO,
        pins::BTN_UP_GPIO,
        pins::BTN_DOWN_GPIO,
        pins::BTN_EMERGENCY_GPIO,
    ];

    for &pin in &button_pins {
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pin,
            mode: gpio_mode_t_GPIO_MODE_INPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_ENABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_NEGEDGE,
        };
        let ret = unsafe { gpio_config(&cfg) };
        if ret != ESP_OK as i32 {
            return Err(HwInitError::GpioConfigFailed(ret));
        }
    }

    info!("hw_init: button inputs configured");
    Ok(())
}

// ── GPIO ISR Service ──────────────────────────────────────────

#[cfg(target_os = "espidf")]
use crate::drivers::buttons::isr_edge;
#[cfg(target_os = "espidf")]
use crate::events::Button;

#[cfg(target_os = "espidf")]
fn isr_now_ms() -> u32 {
    // SAFETY: esp_timer_get_time is a counter read; safe in ISR context.
    ((unsafe { esp_timer_get_time() }) / 1_000) as u32
}

#[cfg(target_os = "espidf")]
unsafe extern "C" fn left_gpio_isr(_arg: *mut core::ffi::c_void) {
    isr_edge(Button::Left, isr_now_ms());
}

#[cfg(target_os = "espidf")]
unsafe extern "C" fn right_gpio_isr(_arg: *mut core::ffi::c_void) {
    isr_edge(Button::Right, isr_now_ms());
}

#[cfg(target_os = "espidf")]
unsafe extern "C" fn up_gpio_isr(_arg: *mut core::ffi::c_void) {
    isr_edge(Button::Up, isr_now_ms());
}

#[cfg(target_os = "espidf")]
unsafe extern "C" fn down_gpio_isr(_arg: *mut core::ffi::c_void) {
    isr_edge(Button::Down, isr_now_ms());
}

#[cfg(target_os = "espidf")]
unsafe extern "C" fn emergency_gpio_isr(_arg: *mut core::ffi::c_void) {
    isr_edge(Button::Emergency, isr_now_ms());
}

/// Install the per-pin GPIO ISR service and register the button handlers.
/// Call after init_peripherals() and before the control loop.
#[cfg(target_os = "espidf")]
pub fn init_isr_service() -> Result<(), HwInitError> {
    type IsrFn = unsafe extern "C" fn(*mut core::ffi::c_void);

    let handlers: [(i32, IsrFn); 5] = [
        (pins::BTN_LEFT_GPIO, left_gpio_isr),
        (pins::BTN_RIGHT_GPIO, right_gpio_isr),
        (pins::BTN_UP_GPIO, up_gpio_isr),
        (pins::BTN_DOWN_GPIO, down_gpio_isr),
        (pins::BTN_EMERGENCY_GPIO, emergency_gpio_isr),
    ];

    // SAFETY: gpio_install_isr_service is idempotent; ESP_ERR_INVALID_STATE
    // means it was already installed (acceptable). The handlers registered
    // below only touch atomics and the lock-free event queue.
    unsafe {
        let ret = gpio_install_isr_service(0);
        if ret != ESP_OK && ret != ESP_ERR_INVALID_STATE {
            return Err(HwInitError::IsrInstallFailed(ret));
        }

        for (pin, handler) in handlers {
            gpio_set_intr_type(pin, gpio_int_type_t_GPIO_INTR_NEGEDGE);
            gpio_isr_handler_add(pin, Some(handler), core::ptr::null_mut());
            gpio_intr_enable(pin);
        }

        info!("hw_init: ISR service installed (5 buttons)");
    }
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_isr_service() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): ISR service skipped");
    Ok(())
}
