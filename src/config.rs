//! System configuration parameters.
//!
//! All tunable parameters for the watering controller. Values are
//! memory-only: they reset to these defaults on every power cycle and are
//! mutated exclusively through the stepping methods below, which enforce
//! the range invariants (the config submenu is their only caller).

/// Watering start time of day, stepped in 10-minute increments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartTime {
    /// Hour of day (0-23).
    pub hour: u8,
    /// Minute (0-59, always a multiple of 10).
    pub minute: u8,
}

impl StartTime {
    /// Step forward by 10 minutes, wrapping 23:50 -> 00:00.
    pub fn step_forward(&mut self) {
        if self.hour == 23 && self.minute == 50 {
            self.hour = 0;
            self.minute = 0;
        } else if self.minute == 50 {
            self.hour += 1;
            self.minute = 0;
        } else {
            self.minute += 10;
        }
    }

    /// Step back by 10 minutes, wrapping 00:00 -> 23:50.
    pub fn step_back(&mut self) {
        if self.hour == 0 && self.minute == 0 {
            self.hour = 23;
            self.minute = 50;
        } else if self.minute == 0 {
            self.hour -= 1;
            self.minute = 50;
        } else {
            self.minute -= 10;
        }
    }

    pub fn to_naive_time(self) -> chrono::NaiveTime {
        chrono::NaiveTime::from_hms_opt(self.hour as u32, self.minute as u32, 0)
            .unwrap_or(chrono::NaiveTime::MIN)
    }
}

impl core::fmt::Display for StartTime {
    /// Renders as `23h00`.
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:02}h{:02}", self.hour, self.minute)
    }
}

/// Core system configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WateringConfig {
    // --- Schedule ---
    /// Days between two waterings (1-7).
    pub days_between_watering: u8,
    /// Time of day at which a scheduled watering starts.
    pub start_time: StartTime,
    /// Watering duration in minutes (>= 10, stepped by 10).
    pub duration_minutes: u16,

    // --- Timing ---
    /// Control loop interval (milliseconds).
    pub control_loop_interval_ms: u32,
    /// Display switches off after this much inactivity (seconds).
    pub display_timeout_secs: u32,
}

impl Default for WateringConfig {
    fn default() -> Self {
        Self {
            days_between_watering: 4,
            start_time: StartTime { hour: 23, minute: 0 },
            duration_minutes: 60,

            control_loop_interval_ms: 500,
            display_timeout_secs: 300, // 5 min
        }
    }
}

impl WateringConfig {
    /// Add one day to the interval, wrapping 7 -> 1.
    pub fn increment_days(&mut self) {
        self.days_between_watering = if self.days_between_watering < 7 {
            self.days_between_watering + 1
        } else {
            1
        };
    }

    /// Remove one day from the interval, wrapping 1 -> 7.
    pub fn decrement_days(&mut self) {
        self.days_between_watering = if self.days_between_watering > 1 {
            self.days_between_watering - 1
        } else {
            7
        };
    }

    /// Add 10 minutes to the watering duration.
    pub fn increment_duration(&mut self) {
        self.duration_minutes = self.duration_minutes.saturating_add(10);
    }

    /// Remove 10 minutes from the duration. No-op at the 10-minute floor.
    pub fn decrement_duration(&mut self) {
        if self.duration_minutes > 10 {
            self.duration_minutes -= 10;
        }
    }
}
