//! Simulated clock - advances on the needs-tick, derives hour-of-day,
//! day-of-week, day/night flags, and sleep-window membership.

use serde::Serialize;

pub const MINUTES_PER_DAY: u32 = 24 * 60;

const DAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

#[derive(Debug, Clone, Serialize)]
pub struct Clock {
    /// Total simulated minutes since the simulation started
    pub elapsed_minutes: f64,
    /// Simulated minutes gained per needs-tick, divided by 60
    pub speed_multiplier: f64,
    /// Minute-of-day at which going to bed is requested (not forced)
    pub bedtime_minute: u32,
    /// Minute-of-day at which a sleeper wakes
    pub waketime_minute: u32,
}

impl Clock {
    pub fn new(
        start_minute: u32,
        speed_multiplier: f64,
        bedtime_minute: u32,
        waketime_minute: u32,
    ) -> Self {
        Self {
            elapsed_minutes: f64::from(start_minute),
            speed_multiplier,
            bedtime_minute,
            waketime_minute,
        }
    }

    /// Advance one needs-tick
    pub fn advance(&mut self) {
        self.elapsed_minutes += self.speed_multiplier / 60.0;
    }

    pub fn minute_of_day(&self) -> u32 {
        (self.elapsed_minutes as u64 % u64::from(MINUTES_PER_DAY)) as u32
    }

    pub fn hour_of_day(&self) -> u32 {
        ((self.elapsed_minutes / 60.0) as u64 % 24) as u32
    }

    pub fn day_of_week(&self) -> u32 {
        ((self.elapsed_minutes / f64::from(MINUTES_PER_DAY)) as u64 % 7) as u32
    }

    pub fn day_name(&self) -> &'static str {
        DAY_NAMES[self.day_of_week() as usize]
    }

    /// Night spans 22:00 through 06:00
    pub fn is_night(&self) -> bool {
        let hour = self.hour_of_day();
        hour >= 22 || hour < 6
    }

    /// Needs decay at half rate at night
    pub fn night_multiplier(&self) -> f32 {
        if self.is_night() {
            0.5
        } else {
            1.0
        }
    }

    /// True once the current minute-of-day has passed bedtime
    pub fn bedtime_due(&self) -> bool {
        self.minute_of_day() >= self.bedtime_minute
    }

    /// True inside the waking window: at or past waketime but before bedtime
    pub fn wake_due(&self) -> bool {
        let minute = self.minute_of_day();
        minute >= self.waketime_minute && minute < self.bedtime_minute
    }
}

impl Default for Clock {
    fn default() -> Self {
        // 08:00 start, one simulated minute per needs-tick, bed at 22:30,
        // wake at 07:00
        Self::new(8 * 60, 60.0, 22 * 60 + 30, 7 * 60)
    }
}
