// Settings module
// Application configuration read from config.toml

use std::path::PathBuf;

use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use super::countdown::{LiveWindow, WeeklySlot};
use super::filter::TimeWindow;
use crate::error::ScheduleError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// JSON catalog of services and events. Relative paths resolve against
    /// the working directory.
    pub catalog_path: Option<PathBuf>,
    pub filter: FilterConfig,
    pub countdown: CountdownConfig,
    pub resend: ResendConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), ScheduleError> {
        self.filter.validate()?;
        self.countdown.validate()?;
        self.resend.validate()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Window name the listing starts with and resets to.
    pub default_window: String,
    /// Trailing months during which a past item can still be evaluated.
    pub eligibility_months: u32,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            default_window: TimeWindow::NextMonth.name().to_string(),
            eligibility_months: 3,
        }
    }
}

impl FilterConfig {
    pub fn default_window(&self) -> Result<TimeWindow, ScheduleError> {
        self.default_window
            .parse()
            .map_err(|_| ScheduleError::InvalidConfig(format!(
                "unknown filter.default_window `{}`",
                self.default_window
            )))
    }

    fn validate(&self) -> Result<(), ScheduleError> {
        self.default_window()?;
        if self.eligibility_months == 0 {
            return Err(ScheduleError::InvalidConfig(
                "filter.eligibility_months must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CountdownConfig {
    pub tick_seconds: u64,
    pub live_weekday: Weekday,
    pub live_start: NaiveTime,
    pub live_end: NaiveTime,
    pub service_weekday: Weekday,
    pub service_time: NaiveTime,
    /// Roll an elapsed recurring target forward to its next occurrence.
    pub rearm_on_elapse: bool,
    pub live_text: String,
    pub elapsed_text: String,
}

impl Default for CountdownConfig {
    fn default() -> Self {
        let live = LiveWindow::sunday_morning();
        Self {
            tick_seconds: 60,
            live_weekday: live.weekday,
            live_start: live.start,
            live_end: live.end,
            service_weekday: Weekday::Sun,
            service_time: live.start,
            rearm_on_elapse: true,
            live_text: "LIVE NOW".to_string(),
            elapsed_text: "Event Completed".to_string(),
        }
    }
}

impl CountdownConfig {
    pub fn live_window(&self) -> LiveWindow {
        LiveWindow::new(self.live_weekday, self.live_start, self.live_end)
    }

    pub fn service_slot(&self) -> WeeklySlot {
        WeeklySlot::new(self.service_weekday, self.service_time)
    }

    fn validate(&self) -> Result<(), ScheduleError> {
        if self.tick_seconds == 0 {
            return Err(ScheduleError::InvalidConfig(
                "countdown.tick_seconds must be at least 1".to_string(),
            ));
        }
        if self.live_end <= self.live_start {
            return Err(ScheduleError::InvalidConfig(format!(
                "countdown.live_end ({}) must be after live_start ({})",
                self.live_end, self.live_start
            )));
        }
        Ok(())
    }
}

/// Second-granularity "resend code" countdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResendConfig {
    pub duration_secs: u32,
    pub tick_millis: u64,
}

impl Default for ResendConfig {
    fn default() -> Self {
        Self {
            duration_secs: 60,
            tick_millis: 1000,
        }
    }
}

impl ResendConfig {
    fn validate(&self) -> Result<(), ScheduleError> {
        if self.duration_secs == 0 || self.tick_millis == 0 {
            return Err(ScheduleError::InvalidConfig(
                "resend.duration_secs and resend.tick_millis must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
