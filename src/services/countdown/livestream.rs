use chrono::{DateTime, Local};

use crate::models::countdown::LiveWindow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LivestreamStatus {
    Live,
    Offline,
}

impl LivestreamStatus {
    pub fn label(&self) -> &'static str {
        match self {
            LivestreamStatus::Live => "LIVE NOW",
            LivestreamStatus::Offline => "Offline",
        }
    }
}

/// Livestream badge state; there is no stream API, the schedule decides.
pub fn livestream_status(now: DateTime<Local>, window: &LiveWindow) -> LivestreamStatus {
    if window.contains(now) {
        LivestreamStatus::Live
    } else {
        LivestreamStatus::Offline
    }
}
