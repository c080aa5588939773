use chrono::{DateTime, Duration, Local};

use crate::models::countdown::{CountdownSnapshot, CountdownState, CountdownTarget};
use crate::models::settings::CountdownConfig;

pub const DEFAULT_LIVE_TEXT: &str = "LIVE NOW";
pub const DEFAULT_ELAPSED_TEXT: &str = "Event Completed";
pub const CARD_PENDING_PREFIX: &str = "Starts in";
pub const CARD_STARTED_TEXT: &str = "Event is live!";

/// Recomputes the countdown display for one target on every tick.
#[derive(Debug, Clone)]
pub struct CountdownEngine {
    target: CountdownTarget,
    rearm_on_elapse: bool,
    live_text: String,
    elapsed_text: String,
    last_state: Option<CountdownState>,
}

impl CountdownEngine {
    pub fn new(target: CountdownTarget) -> Self {
        Self {
            target,
            rearm_on_elapse: true,
            live_text: DEFAULT_LIVE_TEXT.to_string(),
            elapsed_text: DEFAULT_ELAPSED_TEXT.to_string(),
            last_state: None,
        }
    }

    /// Engine for the weekly service described by `config`, counting down to
    /// the next occurrence after `now`.
    pub fn from_config(config: &CountdownConfig, now: DateTime<Local>) -> Self {
        let target =
            CountdownTarget::next_weekly(now, config.service_slot(), Some(config.live_window()));
        Self::new(target)
            .with_rearm(config.rearm_on_elapse)
            .with_texts(config.live_text.clone(), config.elapsed_text.clone())
    }

    pub fn with_rearm(mut self, rearm_on_elapse: bool) -> Self {
        self.rearm_on_elapse = rearm_on_elapse;
        self
    }

    pub fn with_texts(mut self, live_text: impl Into<String>, elapsed_text: impl Into<String>) -> Self {
        self.live_text = live_text.into();
        self.elapsed_text = elapsed_text.into();
        self
    }

    pub fn target(&self) -> &CountdownTarget {
        &self.target
    }

    pub fn last_state(&self) -> Option<CountdownState> {
        self.last_state
    }

    /// Evaluate the countdown at `now`.
    ///
    /// The live window wins over everything else. An elapsed recurring target
    /// is rolled forward when re-arming is on, and the tick then reports the
    /// new target as pending.
    pub fn tick(&mut self, now: DateTime<Local>) -> CountdownSnapshot {
        let (state, display_text) = if self.target.is_live(now) {
            (CountdownState::Live, self.live_text.clone())
        } else if now < self.target.target_time {
            (
                CountdownState::Pending,
                format_remaining(self.target.target_time - now),
            )
        } else if self.rearm_on_elapse && self.target.advance_past(now) {
            log::info!(
                "Countdown target elapsed, re-armed for {}",
                self.target.target_time.format("%Y-%m-%d %H:%M")
            );
            (
                CountdownState::Pending,
                format_remaining(self.target.target_time - now),
            )
        } else {
            (CountdownState::Elapsed, self.elapsed_text.clone())
        };

        if self.last_state != Some(state) {
            log::info!("Countdown state {:?} -> {:?}", self.last_state, state);
            self.last_state = Some(state);
        }

        CountdownSnapshot {
            state,
            display_text,
            target_time: self.target.target_time,
        }
    }
}

/// Countdown shown on a single event card: "Starts in 2d 5h 0m" until the
/// event's start, then live from that instant on. Cards have no live window
/// and never re-arm.
pub fn card_countdown(event_at: DateTime<Local>, now: DateTime<Local>) -> CountdownSnapshot {
    if now < event_at {
        CountdownSnapshot {
            state: CountdownState::Pending,
            display_text: format!("{} {}", CARD_PENDING_PREFIX, format_remaining(event_at - now)),
            target_time: event_at,
        }
    } else {
        CountdownSnapshot {
            state: CountdownState::Live,
            display_text: CARD_STARTED_TEXT.to_string(),
            target_time: event_at,
        }
    }
}

/// Floor `remaining` into whole days, hours and minutes: "3d 4h 12m".
pub fn format_remaining(remaining: Duration) -> String {
    let total_minutes = remaining.num_minutes().max(0);
    let days = total_minutes / (24 * 60);
    let hours = (total_minutes % (24 * 60)) / 60;
    let minutes = total_minutes % 60;
    format!("{days}d {hours}h {minutes}m")
}
