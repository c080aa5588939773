//! Seconds countdown gating the "resend code" action.
//!
//! The deadline is absolute, so a caller that saved it can rebuild the
//! countdown after a reload with [`ResendCountdown::restore`] and lose no time.

use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::{DateTime, Duration, Local};

use crate::models::settings::ResendConfig;
use crate::services::ticker::{Ticker, TickerHandle};
use crate::utils::clock::Clock;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResendSnapshot {
    pub ready: bool,
    pub remaining_secs: u32,
    pub display_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResendCountdown {
    duration_secs: u32,
    deadline: Option<DateTime<Local>>,
}

impl ResendCountdown {
    /// Idle countdown; the action is available until [`start`](Self::start).
    pub fn new(duration_secs: u32) -> Self {
        Self {
            duration_secs: duration_secs.max(1),
            deadline: None,
        }
    }

    pub fn from_config(config: &ResendConfig) -> Self {
        Self::new(config.duration_secs)
    }

    /// Rebuild from a saved deadline. A deadline that already passed yields
    /// an idle countdown.
    pub fn restore(duration_secs: u32, saved_deadline: DateTime<Local>, now: DateTime<Local>) -> Self {
        let mut countdown = Self::new(duration_secs);
        if saved_deadline > now {
            countdown.deadline = Some(saved_deadline);
        } else {
            log::debug!("Saved resend deadline {} already passed", saved_deadline);
        }
        countdown
    }

    /// Start (or restart) the countdown and return the deadline to persist.
    pub fn start(&mut self, now: DateTime<Local>) -> DateTime<Local> {
        let deadline = now + Duration::seconds(i64::from(self.duration_secs));
        self.deadline = Some(deadline);
        deadline
    }

    pub fn deadline(&self) -> Option<DateTime<Local>> {
        self.deadline
    }

    pub fn duration_secs(&self) -> u32 {
        self.duration_secs
    }

    /// Whole seconds left, rounded up.
    pub fn remaining_secs(&self, now: DateTime<Local>) -> u32 {
        let Some(deadline) = self.deadline else {
            return 0;
        };
        let millis = (deadline - now).num_milliseconds();
        if millis <= 0 {
            return 0;
        }
        u32::try_from((millis + 999) / 1000).unwrap_or(u32::MAX)
    }

    pub fn is_ready(&self, now: DateTime<Local>) -> bool {
        self.remaining_secs(now) == 0
    }

    /// Hand the countdown to a [`Ticker`] firing every `config.tick_millis`.
    /// Each tick's snapshot goes to `on_tick`.
    pub fn spawn_ticker<F>(
        mut self,
        config: &ResendConfig,
        clock: Arc<dyn Clock>,
        mut on_tick: F,
    ) -> TickerHandle
    where
        F: FnMut(ResendSnapshot) + Send + 'static,
    {
        Ticker::spawn(
            "resend-countdown",
            StdDuration::from_millis(config.tick_millis),
            clock,
            move |now| on_tick(self.tick(now)),
        )
    }

    /// Per-tick refresh. Clears the deadline once it is reached.
    pub fn tick(&mut self, now: DateTime<Local>) -> ResendSnapshot {
        let remaining_secs = self.remaining_secs(now);
        if remaining_secs == 0 && self.deadline.take().is_some() {
            log::debug!("Resend countdown finished");
        }

        let ready = remaining_secs == 0;
        let shown = if ready { self.duration_secs } else { remaining_secs };
        ResendSnapshot {
            ready,
            remaining_secs,
            display_text: shown.to_string(),
        }
    }
}
