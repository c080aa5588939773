// Countdown module
// Targets, live windows and display state for service countdowns

use chrono::{DateTime, Datelike, Local, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::utils::date::{days_until_weekday, local_datetime, shift_days};

/// Display state of a countdown on a given tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CountdownState {
    /// Target in the future, outside the live window
    Pending,
    /// Now falls inside the live window
    Live,
    /// Target passed, outside the live window
    Elapsed,
}

/// What a countdown surface renders after one tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountdownSnapshot {
    pub state: CountdownState,
    pub display_text: String,
    pub target_time: DateTime<Local>,
}

/// Recurring weekly interval during which the target counts as live.
///
/// `start` is inclusive and `end` exclusive, so Sunday 09:00-12:00 is live at
/// 11:59 but not at 12:00.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveWindow {
    pub weekday: Weekday,
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl LiveWindow {
    pub fn new(weekday: Weekday, start: NaiveTime, end: NaiveTime) -> Self {
        Self {
            weekday,
            start,
            end,
        }
    }

    /// Sunday 09:00-12:00, the main service broadcast.
    pub fn sunday_morning() -> Self {
        Self::new(
            Weekday::Sun,
            NaiveTime::from_hms_opt(9, 0, 0).unwrap_or(NaiveTime::MIN),
            NaiveTime::from_hms_opt(12, 0, 0).unwrap_or(NaiveTime::MIN),
        )
    }

    pub fn contains(&self, now: DateTime<Local>) -> bool {
        let time = now.time();
        now.weekday() == self.weekday && self.start <= time && time < self.end
    }
}

/// Weekday and time-of-day of a recurring service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklySlot {
    pub weekday: Weekday,
    pub time: NaiveTime,
}

impl WeeklySlot {
    pub fn new(weekday: Weekday, time: NaiveTime) -> Self {
        Self { weekday, time }
    }

    /// Next start of this slot strictly after `now`.
    ///
    /// Today counts only while the slot time is still ahead; at or after the
    /// slot time the answer is next week's occurrence.
    pub fn next_after(&self, now: DateTime<Local>) -> DateTime<Local> {
        let today = now.date_naive();
        let mut offset = days_until_weekday(today.weekday(), self.weekday);
        if offset == 0 && now.time() >= self.time {
            offset = 7;
        }

        // A slot that falls into a DST gap moves to the following week.
        for extra_weeks in 0..4 {
            let date = shift_days(today, offset + extra_weeks * 7);
            if let Some(candidate) = local_datetime(date, self.time) {
                if candidate > now {
                    return candidate;
                }
            }
        }
        log::warn!(
            "No valid {:?} {} slot within four weeks of {}, keeping current time",
            self.weekday,
            self.time,
            now.format("%Y-%m-%d %H:%M")
        );
        now
    }
}

/// The instant a countdown counts down to, plus how it recurs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountdownTarget {
    pub target_time: DateTime<Local>,
    pub live_window: Option<LiveWindow>,
    pub recurrence: Option<WeeklySlot>,
}

impl CountdownTarget {
    /// One-shot target with no live window.
    pub fn once(target_time: DateTime<Local>) -> Self {
        Self {
            target_time,
            live_window: None,
            recurrence: None,
        }
    }

    /// Target at the next occurrence of `slot`, re-armed weekly.
    pub fn next_weekly(
        now: DateTime<Local>,
        slot: WeeklySlot,
        live_window: Option<LiveWindow>,
    ) -> Self {
        Self {
            target_time: slot.next_after(now),
            live_window,
            recurrence: Some(slot),
        }
    }

    pub fn with_live_window(mut self, live_window: LiveWindow) -> Self {
        self.live_window = Some(live_window);
        self
    }

    pub fn is_live(&self, now: DateTime<Local>) -> bool {
        self.live_window.is_some_and(|window| window.contains(now))
    }

    /// Roll `target_time` forward to the next occurrence after `now`.
    /// Returns false for one-shot targets.
    pub fn advance_past(&mut self, now: DateTime<Local>) -> bool {
        let Some(slot) = self.recurrence else {
            return false;
        };
        let next = slot.next_after(now);
        if next <= self.target_time {
            return false;
        }
        self.target_time = next;
        true
    }
}
