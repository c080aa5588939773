//! Evaluation eligibility for past services and events.
//!
//! A record stays open for feedback while it falls inside the trailing
//! `window_months` calendar months. The cutoff is computed with
//! [`shift_months`], the same arithmetic the filter windows use, so a record
//! on the "Last 3 months" boundary is both listed and evaluable.

use chrono::{DateTime, Local, NaiveDate};

use crate::models::event::EventRecord;
use crate::utils::date::shift_months;

pub const DEFAULT_WINDOW_MONTHS: u32 = 3;

/// First day that is still eligible when looking back from `now`.
pub fn eligibility_cutoff(now: DateTime<Local>, window_months: u32) -> NaiveDate {
    let months = i32::try_from(window_months).unwrap_or(i32::MAX);
    shift_months(now.date_naive(), -months)
}

pub fn is_eligible(record: &EventRecord, now: DateTime<Local>, window_months: u32) -> bool {
    record.occurs_on() >= eligibility_cutoff(now, window_months)
}

/// What a card footer shows for a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvaluationStatus {
    Open { action_label: String },
    Closed { headline: String, detail: String },
}

impl EvaluationStatus {
    pub fn is_open(&self) -> bool {
        matches!(self, EvaluationStatus::Open { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EligibilityCalculator {
    window_months: u32,
}

impl Default for EligibilityCalculator {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_MONTHS)
    }
}

impl EligibilityCalculator {
    pub fn new(window_months: u32) -> Self {
        Self {
            window_months: window_months.max(1),
        }
    }

    pub fn window_months(&self) -> u32 {
        self.window_months
    }

    pub fn is_eligible(&self, record: &EventRecord, now: DateTime<Local>) -> bool {
        is_eligible(record, now, self.window_months)
    }

    pub fn status(&self, record: &EventRecord, now: DateTime<Local>) -> EvaluationStatus {
        if self.is_eligible(record, now) {
            EvaluationStatus::Open {
                action_label: format!("Evaluate {}", record.kind().label()),
            }
        } else {
            EvaluationStatus::Closed {
                headline: "Evaluation Closed".to_string(),
                detail: format!(
                    "Available for events within the last {} month{}",
                    self.window_months,
                    if self.window_months == 1 { "" } else { "s" }
                ),
            }
        }
    }
}
