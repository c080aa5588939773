use std::sync::Arc;

use super::builder::FilterCriteriaBuilder;
use super::evaluator::{FilterEvaluator, FilterOutcome};
use crate::error::ScheduleError;
use crate::models::filter::{ContentType, FilterCriteria};
use crate::utils::clock::Clock;

/// Owns the filter state of one view and re-evaluates after every change.
///
/// Re-evaluation is synchronous: each mutator returns the fresh outcome.
pub struct FilterController {
    builder: FilterCriteriaBuilder,
    evaluator: FilterEvaluator,
    clock: Arc<dyn Clock>,
    outcome: FilterOutcome,
}

impl FilterController {
    pub fn new(evaluator: FilterEvaluator, clock: Arc<dyn Clock>) -> Self {
        let builder = FilterCriteriaBuilder::new(evaluator.defaults().clone());
        let outcome = evaluator.apply(builder.criteria(), clock.now());
        Self {
            builder,
            evaluator,
            clock,
            outcome,
        }
    }

    pub fn criteria(&self) -> &FilterCriteria {
        self.builder.criteria()
    }

    pub fn outcome(&self) -> &FilterOutcome {
        &self.outcome
    }

    pub fn evaluator(&self) -> &FilterEvaluator {
        &self.evaluator
    }

    pub fn set_content_type(&mut self, content_type: ContentType) -> &FilterOutcome {
        self.builder.set_content_type(content_type);
        self.refresh()
    }

    pub fn set_content_type_name(&mut self, name: &str) -> Result<&FilterOutcome, ScheduleError> {
        self.builder.set_content_type_name(name)?;
        Ok(self.refresh())
    }

    pub fn set_window(&mut self, name: &str) -> Result<&FilterOutcome, ScheduleError> {
        self.builder.set_window(name)?;
        Ok(self.refresh())
    }

    pub fn toggle_sub_type(&mut self, tag: &str) -> Result<&FilterOutcome, ScheduleError> {
        self.builder.toggle_sub_type(tag)?;
        Ok(self.refresh())
    }

    pub fn reset(&mut self) -> &FilterOutcome {
        self.builder.reset();
        self.refresh()
    }

    /// Re-run the current criteria against a fresh time sample, e.g. after
    /// midnight has moved the relative windows.
    pub fn refresh(&mut self) -> &FilterOutcome {
        let now = self.clock.now();
        self.outcome = self.evaluator.apply(self.builder.criteria(), now);
        &self.outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::event::{EventKind, EventRecord, RecordId};
    use crate::models::filter::{FilterDefaults, TimeWindow};
    use crate::services::catalog::EventCatalog;
    use crate::utils::clock::FixedClock;
    use chrono::{DateTime, Duration, Local, TimeZone};

    fn at(y: i32, m: u32, d: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(y, m, d, 10, 0, 0).unwrap()
    }

    fn controller(clock: Arc<FixedClock>) -> FilterController {
        let catalog = EventCatalog::new(vec![
            EventRecord::builder()
                .id("fri")
                .kind(EventKind::Service)
                .sub_type("friday")
                .occurs_at(at(2025, 6, 20))
                .build()
                .unwrap(),
            EventRecord::builder()
                .id("sun")
                .kind(EventKind::Service)
                .sub_type("sunday")
                .occurs_at(at(2025, 6, 22))
                .build()
                .unwrap(),
            EventRecord::new("revival", EventKind::Event, at(2025, 8, 1)),
        ]);
        FilterController::new(
            FilterEvaluator::new(catalog, FilterDefaults::upcoming()),
            clock,
        )
    }

    fn ids(outcome: &FilterOutcome) -> Vec<String> {
        outcome.visible_ids.iter().map(RecordId::to_string).collect()
    }

    #[test]
    fn test_initial_outcome_uses_view_defaults() {
        let controller = controller(Arc::new(FixedClock::new(at(2025, 6, 15))));
        assert_eq!(controller.criteria().window, TimeWindow::NextMonth);
        assert_eq!(ids(controller.outcome()), vec!["fri", "sun"]);
        assert_eq!(controller.outcome().summary_text, "All items");
    }

    #[test]
    fn test_every_mutation_reevaluates() {
        let mut controller = controller(Arc::new(FixedClock::new(at(2025, 6, 15))));

        let outcome = controller.set_window("semester").unwrap();
        assert_eq!(ids(outcome), vec!["fri", "sun", "revival"]);

        let outcome = controller.set_content_type(ContentType::Services);
        assert_eq!(ids(outcome), vec!["fri", "sun"]);

        let outcome = controller.toggle_sub_type("sunday").unwrap();
        assert_eq!(ids(outcome), vec!["sun"]);
        assert_eq!(outcome.summary_text, "Services • Next semester • Sunday");

        let outcome = controller.toggle_sub_type("sunday").unwrap();
        assert_eq!(ids(outcome), vec!["fri", "sun"]);

        let outcome = controller.reset();
        assert_eq!(outcome.summary_text, "All items");
    }

    #[test]
    fn test_failed_mutation_keeps_previous_outcome() {
        let mut controller = controller(Arc::new(FixedClock::new(at(2025, 6, 15))));
        controller.set_content_type_name("events").unwrap();
        let before = controller.outcome().clone();

        assert!(controller.set_window("whenever").is_err());
        assert!(controller.set_content_type_name("podcasts").is_err());
        assert_eq!(controller.outcome(), &before);
        assert_eq!(controller.criteria().content_type, ContentType::Events);
    }

    #[test]
    fn test_refresh_samples_the_clock_again() {
        let clock = Arc::new(FixedClock::new(at(2025, 6, 15)));
        let mut controller = controller(clock.clone());
        controller.set_window("1week").unwrap();
        assert_eq!(ids(controller.outcome()), vec!["fri", "sun"]);

        clock.advance(Duration::days(6));
        assert_eq!(ids(controller.refresh()), vec!["sun"]);
    }
}
