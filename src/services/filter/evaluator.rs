use chrono::{DateTime, Local};

use crate::models::event::{EventRecord, RecordId};
use crate::models::filter::{DateBounds, FilterCriteria, FilterDefaults};
use crate::services::catalog::EventCatalog;

const SUMMARY_SEPARATOR: &str = " • ";
const DEFAULT_SUMMARY: &str = "All items";

/// Result of one evaluation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOutcome {
    /// Visible ids in catalog order.
    pub visible_ids: Vec<RecordId>,
    pub visible_count: usize,
    pub summary_text: String,
    /// Date bounds the window resolved to for this pass.
    pub bounds: DateBounds,
}

impl FilterOutcome {
    pub fn is_empty(&self) -> bool {
        self.visible_ids.is_empty()
    }
}

/// Applies filter criteria to a catalog.
#[derive(Debug, Clone)]
pub struct FilterEvaluator {
    catalog: EventCatalog,
    defaults: FilterDefaults,
}

impl FilterEvaluator {
    pub fn new(catalog: EventCatalog, defaults: FilterDefaults) -> Self {
        Self { catalog, defaults }
    }

    pub fn catalog(&self) -> &EventCatalog {
        &self.catalog
    }

    pub fn defaults(&self) -> &FilterDefaults {
        &self.defaults
    }

    /// Run the criteria over the catalog. `now` is the single time sample
    /// for the whole pass.
    pub fn apply(&self, criteria: &FilterCriteria, now: DateTime<Local>) -> FilterOutcome {
        let bounds = criteria.window.resolve(now.date_naive());

        let visible_ids: Vec<RecordId> = self
            .visible_records(criteria, bounds)
            .map(|record| record.id().clone())
            .collect();

        log::debug!(
            "Filter pass: type={:?} window={} bounds={:?} visible={}/{}",
            criteria.content_type,
            criteria.window,
            bounds,
            visible_ids.len(),
            self.catalog.len()
        );

        FilterOutcome {
            visible_count: visible_ids.len(),
            visible_ids,
            summary_text: summarize(criteria, &self.defaults),
            bounds,
        }
    }

    /// Same pass as [`apply`](Self::apply), yielding the records themselves.
    pub fn visible<'a>(
        &'a self,
        criteria: &'a FilterCriteria,
        now: DateTime<Local>,
    ) -> impl Iterator<Item = &'a EventRecord> + 'a {
        let bounds = criteria.window.resolve(now.date_naive());
        self.visible_records(criteria, bounds)
    }

    fn visible_records<'a>(
        &'a self,
        criteria: &'a FilterCriteria,
        bounds: DateBounds,
    ) -> impl Iterator<Item = &'a EventRecord> + 'a {
        self.catalog
            .records()
            .iter()
            .filter(move |record| is_visible(record, criteria, bounds))
    }
}

pub fn is_visible(record: &EventRecord, criteria: &FilterCriteria, bounds: DateBounds) -> bool {
    criteria.content_type_matches(record)
        && bounds.contains(record.occurs_on())
        && criteria.sub_type_matches(record)
}

/// Human-readable summary of the criteria that differ from the view defaults.
pub fn summarize(criteria: &FilterCriteria, defaults: &FilterDefaults) -> String {
    let mut parts: Vec<String> = Vec::new();

    if criteria.content_type != defaults.content_type {
        parts.push(criteria.content_type.label().to_string());
    }
    if criteria.window != defaults.window {
        parts.push(criteria.window.label().to_string());
    }
    if criteria.content_type.includes_services()
        && !criteria.sub_types.is_empty()
        && criteria.sub_types != defaults.sub_types
    {
        let tags: Vec<String> = criteria.sub_types.iter().map(|tag| capitalize(tag)).collect();
        parts.push(tags.join(", "));
    }

    if parts.is_empty() {
        DEFAULT_SUMMARY.to_string()
    } else {
        parts.join(SUMMARY_SEPARATOR)
    }
}

fn capitalize(tag: &str) -> String {
    let mut chars = tag.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
