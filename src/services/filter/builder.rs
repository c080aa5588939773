use crate::error::ScheduleError;
use crate::models::event::normalize_tag;
use crate::models::filter::{ContentType, FilterCriteria, FilterDefaults, TimeWindow};

/// Accumulates the user's filter selections for one view.
///
/// Every mutator either applies completely or, on error, leaves the criteria
/// exactly as they were.
#[derive(Debug, Clone)]
pub struct FilterCriteriaBuilder {
    defaults: FilterDefaults,
    criteria: FilterCriteria,
}

impl Default for FilterCriteriaBuilder {
    fn default() -> Self {
        Self::new(FilterDefaults::default())
    }
}

impl FilterCriteriaBuilder {
    pub fn new(defaults: FilterDefaults) -> Self {
        let criteria = defaults.criteria();
        Self { defaults, criteria }
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn defaults(&self) -> &FilterDefaults {
        &self.defaults
    }

    /// Single-select: replaces any previous content type.
    pub fn set_content_type(&mut self, content_type: ContentType) {
        self.criteria.content_type = content_type;
    }

    pub fn set_content_type_name(&mut self, name: &str) -> Result<(), ScheduleError> {
        let content_type = name.parse::<ContentType>()?;
        self.set_content_type(content_type);
        Ok(())
    }

    pub fn set_window(&mut self, name: &str) -> Result<(), ScheduleError> {
        let window = name.parse::<TimeWindow>()?;
        self.criteria.window = window;
        Ok(())
    }

    /// Multi-select: adds the tag if absent, removes it if present.
    /// Returns whether the tag is selected afterwards.
    pub fn toggle_sub_type(&mut self, tag: &str) -> Result<bool, ScheduleError> {
        let tag = normalize_tag(tag);
        if tag.is_empty() {
            return Err(ScheduleError::invalid_criteria("sub-type", tag));
        }

        if self.criteria.sub_types.remove(&tag) {
            Ok(false)
        } else {
            self.criteria.sub_types.insert(tag);
            Ok(true)
        }
    }

    pub fn reset(&mut self) {
        self.criteria = self.defaults.criteria();
    }

    pub fn is_default(&self) -> bool {
        self.criteria == self.defaults.criteria()
    }
}
