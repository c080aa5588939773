// Filter module
// Criteria the listing pages filter the catalog by

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::event::{EventKind, EventRecord};
use crate::error::ScheduleError;
use crate::utils::date::{shift_days, shift_months};

/// Which kind of record the listing shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    #[default]
    All,
    Services,
    Events,
}

impl ContentType {
    pub fn matches(&self, kind: EventKind) -> bool {
        match self {
            ContentType::All => true,
            ContentType::Services => kind == EventKind::Service,
            ContentType::Events => kind == EventKind::Event,
        }
    }

    pub fn includes_services(&self) -> bool {
        matches!(self, ContentType::All | ContentType::Services)
    }

    pub fn label(&self) -> &'static str {
        match self {
            ContentType::All => "All content",
            ContentType::Services => "Services",
            ContentType::Events => "Events",
        }
    }
}

impl FromStr for ContentType {
    type Err = ScheduleError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(ContentType::All),
            "services" | "service" => Ok(ContentType::Services),
            "events" | "event" => Ok(ContentType::Events),
            _ => Err(ScheduleError::invalid_criteria("content type", value)),
        }
    }
}

/// A named date range relative to "today".
///
/// Resolution happens on every evaluation; a window never remembers the
/// bounds it produced last time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TimeWindow {
    Next7Days,
    NextMonth,
    Next2Months,
    NextSemester,
    Last3Months,
    Last6Months,
    LastYear,
    AllTime,
}

impl TimeWindow {
    pub const ALL: [TimeWindow; 8] = [
        TimeWindow::Next7Days,
        TimeWindow::NextMonth,
        TimeWindow::Next2Months,
        TimeWindow::NextSemester,
        TimeWindow::Last3Months,
        TimeWindow::Last6Months,
        TimeWindow::LastYear,
        TimeWindow::AllTime,
    ];

    /// Canonical name accepted by [`TimeWindow::from_str`].
    pub fn name(&self) -> &'static str {
        match self {
            TimeWindow::Next7Days => "next-7-days",
            TimeWindow::NextMonth => "next-month",
            TimeWindow::Next2Months => "next-2-months",
            TimeWindow::NextSemester => "next-semester",
            TimeWindow::Last3Months => "last-3-months",
            TimeWindow::Last6Months => "last-6-months",
            TimeWindow::LastYear => "last-year",
            TimeWindow::AllTime => "all-time",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TimeWindow::Next7Days => "Next 7 days",
            TimeWindow::NextMonth => "Next month",
            TimeWindow::Next2Months => "Next 2 months",
            TimeWindow::NextSemester => "Next semester",
            TimeWindow::Last3Months => "Last 3 months",
            TimeWindow::Last6Months => "Last 6 months",
            TimeWindow::LastYear => "Last year",
            TimeWindow::AllTime => "All time",
        }
    }

    /// Concrete inclusive bounds for this window as seen from `today`.
    pub fn resolve(&self, today: NaiveDate) -> DateBounds {
        match self {
            TimeWindow::Next7Days => DateBounds::between(today, shift_days(today, 7)),
            TimeWindow::NextMonth => DateBounds::between(today, shift_months(today, 1)),
            TimeWindow::Next2Months => DateBounds::between(today, shift_months(today, 2)),
            // A semester is taken as four months.
            TimeWindow::NextSemester => DateBounds::between(today, shift_months(today, 4)),
            TimeWindow::Last3Months => DateBounds::between(shift_months(today, -3), today),
            TimeWindow::Last6Months => DateBounds::between(shift_months(today, -6), today),
            TimeWindow::LastYear => DateBounds::between(shift_months(today, -12), today),
            TimeWindow::AllTime => DateBounds::unbounded(),
        }
    }
}

impl FromStr for TimeWindow {
    type Err = ScheduleError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let window = match value.trim().to_ascii_lowercase().as_str() {
            "next-7-days" | "1week" => TimeWindow::Next7Days,
            "next-month" | "1month" => TimeWindow::NextMonth,
            "next-2-months" | "2month" => TimeWindow::Next2Months,
            "next-semester" | "semester" => TimeWindow::NextSemester,
            "last-3-months" | "3months" => TimeWindow::Last3Months,
            "last-6-months" | "6months" => TimeWindow::Last6Months,
            "last-year" | "1year" => TimeWindow::LastYear,
            "all-time" | "all" => TimeWindow::AllTime,
            _ => return Err(ScheduleError::invalid_criteria("window", value)),
        };
        Ok(window)
    }
}

impl TryFrom<String> for TimeWindow {
    type Error = ScheduleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeWindow> for String {
    fn from(window: TimeWindow) -> Self {
        window.name().to_string()
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Inclusive date range; `None` on either side means unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateBounds {
    pub min: Option<NaiveDate>,
    pub max: Option<NaiveDate>,
}

impl DateBounds {
    pub fn between(min: NaiveDate, max: NaiveDate) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    pub fn unbounded() -> Self {
        Self {
            min: None,
            max: None,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.min.is_none_or(|min| min <= date) && self.max.is_none_or(|max| date <= max)
    }
}

/// The full set of active filter selections for one view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub content_type: ContentType,
    pub window: TimeWindow,
    #[serde(default)]
    pub sub_types: BTreeSet<String>,
}

impl FilterCriteria {
    pub fn content_type_matches(&self, record: &EventRecord) -> bool {
        self.content_type.matches(record.kind())
    }

    /// Non-service records ignore the allow-list, and an empty allow-list
    /// restricts nothing.
    pub fn sub_type_matches(&self, record: &EventRecord) -> bool {
        if !record.is_service() || self.sub_types.is_empty() {
            return true;
        }
        record
            .sub_type()
            .is_some_and(|tag| self.sub_types.contains(tag))
    }
}

impl Default for FilterCriteria {
    fn default() -> Self {
        FilterDefaults::default().criteria()
    }
}

/// Per-view defaults: what `reset()` restores and what the summary treats
/// as "not worth mentioning".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterDefaults {
    pub content_type: ContentType,
    pub window: TimeWindow,
    #[serde(default)]
    pub sub_types: BTreeSet<String>,
}

impl FilterDefaults {
    /// Defaults of the "Upcoming" tab.
    pub fn upcoming() -> Self {
        Self {
            window: TimeWindow::NextMonth,
            ..Self::default()
        }
    }

    /// Defaults of the "Past" archive tab.
    pub fn archive() -> Self {
        Self {
            window: TimeWindow::Last6Months,
            ..Self::default()
        }
    }

    pub fn with_window(mut self, window: TimeWindow) -> Self {
        self.window = window;
        self
    }

    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria {
            content_type: self.content_type,
            window: self.window,
            sub_types: self.sub_types.clone(),
        }
    }
}

impl Default for FilterDefaults {
    fn default() -> Self {
        Self {
            content_type: ContentType::All,
            window: TimeWindow::AllTime,
            sub_types: BTreeSet::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn service(id: &str, tag: Option<&str>) -> EventRecord {
        let at = Local.with_ymd_and_hms(2025, 6, 15, 9, 0, 0).unwrap();
        let mut builder = EventRecord::builder()
            .id(id)
            .kind(EventKind::Service)
            .occurs_at(at);
        if let Some(tag) = tag {
            builder = builder.sub_type(tag);
        }
        builder.build().unwrap()
    }

    #[test_case("1week", TimeWindow::Next7Days)]
    #[test_case("1month", TimeWindow::NextMonth)]
    #[test_case("2month", TimeWindow::Next2Months)]
    #[test_case("semester", TimeWindow::NextSemester)]
    #[test_case("Last-6-Months", TimeWindow::Last6Months)]
    #[test_case(" all-time ", TimeWindow::AllTime)]
    fn test_window_names_parse(name: &str, expected: TimeWindow) {
        assert_eq!(name.parse::<TimeWindow>().unwrap(), expected);
    }

    #[test]
    fn test_window_canonical_names_round_trip() {
        for window in TimeWindow::ALL {
            assert_eq!(window.name().parse::<TimeWindow>().unwrap(), window);
        }
    }

    #[test]
    fn test_unknown_window_is_invalid_criteria() {
        let err = "fortnight".parse::<TimeWindow>().unwrap_err();
        assert_eq!(err, ScheduleError::invalid_criteria("window", "fortnight"));
    }

    #[test_case(TimeWindow::Next7Days, Some(ymd(2025, 6, 15)), Some(ymd(2025, 6, 22)))]
    #[test_case(TimeWindow::NextMonth, Some(ymd(2025, 6, 15)), Some(ymd(2025, 7, 15)))]
    #[test_case(TimeWindow::NextSemester, Some(ymd(2025, 6, 15)), Some(ymd(2025, 10, 15)))]
    #[test_case(TimeWindow::Last6Months, Some(ymd(2024, 12, 15)), Some(ymd(2025, 6, 15)))]
    #[test_case(TimeWindow::LastYear, Some(ymd(2024, 6, 15)), Some(ymd(2025, 6, 15)))]
    #[test_case(TimeWindow::AllTime, None, None)]
    fn test_window_resolution(
        window: TimeWindow,
        min: Option<NaiveDate>,
        max: Option<NaiveDate>,
    ) {
        assert_eq!(window.resolve(ymd(2025, 6, 15)), DateBounds { min, max });
    }

    #[test]
    fn test_bounds_are_inclusive_on_both_ends() {
        let bounds = TimeWindow::Last6Months.resolve(ymd(2025, 6, 15));
        assert!(bounds.contains(ymd(2024, 12, 15)));
        assert!(bounds.contains(ymd(2025, 6, 15)));
        assert!(!bounds.contains(ymd(2024, 12, 14)));
        assert!(!bounds.contains(ymd(2025, 6, 16)));
    }

    #[test_case("services", ContentType::Services)]
    #[test_case("Event", ContentType::Events)]
    #[test_case("ALL", ContentType::All)]
    fn test_content_type_parse(name: &str, expected: ContentType) {
        assert_eq!(name.parse::<ContentType>().unwrap(), expected);
    }

    #[test]
    fn test_content_type_unknown() {
        assert!(matches!(
            "sermons".parse::<ContentType>(),
            Err(ScheduleError::InvalidCriteria { field: "content type", .. })
        ));
    }

    #[test]
    fn test_sub_type_matching() {
        let mut criteria = FilterCriteria::default();
        let sunday = service("s1", Some("sunday"));
        let untagged = service("s2", None);

        assert!(criteria.sub_type_matches(&sunday));
        assert!(criteria.sub_type_matches(&untagged));

        criteria.sub_types.insert("friday".to_string());
        assert!(!criteria.sub_type_matches(&sunday));
        assert!(!criteria.sub_type_matches(&untagged));

        criteria.sub_types.insert("sunday".to_string());
        assert!(criteria.sub_type_matches(&sunday));
    }

    #[test]
    fn test_sub_types_ignored_for_events() {
        let mut criteria = FilterCriteria::default();
        criteria.sub_types.insert("friday".to_string());
        let event = EventRecord::new(
            "e1",
            EventKind::Event,
            Local.with_ymd_and_hms(2025, 6, 15, 9, 0, 0).unwrap(),
        );
        assert!(criteria.sub_type_matches(&event));
    }

    #[test]
    fn test_window_serde_uses_names() {
        let defaults = FilterDefaults::archive();
        let json = serde_json::to_string(&defaults).unwrap();
        assert!(json.contains("\"last-6-months\""));
        let back: FilterDefaults = serde_json::from_str(&json).unwrap();
        assert_eq!(back, defaults);

        let bad: Result<FilterDefaults, _> =
            serde_json::from_str(r#"{"content_type":"all","window":"someday"}"#);
        assert!(bad.is_err());
    }
}
