// Property-based tests for filter evaluation
// Random catalogs and instants exercise window bounds and criteria laws

use chrono::{Duration, Local, NaiveDate, TimeZone};
use proptest::prelude::*;

use church_events::models::event::{EventKind, EventRecord};
use church_events::models::filter::{ContentType, FilterCriteria, FilterDefaults, TimeWindow};
use church_events::services::catalog::EventCatalog;
use church_events::services::filter::{FilterCriteriaBuilder, FilterEvaluator};

const TAGS: [&str; 3] = ["sunday", "friday", "youth"];

fn record_strategy() -> impl Strategy<Value = (bool, usize, i64)> {
    // (is service, tag index, day offset from the base date)
    (any::<bool>(), 0..TAGS.len(), -500i64..500)
}

fn build_catalog(rows: &[(bool, usize, i64)]) -> EventCatalog {
    let base = Local.with_ymd_and_hms(2025, 6, 15, 10, 0, 0).unwrap();
    let records = rows
        .iter()
        .enumerate()
        .map(|(index, (is_service, tag, offset))| {
            let builder = EventRecord::builder()
                .id(format!("r-{index}"))
                .occurs_at(base + Duration::days(*offset));
            let builder = if *is_service {
                builder.kind(EventKind::Service).sub_type(TAGS[*tag])
            } else {
                builder.kind(EventKind::Event)
            };
            builder.build().unwrap()
        })
        .collect();
    EventCatalog::new(records)
}

fn window_strategy() -> impl Strategy<Value = TimeWindow> {
    proptest::sample::select(TimeWindow::ALL.to_vec())
}

fn content_type_strategy() -> impl Strategy<Value = ContentType> {
    prop_oneof![
        Just(ContentType::All),
        Just(ContentType::Services),
        Just(ContentType::Events),
    ]
}

proptest! {
    /// Property: the neutral criteria show every record, in catalog order
    #[test]
    fn prop_neutral_criteria_show_everything(
        rows in prop::collection::vec(record_strategy(), 0..40),
        day_offset in -1000i64..1000,
    ) {
        let catalog = build_catalog(&rows);
        let expected: Vec<_> = catalog.records().iter().map(|r| r.id().clone()).collect();
        let evaluator = FilterEvaluator::new(catalog, FilterDefaults::default());

        let now = Local.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap() + Duration::days(day_offset);
        let outcome = evaluator.apply(&FilterCriteria::default(), now);

        prop_assert_eq!(outcome.visible_ids, expected);
        prop_assert_eq!(outcome.summary_text, "All items");
    }

    /// Property: evaluating twice with the same instant gives the same outcome
    #[test]
    fn prop_apply_is_deterministic(
        rows in prop::collection::vec(record_strategy(), 0..40),
        window in window_strategy(),
        content_type in content_type_strategy(),
        tag in 0..TAGS.len(),
    ) {
        let evaluator = FilterEvaluator::new(build_catalog(&rows), FilterDefaults::default());
        let mut builder = FilterCriteriaBuilder::default();
        builder.set_content_type(content_type);
        builder.set_window(window.name()).unwrap();
        builder.toggle_sub_type(TAGS[tag]).unwrap();

        let now = Local.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap();
        let first = evaluator.apply(builder.criteria(), now);
        let second = evaluator.apply(builder.criteria(), now);

        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.visible_count, first.visible_ids.len());
    }

    /// Property: toggling a tag twice restores the original criteria
    #[test]
    fn prop_double_toggle_is_identity(
        tags in prop::collection::vec(0..TAGS.len(), 0..6),
        toggled in 0..TAGS.len(),
    ) {
        let mut builder = FilterCriteriaBuilder::default();
        for tag in tags {
            builder.toggle_sub_type(TAGS[tag]).unwrap();
        }
        let before = builder.criteria().clone();

        let selected = builder.toggle_sub_type(TAGS[toggled]).unwrap();
        prop_assert_eq!(selected, !before.sub_types.contains(TAGS[toggled]));
        builder.toggle_sub_type(TAGS[toggled]).unwrap();

        prop_assert_eq!(builder.criteria(), &before);
    }

    /// Property: a record is inside a window exactly when its date lies
    /// within the resolved inclusive bounds
    #[test]
    fn prop_window_bounds_are_inclusive(
        year in 2000i32..2050,
        month in 1u32..=12,
        day in 1u32..=31,
        window in window_strategy(),
        offset in -400i64..400,
    ) {
        let Some(today) = NaiveDate::from_ymd_opt(year, month, day) else {
            return Ok(());
        };
        let bounds = window.resolve(today);

        if let (Some(min), Some(max)) = (bounds.min, bounds.max) {
            prop_assert!(min <= max);
            prop_assert!(bounds.contains(min));
            prop_assert!(bounds.contains(max));
            prop_assert!(!bounds.contains(min - Duration::days(1)));
            prop_assert!(!bounds.contains(max + Duration::days(1)));
            prop_assert!(bounds.contains(today));
        }

        let candidate = today + Duration::days(offset);
        let inside = bounds.min.is_none_or(|min| candidate >= min)
            && bounds.max.is_none_or(|max| candidate <= max);
        prop_assert_eq!(bounds.contains(candidate), inside);
    }

    /// Property: narrowing the content type never reveals extra records
    #[test]
    fn prop_content_type_narrows(
        rows in prop::collection::vec(record_strategy(), 0..40),
        window in window_strategy(),
    ) {
        let evaluator = FilterEvaluator::new(build_catalog(&rows), FilterDefaults::default());
        let now = Local.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap();

        let mut builder = FilterCriteriaBuilder::default();
        builder.set_window(window.name()).unwrap();
        let all = evaluator.apply(builder.criteria(), now);

        builder.set_content_type(ContentType::Services);
        let services = evaluator.apply(builder.criteria(), now);
        builder.set_content_type(ContentType::Events);
        let events = evaluator.apply(builder.criteria(), now);

        prop_assert_eq!(services.visible_count + events.visible_count, all.visible_count);
        prop_assert!(services.visible_ids.iter().all(|id| all.visible_ids.contains(id)));
    }
}
