// Date utility functions
// Calendar arithmetic shared by the filter windows and the eligibility check

use chrono::{DateTime, Duration, Local, Months, NaiveDate, NaiveTime, Weekday};

/// Shift a date by whole calendar months.
///
/// The day of month is clamped to the last day of the target month, so
/// 2025-05-31 shifted by -3 lands on 2025-02-28. Both the filter windows and
/// the eligibility calculator go through this function so they always agree
/// on where a month boundary falls.
pub fn shift_months(date: NaiveDate, months: i32) -> NaiveDate {
    let magnitude = Months::new(months.unsigned_abs());
    let shifted = if months >= 0 {
        date.checked_add_months(magnitude)
    } else {
        date.checked_sub_months(magnitude)
    };

    shifted.unwrap_or(if months >= 0 {
        NaiveDate::MAX
    } else {
        NaiveDate::MIN
    })
}

/// Shift a date by whole days, saturating at the representable range.
pub fn shift_days(date: NaiveDate, days: i64) -> NaiveDate {
    date.checked_add_signed(Duration::days(days))
        .unwrap_or(if days >= 0 { NaiveDate::MAX } else { NaiveDate::MIN })
}

/// Combine a local date and time, resolving DST folds to the earlier instant.
///
/// Returns `None` when the wall-clock time does not exist (spring-forward gap).
pub fn local_datetime(date: NaiveDate, time: NaiveTime) -> Option<DateTime<Local>> {
    date.and_time(time).and_local_timezone(Local).earliest()
}

/// Number of days from `from` forward to the next `target` weekday (0..=6).
pub fn days_until_weekday(from: Weekday, target: Weekday) -> i64 {
    let from = from.num_days_from_sunday() as i64;
    let target = target.num_days_from_sunday() as i64;
    (target - from).rem_euclid(7)
}
