//! Helpers that operate on already-extracted records: date filtering,
//! grouping by day, totals and display names.

mod units;

pub use units::convert_unit;

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::Serialize;
use shared_types::{ActivitySummary, QuantityRecord, Timestamped};
use std::collections::BTreeMap;

const TYPE_PREFIXES: [&str; 4] = [
    "HKQuantityTypeIdentifier",
    "HKCategoryTypeIdentifier",
    "HKCharacteristicTypeIdentifier",
    "HKWorkoutActivityType",
];

const DEFAULT_TYPE_PREFIX: &str = "HKQuantityTypeIdentifier";

/// One day's total of a record sequence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyTotal {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Total")]
    pub total: f64,
    #[serde(rename = "Record Count")]
    pub count: usize,
}

/// Records whose start date is known and lies within `[start, end]`.
pub fn filter_by_date_range<T>(
    records: &[T],
    start: DateTime<FixedOffset>,
    end: DateTime<FixedOffset>,
) -> Vec<T>
where
    T: Timestamped + Clone,
{
    records
        .iter()
        .filter(|r| r.start_date().is_some_and(|d| start <= d && d <= end))
        .cloned()
        .collect()
}

/// Summaries whose day lies within `[first_day, last_day]`.
pub fn filter_summaries_by_date_range(
    summaries: &[ActivitySummary],
    first_day: NaiveDate,
    last_day: NaiveDate,
) -> Vec<ActivitySummary> {
    summaries
        .iter()
        .filter(|s| first_day <= s.date && s.date <= last_day)
        .cloned()
        .collect()
}

/// Group records by the calendar day (`YYYY-MM-DD`, in the record's own
/// offset) of their start date. Records without a start date are dropped.
pub fn group_by_date<T: Timestamped>(records: &[T]) -> BTreeMap<String, Vec<&T>> {
    let mut grouped: BTreeMap<String, Vec<&T>> = BTreeMap::new();

    for record in records {
        if let Some(start) = record.start_date() {
            grouped
                .entry(start.format("%Y-%m-%d").to_string())
                .or_default()
                .push(record);
        }
    }

    grouped
}

/// Sum of the numeric values, skipping records whose value is not a number.
pub fn calculate_daily_total<'a, I>(records: I) -> f64
where
    I: IntoIterator<Item = &'a QuantityRecord>,
{
    records
        .into_iter()
        .filter_map(QuantityRecord::numeric_value)
        .sum()
}

/// Per-day totals in ascending day order.
pub fn daily_totals(records: &[QuantityRecord]) -> Vec<DailyTotal> {
    group_by_date(records)
        .into_iter()
        .map(|(date, group)| DailyTotal {
            total: calculate_daily_total(group.iter().copied()),
            count: group.len(),
            date,
        })
        .collect()
}

/// Strip a known HealthKit namespace prefix for display.
///
/// `HKQuantityTypeIdentifierStepCount` becomes `StepCount`; unknown names are
/// returned as-is.
pub fn simplify_record_type(record_type: &str) -> &str {
    TYPE_PREFIXES
        .iter()
        .find_map(|prefix| record_type.strip_prefix(prefix))
        .unwrap_or(record_type)
}

/// Inverse of [`simplify_record_type`] for user input: a bare name such as
/// `StepCount` gets the quantity-type prefix, anything starting with `HK`
/// is left alone.
pub fn qualify_record_type(record_type: &str) -> String {
    if record_type.starts_with("HK") {
        record_type.to_string()
    } else {
        format!("{}{}", DEFAULT_TYPE_PREFIX, record_type)
    }
}
