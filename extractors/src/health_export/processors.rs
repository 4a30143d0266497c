use super::date_parser::{parse_health_date, parse_summary_date};
use super::document::Element;
use shared_types::{ActivitySummary, QuantityRecord, Workout};

fn owned(element: &Element, key: &str) -> Option<String> {
    element.attribute(key).map(str::to_string)
}

/// Non-negative finite number from an attribute. Absent or empty attributes
/// yield `None` quietly; present but unusable ones are logged.
fn non_negative(element: &Element, key: &str) -> Option<f64> {
    let raw = element.attribute(key).map(str::trim).filter(|s| !s.is_empty())?;

    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => Some(value),
        _ => {
            tracing::debug!("Ignoring {} value {:?} on <{}>", key, raw, element.name);
            None
        }
    }
}

/// Whole stand hours. Fractional values are rounded to the nearest hour.
fn stand_hours(element: &Element) -> u32 {
    non_negative(element, "appleStandHours")
        .map(|hours| hours.round() as u32)
        .unwrap_or(0)
}

pub fn build_quantity_record(element: &Element) -> QuantityRecord {
    QuantityRecord {
        record_type: owned(element, "type"),
        source_name: owned(element, "sourceName"),
        value: owned(element, "value"),
        unit: owned(element, "unit"),
        start_date: parse_health_date(element.attribute("startDate")),
        end_date: parse_health_date(element.attribute("endDate")),
        creation_date: parse_health_date(element.attribute("creationDate")),
    }
}

pub fn build_workout(element: &Element) -> Workout {
    Workout {
        workout_type: owned(element, "workoutActivityType"),
        duration: non_negative(element, "duration").unwrap_or(0.0),
        duration_unit: owned(element, "durationUnit"),
        total_distance: non_negative(element, "totalDistance"),
        total_energy_burned: non_negative(element, "totalEnergyBurned"),
        source_name: owned(element, "sourceName"),
        start_date: parse_health_date(element.attribute("startDate")),
        end_date: parse_health_date(element.attribute("endDate")),
    }
}

pub fn build_activity_summary(element: &Element) -> Option<ActivitySummary> {
    let Some(date) = parse_summary_date(element.attribute("dateComponents")) else {
        tracing::debug!(
            "Skipping <{}> without a usable dateComponents: {:?}",
            element.name,
            element.attribute("dateComponents")
        );
        return None;
    };

    Some(ActivitySummary {
        date,
        active_energy_burned: non_negative(element, "activeEnergyBurned").unwrap_or(0.0),
        apple_exercise_time: non_negative(element, "appleExerciseTime").unwrap_or(0.0),
        apple_stand_hours: stand_hours(element),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn element(name: &str, attributes: &[(&str, &str)]) -> Element {
        Element {
            name: name.to_string(),
            attributes: attributes
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    #[test]
    fn test_quantity_record_full() {
        let record = build_quantity_record(&element(
            "Record",
            &[
                ("type", "HKQuantityTypeIdentifierHeartRate"),
                ("sourceName", "Apple Watch"),
                ("unit", "count/min"),
                ("creationDate", "2024-02-15 10:31:00 -0500"),
                ("startDate", "2024-02-15 10:30:00 -0500"),
                ("endDate", "2024-02-15 10:30:00 -0500"),
                ("value", "72"),
            ],
        ));

        assert_eq!(record.record_type.as_deref(), Some("HKQuantityTypeIdentifierHeartRate"));
        assert_eq!(record.source_name.as_deref(), Some("Apple Watch"));
        assert_eq!(record.value.as_deref(), Some("72"));
        assert_eq!(record.unit.as_deref(), Some("count/min"));
        assert!(record.start_date.is_some());
        assert!(record.end_date.is_some());
        assert!(record.creation_date.unwrap() > record.start_date.unwrap());
    }

    #[test]
    fn test_quantity_record_with_gaps() {
        let record = build_quantity_record(&element(
            "Record",
            &[("value", "HKCategoryValueSleepAnalysisAsleep"), ("startDate", "yesterday")],
        ));

        assert_eq!(record.record_type, None);
        assert_eq!(record.source_name, None);
        assert_eq!(record.unit, None);
        assert_eq!(record.start_date, None);
        assert_eq!(record.value.as_deref(), Some("HKCategoryValueSleepAnalysisAsleep"));
    }

    #[test]
    fn test_workout_distance_absent_versus_zero() {
        let absent = build_workout(&element(
            "Workout",
            &[("workoutActivityType", "HKWorkoutActivityTypeYoga"), ("duration", "45")],
        ));
        assert_eq!(absent.total_distance, None);
        assert_eq!(absent.total_energy_burned, None);

        let zero = build_workout(&element(
            "Workout",
            &[
                ("workoutActivityType", "HKWorkoutActivityTypeYoga"),
                ("totalDistance", "0"),
                ("totalEnergyBurned", ""),
            ],
        ));
        assert_eq!(zero.total_distance, Some(0.0));
        assert_eq!(zero.total_energy_burned, None);
    }

    #[test]
    fn test_workout_bad_numbers_degrade() {
        let workout = build_workout(&element(
            "Workout",
            &[
                ("duration", "about an hour"),
                ("totalDistance", "-3"),
                ("totalEnergyBurned", "lots"),
            ],
        ));
        assert_eq!(workout.duration, 0.0);
        assert_eq!(workout.total_distance, None);
        assert_eq!(workout.total_energy_burned, None);
        assert_eq!(workout.workout_type, None);
    }

    #[test]
    fn test_activity_summary() {
        let summary = build_activity_summary(&element(
            "ActivitySummary",
            &[
                ("dateComponents", "2024-02-15"),
                ("activeEnergyBurned", "512.3"),
                ("appleExerciseTime", "34"),
                ("appleStandHours", "11"),
            ],
        ))
        .unwrap();

        assert_eq!(summary.date, NaiveDate::from_ymd_opt(2024, 2, 15).unwrap());
        assert_eq!(summary.active_energy_burned, 512.3);
        assert_eq!(summary.apple_exercise_time, 34.0);
        assert_eq!(summary.apple_stand_hours, 11);
    }

    #[test]
    fn test_fractional_stand_hours_are_rounded() {
        let hours = |raw: &str| {
            build_activity_summary(&element(
                "ActivitySummary",
                &[("dateComponents", "2024-02-15"), ("appleStandHours", raw)],
            ))
            .unwrap()
            .apple_stand_hours
        };

        assert_eq!(hours("11.7"), 12);
        assert_eq!(hours("11.2"), 11);
        assert_eq!(hours("9"), 9);
        assert_eq!(hours("-2"), 0);
    }

    #[test]
    fn test_activity_summary_requires_date() {
        assert!(build_activity_summary(&element(
            "ActivitySummary",
            &[("activeEnergyBurned", "100")]
        ))
        .is_none());

        let sparse = build_activity_summary(&element(
            "ActivitySummary",
            &[("dateComponents", "2024-02-16"), ("appleStandHours", "n/a")],
        ))
        .unwrap();
        assert_eq!(sparse.active_energy_burned, 0.0);
        assert_eq!(sparse.apple_stand_hours, 0);
    }
}
