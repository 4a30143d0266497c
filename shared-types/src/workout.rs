use crate::health_record::display_date;
use crate::Timestamped;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One workout session.
///
/// `total_distance` and `total_energy_burned` stay `None` when the source did
/// not record them, so "not recorded" and "recorded as zero" remain distinct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    pub workout_type: Option<String>,
    pub duration: f64,
    pub duration_unit: Option<String>,
    pub total_distance: Option<f64>,
    pub total_energy_burned: Option<f64>,
    pub source_name: Option<String>,
    pub start_date: Option<DateTime<FixedOffset>>,
    pub end_date: Option<DateTime<FixedOffset>>,
}

impl Timestamped for Workout {
    fn start_date(&self) -> Option<DateTime<FixedOffset>> {
        self.start_date
    }
}

impl fmt::Display for Workout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Workout(type={}, duration={} {}, date={})",
            self.workout_type.as_deref().unwrap_or("None"),
            self.duration,
            self.duration_unit.as_deref().unwrap_or(""),
            display_date(self.start_date)
        )
    }
}
