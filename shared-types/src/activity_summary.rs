use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One calendar day's activity ring totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivitySummary {
    pub date: NaiveDate,
    pub active_energy_burned: f64,
    pub apple_exercise_time: f64,
    pub apple_stand_hours: u32,
}

impl fmt::Display for ActivitySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ActivitySummary(date={}, calories={}, exercise_min={}, stand_hours={})",
            self.date, self.active_energy_burned, self.apple_exercise_time, self.apple_stand_hours
        )
    }
}
