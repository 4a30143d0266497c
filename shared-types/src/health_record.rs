use crate::Timestamped;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One timestamped observation of a named metric.
///
/// `value` is kept exactly as it appears in the source. Quantity types carry
/// numbers, category types carry symbolic values such as
/// `HKCategoryValueSleepAnalysisAsleep`, so numeric coercion is left to
/// [`QuantityRecord::numeric_value`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantityRecord {
    pub record_type: Option<String>,
    pub source_name: Option<String>,
    pub value: Option<String>,
    pub unit: Option<String>,
    pub start_date: Option<DateTime<FixedOffset>>,
    pub end_date: Option<DateTime<FixedOffset>>,
    pub creation_date: Option<DateTime<FixedOffset>>,
}

impl QuantityRecord {
    /// Best-effort numeric reading of `value`. Non-numeric and non-finite
    /// values yield `None`.
    pub fn numeric_value(&self) -> Option<f64> {
        self.value
            .as_deref()
            .and_then(|v| v.trim().parse::<f64>().ok())
            .filter(|v| v.is_finite())
    }
}

impl Timestamped for QuantityRecord {
    fn start_date(&self) -> Option<DateTime<FixedOffset>> {
        self.start_date
    }
}

impl fmt::Display for QuantityRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "QuantityRecord(type={}, value={} {}, date={})",
            self.record_type.as_deref().unwrap_or("None"),
            self.value.as_deref().unwrap_or("None"),
            self.unit.as_deref().unwrap_or(""),
            display_date(self.start_date)
        )
    }
}

pub(crate) fn display_date(date: Option<DateTime<FixedOffset>>) -> String {
    date.map(|d| d.to_string())
        .unwrap_or_else(|| "None".to_string())
}
