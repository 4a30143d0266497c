//! Extractors Crate
//!
//! Reads a health data export (the flat-attribute XML produced by the iOS
//! Health app) into the typed records defined in `shared-types`.
//!
//! # Modules
//!
//! - `health_export`: document loading and record extraction
//! - `health_analysis`: filtering, grouping and totals over extracted records
//! - `csv_export`: tabular output of records and daily totals
//!
//! # Example
//!
//! ```rust,no_run
//! use extractors::{daily_totals, HealthExportExtractor};
//!
//! let mut extractor = HealthExportExtractor::new("export.xml");
//! let steps = extractor.parse_records(Some("HKQuantityTypeIdentifierStepCount"))?;
//! for day in daily_totals(&steps) {
//!     println!("{}: {}", day.date, day.total);
//! }
//! # Ok::<(), shared_types::ExtractionError>(())
//! ```

pub mod csv_export;
pub mod health_analysis;
pub mod health_export;

// Re-export commonly used types
pub use csv_export::{write_daily_totals_csv, write_records_csv, ExportError};
pub use health_analysis::{
    calculate_daily_total, convert_unit, daily_totals, filter_by_date_range,
    filter_summaries_by_date_range, group_by_date, qualify_record_type, simplify_record_type,
    DailyTotal,
};
pub use health_export::{parse_health_date, HealthDocument, HealthExportExtractor, LoadState};

pub use shared_types::{ActivitySummary, ExtractionError, QuantityRecord, Workout};
