//! Typed records extracted from a health data export.
//!
//! These are passive value types: they carry the attributes found in the
//! source document and nothing else. Extraction lives in the `extractors`
//! crate.

pub mod activity_summary;
pub mod extraction;
pub mod health_record;
pub mod workout;

pub use activity_summary::ActivitySummary;
pub use extraction::{ExtractionError, Timestamped};
pub use health_record::QuantityRecord;
pub use workout::Workout;
