use chrono::{DateTime, FixedOffset};
use std::path::{Path, PathBuf};

/// Document-level failures.
///
/// Only these cross the extractor boundary. Per-field problems (a bad
/// timestamp, a non-numeric duration) are absorbed where they occur and
/// never show up here.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExtractionError {
    #[error("Source not found: {path:?}: {reason}")]
    SourceNotFound { path: PathBuf, reason: String },

    #[error("Malformed source: {path:?}: {reason}")]
    MalformedSource { path: PathBuf, reason: String },
}

impl ExtractionError {
    pub fn path(&self) -> &Path {
        match self {
            ExtractionError::SourceNotFound { path, .. } => path.as_path(),
            ExtractionError::MalformedSource { path, .. } => path.as_path(),
        }
    }
}

/// Records that carry an optional start timestamp.
pub trait Timestamped {
    fn start_date(&self) -> Option<DateTime<FixedOffset>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_names_the_path() {
        let err = ExtractionError::MalformedSource {
            path: PathBuf::from("export.xml"),
            reason: "element <HealthData> is never closed".to_string(),
        };

        assert_eq!(err.path(), Path::new("export.xml"));
        assert_eq!(
            err.to_string(),
            "Malformed source: \"export.xml\": element <HealthData> is never closed"
        );
    }
}
