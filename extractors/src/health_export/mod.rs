mod date_parser;
mod document;
mod processors;

pub use date_parser::{parse_health_date, parse_summary_date};
pub use document::{DocumentError, Element, HealthDocument};

use shared_types::{ActivitySummary, ExtractionError, QuantityRecord, Workout};
use std::path::{Path, PathBuf};

/// Lifecycle of the extractor's document.
#[derive(Debug, Default)]
pub enum LoadState {
    #[default]
    Unloaded,
    Loaded(HealthDocument),
    Failed(ExtractionError),
}

/// Extracts typed records from a health export file.
///
/// The file is read and parsed on the first extraction call and the parsed
/// document is reused afterwards. A failed load is remembered; the next call
/// attempts the parse again.
pub struct HealthExportExtractor {
    path: PathBuf,
    state: LoadState,
}

impl HealthExportExtractor {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            state: LoadState::Unloaded,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    /// The parsed document, if loading has already succeeded.
    ///
    /// Useful for read-only access from several threads once loaded.
    pub fn document(&self) -> Option<&HealthDocument> {
        match &self.state {
            LoadState::Loaded(document) => Some(document),
            _ => None,
        }
    }

    pub fn load(&mut self) -> Result<&HealthDocument, ExtractionError> {
        if !matches!(self.state, LoadState::Loaded(_)) {
            tracing::info!("Loading health export from {:?}", self.path);
            self.state = match HealthDocument::from_path(&self.path) {
                Ok(document) => LoadState::Loaded(document),
                Err(e) => {
                    tracing::warn!("Failed to load health export: {}", e);
                    LoadState::Failed(e)
                }
            };
        }

        match &self.state {
            LoadState::Loaded(document) => Ok(document),
            LoadState::Failed(e) => Err(e.clone()),
            LoadState::Unloaded => unreachable!("load always leaves a loaded or failed state"),
        }
    }

    pub fn parse_records(
        &mut self,
        record_type: Option<&str>,
    ) -> Result<Vec<QuantityRecord>, ExtractionError> {
        Ok(self.load()?.records(record_type))
    }

    pub fn parse_workouts(&mut self) -> Result<Vec<Workout>, ExtractionError> {
        Ok(self.load()?.workouts())
    }

    pub fn parse_activity_summaries(&mut self) -> Result<Vec<ActivitySummary>, ExtractionError> {
        Ok(self.load()?.activity_summaries())
    }

    pub fn record_types(&mut self) -> Result<Vec<String>, ExtractionError> {
        Ok(self.load()?.record_types())
    }
}
