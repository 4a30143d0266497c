use super::processors::{build_activity_summary, build_quantity_record, build_workout};
use quick_xml::events::attributes::AttrError;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use shared_types::{ActivitySummary, ExtractionError, QuantityRecord, Workout};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

const RECORD_TAG: &str = "Record";
const WORKOUT_TAG: &str = "Workout";
const ACTIVITY_SUMMARY_TAG: &str = "ActivitySummary";

/// Why a document failed to parse as well-formed markup.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error(transparent)]
    Xml(#[from] quick_xml::Error),

    #[error("invalid attribute: {0}")]
    Attribute(#[from] AttrError),

    #[error("element <{0}> is never closed")]
    UnclosedElement(String),

    #[error("unexpected closing tag </{0}>")]
    UnexpectedEndTag(String),

    #[error("document has no root element")]
    MissingRoot,

    #[error("content after the root element")]
    TrailingContent,

    #[error("text outside the root element")]
    TextOutsideRoot,

    #[error("attribute {0} contains a raw '<'")]
    InvalidAttributeValue(String),
}

/// A single element: its tag name and attributes in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
}

impl Element {
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }

    fn from_start(start: &BytesStart<'_>) -> Result<Self, DocumentError> {
        let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
        let mut attributes = Vec::new();

        for attr in start.attributes() {
            let attr = attr?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            if attr.value.contains(&b'<') {
                return Err(DocumentError::InvalidAttributeValue(key));
            }
            let value = attr.unescape_value()?.into_owned();
            attributes.push((key, value));
        }

        Ok(Self { name, attributes })
    }
}

/// The parsed export, flattened to its elements in document order.
///
/// Text content is not kept; every field of interest in the export lives in
/// attributes.
#[derive(Debug, Clone, Default)]
pub struct HealthDocument {
    elements: Vec<Element>,
}

impl HealthDocument {
    pub fn from_path(path: &Path) -> Result<Self, ExtractionError> {
        let bytes = fs::read(path).map_err(|e| ExtractionError::SourceNotFound {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let content = String::from_utf8(bytes).map_err(|e| ExtractionError::MalformedSource {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let document =
            Self::parse_str(&content).map_err(|e| ExtractionError::MalformedSource {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        tracing::debug!("Parsed {:?}: {} elements", path, document.len());
        Ok(document)
    }

    pub fn parse_str(content: &str) -> Result<Self, DocumentError> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        let mut reader = Reader::from_str(content);
        reader.config_mut().trim_text(true);

        let mut elements = Vec::new();
        let mut open: Vec<String> = Vec::new();
        let mut seen_root = false;

        loop {
            match reader.read_event()? {
                Event::Start(start) => {
                    if open.is_empty() {
                        if seen_root {
                            return Err(DocumentError::TrailingContent);
                        }
                        seen_root = true;
                    }
                    let element = Element::from_start(&start)?;
                    open.push(element.name.clone());
                    elements.push(element);
                }
                Event::Empty(start) => {
                    if open.is_empty() {
                        if seen_root {
                            return Err(DocumentError::TrailingContent);
                        }
                        seen_root = true;
                    }
                    elements.push(Element::from_start(&start)?);
                }
                Event::End(end) => {
                    if open.pop().is_none() {
                        let name = String::from_utf8_lossy(end.name().as_ref()).into_owned();
                        return Err(DocumentError::UnexpectedEndTag(name));
                    }
                }
                Event::Text(text) => {
                    // Entities must resolve even though text content is not kept.
                    text.unescape()?;
                    if open.is_empty() && !text.iter().all(u8::is_ascii_whitespace) {
                        return Err(DocumentError::TextOutsideRoot);
                    }
                }
                Event::CData(_) => {
                    if open.is_empty() {
                        return Err(DocumentError::TextOutsideRoot);
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if let Some(name) = open.pop() {
            return Err(DocumentError::UnclosedElement(name));
        }
        if !seen_root {
            return Err(DocumentError::MissingRoot);
        }

        Ok(Self { elements })
    }

    pub(crate) fn len(&self) -> usize {
        self.elements.len()
    }

    /// Elements with the given tag, at any depth, in document order.
    pub fn elements_named<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.elements.iter().filter(move |e| e.name == tag)
    }

    /// Quantity records, optionally restricted to one exact `type` value.
    ///
    /// An empty filter is treated as no filter.
    pub fn records(&self, record_type: Option<&str>) -> Vec<QuantityRecord> {
        let record_type = record_type.filter(|t| !t.is_empty());

        let records: Vec<QuantityRecord> = self
            .elements_named(RECORD_TAG)
            .filter(|e| record_type.map_or(true, |wanted| e.attribute("type") == Some(wanted)))
            .map(build_quantity_record)
            .collect();

        tracing::info!(
            "Extracted {} records (type filter: {})",
            records.len(),
            record_type.unwrap_or("none")
        );
        records
    }

    pub fn workouts(&self) -> Vec<Workout> {
        let workouts: Vec<Workout> = self
            .elements_named(WORKOUT_TAG)
            .map(build_workout)
            .collect();

        tracing::info!("Extracted {} workouts", workouts.len());
        workouts
    }

    /// Activity summaries. Elements without a usable date are skipped.
    pub fn activity_summaries(&self) -> Vec<ActivitySummary> {
        let summaries: Vec<ActivitySummary> = self
            .elements_named(ACTIVITY_SUMMARY_TAG)
            .filter_map(build_activity_summary)
            .collect();

        tracing::info!("Extracted {} activity summaries", summaries.len());
        summaries
    }

    /// Distinct non-empty record types, sorted.
    pub fn record_types(&self) -> Vec<String> {
        self.elements_named(RECORD_TAG)
            .filter_map(|e| e.attribute("type"))
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}
