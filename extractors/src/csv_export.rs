use crate::health_analysis::DailyTotal;
use serde::Serialize;
use shared_types::QuantityRecord;
use std::io::Write;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Serialize)]
struct RecordRow<'a> {
    #[serde(rename = "Timestamp")]
    timestamp: String,
    #[serde(rename = "Value")]
    value: &'a str,
    #[serde(rename = "Unit")]
    unit: &'a str,
    #[serde(rename = "Source")]
    source: &'a str,
}

/// Write one row per day. Returns the number of rows written.
pub fn write_daily_totals<W: Write>(
    writer: W,
    rows: &[DailyTotal],
) -> Result<usize, ExportError> {
    let mut writer = csv::Writer::from_writer(writer);

    if rows.is_empty() {
        writer.write_record(["Date", "Total", "Record Count"])?;
    }
    for row in rows {
        writer.serialize(row)?;
    }

    writer.flush()?;
    Ok(rows.len())
}

/// Write one row per record with a known start date. Returns the number of
/// rows written.
pub fn write_records<W: Write>(
    writer: W,
    records: &[QuantityRecord],
) -> Result<usize, ExportError> {
    let mut writer = csv::Writer::from_writer(writer);

    let rows: Vec<RecordRow<'_>> = records
        .iter()
        .filter_map(|record| {
            Some(RecordRow {
                timestamp: record.start_date?.to_rfc3339(),
                value: record.value.as_deref().unwrap_or_default(),
                unit: record.unit.as_deref().unwrap_or_default(),
                source: record.source_name.as_deref().unwrap_or_default(),
            })
        })
        .collect();

    if rows.is_empty() {
        writer.write_record(["Timestamp", "Value", "Unit", "Source"])?;
    }
    for row in &rows {
        writer.serialize(row)?;
    }

    writer.flush()?;
    Ok(rows.len())
}

pub fn write_daily_totals_csv(path: &Path, rows: &[DailyTotal]) -> Result<usize, ExportError> {
    let file = std::fs::File::create(path)?;
    let written = write_daily_totals(file, rows)?;
    tracing::info!("Wrote {} daily rows to {:?}", written, path);
    Ok(written)
}

pub fn write_records_csv(path: &Path, records: &[QuantityRecord]) -> Result<usize, ExportError> {
    let file = std::fs::File::create(path)?;
    let written = write_records(file, records)?;
    tracing::info!("Wrote {} records to {:?}", written, path);
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    fn record(value: &str, start: Option<&str>) -> QuantityRecord {
        QuantityRecord {
            record_type: Some("HKQuantityTypeIdentifierHeartRate".to_string()),
            source_name: Some("Apple Watch".to_string()),
            value: Some(value.to_string()),
            unit: Some("count/min".to_string()),
            start_date: start.and_then(|s| DateTime::parse_from_rfc3339(s).ok()),
            end_date: None,
            creation_date: None,
        }
    }

    #[test]
    fn test_write_records_skips_undated() {
        let records = vec![
            record("72", Some("2024-02-15T10:30:00-05:00")),
            record("80", None),
        ];

        let mut out = Vec::new();
        let written = write_records(&mut out, &records).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(written, 1);
        assert_eq!(
            text,
            "Timestamp,Value,Unit,Source\n2024-02-15T10:30:00-05:00,72,count/min,Apple Watch\n"
        );
    }

    #[test]
    fn test_write_records_empty_still_has_header() {
        let mut out = Vec::new();
        assert_eq!(write_records(&mut out, &[]).unwrap(), 0);
        assert_eq!(String::from_utf8(out).unwrap(), "Timestamp,Value,Unit,Source\n");
    }

    #[test]
    fn test_write_daily_totals_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("daily_steps.csv");
        let rows = vec![
            DailyTotal {
                date: "2024-02-15".to_string(),
                total: 2000.0,
                count: 2,
            },
            DailyTotal {
                date: "2024-02-16".to_string(),
                total: 450.5,
                count: 1,
            },
        ];

        assert_eq!(write_daily_totals_csv(&path, &rows).unwrap(), 2);

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Date,Total,Record Count");
        assert_eq!(lines[1], "2024-02-15,2000.0,2");
        assert_eq!(lines[2], "2024-02-16,450.5,1");
    }

    #[test]
    fn test_write_to_missing_directory_fails() {
        let err = write_records_csv(Path::new("/nonexistent/dir/out.csv"), &[]).unwrap_err();
        assert!(matches!(err, ExportError::Io(_)));
    }
}
