//! JSON export: the record array, pretty-printed with 2-space indentation.
//!
//! Column descriptors do not apply here; every field of every record is
//! written so that decoding the file gives back the original records.

use super::{ExportFile, ExportFormat, ExportOutcome, ExportRequest, ExportSink};
use crate::error::Result;
use crate::record::Record;

/// Pretty JSON for a record array.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn render_json(records: &[Record]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// Exports the records as `<filename>.json`.
///
/// # Errors
///
/// Returns an error if serialization fails or the sink rejects the file.
pub fn export_to_json(
    request: &ExportRequest<'_>,
    sink: &mut dyn ExportSink,
) -> Result<ExportOutcome> {
    if request.is_empty() {
        log::warn!("JSON export of '{}' skipped: no records", request.filename);
        return Ok(ExportOutcome::Skipped);
    }

    let format = ExportFormat::Json;
    let name = format.file_name(request.filename);
    let text = render_json(request.records)?;
    log::debug!("JSON export: {} records into {name}", request.records.len());
    sink.save(ExportFile::new(name.clone(), format.mime_type(), text.into_bytes()))?;
    Ok(ExportOutcome::Saved { name })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::MemorySink;
    use crate::record::Value;
    use chrono::{TimeZone as _, Utc};

    #[test]
    fn test_two_space_indent() {
        let records = vec![Record::new().with("depth", 10).with("temp", 5.5)];
        assert_eq!(
            render_json(&records).unwrap(),
            "[\n  {\n    \"depth\": 10,\n    \"temp\": 5.5\n  }\n]"
        );
    }

    #[test]
    fn test_decoding_gives_back_records() {
        let records = vec![
            Record::new()
                .with("platform", "5904471")
                .with("depth", 12.5)
                .with("qc", Value::Null)
                .with("valid", true),
            Record::new().with("platform", "5904472").with("depth", -3),
        ];
        let mut sink = MemorySink::new();
        export_to_json(&ExportRequest::new(&records, "profiles"), &mut sink).unwrap();

        let file = sink.get("profiles.json").unwrap();
        let decoded: Vec<Record> = serde_json::from_slice(&file.contents).unwrap();
        assert_eq!(decoded, records);
    }

    #[test]
    fn test_dates_are_iso_strings() {
        let when = Utc.with_ymd_and_hms(2023, 7, 14, 6, 30, 0).unwrap();
        let records = vec![Record::new().with("time", when)];
        let text = render_json(&records).unwrap();
        assert!(text.contains("\"time\": \"2023-07-14T06:30:00.000Z\""));
    }

    #[test]
    fn test_empty_records_skip() {
        let mut sink = MemorySink::new();
        let outcome = export_to_json(&ExportRequest::new(&[], "x"), &mut sink).unwrap();
        assert_eq!(outcome, ExportOutcome::Skipped);
        assert!(sink.files().is_empty());
    }
}
