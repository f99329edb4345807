//! CSV export.
//!
//! Header line from the column labels, one line per record. Text cells that
//! contain the delimiter, a double quote or a line break are quoted, with
//! inner quotes doubled; numbers are written at full precision.
//!
//! ```text
//! depth,temp,comment
//! 10,5.25,"A, ""B"""
//! 20,,
//! ```

use super::{ExportFile, ExportFormat, ExportOutcome, ExportRequest, ExportSink};
use crate::error::{FloatChatError, Result};
use crate::record::{Record, resolve_columns};
use ::csv::{QuoteStyle, Terminator, WriterBuilder};

/// Renders the request as CSV text, or `None` for an empty record list.
///
/// # Errors
///
/// Returns an error if the CSV writer fails.
pub fn render_csv(request: &ExportRequest<'_>) -> Result<Option<String>> {
    if request.is_empty() {
        return Ok(None);
    }

    let columns = resolve_columns(request.records, request.columns);
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(columns.iter().map(|c| c.label.as_str()))?;
    for record in request.records {
        writer.write_record(row(record, columns.iter().map(|c| c.key.as_str())))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| FloatChatError::Csv(e.to_string()))?;
    String::from_utf8(bytes)
        .map(Some)
        .map_err(|e| FloatChatError::Csv(e.to_string()))
}

fn row<'a>(record: &Record, keys: impl Iterator<Item = &'a str>) -> Vec<String> {
    keys.map(|key| record.get_or_null(key).to_string()).collect()
}

/// Exports the request as `<filename>.csv`.
///
/// # Errors
///
/// Returns an error if rendering fails or the sink rejects the file.
pub fn export_to_csv(
    request: &ExportRequest<'_>,
    sink: &mut dyn ExportSink,
) -> Result<ExportOutcome> {
    let Some(text) = render_csv(request)? else {
        log::warn!("CSV export of '{}' skipped: no records", request.filename);
        return Ok(ExportOutcome::Skipped);
    };

    let format = ExportFormat::Csv;
    let name = format.file_name(request.filename);
    log::debug!("CSV export: {} rows into {name}", request.records.len());
    sink.save(ExportFile::new(name.clone(), format.mime_type(), text.into_bytes()))?;
    Ok(ExportOutcome::Saved { name })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::MemorySink;
    use crate::record::{ColumnDescriptor, Value};

    #[test]
    fn test_quotes_commas_and_quotes() {
        let records = vec![Record::new().with("name", r#"A, "B""#)];
        let text = render_csv(&ExportRequest::new(&records, "x")).unwrap().unwrap();
        assert_eq!(text, "name\n\"A, \"\"B\"\"\"\n");
    }

    #[test]
    fn test_numbers_keep_precision_and_nulls_are_empty() {
        let records = vec![
            Record::new().with("depth", 10).with("temp", 5.123_456_789).with("qc", Value::Null),
            Record::new().with("depth", 20).with("temp", 7),
        ];
        let text = render_csv(&ExportRequest::new(&records, "x")).unwrap().unwrap();
        assert_eq!(text, "depth,temp,qc\n10,5.123456789,\n20,7,\n");
    }

    #[test]
    fn test_single_empty_cell_is_quoted() {
        // A bare empty line would read back as no record at all
        let records = vec![Record::new().with("a", Value::Null)];
        let text = render_csv(&ExportRequest::new(&records, "x")).unwrap().unwrap();
        assert_eq!(text, "a\n\"\"\n");

        let mut reader = ::csv::Reader::from_reader(text.as_bytes());
        let rows: Vec<::csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][0], "");
    }

    #[test]
    fn test_columns_select_and_label() {
        let records = vec![Record::new().with("depth", 10).with("temp", 5).with("psal", 35)];
        let columns = vec![
            ColumnDescriptor::new("temp", "Temperature"),
            ColumnDescriptor::new("depth", "Depth (m)"),
        ];
        let request = ExportRequest::new(&records, "x").with_columns(&columns);
        let text = render_csv(&request).unwrap().unwrap();
        assert_eq!(text, "Temperature,Depth (m)\n5,10\n");
    }

    #[test]
    fn test_export_saves_named_file() {
        let records = vec![Record::new().with("depth", 10)];
        let mut sink = MemorySink::new();
        let outcome = export_to_csv(&ExportRequest::new(&records, "float_5904471"), &mut sink)
            .unwrap();

        assert_eq!(
            outcome,
            ExportOutcome::Saved {
                name: "float_5904471.csv".to_owned()
            }
        );
        let file = sink.get("float_5904471.csv").unwrap();
        assert_eq!(file.mime_type, "text/csv;charset=utf-8");
        assert_eq!(file.text(), "depth\n10\n");
    }

    #[test]
    fn test_empty_records_skip() {
        let mut sink = MemorySink::new();
        let outcome = export_to_csv(&ExportRequest::new(&[], "x"), &mut sink).unwrap();
        assert_eq!(outcome, ExportOutcome::Skipped);
        assert!(sink.files().is_empty());
    }
}
