#![allow(clippy::unwrap_used)]
//! Property-based tests for the exporters and the summary report
//!
//! Uses proptest to check that encoded output stays readable and aligned
//! for arbitrary cell contents.

use floatchat::export::ExportRequest;
use floatchat::export::ascii::render_ascii;
use floatchat::export::csv::render_csv;
use floatchat::export::json::render_json;
use floatchat::record::{Record, Value};
use floatchat::report::{NumericDetection, column_statistics};
use proptest::prelude::*;
use unicode_width::UnicodeWidthStr as _;

/// Text cells including the characters CSV has to quote.
fn text_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ,;\"\r\n°é]{0,12}"
}

/// Numbers that survive a decimal round trip exactly.
fn number_strategy() -> impl Strategy<Value = f64> {
    (-1_000_000i32..1_000_000).prop_map(|n| f64::from(n) / 8.0)
}

fn value_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        number_strategy().prop_map(Value::Number),
        text_strategy().prop_map(Value::Text),
    ]
}

fn records_strategy() -> impl Strategy<Value = Vec<Record>> {
    prop::collection::vec(prop::collection::vec(value_strategy(), 3), 1..20).prop_map(|rows| {
        rows.into_iter()
            .map(|cells| {
                cells
                    .into_iter()
                    .enumerate()
                    .map(|(i, v)| (format!("col{i}"), v))
                    .collect::<Record>()
            })
            .collect::<Vec<_>>()
    })
}

proptest! {
    /// Property: a CSV reader recovers every text cell exactly
    #[test]
    fn prop_csv_text_cells_read_back(rows in prop::collection::vec((text_strategy(), text_strategy()), 1..20)) {
        let records: Vec<Record> = rows
            .iter()
            .map(|(a, b)| Record::new().with("a", a.as_str()).with("b", b.as_str()))
            .collect();
        let csv = render_csv(&ExportRequest::new(&records, "prop")).unwrap().unwrap();

        let mut reader = csv::Reader::from_reader(csv.as_bytes());
        let read: Vec<(String, String)> = reader
            .records()
            .map(|r| {
                let r = r.unwrap();
                (r[0].to_owned(), r[1].to_owned())
            })
            .collect();
        prop_assert_eq!(read, rows);
    }

    /// Property: every CSV row has as many fields as the header
    #[test]
    fn prop_csv_rows_match_header(records in records_strategy()) {
        let csv = render_csv(&ExportRequest::new(&records, "prop")).unwrap().unwrap();
        let mut reader = csv::Reader::from_reader(csv.as_bytes());
        let header_len = reader.headers().unwrap().len();
        prop_assert_eq!(header_len, 3);
        for row in reader.records() {
            prop_assert_eq!(row.unwrap().len(), header_len);
        }
    }

    /// Property: JSON export decodes to the records it was given
    #[test]
    fn prop_json_decodes_to_input(records in records_strategy()) {
        let json = render_json(&records).unwrap();
        let decoded: Vec<Record> = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(decoded, records);
    }

    /// Property: all table lines share one display width
    #[test]
    fn prop_ascii_lines_align(records in records_strategy()) {
        let table = render_ascii(&ExportRequest::new(&records, "prop")).unwrap();
        let lines: Vec<&str> = table.lines().collect();

        prop_assert_eq!(lines.len(), records.len() + 4);
        let width = lines[0].width();
        for line in &lines {
            prop_assert_eq!(line.width(), width);
        }
        for line in lines.iter().filter(|l| l.starts_with('|')) {
            prop_assert_eq!(line.matches(" |").count(), 3);
        }
    }

    /// Property: statistics stay ordered and count only numbers
    #[test]
    fn prop_statistics_bounds(values in prop::collection::vec(number_strategy(), 1..50)) {
        let records: Vec<Record> = values.iter().map(|&v| Record::new().with("temp", v)).collect();
        let stats = column_statistics(&records, NumericDetection::FirstRecord);

        prop_assert_eq!(stats.len(), 1);
        let s = &stats[0];
        prop_assert_eq!(s.count, values.len());
        prop_assert!(s.min <= s.mean + 1e-9);
        prop_assert!(s.mean <= s.max + 1e-9);
    }
}
