//! Summary statistics report for record batches.
//!
//! For every numeric column the report lists min, max, mean and the number
//! of numeric values:
//!
//! ```text
//! Float 5904471 profile
//! =====================
//!
//! Total Records: 3
//! Generated: 2026-10-16 08:30:00 UTC
//!
//! temp:
//!   Min: 5.00
//!   Max: 9.00
//!   Mean: 7.00
//!   Count: 3
//! ```
//!
//! ## Numeric column detection
//!
//! By default a column counts as numeric when the *first* record holds a
//! number there. A column that is numeric only from the second record on is
//! left out of the report. [`NumericDetection::AnyRecord`] scans every record
//! instead.

use crate::record::{Record, format_fixed};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How numeric columns are picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericDetection {
    /// Keys whose value in the first record is a number.
    #[default]
    FirstRecord,
    /// Keys holding a number in any record, in order of first appearance.
    AnyRecord,
}

/// Statistics for one numeric column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnStatistics {
    pub key: String,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub count: usize,
}

fn numeric_keys(records: &[Record], detection: NumericDetection) -> Vec<String> {
    match detection {
        NumericDetection::FirstRecord => records
            .first()
            .map(|first| {
                first
                    .iter()
                    .filter(|(_, v)| v.as_number().is_some())
                    .map(|(k, _)| k.to_owned())
                    .collect()
            })
            .unwrap_or_default(),
        NumericDetection::AnyRecord => {
            let mut keys: Vec<String> = Vec::new();
            for record in records {
                for (key, value) in record.iter() {
                    if value.as_number().is_some() && !keys.iter().any(|k| k == key) {
                        keys.push(key.to_owned());
                    }
                }
            }
            keys
        }
    }
}

/// Min, max, mean and count for every numeric column.
///
/// Only finite numbers enter the statistics and the count; text, nulls,
/// missing keys and NaN or infinite values in a numeric column are ignored.
/// A column with no finite value is left out.
pub fn column_statistics(
    records: &[Record],
    detection: NumericDetection,
) -> Vec<ColumnStatistics> {
    numeric_keys(records, detection)
        .into_iter()
        .filter_map(|key| {
            let values: Vec<f64> = records
                .iter()
                .filter_map(|r| r.get(&key).and_then(|v| v.as_number()))
                .filter(|n| n.is_finite())
                .collect();
            if values.is_empty() {
                return None;
            }

            let min = values.iter().copied().fold(f64::INFINITY, f64::min);
            let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            let sum: f64 = values.iter().sum();
            let mean = sum / values.len() as f64;

            Some(ColumnStatistics {
                key,
                min,
                max,
                mean,
                count: values.len(),
            })
        })
        .collect()
}

/// Text report with the current time and first-record detection.
pub fn generate_summary_stats(records: &[Record], title: &str) -> String {
    generate_summary_stats_at(records, title, Utc::now(), NumericDetection::default())
}

/// Text report with an explicit timestamp and detection mode.
///
/// Returns an empty string for an empty record list.
pub fn generate_summary_stats_at(
    records: &[Record],
    title: &str,
    generated: DateTime<Utc>,
    detection: NumericDetection,
) -> String {
    if records.is_empty() {
        return String::new();
    }

    let mut report = String::new();
    report.push_str(&format!("{title}\n"));
    report.push_str(&format!("{}\n", "=".repeat(title.chars().count())));
    report.push('\n');
    report.push_str(&format!("Total Records: {}\n", records.len()));
    report.push_str(&format!("Generated: {}\n", generated.format("%Y-%m-%d %H:%M:%S UTC")));
    report.push('\n');

    for stats in column_statistics(records, detection) {
        report.push_str(&format!("{}:\n", stats.key));
        report.push_str(&format!("  Min: {}\n", format_fixed(stats.min, 2)));
        report.push_str(&format!("  Max: {}\n", format_fixed(stats.max, 2)));
        report.push_str(&format!("  Mean: {}\n", format_fixed(stats.mean, 2)));
        report.push_str(&format!("  Count: {}\n", stats.count));
        report.push('\n');
    }

    log::debug!("Summary report '{title}' over {} records", records.len());
    report
}
