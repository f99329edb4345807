//! Export of record batches to downloadable files.
//!
//! Each format lives in its own sub-module and follows the same shape: take
//! an [`ExportRequest`], build the file contents, hand them to an
//! [`ExportSink`] and report an [`ExportOutcome`].
//!
//! | Format        | Function               | File name        |
//! |---------------|------------------------|------------------|
//! | CSV           | [`export_to_csv`]      | `<name>.csv`     |
//! | JSON          | [`export_to_json`]     | `<name>.json`    |
//! | ASCII table   | [`export_to_ascii`]    | `<name>.txt`     |
//! | Pseudo-NetCDF | [`export_to_netcdf`]   | `<name>.nc.json` |
//!
//! An empty record list never produces a file.
//!
//! ```no_run
//! use floatchat::export::{export, ExportFormat, ExportRequest, DirectorySink};
//! use floatchat::record::Record;
//!
//! # fn main() -> floatchat::error::Result<()> {
//! let records = vec![Record::new().with("depth", 10).with("temp", 5.2)];
//! let mut sink = DirectorySink::new("exports");
//!
//! export(ExportFormat::Csv, &ExportRequest::new(&records, "profile"), &mut sink)?;
//! # Ok(())
//! # }
//! ```

pub mod ascii;
pub mod csv;
pub mod json;
pub mod netcdf;
pub mod sink;

pub use ascii::export_to_ascii;
pub use self::csv::export_to_csv;
pub use json::export_to_json;
pub use netcdf::{NetcdfSettings, export_to_netcdf, export_to_netcdf_with};
pub use sink::{DirectorySink, ExportFile, ExportSink, MemorySink};

use crate::error::{FloatChatError, Result};
use crate::record::{ColumnDescriptor, Record};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Output formats offered by the export buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Json,
    Ascii,
    Netcdf,
}

impl ExportFormat {
    pub const ALL: [Self; 4] = [Self::Csv, Self::Json, Self::Ascii, Self::Netcdf];

    /// File name suffix, without the leading dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Ascii => "txt",
            Self::Netcdf => "nc.json",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Csv => "text/csv;charset=utf-8",
            Self::Json | Self::Netcdf => "application/json",
            Self::Ascii => "text/plain;charset=utf-8",
        }
    }

    /// `<base>.<extension>`
    pub fn file_name(self, base: &str) -> String {
        format!("{base}.{}", self.extension())
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Ascii => "ascii",
            Self::Netcdf => "netcdf",
        };
        f.write_str(name)
    }
}

impl FromStr for ExportFormat {
    type Err = FloatChatError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "ascii" | "txt" => Ok(Self::Ascii),
            "netcdf" | "nc" => Ok(Self::Netcdf),
            other => Err(FloatChatError::Other(format!(
                "Unsupported export format: {other}"
            ))),
        }
    }
}

/// One export call: the records, the base file name and optional columns.
///
/// The records are borrowed; exporting never mutates them.
#[derive(Debug, Clone, Copy)]
pub struct ExportRequest<'a> {
    pub records: &'a [Record],
    pub filename: &'a str,
    pub columns: Option<&'a [ColumnDescriptor]>,
}

impl<'a> ExportRequest<'a> {
    pub fn new(records: &'a [Record], filename: &'a str) -> Self {
        Self {
            records,
            filename,
            columns: None,
        }
    }

    #[must_use]
    pub fn with_columns(mut self, columns: &'a [ColumnDescriptor]) -> Self {
        self.columns = Some(columns);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// What an export call did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// No records, nothing was saved.
    Skipped,
    /// The requested file was saved under `name`.
    Saved { name: String },
    /// The primary format failed and a fallback file was saved under `name`.
    FellBack { name: String },
}

impl ExportOutcome {
    /// Name of the saved file, if any.
    pub fn file_name(&self) -> Option<&str> {
        match self {
            Self::Skipped => None,
            Self::Saved { name } | Self::FellBack { name } => Some(name),
        }
    }
}

/// Runs the exporter for `format`.
///
/// # Errors
///
/// Returns an error if encoding fails or the sink rejects the file (for
/// pseudo-NetCDF, only when the JSON fallback fails as well).
pub fn export(
    format: ExportFormat,
    request: &ExportRequest<'_>,
    sink: &mut dyn ExportSink,
) -> Result<ExportOutcome> {
    match format {
        ExportFormat::Csv => export_to_csv(request, sink),
        ExportFormat::Json => export_to_json(request, sink),
        ExportFormat::Ascii => export_to_ascii(request, sink),
        ExportFormat::Netcdf => export_to_netcdf(request, sink),
    }
}

/// Runs several formats in order, stopping at the first error.
///
/// # Errors
///
/// Returns the first error reported by [`export`].
pub fn export_all(
    formats: &[ExportFormat],
    request: &ExportRequest<'_>,
    sink: &mut dyn ExportSink,
) -> Result<Vec<(ExportFormat, ExportOutcome)>> {
    formats
        .iter()
        .map(|&format| export(format, request, sink).map(|outcome| (format, outcome)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profiles() -> Vec<Record> {
        vec![
            Record::new().with("depth", 10).with("temp", 5),
            Record::new().with("depth", 20).with("temp", 7),
        ]
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("CSV".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert_eq!("txt".parse::<ExportFormat>().unwrap(), ExportFormat::Ascii);
        assert_eq!("nc".parse::<ExportFormat>().unwrap(), ExportFormat::Netcdf);
        assert!("xlsx".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn test_file_names() {
        assert_eq!(ExportFormat::Netcdf.file_name("argo"), "argo.nc.json");
        assert_eq!(ExportFormat::Ascii.file_name("argo"), "argo.txt");
    }

    #[test]
    fn test_export_all_saves_one_file_per_format() {
        let records = profiles();
        let mut sink = MemorySink::new();
        let outcomes =
            export_all(&ExportFormat::ALL, &ExportRequest::new(&records, "argo"), &mut sink)
                .unwrap();

        let names: Vec<&str> = outcomes.iter().filter_map(|(_, o)| o.file_name()).collect();
        assert_eq!(names, vec!["argo.csv", "argo.json", "argo.txt", "argo.nc.json"]);
        assert_eq!(sink.files().len(), 4);
    }

    #[test]
    fn test_empty_request_saves_nothing() {
        let mut sink = MemorySink::new();
        for format in ExportFormat::ALL {
            let outcome = export(format, &ExportRequest::new(&[], "empty"), &mut sink).unwrap();
            assert_eq!(outcome, ExportOutcome::Skipped, "{format} should skip");
        }
        assert!(sink.files().is_empty());
    }
}
