//! Pseudo-NetCDF export.
//!
//! This is **not** a NetCDF encoder. The records are wrapped in a JSON
//! document shaped after a NetCDF header and saved as `<name>.nc.json`:
//!
//! ```json
//! {
//!   "dimensions": { "time": 3, "depth": 100 },
//!   "variables": {},
//!   "attributes": {
//!     "title": "FloatChat Argo Float Data",
//!     "institution": "FloatChat",
//!     "source": "Argo Global Data Assembly Centre",
//!     "created": "2026-10-16T08:30:00.000Z"
//!   },
//!   "data": [ ... ]
//! }
//! ```
//!
//! Tools expecting CF-compliant NetCDF cannot read these files.
//!
//! If building or saving the document fails, the error is logged and the
//! records are exported as plain JSON under `<name>_netcdf_fallback.json`.

use super::{ExportFile, ExportFormat, ExportOutcome, ExportRequest, ExportSink, export_to_json};
use crate::error::Result;
use crate::record::Record;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Suffix appended to the base name when falling back to JSON.
pub const FALLBACK_SUFFIX: &str = "_netcdf_fallback";

/// Header values written into every pseudo-NetCDF document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetcdfSettings {
    pub title: String,
    pub institution: String,
    pub source: String,
    /// Size reported for the `depth` dimension.
    pub depth_levels: u32,
}

impl Default for NetcdfSettings {
    fn default() -> Self {
        Self {
            title: "FloatChat Argo Float Data".to_owned(),
            institution: "FloatChat".to_owned(),
            source: "Argo Global Data Assembly Centre".to_owned(),
            depth_levels: 100,
        }
    }
}

#[derive(Debug, Serialize)]
struct Dimensions {
    time: usize,
    depth: u32,
}

#[derive(Debug, Serialize)]
struct Attributes<'a> {
    title: &'a str,
    institution: &'a str,
    source: &'a str,
    created: String,
}

#[derive(Debug, Serialize)]
struct NetcdfDocument<'a> {
    dimensions: Dimensions,
    variables: BTreeMap<String, serde_json::Value>,
    attributes: Attributes<'a>,
    data: &'a [Record],
}

/// Pretty JSON for the pseudo-NetCDF document.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn render_netcdf(
    records: &[Record],
    settings: &NetcdfSettings,
    created: DateTime<Utc>,
) -> Result<String> {
    let document = NetcdfDocument {
        dimensions: Dimensions {
            time: records.len(),
            depth: settings.depth_levels,
        },
        variables: BTreeMap::new(),
        attributes: Attributes {
            title: &settings.title,
            institution: &settings.institution,
            source: &settings.source,
            created: created.to_rfc3339_opts(SecondsFormat::Millis, true),
        },
        data: records,
    };
    Ok(serde_json::to_string_pretty(&document)?)
}

/// Exports with the default header values.
///
/// # Errors
///
/// See [`export_to_netcdf_with`].
pub fn export_to_netcdf(
    request: &ExportRequest<'_>,
    sink: &mut dyn ExportSink,
) -> Result<ExportOutcome> {
    export_to_netcdf_with(request, &NetcdfSettings::default(), sink)
}

/// Exports the request as `<filename>.nc.json`, falling back to JSON.
///
/// # Errors
///
/// Only when the JSON fallback fails too; a failure of the primary path is
/// logged and never returned.
pub fn export_to_netcdf_with(
    request: &ExportRequest<'_>,
    settings: &NetcdfSettings,
    sink: &mut dyn ExportSink,
) -> Result<ExportOutcome> {
    if request.is_empty() {
        log::warn!("NetCDF export of '{}' skipped: no records", request.filename);
        return Ok(ExportOutcome::Skipped);
    }

    let format = ExportFormat::Netcdf;
    let name = format.file_name(request.filename);
    let primary = render_netcdf(request.records, settings, Utc::now()).and_then(|text| {
        log::debug!("NetCDF export: {} records into {name}", request.records.len());
        sink.save(ExportFile::new(name.clone(), format.mime_type(), text.into_bytes()))
    });

    match primary {
        Ok(()) => Ok(ExportOutcome::Saved { name }),
        Err(e) => {
            log::error!("Error exporting NetCDF '{name}': {e}");
            let fallback_base = format!("{}{FALLBACK_SUFFIX}", request.filename);
            let fallback = ExportRequest::new(request.records, &fallback_base);
            match export_to_json(&fallback, sink)? {
                ExportOutcome::Saved { name } | ExportOutcome::FellBack { name } => {
                    Ok(ExportOutcome::FellBack { name })
                }
                ExportOutcome::Skipped => Ok(ExportOutcome::Skipped),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FloatChatError;
    use crate::export::MemorySink;
    use chrono::TimeZone as _;

    /// Rejects every `.nc.json` file and records the rest.
    #[derive(Default)]
    struct NoNetcdfSink {
        inner: MemorySink,
    }

    impl ExportSink for NoNetcdfSink {
        fn save(&mut self, file: ExportFile) -> Result<()> {
            if file.name.ends_with(".nc.json") {
                return Err(FloatChatError::Other("disk quota exceeded".to_owned()));
            }
            self.inner.save(file)
        }
    }

    struct BrokenSink;

    impl ExportSink for BrokenSink {
        fn save(&mut self, _file: ExportFile) -> Result<()> {
            Err(FloatChatError::Other("read-only".to_owned()))
        }
    }

    fn profiles() -> Vec<Record> {
        vec![
            Record::new().with("depth", 10).with("temp", 5),
            Record::new().with("depth", 20).with("temp", 7),
            Record::new().with("depth", 30).with("temp", 9),
        ]
    }

    #[test]
    fn test_document_layout() {
        let created = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
        let text = render_netcdf(&profiles(), &NetcdfSettings::default(), created).unwrap();
        let doc: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_eq!(doc["dimensions"]["time"], 3);
        assert_eq!(doc["dimensions"]["depth"], 100);
        assert_eq!(doc["variables"], serde_json::json!({}));
        assert_eq!(doc["attributes"]["title"], "FloatChat Argo Float Data");
        assert_eq!(doc["attributes"]["created"], "2026-01-02T03:04:05.000Z");
        assert_eq!(doc["data"][2]["temp"], 9);
        assert!(text.starts_with("{\n  \"dimensions\""));
    }

    #[test]
    fn test_custom_settings() {
        let settings = NetcdfSettings {
            title: "Indian Ocean floats".to_owned(),
            depth_levels: 2000,
            ..NetcdfSettings::default()
        };
        let text = render_netcdf(&profiles(), &settings, Utc::now()).unwrap();
        let doc: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(doc["dimensions"]["depth"], 2000);
        assert_eq!(doc["attributes"]["title"], "Indian Ocean floats");
    }

    #[test]
    fn test_saves_nc_json() {
        let records = profiles();
        let mut sink = MemorySink::new();
        let outcome = export_to_netcdf(&ExportRequest::new(&records, "argo"), &mut sink).unwrap();
        assert_eq!(
            outcome,
            ExportOutcome::Saved {
                name: "argo.nc.json".to_owned()
            }
        );
        assert_eq!(sink.files().len(), 1);
    }

    #[test]
    fn test_failure_falls_back_to_json() {
        let records = profiles();
        let mut sink = NoNetcdfSink::default();
        let outcome = export_to_netcdf(&ExportRequest::new(&records, "argo"), &mut sink).unwrap();

        assert_eq!(
            outcome,
            ExportOutcome::FellBack {
                name: "argo_netcdf_fallback.json".to_owned()
            }
        );
        let files = sink.inner.files();
        assert_eq!(files.len(), 1);
        let decoded: Vec<Record> = serde_json::from_slice(&files[0].contents).unwrap();
        assert_eq!(decoded, records);
    }

    #[test]
    fn test_fallback_failure_reaches_caller() {
        let records = profiles();
        let result = export_to_netcdf(&ExportRequest::new(&records, "argo"), &mut BrokenSink);
        assert!(result.is_err());
    }
}
