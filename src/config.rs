//! Persistent export settings.
//!
//! Settings live in `config.json` under the platform config directory
//! (`~/.config/floatchat/config.json` on Linux). Every field has a default,
//! so a partial file is valid.

use crate::error::{FloatChatError, Result, ResultExt as _};
use crate::export::{ExportFormat, NetcdfSettings};
use crate::report::NumericDetection;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    pub numeric_detection: NumericDetection,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Directory the CLI writes exports into
    pub output_dir: PathBuf,
    /// Formats exported when none are requested explicitly
    pub formats: Vec<ExportFormat>,
    pub netcdf: NetcdfSettings,
    pub report: ReportSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("exports"),
            formats: ExportFormat::ALL.to_vec(),
            netcdf: NetcdfSettings::default(),
            report: ReportSettings::default(),
        }
    }
}

/// Default settings file location.
///
/// # Errors
///
/// Returns an error if the platform has no config directory.
pub fn config_path() -> Result<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| {
        FloatChatError::Config("Failed to determine config directory".to_owned())
    })?;
    Ok(base.join("floatchat").join(CONFIG_FILE_NAME))
}

/// Loads settings from `path`, or from [`config_path`] when `None`.
///
/// An explicit path must exist and parse. The default location falls back
/// to [`Settings::default`] when the file is missing or unreadable.
///
/// # Errors
///
/// Returns an error if an explicit file cannot be read or parsed.
pub fn load_settings(path: Option<&Path>) -> Result<Settings> {
    if let Some(path) = path {
        return read_settings(path);
    }

    let path = match config_path() {
        Ok(path) => path,
        Err(e) => {
            log::warn!("{e}; using default settings");
            return Ok(Settings::default());
        }
    };
    if !path.exists() {
        log::debug!("No settings at {}, using defaults", path.display());
        return Ok(Settings::default());
    }

    match read_settings(&path) {
        Ok(settings) => Ok(settings),
        Err(e) => {
            log::warn!("Ignoring settings at {}: {e}", path.display());
            Ok(Settings::default())
        }
    }
}

fn read_settings(path: &Path) -> Result<Settings> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings {}", path.display()))?;
    serde_json::from_str(&content).map_err(|e| {
        FloatChatError::Config(format!("Invalid settings {}: {e}", path.display()))
    })
}

/// Writes settings as pretty JSON, creating parent directories.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn save_settings(settings: &Settings, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let content = serde_json::to_string_pretty(settings)?;
    std::fs::write(path, content)?;
    Ok(())
}
