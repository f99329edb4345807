//! Destinations for exported files.
//!
//! Exporters never touch the filesystem directly; they hand an
//! [`ExportFile`] to an [`ExportSink`]. The CLI saves into a directory,
//! tests and embedding hosts keep the bytes in memory.

use crate::error::{FloatChatError, Result, ResultExt as _};
use std::path::{Path, PathBuf};

/// A finished file ready to be saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub name: String,
    pub mime_type: &'static str,
    pub contents: Vec<u8>,
}

impl ExportFile {
    pub fn new(name: impl Into<String>, mime_type: &'static str, contents: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type,
            contents,
        }
    }

    /// Contents as text, lossy for invalid UTF-8.
    pub fn text(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.contents)
    }
}

/// The "save bytes as a file" capability.
pub trait ExportSink {
    /// Persist or deliver `file`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file could not be saved.
    fn save(&mut self, file: ExportFile) -> Result<()>;
}

/// Writes exported files into a directory.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Full path a file called `name` would be written to.
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }
}

impl ExportSink for DirectorySink {
    fn save(&mut self, file: ExportFile) -> Result<()> {
        if file.name.is_empty() || file.name.contains(['/', '\\']) {
            return Err(FloatChatError::InvalidPath(format!(
                "'{}' is not a plain file name",
                file.name
            )));
        }

        std::fs::create_dir_all(&self.dir).with_context(|| {
            format!("Failed to create output directory {}", self.dir.display())
        })?;

        // Write next to the target, then move into place
        let final_path = self.path_for(&file.name);
        let temp_path = self.path_for(&format!(".{}.tmp", file.name));
        if let Err(e) = std::fs::write(&temp_path, &file.contents) {
            let _ = std::fs::remove_file(&temp_path);
            return Err(FloatChatError::from(e)
                .context(format!("Failed to write {}", temp_path.display())));
        }

        if let Err(e) = std::fs::rename(&temp_path, &final_path) {
            let copied = std::fs::copy(&temp_path, &final_path);
            let _ = std::fs::remove_file(&temp_path);
            copied.with_context(|| format!("Failed to move file (Rename error: {e})"))?;
        }

        log::info!(
            "Saved {} ({} bytes, {})",
            final_path.display(),
            file.contents.len(),
            file.mime_type
        );
        Ok(())
    }
}

/// Keeps exported files in memory, in save order.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    files: Vec<ExportFile>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn files(&self) -> &[ExportFile] {
        &self.files
    }

    pub fn get(&self, name: &str) -> Option<&ExportFile> {
        self.files.iter().find(|f| f.name == name)
    }

    pub fn into_files(self) -> Vec<ExportFile> {
        self.files
    }
}

impl ExportSink for MemorySink {
    fn save(&mut self, file: ExportFile) -> Result<()> {
        log::debug!("Captured {} ({} bytes)", file.name, file.contents.len());
        self.files.push(file);
        Ok(())
    }
}
