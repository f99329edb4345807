//! Centralized error handling for the floatchat export library.
//!
//! Every fallible operation in the library returns [`Result`], whose error
//! type is [`FloatChatError`]. Conversions from the underlying I/O, JSON and
//! CSV errors are provided so the `?` operator works across layers:
//!
//! ```no_run
//! use floatchat::error::Result;
//! use floatchat::record::Record;
//!
//! fn read_records(path: &str) -> Result<Vec<Record>> {
//!     let text = std::fs::read_to_string(path)?;
//!     Ok(serde_json::from_str(&text)?)
//! }
//! ```
//!
//! The [`ResultExt`] trait adds `.context()` for annotating errors with the
//! operation that failed:
//!
//! ```no_run
//! use floatchat::error::ResultExt as _;
//!
//! fn load() -> floatchat::error::Result<String> {
//!     std::fs::read_to_string("profiles.json").context("Failed to read profiles")
//! }
//! ```

use std::fmt;

/// Main error type for floatchat operations.
#[derive(Debug)]
pub enum FloatChatError {
    /// I/O errors (writing export files, reading inputs)
    Io(std::io::Error),

    /// JSON encoding or decoding failed
    Serialization(String),

    /// CSV writer errors
    Csv(String),

    /// Configuration errors
    Config(String),

    /// Invalid column descriptor
    InvalidColumn(String),

    /// Invalid export target (filename, directory, format)
    InvalidPath(String),

    /// Generic error with context
    Other(String),
}

impl fmt::Display for FloatChatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Serialization(msg) => write!(f, "Serialization error: {msg}"),
            Self::Csv(msg) => write!(f, "CSV error: {msg}"),
            Self::Config(msg) => write!(f, "Configuration error: {msg}"),
            Self::InvalidColumn(msg) => write!(f, "Invalid column: {msg}"),
            Self::InvalidPath(msg) => write!(f, "Invalid path: {msg}"),
            Self::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for FloatChatError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for FloatChatError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for FloatChatError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<csv::Error> for FloatChatError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err.to_string())
    }
}

impl From<anyhow::Error> for FloatChatError {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err.to_string())
    }
}

/// Result type alias for floatchat operations.
pub type Result<T> = std::result::Result<T, FloatChatError>;

impl FloatChatError {
    /// Prefixes the message with `msg`, keeping the variant.
    ///
    /// I/O errors keep their [`std::io::ErrorKind`], so a missing input
    /// still reads as `NotFound` after being annotated.
    pub fn context(self, msg: impl fmt::Display) -> Self {
        match self {
            Self::Io(e) => Self::Io(std::io::Error::new(e.kind(), format!("{msg}: {e}"))),
            Self::Serialization(m) => Self::Serialization(format!("{msg}: {m}")),
            Self::Csv(m) => Self::Csv(format!("{msg}: {m}")),
            Self::Config(m) => Self::Config(format!("{msg}: {m}")),
            Self::InvalidColumn(m) => Self::InvalidColumn(format!("{msg}: {m}")),
            Self::InvalidPath(m) => Self::InvalidPath(format!("{msg}: {m}")),
            Self::Other(m) => Self::Other(format!("{msg}: {m}")),
        }
    }
}

/// `.context()` on any result whose error converts into [`FloatChatError`].
///
/// Unlike `anyhow`, the annotated error stays matchable: see
/// [`FloatChatError::context`].
pub trait ResultExt<T> {
    /// # Errors
    ///
    /// Returns the converted error with `msg` prepended.
    fn context(self, msg: impl Into<String>) -> Result<T>;

    /// Like [`ResultExt::context`], building the message only on error.
    ///
    /// # Errors
    ///
    /// Returns the converted error with the closure's message prepended.
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<FloatChatError>,
{
    fn context(self, msg: impl Into<String>) -> Result<T> {
        self.map_err(|e| Into::<FloatChatError>::into(e).context(msg.into()))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| Into::<FloatChatError>::into(e).context(f()))
    }
}
