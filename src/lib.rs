//! # FloatChat - Argo float data export
//!
//! The export and reporting layer behind the FloatChat dashboard: turns
//! batches of flat records (one row per profile measurement) into
//! downloadable files and summary reports.
//!
//! ## Quick Start
//!
//! ```no_run
//! use floatchat::export::{export_all, ExportFormat, ExportRequest, DirectorySink};
//! use floatchat::record::{ColumnDescriptor, Record};
//! use floatchat::report::generate_summary_stats;
//!
//! # fn main() -> floatchat::error::Result<()> {
//! let records = vec![
//!     Record::new().with("depth", 10).with("temp", 5.1),
//!     Record::new().with("depth", 20).with("temp", 7.4),
//! ];
//! let columns = vec![
//!     ColumnDescriptor::new("depth", "Depth (m)"),
//!     ColumnDescriptor::new("temp", "Temperature (°C)"),
//! ];
//!
//! let request = ExportRequest::new(&records, "float_5904471").with_columns(&columns);
//! let mut sink = DirectorySink::new("exports");
//! export_all(&ExportFormat::ALL, &request, &mut sink)?;
//!
//! println!("{}", generate_summary_stats(&records, "Float 5904471"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Core Modules
//!
//! - [`record`]: Records, cell values and column descriptors
//! - [`export`]: CSV, JSON, ASCII table and pseudo-NetCDF exporters, plus sinks
//! - [`report`]: Summary statistics report
//! - [`config`]: Persistent export settings
//! - [`error`]: Error types and handling utilities
//! - [`logging`]: Logger setup for binaries
//!
//! ## Sinks
//!
//! Exporters never write files themselves. They hand finished bytes to an
//! [`export::ExportSink`], which decides what "saving" means: a directory
//! on disk, an in-memory list, or a browser download in a web host.

#![warn(clippy::all, rust_2018_idioms)]

pub mod config;
pub mod error;
pub mod export;
pub mod logging;
pub mod record;
pub mod report;
