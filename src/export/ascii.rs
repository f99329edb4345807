//! Fixed-width ASCII table export.
//!
//! ```text
//! +-------+------+---------+
//! | depth | temp | comment |
//! +-------+------+---------+
//! | 10.00 | 5.00 | surface |
//! | 20.00 | -    | -       |
//! +-------+------+---------+
//! ```
//!
//! Numbers are shown with exactly two decimals and right-aligned; missing
//! values are shown as `-`. Widths use display width, so wide characters
//! stay aligned.

use super::{ExportFile, ExportFormat, ExportOutcome, ExportRequest, ExportSink};
use crate::error::Result;
use crate::record::{Value, format_fixed, resolve_columns};
use unicode_width::UnicodeWidthStr as _;

const NULL_CELL: &str = "-";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Right,
}

struct Cell {
    text: String,
    align: Align,
}

impl Cell {
    fn header(label: &str) -> Self {
        Self {
            text: single_line(label),
            align: Align::Left,
        }
    }

    fn from_value(value: &Value) -> Self {
        match value {
            Value::Number(n) => Self {
                text: format_fixed(*n, 2),
                align: Align::Right,
            },
            Value::Null => Self {
                text: NULL_CELL.to_owned(),
                align: Align::Left,
            },
            other => Self {
                text: single_line(&other.to_string()),
                align: Align::Left,
            },
        }
    }
}

/// Line breaks become spaces so each record stays on one table line.
fn single_line(text: &str) -> String {
    text.replace("\r\n", " ").replace(['\r', '\n'], " ")
}

/// Renders the request as a bordered table, or `None` for no records.
pub fn render_ascii(request: &ExportRequest<'_>) -> Option<String> {
    if request.is_empty() {
        return None;
    }

    let columns = resolve_columns(request.records, request.columns);
    let header: Vec<Cell> = columns.iter().map(|c| Cell::header(&c.label)).collect();
    let rows: Vec<Vec<Cell>> = request
        .records
        .iter()
        .map(|record| {
            columns
                .iter()
                .map(|c| Cell::from_value(record.get_or_null(&c.key)))
                .collect()
        })
        .collect();

    let mut widths: Vec<usize> = header.iter().map(|c| c.text.width()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.text.width());
        }
    }

    let border = border_line(&widths);
    let mut out = String::new();
    out.push_str(&border);
    push_row(&mut out, &header, &widths);
    out.push_str(&border);
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    out.push_str(&border);
    Some(out)
}

fn border_line(widths: &[usize]) -> String {
    let mut line = String::from("+");
    for width in widths {
        line.push_str(&"-".repeat(width + 2));
        line.push('+');
    }
    line.push('\n');
    line
}

fn push_row(out: &mut String, cells: &[Cell], widths: &[usize]) {
    out.push('|');
    for (cell, &width) in cells.iter().zip(widths) {
        let pad = " ".repeat(width.saturating_sub(cell.text.width()));
        out.push(' ');
        match cell.align {
            Align::Left => {
                out.push_str(&cell.text);
                out.push_str(&pad);
            }
            Align::Right => {
                out.push_str(&pad);
                out.push_str(&cell.text);
            }
        }
        out.push_str(" |");
    }
    out.push('\n');
}

/// Exports the request as `<filename>.txt`.
///
/// # Errors
///
/// Returns an error if the sink rejects the file.
pub fn export_to_ascii(
    request: &ExportRequest<'_>,
    sink: &mut dyn ExportSink,
) -> Result<ExportOutcome> {
    let Some(table) = render_ascii(request) else {
        log::warn!("ASCII export of '{}' skipped: no records", request.filename);
        return Ok(ExportOutcome::Skipped);
    };

    let format = ExportFormat::Ascii;
    let name = format.file_name(request.filename);
    log::debug!("ASCII export: {} rows into {name}", request.records.len());
    sink.save(ExportFile::new(name.clone(), format.mime_type(), table.into_bytes()))?;
    Ok(ExportOutcome::Saved { name })
}
