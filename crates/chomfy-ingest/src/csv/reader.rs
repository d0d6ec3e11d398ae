//! CSV sources: one record per row, optionally narrowed to a column.

use std::path::Path;

use chomfy_model::{ReadOptions, Record};
use csv::{ReaderBuilder, StringRecord};

use crate::error::{IngestError, Result};
use crate::text::read_utf8;

/// Separator used to join the cells of a row when no column is selected.
pub const ROW_SEPARATOR: &str = ", ";

fn csv_error(path: &Path, err: &csv::Error) -> IngestError {
    IngestError::CsvParse {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}

fn header_index(headers: &StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|h| h == name)
}

/// Reads CSV records.
///
/// - With `column`: the first row is the header, each following row yields
///   that column's cell. A column missing from the header is an error.
/// - Without `column`: every row, header included, yields its cells joined
///   with [`ROW_SEPARATOR`]. When stripping, each cell is trimmed before
///   joining and the joined text is trimmed again.
///
/// Record positions count data rows from 1 in both cases. Without a column,
/// a blank line is a row with no cells and yields an empty record; with a
/// column, blank lines are skipped.
pub(crate) fn read_csv_records(
    path: &Path,
    column: Option<&str>,
    options: &ReadOptions,
) -> Result<Vec<Record>> {
    let content = read_utf8(path)?;
    match column {
        Some(column) => read_column(path, &content, column, options),
        None => read_rows(path, &content, options),
    }
}

fn read_column(
    path: &Path,
    content: &str,
    column: &str,
    options: &ReadOptions,
) -> Result<Vec<Record>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());
    let headers = reader.headers().map_err(|e| csv_error(path, &e))?.clone();

    let Some(idx) = header_index(&headers, column) else {
        return Err(IngestError::MissingColumn {
            column: column.to_string(),
            path: path.to_path_buf(),
            available: headers.iter().map(str::to_string).collect(),
        });
    };

    let mut records = Vec::new();
    for (row_idx, row) in reader.records().enumerate() {
        let row = row.map_err(|e| csv_error(path, &e))?;
        let text = options.format(row.get(idx).unwrap_or(""));
        if options.rejects(text) {
            continue;
        }
        records.push(Record::new(row_idx + 1, text));
    }
    Ok(records)
}

fn read_rows(path: &Path, content: &str, options: &ReadOptions) -> Result<Vec<Record>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut records = Vec::new();
    let mut row_idx = 0;
    let mut row = StringRecord::new();
    loop {
        // The reader skips blank lines; each one still counts as an empty row.
        let start = byte_offset(reader.position().byte());
        let has_row = reader.read_record(&mut row).map_err(|e| csv_error(path, &e))?;
        for _ in 0..blank_lines_at(content.as_bytes(), start) {
            row_idx += 1;
            if !options.rejects("") {
                records.push(Record::new(row_idx, ""));
            }
        }
        if !has_row {
            break;
        }

        row_idx += 1;
        let joined = row
            .iter()
            .map(|cell| options.format(cell))
            .collect::<Vec<_>>()
            .join(ROW_SEPARATOR);
        let text = options.format(&joined);
        if !options.rejects(text) {
            records.push(Record::new(row_idx, text));
        }
    }
    Ok(records)
}

fn byte_offset(position: u64) -> usize {
    usize::try_from(position).unwrap_or(usize::MAX)
}

/// Counts the empty lines starting at byte `start`.
///
/// A `\n` directly after a `\r` that ended the previous row belongs to that
/// row's terminator.
fn blank_lines_at(content: &[u8], start: usize) -> usize {
    let mut idx = start;
    if idx > 0 && content.get(idx - 1) == Some(&b'\r') && content.get(idx) == Some(&b'\n') {
        idx += 1;
    }
    let mut blanks = 0;
    loop {
        match content.get(idx) {
            Some(b'\r') => {
                idx += 1;
                if content.get(idx) == Some(&b'\n') {
                    idx += 1;
                }
            }
            Some(b'\n') => idx += 1,
            _ => return blanks,
        }
        blanks += 1;
    }
}
