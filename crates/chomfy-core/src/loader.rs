//! Stateless single-line lookup.

use chomfy_ingest::{LineSource, required_path};
use chomfy_model::ReadOptions;

use crate::error::{CoreError, Result};
use crate::wrap::normalize_index;

/// Inputs of [`load_line`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineRequest {
    pub file_path: String,
    /// 1-based logical index; values outside `1..=total` wrap around.
    pub line_index: i64,
    pub csv_column: String,
    pub strip_whitespace: bool,
}

impl Default for LineRequest {
    fn default() -> Self {
        Self {
            file_path: String::new(),
            line_index: 1,
            csv_column: String::new(),
            strip_whitespace: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineOutput {
    pub prompt: String,
    /// Position of the returned record after wrapping.
    pub line_index: usize,
    pub total_lines: usize,
}

/// Reads `file_path` and returns the record at the wrapped `line_index`.
///
/// Every call reads the file again; nothing is cached between calls.
pub fn load_line(request: &LineRequest) -> Result<LineOutput> {
    let path = required_path(&request.file_path, "file_path")?;
    let source = LineSource::open(&path)?;
    let column = Some(request.csv_column.as_str()).filter(|c| !c.is_empty());
    let records = source.load_with(column, &ReadOptions::lookup())?;
    if records.is_empty() {
        return Err(CoreError::EmptySource { path });
    }

    let total = records.len();
    let index = normalize_index(i128::from(request.line_index), total);
    let text = records[index - 1].text.as_str();
    let prompt = if request.strip_whitespace {
        text.trim()
    } else {
        text
    };

    Ok(LineOutput {
        prompt: prompt.to_string(),
        line_index: index,
        total_lines: total,
    })
}
