//! Plain text and markdown sources: one record per line.

use std::path::Path;

use chomfy_model::{ReadOptions, Record};

use crate::error::{IngestError, Result};

/// Reads a file as UTF-8, dropping a leading byte-order mark.
///
/// UTF-16 files (detected by BOM) and invalid UTF-8 are rejected.
pub(crate) fn read_utf8(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).map_err(|e| IngestError::read(path, e))?;

    if bytes.len() >= 2 {
        // UTF-16 LE BOM
        if bytes[0..2] == [0xFF, 0xFE] {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: "UTF-16 LE",
            });
        }
        // UTF-16 BE BOM
        if bytes[0..2] == [0xFE, 0xFF] {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: "UTF-16 BE",
            });
        }
    }

    let text = String::from_utf8(bytes).map_err(|_| IngestError::UnsupportedEncoding {
        path: path.to_path_buf(),
        encoding: "non-UTF-8",
    })?;

    match text.strip_prefix('\u{feff}') {
        Some(rest) => Ok(rest.to_string()),
        None => Ok(text),
    }
}

/// Reads one record per line of a text or markdown file.
pub(crate) fn read_text_records(path: &Path, options: &ReadOptions) -> Result<Vec<Record>> {
    let content = read_utf8(path)?;
    Ok(records_from_lines(&content, options))
}

/// Splits `text` into lines on `\n`, `\r\n` and a lone `\r`.
///
/// A trailing line ending does not produce an extra empty line.
pub fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    let mut rest = Some(text).filter(|t| !t.is_empty());
    std::iter::from_fn(move || {
        let current = rest?;
        match current.find(['\r', '\n']) {
            Some(end) => {
                let width = if current[end..].starts_with("\r\n") { 2 } else { 1 };
                rest = Some(&current[end + width..]).filter(|t| !t.is_empty());
                Some(&current[..end])
            }
            None => {
                rest = None;
                Some(current)
            }
        }
    })
}

fn records_from_lines(content: &str, options: &ReadOptions) -> Vec<Record> {
    split_lines(content)
        .enumerate()
        .filter_map(|(idx, line)| {
            let text = options.format(line);
            (!options.rejects(text)).then(|| Record::new(idx + 1, text))
        })
        .collect()
}
