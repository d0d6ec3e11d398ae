//! Source discovery: inline lists, manifest files and directory scans.

use std::path::{Component, Path, PathBuf};

use globset::GlobBuilder;
use walkdir::WalkDir;

use crate::error::{IngestError, Result};
use crate::text::{read_utf8, split_lines};

/// Glob used when a directory scan is given an empty pattern.
pub const DEFAULT_GLOB: &str = "*.txt";

/// Separator between a source path and its column override.
pub const COLUMN_SEPARATOR: &str = "::";

/// One source entry with its column override resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceEntry {
    /// Path as written in the entry (not yet home-expanded).
    pub path: String,
    pub column: Option<String>,
}

impl SourceEntry {
    /// Splits `path::column`, falling back to `default_column` when the entry
    /// has no separator.
    ///
    /// An entry with a separator but nothing after it selects no column.
    pub fn parse(entry: &str, default_column: &str) -> Self {
        match entry.split_once(COLUMN_SEPARATOR) {
            Some((path, column)) => Self {
                path: path.trim().to_string(),
                column: non_empty(column),
            },
            None => Self {
                path: entry.trim().to_string(),
                column: non_empty(default_column),
            },
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Parses newline-separated entries, dropping blank and `#` comment lines.
pub fn parse_source_list(text: &str) -> Vec<String> {
    split_lines(text)
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Reads a manifest file and parses it like an inline list.
pub fn load_manifest(path: &Path) -> Result<Vec<String>> {
    if !path.is_file() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let content = read_utf8(path)?;
    let entries = parse_source_list(&content);
    tracing::debug!(
        manifest = %path.display(),
        entries = entries.len(),
        "loaded manifest"
    );
    Ok(entries)
}

/// Lists regular files under `dir` whose path relative to `dir` matches
/// `pattern`, sorted lexicographically by their full path string.
///
/// `*` does not cross directory separators; `**` does. Hidden entries are
/// skipped unless the pattern itself starts with a dot.
pub fn scan_directory(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let pattern = if pattern.trim().is_empty() {
        DEFAULT_GLOB
    } else {
        pattern.trim()
    };
    let matcher = GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map_err(|e| IngestError::InvalidGlob {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })?
        .compile_matcher();

    let max_depth = if pattern.contains("**") {
        usize::MAX
    } else {
        pattern.split('/').count()
    };
    let include_hidden = pattern.starts_with('.');

    let mut files = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(max_depth)
        .follow_links(true)
    {
        let entry = entry.map_err(|e| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            message: e.to_string(),
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(dir) else {
            continue;
        };
        if !include_hidden && is_hidden(relative) {
            continue;
        }
        if matcher.is_match(relative) {
            files.push(entry.path().to_path_buf());
        }
    }

    files.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));
    tracing::debug!(
        directory = %dir.display(),
        pattern,
        matched = files.len(),
        "scanned directory"
    );
    Ok(files)
}

fn is_hidden(relative: &Path) -> bool {
    relative.components().any(|component| match component {
        Component::Normal(name) => name.to_str().is_some_and(|name| name.starts_with('.')),
        _ => false,
    })
}
