//! Records and source identity.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// One selectable unit of text drawn from a source file.
///
/// `source_index` is the 1-based position of the record in the file's
/// full read order, before any blank filtering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub source_index: usize,
    pub text: String,
}

impl Record {
    pub fn new(source_index: usize, text: impl Into<String>) -> Self {
        Self {
            source_index,
            text: text.into(),
        }
    }
}

/// Identity of a source for cache lookup and sequential position tracking.
///
/// Formatting options are deliberately not part of the key: changing them
/// invalidates cached records but keeps a sequential cursor where it is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SourceKey {
    /// Normalized (home-expanded) path of the source file.
    pub path: PathBuf,
    /// Selected CSV column, if any.
    pub column: Option<String>,
}

impl SourceKey {
    pub fn new(path: impl Into<PathBuf>, column: Option<&str>) -> Self {
        Self {
            path: path.into(),
            column: column.map(str::to_string),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn column(&self) -> Option<&str> {
        self.column.as_deref()
    }
}

impl fmt::Display for SourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}::{}",
            self.path.display(),
            self.column.as_deref().unwrap_or("")
        )
    }
}
