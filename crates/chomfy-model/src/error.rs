//! Error classification shared across the workspace.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Classification shared by every error in the workspace.
///
/// The host only needs to know which kind of failure halted a step; the
/// concrete error types carry the details.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Missing required input, unknown mode, or a column absent from a CSV header.
    Configuration,
    /// A path that does not resolve to an existing file or directory.
    NotFound,
    /// A file extension outside the accepted set.
    UnsupportedFormat,
    /// A source with zero usable records.
    EmptyFile,
    /// A composer source list that resolved to nothing.
    NoSources,
    /// Document support requested but compiled out.
    DependencyUnavailable,
    /// Reading a file failed at the OS level.
    Io,
    /// A file was readable but malformed.
    Parse,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Configuration => "configuration",
            ErrorKind::NotFound => "not found",
            ErrorKind::UnsupportedFormat => "unsupported format",
            ErrorKind::EmptyFile => "empty file",
            ErrorKind::NoSources => "no sources",
            ErrorKind::DependencyUnavailable => "dependency unavailable",
            ErrorKind::Io => "io",
            ErrorKind::Parse => "parse",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
