//! Closed enumerations for format dispatch and composer behaviour.
//!
//! The host hands these over as plain strings; parsing them once at the
//! boundary keeps the rest of the workspace free of string matching.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Supported source file formats.
///
/// Dispatch is purely on file extension (case-insensitive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceFormat {
    /// `.txt` and `.log`: one record per line.
    Text,
    /// `.md`: read exactly like plain text.
    Markdown,
    /// `.csv`: one record per row, optionally narrowed to a single column.
    DelimitedTable,
    /// `.docx`: one record per body paragraph.
    Document,
}

impl SourceFormat {
    /// Human-readable list of accepted extensions, used in error messages.
    pub const ACCEPTED: &'static str = "txt, log, md, csv, docx";

    /// Maps a bare extension (without the dot) to a format.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "txt" | "log" => Some(Self::Text),
            "md" => Some(Self::Markdown),
            "csv" => Some(Self::DelimitedTable),
            "docx" => Some(Self::Document),
            _ => None,
        }
    }

    /// Maps a path to a format by its extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceFormat::Text => "text",
            SourceFormat::Markdown => "markdown",
            SourceFormat::DelimitedTable => "csv",
            SourceFormat::Document => "docx",
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Where the composer takes its list of source files from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SourceMode {
    /// Newline-separated paths typed inline.
    #[default]
    Manual,
    /// Paths read from an external manifest file.
    ConfigFile,
    /// Files in a directory matching a glob.
    Directory,
}

impl SourceMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceMode::Manual => "MANUAL",
            SourceMode::ConfigFile => "CONFIG_FILE",
            SourceMode::Directory => "DIRECTORY",
        }
    }
}

impl fmt::Display for SourceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SourceMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "MANUAL" => Ok(SourceMode::Manual),
            "CONFIG_FILE" => Ok(SourceMode::ConfigFile),
            "DIRECTORY" => Ok(SourceMode::Directory),
            _ => Err(format!("Unknown mode '{s}'")),
        }
    }
}

/// How the composer picks one record per source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SelectionMode {
    /// Uniform draw, optionally seeded.
    #[default]
    Random,
    /// Per-source cursor advancing by one each call.
    Sequential,
}

impl SelectionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SelectionMode::Random => "RANDOM",
            SelectionMode::Sequential => "SEQUENTIAL",
        }
    }
}

impl fmt::Display for SelectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SelectionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "RANDOM" => Ok(SelectionMode::Random),
            "SEQUENTIAL" => Ok(SelectionMode::Sequential),
            _ => Err(format!("Unknown selection mode '{s}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(SourceFormat::from_extension("txt"), Some(SourceFormat::Text));
        assert_eq!(SourceFormat::from_extension("LOG"), Some(SourceFormat::Text));
        assert_eq!(
            SourceFormat::from_extension("Md"),
            Some(SourceFormat::Markdown)
        );
        assert_eq!(
            SourceFormat::from_extension("csv"),
            Some(SourceFormat::DelimitedTable)
        );
        assert_eq!(
            SourceFormat::from_extension("docx"),
            Some(SourceFormat::Document)
        );
        assert_eq!(SourceFormat::from_extension("doc"), None);
        assert_eq!(SourceFormat::from_extension(""), None);
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            SourceFormat::from_path(Path::new("/prompts/STYLES.CSV")),
            Some(SourceFormat::DelimitedTable)
        );
        assert_eq!(SourceFormat::from_path(Path::new("/prompts/README")), None);
    }

    #[test]
    fn test_source_mode_parse() {
        assert_eq!("MANUAL".parse::<SourceMode>(), Ok(SourceMode::Manual));
        assert_eq!(
            " config_file ".parse::<SourceMode>(),
            Ok(SourceMode::ConfigFile)
        );
        assert_eq!("Directory".parse::<SourceMode>(), Ok(SourceMode::Directory));
        assert!("FOLDER".parse::<SourceMode>().is_err());
    }

    #[test]
    fn test_selection_mode_parse() {
        assert_eq!("RANDOM".parse::<SelectionMode>(), Ok(SelectionMode::Random));
        assert_eq!(
            "sequential".parse::<SelectionMode>(),
            Ok(SelectionMode::Sequential)
        );
        let err = "SHUFFLE".parse::<SelectionMode>().unwrap_err();
        assert!(err.contains("SHUFFLE"));
    }

    #[test]
    fn test_mode_display_matches_serde() {
        let json = serde_json::to_string(&SourceMode::ConfigFile).unwrap();
        assert_eq!(json, format!("\"{}\"", SourceMode::ConfigFile));
        let json = serde_json::to_string(&SelectionMode::Sequential).unwrap();
        assert_eq!(json, format!("\"{}\"", SelectionMode::Sequential));
    }
}
