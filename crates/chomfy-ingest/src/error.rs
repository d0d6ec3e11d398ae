//! Error types for loading line sources.

use std::path::PathBuf;

use chomfy_model::{ErrorKind, SourceFormat};
use thiserror::Error;

/// Errors that can occur while resolving or reading a source file.
#[derive(Debug, Error)]
pub enum IngestError {
    // === Input Errors ===
    /// A required path input was left empty.
    #[error("'{input}' is required")]
    MissingInput { input: &'static str },

    /// Requested CSV column is not in the header row.
    #[error("column '{column}' not found in {path}; available columns: {}", .available.join(", "))]
    MissingColumn {
        column: String,
        path: PathBuf,
        available: Vec<String>,
    },

    /// Directory glob could not be compiled.
    #[error("invalid glob pattern '{pattern}': {message}")]
    InvalidGlob { pattern: String, message: String },

    // === File System Errors ===
    /// Source or manifest file does not exist.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Directory to scan does not exist.
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed while walking a directory.
    #[error("failed to read directory {path}: {message}")]
    DirectoryRead { path: PathBuf, message: String },

    // === Format Errors ===
    /// Extension outside the accepted set.
    #[error("unsupported file extension '{extension}' for {path}; use {}", SourceFormat::ACCEPTED)]
    UnsupportedFormat { path: PathBuf, extension: String },

    /// DOCX requested but the `docx` feature is compiled out.
    #[error("DOCX support is not available in this build (enable the 'docx' feature) to read {path}")]
    DocxUnavailable { path: PathBuf },

    /// File is not UTF-8.
    #[error("unsupported encoding {encoding} in {path} (UTF-8 required)")]
    UnsupportedEncoding {
        path: PathBuf,
        encoding: &'static str,
    },

    /// Malformed CSV content.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// Corrupt DOCX archive or document XML.
    #[error("failed to parse DOCX {path}: {message}")]
    DocxParse { path: PathBuf, message: String },
}

impl IngestError {
    /// Classifies the error for the host.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingInput { .. } | Self::MissingColumn { .. } | Self::InvalidGlob { .. } => {
                ErrorKind::Configuration
            }
            Self::FileNotFound { .. } | Self::DirectoryNotFound { .. } => ErrorKind::NotFound,
            Self::FileRead { .. } | Self::DirectoryRead { .. } => ErrorKind::Io,
            Self::UnsupportedFormat { .. } => ErrorKind::UnsupportedFormat,
            Self::DocxUnavailable { .. } => ErrorKind::DependencyUnavailable,
            Self::UnsupportedEncoding { .. } | Self::CsvParse { .. } | Self::DocxParse { .. } => {
                ErrorKind::Parse
            }
        }
    }

    /// Maps an I/O error on `path`, turning `NotFound` into [`IngestError::FileNotFound`].
    pub(crate) fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound { path }
        } else {
            Self::FileRead { path, source }
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
