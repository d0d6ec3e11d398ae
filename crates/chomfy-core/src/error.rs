//! Error types for the stateful prompt nodes.

use std::path::PathBuf;

use chomfy_ingest::IngestError;
use chomfy_model::{ErrorKind, SourceMode};
use thiserror::Error;

/// Errors raised by an entrypoint call.
///
/// None of these are retried or recovered internally; the call produces no
/// output and node state is left as it was before the call.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Loading or resolving a source failed.
    #[error(transparent)]
    Ingest(#[from] IngestError),

    /// A source produced zero usable records.
    #[error("the selected file contained zero usable lines: {path}")]
    EmptySource { path: PathBuf },

    /// The composer's source list resolved to nothing.
    #[error("no files found for mode {mode}")]
    NoSources { mode: SourceMode },

    /// An input value is not acceptable (e.g. an unknown mode name).
    #[error("{message}")]
    InvalidInput { message: String },

    /// The composition report could not be serialized.
    #[error("failed to serialize composition report: {0}")]
    Report(#[from] serde_json::Error),
}

impl CoreError {
    /// Classifies the error for the host.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Ingest(err) => err.kind(),
            Self::EmptySource { .. } => ErrorKind::EmptyFile,
            Self::NoSources { .. } => ErrorKind::NoSources,
            Self::InvalidInput { .. } => ErrorKind::Configuration,
            Self::Report(_) => ErrorKind::Parse,
        }
    }
}

/// Result type for entrypoint calls.
pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ingest_kind_passes_through() {
        let err: CoreError = IngestError::FileNotFound {
            path: PathBuf::from("a.txt"),
        }
        .into();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.to_string(), "file not found: a.txt");
    }

    #[test]
    fn test_no_sources_display() {
        let err = CoreError::NoSources {
            mode: SourceMode::Directory,
        };
        assert_eq!(err.to_string(), "no files found for mode DIRECTORY");
        assert_eq!(err.kind(), ErrorKind::NoSources);
    }
}
