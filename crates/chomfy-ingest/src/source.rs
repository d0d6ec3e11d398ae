//! Format dispatch for a single source file.

use std::path::{Path, PathBuf};

use chomfy_model::{ReadOptions, Record, SourceFormat};

use crate::csv::read_csv_records;
use crate::error::{IngestError, Result};
use crate::paths::require_file;
use crate::text::read_text_records;

/// A source file whose format has been resolved from its extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineSource {
    path: PathBuf,
    format: SourceFormat,
}

impl LineSource {
    /// Checks that `path` is an existing file with a supported extension.
    pub fn open(path: &Path) -> Result<Self> {
        require_file(path)?;
        let format =
            SourceFormat::from_path(path).ok_or_else(|| IngestError::UnsupportedFormat {
                path: path.to_path_buf(),
                extension: path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .map(|ext| format!(".{}", ext.to_lowercase()))
                    .unwrap_or_default(),
            })?;
        Ok(Self {
            path: path.to_path_buf(),
            format,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> SourceFormat {
        self.format
    }

    /// Loads records the way the sequencer reads them.
    ///
    /// Nothing is trimmed or filtered, except that empty document paragraphs
    /// are dropped and the remaining ones renumbered.
    pub fn load(&self, column: Option<&str>) -> Result<Vec<Record>> {
        self.load_with(column, &ReadOptions::raw())
    }

    /// Loads records with explicit formatting options.
    pub fn load_with(&self, column: Option<&str>, options: &ReadOptions) -> Result<Vec<Record>> {
        let records = match self.format {
            SourceFormat::Text | SourceFormat::Markdown => read_text_records(&self.path, options)?,
            SourceFormat::DelimitedTable => read_csv_records(&self.path, column, options)?,
            SourceFormat::Document => self.load_document(options)?,
        };
        tracing::info!(
            path = %self.path.display(),
            format = %self.format,
            column = column.unwrap_or(""),
            records = records.len(),
            "loaded source"
        );
        Ok(records)
    }

    #[cfg(feature = "docx")]
    fn load_document(&self, options: &ReadOptions) -> Result<Vec<Record>> {
        let paragraphs = crate::docx::read_docx_paragraphs(&self.path)?;
        Ok(document_records(paragraphs, options))
    }

    #[cfg(not(feature = "docx"))]
    fn load_document(&self, _options: &ReadOptions) -> Result<Vec<Record>> {
        Err(IngestError::DocxUnavailable {
            path: self.path.clone(),
        })
    }
}

/// Turns document paragraphs into records.
///
/// Paragraphs removed by the options' [`ParagraphFilter`] are dropped before
/// numbering, so positions count surviving paragraphs only.
///
/// [`ParagraphFilter`]: chomfy_model::ParagraphFilter
#[cfg_attr(not(feature = "docx"), allow(dead_code))]
fn document_records(paragraphs: Vec<String>, options: &ReadOptions) -> Vec<Record> {
    let paragraphs: Vec<String> = paragraphs
        .into_iter()
        .filter(|p| !options.paragraphs.drops(p))
        .collect();

    paragraphs
        .iter()
        .enumerate()
        .filter_map(|(idx, paragraph)| {
            let text = options.format(paragraph);
            (!options.rejects(text)).then(|| Record::new(idx + 1, text))
        })
        .collect()
}
