//! Formatting options applied when records are loaded.

use serde::{Deserialize, Serialize};

/// Formatting applied to records at load time.
///
/// Part of a cache entry's validity: a request with different options
/// reloads the file even when its modification time is unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReadOptions {
    /// Trim surrounding whitespace from each record (and from each CSV cell
    /// before joining a whole row).
    pub strip: bool,
    /// Drop records whose text is empty after optional stripping.
    pub ignore_blank: bool,
    /// Which DOCX paragraphs are removed before numbering.
    ///
    /// The single-file nodes drop blank paragraphs and renumber the rest; the
    /// composer keeps every paragraph position and relies on `ignore_blank`.
    pub paragraphs: ParagraphFilter,
}

/// Paragraphs removed from a document before records are numbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParagraphFilter {
    /// Every paragraph keeps its position.
    #[default]
    KeepAll,
    /// Paragraphs with no text at all are dropped.
    DropEmpty,
    /// Paragraphs that are empty or whitespace-only are dropped.
    DropWhitespace,
}

impl ParagraphFilter {
    /// Returns true when `paragraph` is removed under this filter.
    pub fn drops(&self, paragraph: &str) -> bool {
        match self {
            ParagraphFilter::KeepAll => false,
            ParagraphFilter::DropEmpty => paragraph.is_empty(),
            ParagraphFilter::DropWhitespace => paragraph.trim().is_empty(),
        }
    }
}

impl ReadOptions {
    /// Records exactly as the sequencer sees them: nothing trimmed, nothing
    /// filtered except empty document paragraphs.
    pub const fn raw() -> Self {
        Self {
            strip: false,
            ignore_blank: false,
            paragraphs: ParagraphFilter::DropEmpty,
        }
    }

    /// Like [`ReadOptions::raw`], but whitespace-only document paragraphs are
    /// dropped too. This is the single-line lookup's view of a document.
    pub const fn lookup() -> Self {
        Self {
            paragraphs: ParagraphFilter::DropWhitespace,
            ..Self::raw()
        }
    }

    /// Options used by the composer, applied uniformly to every format.
    pub const fn filtered(strip: bool, ignore_blank: bool) -> Self {
        Self {
            strip,
            ignore_blank,
            paragraphs: ParagraphFilter::KeepAll,
        }
    }

    /// Applies `strip` to a single piece of text.
    pub fn format<'a>(&self, text: &'a str) -> &'a str {
        if self.strip { text.trim() } else { text }
    }

    /// Returns true when a formatted record should be dropped.
    pub fn rejects(&self, text: &str) -> bool {
        self.ignore_blank && text.is_empty()
    }
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self::raw()
    }
}
