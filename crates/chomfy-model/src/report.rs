//! Structured report produced by the composer.

use serde::{Deserialize, Serialize};

use crate::enums::{SelectionMode, SourceMode};

/// What the composer picked from one source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentReport {
    /// Source entry as written (before home expansion).
    pub file: String,
    /// Resolved column, `None` when the whole row/line is used.
    pub column: Option<String>,
    /// 1-based position of the selected record in the source's read order.
    pub line_index: usize,
    /// Number of usable records in the source.
    pub total_lines: usize,
    pub text: String,
}

/// Report for one `compose` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositionReport {
    pub mode: SourceMode,
    pub selection_mode: SelectionMode,
    pub prompt: String,
    pub segments: Vec<SegmentReport>,
}

impl CompositionReport {
    /// Serializes the report as compact JSON (non-ASCII text kept as is).
    ///
    /// # Errors
    ///
    /// Propagates `serde_json` failures; with only strings, integers and
    /// unit enums in the report this does not happen in practice.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
