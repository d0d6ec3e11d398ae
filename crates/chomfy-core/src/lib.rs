//! Stateful prompt nodes.
//!
//! Each node is an owned struct the host keeps for the lifetime of one graph
//! node and calls once per evaluation:
//!
//! - [`load_line`]: stateless lookup of one wrapped line
//! - [`PromptSequencer::next_prompt`]: auto-advancing line sequence with an
//!   optional cap and auto-reset
//! - [`NumberCounter::count`]: numeric progression with the same cap rules
//! - [`PromptAssembler::compose`]: one record from each of many sources,
//!   joined into a single prompt
//!
//! Records are read through a per-node [`FileCache`] that reloads a source
//! when its modification time or read options change.
//!
//! # Example
//!
//! ```ignore
//! use chomfy_core::{PromptSequencer, SequenceRequest};
//!
//! let mut node = PromptSequencer::new();
//! let request = SequenceRequest {
//!     file_path: "~/prompts/styles.txt".to_string(),
//!     max_steps: 4,
//!     ..SequenceRequest::default()
//! };
//! let first = node.next_prompt(&request)?;
//! ```

mod cache;
mod composer;
mod counter;
mod error;
mod limit;
mod loader;
mod sequencer;
mod wrap;

// === Error Types ===
pub use error::{CoreError, Result};

// === Shared Building Blocks ===
pub use cache::FileCache;
pub use limit::{Phase, StepLimit};
pub use wrap::normalize_index;

// === Nodes ===
pub use composer::{
    ComposeOutput, ComposeRequest, DEFAULT_MAX_FILES, MAX_FILES_RANGE, PromptAssembler,
    parse_selection_mode, parse_source_mode,
};
pub use counter::{CountOutput, CountRequest, NumberCounter};
pub use loader::{LineOutput, LineRequest, load_line};
pub use sequencer::{PromptSequencer, SequenceOutput, SequenceRequest};
