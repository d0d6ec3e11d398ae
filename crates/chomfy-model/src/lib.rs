//! Shared data model for the chomfy prompt-line nodes.
//!
//! Every other crate in the workspace speaks in these types:
//!
//! - [`Record`] and [`SourceKey`]: one selectable line and the identity of
//!   the file it came from
//! - [`SourceFormat`], [`SourceMode`], [`SelectionMode`]: closed enumerations
//!   for format dispatch and composer behaviour
//! - [`ReadOptions`], [`ParagraphFilter`]: formatting applied when records
//!   are loaded
//! - [`CompositionReport`]: the structured per-source report emitted by the
//!   composer
//! - [`ErrorKind`]: the error classification shared by all crates

pub mod enums;
pub mod error;
pub mod options;
pub mod record;
pub mod report;

pub use enums::{SelectionMode, SourceFormat, SourceMode};
pub use error::ErrorKind;
pub use options::{ParagraphFilter, ReadOptions};
pub use record::{Record, SourceKey};
pub use report::{CompositionReport, SegmentReport};
