//! Line sources for the chomfy prompt nodes.
//!
//! This crate turns files into ordered lists of [`Record`]s and resolves the
//! lists of files the composer draws from.
//!
//! # Features
//!
//! - **Format dispatch**: `.txt`/`.log`, `.md`, `.csv` and `.docx` behind one
//!   [`LineSource`] contract
//! - **CSV columns**: select a single column by header name, or join whole rows
//! - **DOCX**: body paragraphs (cargo feature `docx`, on by default)
//! - **Discovery**: inline lists, manifest files and glob-filtered directory scans
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use chomfy_ingest::{LineSource, scan_directory};
//!
//! let files = scan_directory(Path::new("prompts"), "*.txt")?;
//! let source = LineSource::open(&files[0])?;
//! let records = source.load(None)?;
//! ```
//!
//! [`Record`]: chomfy_model::Record

mod csv;
mod discovery;
#[cfg(feature = "docx")]
mod docx;
mod error;
mod paths;
mod source;
mod text;

// === Error Types ===
pub use error::{IngestError, Result};

// === Sources ===
pub use csv::ROW_SEPARATOR;
pub use source::LineSource;
pub use text::split_lines;

// === Discovery ===
pub use discovery::{
    COLUMN_SEPARATOR, DEFAULT_GLOB, SourceEntry, load_manifest, parse_source_list, scan_directory,
};

// === Paths ===
pub use paths::{expand_user, modified_time, require_file, required_path};
