//! Multi-source prompt composition.
//!
//! A [`PromptAssembler`] resolves a list of source files, picks one record
//! from each and joins the picks (plus optional prefix, suffix and custom
//! inserts) into a single prompt. Sequential picks keep a cursor per
//! [`SourceKey`]; random picks are reproducible when a seed is given.

use std::collections::HashMap;

use chomfy_ingest::{
    DEFAULT_GLOB, SourceEntry, expand_user, load_manifest, parse_source_list, require_file,
    required_path, scan_directory, split_lines,
};
use chomfy_model::{
    CompositionReport, ReadOptions, SegmentReport, SelectionMode, SourceKey, SourceMode,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::cache::FileCache;
use crate::error::{CoreError, Result};

/// Default and bounds of the `max_files` input.
pub const DEFAULT_MAX_FILES: i64 = 16;
pub const MAX_FILES_RANGE: (i64, i64) = (1, 128);

/// Inputs of [`PromptAssembler::compose`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposeRequest {
    pub mode: SourceMode,
    pub selection_mode: SelectionMode,
    /// Join non-empty parts with a single space instead of concatenating.
    pub auto_space: bool,
    pub strip_whitespace: bool,
    pub ignore_blank_lines: bool,
    /// Negative for an unseeded draw.
    pub random_seed: i64,
    pub manual_paths: String,
    pub manifest_path: String,
    pub directory_path: String,
    pub directory_glob: String,
    pub max_files: i64,
    /// Newline-separated inserts; line `n` goes before source `n`, the line
    /// after the last source goes after it.
    pub custom_inserts: String,
    pub prefix_text: String,
    pub suffix_text: String,
    /// Default column for CSV sources without a `path::column` override.
    pub csv_column: String,
    pub reset: bool,
}

impl Default for ComposeRequest {
    fn default() -> Self {
        Self {
            mode: SourceMode::Manual,
            selection_mode: SelectionMode::Random,
            auto_space: true,
            strip_whitespace: true,
            ignore_blank_lines: true,
            random_seed: -1,
            manual_paths: String::new(),
            manifest_path: String::new(),
            directory_path: String::new(),
            directory_glob: DEFAULT_GLOB.to_string(),
            max_files: DEFAULT_MAX_FILES,
            custom_inserts: String::new(),
            prefix_text: String::new(),
            suffix_text: String::new(),
            csv_column: String::new(),
            reset: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposeOutput {
    pub prompt: String,
    pub report: CompositionReport,
    /// `report` serialized as JSON.
    pub segments_json: String,
    pub file_count: usize,
}

/// Parses a host-supplied mode name (case-insensitive).
pub fn parse_source_mode(value: &str) -> Result<SourceMode> {
    value
        .parse()
        .map_err(|message| CoreError::InvalidInput { message })
}

/// Parses a host-supplied selection mode name (case-insensitive).
pub fn parse_selection_mode(value: &str) -> Result<SelectionMode> {
    value
        .parse()
        .map_err(|message| CoreError::InvalidInput { message })
}

/// Stateful composer owned by one host node.
#[derive(Debug, Default)]
pub struct PromptAssembler {
    cache: FileCache,
    positions: HashMap<SourceKey, u64>,
    call_count: u64,
}

impl PromptAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds one prompt from the request's sources.
    ///
    /// # Errors
    ///
    /// Fails when the source list cannot be resolved or is empty, or when any
    /// source is missing, unreadable or has no usable records.
    pub fn compose(&mut self, request: &ComposeRequest) -> Result<ComposeOutput> {
        if request.reset {
            self.reset();
        }

        let entries = gather_entries(request)?;
        if entries.is_empty() {
            tracing::warn!(mode = %request.mode, "source list resolved to no files");
            return Err(CoreError::NoSources { mode: request.mode });
        }

        let inserts: Vec<&str> = split_lines(&request.custom_inserts).collect();
        self.call_count += 1;
        let mut rng = seeded_rng(request.random_seed, self.call_count);
        let options = ReadOptions::filtered(request.strip_whitespace, request.ignore_blank_lines);

        let mut segments = Vec::with_capacity(entries.len());
        for raw in &entries {
            let entry = SourceEntry::parse(raw, &request.csv_column);
            segments.push(self.select(&entry, request.selection_mode, &options, &mut rng)?);
        }
        let trailing = inserts.get(entries.len()).copied().unwrap_or("");

        let prompt = assemble(
            &request.prefix_text,
            &inserts,
            &segments,
            trailing,
            &request.suffix_text,
            request.auto_space,
        );
        let report = CompositionReport {
            mode: request.mode,
            selection_mode: request.selection_mode,
            prompt: prompt.clone(),
            segments,
        };
        let segments_json = report.to_json()?;

        tracing::debug!(
            files = entries.len(),
            call = self.call_count,
            selection = %request.selection_mode,
            "composed prompt"
        );
        Ok(ComposeOutput {
            prompt,
            segments_json,
            file_count: entries.len(),
            report,
        })
    }

    /// Clears sequential cursors and the call counter used for seeding.
    ///
    /// Cached records survive.
    pub fn reset(&mut self) {
        tracing::debug!(tracked = self.positions.len(), "resetting composer");
        self.positions.clear();
        self.call_count = 0;
    }

    /// Sequential cursor for `key`, if that source has been picked from.
    pub fn position(&self, key: &SourceKey) -> Option<u64> {
        self.positions.get(key).copied()
    }

    pub fn call_count(&self) -> u64 {
        self.call_count
    }

    pub fn cache(&self) -> &FileCache {
        &self.cache
    }

    fn select(
        &mut self,
        entry: &SourceEntry,
        selection_mode: SelectionMode,
        options: &ReadOptions,
        rng: &mut StdRng,
    ) -> Result<SegmentReport> {
        let path = expand_user(&entry.path);
        require_file(&path)?;
        let key = SourceKey::new(&path, entry.column.as_deref());
        let records = self.cache.get_or_load(&key, options)?;
        if records.is_empty() {
            return Err(CoreError::EmptySource { path });
        }

        let idx = match selection_mode {
            SelectionMode::Sequential => {
                let cursor = self.positions.entry(key).or_insert(0);
                let idx = (*cursor % records.len() as u64) as usize;
                *cursor += 1;
                idx
            }
            SelectionMode::Random => rng.random_range(0..records.len()),
        };
        let record = &records[idx];
        tracing::debug!(
            source = %path.display(),
            line_index = record.source_index,
            "selected record"
        );

        Ok(SegmentReport {
            file: entry.path.clone(),
            column: entry.column.clone(),
            line_index: record.source_index,
            total_lines: records.len(),
            text: record.text.clone(),
        })
    }
}

/// Resolves the raw source entries for the request's mode, capped at `max_files`.
fn gather_entries(request: &ComposeRequest) -> Result<Vec<String>> {
    let (low, high) = MAX_FILES_RANGE;
    let max_files = request.max_files.clamp(low, high);
    if max_files != request.max_files {
        tracing::warn!(
            requested = request.max_files,
            used = max_files,
            "max_files out of range, clamped"
        );
    }

    let mut entries = match request.mode {
        SourceMode::Manual => parse_source_list(&request.manual_paths),
        SourceMode::ConfigFile => {
            let manifest = required_path(&request.manifest_path, "manifest_path")?;
            load_manifest(&manifest)?
        }
        SourceMode::Directory => {
            let directory = required_path(&request.directory_path, "directory_path")?;
            scan_directory(&directory, &request.directory_glob)?
                .into_iter()
                .map(|path| path.display().to_string())
                .collect()
        }
    };
    entries.truncate(max_files as usize);
    Ok(entries)
}

/// A generator seeded from `seed + call - 1`, or from the OS when `seed` is negative.
fn seeded_rng(seed: i64, call: u64) -> StdRng {
    match u64::try_from(seed) {
        Ok(seed) => StdRng::seed_from_u64(seed.wrapping_add(call.saturating_sub(1))),
        Err(_) => StdRng::from_os_rng(),
    }
}

fn assemble(
    prefix: &str,
    inserts: &[&str],
    segments: &[SegmentReport],
    trailing: &str,
    suffix: &str,
    auto_space: bool,
) -> String {
    let mut parts = vec![prefix];
    for (idx, segment) in segments.iter().enumerate() {
        if let Some(insert) = inserts.get(idx) {
            parts.push(insert);
        }
        parts.push(&segment.text);
    }
    parts.push(trailing);
    parts.push(suffix);

    let parts = parts.into_iter().filter(|part| !part.is_empty());
    if auto_space {
        parts.collect::<Vec<_>>().join(" ")
    } else {
        parts.collect()
    }
}
