//! Auto-advancing line sequencer.
//!
//! A [`PromptSequencer`] walks through one source file, emitting the record
//! at a logical index that advances by `step` on every call and wraps around
//! the record count. Any change to the fingerprint inputs (path, file
//! modification time, start, step, cap, auto-reset, column, strip flag)
//! restarts the walk from `start_value`.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::SystemTime;

use chomfy_ingest::{modified_time, require_file, required_path};
use chomfy_model::{ReadOptions, Record, SourceKey};

use crate::cache::FileCache;
use crate::error::{CoreError, Result};
use crate::limit::{Phase, StepLimit};
use crate::wrap::normalize_index;

/// Inputs of [`PromptSequencer::next_prompt`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceRequest {
    pub file_path: String,
    pub start_value: i64,
    pub step: i64,
    /// Number of emissions before the sequence is done; negative for endless.
    pub max_steps: i64,
    pub auto_reset: bool,
    pub reset: bool,
    pub csv_column: String,
    pub strip_whitespace: bool,
}

impl Default for SequenceRequest {
    fn default() -> Self {
        Self {
            file_path: String::new(),
            start_value: 1,
            step: 1,
            max_steps: -1,
            auto_reset: false,
            reset: false,
            csv_column: String::new(),
            strip_whitespace: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceOutput {
    pub prompt: String,
    /// 1-based record position after wrapping (0 before any emission).
    pub line_index: usize,
    /// 1-based count of emissions since the last reset (0 before any emission).
    pub step_index: u64,
    pub total_lines: usize,
    pub done: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Fingerprint {
    path: PathBuf,
    modified: SystemTime,
    start_value: i64,
    step: i64,
    max_steps: i64,
    auto_reset: bool,
    column: String,
    strip_whitespace: bool,
}

impl Fingerprint {
    fn limit(&self) -> StepLimit {
        StepLimit::from_max_steps(self.max_steps)
    }
}

#[derive(Debug, Clone, Default)]
struct Emission {
    prompt: String,
    line_index: usize,
    step_index: u64,
}

#[derive(Debug)]
struct SequencerState {
    fingerprint: Fingerprint,
    records: Arc<[Record]>,
    next_index: i128,
    emitted_steps: u64,
    last: Emission,
}

impl SequencerState {
    fn emit(&mut self) -> SequenceOutput {
        let total = self.records.len();
        let index = normalize_index(self.next_index, total);
        let text = self.records[index - 1].text.as_str();
        let prompt = if self.fingerprint.strip_whitespace {
            text.trim()
        } else {
            text
        };

        self.emitted_steps += 1;
        self.next_index += i128::from(self.fingerprint.step);
        self.last = Emission {
            prompt: prompt.to_string(),
            line_index: index,
            step_index: self.emitted_steps,
        };

        SequenceOutput {
            prompt: self.last.prompt.clone(),
            line_index: index,
            step_index: self.emitted_steps,
            total_lines: total,
            done: self.fingerprint.limit().is_reached(self.emitted_steps),
        }
    }

    fn held(&self) -> SequenceOutput {
        SequenceOutput {
            prompt: self.last.prompt.clone(),
            line_index: self.last.line_index,
            step_index: self.last.step_index,
            total_lines: self.records.len(),
            done: true,
        }
    }
}

/// Stateful sequencer owned by one host node.
#[derive(Debug, Default)]
pub struct PromptSequencer {
    cache: FileCache,
    state: Option<SequencerState>,
}

impl PromptSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emits the next record, or repeats the last one once the cap is reached.
    ///
    /// On error the sequencer keeps the state it had before the call.
    pub fn next_prompt(&mut self, request: &SequenceRequest) -> Result<SequenceOutput> {
        let path = required_path(&request.file_path, "file_path")?;
        require_file(&path)?;
        let fingerprint = Fingerprint {
            modified: modified_time(&path)?,
            path,
            start_value: request.start_value,
            step: request.step,
            max_steps: request.max_steps,
            auto_reset: request.auto_reset,
            column: request.csv_column.clone(),
            strip_whitespace: request.strip_whitespace,
        };

        let mut state = match self.state.take() {
            Some(state) if !request.reset && state.fingerprint == fingerprint => state,
            previous => {
                tracing::debug!(
                    path = %fingerprint.path.display(),
                    explicit = request.reset,
                    "resetting sequencer"
                );
                match self.load_state(fingerprint.clone()) {
                    Ok(state) => state,
                    Err(err) => {
                        self.state = previous;
                        return Err(err);
                    }
                }
            }
        };

        if state.fingerprint.limit().is_reached(state.emitted_steps) {
            if !state.fingerprint.auto_reset {
                let held = state.held();
                self.state = Some(state);
                return Ok(held);
            }
            tracing::debug!(path = %fingerprint.path.display(), "sequence exhausted, auto-resetting");
            state = match self.load_state(fingerprint) {
                Ok(fresh) => fresh,
                Err(err) => {
                    self.state = Some(state);
                    return Err(err);
                }
            };
        }

        let output = state.emit();
        tracing::debug!(
            line_index = output.line_index,
            step_index = output.step_index,
            done = output.done,
            "emitted prompt line"
        );
        self.state = Some(state);
        Ok(output)
    }

    /// Drops all sequencing state; the next call starts from `start_value`.
    ///
    /// Cached records are kept.
    pub fn reset(&mut self) {
        self.state = None;
    }

    pub fn phase(&self) -> Phase {
        match &self.state {
            None => Phase::Uninitialized,
            Some(state) => state.fingerprint.limit().phase(state.emitted_steps),
        }
    }

    fn load_state(&mut self, fingerprint: Fingerprint) -> Result<SequencerState> {
        let column = Some(fingerprint.column.as_str()).filter(|c| !c.is_empty());
        let key = SourceKey::new(&fingerprint.path, column);
        let records = self.cache.get_or_load(&key, &ReadOptions::raw())?;
        if records.is_empty() {
            return Err(CoreError::EmptySource {
                path: fingerprint.path,
            });
        }
        Ok(SequencerState {
            next_index: i128::from(fingerprint.start_value),
            fingerprint,
            records,
            emitted_steps: 0,
            last: Emission::default(),
        })
    }
}
