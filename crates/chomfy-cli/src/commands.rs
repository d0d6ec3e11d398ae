//! Subcommand handlers: build node requests and drive one node instance.

use anyhow::{Context, Result};
use chomfy_cli::settings::ComposerDefaults;
use chomfy_core::{
    ComposeOutput, CountOutput, CountRequest, LineOutput, LineRequest, NumberCounter,
    PromptAssembler, PromptSequencer, SequenceOutput, SequenceRequest, load_line,
    parse_selection_mode, parse_source_mode,
};
use chomfy_model::SourceMode;

use crate::cli::{ComposeArgs, CountArgs, LineArgs, NextArgs};

pub fn run_next(args: &NextArgs) -> Result<Vec<SequenceOutput>> {
    let mut node = PromptSequencer::new();
    let request = SequenceRequest {
        file_path: args.file.clone(),
        start_value: args.start,
        step: args.step,
        max_steps: args.max_steps,
        auto_reset: args.auto_reset,
        reset: args.repeat.reset,
        csv_column: args.column.clone(),
        strip_whitespace: !args.no_strip,
    };

    (1..=args.repeat.repeat)
        .map(|call| {
            node.next_prompt(&request)
                .with_context(|| format!("next_prompt call {call} failed for {}", args.file))
        })
        .collect()
}

pub fn run_line(args: &LineArgs) -> Result<LineOutput> {
    let request = LineRequest {
        file_path: args.file.clone(),
        line_index: args.index,
        csv_column: args.column.clone(),
        strip_whitespace: !args.no_strip,
    };
    load_line(&request).with_context(|| format!("load_line failed for {}", args.file))
}

pub fn run_count(args: &CountArgs) -> Vec<CountOutput> {
    let mut node = NumberCounter::new();
    let request = CountRequest {
        start_value: args.start,
        step: args.step,
        max_steps: args.max_steps,
        auto_reset: args.auto_reset,
        reset: args.repeat.reset,
    };
    (0..args.repeat.repeat)
        .map(|_| node.count(&request))
        .collect()
}

pub fn run_compose(args: &ComposeArgs, defaults: &ComposerDefaults) -> Result<Vec<ComposeOutput>> {
    let mut request = defaults.request();
    if let Some(mode) = &args.mode {
        request.mode = parse_source_mode(mode)?;
    } else if !args.directory.is_empty() {
        request.mode = SourceMode::Directory;
    } else if !args.manifest.is_empty() {
        request.mode = SourceMode::ConfigFile;
    }
    if let Some(selection) = &args.selection {
        request.selection_mode = parse_selection_mode(selection)?;
    }
    request.manual_paths = args.sources.join("\n");
    request.manifest_path = args.manifest.clone();
    request.directory_path = args.directory.clone();
    if let Some(glob) = &args.glob {
        request.directory_glob = glob.clone();
    }
    if let Some(max_files) = args.max_files {
        request.max_files = max_files;
    }
    if let Some(seed) = args.seed {
        request.random_seed = seed;
    }
    request.custom_inserts = args.inserts.join("\n");
    request.prefix_text = args.prefix.clone();
    request.suffix_text = args.suffix.clone();
    request.csv_column = args.column.clone();
    request.auto_space &= !args.no_auto_space;
    request.strip_whitespace &= !args.no_strip;
    request.ignore_blank_lines &= !args.keep_blank;
    request.reset = args.repeat.reset;

    let mut node = PromptAssembler::new();
    (1..=args.repeat.repeat)
        .map(|call| {
            node.compose(&request)
                .with_context(|| format!("compose call {call} failed ({} mode)", request.mode))
        })
        .collect()
}
