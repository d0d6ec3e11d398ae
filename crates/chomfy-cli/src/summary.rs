//! Printing node results as tables or JSON lines.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use serde_json::json;

use chomfy_core::{ComposeOutput, CountOutput, LineOutput, SequenceOutput};

pub fn print_sequence(outputs: &[SequenceOutput]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Call"),
        header_cell("Prompt"),
        header_cell("Line"),
        header_cell("Step"),
        header_cell("Total"),
        header_cell("Done"),
    ]);
    apply_table_style(&mut table);
    for column in [0, 2, 3, 4] {
        align_column(&mut table, column, CellAlignment::Right);
    }
    for (call, output) in outputs.iter().enumerate() {
        table.add_row(vec![
            dim_cell(call + 1),
            Cell::new(&output.prompt),
            Cell::new(output.line_index),
            Cell::new(output.step_index),
            Cell::new(output.total_lines),
            done_cell(output.done),
        ]);
    }
    println!("{table}");
}

pub fn print_sequence_json(outputs: &[SequenceOutput]) {
    for output in outputs {
        let line = json!({
            "prompt": output.prompt,
            "line_index": output.line_index,
            "step_index": output.step_index,
            "total_lines": output.total_lines,
            "done": output.done,
        });
        println!("{line}");
    }
}

pub fn print_line(output: &LineOutput) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Prompt"),
        header_cell("Line"),
        header_cell("Total"),
    ]);
    apply_table_style(&mut table);
    table.add_row(vec![
        Cell::new(&output.prompt),
        Cell::new(output.line_index),
        Cell::new(output.total_lines),
    ]);
    println!("{table}");
}

pub fn print_line_json(output: &LineOutput) {
    let line = json!({
        "prompt": output.prompt,
        "line_index": output.line_index,
        "total_lines": output.total_lines,
    });
    println!("{line}");
}

pub fn print_count(outputs: &[CountOutput]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Call"),
        header_cell("Value"),
        header_cell("Step"),
        header_cell("Done"),
    ]);
    apply_table_style(&mut table);
    for column in [0, 1, 2] {
        align_column(&mut table, column, CellAlignment::Right);
    }
    for (call, output) in outputs.iter().enumerate() {
        table.add_row(vec![
            dim_cell(call + 1),
            Cell::new(output.value),
            Cell::new(output.step_index),
            done_cell(output.done),
        ]);
    }
    println!("{table}");
}

pub fn print_count_json(outputs: &[CountOutput]) {
    for output in outputs {
        let line = json!({
            "value": output.value,
            "step_index": output.step_index,
            "done": output.done,
        });
        println!("{line}");
    }
}

/// One table per call: the prompt, then one row per source.
pub fn print_compose(outputs: &[ComposeOutput]) {
    for (call, output) in outputs.iter().enumerate() {
        println!(
            "Call {} ({} sources, {} / {}): {}",
            call + 1,
            output.file_count,
            output.report.mode,
            output.report.selection_mode,
            output.prompt
        );
        let mut table = Table::new();
        table.set_header(vec![
            header_cell("File"),
            header_cell("Column"),
            header_cell("Line"),
            header_cell("Total"),
            header_cell("Text"),
        ]);
        apply_table_style(&mut table);
        align_column(&mut table, 2, CellAlignment::Right);
        align_column(&mut table, 3, CellAlignment::Right);
        for segment in &output.report.segments {
            table.add_row(vec![
                Cell::new(&segment.file),
                segment
                    .column
                    .as_deref()
                    .map_or_else(|| dim_cell("-"), Cell::new),
                Cell::new(segment.line_index),
                Cell::new(segment.total_lines),
                Cell::new(&segment.text),
            ]);
        }
        println!("{table}");
    }
}

pub fn print_compose_json(outputs: &[ComposeOutput]) {
    for output in outputs {
        println!("{}", output.segments_json);
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn done_cell(done: bool) -> Cell {
    if done {
        Cell::new("yes").fg(Color::Yellow)
    } else {
        dim_cell("no")
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
