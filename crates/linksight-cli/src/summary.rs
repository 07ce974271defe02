use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use linksight_match::StatusCounts;

use crate::types::MatchResult;

/// Prints the run summary; to stderr when candidate rows went to stdout.
pub fn print_summary(result: &MatchResult) {
    let mut lines = vec![
        format!("Reference: {} (sha256 {})", result.reference.display(), result.reference_digest),
        format!("Records: {}", result.records),
        format!("Candidate rows: {}", result.candidate_rows),
    ];
    if let Some(path) = &result.output {
        lines.push(format!("Output: {}", path.display()));
    }
    if let Some(path) = &result.canonical_output {
        lines.push(format!(
            "Canonical: {} ({} written, {} pending)",
            path.display(),
            result.canonical,
            result.pending
        ));
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Level"),
        header_cell("Exact"),
        header_cell("Near"),
        header_cell("Ambiguous"),
        header_cell("Backfilled"),
        header_cell("Placeholder"),
        header_cell("Missing"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 1..=6 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for (level, counts) in &result.levels {
        table.add_row(level_row(level, counts));
    }
    lines.push(table.to_string());
    if result.needs_review > 0 {
        lines.push(format!("{} record(s) need review", result.needs_review));
    }

    let text = lines.join("\n");
    if result.output.is_some() {
        println!("{text}");
    } else {
        eprintln!("{text}");
    }
}

fn level_row(level: &str, counts: &StatusCounts) -> Vec<Cell> {
    vec![
        Cell::new(level).add_attribute(Attribute::Bold),
        count_cell(counts.exact, Color::Green),
        count_cell(counts.near, Color::Green),
        count_cell(counts.ambiguous, Color::Yellow),
        count_cell(counts.backfilled, Color::Cyan),
        count_cell(counts.placeholder, Color::Cyan),
        count_cell(counts.missing, Color::Red),
    ]
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color)
    } else {
        dim_cell(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}
