use std::cmp::Ordering;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};
use serde_json::Value;

use designer_cli::replay::ReplayOutcome;
use designer_engine::{ConfigReport, IssueSeverity};

pub fn print_run_summary(outcome: &ReplayOutcome) {
    if outcome.filters.is_empty() {
        println!("Filter state: empty");
    } else {
        let mut table = Table::new();
        table.set_header(vec![
            header_cell("Component"),
            header_cell("Type"),
            header_cell("Value"),
            header_cell("Ready"),
        ]);
        apply_state_table_style(&mut table);
        align_column(&mut table, 3, CellAlignment::Center);
        for filter in &outcome.filters {
            table.add_row(vec![
                Cell::new(&filter.id)
                    .fg(Color::Blue)
                    .add_attribute(Attribute::Bold),
                Cell::new(&filter.component_name),
                Cell::new(render_value(&filter.value)),
                ready_cell(filter.ready),
            ]);
        }
        println!("Filter state:");
        println!("{table}");
    }

    if !outcome.pending_scopes.is_empty() {
        let mut table = Table::new();
        table.set_header(vec![
            header_cell("Scope"),
            header_cell("Component"),
            header_cell("Value"),
        ]);
        apply_state_table_style(&mut table);
        for (scope, entries) in &outcome.pending_scopes {
            for (component, value) in entries {
                table.add_row(vec![
                    Cell::new(scope).fg(Color::Magenta),
                    Cell::new(component),
                    Cell::new(render_value(value)),
                ]);
            }
        }
        println!();
        println!("Pending scopes:");
        println!("{table}");
    }

    if outcome.fetches.is_empty() {
        println!();
        println!("Fetches: none dispatched");
    } else {
        let mut table = Table::new();
        table.set_header(vec![
            header_cell("Target"),
            header_cell("Gen"),
            header_cell("Params"),
        ]);
        apply_state_table_style(&mut table);
        align_column(&mut table, 1, CellAlignment::Right);
        for fetch in &outcome.fetches {
            table.add_row(vec![
                Cell::new(&fetch.target)
                    .fg(Color::Blue)
                    .add_attribute(Attribute::Bold),
                Cell::new(fetch.generation),
                Cell::new(fetch.params.to_string()),
            ]);
        }
        println!();
        println!("Fetches:");
        println!("{table}");
    }

    print_issue_table(&outcome.audit);
}

pub fn print_check_summary(report: &ConfigReport) {
    if report.issues.is_empty() {
        println!("Configuration OK: no issues found");
        return;
    }
    print_issue_table(report);
    println!(
        "{} error(s), {} warning(s)",
        report.error_count(),
        report.warning_count()
    );
}

fn print_issue_table(report: &ConfigReport) {
    if report.issues.is_empty() {
        return;
    }
    let mut issues: Vec<_> = report.issues.iter().collect();
    issues.sort_by(|a, b| {
        let severity = severity_rank(b.severity).cmp(&severity_rank(a.severity));
        if severity != Ordering::Equal {
            return severity;
        }
        a.code.cmp(&b.code)
    });
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Severity"),
        header_cell("Code"),
        header_cell("Component"),
        header_cell("Message"),
    ]);
    apply_issue_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Center);
    for issue in issues {
        table.add_row(vec![
            severity_cell(issue.severity),
            Cell::new(&issue.code),
            match &issue.component {
                Some(component) => Cell::new(component),
                None => dim_cell("-"),
            },
            Cell::new(&issue.message),
        ]);
    }
    println!();
    println!("Issues:");
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_state_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_issue_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(140);
    if table.column_count() >= 4 {
        table.set_constraints(vec![
            ColumnConstraint::UpperBoundary(Width::Fixed(10)),
            ColumnConstraint::UpperBoundary(Width::Fixed(8)),
            ColumnConstraint::UpperBoundary(Width::Fixed(24)),
            ColumnConstraint::UpperBoundary(Width::Percentage(60)),
        ]);
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn severity_rank(severity: IssueSeverity) -> u8 {
    match severity {
        IssueSeverity::Error => 2,
        IssueSeverity::Warning => 1,
    }
}

fn severity_cell(severity: IssueSeverity) -> Cell {
    match severity {
        IssueSeverity::Error => Cell::new("ERROR").fg(Color::Red),
        IssueSeverity::Warning => Cell::new("WARN").fg(Color::Yellow),
    }
}

fn ready_cell(ready: bool) -> Cell {
    if ready {
        Cell::new("✓")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold)
    } else {
        Cell::new("✗").fg(Color::Yellow)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

/// Strings render bare, everything else as compact JSON.
fn render_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
