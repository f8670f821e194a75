use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use pinchboard::buffer::Edit;
use pinchboard::geometry::{KeyboardLayout, Viewport};
use pinchboard::session::{CommitEvent, Session};

/// Outcome of auditing one viewport size.
#[derive(Debug, Clone)]
pub struct AuditResult {
    pub viewport: Viewport,
    pub key_size: i32,
    pub violations: Vec<String>,
}

pub fn print_keyboard_grid(layout: &KeyboardLayout) {
    println!(
        "\nKeyboard: {}x{} (key {}px, band top {})",
        layout.viewport.width, layout.viewport.height, layout.key_size, layout.band_top
    );
    let mut table = Table::new();
    table.load_preset(ASCII_FULL);

    for row in &layout.rows {
        let cells: Vec<Cell> = row
            .iter()
            .map(|r| {
                let cell = Cell::new(r.key.label()).set_alignment(CellAlignment::Center);
                if r.key.is_special() {
                    cell.fg(Color::Cyan)
                } else {
                    cell
                }
            })
            .collect();
        table.add_row(cells);
    }
    println!("{}", table);
}

pub fn print_layout_table(layout: &KeyboardLayout) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Key").add_attribute(Attribute::Bold),
        Cell::new("Row"),
        Cell::new("Col"),
        Cell::new("X"),
        Cell::new("Y"),
        Cell::new("W"),
        Cell::new("H"),
    ]);

    for i in 1..=6 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    for r in layout.keys() {
        table.add_row(vec![
            Cell::new(r.key.label()).add_attribute(Attribute::Bold),
            Cell::new(r.row),
            Cell::new(r.col),
            Cell::new(r.x),
            Cell::new(r.y),
            Cell::new(r.width),
            Cell::new(r.height),
        ]);
    }
    println!("{}", table);
}

pub fn print_commit_log(commits: &[CommitEvent]) {
    if commits.is_empty() {
        println!("\nNo keys committed.");
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("#"),
        Cell::new("Time (ms)"),
        Cell::new("Key").add_attribute(Attribute::Bold),
        Cell::new("Edit"),
    ]);

    for (i, c) in commits.iter().enumerate() {
        let edit = match c.edit {
            Edit::Inserted(ch) => Cell::new(format!("+ {:?}", ch)).fg(Color::Green),
            Edit::Deleted(ch) => Cell::new(format!("- {:?}", ch)).fg(Color::Red),
            Edit::Cleared => Cell::new("cleared").fg(Color::Red),
            Edit::Unchanged => Cell::new("-"),
        };
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(c.at.as_millis()).set_alignment(CellAlignment::Right),
            Cell::new(c.key.label()).add_attribute(Attribute::Bold),
            edit,
        ]);
    }
    println!("\n{}", table);
}

pub fn print_session_summary(session: &Session) {
    let stats = session.stats();
    println!("\nText: {:?}", session.text());
    println!(
        "Frames: {} processed, {} skipped, {} failed | Commits: {}",
        stats.processed, stats.skipped, stats.failed, stats.commits
    );
}

pub fn print_audit_report(results: &[AuditResult]) {
    let failing: Vec<&AuditResult> = results.iter().filter(|r| !r.violations.is_empty()).collect();

    let min_key = results.iter().map(|r| r.key_size).filter(|&k| k > 0).min();
    let max_key = results.iter().map(|r| r.key_size).max();

    let mut table = Table::new();
    table.load_preset(ASCII_FULL);
    table.add_row(vec![
        Cell::new("Viewports").add_attribute(Attribute::Bold),
        Cell::new(results.len()),
    ]);
    table.add_row(vec![
        Cell::new("Key size range").add_attribute(Attribute::Bold),
        Cell::new(match (min_key, max_key) {
            (Some(lo), Some(hi)) => format!("{}..={} px", lo, hi),
            _ => "n/a".to_string(),
        }),
    ]);
    let fail_cell = Cell::new(failing.len());
    table.add_row(vec![
        Cell::new("Failing").add_attribute(Attribute::Bold),
        if failing.is_empty() {
            fail_cell.fg(Color::Green)
        } else {
            fail_cell.fg(Color::Red)
        },
    ]);
    println!("\n{}", table);

    if failing.is_empty() {
        return;
    }

    let mut detail = Table::new();
    detail
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    detail.set_header(vec![Cell::new("Viewport"), Cell::new("Violation")]);
    for r in failing.iter().take(20) {
        for v in &r.violations {
            detail.add_row(vec![
                Cell::new(format!("{}x{}", r.viewport.width, r.viewport.height)),
                Cell::new(v).fg(Color::Red),
            ]);
        }
    }
    println!("{}", detail);
}
