// crates/cli/src/render.rs
//! Plain-text tables for record lists and the résumé archive.

use jobtrack_core::ResumeEntry;
use jobtrack_types::Record;

const RECORD_HEADERS: [&str; 5] = ["Title", "Company", "Status", "Experience", "Keywords"];
const RESUME_HEADERS: [&str; 4] = ["#", "File", "Opening", "Company"];
const MAX_CELL: usize = 40;

fn truncate(s: &str) -> String {
    if s.chars().count() <= MAX_CELL {
        return s.to_string();
    }
    let mut out: String = s.chars().take(MAX_CELL - 1).collect();
    out.push('…');
    out
}

/// Render `records` as a left-aligned table with a header row.
pub fn table(records: &[Record]) -> String {
    let rows: Vec<[String; 5]> = records
        .iter()
        .map(|r| {
            [
                truncate(&r.title),
                truncate(&r.company),
                r.status.label().to_string(),
                r.experience_level.label().to_string(),
                truncate(&r.keywords_display()),
            ]
        })
        .collect();
    grid(RECORD_HEADERS, &rows)
}

/// Render the résumé archive, numbered from 1 for `resumes --open`.
pub fn resume_table(entries: &[ResumeEntry]) -> String {
    let rows: Vec<[String; 4]> = entries
        .iter()
        .enumerate()
        .map(|(i, e)| {
            [
                (i + 1).to_string(),
                truncate(&e.file_name),
                truncate(&e.title),
                truncate(&e.company),
            ]
        })
        .collect();
    grid(RESUME_HEADERS, &rows)
}

fn grid<const N: usize>(headers: [&str; N], rows: &[[String; N]]) -> String {
    let mut widths = headers.map(|h| h.chars().count());
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, headers.iter().copied(), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_row(&mut out, rule.iter().map(String::as_str), &widths);
    for row in rows {
        push_row(&mut out, row.iter().map(String::as_str), &widths);
    }
    out
}

fn push_row<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let line: Vec<String> = cells
        .zip(widths)
        .map(|(cell, w)| {
            let pad = w.saturating_sub(cell.chars().count());
            format!("{cell}{}", " ".repeat(pad))
        })
        .collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}
