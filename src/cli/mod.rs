//! Command-line surface: argument parsing and result rendering.

mod clap_parser;

pub use clap_parser::{Cli, Command, SearchArgs};

use crate::export::csv_export::{RESULT_HEADERS, format_score_pct};
use crate::models::ScoredMatch;

pub const INVALID_INPUT_MSG: &str = "Please enter a valid family name (letters only).";
pub const NO_MATCHES_MSG: &str = "No matches found";

/// Render matches as an aligned plain-text table.
pub fn render_table(matches: &[ScoredMatch]) -> String {
    let rows: Vec<[String; 3]> = matches
        .iter()
        .map(|m| [m.name.clone(), format_score_pct(m.score), m.method.clone()])
        .collect();
    let mut widths = RESULT_HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(cell.chars().count());
        }
    }
    let mut out = String::new();
    let mut push_row = |cells: [&str; 3]| {
        let line = cells
            .iter()
            .zip(widths.iter())
            .map(|(c, w)| format!("{:<width$}", c, width = *w))
            .collect::<Vec<_>>()
            .join("  ");
        out.push_str(line.trim_end());
        out.push('\n');
    };
    push_row(RESULT_HEADERS);
    for row in &rows {
        push_row([row[0].as_str(), row[1].as_str(), row[2].as_str()]);
    }
    out
}
