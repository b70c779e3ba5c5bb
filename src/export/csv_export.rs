use crate::error::ExportError;
use crate::models::ScoredMatch;
use csv::{Writer, WriterBuilder};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub const RESULT_HEADERS: [&str; 3] = ["Original Name", "Similarity Score", "Matching Method"];

/// Render a score in 0.0..=1.0 as a one-decimal percentage, e.g. `0.85 -> "85.0%"`.
pub fn format_score_pct(score: f64) -> String {
    format!("{:.1}%", score * 100.0)
}

/// Presentation-level filter applied on top of the engine threshold.
pub fn apply_display_threshold(
    matches: Vec<ScoredMatch>,
    min_score: Option<f64>,
) -> Vec<ScoredMatch> {
    match min_score {
        Some(min) => matches.into_iter().filter(|m| m.score >= min).collect(),
        None => matches,
    }
}

pub fn export_matches_csv<W: Write>(matches: &[ScoredMatch], out: W) -> Result<(), ExportError> {
    let mut w = WriterBuilder::new().from_writer(out);
    write_rows(&mut w, matches)?;
    w.flush()?;
    Ok(())
}

pub fn export_matches_csv_path(
    matches: &[ScoredMatch],
    path: impl AsRef<Path>,
) -> Result<(), ExportError> {
    let file = File::create(path.as_ref())?;
    export_matches_csv(matches, BufWriter::new(file))?;
    log::info!(
        "wrote {} matches to {}",
        matches.len(),
        path.as_ref().display()
    );
    Ok(())
}

fn write_rows<W: Write>(w: &mut Writer<W>, matches: &[ScoredMatch]) -> Result<(), ExportError> {
    w.write_record(RESULT_HEADERS)?;
    for m in matches {
        let score = format_score_pct(m.score);
        w.write_record([m.name.as_str(), score.as_str(), m.method.as_str()])?;
    }
    Ok(())
}
