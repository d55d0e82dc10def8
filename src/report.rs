//! Output formatting for the completion matrix.
//!
//! Supports a plain-text listing and pretty-printed JSON.

use anyhow::Result;
use serde::Serialize;
use std::io::Write;

use crate::matrix::CompletionMatrix;

/// Score at which a lab counts as complete unless overridden.
pub const DEFAULT_COMPLETE_THRESHOLD: i64 = 100;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Display settings for a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    /// Only list students below `complete_threshold`.
    pub just_incomplete: bool,
    pub complete_threshold: i64,
    pub format: OutputFormat,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            just_incomplete: false,
            complete_threshold: DEFAULT_COMPLETE_THRESHOLD,
            format: OutputFormat::Text,
        }
    }
}

impl ReportOptions {
    fn shows(&self, score: i64) -> bool {
        !self.just_incomplete || score < self.complete_threshold
    }
}

/// One student's best score on a lab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreRow {
    pub email: String,
    pub score: i64,
}

/// Every visible score for a single checked lab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabReport {
    pub lab: String,
    pub scores: Vec<ScoreRow>,
}

/// Selects the rows to display, in lab then email order.
pub fn build_report(matrix: &CompletionMatrix, options: &ReportOptions) -> Vec<LabReport> {
    matrix
        .iter()
        .map(|(lab, row)| LabReport {
            lab: lab.to_string(),
            scores: row
                .iter()
                .filter(|(_, score)| options.shows(**score))
                .map(|(email, score)| ScoreRow {
                    email: email.clone(),
                    score: *score,
                })
                .collect(),
        })
        .collect()
}

/// Writes the lab blocks as text: a leading blank line, then for each lab
/// its name, one `email: score` line per student and a blank line.
pub fn write_text<W: Write>(out: &mut W, report: &[LabReport]) -> Result<()> {
    writeln!(out)?;
    for lab in report {
        writeln!(out, "{}", lab.lab)?;
        for row in &lab.scores {
            writeln!(out, "{}: {}", row.email, row.score)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Writes the lab blocks as a pretty-printed JSON array.
pub fn write_json<W: Write>(out: &mut W, report: &[LabReport]) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, report)?;
    writeln!(out)?;
    Ok(())
}

/// Renders `matrix` to `out` in the configured format.
pub fn write_report<W: Write>(
    out: &mut W,
    matrix: &CompletionMatrix,
    options: &ReportOptions,
) -> Result<()> {
    let report = build_report(matrix, options);
    match options.format {
        OutputFormat::Text => write_text(out, &report),
        OutputFormat::Json => write_json(out, &report),
    }
}
