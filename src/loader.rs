//! CSV loading for the roster, lab catalog and completion report.
//!
//! Columns are positional. Each file may open with header lines that are
//! skipped regardless of their shape. Blank lines are rows like any other,
//! so a blank line in the header region counts as a header line and a
//! blank data line is a short row.

use anyhow::{Context, Result, bail};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::records::{Attempt, FromRow, Lab, Student};

/// Header lines at the top of the roster and lab catalog.
pub const ROSTER_HEADER_LINES: usize = 1;
/// Header lines at the top of the completion report.
pub const REPORT_HEADER_LINES: usize = 2;

/// Splits `text` into raw rows tagged with the 1-based line each starts on.
///
/// Physical lines are joined while a quoted cell is still open.
fn split_rows(text: &str) -> Vec<(usize, String)> {
    let mut rows: Vec<(usize, String)> = Vec::new();
    for (index, line) in text.lines().enumerate() {
        match rows.last_mut() {
            Some((_, row)) if row.matches('"').count() % 2 == 1 => {
                row.push('\n');
                row.push_str(line);
            }
            _ => rows.push((index + 1, line.to_string())),
        }
    }
    rows
}

/// Parses a single raw row. A blank row has no cells.
fn parse_row(row: &str) -> csv::Result<StringRecord> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(row.as_bytes());
    let record = rdr.records().next().transpose()?;
    Ok(record.unwrap_or_default())
}

/// Reads every data row of `path` into `T`, skipping `skip` leading lines.
///
/// # Errors
///
/// Fails if the file cannot be read, is not valid CSV, or a data row
/// (blank ones included) has fewer than `T::COLUMNS` cells.
pub fn load_rows<T: FromRow>(path: &Path, skip: usize) -> Result<Vec<T>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to open {}", path.display()))?;

    let mut rows = Vec::new();
    for (line, raw) in split_rows(&text).into_iter().skip(skip) {
        let record = parse_row(&raw)
            .with_context(|| format!("failed to read {} line {}", path.display(), line))?;
        if record.len() < T::COLUMNS {
            bail!(
                "{} line {}: expected at least {} columns, found {}",
                path.display(),
                line,
                T::COLUMNS,
                record.len()
            );
        }
        rows.push(T::from_row(&record));
    }

    Ok(rows)
}

fn header_lines(no_headers: bool, lines: usize) -> usize {
    if no_headers { 0 } else { lines }
}

/// Loads the roster keyed by email. Later rows replace earlier duplicates.
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn load_students(path: &Path, no_headers: bool) -> Result<HashMap<String, Student>> {
    let rows: Vec<Student> = load_rows(path, header_lines(no_headers, ROSTER_HEADER_LINES))?;
    let students: HashMap<_, _> = rows.into_iter().map(|s| (s.email.clone(), s)).collect();
    info!(count = students.len(), "Loaded {} students", students.len());
    Ok(students)
}

/// Loads the lab catalog keyed by lab name. Later rows replace earlier duplicates.
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn load_labs(path: &Path, no_headers: bool) -> Result<HashMap<String, Lab>> {
    let rows: Vec<Lab> = load_rows(path, header_lines(no_headers, ROSTER_HEADER_LINES))?;
    let labs: HashMap<_, _> = rows.into_iter().map(|l| (l.lab_name.clone(), l)).collect();
    info!(count = labs.len(), "Loaded {} labs", labs.len());
    Ok(labs)
}

/// Loads every row of the completion report in file order.
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn load_attempts(path: &Path, no_headers: bool) -> Result<Vec<Attempt>> {
    let attempts: Vec<Attempt> =
        load_rows(path, header_lines(no_headers, REPORT_HEADER_LINES))?;
    info!(count = attempts.len(), "Loaded {} attempts", attempts.len());
    Ok(attempts)
}
