//! Typed rows for the roster, lab catalog and completion report.

use anyhow::{Context, Result};
use csv::StringRecord;

/// A roster entry, keyed by email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    pub last_name: String,
    pub first_name: String,
    pub email: String,
}

/// A lab catalog entry, keyed by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lab {
    pub lab_name: String,
    pub to_check: bool,
}

/// One row of the completion report.
///
/// Only `email`, `lab_name` and `percent_complete` drive the aggregation;
/// the remaining columns are carried so a row reads back as it was exported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attempt {
    pub credits_used: String,
    pub used_on: String,
    pub user: String,
    pub email: String,
    pub lab_name: String,
    pub runtime: String,
    pub duration: String,
    pub percent_complete: String,
}

/// An attempt joined to the student and lab it references.
#[derive(Debug, Clone, Copy)]
pub struct StudentAttempt<'a> {
    pub student: &'a Student,
    pub lab: &'a Lab,
    pub attempt: &'a Attempt,
}

/// Builds a record from a positional CSV row.
pub trait FromRow: Sized {
    /// Number of leading columns the record reads.
    const COLUMNS: usize;

    /// Builds the record from a row already known to hold `COLUMNS` cells.
    fn from_row(row: &StringRecord) -> Self;
}

fn cell(row: &StringRecord, i: usize) -> String {
    row.get(i).unwrap_or_default().trim().to_string()
}

impl FromRow for Student {
    const COLUMNS: usize = 3;

    fn from_row(row: &StringRecord) -> Self {
        Student {
            last_name: cell(row, 0),
            first_name: cell(row, 1),
            email: cell(row, 2),
        }
    }
}

impl FromRow for Lab {
    const COLUMNS: usize = 2;

    fn from_row(row: &StringRecord) -> Self {
        let flag = cell(row, 1);
        Lab {
            lab_name: cell(row, 0),
            to_check: flag == "Y" || flag == "y",
        }
    }
}

impl FromRow for Attempt {
    const COLUMNS: usize = 8;

    fn from_row(row: &StringRecord) -> Self {
        Attempt {
            credits_used: cell(row, 0),
            used_on: cell(row, 1),
            user: cell(row, 2),
            email: cell(row, 3),
            lab_name: cell(row, 4),
            runtime: cell(row, 5),
            duration: cell(row, 6),
            percent_complete: cell(row, 7),
        }
    }
}

impl Attempt {
    /// Parses the percent-complete cell as an integer.
    ///
    /// # Errors
    ///
    /// Returns an error if the cell is not a whole number.
    pub fn percent(&self) -> Result<i64> {
        self.percent_complete.parse::<i64>().with_context(|| {
            format!(
                "invalid percent complete {:?} for {} on {}",
                self.percent_complete, self.email, self.lab_name
            )
        })
    }
}
