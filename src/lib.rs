pub mod filter;
pub mod loader;
pub mod matrix;
pub mod records;
pub mod report;

use anyhow::{Result, bail};
use std::io::Write;
use std::path::PathBuf;

use crate::matrix::CompletionMatrix;
use crate::report::{ReportOptions, write_report};

/// Locations of the three input files.
#[derive(Debug, Clone)]
pub struct Inputs {
    pub students: PathBuf,
    pub report: PathBuf,
    pub labs: PathBuf,
    /// Files start directly with data rows.
    pub no_headers: bool,
}

impl Inputs {
    /// Checks that every input exists, in the order students, report, labs.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first missing file.
    pub fn check_exist(&self) -> Result<()> {
        let files = [
            ("Student", &self.students),
            ("Report", &self.report),
            ("Labs", &self.labs),
        ];
        for (kind, path) in files {
            if !path.is_file() {
                bail!("{} file {} does not exist", kind, path.display());
            }
        }
        Ok(())
    }
}

/// Loads the inputs and computes the best score per checked lab and student.
#[tracing::instrument(skip_all)]
pub fn completion_matrix(inputs: &Inputs) -> Result<CompletionMatrix> {
    inputs.check_exist()?;

    let students = loader::load_students(&inputs.students, inputs.no_headers)?;
    let labs = loader::load_labs(&inputs.labs, inputs.no_headers)?;
    let attempts = loader::load_attempts(&inputs.report, inputs.no_headers)?;

    let joined = filter::join_attempts(&attempts, &students, &labs);
    CompletionMatrix::build(&labs, &students, &joined)
}

/// Runs the whole pipeline and writes the report to `out`.
pub fn run<W: Write>(inputs: &Inputs, options: &ReportOptions, out: &mut W) -> Result<()> {
    let matrix = completion_matrix(inputs)?;
    write_report(out, &matrix, options)?;
    out.flush()?;
    Ok(())
}
