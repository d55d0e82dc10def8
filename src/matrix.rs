//! Best completion percentage per (lab, student).

use anyhow::Result;
use std::collections::{BTreeMap, HashMap};
use tracing::info;

use crate::records::{Lab, Student, StudentAttempt};

/// Lab name → student email → highest percent complete.
///
/// Holds a cell for every checked lab and every known student, so a student
/// with no attempts on a lab reads as 0. Iteration is ordered by lab name,
/// then by email.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CompletionMatrix {
    labs: BTreeMap<String, BTreeMap<String, i64>>,
}

impl CompletionMatrix {
    /// Creates a zeroed matrix over the checked labs and all students.
    pub fn new(labs: &HashMap<String, Lab>, students: &HashMap<String, Student>) -> Self {
        let row: BTreeMap<String, i64> = students.keys().map(|email| (email.clone(), 0)).collect();
        let labs = labs
            .values()
            .filter(|lab| lab.to_check)
            .map(|lab| (lab.lab_name.clone(), row.clone()))
            .collect();
        Self { labs }
    }

    /// Raises the cell for `lab`/`email` to `percent` if that is higher.
    ///
    /// Pairs outside the matrix are ignored.
    pub fn record(&mut self, lab: &str, email: &str, percent: i64) {
        if let Some(best) = self.labs.get_mut(lab).and_then(|row| row.get_mut(email)) {
            *best = (*best).max(percent);
        }
    }

    /// Folds joined attempts into the matrix.
    ///
    /// # Errors
    ///
    /// Fails on the first attempt whose percent complete is not an integer.
    #[tracing::instrument(skip_all, fields(attempts = attempts.len()))]
    pub fn record_all(&mut self, attempts: &[StudentAttempt<'_>]) -> Result<()> {
        for sa in attempts {
            let percent = sa.attempt.percent()?;
            self.record(&sa.lab.lab_name, &sa.student.email, percent);
        }
        Ok(())
    }

    /// Builds the matrix in one pass from loaded data and joined attempts.
    pub fn build(
        labs: &HashMap<String, Lab>,
        students: &HashMap<String, Student>,
        attempts: &[StudentAttempt<'_>],
    ) -> Result<Self> {
        let mut matrix = Self::new(labs, students);
        matrix.record_all(attempts)?;
        info!(
            labs = matrix.lab_count(),
            students = students.len(),
            "Tracking {} checked labs",
            matrix.lab_count()
        );
        Ok(matrix)
    }

    /// Best score for a pair, or `None` if the pair is not tracked.
    pub fn get(&self, lab: &str, email: &str) -> Option<i64> {
        self.labs.get(lab)?.get(email).copied()
    }

    /// Checked labs in name order, each with its scores in email order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeMap<String, i64>)> {
        self.labs.iter().map(|(lab, row)| (lab.as_str(), row))
    }

    /// Number of tracked labs.
    pub fn lab_count(&self) -> usize {
        self.labs.len()
    }
}
