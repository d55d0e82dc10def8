//! Joins report rows to the roster and catalog.

use std::collections::HashMap;
use tracing::{debug, info};

use crate::records::{Attempt, Lab, Student, StudentAttempt};

/// Keeps attempts by a known student on a known lab that is flagged for
/// checking, joined to their student and lab. Everything else is dropped.
pub fn join_attempts<'a>(
    attempts: &'a [Attempt],
    students: &'a HashMap<String, Student>,
    labs: &'a HashMap<String, Lab>,
) -> Vec<StudentAttempt<'a>> {
    let joined: Vec<StudentAttempt<'a>> = attempts
        .iter()
        .filter_map(|attempt| {
            let student = students.get(&attempt.email)?;
            let lab = labs.get(&attempt.lab_name).filter(|lab| lab.to_check)?;
            Some(StudentAttempt {
                student,
                lab,
                attempt,
            })
        })
        .collect();

    debug!(dropped = attempts.len() - joined.len(), "Unmatched attempts dropped");
    info!(count = joined.len(), "Created {} records", joined.len());
    joined
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student(email: &str) -> (String, Student) {
        (
            email.to_string(),
            Student {
                last_name: "Doe".into(),
                first_name: "Jane".into(),
                email: email.into(),
            },
        )
    }

    fn lab(name: &str, to_check: bool) -> (String, Lab) {
        (
            name.to_string(),
            Lab {
                lab_name: name.into(),
                to_check,
            },
        )
    }

    fn attempt(email: &str, lab_name: &str) -> Attempt {
        Attempt {
            credits_used: "1".into(),
            used_on: "2024-01-01".into(),
            user: "u".into(),
            email: email.into(),
            lab_name: lab_name.into(),
            runtime: "10".into(),
            duration: "10".into(),
            percent_complete: "50".into(),
        }
    }

    #[test]
    fn test_join_drops_unknown_and_unchecked() {
        let students: HashMap<_, _> = [student("jane@x.edu")].into_iter().collect();
        let labs: HashMap<_, _> = [lab("Lab1", true), lab("Lab2", false)]
            .into_iter()
            .collect();
        let attempts = vec![
            attempt("jane@x.edu", "Lab1"),
            attempt("ghost@x.edu", "Lab1"),
            attempt("jane@x.edu", "Lab9"),
            attempt("jane@x.edu", "Lab2"),
        ];

        let joined = join_attempts(&attempts, &students, &labs);
        assert_eq!(joined.len(), 1);
        assert_eq!(joined[0].student.email, "jane@x.edu");
        assert_eq!(joined[0].lab.lab_name, "Lab1");
    }

    #[test]
    fn test_join_does_not_parse_percent_of_dropped_rows() {
        let students: HashMap<_, _> = [student("jane@x.edu")].into_iter().collect();
        let labs: HashMap<_, _> = [lab("Lab1", true)].into_iter().collect();
        let mut stray = attempt("ghost@x.edu", "Lab1");
        stray.percent_complete = "not a number".into();

        let binding = [stray];
        let joined = join_attempts(&binding, &students, &labs);
        assert!(joined.is_empty());
    }
}
