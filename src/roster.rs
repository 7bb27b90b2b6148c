//! Roster manager: the ordered student list plus the session threshold

use crate::student::{MarkOutcome, Role, Student};
use crate::threshold::{Threshold, ThresholdError};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

/// Errors from roster mutations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RosterError {
    #[error("Student with the same roll number already exists: {0}")]
    DuplicateRoll(i64),

    #[error("Roll number 0 is reserved for ending attendance marking")]
    ReservedRoll,

    #[error("Invalid student name {0:?}: must be non-empty and contain no commas or newlines")]
    InvalidName(String),

    #[error("Invalid grade level {0:?}: must be non-empty and contain no commas or newlines")]
    InvalidGrade(String),
}

/// Result type for roster operations
pub type Result<T> = std::result::Result<T, RosterError>;

/// Aggregate figures for a roster
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RosterSummary {
    pub students: usize,
    pub passing: usize,
    pub mean_percentage: f64,
    pub threshold: f64,
}

/// Ordered collection of students and the threshold they are judged against
#[derive(Debug, Clone, Default)]
pub struct Roster {
    students: Vec<Student>,
    threshold: Threshold,
}

impl Roster {
    /// Create an empty roster with the default threshold
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a roster from already-validated records (used by the loader)
    pub fn from_students(students: Vec<Student>) -> Self {
        Self {
            students,
            threshold: Threshold::default(),
        }
    }

    pub fn students(&self) -> &[Student] {
        &self.students
    }

    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    pub fn threshold(&self) -> Threshold {
        self.threshold
    }

    /// Replace the threshold with an already-validated value
    pub fn with_threshold(mut self, threshold: Threshold) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set the pass threshold
    ///
    /// Out-of-range input resets the threshold to the default before the
    /// error is returned.
    pub fn set_threshold(&mut self, value: f64) -> std::result::Result<(), ThresholdError> {
        match Threshold::new(value) {
            Ok(t) => {
                info!(threshold = value, "threshold updated");
                self.threshold = t;
                Ok(())
            }
            Err(e) => {
                self.threshold = Threshold::default();
                Err(e)
            }
        }
    }

    fn check_new(&self, name: &str, roll: i64) -> Result<()> {
        if name.trim().is_empty() || name.contains([',', '\n', '\r']) {
            return Err(RosterError::InvalidName(name.to_string()));
        }
        if roll == 0 {
            return Err(RosterError::ReservedRoll);
        }
        if self.students.iter().any(|s| s.roll() == roll) {
            return Err(RosterError::DuplicateRoll(roll));
        }
        Ok(())
    }

    /// Add a standard student
    pub fn add(&mut self, name: &str, roll: i64) -> Result<&Student> {
        self.add_with_role(name, roll, Role::Standard)
    }

    /// Add a high-school student with a grade level
    pub fn add_high_school(&mut self, name: &str, roll: i64, grade_level: &str) -> Result<&Student> {
        let grade_level = grade_level.trim();
        if grade_level.is_empty() || grade_level.contains([',', '\n', '\r']) {
            return Err(RosterError::InvalidGrade(grade_level.to_string()));
        }
        self.add_with_role(
            name,
            roll,
            Role::HighSchool {
                grade_level: grade_level.to_string(),
            },
        )
    }

    fn add_with_role(&mut self, name: &str, roll: i64, role: Role) -> Result<&Student> {
        self.check_new(name, roll)?;
        debug!(name, roll, "adding student");
        self.students.push(Student::new(name, roll).with_role(role));
        Ok(&self.students[self.students.len() - 1])
    }

    /// Mark the first student with `roll` present
    pub fn mark_attendance(&mut self, roll: i64) -> MarkOutcome {
        match self.students.iter_mut().find(|s| s.roll() == roll) {
            Some(student) => {
                let outcome = student.mark_attendance();
                debug!(roll, ?outcome, "attendance marked");
                outcome
            }
            None => MarkOutcome::NotFound,
        }
    }

    pub fn find_by_roll(&self, roll: i64) -> Option<&Student> {
        self.students.iter().find(|s| s.roll() == roll)
    }

    /// First student whose name matches exactly
    pub fn find_by_name(&self, name: &str) -> Option<&Student> {
        self.students.iter().find(|s| s.name() == name)
    }

    pub fn is_passing(&self, student: &Student) -> bool {
        student.is_passing(self.threshold.value())
    }

    /// Students ordered by descending percentage; ties keep roster order
    pub fn sorted_by_percentage_desc(&self) -> Vec<&Student> {
        let mut sorted: Vec<&Student> = self.students.iter().collect();
        sorted.sort_by(|a, b| {
            b.attendance_percentage()
                .total_cmp(&a.attendance_percentage())
        });
        sorted
    }

    /// Names of passing students in roster order
    pub fn passing_names(&self) -> Vec<&str> {
        self.students
            .iter()
            .filter(|s| self.is_passing(s))
            .map(Student::name)
            .collect()
    }

    pub fn summary(&self) -> RosterSummary {
        let mean_percentage = if self.students.is_empty() {
            0.0
        } else {
            self.students
                .iter()
                .map(Student::attendance_percentage)
                .sum::<f64>()
                / self.students.len() as f64
        };
        RosterSummary {
            students: self.students.len(),
            passing: self.passing_names().len(),
            mean_percentage,
            threshold: self.threshold.value(),
        }
    }
}
