//! Student records and per-student attendance arithmetic

use serde::Serialize;
use std::fmt;

/// Maximum number of classes a student can be marked present for
pub const TOTAL_CLASSES: u32 = 100;

/// Role-specific data carried by a student record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Role {
    #[default]
    Standard,
    HighSchool {
        grade_level: String,
    },
}

impl Role {
    /// Grade level for high-school students
    pub fn grade_level(&self) -> Option<&str> {
        match self {
            Role::Standard => None,
            Role::HighSchool { grade_level } => Some(grade_level),
        }
    }
}

/// Result of marking a student present
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkOutcome {
    /// Both counters were incremented
    Marked,
    /// Attendance already at [`TOTAL_CLASSES`]; nothing changed
    AtCapacity,
    /// No student with the requested roll number
    NotFound,
}

/// A single student on the roster
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Student {
    name: String,
    roll: i64,
    attendance: u32,
    total_classes: u32,
    #[serde(skip_serializing_if = "is_standard")]
    role: Role,
}

fn is_standard(role: &Role) -> bool {
    matches!(role, Role::Standard)
}

impl Student {
    /// Create a student with no attendance recorded
    pub fn new(name: impl Into<String>, roll: i64) -> Self {
        Self {
            name: name.into(),
            roll,
            attendance: 0,
            total_classes: 0,
            role: Role::Standard,
        }
    }

    /// Create a student with existing counters (used by the loader)
    pub fn with_counts(name: impl Into<String>, roll: i64, attendance: u32, total: u32) -> Self {
        Self {
            attendance,
            total_classes: total,
            ..Self::new(name, roll)
        }
    }

    /// Attach a role
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn roll(&self) -> i64 {
        self.roll
    }

    pub fn attendance(&self) -> u32 {
        self.attendance
    }

    /// Number of classes recorded for this student (percentage denominator)
    pub fn total_classes(&self) -> u32 {
        self.total_classes
    }

    pub fn role(&self) -> &Role {
        &self.role
    }

    /// Mark the student present for one class
    ///
    /// Returns [`MarkOutcome::AtCapacity`] without touching either counter
    /// once attendance reaches [`TOTAL_CLASSES`].
    pub fn mark_attendance(&mut self) -> MarkOutcome {
        if self.attendance < TOTAL_CLASSES {
            self.attendance += 1;
            self.total_classes += 1;
            MarkOutcome::Marked
        } else {
            MarkOutcome::AtCapacity
        }
    }

    /// Attendance as a percentage of recorded classes (0 when none recorded)
    pub fn attendance_percentage(&self) -> f64 {
        if self.total_classes == 0 {
            return 0.0;
        }
        f64::from(self.attendance) / f64::from(self.total_classes) * 100.0
    }

    /// Whether the percentage meets the given threshold
    pub fn is_passing(&self, threshold: f64) -> bool {
        self.attendance_percentage() >= threshold
    }
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Name: {}", self.name)?;
        writeln!(f, "Roll Number: {}", self.roll)?;
        write!(f, "Attendance: {}", self.attendance)?;
        if let Some(grade) = self.role.grade_level() {
            write!(f, "\nGrade Level: {}", grade)?;
        }
        Ok(())
    }
}
