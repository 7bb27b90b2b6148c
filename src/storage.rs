//! Roster file persistence
//!
//! One student per line, comma-delimited, no quoting:
//!
//! ```text
//! name,roll,attendance,total[,grade_level]
//! ```
//!
//! Three-field lines (`name,roll,attendance`) from older files are accepted
//! and treated as `total = attendance`. A trailing grade level marks a
//! high-school student.

use crate::roster::Roster;
use crate::student::{Role, Student, TOTAL_CLASSES};
use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Default roster file name
pub const DEFAULT_FILE: &str = "students.csv";

/// Errors from loading or saving a roster file
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("{path}: {count} malformed line(s), first at {first}")]
    Malformed {
        path: String,
        count: usize,
        first: LineError,
    },
}

/// Result type for storage operations
pub type Result<T> = std::result::Result<T, StorageError>;

/// A rejected line in a roster file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineError {
    /// 1-based line number
    pub line: usize,
    pub reason: String,
}

impl fmt::Display for LineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.reason)
    }
}

/// How to treat malformed lines while loading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadMode {
    /// Skip malformed lines and report them
    #[default]
    Lenient,
    /// Fail the whole load on the first malformed line
    Strict,
}

/// Outcome of a load: the roster plus any lines that were skipped
#[derive(Debug, Default)]
pub struct LoadReport {
    pub roster: Roster,
    pub rejected: Vec<LineError>,
}

/// Load a roster file; a missing file yields an empty roster
pub fn load(path: impl AsRef<Path>, mode: LoadMode) -> Result<LoadReport> {
    let path = path.as_ref();
    let contents = match fs::read(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            info!(path = %path.display(), "roster file not found, starting empty");
            return Ok(LoadReport::default());
        }
        Err(source) => {
            return Err(StorageError::Io {
                path: path.display().to_string(),
                source,
            })
        }
    };

    let report = parse(&contents);
    for err in &report.rejected {
        warn!(path = %path.display(), "skipping {}", err);
    }

    if mode == LoadMode::Strict {
        if let Some(first) = report.rejected.first() {
            return Err(StorageError::Malformed {
                path: path.display().to_string(),
                count: report.rejected.len(),
                first: first.clone(),
            });
        }
    }

    info!(
        path = %path.display(),
        students = report.roster.len(),
        rejected = report.rejected.len(),
        "roster loaded"
    );
    Ok(report)
}

/// Parse roster file contents
///
/// Lines are decoded one at a time so a line that is not UTF-8 is rejected
/// on its own.
pub fn parse(contents: &[u8]) -> LoadReport {
    let mut students = Vec::new();
    let mut rejected = Vec::new();
    let mut seen = HashSet::new();

    let mut lines: Vec<&[u8]> = contents.split(|&b| b == b'\n').collect();
    if lines.last().is_some_and(|last| last.is_empty()) {
        lines.pop();
    }

    for (idx, bytes) in lines.into_iter().enumerate() {
        let line = idx + 1;
        let raw = match std::str::from_utf8(bytes) {
            Ok(raw) => raw.strip_suffix('\r').unwrap_or(raw),
            Err(_) => {
                rejected.push(LineError {
                    line,
                    reason: "invalid UTF-8".to_string(),
                });
                continue;
            }
        };
        if raw.trim().is_empty() {
            continue;
        }
        match parse_line(raw) {
            Ok(student) if !seen.insert(student.roll()) => rejected.push(LineError {
                line,
                reason: format!("duplicate roll number {}", student.roll()),
            }),
            Ok(student) => students.push(student),
            Err(reason) => rejected.push(LineError { line, reason }),
        }
    }

    LoadReport {
        roster: Roster::from_students(students),
        rejected,
    }
}

fn parse_count(field: &str, what: &str) -> std::result::Result<u32, String> {
    field
        .trim()
        .parse::<u32>()
        .map_err(|_| format!("invalid {} {:?}", what, field))
}

/// Parse one non-blank line into a student
fn parse_line(raw: &str) -> std::result::Result<Student, String> {
    let fields: Vec<&str> = raw.split(',').collect();
    if !(3..=5).contains(&fields.len()) {
        return Err(format!("expected 3 to 5 fields, found {}", fields.len()));
    }

    let name = fields[0];
    if name.trim().is_empty() {
        return Err("empty name".to_string());
    }
    let roll = fields[1]
        .trim()
        .parse::<i64>()
        .map_err(|_| format!("invalid roll number {:?}", fields[1]))?;
    let attendance = parse_count(fields[2], "attendance")?;
    let total = match fields.get(3) {
        Some(f) => parse_count(f, "total classes")?,
        None => attendance,
    };

    if attendance > TOTAL_CLASSES {
        return Err(format!(
            "attendance {} exceeds the {} class cap",
            attendance, TOTAL_CLASSES
        ));
    }
    if attendance > total {
        return Err(format!(
            "attendance {} exceeds total classes {}",
            attendance, total
        ));
    }

    let role = match fields.get(4).map(|g| g.trim()) {
        Some("") => return Err("empty grade level".to_string()),
        Some(grade) => Role::HighSchool {
            grade_level: grade.to_string(),
        },
        None => Role::Standard,
    };

    Ok(Student::with_counts(name, roll, attendance, total).with_role(role))
}

/// Format one student as a roster file line (without newline)
pub fn format_line(student: &Student) -> String {
    let mut line = format!(
        "{},{},{},{}",
        student.name(),
        student.roll(),
        student.attendance(),
        student.total_classes()
    );
    if let Some(grade) = student.role().grade_level() {
        line.push(',');
        line.push_str(grade);
    }
    line
}

/// Write every student to `path`, replacing its contents
pub fn save(roster: &Roster, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let io_err = |source| StorageError::Io {
        path: path.display().to_string(),
        source,
    };

    let file = fs::File::create(path).map_err(io_err)?;
    let mut writer = BufWriter::new(file);
    for student in roster.students() {
        writeln!(writer, "{}", format_line(student)).map_err(io_err)?;
    }
    writer.flush().map_err(io_err)?;

    debug!(path = %path.display(), students = roster.len(), "roster saved");
    Ok(())
}
