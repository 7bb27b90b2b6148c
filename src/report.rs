//! Roster reports in text, JSON and CSV form

use crate::cli::OutputFormat;
use crate::roster::{Roster, RosterSummary};
use crate::student::Student;
use serde::Serialize;

const SEPARATOR: &str = "------------------------";

/// One student row as it appears in a JSON report
#[derive(Debug, Clone, Serialize)]
pub struct JsonStudent<'a> {
    #[serde(flatten)]
    pub student: &'a Student,
    pub percentage: f64,
    pub passing: bool,
}

/// Top-level JSON report document
#[derive(Debug, Clone, Serialize)]
pub struct JsonReport<'a> {
    pub summary: RosterSummary,
    pub students: Vec<JsonStudent<'a>>,
}

fn result_label(passing: bool) -> &'static str {
    if passing {
        "Passing"
    } else {
        "Failing"
    }
}

/// Every student, sorted by descending percentage, in the requested format
pub fn render(roster: &Roster, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => all_students_text(roster),
        OutputFormat::Json => to_json(roster),
        OutputFormat::Csv => to_csv(roster),
    }
}

/// Display-all listing with percentage and result per student
pub fn all_students_text(roster: &Roster) -> String {
    let mut out = String::new();
    for student in roster.sorted_by_percentage_desc() {
        out.push_str(&format!(
            "{}\nAttendance Percentage: {:.2}%\nResult: {}\n",
            student,
            student.attendance_percentage(),
            result_label(roster.is_passing(student))
        ));
        out.push_str(SEPARATOR);
        out.push('\n');
    }
    out
}

/// Per-student classes-attended percentages in roster order
pub fn attendance_text(roster: &Roster) -> String {
    let mut out = String::new();
    for student in roster.students() {
        out.push_str(&format!(
            "Name: {}\n Classes Attended: {:.2}%\n\n",
            student.name(),
            student.attendance_percentage()
        ));
    }
    out
}

/// Closing list of passing students
pub fn passing_text(roster: &Roster) -> String {
    let mut out = String::from("Students who are passing:\n");
    for name in roster.passing_names() {
        out.push_str("Name: ");
        out.push_str(name);
        out.push('\n');
        out.push_str(SEPARATOR);
        out.push('\n');
    }
    out
}

pub fn summary_text(summary: &RosterSummary) -> String {
    format!(
        "{} student(s), {} passing at {}% threshold, mean attendance {:.2}%\n",
        summary.students, summary.passing, summary.threshold, summary.mean_percentage
    )
}

pub fn to_json(roster: &Roster) -> String {
    let report = JsonReport {
        summary: roster.summary(),
        students: roster
            .sorted_by_percentage_desc()
            .into_iter()
            .map(|student| JsonStudent {
                student,
                percentage: student.attendance_percentage(),
                passing: roster.is_passing(student),
            })
            .collect(),
    };
    // Only plain strings and numbers are serialized here
    serde_json::to_string_pretty(&report).unwrap_or_else(|_| "{}".to_string()) + "\n"
}

/// Escape CSV field (handle commas, quotes, newlines)
fn escape_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

pub fn to_csv(roster: &Roster) -> String {
    let mut output = String::from("name,roll,attendance,total,percentage,result\n");
    for student in roster.sorted_by_percentage_desc() {
        output.push_str(&format!(
            "{},{},{},{},{:.2},{}\n",
            escape_field(student.name()),
            student.roll(),
            student.attendance(),
            student.total_classes(),
            student.attendance_percentage(),
            result_label(roster.is_passing(student))
        ));
    }
    output
}
