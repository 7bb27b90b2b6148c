//! Interactive numbered menu over any line-oriented input

use crate::report;
use crate::roster::Roster;
use crate::storage;
use crate::student::MarkOutcome;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::{debug, info, warn};

const MENU: &str = "\
|-------------------------|
|       Menu Options      |
|-------------------------|
| 1. Add Student          |
| 2. Mark Attendance      |
| 3. Display Information  |
| 4. Display All Students |
| 5. Search by Name       |
| 6. Classes Attended     |
| 7. Set Threshold        |
| 8. Save and Exit        |
|-------------------------|
";

/// How the menu loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    /// Option 8 saved the roster
    Saved,
    /// Input ran out before option 8; nothing was saved
    EndOfInput,
}

/// A menu session owning the roster it edits
pub struct Session<R, W> {
    roster: Roster,
    path: PathBuf,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(roster: Roster, path: impl Into<PathBuf>, input: R, output: W) -> Self {
        Self {
            roster,
            path: path.into(),
            input,
            output,
        }
    }

    /// Hand back the roster once the session is over
    pub fn into_roster(self) -> Roster {
        self.roster
    }

    /// Run the menu until option 8 succeeds or input ends, then print the
    /// passing-students list
    ///
    /// The list is printed even when reading input failed.
    pub fn run(&mut self) -> io::Result<Exit> {
        let exit = match self.menu_loop() {
            Ok(exit) => exit,
            Err(e) => {
                warn!("input error, leaving menu without saving: {}", e);
                Exit::EndOfInput
            }
        };
        write!(self.output, "{}", report::passing_text(&self.roster))?;
        write!(self.output, "{}", report::summary_text(&self.roster.summary()))?;
        self.output.flush()?;
        Ok(exit)
    }

    fn menu_loop(&mut self) -> io::Result<Exit> {
        loop {
            write!(self.output, "{}", MENU)?;
            let Some(line) = self.prompt("Enter your choice: ")? else {
                info!("input closed, leaving menu without saving");
                return Ok(Exit::EndOfInput);
            };

            let choice = line.trim().parse::<u32>().ok();
            debug!(?choice, "menu choice");
            match choice {
                Some(1) => self.add_student()?,
                Some(2) => self.mark_attendance()?,
                Some(3) => self.display_by_roll()?,
                Some(4) => write!(self.output, "{}", report::all_students_text(&self.roster))?,
                Some(5) => self.search_by_name()?,
                Some(6) => write!(self.output, "{}", report::attendance_text(&self.roster))?,
                Some(7) => self.set_threshold()?,
                Some(8) => {
                    if self.save()? {
                        writeln!(self.output, "Data saved. Exiting.")?;
                        return Ok(Exit::Saved);
                    }
                }
                _ => writeln!(self.output, "Invalid choice. Try again.")?,
            }
        }
    }

    /// Print `message` and read one line; `None` at end of input
    fn prompt(&mut self, message: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", message)?;
        self.output.flush()?;
        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }
        let line = match String::from_utf8(buf) {
            Ok(line) => line,
            Err(e) => {
                self.diagnostic("Input was not valid UTF-8.")?;
                String::from_utf8_lossy(e.as_bytes()).into_owned()
            }
        };
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn prompt_roll(&mut self, message: &str) -> io::Result<Option<Result<i64, String>>> {
        Ok(self.prompt(message)?.map(|line| {
            line.trim().parse::<i64>().map_err(|_| {
                format!(
                    "Invalid roll number {:?}. Please enter a valid integer.",
                    line.trim()
                )
            })
        }))
    }

    fn diagnostic(&mut self, message: impl std::fmt::Display) -> io::Result<()> {
        warn!("{}", message);
        writeln!(self.output, "Error: {}", message)
    }

    fn add_student(&mut self) -> io::Result<()> {
        let Some(name) = self.prompt("Enter name: ")? else {
            return Ok(());
        };
        let roll = match self.prompt_roll("Enter roll number: ")? {
            Some(Ok(roll)) => roll,
            Some(Err(msg)) => return self.diagnostic(msg),
            None => return Ok(()),
        };
        let Some(grade) = self.prompt("Enter grade level (blank if none): ")? else {
            return Ok(());
        };

        let added = if grade.trim().is_empty() {
            self.roster.add(&name, roll)
        } else {
            self.roster.add_high_school(&name, roll, &grade)
        }
        .map(|student| format!("Student {} added with roll number {}.", student.name(), roll));
        match added {
            Ok(msg) => writeln!(self.output, "{}", msg),
            Err(e) => self.diagnostic(e),
        }
    }

    /// Mark rolls present until `0` is entered
    fn mark_attendance(&mut self) -> io::Result<()> {
        let mut message = "Enter roll number: ";
        loop {
            let roll = match self.prompt_roll(message)? {
                Some(Ok(0)) | None => return Ok(()),
                Some(Ok(roll)) => roll,
                Some(Err(msg)) => return self.diagnostic(msg),
            };
            match self.roster.mark_attendance(roll) {
                MarkOutcome::Marked => {
                    if let Some(student) = self.roster.find_by_roll(roll) {
                        let name = student.name().to_string();
                        writeln!(self.output, "Attendance marked for {}", name)?;
                    }
                }
                MarkOutcome::AtCapacity => writeln!(
                    self.output,
                    "Attendance cannot be marked. Maximum classes reached."
                )?,
                MarkOutcome::NotFound => {}
            }
            message = "Enter roll number (0 to exit): ";
        }
    }

    fn display_by_roll(&mut self) -> io::Result<()> {
        let roll = match self.prompt_roll("Enter roll number: ")? {
            Some(Ok(roll)) => roll,
            Some(Err(msg)) => return self.diagnostic(msg),
            None => return Ok(()),
        };
        match self.roster.find_by_roll(roll) {
            Some(student) => writeln!(self.output, "{}", student),
            None => writeln!(self.output, "Student with roll number {} not found.", roll),
        }
    }

    fn search_by_name(&mut self) -> io::Result<()> {
        let Some(name) = self.prompt("Enter name to search: ")? else {
            return Ok(());
        };
        match self.roster.find_by_name(&name) {
            Some(student) => writeln!(self.output, "{}", student),
            None => writeln!(self.output, "Student with name '{}' not found.", name),
        }
    }

    fn set_threshold(&mut self) -> io::Result<()> {
        let Some(line) = self.prompt("Enter new threshold percentage for the class: ")? else {
            return Ok(());
        };
        let value = match line.trim().parse::<f64>() {
            Ok(value) => value,
            Err(_) => {
                return self.diagnostic(format!(
                    "Invalid threshold {:?}. Please enter a number.",
                    line.trim()
                ))
            }
        };
        if let Err(e) = self.roster.set_threshold(value) {
            self.diagnostic(e)?;
        }
        let threshold = self.roster.threshold();
        writeln!(
            self.output,
            "Threshold updated for the entire class: {}",
            threshold
        )
    }

    /// Returns whether the roster reached disk
    fn save(&mut self) -> io::Result<bool> {
        match storage::save(&self.roster, &self.path) {
            Ok(()) => {
                writeln!(self.output, "Data saved successfully.")?;
                Ok(true)
            }
            Err(e) => {
                self.diagnostic(format!("Unable to save data: {}", e))?;
                Ok(false)
            }
        }
    }
}
