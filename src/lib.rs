//! Rollbook - student roster with attendance tracking
//!
//! This library provides the roster model (students, attendance counters,
//! pass threshold), the roster file format, report rendering and the
//! interactive menu session used by the `rollbook` binary.

pub mod cli;
pub mod config;
pub mod menu;
pub mod report;
pub mod roster;
pub mod storage;
pub mod student;
pub mod threshold;

pub use roster::{Roster, RosterError};
pub use student::{MarkOutcome, Role, Student, TOTAL_CLASSES};
pub use threshold::Threshold;
