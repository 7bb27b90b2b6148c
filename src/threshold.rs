//! Pass/fail threshold shared by every student in a session

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Threshold used when none is configured or an invalid one is rejected
pub const DEFAULT_THRESHOLD: f64 = 75.0;

/// Rejected threshold input
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ThresholdError {
    #[error("Invalid threshold percentage {0}. Using default (75%)")]
    OutOfRange(f64),
}

/// Attendance percentage in `[0, 100]` required to pass
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Threshold(f64);

impl Threshold {
    /// Validate a percentage
    pub fn new(value: f64) -> Result<Self, ThresholdError> {
        if value.is_finite() && (0.0..=100.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ThresholdError::OutOfRange(value))
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Self(DEFAULT_THRESHOLD)
    }
}

impl TryFrom<f64> for Threshold {
    type Error = ThresholdError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Threshold> for f64 {
    fn from(t: Threshold) -> Self {
        t.0
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}
