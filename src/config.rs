//! `rollbook.toml` configuration
//!
//! # Example rollbook.toml
//!
//! ```toml
//! # Roster file used when none is given on the command line
//! default_file = "class-a.csv"
//!
//! # Attendance percentage required to pass
//! threshold = 80.0
//!
//! # Refuse to start if the roster file has malformed lines
//! strict_load = true
//! ```

use crate::threshold::Threshold;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Config file looked up in the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "rollbook.toml";

/// Root configuration for rollbook.toml
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Roster file path
    pub default_file: Option<PathBuf>,

    /// Initial pass threshold
    pub threshold: Option<Threshold>,

    /// Reject the roster file on any malformed line
    #[serde(default)]
    pub strict_load: bool,
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Example
    ///
    /// ```no_run
    /// use rollbook::config::Config;
    ///
    /// # fn main() -> anyhow::Result<()> {
    /// let config = Config::from_file("rollbook.toml")?;
    /// println!("strict: {}", config.strict_load);
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        Self::from_toml_str(&content).with_context(|| format!("Invalid config {}", path.display()))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML")
    }

    /// Explicit path must exist; the implicit default file is optional
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => Self::from_file(DEFAULT_CONFIG_FILE),
            None => Ok(Self::default()),
        }
    }
}
