//! User configuration
//!
//! Defaults for the command-line tool can be set in
//! `<config dir>/docx-blocks/config.toml`:
//!
//! ```toml
//! preserve_breaks = true
//! verbose = false
//! pretty = true
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::document::ParseOptions;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub preserve_breaks: bool,
    pub verbose: bool,
    /// Indented JSON output
    pub pretty: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            preserve_breaks: false,
            verbose: false,
            pretty: true,
        }
    }
}

impl Config {
    /// Default location of the config file, if the platform has a config dir
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("docx-blocks").join("config.toml"))
    }

    /// Load configuration.
    ///
    /// An explicit path must exist. Without one the default location is
    /// tried and a missing file yields the defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => match Self::default_path() {
                Some(path) if path.is_file() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml(&contents)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            verbose: self.verbose,
            preserve_breaks: self.preserve_breaks,
        }
    }
}
