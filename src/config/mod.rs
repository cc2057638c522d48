//! TOML-based engine settings.
//!
//! Example configuration:
//! ```toml
//! # heron.toml
//! default_maximum_rows = 10000
//! auto_round_statistics = true
//! insert_blank_lookup_item = false
//! ```
//!
//! All fields have defaults, so an empty file (or no file at all) yields a
//! working configuration.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Engine-wide defaults applied where definitions leave a knob unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Row cap applied to queries that declare none of their own.
    pub default_maximum_rows: Option<usize>,

    /// Round statistic values to two decimal places by default.
    pub auto_round_statistics: bool,

    /// Prepend a blank entry to parameter lookup lists by default.
    pub insert_blank_lookup_item: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            default_maximum_rows: None,
            auto_round_statistics: true,
            insert_blank_lookup_item: false,
        }
    }
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SettingsError::FileNotFound(path.to_path_buf()));
        }
        let contents = fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }
}
