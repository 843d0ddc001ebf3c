//! # App Configuration
//!
//! Optional `gangway.toml` settings for the binary. CLI flags always win
//! over file values; the file only supplies defaults.

use gangway_core::GangwayError;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default config file looked up next to the working directory.
const DEFAULT_CONFIG_PATH: &str = "gangway.toml";

/// Settings the binary accepts from `gangway.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Default seed file path, used when `--seed` is not given.
    #[serde(default)]
    pub seed: Option<PathBuf>,

    /// Default output mode, overridden by `--json-mode`.
    #[serde(default)]
    pub json_mode: Option<bool>,
}

impl AppConfig {
    /// Load configuration.
    ///
    /// An explicitly given path must exist and parse. The default path is
    /// optional — if `gangway.toml` is absent, built-in defaults apply.
    pub fn load(explicit: Option<&Path>) -> Result<Self, GangwayError> {
        let (path, required) = match explicit {
            Some(p) => (p.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_PATH), false),
        };

        if !path.exists() {
            if required {
                return Err(GangwayError::IoError(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(&path)
            .map_err(|e| GangwayError::IoError(format!("cannot read {}: {}", path.display(), e)))?;

        toml::from_str(&raw).map_err(|e| {
            GangwayError::SerializationError(format!("invalid config {}: {}", path.display(), e))
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================
