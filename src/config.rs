//! User configuration loaded from a TOML file.
//!
//! Every key is optional. A missing file means defaults.

use crate::calculator::AngleMode;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default number of history entries kept by a session.
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Angle mode a new session starts in.
    pub angle_mode: AngleMode,
    /// Maximum number of history entries, newest kept.
    pub history_limit: usize,
    /// Copy every successful result to the clipboard.
    pub copy_results: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            angle_mode: AngleMode::Degrees,
            history_limit: DEFAULT_HISTORY_LIMIT,
            copy_results: false,
        }
    }
}

impl Config {
    /// `<config_dir>/zcalc/config.toml`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("zcalc").join("config.toml"))
    }

    /// Load from the default location, falling back to defaults when there is
    /// no file.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => {
                tracing::debug!("no config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load from an explicit path. The file must exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&contents)?;
        tracing::debug!(path = %path.display(), ?config, "loaded config");
        Ok(config)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }
}
