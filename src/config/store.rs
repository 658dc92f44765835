//! Backing store document

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::errors::{ConfigError, ConfigResult};

/// The persisted configuration document.
///
/// Missing fields take their defaults, so a partial document (or an empty
/// `{}`) is valid. The engine writes back only `whitelist` and
/// `whitelist_enabled`; the three policy flags are host configuration and
/// pass through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredConfig {
    /// Whitelist entries in canonical textual form
    #[serde(default = "default_whitelist")]
    pub whitelist: Vec<String>,

    /// Whether the whitelist gate is enabled
    #[serde(default = "default_true")]
    pub whitelist_enabled: bool,

    /// Should the whitelist apply to creative players?
    #[serde(default)]
    pub apply_in_creative: bool,

    /// Does the whitelist also prevent interacting with blocks?
    #[serde(default = "default_true")]
    pub prevent_interact: bool,

    /// Should fake players bypass protection checks?
    #[serde(default = "default_true")]
    pub allow_fake_players: bool,
}

fn default_whitelist() -> Vec<String> {
    vec!["computercraft:*".to_string()]
}

fn default_true() -> bool {
    true
}

impl Default for StoredConfig {
    fn default() -> Self {
        Self {
            whitelist: default_whitelist(),
            whitelist_enabled: true,
            apply_in_creative: false,
            prevent_interact: true,
            allow_fake_players: true,
        }
    }
}

impl StoredConfig {
    /// Load the document from `path`.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load the document, creating it with defaults when absent.
    pub fn load_or_init(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            let config = Self::default();
            config.save(path)?;
            return Ok(config);
        }
        Self::load(path)
    }

    /// Write the document to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        let write_err = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(write_err)?;
            }
        }

        let content = serde_json::to_string_pretty(self).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        fs::write(path, content).map_err(write_err)
    }
}
