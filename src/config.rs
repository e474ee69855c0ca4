//! Application configuration.
//!
//! The configuration is a JSON file at
//! `$XDG_CONFIG_HOME/gridlens/config.json`.  It only supplies the values the
//! panel starts with; nothing is ever written back.
//!
//! # Example
//!
//! ```json
//! {
//!   "display": {
//!     "show_grid_areas": false,
//!     "show_grid_line_numbers": true,
//!     "show_infinite_lines": false
//!   },
//!   "outline": { "max_cells": 1000 },
//!   "socket_path": "/run/user/1000/gridlens.sock"
//! }
//! ```

use crate::outline::DEFAULT_MAX_CELLS;
use crate::settings::DisplaySettings;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration.
///
/// Every field is optional; a minimal `{}` file is valid and all sections
/// fall back to their compiled-in defaults.  Unknown keys are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Display settings in effect when the panel opens.
    #[serde(default)]
    pub display: DisplaySettings,

    #[serde(default)]
    pub outline: OutlineConfig,

    /// Command socket.  Defaults to `$XDG_RUNTIME_DIR/gridlens.sock`.
    #[serde(default)]
    pub socket_path: Option<PathBuf>,
}

/// Outline view settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutlineConfig {
    /// Grids with more cells than this are shown as too large to outline.
    pub max_cells: usize,
}

impl Default for OutlineConfig {
    fn default() -> Self {
        Self {
            max_cells: DEFAULT_MAX_CELLS,
        }
    }
}

impl Config {
    /// Load configuration from a JSON file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError(format!("failed to read {}: {}", path.display(), e)))?;
        let config: Self = serde_json::from_str(&contents)
            .map_err(|e| ConfigError(format!("failed to parse {}: {}", path.display(), e)))?;
        Ok(config)
    }
}

/// Error from loading or parsing a configuration file.
#[derive(Debug, thiserror::Error)]
#[error("config error: {0}")]
pub struct ConfigError(String);
