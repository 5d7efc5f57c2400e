//! Engine configuration.
//!
//! Settings come from an optional `dungeon.toml` in the data directory.
//! Command-line flags override whatever the file says.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::data_paths::data_path;
use crate::store::WORKING_COPY;

/// Name of the configuration file looked up in the data directory.
pub const CONFIG_FILE: &str = "dungeon.toml";
/// Map played when nothing else is configured.
pub const DEFAULT_MAP: &str = "orig_map.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Source map document. Never modified by the engine.
    pub map_path: PathBuf,
    /// Where the mutable working copy is kept, relative to the working directory.
    pub working_copy: PathBuf,
    /// Fixed wrap width for terminal output; the terminal width is used if unset.
    pub wrap_width: Option<usize>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            map_path: data_path(DEFAULT_MAP),
            working_copy: PathBuf::from(WORKING_COPY),
            wrap_width: None,
        }
    }
}

/// Loads configuration from a TOML file, falling back to defaults on error.
///
/// A missing file is normal and only logged at `info`; a file that exists
/// but cannot be parsed is logged at `warn`.
pub fn load_config(toml_path: &Path) -> EngineConfig {
    if !toml_path.exists() {
        info!("no config at '{}', using defaults", toml_path.display());
        return EngineConfig::default();
    }
    match try_load_config(toml_path) {
        Ok(config) => {
            info!("engine config loaded from '{}'", toml_path.display());
            config
        },
        Err(e) => {
            warn!(
                "Could not load engine config from '{}': {e:#}. Using defaults.",
                toml_path.display()
            );
            EngineConfig::default()
        },
    }
}

/// Attempts to load configuration from a TOML file.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
fn try_load_config(toml_path: &Path) -> Result<EngineConfig> {
    let text = fs::read_to_string(toml_path)
        .with_context(|| format!("reading engine config from '{}'", toml_path.display()))?;
    toml::from_str(&text).with_context(|| format!("parsing engine config from '{}'", toml_path.display()))
}
