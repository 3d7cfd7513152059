//! CLI defaults file loading
//!
//! Operators who run the same debugging queries repeatedly can keep their
//! filter defaults in a small TOML file and pass `--config`. Explicit
//! command-line flags always win over file values.

use crate::render::OutputFormat;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Defaults loaded from a config.toml file
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CliConfig {
    #[serde(default)]
    pub filters: FilterDefaults,
    #[serde(default)]
    pub output: OutputDefaults,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FilterDefaults {
    pub resource_id: Option<String>,
    pub resource_key: Option<String>,
    #[serde(default)]
    pub step_names: Vec<String>,
    #[serde(default)]
    pub detail: bool,
    pub max_events: Option<i64>,
    pub since: Option<String>,
    pub until: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OutputDefaults {
    pub format: Option<OutputFormat>,
    pub file: Option<PathBuf>,
}

/// Load CLI defaults from a TOML file
pub fn load_config(path: &Path) -> Result<CliConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: CliConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    Ok(config)
}
