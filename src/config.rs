//! Extraction configuration (`mpmeta.toml`).
//!
//! Every field has a default so an empty or missing file is valid. The config
//! is read once at startup and handed to [`crate::extractors::ExtractorManager`]
//! and the batch coordinator; nothing reads it from global state.

use crate::error::{MetaError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const CONFIG_FILE_NAME: &str = "mpmeta.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetaConfig {
    /// Worker threads for batch extraction (`None` = one per CPU)
    pub threads: Option<usize>,

    /// Recognise wrapped registrations such as `Page(wrap({...}))` and `myPage({...})`
    pub guess_wrappers: bool,

    /// Method name used by components to emit events (`this.triggerEvent(...)`)
    pub event_trigger: String,

    /// Maximum nesting followed when building the `data` tree
    pub max_data_depth: usize,

    /// Directory that absolute stylesheet imports (`@import "/a.css"`) resolve against
    pub style_root: Option<PathBuf>,

    /// Extract from stylesheets with syntax errors instead of rejecting them.
    /// The document then comes from tree-sitter's recovered tree and can be
    /// partial: rules swallowed by an ERROR node contribute no classes.
    pub tolerate_style_errors: bool,
}

impl Default for MetaConfig {
    fn default() -> Self {
        Self {
            threads: None,
            guess_wrappers: true,
            event_trigger: "triggerEvent".to_string(),
            max_data_depth: 64,
            style_root: None,
            tolerate_style_errors: true,
        }
    }
}

impl MetaConfig {
    /// Load configuration from a TOML file, falling back to defaults when it is absent
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            warn!("Configuration file {} not found, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| MetaError::Config(format!("Failed to read {}: {}", path.display(), e)))?;

        let config = Self::from_toml(&content)?;
        debug!("Loaded configuration from: {}", path.display());
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: MetaConfig = toml::from_str(content)
            .map_err(|e| MetaError::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Number of workers a batch should use
    pub fn worker_count(&self) -> usize {
        self.threads.filter(|n| *n > 0).unwrap_or_else(num_cpus::get)
    }

    fn validate(&self) -> Result<()> {
        if self.event_trigger.trim().is_empty() {
            return Err(MetaError::Config("event_trigger must not be empty".to_string()));
        }
        if self.max_data_depth == 0 {
            return Err(MetaError::Config("max_data_depth must be at least 1".to_string()));
        }
        Ok(())
    }
}
