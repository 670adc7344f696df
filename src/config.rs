//! Rendering environment configuration.
//!
//! # JSON Format
//!
//! ```json
//! {
//!   "displayScale": 2.0,
//!   "cacheBudget": 8388608,
//!   "resourceRoot": "assets/icons"
//! }
//! ```
//!
//! Every field is optional and falls back to its default.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::cache::DEFAULT_CACHE_BUDGET;
use crate::error::ConfigError;

/// Settings shared by every icon drawn through one [`IconContext`](crate::IconContext).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RenderConfig {
    /// Device pixels per point.
    pub display_scale: f32,

    /// Mask cache budget in bytes.
    pub cache_budget: usize,

    /// Directory that named resources are resolved against.
    pub resource_root: PathBuf,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            display_scale: 1.0,
            cache_budget: DEFAULT_CACHE_BUDGET,
            resource_root: PathBuf::from("."),
        }
    }
}

impl RenderConfig {
    /// Serializes the config to a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serializes the config to a pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserializes a config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Reads a config from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_json(&text)?)
    }

    /// The display scale, with non-positive values treated as 1.0.
    pub fn effective_scale(&self) -> f32 {
        if self.display_scale > 0.0 {
            self.display_scale
        } else {
            1.0
        }
    }
}
