//! Configuration loading for Synthyx.
//! Reads synthyx.toml from the current directory or the path in SYNTHYX_CONFIG.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{Result, SynthyxError};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub artifacts: ArtifactConfig,
}

/// Where versioned model/table artifacts are fetched from and cached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Local cache directory. When absent, the platform cache dir under
    /// "synthyx/oracle" is used.
    #[serde(default)]
    pub cache_dir: Option<PathBuf>,
}

fn default_base_url() -> String {
    "https://artifacts.synthyx.dev/oracle".to_string()
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            cache_dir: None,
        }
    }
}

impl Config {
    /// Load configuration from synthyx.toml (or SYNTHYX_CONFIG), falling
    /// back to defaults when no file exists.
    pub fn load() -> Result<Self> {
        let path = std::env::var("SYNTHYX_CONFIG").unwrap_or_else(|_| "synthyx.toml".to_string());
        Self::from_path(path)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            debug!("Loading configuration from {}", path.display());
            let raw = std::fs::read_to_string(path)?;
            toml::from_str(&raw)
                .map_err(|e| SynthyxError::Configuration(format!("{}: {}", path.display(), e)))?
        } else {
            Self::default()
        };
        config.apply_env_overrides();
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("SYNTHYX_ARTIFACT_URL") {
            self.artifacts.base_url = url;
        }
        if let Ok(dir) = std::env::var("SYNTHYX_CACHE_DIR") {
            self.artifacts.cache_dir = Some(PathBuf::from(dir));
        }
    }
}
