// crates/core/src/settings.rs
//! Application settings.
//!
//! Read from `settings.json` in the app config dir, then overridden by
//! `JOBTRACK_*` environment variables. Every field has a default, so a
//! missing or partial file is fine.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::paths;

/// Default Jooble API root. The API key is appended as the final path segment.
pub const DEFAULT_API_ENDPOINT: &str = "https://jooble.org/api/";

pub const ENV_API_KEY: &str = "JOBTRACK_API_KEY";
pub const ENV_API_URL: &str = "JOBTRACK_API_URL";
pub const ENV_LOCATION: &str = "JOBTRACK_LOCATION";
pub const ENV_DATA_FILE: &str = "JOBTRACK_DATA_FILE";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub api_endpoint: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Optional location sent with every online search.
    pub location: String,
    /// Record file; falls back to [`paths::records_path`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,
    /// Where these settings were loaded from. Not persisted.
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_endpoint: DEFAULT_API_ENDPOINT.to_string(),
            api_key: None,
            location: String::new(),
            data_file: None,
            source: None,
        }
    }
}

impl Settings {
    /// Load from the default settings path plus environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let path = paths::settings_path().ok_or(ConfigError::ConfigDirNotFound)?;
        Self::load_from(&path)
    }

    /// Load from `path` (missing file means defaults) plus environment overrides.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let mut settings = match std::fs::read_to_string(path) {
            Ok(raw) => serde_json::from_str::<Settings>(&raw).map_err(|e| {
                ConfigError::MalformedJson {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                }
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "settings file not found, using defaults");
                Settings::default()
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        settings.source = Some(path.to_path_buf());
        settings.apply_env();
        Ok(settings)
    }

    fn apply_env(&mut self) {
        if let Some(key) = env_value(ENV_API_KEY) {
            self.api_key = Some(key);
        }
        if let Some(url) = env_value(ENV_API_URL) {
            self.api_endpoint = url;
        }
        if let Some(location) = env_value(ENV_LOCATION) {
            self.location = location;
        }
        if let Some(file) = env_value(ENV_DATA_FILE) {
            self.data_file = Some(PathBuf::from(file));
        }
    }

    /// The API key, required only when an online search is requested.
    pub fn api_key(&self) -> Result<&str, ConfigError> {
        self.api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingApiKey {
                path: self.source.clone().unwrap_or_default(),
            })
    }

    pub fn records_path(&self) -> Option<PathBuf> {
        self.data_file.clone().or_else(paths::records_path)
    }
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
