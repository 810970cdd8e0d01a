//! Configuration for the catalog API connection.
//!
//! Stored as YAML in the user config directory. Environment variables
//! `SYLLABUS_API_URL` and `SYLLABUS_API_TOKEN` take precedence over the
//! file; `SYLLABUS_CONFIG_DIR` relocates the file itself (used by tests).

use std::env;
use std::fs;
use std::path::PathBuf;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SyllabusError};

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Bearer token for authenticated catalogs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: None,
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Config {
    /// Get the path to the config file
    pub fn config_path() -> Result<PathBuf> {
        if let Ok(dir) = env::var("SYLLABUS_CONFIG_DIR")
            && !dir.is_empty()
        {
            return Ok(PathBuf::from(dir).join("config.yaml"));
        }

        ProjectDirs::from("", "", "syllabus")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
            .ok_or_else(|| SyllabusError::Config("cannot determine config directory".to_string()))
    }

    /// Load configuration from file, or return default if not found
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&path)?;
        let config: Config = serde_yaml_ng::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_yaml_ng::to_string(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    /// Base URL of the catalog API, environment first.
    pub fn base_url(&self) -> String {
        if let Ok(url) = env::var("SYLLABUS_API_URL")
            && !url.is_empty()
        {
            return url;
        }
        self.api.base_url.clone()
    }

    /// API token from environment or config file.
    pub fn api_token(&self) -> Option<String> {
        if let Ok(token) = env::var("SYLLABUS_API_TOKEN")
            && !token.is_empty()
        {
            return Some(token);
        }
        self.api.token.clone()
    }

    /// Set a configuration value by dotted key.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "api.base_url" => self.api.base_url = value.to_string(),
            "api.token" => {
                self.api.token = if value.is_empty() {
                    None
                } else {
                    Some(value.to_string())
                }
            }
            _ => {
                return Err(SyllabusError::Config(format!(
                    "unknown config key '{key}', expected 'api.base_url' or 'api.token'"
                )));
            }
        }
        Ok(())
    }
}
