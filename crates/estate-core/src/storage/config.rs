//! Configuration management
//!
//! Priority: CLI argument > environment variable > config.toml > default.

use super::Result;
use crate::error::StorageError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const API_URL_ENV: &str = "ESTATE_API_URL";
pub const USER_EMAIL_ENV: &str = "ESTATE_USER_EMAIL";

pub const DEFAULT_API_URL: &str = "http://localhost:5000";
pub const DEFAULT_USER_EMAIL: &str = "user@example.com";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
pub const DEFAULT_MAX_RETRIES: u32 = 2;

const CONFIG_FILE_NAME: &str = "config.toml";

/// Application configuration
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Config {
    /// Listings API base URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
    /// Identity used for favorites
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<u64>,
    /// Attempts for idempotent requests, first try included
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_retries: Option<u32>,
}

impl Config {
    /// Load configuration from file; a missing file yields the defaults.
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p,
            None => Self::config_file_path()?,
        };

        if !config_path.exists() {
            log::debug!("No config file at {}", config_path.display());
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&config_path).map_err(|source| StorageError::FileIo {
            path: config_path.to_string_lossy().to_string(),
            source,
        })?;

        toml::from_str(&content).map_err(|e| StorageError::ConfigParseError {
            message: format!("Failed to parse config file: {}", e),
        })
    }

    /// Save configuration to file
    pub fn save(&self, path: Option<PathBuf>) -> Result<()> {
        let config_path = match path {
            Some(p) => p,
            None => Self::config_file_path()?,
        };

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(|source| StorageError::FileIo {
                path: parent.to_string_lossy().to_string(),
                source,
            })?;
        }

        let toml_content = toml::to_string(self).map_err(|e| StorageError::ConfigParseError {
            message: format!("Failed to serialize config: {}", e),
        })?;

        fs::write(&config_path, toml_content).map_err(|source| StorageError::FileIo {
            path: config_path.to_string_lossy().to_string(),
            source,
        })
    }

    /// `~/.config/estate/config.toml`
    pub fn config_file_path() -> Result<PathBuf> {
        let home_dir = dirs::home_dir().ok_or(StorageError::ConfigDirNotFound)?;
        Ok(Self::file_in(&home_dir.join(".config").join("estate")))
    }

    /// Config file inside an explicit directory (`--config-dir`).
    pub fn file_in(dir: &Path) -> PathBuf {
        dir.join(CONFIG_FILE_NAME)
    }

    pub fn get_api_url(&self) -> String {
        resolve(env_value(API_URL_ENV), &self.api_url, DEFAULT_API_URL)
    }

    pub fn get_user_email(&self) -> String {
        resolve(env_value(USER_EMAIL_ENV), &self.user_email, DEFAULT_USER_EMAIL)
    }

    pub fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
            .filter(|t| *t > 0)
            .unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_MAX_RETRIES)
    }

    pub fn set_api_url(&mut self, url: String) {
        self.api_url = Some(url);
    }

    pub fn set_user_email(&mut self, email: String) {
        self.user_email = Some(email);
    }
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.trim().is_empty())
}

fn resolve(env: Option<String>, file: &Option<String>, default: &str) -> String {
    env.or_else(|| file.clone().filter(|s| !s.trim().is_empty()))
        .unwrap_or_else(|| default.to_string())
}
