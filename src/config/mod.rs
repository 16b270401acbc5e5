//
//  titan-cli
//  config/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration Module
//!
//! This module loads and saves the Titan CLI configuration file and resolves
//! the connection settings for one invocation.
//!
//! ## Configuration File Location
//!
//! The file lives at `~/.titan/config` on every platform.
//!
//! ## Example Configuration File
//!
//! ```toml
//! [default]
//! token = "0123456789abcdef"
//! uri = "https://api.example.com"
//! ```
//!
//! ## Resolution Order
//!
//! For both the token and the URI, the first value found wins:
//!
//! 1. `--token` / `--uri` flags, or `TITAN_API_TOKEN` / `TITAN_URI`
//! 2. The `[default]` section of the file
//! 3. [`DEFAULT_BASE_URI`] (URI only)
//!
//! A missing token is a precondition error: nothing can be sent without it.

mod file;

pub use file::*;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::client::{ClientConfig, DEFAULT_BASE_URI};
use crate::api::common::ApiError;

/// Environment variable holding the API token.
pub const ENV_TOKEN: &str = "TITAN_API_TOKEN";

/// Environment variable holding the API base URI.
pub const ENV_URI: &str = "TITAN_URI";

/// Environment variable holding the log filter.
pub const ENV_DEBUG: &str = "TITAN_DEBUG";

/// Contents of `~/.titan/config`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub default: Profile,
}

/// The `[default]` section.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Profile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
}

impl Config {
    /// Loads the configuration from `~/.titan/config`.
    ///
    /// A missing file yields the default (empty) configuration.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Loads the configuration from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !config_exists(path) {
            debug!(path = %path.display(), "no config file");
            return Ok(Self::default());
        }
        let content = read_config_file(path)?;
        toml::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Saves the configuration to `~/.titan/config`, creating `~/.titan/`.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        write_config_file(path, &content)
    }

    pub fn config_path() -> Result<PathBuf> {
        let dirs = BaseDirs::new()
            .ok_or_else(|| anyhow::anyhow!("Could not determine home directory"))?;
        Ok(dirs.home_dir().join(".titan").join("config"))
    }

    /// Resolves the connection settings for this invocation.
    ///
    /// `token` and `uri` are the flag values, which clap already fills from
    /// the environment. Blank values count as absent.
    ///
    /// # Errors
    ///
    /// Returns a precondition error when no token is found anywhere.
    pub fn resolve(&self, token: Option<&str>, uri: Option<&str>) -> Result<ClientConfig, ApiError> {
        let token = pick(token, self.default.token.as_deref()).ok_or_else(|| {
            ApiError::precondition(format!(
                "no API token configured, run `titan setup` or set {}",
                ENV_TOKEN
            ))
        })?;
        let uri = self.resolve_uri(uri);
        Ok(ClientConfig::new(uri, token))
    }

    /// Resolves only the base URI, used where no token is needed.
    pub fn resolve_uri(&self, uri: Option<&str>) -> String {
        pick(uri, self.default.uri.as_deref())
            .unwrap_or(DEFAULT_BASE_URI)
            .to_string()
    }
}

fn pick<'a>(flag: Option<&'a str>, file: Option<&'a str>) -> Option<&'a str> {
    flag.map(str::trim)
        .filter(|s| !s.is_empty())
        .or_else(|| file.map(str::trim).filter(|s| !s.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_file() -> Config {
        Config {
            default: Profile {
                token: Some("file-token".to_string()),
                uri: Some("https://file.example.com".to_string()),
            },
        }
    }

    #[test]
    fn test_flag_overrides_file() {
        let config = with_file()
            .resolve(Some("flag-token"), Some("https://flag.example.com/"))
            .unwrap();
        assert_eq!(config.token, "flag-token");
        assert_eq!(config.base_uri, "https://flag.example.com");
    }

    #[test]
    fn test_file_used_when_flag_blank() {
        let config = with_file().resolve(Some("  "), None).unwrap();
        assert_eq!(config.token, "file-token");
        assert_eq!(config.base_uri, "https://file.example.com");
    }

    #[test]
    fn test_default_uri() {
        let config = Config::default().resolve(Some("t"), None).unwrap();
        assert_eq!(config.base_uri, DEFAULT_BASE_URI);
    }

    #[test]
    fn test_missing_token_is_precondition() {
        let err = Config::default().resolve(None, None).unwrap_err();
        assert!(matches!(err, ApiError::Precondition(_)));
    }

    #[test]
    fn test_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".titan").join("config");

        with_file().save_to(&path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("[default]"));

        assert_eq!(Config::load_from(&path).unwrap(), with_file());
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_invalid_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config");
        std::fs::write(&path, "[default\ntoken=").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}
