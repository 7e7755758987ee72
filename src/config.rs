//! TOML configuration.
//!
//! All keys are optional; a missing config file means defaults. Example:
//!
//! ```toml
//! [store]
//! path = "~/.local/share/credkeep/users.json"
//!
//! [logging]
//! level = "info"
//! format = "plain"
//! ```

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Backing file for the credential store. `~` is expanded.
    #[serde(default = "default_store_path")]
    pub path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// `plain` or `json`.
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_store_path() -> String {
    directories::ProjectDirs::from("", "", "credkeep")
        .map(|dirs| dirs.data_dir().join("users.json").to_string_lossy().into_owned())
        .unwrap_or_else(|| "users.json".to_string())
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "plain".to_string()
}

impl Config {
    /// Load configuration.
    ///
    /// An explicitly given path must exist and parse. With no explicit path,
    /// the platform config dir is consulted and a missing file yields
    /// defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(p) => p.to_path_buf(),
            None => match default_config_path() {
                Some(p) if p.exists() => p,
                _ => return Ok(Self::default()),
            },
        };

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("failed to parse config file: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.store.path.trim().is_empty() {
            bail!("store.path must not be empty");
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            bail!(
                "invalid log level '{}' (expected one of: trace, debug, info, warn, error)",
                self.logging.level
            );
        }

        let valid_formats = ["plain", "json"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            bail!(
                "invalid log format '{}' (expected 'plain' or 'json')",
                self.logging.format
            );
        }

        Ok(())
    }

    /// Resolved store path with `~` expanded.
    pub fn store_path(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.store.path).into_owned())
    }
}

/// Platform config file location, e.g. `~/.config/credkeep/config.toml`.
fn default_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "credkeep")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_gives_defaults() {
        let config: Config = toml::from_str("").unwrap();
        config.validate().unwrap();
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, "plain");
        assert!(config.store.path.ends_with("users.json"));
    }

    #[test]
    fn store_path_override_is_used() {
        let config: Config = toml::from_str("[store]\npath = \"/tmp/creds.json\"\n").unwrap();
        assert_eq!(config.store_path(), PathBuf::from("/tmp/creds.json"));
    }

    #[test]
    fn tilde_is_expanded() {
        let config: Config = toml::from_str("[store]\npath = \"~/creds.json\"\n").unwrap();
        let resolved = config.store_path();
        assert!(!resolved.to_string_lossy().starts_with('~'));
        assert!(resolved.to_string_lossy().ends_with("creds.json"));
    }

    #[test]
    fn invalid_log_level_is_rejected() {
        let config: Config = toml::from_str("[logging]\nlevel = \"verbose\"\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn invalid_log_format_is_rejected() {
        let config: Config = toml::from_str("[logging]\nformat = \"xml\"\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn empty_store_path_is_rejected() {
        let config: Config = toml::from_str("[store]\npath = \"\"\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_explicit_config_file_is_an_error() {
        let result = Config::load(Some(Path::new("/nonexistent/credkeep.toml")));
        assert!(result.is_err());
    }
}
