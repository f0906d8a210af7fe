// ⚙️ Configuration - TOML file + environment overrides
//
// Precedence (lowest → highest): defaults, TOML file, environment, CLI flags.
// CLI flags are applied by the binary after `Config::load`.

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::metadata::LevelFilter;

pub const DEFAULT_CONFIG_FILE: &str = "weight-book.toml";
pub const DEFAULT_DB_FILE: &str = "weight-book.db";

pub const ENV_DB_PATH: &str = "WEIGHT_BOOK_DB";
pub const ENV_LOG_LEVEL: &str = "WEIGHT_BOOK_LOG_LEVEL";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// SQLite database holding the address book and event log
    pub db_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            db_path: PathBuf::from(DEFAULT_DB_FILE),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level, e.g. "warn" or "debug"
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: "warn".to_string(),
        }
    }
}

impl LoggingConfig {
    pub fn level_filter(&self) -> Result<LevelFilter> {
        self.level.trim().parse::<LevelFilter>().map_err(|_| {
            anyhow!(
                "Invalid logging.level '{}' (expected off, error, warn, info, debug or trace)",
                self.level
            )
        })
    }
}

impl Config {
    /// Load configuration.
    ///
    /// An explicit `path` must exist; otherwise `weight-book.toml` in the
    /// working directory is used when present and defaults when not.
    pub fn load(path: Option<&Path>) -> Result<Config> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::from_file(default_path)?
                } else {
                    Config::default()
                }
            }
        };

        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.logging.level_filter()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Config> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::from_toml(&contents).with_context(|| format!("Failed to parse config {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Config> {
        let config: Config = toml::from_str(contents)?;
        config.logging.level_filter()?;
        Ok(config)
    }

    /// Apply environment overrides; `lookup` is `std::env::var` outside tests.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(ENV_DB_PATH) {
            let trimmed = raw.trim();
            if !trimmed.is_empty() {
                self.storage.db_path = PathBuf::from(trimmed);
            }
        }

        if let Some(raw) = lookup(ENV_LOG_LEVEL) {
            let trimmed = raw.trim();
            if !trimmed.is_empty() {
                self.logging.level = trimmed.to_string();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.storage.db_path, PathBuf::from(DEFAULT_DB_FILE));
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml("[storage]\ndb_path = \"/tmp/people.db\"\n").unwrap();

        assert_eq!(config.storage.db_path, PathBuf::from("/tmp/people.db"));
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn test_mistyped_toml_is_error() {
        assert!(Config::from_toml("[storage]\ndb_path = 5\n").is_err());
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [(ENV_DB_PATH, " other.db "), (ENV_LOG_LEVEL, "")]
            .into_iter()
            .collect();
        let mut config = Config::default();

        config.apply_env_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.storage.db_path, PathBuf::from("other.db"));
        // Blank values are ignored
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_unknown_log_level_is_error() {
        let err = Config::from_toml("[logging]\nlevel = \"loud\"\n").unwrap_err();
        assert!(err.to_string().contains("logging.level"), "{}", err);

        let mut config = Config::default();
        config.apply_env_overrides(|key| (key == ENV_LOG_LEVEL).then(|| "chatty".to_string()));
        assert!(config.logging.level_filter().is_err());

        config.logging.level = " Debug ".to_string();
        assert_eq!(config.logging.level_filter().unwrap(), LevelFilter::DEBUG);
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("weight-book.toml");
        fs::write(&path, "[logging]\nlevel = \"debug\"\n").unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.logging.level, "debug");

        assert!(Config::from_file(&dir.path().join("missing.toml")).is_err());
    }
}
