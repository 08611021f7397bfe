//! Runtime configuration for the anime library binary.
//!
//! # Responsibility
//! - Provide working-directory defaults for the store and log locations.
//! - Overlay an optional `animelib.json` file on top of those defaults.
//!
//! # Invariants
//! - Relative paths are resolved against the working directory.
//! - A missing config file is not an error.

use crate::logging::default_log_level;
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// File name of the optional config overlay.
pub const CONFIG_FILE_NAME: &str = "animelib.json";
/// Default store file name, relative to the working directory.
pub const DEFAULT_DB_FILE_NAME: &str = "anime_library.db";
const DEFAULT_LOG_DIR_NAME: &str = "logs";

#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: std::io::Error },
    Parse { path: PathBuf, source: serde_json::Error },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(f, "invalid config `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
        }
    }
}

/// Resolved configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub log_level: String,
    pub log_dir: PathBuf,
}

/// On-disk shape of `animelib.json`; every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    db_path: Option<PathBuf>,
    log_level: Option<String>,
    log_dir: Option<PathBuf>,
}

impl AppConfig {
    /// Defaults rooted at `dir`.
    pub fn for_working_dir(dir: &Path) -> Self {
        Self {
            db_path: dir.join(DEFAULT_DB_FILE_NAME),
            log_level: default_log_level().to_string(),
            log_dir: dir.join(DEFAULT_LOG_DIR_NAME),
        }
    }

    /// Loads defaults for `dir` and applies `dir/animelib.json` if present.
    pub fn load(dir: &Path) -> Result<Self, ConfigError> {
        let path = dir.join(CONFIG_FILE_NAME);
        let mut config = Self::for_working_dir(dir);

        let raw = match std::fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(config),
            Err(source) => return Err(ConfigError::Io { path, source }),
        };
        let file: ConfigFile =
            serde_json::from_str(&raw).map_err(|source| ConfigError::Parse { path, source })?;

        if let Some(db_path) = file.db_path {
            config.db_path = dir.join(db_path);
        }
        if let Some(log_level) = file.log_level {
            config.log_level = log_level;
        }
        if let Some(log_dir) = file.log_dir {
            config.log_dir = dir.join(log_dir);
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::{AppConfig, ConfigError, CONFIG_FILE_NAME, DEFAULT_DB_FILE_NAME};

    #[test]
    fn missing_file_yields_working_dir_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load(dir.path()).unwrap();

        assert_eq!(config.db_path, dir.path().join(DEFAULT_DB_FILE_NAME));
        assert_eq!(config.log_dir, dir.path().join("logs"));
        assert!(!config.log_level.is_empty());
    }

    #[test]
    fn file_overrides_are_resolved_against_working_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            r#"{ "db_path": "data/catalog.db", "log_level": "warn" }"#,
        )
        .unwrap();

        let config = AppConfig::load(dir.path()).unwrap();
        assert_eq!(config.db_path, dir.path().join("data/catalog.db"));
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir, dir.path().join("logs"));
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "{ not json").unwrap();

        let err = AppConfig::load(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), r#"{ "db": "x.db" }"#).unwrap();

        assert!(AppConfig::load(dir.path()).is_err());
    }
}
