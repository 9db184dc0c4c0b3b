//! Process configuration for catalog front-ends.
//!
//! # Responsibility
//! - Resolve database location and logging settings from the environment.
//!
//! # Invariants
//! - A blank database path is rejected before any connection is opened.
//! - Unset variables fall back to defaults; set-but-blank ones are errors.

use crate::logging::default_log_level;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "LIBRARY_DB_PATH";
pub const LOG_LEVEL_ENV: &str = "LIBRARY_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "LIBRARY_LOG_DIR";
pub const DEFAULT_DB_FILE_NAME: &str = "library.sqlite3";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Setting was provided but contains only whitespace.
    BlankValue(&'static str),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankValue(name) => write!(f, "configuration value `{name}` must not be blank"),
        }
    }
}

impl Error for ConfigError {}

/// Resolved process configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub log_level: String,
    /// `None` logs to stderr.
    pub log_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_FILE_NAME),
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl AppConfig {
    /// Reads configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads configuration through `lookup`, which returns the raw value of
    /// one variable name.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let db_path = match non_blank(DB_PATH_ENV, lookup(DB_PATH_ENV))? {
            Some(path) => PathBuf::from(path),
            None => defaults.db_path,
        };
        let log_level = non_blank(LOG_LEVEL_ENV, lookup(LOG_LEVEL_ENV))?
            .unwrap_or(defaults.log_level);
        let log_dir = non_blank(LOG_DIR_ENV, lookup(LOG_DIR_ENV))?.map(PathBuf::from);

        Ok(Self {
            db_path,
            log_level,
            log_dir,
        })
    }

    /// Replaces the database path, rejecting blank values.
    pub fn with_db_path(mut self, path: &str) -> Result<Self, ConfigError> {
        let path = non_blank(DB_PATH_ENV, Some(path.to_string()))?
            .ok_or(ConfigError::BlankValue(DB_PATH_ENV))?;
        self.db_path = PathBuf::from(path);
        Ok(self)
    }
}

fn non_blank(name: &'static str, value: Option<String>) -> Result<Option<String>, ConfigError> {
    match value {
        None => Ok(None),
        Some(raw) => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                Err(ConfigError::BlankValue(name))
            } else {
                Ok(Some(trimmed.to_string()))
            }
        }
    }
}
