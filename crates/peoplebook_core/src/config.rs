//! Process configuration for the person store.
//!
//! # Responsibility
//! - Resolve the store location from the environment.
//!
//! # Invariants
//! - An empty or whitespace-only path is rejected, never silently defaulted.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// Environment variable carrying the store path.
pub const DB_PATH_ENV: &str = "PEOPLEBOOK_DB";

/// Resolved store configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbConfig {
    /// Filesystem path of the SQLite database.
    pub path: PathBuf,
}

/// Configuration resolution failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// `PEOPLEBOOK_DB` is not set in the environment.
    MissingEnv(&'static str),
    /// The configured path is empty or whitespace-only.
    EmptyPath(&'static str),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingEnv(var) => write!(f, "environment variable `{var}` is not set"),
            Self::EmptyPath(var) => {
                write!(f, "environment variable `{var}` must not be empty")
            }
        }
    }
}

impl Error for ConfigError {}

impl DbConfig {
    /// Builds a configuration from an explicit path.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Resolves the store path from `PEOPLEBOOK_DB`.
    ///
    /// # Errors
    /// - `MissingEnv` when the variable is unset or not valid UTF-8.
    /// - `EmptyPath` when the variable is set but blank.
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw = std::env::var(DB_PATH_ENV).map_err(|_| ConfigError::MissingEnv(DB_PATH_ENV))?;
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::EmptyPath(DB_PATH_ENV));
        }
        Ok(Self {
            path: PathBuf::from(trimmed),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, DbConfig};
    use std::path::PathBuf;

    #[test]
    fn from_path_keeps_value() {
        let config = DbConfig::from_path("/tmp/people.db");
        assert_eq!(config.path, PathBuf::from("/tmp/people.db"));
    }

    #[test]
    fn config_errors_render_variable_name() {
        let missing = ConfigError::MissingEnv("PEOPLEBOOK_DB");
        assert!(missing.to_string().contains("PEOPLEBOOK_DB"));

        let empty = ConfigError::EmptyPath("PEOPLEBOOK_DB");
        assert!(empty.to_string().contains("not be empty"));
    }
}
