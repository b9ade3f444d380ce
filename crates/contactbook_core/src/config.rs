//! Runtime configuration resolved from environment variables.
//!
//! # Responsibility
//! - Decide where the contact database and log files live.
//! - Decide the log level for the current run.
//!
//! # Invariants
//! - Blank variables behave like unset ones.
//! - `log_dir` is always absolute, as required by `init_logging`.

use crate::logging::{default_log_level, normalize_level};
use std::path::PathBuf;

pub const DB_PATH_VAR: &str = "CONTACTBOOK_DB_PATH";
pub const LOG_DIR_VAR: &str = "CONTACTBOOK_LOG_DIR";
pub const LOG_LEVEL_VAR: &str = "CONTACTBOOK_LOG_LEVEL";

const DEFAULT_DB_DIR: &str = "databases";
const DEFAULT_DB_FILE_NAME: &str = "contacts.sqlite3";
const DEFAULT_LOG_DIR_NAME: &str = "contactbook-logs";

/// Resolved settings for one process run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub log_dir: PathBuf,
    pub log_level: &'static str,
}

impl AppConfig {
    /// Reads settings from the process environment.
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves settings through `lookup`, falling back to defaults.
    ///
    /// # Errors
    /// - Returns an error when the configured log level is unsupported.
    /// - Returns an error when the configured log directory is relative.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let read = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let db_path = read(DB_PATH_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_DIR).join(DEFAULT_DB_FILE_NAME));

        let log_dir = match read(LOG_DIR_VAR) {
            Some(value) => {
                let path = PathBuf::from(&value);
                if !path.is_absolute() {
                    return Err(format!(
                        "{LOG_DIR_VAR} must be an absolute path, got `{value}`"
                    ));
                }
                path
            }
            None => std::env::temp_dir().join(DEFAULT_LOG_DIR_NAME),
        };

        let log_level = match read(LOG_LEVEL_VAR) {
            Some(value) => normalize_level(&value)?,
            None => default_log_level(),
        };

        Ok(Self {
            db_path,
            log_dir,
            log_level,
        })
    }
}
