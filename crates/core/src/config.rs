//! Configuration for chess-tally
//!
//! Data directory precedence:
//! 1. explicit override (the CLI `--data-dir` flag)
//! 2. TALLY_DATA_DIR environment variable
//! 3. ~/.config/chess-tally
//! 4. ./data (fallback for development)

use std::path::PathBuf;

use chrono::Duration;

/// Storage key of the persisted game collection.
pub const GAMES_STORAGE_KEY: &str = "chessGames";
/// Session storage key of the admin unlock flag.
pub const AUTH_STORAGE_KEY: &str = "chessAdminAuth";
pub const STORAGE_DB_FILENAME: &str = "storage.db";
pub const DEFAULT_RECENT_LIMIT: usize = 10;
pub const DEFAULT_AUTH_EXPIRY_MINUTES: i64 = 30;

const DEFAULT_ADMIN_PIN: &str = "15081947";
const DEFAULT_CONFIG_DIR: &str = ".config/chess-tally";
const DEV_DATA_DIR: &str = "./data";

pub const DATA_DIR_ENV: &str = "TALLY_DATA_DIR";
pub const ADMIN_PIN_ENV: &str = "TALLY_ADMIN_PIN";

#[derive(Debug, Clone)]
pub struct TallyConfig {
    pub data_dir: PathBuf,
    pub admin_pin: String,
    pub recent_limit: usize,
    pub auth_expiry: Duration,
}

impl Default for TallyConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEV_DATA_DIR),
            admin_pin: DEFAULT_ADMIN_PIN.to_string(),
            recent_limit: DEFAULT_RECENT_LIMIT,
            auth_expiry: Duration::minutes(DEFAULT_AUTH_EXPIRY_MINUTES),
        }
    }
}

impl TallyConfig {
    /// Build a config from the environment, preferring `data_dir` when given.
    pub fn from_env(data_dir: Option<PathBuf>) -> Self {
        let admin_pin = std::env::var(ADMIN_PIN_ENV)
            .ok()
            .filter(|pin| !pin.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ADMIN_PIN.to_string());

        Self {
            data_dir: data_dir.unwrap_or_else(default_data_dir),
            admin_pin,
            ..Self::default()
        }
    }

    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(STORAGE_DB_FILENAME)
    }
}

/// Data directory when none is given explicitly.
pub fn default_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        return PathBuf::from(dir);
    }

    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(DEFAULT_CONFIG_DIR);
    }

    PathBuf::from(DEV_DATA_DIR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_data_dir_wins() {
        let config = TallyConfig::from_env(Some(PathBuf::from("/tmp/tally-explicit")));
        assert_eq!(config.data_dir, PathBuf::from("/tmp/tally-explicit"));
        assert_eq!(
            config.db_path(),
            PathBuf::from("/tmp/tally-explicit").join(STORAGE_DB_FILENAME)
        );
    }

    #[test]
    fn test_default_data_dir_is_not_empty() {
        // Depends on the environment, only check that something sensible comes back
        assert!(!default_data_dir().as_os_str().is_empty());
    }

    #[test]
    fn test_defaults() {
        let config = TallyConfig::default();
        assert_eq!(config.recent_limit, 10);
        assert_eq!(config.auth_expiry, Duration::minutes(30));
        assert!(!config.admin_pin.is_empty());
    }
}
