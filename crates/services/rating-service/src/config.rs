//! Rating service configuration.

use std::env;
use std::path::PathBuf;

use common::{LogConfig, StorageConfig};

/// Rating service configuration.
#[derive(Debug, Clone, Default)]
pub struct RatingServiceConfig {
    /// Where the users, stores and ratings collections are persisted
    pub storage: StorageConfig,
    /// Fallback log filter
    pub log: LogConfig,
}

impl RatingServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            storage: StorageConfig {
                data_dir: env::var("RATING_DATA_DIR")
                    .map(PathBuf::from)
                    .unwrap_or(defaults.storage.data_dir),
            },
            log: LogConfig {
                level: env::var("RATING_LOG_LEVEL").unwrap_or(defaults.log.level),
            },
        }
    }

    /// Override the data directory (command-line flag wins over the environment).
    pub fn with_data_dir(mut self, data_dir: Option<PathBuf>) -> Self {
        if let Some(dir) = data_dir {
            self.storage.data_dir = dir;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RatingServiceConfig::default();
        assert_eq!(config.storage.data_dir, PathBuf::from("./data"));
        assert_eq!(config.log.level, "info");
    }

    #[test]
    fn test_with_data_dir_override() {
        let config = RatingServiceConfig::default().with_data_dir(Some(PathBuf::from("/tmp/sr")));
        assert_eq!(config.storage.data_dir, PathBuf::from("/tmp/sr"));

        let unchanged = RatingServiceConfig::default().with_data_dir(None);
        assert_eq!(unchanged.storage.data_dir, PathBuf::from("./data"));
    }
}
