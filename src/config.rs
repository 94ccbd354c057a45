use std::env;
use std::time::Duration;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub dedup: DedupConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DedupConfig {
    /// How long (seconds) a repeated event key is suppressed after being accepted.
    pub recent_threshold_seconds: u64,
    /// Extra age (seconds) on top of the recent threshold before a stale entry is reaped.
    pub cleanup_threshold_seconds: u64,
    /// How often (seconds) the cleanup worker sweeps the cache.
    pub cleanup_interval_seconds: u64,
}

impl DedupConfig {
    pub fn recent_threshold(&self) -> Duration {
        Duration::from_secs(self.recent_threshold_seconds)
    }

    pub fn cleanup_threshold(&self) -> Duration {
        Duration::from_secs(self.cleanup_threshold_seconds)
    }

    pub fn cleanup_interval(&self) -> Duration {
        Duration::from_secs(self.cleanup_interval_seconds)
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Config {
            dedup: DedupConfig {
                recent_threshold_seconds: env::var("DEDUP_RECENT_THRESHOLD_SECONDS")
                    .unwrap_or_else(|_| "5".to_string())
                    .parse()
                    .map_err(|_| {
                        ConfigError::InvalidValue("DEDUP_RECENT_THRESHOLD_SECONDS".to_string())
                    })?,
                cleanup_threshold_seconds: env::var("DEDUP_CLEANUP_THRESHOLD_SECONDS")
                    .unwrap_or_else(|_| "300".to_string())
                    .parse()
                    .unwrap_or(300),
                cleanup_interval_seconds: env::var("DEDUP_CLEANUP_INTERVAL_SECONDS")
                    .unwrap_or_else(|_| "300".to_string())
                    .parse()
                    .unwrap_or(300),
            },
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnv(String),

    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}

impl Default for Config {
    fn default() -> Self {
        Config {
            dedup: DedupConfig {
                recent_threshold_seconds: 5,
                cleanup_threshold_seconds: 300,
                cleanup_interval_seconds: 300,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_thresholds() {
        let config = Config::default();
        assert_eq!(config.dedup.recent_threshold(), Duration::from_secs(5));
        assert_eq!(config.dedup.cleanup_threshold(), Duration::from_secs(300));
        assert_eq!(config.dedup.cleanup_interval(), Duration::from_secs(300));
    }
}
