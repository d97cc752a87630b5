use anyhow::{anyhow, Result};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // HTTP server config
    pub http_host: String,
    pub http_port: u16,

    // Snapshot written by suggestion-aggregator
    pub suggestion_cache_path: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .set_default("http_host", "0.0.0.0")?
            .set_default("http_port", 8021)?
            .set_default("suggestion_cache_path", "data/suggestion_cache.json")?
            .add_source(config::Environment::default().separator("__"))
            .build()?;

        config.try_deserialize()
    }

    pub fn validate(&self) -> Result<()> {
        if self.http_port == 0 {
            return Err(anyhow!("HTTP port must be greater than 0"));
        }

        if self.suggestion_cache_path.as_os_str().is_empty() {
            return Err(anyhow!("Suggestion cache path is required"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_zero_port_rejected() {
        let config = Config {
            http_host: "0.0.0.0".to_string(),
            http_port: 0,
            suggestion_cache_path: PathBuf::from("data/suggestion_cache.json"),
        };
        assert!(config.validate().is_err());
    }

    #[test]
    #[serial]
    fn test_defaults() {
        std::env::remove_var("HTTP_PORT");
        std::env::remove_var("SUGGESTION_CACHE_PATH");

        let config = Config::from_env().unwrap();
        assert_eq!(config.http_port, 8021);
        assert_eq!(
            config.suggestion_cache_path,
            PathBuf::from("data/suggestion_cache.json")
        );
        assert!(config.validate().is_ok());
    }
}
