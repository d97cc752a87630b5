use anyhow::{anyhow, Result};
use serde::Deserialize;
use std::fmt;

/// Fallback salt for local development. Rejected in production and staging.
pub const DEVELOPMENT_SALT: &str = "default_salt_for_development";

#[derive(Clone, Deserialize)]
pub struct Config {
    // HTTP server config
    pub http_host: String,
    pub http_port: u16,

    // Deployment environment (development, staging, production)
    pub app_env: String,

    // Secret salt for user id hashing
    pub anonymization_salt: String,

    // Event I/O
    pub raw_events_path: Option<String>,
    pub anonymized_events_path: String,
    pub dead_letter_path: String,
}

impl Config {
    pub fn from_env() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .set_default("http_host", "0.0.0.0")?
            .set_default("http_port", 8020)?
            .set_default("app_env", "development")?
            .set_default("anonymization_salt", DEVELOPMENT_SALT)?
            .set_default("anonymized_events_path", "data/anonymized_events.jsonl")?
            .set_default("dead_letter_path", "data/dead_letter_events.jsonl")?
            .add_source(config::Environment::default().separator("__"))
            .build()?;

        config.try_deserialize()
    }

    pub fn is_production_like(&self) -> bool {
        matches!(
            self.app_env.to_ascii_lowercase().as_str(),
            "production" | "staging"
        )
    }

    pub fn uses_development_salt(&self) -> bool {
        self.anonymization_salt == DEVELOPMENT_SALT
    }

    pub fn validate(&self) -> Result<()> {
        if self.http_port == 0 {
            return Err(anyhow!("HTTP port must be greater than 0"));
        }

        if self.anonymization_salt.is_empty() {
            return Err(anyhow!("ANONYMIZATION_SALT must not be empty"));
        }

        if self.is_production_like() && self.uses_development_salt() {
            return Err(anyhow!(
                "ANONYMIZATION_SALT must be set explicitly in {}",
                self.app_env
            ));
        }

        if self.anonymized_events_path.is_empty() {
            return Err(anyhow!("Anonymized events path is required"));
        }

        if self.dead_letter_path.is_empty() {
            return Err(anyhow!("Dead letter path is required"));
        }

        Ok(())
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("http_host", &self.http_host)
            .field("http_port", &self.http_port)
            .field("app_env", &self.app_env)
            .field("anonymization_salt", &"<redacted>")
            .field("raw_events_path", &self.raw_events_path)
            .field("anonymized_events_path", &self.anonymized_events_path)
            .field("dead_letter_path", &self.dead_letter_path)
            .finish()
    }
}
