use anyhow::{anyhow, Result};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Warehouse query result: JSON array of `{goal, first_step}` rows
    pub aggregation_input_path: PathBuf,
    /// Snapshot consumed by pathfinder-service
    pub suggestion_cache_path: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .set_default(
                "aggregation_input_path",
                "data/simulated_warehouse_query_result.json",
            )?
            .set_default("suggestion_cache_path", "data/suggestion_cache.json")?
            .add_source(config::Environment::default().separator("__"))
            .build()?;

        config.try_deserialize()
    }

    pub fn validate(&self) -> Result<()> {
        if self.aggregation_input_path.as_os_str().is_empty() {
            return Err(anyhow!("Aggregation input path is required"));
        }

        if self.suggestion_cache_path.as_os_str().is_empty() {
            return Err(anyhow!("Suggestion cache path is required"));
        }

        if self.aggregation_input_path == self.suggestion_cache_path {
            return Err(anyhow!(
                "Suggestion cache path must differ from the aggregation input path"
            ));
        }

        Ok(())
    }
}
