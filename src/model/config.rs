//! Application configuration.
//!
//! Maps to `config.toml`. Missing tables and fields fall back to the
//! defaults below.
//!
//! ```toml
//! [world]
//! seed = 42
//! initial_population = 40
//! max_population = 400
//! ticks = 200
//!
//! [data]
//! recorded_keys = ["core.world.organisms", "core.world.lineage_size[0]"]
//! immediate_update = true
//! ```

use lifeline_core::DataConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct WorldConfig {
    pub seed: u64,
    pub initial_population: usize,
    pub max_population: usize,
    /// Distinct founder lineages among the initial population.
    pub founder_lineages: u32,
    pub ticks: u64,
    pub reproduction_threshold: f64,
    pub metabolic_cost: f64,
    pub max_age: u64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            initial_population: 40,
            max_population: 400,
            founder_lineages: 4,
            ticks: 100,
            reproduction_threshold: 12.0,
            metabolic_cost: 0.6,
            max_age: 80,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub world: WorldConfig,
    pub data: DataConfig,
}

impl AppConfig {
    /// Reads `path`, or returns the defaults if it does not exist.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let config = AppConfig::load("definitely/not/here.toml").unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_partial_config() {
        let config: AppConfig = toml::from_str(
            r#"
            [world]
            seed = 7

            [data]
            recorded_keys = ["core.world.organisms"]
            "#,
        )
        .unwrap();
        assert_eq!(config.world.seed, 7);
        assert_eq!(config.world.max_population, 400);
        assert_eq!(config.data.recorded_keys, vec!["core.world.organisms"]);
    }
}
