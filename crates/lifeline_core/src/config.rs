//! Data manager configuration.
//!
//! Maps to the `[data]` table of `config.toml`:
//!
//! ```toml
//! [data]
//! recorded_keys = ["core.world.organisms", "core.world.lineage_size[0]"]
//! immediate_update = true
//! log_interval = 1000
//! ```

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct DataConfig {
    /// Keys recorded as time series by the host application.
    pub recorded_keys: Vec<String>,
    /// Ask for a first reading as soon as each recorder attaches.
    pub immediate_update: bool,
    /// Ticks between metrics log lines. Zero disables them.
    pub log_interval: u64,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            recorded_keys: Vec::new(),
            immediate_update: false,
            log_interval: 1000,
        }
    }
}
