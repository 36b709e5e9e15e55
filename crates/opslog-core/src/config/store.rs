//! Job configuration store configuration.

use serde::{Deserialize, Serialize};

/// File-backed job configuration store settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Path to the JSON file holding the job configuration collection.
    #[serde(default = "default_path")]
    pub path: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
        }
    }
}

fn default_path() -> String {
    "data/configs.json".to_string()
}
