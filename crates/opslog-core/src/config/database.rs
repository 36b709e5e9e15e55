//! Log database configuration.

use serde::{Deserialize, Serialize};

/// SQLite log database configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file. `":memory:"` selects an
    /// in-memory database (used by the test suite).
    #[serde(default = "default_path")]
    pub path: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Connection acquire timeout in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u64,
    /// Delete the database file at startup so every run begins with an
    /// empty log, mirroring the processing tool's expectations.
    #[serde(default)]
    pub reset_on_start: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            max_connections: default_max_connections(),
            connect_timeout_seconds: default_connect_timeout(),
            reset_on_start: false,
        }
    }
}

fn default_path() -> String {
    "data/logs.db".to_string()
}

fn default_max_connections() -> u32 {
    5
}

fn default_connect_timeout() -> u64 {
    10
}
