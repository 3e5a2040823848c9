//! Client-local storage configuration.

use serde::{Deserialize, Serialize};

/// Location of the persisted key/value preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Path of the JSON file backing client-local storage.
    #[serde(default = "default_path")]
    pub path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
        }
    }
}

fn default_path() -> String {
    "data/local-storage.json".to_string()
}
