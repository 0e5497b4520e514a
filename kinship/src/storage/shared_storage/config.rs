//! Configuration for the shared storage layer

use serde::{Deserialize, Serialize};

/// Configuration for a SharedStorage instance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SharedStorageConfig {
    /// SurrealDB namespace
    pub namespace: String,

    /// SurrealDB database name
    pub database: String,
}

impl Default for SharedStorageConfig {
    fn default() -> Self {
        Self {
            namespace: "kinship".to_string(),
            database: "main".to_string(),
        }
    }
}
