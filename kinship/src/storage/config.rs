//! Configuration structures for storage backends

use serde::{Deserialize, Serialize};

use crate::storage::errors::StorageError;

/// SurrealDB configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurrealDBConfig {
    /// SurrealDB engine type
    pub engine: SurrealDBEngine,

    /// Connection string for remote or path for embedded
    pub connection: String,

    /// Namespace
    pub namespace: String,

    /// Database name
    pub database: String,

    /// Authentication information
    pub auth: Option<SurrealDBAuth>,
}

/// SurrealDB engine types
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum SurrealDBEngine {
    /// In-memory storage (for testing)
    Memory,
    /// RocksDB on-disk storage (embedded)
    RocksDB,
    /// Remote WebSocket connection
    WebSocket,
    /// Remote HTTP connection
    Http,
}

/// SurrealDB authentication
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurrealDBAuth {
    /// Username for root authentication
    pub username: String,

    /// Password for root authentication
    pub password: String,
}

impl SurrealDBConfig {
    /// Validate the storage configuration
    pub fn validate(&self) -> Result<(), StorageError> {
        if self.connection.is_empty() {
            return Err(StorageError::Configuration(
                "SurrealDB connection string cannot be empty".to_string(),
            ));
        }
        if self.namespace.is_empty() {
            return Err(StorageError::Configuration(
                "SurrealDB namespace cannot be empty".to_string(),
            ));
        }
        if self.database.is_empty() {
            return Err(StorageError::Configuration(
                "SurrealDB database cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for SurrealDBConfig {
    fn default() -> Self {
        Self {
            engine: SurrealDBEngine::Memory,
            connection: "memory".to_string(),
            namespace: "kinship".to_string(),
            database: "main".to_string(),
            auth: None,
        }
    }
}
