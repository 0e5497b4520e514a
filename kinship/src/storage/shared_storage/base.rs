//! Base shared storage implementation

use async_trait::async_trait;
use surrealdb::{Connection, RecordId, Surreal};

use super::config::SharedStorageConfig;
use crate::storage::errors::StorageError;
use crate::storage::traits::{BaseStore, RegistryStore};

/// Extract the raw key string from a record id.
///
/// `RecordIdKey`'s Display escapes keys containing characters like the
/// hyphens in UUIDs (⟨...⟩ or backticks), which would not round-trip
/// through a subsequent select. Strip the escaping so the returned id
/// matches the key the record was created under.
pub(crate) fn record_key_to_string(id: &RecordId) -> String {
    let raw = id.key().to_string();
    let key = raw
        .strip_prefix('⟨')
        .and_then(|s| s.strip_suffix('⟩'))
        .or_else(|| raw.strip_prefix('`').and_then(|s| s.strip_suffix('`')))
        .unwrap_or(&raw);
    key.to_string()
}

/// SurrealDB-backed storage for the registry
#[derive(Debug)]
pub struct SharedStorage<C>
where
    C: Connection + Clone + Send + Sync + std::fmt::Debug + 'static,
{
    pub(crate) client: Surreal<C>,
    pub(crate) config: SharedStorageConfig,
}

impl<C> SharedStorage<C>
where
    C: Connection + Clone + Send + Sync + std::fmt::Debug + 'static,
{
    /// Create a new shared storage instance
    pub async fn new(
        client: Surreal<C>,
        config: SharedStorageConfig,
    ) -> Result<Self, StorageError> {
        client
            .use_ns(&config.namespace)
            .use_db(&config.database)
            .await
            .map_err(|e| {
                StorageError::Connection(format!("Failed to set namespace/database: {}", e))
            })?;

        let storage = Self { client, config };
        storage.initialize_schema().await?;

        Ok(storage)
    }

    /// Initialize the database schema with all required tables
    async fn initialize_schema(&self) -> Result<(), StorageError> {
        super::schema::initialize_schema(&self.client).await
    }

    /// Get the underlying client for advanced operations
    pub fn client(&self) -> &Surreal<C> {
        &self.client
    }
}

#[async_trait]
impl<C> BaseStore for SharedStorage<C>
where
    C: Connection + Clone + Send + Sync + std::fmt::Debug + 'static,
{
    async fn health_check(&self) -> Result<bool, StorageError> {
        let _result = self
            .client
            .query("INFO FOR DB")
            .await
            .map_err(|e| StorageError::Connection(format!("Health check failed: {}", e)))?;

        Ok(true)
    }

    async fn clear(&self) -> Result<(), StorageError> {
        let queries = ["DELETE FROM person", "DELETE FROM relationship"];

        for query in queries {
            self.client
                .query(query)
                .await
                .map_err(|e| StorageError::Query(format!("Failed to clear table: {}", e)))?;
        }

        Ok(())
    }

    async fn get_metadata(&self) -> Result<serde_json::Value, StorageError> {
        Ok(serde_json::json!({
            "type": "shared_storage",
            "namespace": self.config.namespace,
            "database": self.config.database,
            "engine": "surrealdb",
        }))
    }

    async fn close(&self) -> Result<(), StorageError> {
        // SurrealDB connections are automatically closed when dropped
        Ok(())
    }
}

#[async_trait]
impl<C> RegistryStore for SharedStorage<C>
where
    C: Connection + Clone + Send + Sync + std::fmt::Debug + 'static,
{
    async fn clear_storage(&self) -> Result<(), StorageError> {
        self.clear().await
    }
}
