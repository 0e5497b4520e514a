//! Storage abstractions and implementations
//!
//! Trait definitions and the SurrealDB-backed implementation used by the
//! registry. SharedStorage implements every storage trait (BaseStore,
//! PersonStore, RelationshipStore, RegistryStore) over a single SurrealDB
//! instance, embedded or remote.

pub mod config;
pub mod errors;
pub mod filters;
pub mod shared_storage;
pub mod traits;

// Re-export common types for convenience
pub use config::{SurrealDBAuth, SurrealDBConfig, SurrealDBEngine};
pub use errors::{StorageError, StorageResult};
pub use filters::{PersonFilter, RelationshipFilter};
pub use traits::{BaseStore, PersonStore, RegistryStore, RelationshipStore};

pub use shared_storage::{
    EmbeddedSharedStorage, SharedStorage, SharedStorageConfig, create_embedded_shared_storage,
    create_shared_store,
};

/// Create the storage service described by the configuration
///
/// # Arguments
/// * `config` - The kinship configuration
///
/// # Returns
/// A storage service backed by SharedStorage
pub async fn create_storage_service(
    config: &crate::config::KinshipConfig,
) -> Result<Box<dyn RegistryStore>, StorageError> {
    let surrealdb = &config.storage.surrealdb;
    surrealdb.validate()?;

    match surrealdb.engine {
        SurrealDBEngine::Memory => {
            tracing::info!("Creating SharedStorage with in-memory engine");
        }
        SurrealDBEngine::RocksDB => {
            tracing::info!(
                "Creating SharedStorage with RocksDB engine at {}",
                surrealdb.connection
            );
        }
        _ => {
            tracing::info!(
                "Creating SharedStorage with remote connection to {}",
                surrealdb.connection
            );
        }
    }

    create_shared_store(surrealdb.clone()).await
}
