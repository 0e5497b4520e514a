//! Shared storage implementation over SurrealDB
//!
//! SharedStorage implements the full registry storage surface (BaseStore,
//! PersonStore, RelationshipStore, RegistryStore) against a single SurrealDB
//! instance, embedded or remote.

use surrealdb::Surreal;

use crate::storage::config::{SurrealDBConfig, SurrealDBEngine};
use crate::storage::errors::StorageError;
use crate::storage::traits::RegistryStore;

pub mod base;
pub mod config;
pub mod person;
pub mod relationship;
pub mod schema;

pub use base::*;
pub use config::*;

/// Type alias for embedded shared storage
pub type EmbeddedSharedStorage = SharedStorage<surrealdb::engine::local::Db>;

/// Create an embedded shared storage instance
pub async fn create_embedded_shared_storage(
    path: &str,
    config: SharedStorageConfig,
) -> Result<EmbeddedSharedStorage, StorageError> {
    use surrealdb::engine::local::RocksDb;

    let client = Surreal::new::<RocksDb>(path).await.map_err(|e| {
        StorageError::Connection(format!("Failed to create embedded database: {}", e))
    })?;

    SharedStorage::new(client, config).await
}

/// Create a shared storage instance from configuration
pub async fn create_shared_store(
    config: SurrealDBConfig,
) -> Result<Box<dyn RegistryStore>, StorageError> {
    let shared_config = SharedStorageConfig {
        namespace: config.namespace.clone(),
        database: config.database.clone(),
    };

    match config.engine {
        SurrealDBEngine::Memory => {
            tracing::info!("Creating SharedStorage in-memory store");
            let client = Surreal::new::<surrealdb::engine::local::Mem>(())
                .await
                .map_err(|e| {
                    StorageError::Connection(format!("Failed to create memory client: {}", e))
                })?;

            let store = SharedStorage::new(client, shared_config).await?;
            Ok(Box::new(store))
        }
        SurrealDBEngine::RocksDB => {
            tracing::info!(
                "Creating SharedStorage RocksDB store at {}",
                config.connection
            );
            let client = Surreal::new::<surrealdb::engine::local::RocksDb>(&config.connection)
                .await
                .map_err(|e| {
                    StorageError::Connection(format!("Failed to create RocksDB client: {}", e))
                })?;

            let store = SharedStorage::new(client, shared_config).await?;
            Ok(Box::new(store))
        }
        #[cfg(feature = "surrealdb-remote")]
        SurrealDBEngine::WebSocket => {
            tracing::info!(
                "Creating SharedStorage WebSocket connection to {}",
                config.connection
            );
            let client = Surreal::new::<surrealdb::engine::remote::ws::Ws>(&config.connection)
                .await
                .map_err(|e| {
                    StorageError::Connection(format!("Failed to create WebSocket client: {}", e))
                })?;

            if let Some(auth) = &config.auth {
                authenticate_client(&client, auth).await?;
            }

            let store = SharedStorage::new(client, shared_config).await?;
            Ok(Box::new(store))
        }
        #[cfg(not(feature = "surrealdb-remote"))]
        SurrealDBEngine::WebSocket => Err(StorageError::Configuration(
            "WebSocket engine requires 'surrealdb-remote' feature to be enabled".to_string(),
        )),
        #[cfg(feature = "surrealdb-remote")]
        SurrealDBEngine::Http => {
            tracing::info!(
                "Creating SharedStorage HTTP connection to {}",
                config.connection
            );
            let client = Surreal::new::<surrealdb::engine::remote::http::Http>(&config.connection)
                .await
                .map_err(|e| {
                    StorageError::Connection(format!("Failed to create HTTP client: {}", e))
                })?;

            if let Some(auth) = &config.auth {
                authenticate_client(&client, auth).await?;
            }

            let store = SharedStorage::new(client, shared_config).await?;
            Ok(Box::new(store))
        }
        #[cfg(not(feature = "surrealdb-remote"))]
        SurrealDBEngine::Http => Err(StorageError::Configuration(
            "HTTP engine requires 'surrealdb-remote' feature to be enabled".to_string(),
        )),
    }
}

/// Authenticate with a remote SurrealDB client as the root user
#[cfg(feature = "surrealdb-remote")]
pub async fn authenticate_client<C>(
    client: &Surreal<C>,
    auth: &crate::storage::config::SurrealDBAuth,
) -> Result<(), StorageError>
where
    C: surrealdb::Connection,
{
    tracing::debug!("Authenticating as root user");
    let root = surrealdb::opt::auth::Root {
        username: &auth.username,
        password: &auth.password,
    };
    client
        .signin(root)
        .await
        .map_err(|e| StorageError::Configuration(format!("Root auth failed: {}", e)))?;
    Ok(())
}
