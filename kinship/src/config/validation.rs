//! Configuration validation utilities.

use super::ConfigError;
use super::models::*;
use crate::storage::config::SurrealDBEngine;

/// Validate the entire configuration.
pub fn validate_config(config: &KinshipConfig) -> Result<(), ConfigError> {
    validate_storage_config(&config.storage)?;
    Ok(())
}

/// Validate storage configuration.
fn validate_storage_config(config: &StorageConfig) -> Result<(), ConfigError> {
    if config.data_dir.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "Data directory cannot be empty".to_string(),
        ));
    }

    if config.surrealdb.namespace.is_empty() {
        return Err(ConfigError::ValidationError(
            "SurrealDB namespace cannot be empty".to_string(),
        ));
    }
    if config.surrealdb.database.is_empty() {
        return Err(ConfigError::ValidationError(
            "SurrealDB database cannot be empty".to_string(),
        ));
    }

    match config.surrealdb.engine {
        SurrealDBEngine::Memory => {}
        _ => {
            if config.surrealdb.connection.is_empty() {
                return Err(ConfigError::ValidationError(
                    "SurrealDB connection string cannot be empty".to_string(),
                ));
            }
        }
    }

    Ok(())
}
