//! # Kinship
//!
//! Relationship registry for community family trees, providing persistent
//! storage for member records and always-consistent bidirectional kinship
//! edges over an embedded SurrealDB document store.
//!
//! Every relationship is recorded as a pair of directed edges. When a member
//! declares "B is the Father of A", the registry writes the forward edge and
//! an inverse edge ("A is the Son of B") in the same operation, and keeps
//! both sides aligned across updates, approvals, and deletions.
//!
//! ## Quick Start
//!
//! ```rust
//! use kinship::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = ConfigBuilder::new().with_memory_storage().build()?;
//!     let registry = kinship::init(config).await?;
//!
//!     let alice = registry.create_person(Person::new("Alice", Gender::Female)).await?;
//!     let bob = registry.create_person(Person::new("Bob", Gender::Male)).await?;
//!
//!     // Writes both "Bob is the Father of Alice" and the inverse
//!     // "Alice is the Son of Bob" (the registry's gender-blind default).
//!     let caller = Caller::new(&alice.id, Role::Member);
//!     registry
//!         .create_pair(&alice.id, &bob.id, RelationType::Father, None, &caller)
//!         .await?;
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod logging;
pub mod models;
pub mod registry;
pub mod relations;
pub mod storage;

/// The prelude re-exports commonly used types for convenience
pub mod prelude {
    // Re-export core initialization functions
    pub use crate::{init, init_with_defaults};

    // Re-export config types
    pub use crate::config::{ConfigBuilder, KinshipConfig, LogFormat, LogLevel, StorageConfig};

    // Re-export model types
    pub use crate::models::{Gender, Person, RelationType, Relationship};

    // Re-export the registry and synchronizer types
    pub use crate::registry::Registry;
    pub use crate::relations::{Caller, EdgeChanges, Role, resolve_inverse};

    // Re-export storage types for advanced usage
    pub use crate::storage::{PersonFilter, RelationshipFilter, StorageError};

    // Re-export essential result type
    pub use crate::{KinshipError, Result};
}

/// Current library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Error type for kinship operations
#[derive(Debug, thiserror::Error)]
pub enum KinshipError {
    /// A referenced person or relationship does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// The caller is not allowed to perform the operation
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// A relationship between the same ordered pair already exists
    #[error("Duplicate relationship: {0}")]
    DuplicateEdge(String),

    /// A relationship cannot link a person to themselves
    #[error("A person cannot have a relationship with themselves")]
    SelfRelationship,

    /// A relation type label outside the recognized vocabulary
    #[error("Unknown relation type: {0}")]
    UnknownRelationType(String),

    /// Input failed validation
    #[error("Validation error: {0}")]
    Validation(String),

    /// Error during storage operations
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Logging error
    #[error("Logging error: {0}")]
    Logging(#[from] crate::logging::LogError),
}

impl From<crate::config::ConfigError> for KinshipError {
    fn from(err: crate::config::ConfigError) -> Self {
        KinshipError::Configuration(err.to_string())
    }
}

impl From<crate::storage::StorageError> for KinshipError {
    fn from(err: crate::storage::StorageError) -> Self {
        match err {
            // Unique pair index violations surface as duplicate edges
            crate::storage::StorageError::AlreadyExists(msg) => KinshipError::DuplicateEdge(msg),
            other => KinshipError::Storage(other.to_string()),
        }
    }
}

/// Result type for kinship operations
pub type Result<T> = std::result::Result<T, KinshipError>;

/// Initialize the registry with default configuration
///
/// Uses the default on-disk storage location and standard logging. For
/// in-memory operation (tests, demos) build a config with
/// `ConfigBuilder::new().with_memory_storage()` and call [`init`] instead.
pub async fn init_with_defaults() -> Result<registry::Registry> {
    let config = config::ConfigBuilder::defaults().build()?;
    init(config).await
}

/// Initialize the registry with the provided configuration
///
/// Sets up logging and the storage backend, then returns a [`Registry`]
/// handle that exposes person and relationship operations.
///
/// # Examples
///
/// ```rust
/// use kinship::prelude::*;
///
/// async fn example() -> Result<()> {
///     let config = ConfigBuilder::new().with_memory_storage().build()?;
///     let registry = kinship::init(config).await?;
///     registry.health_check().await?;
///     Ok(())
/// }
/// ```
pub async fn init(config: config::KinshipConfig) -> Result<registry::Registry> {
    // Ignore errors if tracing is already initialized
    let _ = logging::init(&config.logging);

    let storage = storage::create_storage_service(&config)
        .await
        .map_err(|e| KinshipError::Storage(e.to_string()))?;
    let storage = std::sync::Arc::from(storage);

    Ok(registry::Registry::new(storage))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::StorageError;

    #[test]
    fn already_exists_maps_to_duplicate_edge() {
        let err = KinshipError::from(StorageError::AlreadyExists("pair taken".to_string()));
        assert!(matches!(err, KinshipError::DuplicateEdge(_)));

        let err = KinshipError::from(StorageError::Query("boom".to_string()));
        assert!(matches!(err, KinshipError::Storage(_)));
    }
}
