//! Trait definitions for storage components

use async_trait::async_trait;
use std::fmt::Debug;

use crate::models::{Person, Relationship};
use crate::storage::errors::StorageError;
use crate::storage::filters::{PersonFilter, RelationshipFilter};

/// Base trait for all storage implementations
#[async_trait]
pub trait BaseStore: Send + Sync + 'static + Debug {
    /// Check if the store is healthy and available
    async fn health_check(&self) -> std::result::Result<bool, StorageError>;

    /// Clear all data in the store
    async fn clear(&self) -> std::result::Result<(), StorageError>;

    /// Get metadata about the store
    async fn get_metadata(&self) -> std::result::Result<serde_json::Value, StorageError>;

    /// Close connections and release resources
    async fn close(&self) -> std::result::Result<(), StorageError>;
}

/// Trait for person operations
#[async_trait]
pub trait PersonStore: BaseStore {
    /// Create a new person
    async fn create_person(&self, person: Person) -> std::result::Result<Person, StorageError>;

    /// Get a person by their ID
    async fn get_person(&self, id: &str) -> std::result::Result<Option<Person>, StorageError>;

    /// Update an existing person
    async fn update_person(&self, person: Person) -> std::result::Result<Person, StorageError>;

    /// Delete a person by their ID
    async fn delete_person(&self, id: &str) -> std::result::Result<bool, StorageError>;

    /// List persons with optional filtering
    async fn list_persons(
        &self,
        filter: Option<PersonFilter>,
        limit: Option<usize>,
        offset: Option<usize>,
    ) -> std::result::Result<Vec<Person>, StorageError>;

    /// Count persons with optional filtering
    async fn count_persons(
        &self,
        filter: Option<PersonFilter>,
    ) -> std::result::Result<usize, StorageError>;
}

/// Trait for relationship operations
#[async_trait]
pub trait RelationshipStore: BaseStore {
    /// Create a new relationship edge
    async fn create_relationship(
        &self,
        relationship: Relationship,
    ) -> std::result::Result<Relationship, StorageError>;

    /// Get a relationship by its ID
    async fn get_relationship(
        &self,
        id: &str,
    ) -> std::result::Result<Option<Relationship>, StorageError>;

    /// Update an existing relationship
    async fn update_relationship(
        &self,
        relationship: Relationship,
    ) -> std::result::Result<Relationship, StorageError>;

    /// Delete a relationship by its ID
    async fn delete_relationship(&self, id: &str) -> std::result::Result<bool, StorageError>;

    /// List relationships with optional filtering
    async fn list_relationships(
        &self,
        filter: Option<RelationshipFilter>,
        limit: Option<usize>,
        offset: Option<usize>,
    ) -> std::result::Result<Vec<Relationship>, StorageError>;

    /// Count relationships with optional filtering
    async fn count_relationships(
        &self,
        filter: Option<RelationshipFilter>,
    ) -> std::result::Result<usize, StorageError>;

    /// Get the edge for an ordered (person_a, person_b) pair, if any
    async fn get_relationship_by_pair(
        &self,
        person_a: &str,
        person_b: &str,
    ) -> std::result::Result<Option<Relationship>, StorageError>;

    /// Delete every edge touching a person on either side.
    ///
    /// Returns the number of edges removed. Used when a person record is
    /// deleted so no dangling edges survive.
    async fn delete_relationships_for_person(
        &self,
        person_id: &str,
    ) -> std::result::Result<usize, StorageError>;
}

/// Combined trait for the full registry storage surface
#[async_trait]
pub trait RegistryStore: PersonStore + RelationshipStore {
    /// Clear all data from the storage
    async fn clear_storage(&self) -> std::result::Result<(), StorageError>;
}
