//! The registry facade
//!
//! `Registry` is the main entry point of the library. It owns the storage
//! service and the relationship synchronizer and exposes the person and
//! relationship operations applications call.

use std::sync::Arc;

use crate::models::{Person, RelationType, Relationship};
use crate::relations::{Caller, EdgeChanges, RelationshipSynchronizer};
use crate::storage::{PersonFilter, RegistryStore, RelationshipFilter};
use crate::{KinshipError, Result};

/// Central handle for registry operations
#[derive(Clone)]
pub struct Registry {
    storage: Arc<dyn RegistryStore>,
    synchronizer: RelationshipSynchronizer,
}

impl Registry {
    /// Create a registry over an initialized storage service
    pub fn new(storage: Arc<dyn RegistryStore>) -> Self {
        let synchronizer = RelationshipSynchronizer::new(storage.clone());
        Self {
            storage,
            synchronizer,
        }
    }

    /// Access the underlying storage service
    pub fn storage(&self) -> &Arc<dyn RegistryStore> {
        &self.storage
    }

    /// Access the relationship synchronizer
    pub fn synchronizer(&self) -> &RelationshipSynchronizer {
        &self.synchronizer
    }

    /// Check that the storage backend is reachable
    pub async fn health_check(&self) -> Result<bool> {
        Ok(self.storage.health_check().await?)
    }

    // Person operations

    /// Register a new person
    pub async fn create_person(&self, person: Person) -> Result<Person> {
        if person.full_name.trim().is_empty() {
            return Err(KinshipError::Validation(
                "Person name cannot be empty".to_string(),
            ));
        }
        Ok(self.storage.create_person(person).await?)
    }

    /// Get a person by id
    pub async fn get_person(&self, id: &str) -> Result<Option<Person>> {
        Ok(self.storage.get_person(id).await?)
    }

    /// Update a person record
    pub async fn update_person(&self, person: Person) -> Result<Person> {
        if person.full_name.trim().is_empty() {
            return Err(KinshipError::Validation(
                "Person name cannot be empty".to_string(),
            ));
        }
        Ok(self.storage.update_person(person).await?)
    }

    /// Delete a person and every edge touching them.
    ///
    /// Returns whether the person existed, plus the number of edges removed.
    pub async fn delete_person(&self, id: &str) -> Result<(bool, usize)> {
        let removed_edges = self.synchronizer.remove_person_edges(id).await?;
        let deleted = self.storage.delete_person(id).await?;
        Ok((deleted, removed_edges))
    }

    /// List persons with optional filtering
    pub async fn list_persons(
        &self,
        filter: Option<PersonFilter>,
        limit: Option<usize>,
        offset: Option<usize>,
    ) -> Result<Vec<Person>> {
        Ok(self.storage.list_persons(filter, limit, offset).await?)
    }

    /// Count persons with optional filtering
    pub async fn count_persons(&self, filter: Option<PersonFilter>) -> Result<usize> {
        Ok(self.storage.count_persons(filter).await?)
    }

    // Relationship operations, all routed through the synchronizer so the
    // forward and reverse edges stay aligned

    /// Declare a relationship, writing the forward and reverse edges
    pub async fn create_pair(
        &self,
        person_a: &str,
        person_b: &str,
        relation_type: RelationType,
        description: Option<String>,
        caller: &Caller,
    ) -> Result<(String, String)> {
        self.synchronizer
            .create_pair(person_a, person_b, relation_type, description, caller)
            .await
    }

    /// Update an edge and realign its counterpart
    pub async fn update_pair(
        &self,
        edge_id: &str,
        changes: EdgeChanges,
        caller: &Caller,
    ) -> Result<Relationship> {
        self.synchronizer.update_pair(edge_id, changes, caller).await
    }

    /// Delete an edge together with its counterpart
    pub async fn delete_pair(&self, edge_id: &str, caller: &Caller) -> Result<()> {
        self.synchronizer.delete_pair(edge_id, caller).await
    }

    /// Approve both sides of a relationship pair
    pub async fn approve_pair(&self, edge_id: &str, caller: &Caller) -> Result<Relationship> {
        self.synchronizer.approve_pair(edge_id, caller).await
    }

    /// Get a relationship edge by id
    pub async fn get_relationship(&self, id: &str) -> Result<Option<Relationship>> {
        Ok(self.storage.get_relationship(id).await?)
    }

    /// List relationship edges with optional filtering
    pub async fn list_relationships(
        &self,
        filter: Option<RelationshipFilter>,
        limit: Option<usize>,
        offset: Option<usize>,
    ) -> Result<Vec<Relationship>> {
        Ok(self
            .storage
            .list_relationships(filter, limit, offset)
            .await?)
    }

    /// Count relationship edges with optional filtering
    pub async fn count_relationships(&self, filter: Option<RelationshipFilter>) -> Result<usize> {
        Ok(self.storage.count_relationships(filter).await?)
    }
}
