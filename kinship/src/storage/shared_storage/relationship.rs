//! Relationship storage implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use surrealdb::{Connection, RecordId};

use super::base::{SharedStorage, record_key_to_string};
use crate::models::{RelationType, Relationship};
use crate::storage::errors::StorageError;
use crate::storage::filters::RelationshipFilter;
use crate::storage::traits::RelationshipStore;

/// Internal representation of a Relationship record for SurrealDB
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
struct SurrealRelationship {
    id: RecordId,
    person_a: String,
    person_b: String,
    relation_type: RelationType,
    description: Option<String>,
    is_approved: bool,
    created_by: String,
    updated_by: Option<String>,
    approved_by: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Struct for creating relationships (timestamps handled by SurrealDB)
#[derive(Debug, Clone, serde::Serialize)]
struct CreateRelationship {
    person_a: String,
    person_b: String,
    relation_type: RelationType,
    description: Option<String>,
    is_approved: bool,
    created_by: String,
    updated_by: Option<String>,
    approved_by: Option<String>,
}

impl From<SurrealRelationship> for Relationship {
    fn from(record: SurrealRelationship) -> Self {
        Self {
            id: record_key_to_string(&record.id),
            person_a: record.person_a,
            person_b: record.person_b,
            relation_type: record.relation_type,
            description: record.description,
            is_approved: record.is_approved,
            created_by: record.created_by,
            updated_by: record.updated_by,
            approved_by: record.approved_by,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

#[async_trait]
impl<C> RelationshipStore for SharedStorage<C>
where
    C: Connection + Clone + Send + Sync + std::fmt::Debug + 'static,
{
    /// Create a new relationship edge
    async fn create_relationship(
        &self,
        relationship: Relationship,
    ) -> Result<Relationship, StorageError> {
        let create_relationship = CreateRelationship {
            person_a: relationship.person_a.clone(),
            person_b: relationship.person_b.clone(),
            relation_type: relationship.relation_type,
            description: relationship.description.clone(),
            is_approved: relationship.is_approved,
            created_by: relationship.created_by.clone(),
            updated_by: relationship.updated_by.clone(),
            approved_by: relationship.approved_by.clone(),
        };

        let created: Option<SurrealRelationship> = self
            .client
            .create(("relationship", relationship.id.as_str()))
            .content(create_relationship)
            .await
            .map_err(|e| {
                // The unique pair index rejects a second edge for the same
                // ordered pair
                let msg = e.to_string();
                if msg.contains("relationship_pair_idx") {
                    StorageError::AlreadyExists(format!(
                        "Relationship between {} and {} already exists",
                        relationship.person_a, relationship.person_b
                    ))
                } else {
                    StorageError::Query(format!("Failed to create relationship: {}", msg))
                }
            })?;

        created
            .map(Relationship::from)
            .ok_or_else(|| StorageError::Other("No relationship created".to_string()))
    }

    /// Get a relationship by its ID
    async fn get_relationship(&self, id: &str) -> Result<Option<Relationship>, StorageError> {
        let relationship: Option<SurrealRelationship> = self
            .client
            .select(("relationship", id))
            .await
            .map_err(|e| StorageError::Query(format!("Failed to get relationship: {}", e)))?;

        Ok(relationship.map(Relationship::from))
    }

    /// Update an existing relationship
    async fn update_relationship(
        &self,
        relationship: Relationship,
    ) -> Result<Relationship, StorageError> {
        // MERGE updates the given fields while preserving created_at
        let merge_query = r#"
            UPDATE $record_id MERGE {
                relation_type: $relation_type,
                description: $description,
                is_approved: $is_approved,
                updated_by: $updated_by,
                approved_by: $approved_by,
                updated_at: time::now()
            }
        "#;

        let mut response = self
            .client
            .query(merge_query)
            .bind((
                "record_id",
                RecordId::from(("relationship", relationship.id.as_str())),
            ))
            .bind(("relation_type", relationship.relation_type))
            .bind(("description", relationship.description.clone()))
            .bind(("is_approved", relationship.is_approved))
            .bind(("updated_by", relationship.updated_by.clone()))
            .bind(("approved_by", relationship.approved_by.clone()))
            .await
            .map_err(|e| StorageError::Query(format!("Failed to update relationship: {}", e)))?;

        let updated: Option<SurrealRelationship> = response.take(0).map_err(|e| {
            StorageError::Query(format!("Failed to extract updated relationship: {}", e))
        })?;

        updated.map(Relationship::from).ok_or_else(|| {
            StorageError::NotFound(format!(
                "Relationship with id {} not found",
                relationship.id
            ))
        })
    }

    /// Delete a relationship by its ID
    async fn delete_relationship(&self, id: &str) -> Result<bool, StorageError> {
        let deleted: Option<SurrealRelationship> = self
            .client
            .delete(("relationship", id))
            .await
            .map_err(|e| StorageError::Query(format!("Failed to delete relationship: {}", e)))?;

        Ok(deleted.is_some())
    }

    /// List relationships with optional filtering
    async fn list_relationships(
        &self,
        filter: Option<RelationshipFilter>,
        limit: Option<usize>,
        offset: Option<usize>,
    ) -> Result<Vec<Relationship>, StorageError> {
        // If no filters, use simple SDK select
        if filter.is_none() && limit.is_none() && offset.is_none() {
            let relationships: Vec<SurrealRelationship> =
                self.client.select("relationship").await.map_err(|e| {
                    StorageError::Query(format!("Failed to list relationships: {}", e))
                })?;

            return Ok(relationships.into_iter().map(Relationship::from).collect());
        }

        // For complex filtering, use raw queries
        let mut query = "SELECT * FROM relationship".to_string();
        let mut conditions = Vec::new();

        if let Some(f) = &filter {
            if let Some(ids) = &f.ids {
                if !ids.is_empty() {
                    let id_list = ids
                        .iter()
                        .map(|id| format!("relationship:{}", id))
                        .collect::<Vec<_>>()
                        .join(", ");
                    conditions.push(format!("id IN [{}]", id_list));
                }
            }

            if let Some(relation_type) = &f.relation_type {
                conditions.push(format!("relation_type = '{}'", relation_type));
            }

            if let Some(person_a) = &f.person_a {
                conditions.push(format!("person_a = '{}'", person_a));
            }

            if let Some(person_b) = &f.person_b {
                conditions.push(format!("person_b = '{}'", person_b));
            }

            if let Some(person) = &f.person {
                conditions.push(format!(
                    "(person_a = '{}' OR person_b = '{}')",
                    person, person
                ));
            }

            if let Some(is_approved) = &f.is_approved {
                conditions.push(format!("is_approved = {}", is_approved));
            }

            if let Some(created_after) = &f.created_after {
                conditions.push(format!("created_at > d'{}'", created_after.to_rfc3339()));
            }

            if let Some(created_before) = &f.created_before {
                conditions.push(format!("created_at < d'{}'", created_before.to_rfc3339()));
            }
        }

        if !conditions.is_empty() {
            query.push_str(&format!(" WHERE {}", conditions.join(" AND ")));
        }

        if let Some(limit_val) = limit {
            query.push_str(&format!(" LIMIT {}", limit_val));
        }

        if let Some(offset_val) = offset {
            query.push_str(&format!(" START {}", offset_val));
        }

        let mut response = self
            .client
            .query(&query)
            .await
            .map_err(|e| StorageError::Query(format!("Failed to list relationships: {}", e)))?;

        let relationships: Vec<SurrealRelationship> = response
            .take(0)
            .map_err(|e| StorageError::Query(format!("Failed to extract relationships: {}", e)))?;

        Ok(relationships.into_iter().map(Relationship::from).collect())
    }

    /// Count relationships with optional filtering
    async fn count_relationships(
        &self,
        filter: Option<RelationshipFilter>,
    ) -> Result<usize, StorageError> {
        let relationships = self.list_relationships(filter, None, None).await?;
        Ok(relationships.len())
    }

    /// Get the edge for an ordered (person_a, person_b) pair, if any
    async fn get_relationship_by_pair(
        &self,
        person_a: &str,
        person_b: &str,
    ) -> Result<Option<Relationship>, StorageError> {
        let query = r#"
            SELECT * FROM relationship
            WHERE person_a = $person_a AND person_b = $person_b
            LIMIT 1
        "#;

        let person_a = person_a.to_string();
        let person_b = person_b.to_string();

        let mut response = self
            .client
            .query(query)
            .bind(("person_a", person_a))
            .bind(("person_b", person_b))
            .await
            .map_err(|e| {
                StorageError::Query(format!("Failed to get relationship by pair: {}", e))
            })?;

        let relationships: Vec<SurrealRelationship> = response
            .take(0)
            .map_err(|e| StorageError::Query(format!("Failed to extract relationship: {}", e)))?;

        Ok(relationships.into_iter().next().map(Relationship::from))
    }

    /// Delete every edge touching a person on either side
    async fn delete_relationships_for_person(
        &self,
        person_id: &str,
    ) -> Result<usize, StorageError> {
        let query = r#"
            DELETE FROM relationship
            WHERE person_a = $person OR person_b = $person
            RETURN BEFORE
        "#;

        let person = person_id.to_string();

        let mut response = self
            .client
            .query(query)
            .bind(("person", person))
            .await
            .map_err(|e| {
                StorageError::Query(format!("Failed to delete relationships for person: {}", e))
            })?;

        let deleted: Vec<SurrealRelationship> = response.take(0).map_err(|e| {
            StorageError::Query(format!("Failed to extract deleted relationships: {}", e))
        })?;

        Ok(deleted.len())
    }
}
