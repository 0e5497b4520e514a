//! Person storage implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use surrealdb::{Connection, RecordId};

use super::base::{SharedStorage, record_key_to_string};
use crate::models::{Gender, Person};
use crate::storage::errors::StorageError;
use crate::storage::filters::PersonFilter;
use crate::storage::traits::PersonStore;

/// Internal representation of a Person record for SurrealDB
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
struct SurrealPerson {
    id: RecordId,
    full_name: String,
    gender: Gender,
    profile: Value,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Struct for creating persons (timestamps handled by SurrealDB)
#[derive(Debug, Clone, serde::Serialize)]
struct CreatePerson {
    full_name: String,
    gender: Gender,
    profile: Value,
}

impl From<SurrealPerson> for Person {
    fn from(record: SurrealPerson) -> Self {
        Self {
            id: record_key_to_string(&record.id),
            full_name: record.full_name,
            gender: record.gender,
            profile: record.profile,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

#[async_trait]
impl<C> PersonStore for SharedStorage<C>
where
    C: Connection + Clone + Send + Sync + std::fmt::Debug + 'static,
{
    /// Create a new person
    async fn create_person(&self, person: Person) -> Result<Person, StorageError> {
        let create_person = CreatePerson {
            full_name: person.full_name.clone(),
            gender: person.gender,
            profile: person.profile.clone(),
        };

        let created: Option<SurrealPerson> = self
            .client
            .create(("person", person.id.as_str()))
            .content(create_person)
            .await
            .map_err(|e| StorageError::Query(format!("Failed to create person: {}", e)))?;

        created
            .map(Person::from)
            .ok_or_else(|| StorageError::Other("No person created".to_string()))
    }

    /// Get a person by their ID
    async fn get_person(&self, id: &str) -> Result<Option<Person>, StorageError> {
        let person: Option<SurrealPerson> = self
            .client
            .select(("person", id))
            .await
            .map_err(|e| StorageError::Query(format!("Failed to get person: {}", e)))?;

        Ok(person.map(Person::from))
    }

    /// Update an existing person
    async fn update_person(&self, person: Person) -> Result<Person, StorageError> {
        // MERGE updates the given fields while preserving created_at
        let merge_query = r#"
            UPDATE $record_id MERGE {
                full_name: $full_name,
                gender: $gender,
                profile: $profile,
                updated_at: time::now()
            }
        "#;

        let mut response = self
            .client
            .query(merge_query)
            .bind(("record_id", RecordId::from(("person", person.id.as_str()))))
            .bind(("full_name", person.full_name.clone()))
            .bind(("gender", person.gender))
            .bind(("profile", person.profile.clone()))
            .await
            .map_err(|e| StorageError::Query(format!("Failed to update person: {}", e)))?;

        let updated: Option<SurrealPerson> = response
            .take(0)
            .map_err(|e| StorageError::Query(format!("Failed to extract updated person: {}", e)))?;

        updated
            .map(Person::from)
            .ok_or_else(|| StorageError::NotFound(format!("Person with id {} not found", person.id)))
    }

    /// Delete a person by their ID
    async fn delete_person(&self, id: &str) -> Result<bool, StorageError> {
        let deleted: Option<SurrealPerson> = self
            .client
            .delete(("person", id))
            .await
            .map_err(|e| StorageError::Query(format!("Failed to delete person: {}", e)))?;

        Ok(deleted.is_some())
    }

    /// List persons with optional filtering
    async fn list_persons(
        &self,
        filter: Option<PersonFilter>,
        limit: Option<usize>,
        offset: Option<usize>,
    ) -> Result<Vec<Person>, StorageError> {
        // If no filters, use simple SDK select
        if filter.is_none() && limit.is_none() && offset.is_none() {
            let persons: Vec<SurrealPerson> = self
                .client
                .select("person")
                .await
                .map_err(|e| StorageError::Query(format!("Failed to list persons: {}", e)))?;

            return Ok(persons.into_iter().map(Person::from).collect());
        }

        // For complex filtering, use raw queries
        let mut query = "SELECT * FROM person".to_string();
        let mut conditions = Vec::new();

        if let Some(f) = &filter {
            if let Some(ids) = &f.ids {
                if !ids.is_empty() {
                    let id_list = ids
                        .iter()
                        .map(|id| format!("person:{}", id))
                        .collect::<Vec<_>>()
                        .join(", ");
                    conditions.push(format!("id IN [{}]", id_list));
                }
            }

            if let Some(gender) = &f.gender {
                conditions.push(format!("gender = '{}'", gender));
            }

            if let Some(name) = &f.name_contains {
                let needle = name.to_lowercase().replace('\'', "");
                conditions.push(format!(
                    "string::contains(string::lowercase(full_name), '{}')",
                    needle
                ));
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
            .map_err(|e| StorageError::Query(format!("Failed to list persons: {}", e)))?;

        let persons: Vec<SurrealPerson> = response
            .take(0)
            .map_err(|e| StorageError::Query(format!("Failed to extract persons: {}", e)))?;

        Ok(persons.into_iter().map(Person::from).collect())
    }

    /// Count persons with optional filtering
    async fn count_persons(&self, filter: Option<PersonFilter>) -> Result<usize, StorageError> {
        let persons = self.list_persons(filter, None, None).await?;
        Ok(persons.len())
    }
}
