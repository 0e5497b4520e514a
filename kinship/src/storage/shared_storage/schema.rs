//! Schema initialization and management for SharedStorage

use surrealdb::{Connection, Surreal};

use crate::storage::errors::StorageError;

/// Initialize the SharedStorage schema with the registry tables
pub async fn initialize_schema<C>(client: &Surreal<C>) -> Result<(), StorageError>
where
    C: Connection,
{
    // Person records
    let person_table_query = r#"
        DEFINE TABLE person SCHEMALESS
        COMMENT "Stores registered community members";

        DEFINE FIELD id ON person TYPE record<person>;
        DEFINE FIELD full_name ON person TYPE string ASSERT $value != NONE;
        DEFINE FIELD gender ON person TYPE string;
        DEFINE FIELD profile ON person TYPE object DEFAULT {};
        DEFINE FIELD created_at ON person TYPE datetime DEFAULT time::now();
        DEFINE FIELD updated_at ON person TYPE datetime DEFAULT time::now() VALUE time::now();

        DEFINE INDEX person_name_idx ON person FIELDS full_name;
        DEFINE INDEX person_created_at_idx ON person FIELDS created_at;
    "#;

    // Relationship edges. The unique pair index is the backstop for the
    // synchronizer's duplicate pre-check.
    let relationship_table_query = r#"
        DEFINE TABLE relationship SCHEMALESS
        COMMENT "Stores directed kinship edges between persons";

        DEFINE FIELD id ON relationship TYPE record<relationship>;
        DEFINE FIELD person_a ON relationship TYPE string ASSERT $value != NONE;
        DEFINE FIELD person_b ON relationship TYPE string ASSERT $value != NONE;
        DEFINE FIELD relation_type ON relationship TYPE string ASSERT $value != NONE;
        DEFINE FIELD description ON relationship TYPE option<string>;
        DEFINE FIELD is_approved ON relationship TYPE bool DEFAULT false;
        DEFINE FIELD created_by ON relationship TYPE string;
        DEFINE FIELD updated_by ON relationship TYPE option<string>;
        DEFINE FIELD approved_by ON relationship TYPE option<string>;
        DEFINE FIELD created_at ON relationship TYPE datetime DEFAULT time::now();
        DEFINE FIELD updated_at ON relationship TYPE datetime DEFAULT time::now() VALUE time::now();

        DEFINE INDEX relationship_pair_idx ON relationship FIELDS person_a, person_b UNIQUE;
        DEFINE INDEX relationship_person_a_idx ON relationship FIELDS person_a;
        DEFINE INDEX relationship_person_b_idx ON relationship FIELDS person_b;
        DEFINE INDEX relationship_type_idx ON relationship FIELDS relation_type;
        DEFINE INDEX relationship_approved_idx ON relationship FIELDS is_approved;
    "#;

    execute_schema_query(client, person_table_query, "person table").await?;
    execute_schema_query(client, relationship_table_query, "relationship table").await?;

    tracing::debug!("Registry schema initialized");
    Ok(())
}

/// Execute a schema query, mapping failures to a storage error
async fn execute_schema_query<C>(
    client: &Surreal<C>,
    query: &str,
    description: &str,
) -> Result<(), StorageError>
where
    C: Connection,
{
    client.query(query).await.map_err(|e| {
        StorageError::Query(format!("Failed to initialize {}: {}", description, e))
    })?;
    Ok(())
}
