//! Data Transfer Objects for the API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use kinship::models::{Person, Relationship};

/// Person DTO for API responses
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PersonDto {
    /// Unique identifier for the person
    pub id: String,

    /// Full name of the person
    pub full_name: String,

    /// Gender (male, female, or other)
    pub gender: String,

    /// Free-form profile data as arbitrary JSON
    pub profile: serde_json::Value,

    /// When the record was created
    pub created_at: DateTime<Utc>,

    /// When the record was last updated
    pub updated_at: DateTime<Utc>,
}

impl From<Person> for PersonDto {
    fn from(person: Person) -> Self {
        Self {
            id: person.id,
            full_name: person.full_name,
            gender: person.gender.to_string(),
            profile: person.profile,
            created_at: person.created_at,
            updated_at: person.updated_at,
        }
    }
}

/// Request to register a new person
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreatePersonRequest {
    /// Full name of the person
    pub full_name: String,

    /// Gender (defaults to "other")
    #[serde(default = "default_gender")]
    pub gender: String,

    /// Free-form profile data
    #[serde(default)]
    pub profile: serde_json::Value,
}

fn default_gender() -> String {
    "other".to_string()
}

/// Request to update an existing person
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdatePersonRequest {
    /// Updated full name (optional)
    pub full_name: Option<String>,

    /// Updated gender (optional)
    pub gender: Option<String>,

    /// Updated profile data (optional)
    pub profile: Option<serde_json::Value>,
}

/// Relationship edge DTO for API responses
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RelationshipDto {
    /// Unique identifier for the edge
    pub id: String,

    /// The subject of the edge
    pub person_a: String,

    /// The person the relation statement describes
    pub person_b: String,

    /// Relation type label (e.g. "Father", "Older Sibling")
    pub relation_type: String,

    /// Optional free-text description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Whether the edge has been approved by a moderator
    pub is_approved: bool,

    /// Member who declared the relationship
    pub created_by: String,

    /// Member who last changed the edge
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<String>,

    /// Moderator who approved the edge
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved_by: Option<String>,

    /// When the edge was created
    pub created_at: DateTime<Utc>,

    /// When the edge was last updated
    pub updated_at: DateTime<Utc>,
}

impl From<Relationship> for RelationshipDto {
    fn from(edge: Relationship) -> Self {
        Self {
            id: edge.id,
            person_a: edge.person_a,
            person_b: edge.person_b,
            relation_type: edge.relation_type.as_str().to_string(),
            description: edge.description,
            is_approved: edge.is_approved,
            created_by: edge.created_by,
            updated_by: edge.updated_by,
            approved_by: edge.approved_by,
            created_at: edge.created_at,
            updated_at: edge.updated_at,
        }
    }
}

/// Both edges written for a declared relationship
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RelationshipPairDto {
    /// The declared forward edge
    pub forward: RelationshipDto,

    /// The derived reverse edge
    pub reverse: RelationshipDto,
}

/// Request to declare a new relationship
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateRelationshipRequest {
    /// The subject person id
    pub person_a: String,

    /// The related person id
    pub person_b: String,

    /// Relation type label (e.g. "Father", "Spouse")
    pub relation_type: String,

    /// Optional free-text description
    pub description: Option<String>,
}

/// Request to update an existing relationship edge
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateRelationshipRequest {
    /// Updated relation type label (optional)
    pub relation_type: Option<String>,

    /// Updated description (optional)
    pub description: Option<String>,

    /// Clear the description entirely
    #[serde(default)]
    pub clear_description: bool,
}
