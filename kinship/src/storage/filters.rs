//! Filter types for storage queries

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Gender, RelationType};

/// Filter for person queries
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PersonFilter {
    /// Filter by person IDs
    pub ids: Option<Vec<String>>,

    /// Filter by gender
    pub gender: Option<Gender>,

    /// Filter by name (substring match, case-insensitive)
    pub name_contains: Option<String>,

    /// Filter by creation date range
    pub created_after: Option<DateTime<Utc>>,
    pub created_before: Option<DateTime<Utc>>,
}

/// Filter for relationship queries
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RelationshipFilter {
    /// Filter by relationship IDs
    pub ids: Option<Vec<String>>,

    /// Filter by relation type
    pub relation_type: Option<RelationType>,

    /// Filter by the person the edge belongs to
    pub person_a: Option<String>,

    /// Filter by the related person
    pub person_b: Option<String>,

    /// Filter by edges touching a person on either side
    pub person: Option<String>,

    /// Filter by approval state
    pub is_approved: Option<bool>,

    /// Filter by creation date range
    pub created_after: Option<DateTime<Utc>>,
    pub created_before: Option<DateTime<Utc>>,
}

/// Helper functions for constructing filters
pub mod helpers {
    use super::*;

    /// Filter relationships by type
    pub fn relationship_by_type(relation_type: RelationType) -> RelationshipFilter {
        RelationshipFilter {
            relation_type: Some(relation_type),
            ..Default::default()
        }
    }

    /// Filter relationships belonging to a person (forward side)
    pub fn relationships_of(person_id: &str) -> RelationshipFilter {
        RelationshipFilter {
            person_a: Some(person_id.to_string()),
            ..Default::default()
        }
    }

    /// Filter relationships touching a person on either side
    pub fn relationships_touching(person_id: &str) -> RelationshipFilter {
        RelationshipFilter {
            person: Some(person_id.to_string()),
            ..Default::default()
        }
    }
}
