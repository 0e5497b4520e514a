//! Relationship records and the relation-type vocabulary

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::KinshipError;

/// Maximum length of a relationship description
pub const MAX_DESCRIPTION_LENGTH: usize = 500;

/// The closed vocabulary of kinship relation types.
///
/// Multi-word variants serialize with a space ("Grand Father") to match the
/// labels shown to members.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum RelationType {
    Father,
    Mother,
    Spouse,
    Son,
    Daughter,
    #[serde(rename = "Older Sibling")]
    OlderSibling,
    #[serde(rename = "Younger Sibling")]
    YoungerSibling,
    Brother,
    Sister,
    #[serde(rename = "Grand Father")]
    GrandFather,
    #[serde(rename = "Grand Mother")]
    GrandMother,
    Uncle,
    Aunt,
    Cousin,
    Nephew,
    Niece,
    Other,
}

impl RelationType {
    /// Every recognized relation type, in display order
    pub const ALL: [RelationType; 17] = [
        RelationType::Father,
        RelationType::Mother,
        RelationType::Spouse,
        RelationType::Son,
        RelationType::Daughter,
        RelationType::OlderSibling,
        RelationType::YoungerSibling,
        RelationType::Brother,
        RelationType::Sister,
        RelationType::GrandFather,
        RelationType::GrandMother,
        RelationType::Uncle,
        RelationType::Aunt,
        RelationType::Cousin,
        RelationType::Nephew,
        RelationType::Niece,
        RelationType::Other,
    ];

    /// The label stored and displayed for this relation type
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationType::Father => "Father",
            RelationType::Mother => "Mother",
            RelationType::Spouse => "Spouse",
            RelationType::Son => "Son",
            RelationType::Daughter => "Daughter",
            RelationType::OlderSibling => "Older Sibling",
            RelationType::YoungerSibling => "Younger Sibling",
            RelationType::Brother => "Brother",
            RelationType::Sister => "Sister",
            RelationType::GrandFather => "Grand Father",
            RelationType::GrandMother => "Grand Mother",
            RelationType::Uncle => "Uncle",
            RelationType::Aunt => "Aunt",
            RelationType::Cousin => "Cousin",
            RelationType::Nephew => "Nephew",
            RelationType::Niece => "Niece",
            RelationType::Other => "Other",
        }
    }

    /// Parse a label, falling back to `Other` for unrecognized input.
    ///
    /// The strict path is `FromStr`; this lenient variant is for boundaries
    /// that must accept whatever label arrives and still produce a record.
    pub fn from_str_lenient(s: &str) -> Self {
        match s.parse() {
            Ok(t) => t,
            Err(_) => {
                tracing::warn!(label = %s, "Unrecognized relation type, treating as Other");
                RelationType::Other
            }
        }
    }
}

impl fmt::Display for RelationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RelationType {
    type Err = KinshipError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RelationType::ALL
            .iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .copied()
            .ok_or_else(|| KinshipError::UnknownRelationType(s.to_string()))
    }
}

/// One directed edge of a kinship pair.
///
/// Every edge states how `person_b` relates to `person_a`: a `Father` edge
/// reads "person_b is the Father of person_a". Edges are written in pairs by
/// the synchronizer; a lone edge indicates a past partial failure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Relationship {
    /// Unique identifier for the edge
    pub id: String,

    /// The person this edge belongs to (the "about" side)
    pub person_a: String,

    /// The related person
    pub person_b: String,

    /// How person_b relates to person_a
    pub relation_type: RelationType,

    /// Optional free-text note, at most [`MAX_DESCRIPTION_LENGTH`] characters
    pub description: Option<String>,

    /// Whether a moderator has approved this edge
    pub is_approved: bool,

    /// Member who created the edge
    pub created_by: String,

    /// Member who last modified the edge
    pub updated_by: Option<String>,

    /// Moderator who approved the edge
    pub approved_by: Option<String>,

    /// When the edge was created
    pub created_at: DateTime<Utc>,

    /// When the edge was last updated
    pub updated_at: DateTime<Utc>,
}

impl Relationship {
    /// Create a new unapproved edge with a generated id
    pub fn new(
        person_a: impl Into<String>,
        person_b: impl Into<String>,
        relation_type: RelationType,
        created_by: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            person_a: person_a.into(),
            person_b: person_b.into(),
            relation_type,
            description: None,
            is_approved: false,
            created_by: created_by.into(),
            updated_by: None,
            approved_by: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    /// Attach a description to the edge
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
