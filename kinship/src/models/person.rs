//! Person records and gender markers

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Gender marker attached to a person record.
///
/// Used by the inverse-type resolver's callers; relationship inverses are
/// currently resolved with a gender-blind default policy, so this is carried
/// through but does not change the mapping today.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => write!(f, "male"),
            Gender::Female => write!(f, "female"),
            Gender::Other => write!(f, "other"),
        }
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "male" | "m" => Ok(Gender::Male),
            "female" | "f" => Ok(Gender::Female),
            "other" => Ok(Gender::Other),
            _ => Err(format!("Invalid gender: {}", s)),
        }
    }
}

/// A registered community member
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Person {
    /// Unique identifier for the person
    pub id: String,

    /// Display name
    pub full_name: String,

    /// Gender marker
    pub gender: Gender,

    /// Free-form profile attributes (hometown, occupation, ...)
    pub profile: serde_json::Value,

    /// When the record was created
    pub created_at: DateTime<Utc>,

    /// When the record was last updated
    pub updated_at: DateTime<Utc>,
}

impl Person {
    /// Create a new person with a generated id and empty profile
    pub fn new(full_name: impl Into<String>, gender: Gender) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            full_name: full_name.into(),
            gender,
            profile: serde_json::json!({}),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gender_parses_case_insensitively() {
        assert_eq!("Male".parse::<Gender>().unwrap(), Gender::Male);
        assert_eq!("f".parse::<Gender>().unwrap(), Gender::Female);
        assert!("unknown".parse::<Gender>().is_err());
    }

    #[test]
    fn new_person_gets_distinct_ids() {
        let a = Person::new("Asha", Gender::Female);
        let b = Person::new("Asha", Gender::Female);
        assert_ne!(a.id, b.id);
    }
}
