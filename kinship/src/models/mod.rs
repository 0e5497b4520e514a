//! Domain models for the kinship registry

pub mod person;
pub mod relationship;

pub use person::{Gender, Person};
pub use relationship::{MAX_DESCRIPTION_LENGTH, RelationType, Relationship};
