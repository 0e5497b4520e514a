//! Relationship synchronizer
//!
//! All relationship writes go through here. Every declared relationship is
//! stored as two directed edges (forward and reverse), and this module keeps
//! the two aligned across creates, updates, approvals, and deletes.
//!
//! The paired writes are sequential, not transactional. A crash between the
//! forward and reverse write leaves a lone edge; the operations below
//! tolerate a missing or pre-existing counterpart instead of failing.

use std::fmt;
use std::sync::Arc;

use crate::models::{MAX_DESCRIPTION_LENGTH, RelationType, Relationship};
use crate::relations::resolver::resolve_inverse;
use crate::storage::RegistryStore;
use crate::{KinshipError, Result};

/// Role a caller acts under
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Member,
    Moderator,
    Admin,
}

impl Role {
    /// Whether the role can act on edges it is not a party to and approve edges
    pub fn is_elevated(&self) -> bool {
        matches!(self, Role::Moderator | Role::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Member => write!(f, "member"),
            Role::Moderator => write!(f, "moderator"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

/// The identity an operation is performed as
#[derive(Debug, Clone)]
pub struct Caller {
    /// Member id of the caller
    pub id: String,

    /// Role the caller acts under
    pub role: Role,
}

impl Caller {
    pub fn new(id: impl Into<String>, role: Role) -> Self {
        Self {
            id: id.into(),
            role,
        }
    }

    /// Whether the caller may modify `edge`: either party to the
    /// relationship may, as may elevated roles.
    fn may_modify(&self, edge: &Relationship) -> bool {
        self.id == edge.person_a || self.id == edge.person_b || self.role.is_elevated()
    }
}

/// Requested changes to an existing edge
///
/// `None` leaves a field untouched. For the description the inner option
/// distinguishes setting a new text from clearing it.
#[derive(Debug, Clone, Default)]
pub struct EdgeChanges {
    pub relation_type: Option<RelationType>,
    pub description: Option<Option<String>>,
}

impl EdgeChanges {
    /// Change the relation type
    pub fn relation_type(mut self, relation_type: RelationType) -> Self {
        self.relation_type = Some(relation_type);
        self
    }

    /// Replace the description
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(Some(description.into()));
        self
    }

    /// Clear the description
    pub fn clear_description(mut self) -> Self {
        self.description = Some(None);
        self
    }
}

/// Writes forward/reverse edge pairs and keeps them consistent
#[derive(Clone)]
pub struct RelationshipSynchronizer {
    storage: Arc<dyn RegistryStore>,
}

impl RelationshipSynchronizer {
    pub fn new(storage: Arc<dyn RegistryStore>) -> Self {
        Self { storage }
    }

    /// Create a relationship pair.
    ///
    /// Writes the forward edge ("person_b is `relation_type` of person_a")
    /// and the resolved reverse edge, and returns both edge ids. If a reverse
    /// edge already exists for the (person_b, person_a) pair it is left as it
    /// is and its id is returned.
    pub async fn create_pair(
        &self,
        person_a: &str,
        person_b: &str,
        relation_type: RelationType,
        description: Option<String>,
        caller: &Caller,
    ) -> Result<(String, String)> {
        if person_a == person_b {
            return Err(KinshipError::SelfRelationship);
        }
        validate_description(description.as_deref())?;

        let subject = self
            .storage
            .get_person(person_a)
            .await?
            .ok_or_else(|| KinshipError::NotFound(format!("Person {} not found", person_a)))?;
        self.storage
            .get_person(person_b)
            .await?
            .ok_or_else(|| KinshipError::NotFound(format!("Person {} not found", person_b)))?;

        // Pre-check before insert; the unique pair index backstops races
        if self
            .storage
            .get_relationship_by_pair(person_a, person_b)
            .await?
            .is_some()
        {
            return Err(KinshipError::DuplicateEdge(format!(
                "A relationship between {} and {} already exists",
                person_a, person_b
            )));
        }

        let mut forward = Relationship::new(person_a, person_b, relation_type, &caller.id);
        forward.description = description.clone();
        let forward = self.storage.create_relationship(forward).await?;

        tracing::info!(
            edge_id = %forward.id,
            person_a = %person_a,
            person_b = %person_b,
            relation_type = %relation_type,
            "Created forward edge"
        );

        // The reverse edge describes person_a from person_b's point of view
        let inverse_type = resolve_inverse(relation_type, Some(subject.gender));

        let reverse_id = match self
            .storage
            .get_relationship_by_pair(person_b, person_a)
            .await?
        {
            Some(existing) => {
                tracing::warn!(
                    edge_id = %existing.id,
                    person_a = %person_b,
                    person_b = %person_a,
                    "Reverse edge already exists, leaving it unchanged"
                );
                existing.id
            }
            None => {
                let mut reverse = Relationship::new(person_b, person_a, inverse_type, &caller.id);
                reverse.description = description;
                let reverse = self.storage.create_relationship(reverse).await?;

                tracing::info!(
                    edge_id = %reverse.id,
                    relation_type = %inverse_type,
                    "Created reverse edge"
                );
                reverse.id
            }
        };

        Ok((forward.id, reverse_id))
    }

    /// Update an edge and keep its counterpart aligned.
    ///
    /// A relation type change recomputes the inverse and rewrites the reverse
    /// edge, carrying a provided description along with it. A missing reverse
    /// edge (from a past partial failure) does not fail the update.
    pub async fn update_pair(
        &self,
        edge_id: &str,
        changes: EdgeChanges,
        caller: &Caller,
    ) -> Result<Relationship> {
        let mut edge = self
            .storage
            .get_relationship(edge_id)
            .await?
            .ok_or_else(|| KinshipError::NotFound(format!("Relationship {} not found", edge_id)))?;

        if !caller.may_modify(&edge) {
            return Err(KinshipError::Forbidden(format!(
                "Caller {} may not modify relationship {}",
                caller.id, edge_id
            )));
        }

        if let Some(description) = &changes.description {
            validate_description(description.as_deref())?;
            edge.description = description.clone();
        }

        let type_changed = match changes.relation_type {
            Some(new_type) if new_type != edge.relation_type => {
                edge.relation_type = new_type;
                true
            }
            _ => false,
        };
        edge.updated_by = Some(caller.id.clone());

        let updated = self.storage.update_relationship(edge).await?;

        if type_changed {
            let gender = self
                .storage
                .get_person(&updated.person_a)
                .await?
                .map(|p| p.gender);
            let inverse_type = resolve_inverse(updated.relation_type, gender);

            match self
                .storage
                .get_relationship_by_pair(&updated.person_b, &updated.person_a)
                .await?
            {
                Some(mut reverse) => {
                    reverse.relation_type = inverse_type;
                    if let Some(description) = &changes.description {
                        reverse.description = description.clone();
                    }
                    reverse.updated_by = Some(caller.id.clone());
                    self.storage.update_relationship(reverse).await?;
                }
                None => {
                    tracing::debug!(
                        edge_id = %updated.id,
                        "No reverse edge to realign"
                    );
                }
            }
        }

        Ok(updated)
    }

    /// Delete an edge together with its counterpart.
    ///
    /// The reverse edge being absent already is not an error.
    pub async fn delete_pair(&self, edge_id: &str, caller: &Caller) -> Result<()> {
        let edge = self
            .storage
            .get_relationship(edge_id)
            .await?
            .ok_or_else(|| KinshipError::NotFound(format!("Relationship {} not found", edge_id)))?;

        if !caller.may_modify(&edge) {
            return Err(KinshipError::Forbidden(format!(
                "Caller {} may not delete relationship {}",
                caller.id, edge_id
            )));
        }

        self.storage.delete_relationship(&edge.id).await?;

        if let Some(reverse) = self
            .storage
            .get_relationship_by_pair(&edge.person_b, &edge.person_a)
            .await?
        {
            self.storage.delete_relationship(&reverse.id).await?;
        }

        tracing::info!(edge_id = %edge_id, "Deleted relationship pair");
        Ok(())
    }

    /// Approve both sides of a relationship pair.
    ///
    /// Only elevated roles may approve.
    pub async fn approve_pair(&self, edge_id: &str, caller: &Caller) -> Result<Relationship> {
        if !caller.role.is_elevated() {
            return Err(KinshipError::Forbidden(format!(
                "Role {} may not approve relationships",
                caller.role
            )));
        }

        let mut edge = self
            .storage
            .get_relationship(edge_id)
            .await?
            .ok_or_else(|| KinshipError::NotFound(format!("Relationship {} not found", edge_id)))?;

        edge.is_approved = true;
        edge.approved_by = Some(caller.id.clone());
        edge.updated_by = Some(caller.id.clone());
        let approved = self.storage.update_relationship(edge).await?;

        if let Some(mut reverse) = self
            .storage
            .get_relationship_by_pair(&approved.person_b, &approved.person_a)
            .await?
        {
            reverse.is_approved = true;
            reverse.approved_by = Some(caller.id.clone());
            reverse.updated_by = Some(caller.id.clone());
            self.storage.update_relationship(reverse).await?;
        }

        tracing::info!(edge_id = %edge_id, approved_by = %caller.id, "Approved relationship pair");
        Ok(approved)
    }

    /// Remove every edge touching a person.
    ///
    /// Called when a person record is deleted so no dangling edges survive.
    /// Returns the number of edges removed.
    pub async fn remove_person_edges(&self, person_id: &str) -> Result<usize> {
        let removed = self
            .storage
            .delete_relationships_for_person(person_id)
            .await?;

        if removed > 0 {
            tracing::info!(person_id = %person_id, removed, "Removed edges for deleted person");
        }
        Ok(removed)
    }
}

fn validate_description(description: Option<&str>) -> Result<()> {
    if let Some(text) = description {
        if text.chars().count() > MAX_DESCRIPTION_LENGTH {
            return Err(KinshipError::Validation(format!(
                "Description exceeds {} characters",
                MAX_DESCRIPTION_LENGTH
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elevated_roles() {
        assert!(!Role::Member.is_elevated());
        assert!(Role::Moderator.is_elevated());
        assert!(Role::Admin.is_elevated());
    }

    #[test]
    fn parties_and_elevated_roles_may_modify_edges() {
        let edge = Relationship::new("alice", "bob", RelationType::Spouse, "registrar");

        // Both parties may act on the edge, whoever recorded it
        assert!(Caller::new("alice", Role::Member).may_modify(&edge));
        assert!(Caller::new("bob", Role::Member).may_modify(&edge));

        // A non-party creator holds no standing rights
        assert!(!Caller::new("registrar", Role::Member).may_modify(&edge));
        assert!(!Caller::new("dave", Role::Member).may_modify(&edge));

        assert!(Caller::new("carol", Role::Moderator).may_modify(&edge));
    }

    #[test]
    fn description_validation_counts_characters() {
        assert!(validate_description(None).is_ok());
        assert!(validate_description(Some(&"x".repeat(500))).is_ok());
        assert!(validate_description(Some(&"x".repeat(501))).is_err());
    }
}
