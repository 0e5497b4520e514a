//! Integration tests for the relationship synchronizer
//!
//! Every declared relationship must produce a forward edge and the resolved
//! reverse edge, and the pair must stay aligned across updates, approvals,
//! and deletes. These tests run the full registry against an in-memory
//! SurrealDB engine.

use kinship::config::ConfigBuilder;
use kinship::models::{Gender, Person, RelationType};
use kinship::registry::Registry;
use kinship::relations::{Caller, EdgeChanges, Role};
use kinship::KinshipError;

async fn create_test_registry() -> Registry {
    let config = ConfigBuilder::new()
        .with_memory_storage()
        .build()
        .expect("Failed to build config");
    kinship::init(config)
        .await
        .expect("Failed to initialize registry")
}

async fn add_person(registry: &Registry, name: &str, gender: Gender) -> Person {
    registry
        .create_person(Person::new(name, gender))
        .await
        .expect("Failed to create person")
}

#[tokio::test]
async fn create_pair_writes_forward_and_reverse_edges() {
    let registry = create_test_registry().await;
    let alice = add_person(&registry, "Alice", Gender::Female).await;
    let bob = add_person(&registry, "Bob", Gender::Male).await;
    let caller = Caller::new(&alice.id, Role::Member);

    let (forward_id, reverse_id) = registry
        .create_pair(&alice.id, &bob.id, RelationType::Father, None, &caller)
        .await
        .expect("Failed to create pair");

    let forward = registry
        .get_relationship(&forward_id)
        .await
        .expect("Lookup failed")
        .expect("Forward edge should exist");
    assert_eq!(forward.person_a, alice.id);
    assert_eq!(forward.person_b, bob.id);
    assert_eq!(forward.relation_type, RelationType::Father);
    assert_eq!(forward.created_by, alice.id);
    assert!(!forward.is_approved);

    // Gender-blind inverse: Father inverts to Son even though Alice is female
    let reverse = registry
        .get_relationship(&reverse_id)
        .await
        .expect("Lookup failed")
        .expect("Reverse edge should exist");
    assert_eq!(reverse.person_a, bob.id);
    assert_eq!(reverse.person_b, alice.id);
    assert_eq!(reverse.relation_type, RelationType::Son);
}

#[tokio::test]
async fn spouse_pair_is_symmetric() {
    let registry = create_test_registry().await;
    let alice = add_person(&registry, "Alice", Gender::Female).await;
    let bob = add_person(&registry, "Bob", Gender::Male).await;
    let caller = Caller::new(&alice.id, Role::Member);

    let (_, reverse_id) = registry
        .create_pair(&alice.id, &bob.id, RelationType::Spouse, None, &caller)
        .await
        .expect("Failed to create pair");

    let reverse = registry
        .get_relationship(&reverse_id)
        .await
        .expect("Lookup failed")
        .expect("Reverse edge should exist");
    assert_eq!(reverse.relation_type, RelationType::Spouse);
}

#[tokio::test]
async fn self_relationship_is_rejected() {
    let registry = create_test_registry().await;
    let alice = add_person(&registry, "Alice", Gender::Female).await;
    let caller = Caller::new(&alice.id, Role::Member);

    let result = registry
        .create_pair(&alice.id, &alice.id, RelationType::Spouse, None, &caller)
        .await;
    assert!(matches!(result, Err(KinshipError::SelfRelationship)));
}

#[tokio::test]
async fn missing_person_is_rejected() {
    let registry = create_test_registry().await;
    let alice = add_person(&registry, "Alice", Gender::Female).await;
    let caller = Caller::new(&alice.id, Role::Member);

    let result = registry
        .create_pair(&alice.id, "no_such_person", RelationType::Spouse, None, &caller)
        .await;
    assert!(matches!(result, Err(KinshipError::NotFound(_))));
}

#[tokio::test]
async fn duplicate_pair_is_rejected() {
    let registry = create_test_registry().await;
    let alice = add_person(&registry, "Alice", Gender::Female).await;
    let bob = add_person(&registry, "Bob", Gender::Male).await;
    let caller = Caller::new(&alice.id, Role::Member);

    registry
        .create_pair(&alice.id, &bob.id, RelationType::Spouse, None, &caller)
        .await
        .expect("First pair should be created");

    let result = registry
        .create_pair(&alice.id, &bob.id, RelationType::Spouse, None, &caller)
        .await;
    assert!(matches!(result, Err(KinshipError::DuplicateEdge(_))));
}

#[tokio::test]
async fn overlong_description_is_rejected() {
    let registry = create_test_registry().await;
    let alice = add_person(&registry, "Alice", Gender::Female).await;
    let bob = add_person(&registry, "Bob", Gender::Male).await;
    let caller = Caller::new(&alice.id, Role::Member);

    let result = registry
        .create_pair(
            &alice.id,
            &bob.id,
            RelationType::Spouse,
            Some("x".repeat(501)),
            &caller,
        )
        .await;
    assert!(matches!(result, Err(KinshipError::Validation(_))));
}

#[tokio::test]
async fn type_change_realigns_the_reverse_edge() {
    let registry = create_test_registry().await;
    let alice = add_person(&registry, "Alice", Gender::Female).await;
    let bob = add_person(&registry, "Bob", Gender::Male).await;
    let caller = Caller::new(&alice.id, Role::Member);

    let (forward_id, reverse_id) = registry
        .create_pair(&alice.id, &bob.id, RelationType::Father, None, &caller)
        .await
        .expect("Failed to create pair");

    let updated = registry
        .update_pair(
            &forward_id,
            EdgeChanges::default().relation_type(RelationType::Mother),
            &caller,
        )
        .await
        .expect("Failed to update pair");
    assert_eq!(updated.relation_type, RelationType::Mother);
    assert_eq!(updated.updated_by.as_deref(), Some(alice.id.as_str()));

    // Mother still inverts to Son, the reverse edge stays aligned
    let reverse = registry
        .get_relationship(&reverse_id)
        .await
        .expect("Lookup failed")
        .expect("Reverse edge should exist");
    assert_eq!(reverse.relation_type, RelationType::Son);

    // Switching to an asymmetric seniority type rewrites the reverse side
    registry
        .update_pair(
            &forward_id,
            EdgeChanges::default().relation_type(RelationType::OlderSibling),
            &caller,
        )
        .await
        .expect("Failed to update pair");

    let reverse = registry
        .get_relationship(&reverse_id)
        .await
        .expect("Lookup failed")
        .expect("Reverse edge should exist");
    assert_eq!(reverse.relation_type, RelationType::YoungerSibling);
}

#[tokio::test]
async fn description_update_leaves_reverse_untouched() {
    let registry = create_test_registry().await;
    let alice = add_person(&registry, "Alice", Gender::Female).await;
    let bob = add_person(&registry, "Bob", Gender::Male).await;
    let caller = Caller::new(&alice.id, Role::Member);

    let (forward_id, reverse_id) = registry
        .create_pair(&alice.id, &bob.id, RelationType::Uncle, None, &caller)
        .await
        .expect("Failed to create pair");

    let updated = registry
        .update_pair(
            &forward_id,
            EdgeChanges::default().description("father's younger brother"),
            &caller,
        )
        .await
        .expect("Failed to update pair");
    assert_eq!(
        updated.description.as_deref(),
        Some("father's younger brother")
    );

    let reverse = registry
        .get_relationship(&reverse_id)
        .await
        .expect("Lookup failed")
        .expect("Reverse edge should exist");
    assert_eq!(reverse.relation_type, RelationType::Nephew);
    assert!(reverse.description.is_none());
}

#[tokio::test]
async fn type_change_carries_description_to_the_reverse_edge() {
    let registry = create_test_registry().await;
    let alice = add_person(&registry, "Alice", Gender::Female).await;
    let bob = add_person(&registry, "Bob", Gender::Male).await;
    let caller = Caller::new(&alice.id, Role::Member);

    let (forward_id, reverse_id) = registry
        .create_pair(&alice.id, &bob.id, RelationType::Father, None, &caller)
        .await
        .expect("Failed to create pair");

    registry
        .update_pair(
            &forward_id,
            EdgeChanges::default()
                .relation_type(RelationType::Uncle)
                .description("corrected after review"),
            &caller,
        )
        .await
        .expect("Failed to update pair");

    let reverse = registry
        .get_relationship(&reverse_id)
        .await
        .expect("Lookup failed")
        .expect("Reverse edge should exist");
    assert_eq!(reverse.relation_type, RelationType::Nephew);
    assert_eq!(reverse.description.as_deref(), Some("corrected after review"));
}

#[tokio::test]
async fn non_parties_cannot_touch_edges() {
    let registry = create_test_registry().await;
    let alice = add_person(&registry, "Alice", Gender::Female).await;
    let bob = add_person(&registry, "Bob", Gender::Male).await;
    // Recorded by a member who is not a party to the relationship
    let registrar = Caller::new("registrar_1", Role::Member);
    let stranger = Caller::new("someone_else", Role::Member);

    let (forward_id, _) = registry
        .create_pair(&alice.id, &bob.id, RelationType::Spouse, None, &registrar)
        .await
        .expect("Failed to create pair");

    let update = registry
        .update_pair(
            &forward_id,
            EdgeChanges::default().description("nope"),
            &stranger,
        )
        .await;
    assert!(matches!(update, Err(KinshipError::Forbidden(_))));

    let delete = registry.delete_pair(&forward_id, &stranger).await;
    assert!(matches!(delete, Err(KinshipError::Forbidden(_))));

    // Recording an edge grants no standing rights over it
    let update = registry
        .update_pair(
            &forward_id,
            EdgeChanges::default().description("still nope"),
            &registrar,
        )
        .await;
    assert!(matches!(update, Err(KinshipError::Forbidden(_))));

    // A moderator can
    let moderator = Caller::new("mod_1", Role::Moderator);
    registry
        .update_pair(
            &forward_id,
            EdgeChanges::default().description("fixed by moderation"),
            &moderator,
        )
        .await
        .expect("Moderator update should succeed");
}

#[tokio::test]
async fn either_party_may_update_and_delete_the_edge() {
    let registry = create_test_registry().await;
    let alice = add_person(&registry, "Alice", Gender::Female).await;
    let bob = add_person(&registry, "Bob", Gender::Male).await;
    let declarer = Caller::new(&alice.id, Role::Member);
    // Bob is person_b on the forward edge, not its creator
    let counterpart = Caller::new(&bob.id, Role::Member);

    let (forward_id, _) = registry
        .create_pair(&alice.id, &bob.id, RelationType::Spouse, None, &declarer)
        .await
        .expect("Failed to create pair");

    let updated = registry
        .update_pair(
            &forward_id,
            EdgeChanges::default().description("married in 2019"),
            &counterpart,
        )
        .await
        .expect("The other party should be able to update the edge");
    assert_eq!(updated.description.as_deref(), Some("married in 2019"));
    assert_eq!(updated.updated_by.as_deref(), Some(bob.id.as_str()));

    registry
        .delete_pair(&forward_id, &counterpart)
        .await
        .expect("The other party should be able to delete the edge");
    assert!(
        registry
            .get_relationship(&forward_id)
            .await
            .expect("Lookup failed")
            .is_none()
    );
}

#[tokio::test]
async fn delete_pair_removes_both_edges() {
    let registry = create_test_registry().await;
    let alice = add_person(&registry, "Alice", Gender::Female).await;
    let bob = add_person(&registry, "Bob", Gender::Male).await;
    let caller = Caller::new(&alice.id, Role::Member);

    let (forward_id, reverse_id) = registry
        .create_pair(&alice.id, &bob.id, RelationType::Cousin, None, &caller)
        .await
        .expect("Failed to create pair");

    registry
        .delete_pair(&forward_id, &caller)
        .await
        .expect("Failed to delete pair");

    assert!(
        registry
            .get_relationship(&forward_id)
            .await
            .expect("Lookup failed")
            .is_none()
    );
    assert!(
        registry
            .get_relationship(&reverse_id)
            .await
            .expect("Lookup failed")
            .is_none()
    );
}

#[tokio::test]
async fn lone_edge_can_still_be_deleted() {
    let registry = create_test_registry().await;
    let alice = add_person(&registry, "Alice", Gender::Female).await;
    let bob = add_person(&registry, "Bob", Gender::Male).await;
    let caller = Caller::new(&alice.id, Role::Member);

    let (forward_id, reverse_id) = registry
        .create_pair(&alice.id, &bob.id, RelationType::Niece, None, &caller)
        .await
        .expect("Failed to create pair");

    // Simulate a past partial failure by removing the reverse edge directly
    registry
        .storage()
        .delete_relationship(&reverse_id)
        .await
        .expect("Direct delete failed");

    registry
        .delete_pair(&forward_id, &caller)
        .await
        .expect("Deleting a lone forward edge must still succeed");
    assert!(
        registry
            .get_relationship(&forward_id)
            .await
            .expect("Lookup failed")
            .is_none()
    );
}

#[tokio::test]
async fn approval_requires_an_elevated_role_and_covers_both_edges() {
    let registry = create_test_registry().await;
    let alice = add_person(&registry, "Alice", Gender::Female).await;
    let bob = add_person(&registry, "Bob", Gender::Male).await;
    let member = Caller::new(&alice.id, Role::Member);

    let (forward_id, reverse_id) = registry
        .create_pair(&alice.id, &bob.id, RelationType::GrandFather, None, &member)
        .await
        .expect("Failed to create pair");

    let denied = registry.approve_pair(&forward_id, &member).await;
    assert!(matches!(denied, Err(KinshipError::Forbidden(_))));

    let moderator = Caller::new("mod_1", Role::Moderator);
    let approved = registry
        .approve_pair(&forward_id, &moderator)
        .await
        .expect("Moderator approval should succeed");
    assert!(approved.is_approved);
    assert_eq!(approved.approved_by.as_deref(), Some("mod_1"));

    let reverse = registry
        .get_relationship(&reverse_id)
        .await
        .expect("Lookup failed")
        .expect("Reverse edge should exist");
    assert!(reverse.is_approved);
    assert_eq!(reverse.approved_by.as_deref(), Some("mod_1"));
    // Grandparent types follow the descendant default
    assert_eq!(reverse.relation_type, RelationType::Son);
}

#[tokio::test]
async fn deleting_a_person_removes_their_edges() {
    let registry = create_test_registry().await;
    let alice = add_person(&registry, "Alice", Gender::Female).await;
    let bob = add_person(&registry, "Bob", Gender::Male).await;
    let carol = add_person(&registry, "Carol", Gender::Female).await;
    let caller = Caller::new(&alice.id, Role::Member);

    registry
        .create_pair(&alice.id, &bob.id, RelationType::Spouse, None, &caller)
        .await
        .expect("Failed to create pair");
    registry
        .create_pair(&bob.id, &carol.id, RelationType::Sister, None, &caller)
        .await
        .expect("Failed to create pair");

    let (deleted, removed_edges) = registry
        .delete_person(&bob.id)
        .await
        .expect("Failed to delete person");
    assert!(deleted);
    assert_eq!(removed_edges, 4);

    let remaining = registry
        .list_relationships(None, None, None)
        .await
        .expect("Failed to list");
    assert!(remaining.is_empty());

    // Alice and Carol survive
    assert!(
        registry
            .get_person(&alice.id)
            .await
            .expect("Lookup failed")
            .is_some()
    );
}
