//! Relationship management API endpoints
//!
//! Every write goes through the registry's synchronizer, so declaring,
//! updating, approving, or deleting an edge always touches its inverse
//! counterpart as well.

use std::sync::Arc;

use axum::{
    Extension, Json as JsonExtractor,
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use kinship::models::RelationType;
use kinship::relations::EdgeChanges;
use kinship::storage::RelationshipFilter;

use crate::{
    api::auth::AuthContext,
    api::dto::{
        CreateRelationshipRequest, RelationshipDto, RelationshipPairDto, UpdateRelationshipRequest,
    },
    error::{ServerError, ServerResult, not_found},
    state::AppState,
};

/// Query parameters for listing relationship edges
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListRelationshipsParams {
    /// Page number (0-based)
    #[serde(default)]
    pub page: usize,

    /// Number of items per page
    #[serde(default = "default_page_size")]
    pub size: usize,

    /// Filter by relation type label
    pub relation_type: Option<String>,

    /// Filter by the subject person id
    pub person_a: Option<String>,

    /// Filter by the related person id
    pub person_b: Option<String>,

    /// Filter by edges touching a person on either side
    pub person: Option<String>,

    /// Filter by approval status
    pub is_approved: Option<bool>,
}

fn default_page_size() -> usize {
    20
}

/// List relationship edges
#[utoipa::path(
    get,
    path = "/api/relationships",
    tag = "relationships",
    params(ListRelationshipsParams),
    responses(
        (status = 200, description = "List of relationship edges", body = Vec<RelationshipDto>),
    )
)]
pub async fn list_relationships(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListRelationshipsParams>,
) -> ServerResult<Json<Vec<RelationshipDto>>> {
    let offset = params.page * params.size;
    let limit = params.size;

    let mut filter = RelationshipFilter::default();
    if let Some(relation_type) = params.relation_type {
        filter.relation_type = Some(relation_type.parse::<RelationType>()?);
    }
    filter.person_a = params.person_a;
    filter.person_b = params.person_b;
    filter.person = params.person;
    filter.is_approved = params.is_approved;

    let edges = state
        .registry
        .list_relationships(Some(filter), Some(limit), Some(offset))
        .await?;

    Ok(Json(edges.into_iter().map(RelationshipDto::from).collect()))
}

/// Get a specific relationship edge
#[utoipa::path(
    get,
    path = "/api/relationships/{id}",
    tag = "relationships",
    params(
        ("id" = String, Path, description = "Relationship edge ID")
    ),
    responses(
        (status = 200, description = "Relationship edge details", body = RelationshipDto),
        (status = 404, description = "Relationship not found"),
    )
)]
pub async fn get_relationship(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ServerResult<Json<RelationshipDto>> {
    let edge = state
        .registry
        .get_relationship(&id)
        .await?
        .ok_or_else(|| not_found("Relationship", &id))?;

    Ok(Json(RelationshipDto::from(edge)))
}

/// Declare a new relationship
///
/// Writes the forward edge and its derived inverse in one operation and
/// returns both.
#[utoipa::path(
    post,
    path = "/api/relationships",
    tag = "relationships",
    request_body = CreateRelationshipRequest,
    responses(
        (status = 201, description = "Relationship pair created", body = RelationshipPairDto),
        (status = 400, description = "Invalid request"),
        (status = 404, description = "Referenced person not found"),
        (status = 409, description = "Relationship already exists for this pair"),
    )
)]
pub async fn create_relationship(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    JsonExtractor(request): JsonExtractor<CreateRelationshipRequest>,
) -> ServerResult<(StatusCode, Json<RelationshipPairDto>)> {
    let relation_type = request.relation_type.parse::<RelationType>()?;
    let caller = auth.caller();

    let (forward_id, reverse_id) = state
        .registry
        .create_pair(
            &request.person_a,
            &request.person_b,
            relation_type,
            request.description,
            &caller,
        )
        .await?;

    let forward = state
        .registry
        .get_relationship(&forward_id)
        .await?
        .ok_or_else(|| {
            ServerError::Internal(format!("Created edge '{}' not readable", forward_id))
        })?;
    let reverse = state
        .registry
        .get_relationship(&reverse_id)
        .await?
        .ok_or_else(|| {
            ServerError::Internal(format!("Created edge '{}' not readable", reverse_id))
        })?;

    let pair = RelationshipPairDto {
        forward: RelationshipDto::from(forward),
        reverse: RelationshipDto::from(reverse),
    };

    Ok((StatusCode::CREATED, Json(pair)))
}

/// Update a relationship edge
///
/// Changing the relation type realigns the inverse edge. Description changes
/// apply to the addressed edge only.
#[utoipa::path(
    put,
    path = "/api/relationships/{id}",
    tag = "relationships",
    params(
        ("id" = String, Path, description = "Relationship edge ID")
    ),
    request_body = UpdateRelationshipRequest,
    responses(
        (status = 200, description = "Relationship updated successfully", body = RelationshipDto),
        (status = 403, description = "Caller may not modify this edge"),
        (status = 404, description = "Relationship not found"),
    )
)]
pub async fn update_relationship(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<String>,
    JsonExtractor(request): JsonExtractor<UpdateRelationshipRequest>,
) -> ServerResult<Json<RelationshipDto>> {
    let mut changes = EdgeChanges::default();
    if let Some(relation_type) = request.relation_type {
        changes = changes.relation_type(relation_type.parse::<RelationType>()?);
    }
    if request.clear_description {
        changes = changes.clear_description();
    } else if let Some(description) = request.description {
        changes = changes.description(description);
    }

    let caller = auth.caller();
    let updated = state.registry.update_pair(&id, changes, &caller).await?;

    Ok(Json(RelationshipDto::from(updated)))
}

/// Delete a relationship edge together with its inverse
#[utoipa::path(
    delete,
    path = "/api/relationships/{id}",
    tag = "relationships",
    params(
        ("id" = String, Path, description = "Relationship edge ID")
    ),
    responses(
        (status = 204, description = "Relationship pair deleted"),
        (status = 403, description = "Caller may not modify this edge"),
        (status = 404, description = "Relationship not found"),
    )
)]
pub async fn delete_relationship(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<String>,
) -> ServerResult<StatusCode> {
    let caller = auth.caller();
    state.registry.delete_pair(&id, &caller).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Approve both sides of a relationship pair
///
/// Requires a moderator or admin caller.
#[utoipa::path(
    post,
    path = "/api/relationships/{id}/approve",
    tag = "relationships",
    params(
        ("id" = String, Path, description = "Relationship edge ID")
    ),
    responses(
        (status = 200, description = "Relationship pair approved", body = RelationshipDto),
        (status = 403, description = "Caller is not a moderator"),
        (status = 404, description = "Relationship not found"),
    )
)]
pub async fn approve_relationship(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<String>,
) -> ServerResult<Json<RelationshipDto>> {
    let caller = auth.caller();
    let approved = state.registry.approve_pair(&id, &caller).await?;

    Ok(Json(RelationshipDto::from(approved)))
}
