//! Person management API endpoints

use std::sync::Arc;

use axum::{
    Extension, Json as JsonExtractor,
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use kinship::models::{Gender, Person};
use kinship::storage::PersonFilter;

use crate::{
    api::auth::AuthContext,
    api::dto::{CreatePersonRequest, PersonDto, UpdatePersonRequest},
    error::{ServerResult, bad_request, not_found},
    state::AppState,
};

/// Query parameters for listing persons
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListPersonsParams {
    /// Page number (0-based)
    #[serde(default)]
    pub page: usize,

    /// Number of items per page
    #[serde(default = "default_page_size")]
    pub size: usize,

    /// Filter by gender
    pub gender: Option<String>,

    /// Filter by case-insensitive name substring
    pub name_contains: Option<String>,
}

fn default_page_size() -> usize {
    20
}

/// List persons
#[utoipa::path(
    get,
    path = "/api/persons",
    tag = "persons",
    params(ListPersonsParams),
    responses(
        (status = 200, description = "List of persons", body = Vec<PersonDto>),
    )
)]
pub async fn list_persons(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListPersonsParams>,
) -> ServerResult<Json<Vec<PersonDto>>> {
    let offset = params.page * params.size;
    let limit = params.size;

    let mut filter = PersonFilter::default();
    if let Some(gender) = params.gender {
        filter.gender = Some(parse_gender(&gender)?);
    }
    if let Some(name_contains) = params.name_contains {
        filter.name_contains = Some(name_contains);
    }

    let persons = state
        .registry
        .list_persons(Some(filter), Some(limit), Some(offset))
        .await?;

    Ok(Json(persons.into_iter().map(PersonDto::from).collect()))
}

/// Get a specific person
#[utoipa::path(
    get,
    path = "/api/persons/{id}",
    tag = "persons",
    params(
        ("id" = String, Path, description = "Person ID")
    ),
    responses(
        (status = 200, description = "Person details", body = PersonDto),
        (status = 404, description = "Person not found"),
    )
)]
pub async fn get_person(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ServerResult<Json<PersonDto>> {
    let person = state
        .registry
        .get_person(&id)
        .await?
        .ok_or_else(|| not_found("Person", &id))?;

    Ok(Json(PersonDto::from(person)))
}

/// Register a new person
#[utoipa::path(
    post,
    path = "/api/persons",
    tag = "persons",
    request_body = CreatePersonRequest,
    responses(
        (status = 201, description = "Person registered successfully", body = PersonDto),
        (status = 400, description = "Invalid request"),
    )
)]
pub async fn create_person(
    State(state): State<Arc<AppState>>,
    JsonExtractor(request): JsonExtractor<CreatePersonRequest>,
) -> ServerResult<(StatusCode, Json<PersonDto>)> {
    let gender = parse_gender(&request.gender)?;

    let mut person = Person::new(&request.full_name, gender);
    if !request.profile.is_null() {
        person.profile = request.profile;
    }

    let created = state.registry.create_person(person).await?;

    Ok((StatusCode::CREATED, Json(PersonDto::from(created))))
}

/// Update a person
#[utoipa::path(
    put,
    path = "/api/persons/{id}",
    tag = "persons",
    params(
        ("id" = String, Path, description = "Person ID")
    ),
    request_body = UpdatePersonRequest,
    responses(
        (status = 200, description = "Person updated successfully", body = PersonDto),
        (status = 404, description = "Person not found"),
    )
)]
pub async fn update_person(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    JsonExtractor(request): JsonExtractor<UpdatePersonRequest>,
) -> ServerResult<Json<PersonDto>> {
    let mut existing = state
        .registry
        .get_person(&id)
        .await?
        .ok_or_else(|| not_found("Person", &id))?;

    if let Some(full_name) = request.full_name {
        existing.full_name = full_name;
    }
    if let Some(gender) = request.gender {
        existing.gender = parse_gender(&gender)?;
    }
    if let Some(profile) = request.profile {
        existing.profile = profile;
    }

    let updated = state.registry.update_person(existing).await?;

    Ok(Json(PersonDto::from(updated)))
}

/// Delete a person together with every relationship edge touching them
#[utoipa::path(
    delete,
    path = "/api/persons/{id}",
    tag = "persons",
    params(
        ("id" = String, Path, description = "Person ID")
    ),
    responses(
        (status = 204, description = "Person deleted successfully"),
        (status = 404, description = "Person not found"),
    )
)]
pub async fn delete_person(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<String>,
) -> ServerResult<StatusCode> {
    let (deleted, removed_edges) = state.registry.delete_person(&id).await?;

    if !deleted {
        return Err(not_found("Person", &id));
    }

    tracing::info!(
        person_id = %id,
        removed_edges,
        caller = %auth.user_id,
        "Person deleted"
    );

    Ok(StatusCode::NO_CONTENT)
}

fn parse_gender(value: &str) -> Result<Gender, crate::error::ServerError> {
    value.parse::<Gender>().map_err(|e| bad_request(&e))
}
