//! API implementation for the Kinship HTTP server

use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    middleware,
    response::Json,
    routing::{delete, get, post, put},
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::state::AppState;

pub mod auth;
pub mod dto;
pub mod persons;
pub mod relationships;

use auth::auth_middleware;

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        persons::create_person,
        persons::get_person,
        persons::list_persons,
        persons::update_person,
        persons::delete_person,
        relationships::list_relationships,
        relationships::get_relationship,
        relationships::create_relationship,
        relationships::update_relationship,
        relationships::delete_relationship,
        relationships::approve_relationship,
    ),
    components(
        schemas(
            dto::PersonDto,
            dto::CreatePersonRequest,
            dto::UpdatePersonRequest,
            dto::RelationshipDto,
            dto::RelationshipPairDto,
            dto::CreateRelationshipRequest,
            dto::UpdateRelationshipRequest,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "persons", description = "Person registration and management endpoints"),
        (name = "relationships", description = "Relationship declaration and moderation endpoints"),
    ),
    info(
        title = "Kinship Registry API",
        version = "1.0.0",
        description = "RESTful API for the Kinship relationship registry. Members and the kinship edges between them are persisted in SurrealDB, and every declared relationship is written together with its inverse edge.",
        contact(
            name = "Kinship Contributors",
            url = "https://github.com/kinship-registry/kinship"
        ),
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    servers(
        (url = "/api", description = "API base path")
    )
)]
pub struct ApiDoc;

/// Create the main router with all API endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    let api_router = Router::new()
        // Person endpoints
        .route("/persons", post(persons::create_person))
        .route("/persons", get(persons::list_persons))
        .route("/persons/{id}", get(persons::get_person))
        .route("/persons/{id}", put(persons::update_person))
        .route("/persons/{id}", delete(persons::delete_person))
        // Relationship endpoints
        .route("/relationships", get(relationships::list_relationships))
        .route("/relationships", post(relationships::create_relationship))
        .route("/relationships/{id}", get(relationships::get_relationship))
        .route(
            "/relationships/{id}",
            put(relationships::update_relationship),
        )
        .route(
            "/relationships/{id}",
            delete(relationships::delete_relationship),
        )
        .route(
            "/relationships/{id}/approve",
            post(relationships::approve_relationship),
        )
        // Health check endpoint
        .route("/health", get(health_check))
        // Add authentication middleware
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ))
        .with_state(state);

    // Main router with API prefix and documentation
    let swagger_router = SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi());

    Router::new().nest("/api", api_router).merge(swagger_router)
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "health",
    responses(
        (status = 200, description = "Service health", body = serde_json::Value)
    )
)]
async fn health_check(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let storage_healthy = state.registry.health_check().await.unwrap_or(false);

    Json(serde_json::json!({
        "status": if storage_healthy { "OK" } else { "DEGRADED" },
        "storage": storage_healthy,
        "authentication": state.config.enable_auth,
        "version": kinship::VERSION,
    }))
}
