//! Tests for JWT authentication and authorization

use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;
use jsonwebtoken::{DecodingKey, Validation, decode};
use kinship::relations::Role;
use kinship_server::{
    api::auth::{Claims, generate_jwt_token},
    config::ServerConfig,
    state::AppState,
};
use serde_json::{Value, json};

const TEST_SECRET: &str = "test-secret-key-for-jwt-token-generation";

async fn create_test_server_with_auth() -> (TestServer, tempfile::TempDir) {
    let temp_dir = tempfile::tempdir().unwrap();

    let config = kinship::config::ConfigBuilder::new()
        .with_data_dir(temp_dir.path())
        .with_memory_storage()
        .build()
        .expect("Failed to create config");

    let registry = kinship::init(config)
        .await
        .expect("Failed to initialize registry");

    let mut server_config = ServerConfig::default();
    server_config.enable_auth = true;
    server_config.jwt_secret = TEST_SECRET.to_string();

    let state = Arc::new(AppState::new(registry, server_config));
    let app = kinship_server::create_router(state);
    let server = TestServer::new(app).unwrap();

    (server, temp_dir)
}

fn token_for(user_id: &str, role: Role) -> String {
    let (token, _) = generate_jwt_token(user_id, user_id, role, TEST_SECRET, 24).unwrap();
    token
}

/// Register a person using an admin token and return its id
async fn create_person(server: &TestServer, full_name: &str) -> String {
    let response = server
        .post("/api/persons")
        .authorization_bearer(token_for("admin_1", Role::Admin))
        .json(&json!({ "full_name": full_name }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let json: Value = response.json();
    json["id"].as_str().expect("Person id missing").to_string()
}

#[tokio::test]
async fn test_jwt_token_generation() {
    let (token, expires_at) =
        generate_jwt_token("user_1", "testuser", Role::Member, TEST_SECRET, 24).unwrap();

    assert!(!token.is_empty());

    let now = chrono::Utc::now().timestamp();
    assert!(expires_at > now);

    let decoding_key = DecodingKey::from_secret(TEST_SECRET.as_ref());
    let validation = Validation::default();
    let token_data = decode::<Claims>(&token, &decoding_key, &validation).unwrap();

    assert_eq!(token_data.claims.sub, "user_1");
    assert_eq!(token_data.claims.username, "testuser");
    assert_eq!(token_data.claims.role, "member");
}

#[tokio::test]
async fn test_jwt_token_validation_wrong_secret() {
    let (token, _) =
        generate_jwt_token("user_1", "testuser", Role::Member, TEST_SECRET, 24).unwrap();

    let decoding_key = DecodingKey::from_secret("wrong-secret-key".as_ref());
    let validation = Validation::default();
    let result = decode::<Claims>(&token, &decoding_key, &validation);
    assert!(result.is_err());
}

#[tokio::test]
async fn test_jwt_token_expiration() {
    let now = chrono::Utc::now().timestamp() as usize;

    let claims = Claims {
        sub: "user_1".to_string(),
        username: "testuser".to_string(),
        role: "member".to_string(),
        iat: now - 7200,
        exp: now - 3600, // Expired 1 hour ago
    };

    let encoding_key = jsonwebtoken::EncodingKey::from_secret(TEST_SECRET.as_ref());
    let token =
        jsonwebtoken::encode(&jsonwebtoken::Header::default(), &claims, &encoding_key).unwrap();

    let decoding_key = DecodingKey::from_secret(TEST_SECRET.as_ref());
    let validation = Validation::default();
    let result = decode::<Claims>(&token, &decoding_key, &validation);
    assert!(result.is_err());
}

#[tokio::test]
async fn test_health_is_public() {
    let (server, _temp_dir) = create_test_server_with_auth().await;

    let response = server.get("/api/health").await;
    response.assert_status_ok();
}

#[tokio::test]
async fn test_missing_token_rejected() {
    let (server, _temp_dir) = create_test_server_with_auth().await;

    let response = server.get("/api/persons").await;
    response.assert_status(StatusCode::UNAUTHORIZED);

    let json: Value = response.json();
    assert_eq!(json["error"], "authentication_error");
}

#[tokio::test]
async fn test_invalid_token_rejected() {
    let (server, _temp_dir) = create_test_server_with_auth().await;

    let response = server
        .get("/api/persons")
        .authorization_bearer("not-a-real-token")
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_unknown_role_rejected() {
    let (server, _temp_dir) = create_test_server_with_auth().await;

    let now = chrono::Utc::now().timestamp() as usize;
    let claims = Claims {
        sub: "user_1".to_string(),
        username: "testuser".to_string(),
        role: "root".to_string(),
        iat: now,
        exp: now + 3600,
    };
    let encoding_key = jsonwebtoken::EncodingKey::from_secret(TEST_SECRET.as_ref());
    let token =
        jsonwebtoken::encode(&jsonwebtoken::Header::default(), &claims, &encoding_key).unwrap();

    let response = server
        .get("/api/persons")
        .authorization_bearer(token)
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_member_can_declare_relationship() {
    let (server, _temp_dir) = create_test_server_with_auth().await;

    let alice = create_person(&server, "Alice").await;
    let bob = create_person(&server, "Bob").await;

    let response = server
        .post("/api/relationships")
        .authorization_bearer(token_for("member_1", Role::Member))
        .json(&json!({
            "person_a": alice,
            "person_b": bob,
            "relation_type": "Cousin"
        }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let json: Value = response.json();
    assert_eq!(json["forward"]["created_by"], "member_1");
}

#[tokio::test]
async fn test_stranger_cannot_modify_edge() {
    let (server, _temp_dir) = create_test_server_with_auth().await;

    let alice = create_person(&server, "Alice").await;
    let bob = create_person(&server, "Bob").await;

    let response = server
        .post("/api/relationships")
        .authorization_bearer(token_for("member_1", Role::Member))
        .json(&json!({
            "person_a": alice,
            "person_b": bob,
            "relation_type": "Brother"
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let json: Value = response.json();
    let edge_id = json["forward"]["id"].as_str().unwrap().to_string();

    // A different member may not touch the edge
    let response = server
        .put(&format!("/api/relationships/{}", edge_id))
        .authorization_bearer(token_for("member_2", Role::Member))
        .json(&json!({ "description": "not yours to edit" }))
        .await;
    response.assert_status(StatusCode::FORBIDDEN);

    let response = server
        .delete(&format!("/api/relationships/{}", edge_id))
        .authorization_bearer(token_for("member_2", Role::Member))
        .await;
    response.assert_status(StatusCode::FORBIDDEN);

    // A moderator may
    let response = server
        .put(&format!("/api/relationships/{}", edge_id))
        .authorization_bearer(token_for("mod_1", Role::Moderator))
        .json(&json!({ "description": "reviewed" }))
        .await;
    response.assert_status_ok();
}

#[tokio::test]
async fn test_approval_requires_elevated_role() {
    let (server, _temp_dir) = create_test_server_with_auth().await;

    let alice = create_person(&server, "Alice").await;
    let bob = create_person(&server, "Bob").await;

    let response = server
        .post("/api/relationships")
        .authorization_bearer(token_for("member_1", Role::Member))
        .json(&json!({
            "person_a": alice,
            "person_b": bob,
            "relation_type": "Aunt"
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let json: Value = response.json();
    let edge_id = json["forward"]["id"].as_str().unwrap().to_string();

    // A plain member cannot approve, not even the creator
    let response = server
        .post(&format!("/api/relationships/{}/approve", edge_id))
        .authorization_bearer(token_for("member_1", Role::Member))
        .await;
    response.assert_status(StatusCode::FORBIDDEN);

    let response = server
        .post(&format!("/api/relationships/{}/approve", edge_id))
        .authorization_bearer(token_for("mod_1", Role::Moderator))
        .await;
    response.assert_status_ok();
    let json: Value = response.json();
    assert_eq!(json["is_approved"], true);
    assert_eq!(json["approved_by"], "mod_1");
}
