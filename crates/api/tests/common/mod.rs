//! Shared helpers for HTTP-level integration tests.
//!
//! Tests drive the real router via `tower::ServiceExt::oneshot`, so the full
//! middleware stack (CORS, request id, timeout, panic recovery) is exercised
//! without a TCP listener.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, Response};
use axum::Router;
use sqlx::PgPool;
use tower::ServiceExt;

use filetrail_api::auth::jwt::{generate_access_token, JwtConfig};
use filetrail_api::auth::password::hash_password;
use filetrail_api::config::ServerConfig;
use filetrail_api::router::build_app_router;
use filetrail_api::state::AppState;
use filetrail_db::models::department::CreateDepartment;
use filetrail_db::models::file::CreateFile;
use filetrail_db::models::folder::CreateFolder;
use filetrail_db::models::location::CreateLocation;
use filetrail_db::models::user::CreateUser;
use filetrail_db::repositories::{
    DepartmentRepo, FileRepo, FolderRepo, LocationRepo, UserRepo,
};

/// Password used for all seeded test users.
pub const TEST_PASSWORD: &str = "correct-horse-battery-staple";

/// Build a test `ServerConfig` with a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "integration-test-secret".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool. Mirrors the production router construction.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str, token: Option<&str>) -> Response<Body> {
    send(app, Method::GET, uri, token, None).await
}

pub async fn post_json(
    app: Router,
    uri: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, Method::POST, uri, token, Some(body)).await
}

pub async fn post_empty(app: Router, uri: &str, token: Option<&str>) -> Response<Body> {
    send(app, Method::POST, uri, token, None).await
}

pub async fn put_json(
    app: Router,
    uri: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, Method::PUT, uri, token, Some(body)).await
}

pub async fn delete(app: Router, uri: &str, token: Option<&str>) -> Response<Body> {
    send(app, Method::DELETE, uri, token, None).await
}

/// Collect a response body into parsed JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    use http_body_util::BodyExt;
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Seed a user with [`TEST_PASSWORD`] and return its id.
pub async fn seed_user(
    pool: &PgPool,
    name: &str,
    email: &str,
    userlevel: i32,
    department_id: Option<i64>,
) -> i64 {
    let hash = hash_password(TEST_PASSWORD).expect("hashing should succeed");
    let user = UserRepo::create(
        pool,
        &CreateUser {
            name: name.to_string(),
            email: email.to_string(),
            password_hash: hash,
            userlevel,
            department_id,
        },
    )
    .await
    .expect("user insert should succeed");
    user.id
}

/// Mint an access token for a seeded user without going through login.
pub fn token_for(user_id: i64, role: &str, department_id: Option<i64>) -> String {
    generate_access_token(user_id, role, department_id, &test_config().jwt)
        .expect("token generation should succeed")
}

pub async fn seed_department(pool: &PgPool, name: &str) -> i64 {
    DepartmentRepo::create(
        pool,
        &CreateDepartment {
            name: name.to_string(),
        },
    )
    .await
    .expect("department insert should succeed")
    .id
}

pub async fn seed_location(pool: &PgPool, name: &str) -> i64 {
    LocationRepo::create(
        pool,
        &CreateLocation {
            name: name.to_string(),
        },
    )
    .await
    .expect("location insert should succeed")
    .id
}

/// Seed a folder (with no initial files) and return its id.
pub async fn seed_folder(
    pool: &PgPool,
    name: &str,
    department_id: i64,
    department_name: &str,
    location_id: i64,
    created_by: i64,
) -> i64 {
    FolderRepo::create(
        pool,
        &CreateFolder {
            name: name.to_string(),
            department_id: Some(department_id),
            location_id,
            file_ids: Vec::new(),
        },
        department_id,
        department_name,
        created_by,
    )
    .await
    .expect("folder insert should succeed")
    .id
}

/// Seed a file inside a folder and return its id.
pub async fn seed_file(pool: &PgPool, name: &str, folder_id: i64, created_by: i64) -> i64 {
    FileRepo::create(
        pool,
        &CreateFile {
            name: name.to_string(),
            folder_id,
        },
        created_by,
    )
    .await
    .expect("file insert should succeed")
    .id
}
