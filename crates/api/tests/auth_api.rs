//! HTTP-level integration tests for the `/auth` endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, post_json, TEST_PASSWORD};
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_returns_tokens_and_mapped_role(pool: PgPool) {
    let dept = common::seed_department(&pool, "Engineering").await;
    // Userlevel 13 maps to the admin role.
    common::seed_user(&pool, "Amir", "amir@example.com", 13, Some(dept)).await;

    let response = post_json(
        common::build_test_app(pool.clone()),
        "/api/v1/auth/login",
        None,
        serde_json::json!({ "email": "amir@example.com", "password": TEST_PASSWORD }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;

    assert!(json["access_token"].is_string());
    assert!(json["refresh_token"].is_string());
    assert_eq!(json["user"]["role"], "admin");
    assert_eq!(json["user"]["department_id"], dept);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_with_wrong_password_fails(pool: PgPool) {
    common::seed_user(&pool, "Amir", "amir@example.com", 13, None).await;

    let response = post_json(
        common::build_test_app(pool.clone()),
        "/api/v1/auth/login",
        None,
        serde_json::json!({ "email": "amir@example.com", "password": "nope" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_unknown_email_fails_identically(pool: PgPool) {
    let response = post_json(
        common::build_test_app(pool.clone()),
        "/api/v1/auth/login",
        None,
        serde_json::json!({ "email": "ghost@example.com", "password": TEST_PASSWORD }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // The message must not reveal whether the account exists.
    let json = body_json(response).await;
    assert_eq!(json["error"], "Invalid email or password");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_account_locks_after_repeated_failures(pool: PgPool) {
    common::seed_user(&pool, "Amir", "amir@example.com", 13, None).await;

    for _ in 0..5 {
        let response = post_json(
            common::build_test_app(pool.clone()),
            "/api/v1/auth/login",
            None,
            serde_json::json!({ "email": "amir@example.com", "password": "wrong" }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    // Even the correct password is rejected while locked.
    let response = post_json(
        common::build_test_app(pool.clone()),
        "/api/v1/auth/login",
        None,
        serde_json::json!({ "email": "amir@example.com", "password": TEST_PASSWORD }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_refresh_rotates_tokens(pool: PgPool) {
    common::seed_user(&pool, "Amir", "amir@example.com", 13, None).await;

    let response = post_json(
        common::build_test_app(pool.clone()),
        "/api/v1/auth/login",
        None,
        serde_json::json!({ "email": "amir@example.com", "password": TEST_PASSWORD }),
    )
    .await;
    let login = body_json(response).await;
    let refresh_token = login["refresh_token"].as_str().unwrap().to_string();

    // Exchange the refresh token.
    let response = post_json(
        common::build_test_app(pool.clone()),
        "/api/v1/auth/refresh",
        None,
        serde_json::json!({ "refresh_token": refresh_token }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let refreshed = body_json(response).await;
    assert_ne!(refreshed["refresh_token"], login["refresh_token"]);

    // The old token was revoked by rotation and cannot be replayed.
    let response = post_json(
        common::build_test_app(pool.clone()),
        "/api/v1/auth/refresh",
        None,
        serde_json::json!({ "refresh_token": refresh_token }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_me_returns_principal(pool: PgPool) {
    let dept = common::seed_department(&pool, "Engineering").await;
    let user_id = common::seed_user(&pool, "Siti", "siti@example.com", 3, Some(dept)).await;
    let token = common::token_for(user_id, "staff", Some(dept));

    let response = get(
        common::build_test_app(pool.clone()),
        "/api/v1/auth/me",
        Some(&token),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["id"], user_id);
    assert_eq!(json["email"], "siti@example.com");
    assert_eq!(json["role"], "staff");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_me_without_token_is_unauthorized(pool: PgPool) {
    let response = get(common::build_test_app(pool.clone()), "/api/v1/auth/me", None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_garbage_bearer_token_is_unauthorized(pool: PgPool) {
    let response = get(
        common::build_test_app(pool.clone()),
        "/api/v1/auth/me",
        Some("not-a-jwt"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
