//! Integration tests for the register/login/logout flow.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod helpers;

use axum::http::StatusCode;

#[tokio::test]
async fn test_health() {
    let app = helpers::TestApp::new();

    let response = app.request("GET", "/api/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
}

#[tokio::test]
async fn test_session_lifecycle() {
    let app = helpers::TestApp::new();
    let token = app.resident_token("101", 1).await;

    let me = app.request("GET", "/api/users/me", None, Some(&token)).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.body["name"], "Ana Souza");
    assert_eq!(me.body["role"], "resident");

    let logout = app
        .request("POST", "/api/users/logout", None, Some(&token))
        .await;
    assert_eq!(logout.status, StatusCode::OK);
    assert_eq!(logout.body["message"], "User logged out successfully");

    let after = app.request("GET", "/api/users/me", None, Some(&token)).await;
    assert_eq!(after.status, StatusCode::UNAUTHORIZED);
    assert_eq!(after.body["message"], "Unauthorized");
}

#[tokio::test]
async fn test_login_response_shape() {
    let app = helpers::TestApp::new();
    app.register("Ana Souza", "101", 1, "pass1234").await;

    let response = app
        .request(
            "POST",
            "/api/users/login",
            Some(serde_json::json!({
                "apartment": "101",
                "block": 1,
                "password": "pass1234",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["message"], "User logged in successfully");
    assert!(response.body["token"].as_str().is_some());
    assert!(response.body["expires_at"].as_str().is_some());
}

#[tokio::test]
async fn test_register_hides_password_hash() {
    let app = helpers::TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/users/register",
            Some(serde_json::json!({
                "name": "Bruno Lima",
                "email": "Bruno@Example.com",
                "password": "pass1234",
                "apartment": "202",
                "block": 2,
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["message"], "User registered successfully");
    let user = &response.body["user"];
    assert_eq!(user["email"], "bruno@example.com");
    assert_eq!(user["role"], "resident");
    assert!(user.get("password_hash").is_none());
    assert!(user.get("password").is_none());
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = helpers::TestApp::new();
    app.register("Ana Souza", "101", 1, "pass1234").await;

    let wrong_password = app
        .request(
            "POST",
            "/api/users/login",
            Some(serde_json::json!({ "apartment": "101", "block": 1, "password": "wrong999" })),
            None,
        )
        .await;
    let unknown_unit = app
        .request(
            "POST",
            "/api/users/login",
            Some(serde_json::json!({ "apartment": "999", "block": 1, "password": "pass1234" })),
            None,
        )
        .await;

    assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_unit.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.body, unknown_unit.body);
}

#[tokio::test]
async fn test_missing_and_malformed_tokens_share_one_body() {
    let app = helpers::TestApp::new();

    let missing = app.request("GET", "/api/users/me", None, None).await;
    let wrong_scheme = app
        .request_with_header("GET", "/api/users/me", None, Some("Basic YWRtaW46YWRtaW4="))
        .await;
    let garbage = app
        .request("GET", "/api/users/me", None, Some("not-a-token"))
        .await;

    for response in [&missing, &wrong_scheme, &garbage] {
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    }
    assert_eq!(missing.body, wrong_scheme.body);
    assert_eq!(missing.body, garbage.body);
}

#[tokio::test]
async fn test_bearer_scheme_is_case_insensitive() {
    let app = helpers::TestApp::new();
    let token = app.resident_token("101", 1).await;

    let response = app
        .request_with_header(
            "GET",
            "/api/users/me",
            None,
            Some(&format!("bearer {token}")),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_duplicate_unit_conflicts() {
    let app = helpers::TestApp::new();
    app.register("Ana Souza", "101", 1, "pass1234").await;

    let response = app
        .request(
            "POST",
            "/api/users/register",
            Some(serde_json::json!({
                "name": "Carla Dias",
                "email": "carla@example.com",
                "password": "pass1234",
                "apartment": "101",
                "block": 1,
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["error"], "CONFLICT");
}

#[tokio::test]
async fn test_register_validation() {
    let app = helpers::TestApp::new();

    let bad_block = app
        .request(
            "POST",
            "/api/users/register",
            Some(serde_json::json!({
                "name": "Ana Souza",
                "email": "ana@example.com",
                "password": "pass1234",
                "apartment": "101",
                "block": 3,
            })),
            None,
        )
        .await;
    assert_eq!(bad_block.status, StatusCode::BAD_REQUEST);
    assert_eq!(bad_block.body["error"], "VALIDATION_ERROR");

    let weak_password = app
        .request(
            "POST",
            "/api/users/register",
            Some(serde_json::json!({
                "name": "Ana Souza",
                "email": "ana@example.com",
                "password": "password",
                "apartment": "101",
                "block": 1,
            })),
            None,
        )
        .await;
    assert_eq!(weak_password.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_admin_registration_requires_admin_caller() {
    let app = helpers::TestApp::new();
    let resident = app.resident_token("101", 1).await;
    let admin_body = serde_json::json!({
        "name": "Diego Alves",
        "email": "diego@example.com",
        "password": "pass1234",
        "apartment": "301",
        "block": 2,
        "role": "admin",
    });

    let anonymous = app
        .request("POST", "/api/users/register", Some(admin_body.clone()), None)
        .await;
    assert_eq!(anonymous.status, StatusCode::FORBIDDEN);

    let by_resident = app
        .request(
            "POST",
            "/api/users/register",
            Some(admin_body.clone()),
            Some(&resident),
        )
        .await;
    assert_eq!(by_resident.status, StatusCode::FORBIDDEN);

    app.create_admin("ADM", 1, "admin1234").await;
    let admin = app.login("ADM", 1, "admin1234").await;
    let by_admin = app
        .request("POST", "/api/users/register", Some(admin_body), Some(&admin))
        .await;
    assert_eq!(by_admin.status, StatusCode::CREATED);
    assert_eq!(by_admin.body["user"]["role"], "admin");
}

#[tokio::test]
async fn test_logout_requires_token() {
    let app = helpers::TestApp::new();

    let response = app.request("POST", "/api/users/logout", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}
