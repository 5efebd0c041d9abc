//! Integration tests for routes forwarded to the upstream API.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod helpers;

use axum::http::StatusCode;
use condohub_core::AppError;
use uuid::Uuid;

#[tokio::test]
async fn test_proxied_route_requires_token() {
    let app = helpers::TestApp::new();

    let response = app.request("GET", "/api/notices", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert!(app.upstream.calls().is_empty());
}

#[tokio::test]
async fn test_revoked_token_never_reaches_upstream() {
    let app = helpers::TestApp::new();
    let token = app.resident_token("101", 1).await;
    app.request("POST", "/api/users/logout", None, Some(&token))
        .await;

    let response = app.request("GET", "/api/resources", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert!(app.upstream.calls().is_empty());
}

#[tokio::test]
async fn test_bearer_token_is_forwarded() {
    let app = helpers::TestApp::new();
    let token = app.resident_token("101", 1).await;
    app.upstream
        .reply_with(Ok(serde_json::json!([{ "id": "n1", "title": "Water shutdown" }])));

    let response = app.request("GET", "/api/notices", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body[0]["title"], "Water shutdown");

    let calls = app.upstream.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].method, "GET");
    assert_eq!(calls[0].path, "notices");
    assert_eq!(calls[0].token.as_deref(), Some(token.as_str()));
}

#[tokio::test]
async fn test_create_booking_forwards_typed_body() {
    let app = helpers::TestApp::new();
    let token = app.resident_token("101", 1).await;

    let response = app
        .request(
            "POST",
            "/api/bookings",
            Some(serde_json::json!({
                "resourceId": "gym",
                "startTime": "2024-05-01T10:00:00Z",
                "endTime": "2024-05-01T11:00:00Z",
            })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);

    let calls = app.upstream.calls();
    assert_eq!(calls[0].method, "POST");
    assert_eq!(calls[0].path, "bookings");
    let body = calls[0].body.as_ref().unwrap();
    assert_eq!(body["resourceId"], "gym");
    assert!(body.get("userId").is_none());
}

#[tokio::test]
async fn test_create_booking_rejects_missing_fields() {
    let app = helpers::TestApp::new();
    let token = app.resident_token("101", 1).await;

    let response = app
        .request(
            "POST",
            "/api/bookings",
            Some(serde_json::json!({
                "resourceId": "",
                "startTime": "2024-05-01T10:00:00Z",
                "endTime": "2024-05-01T11:00:00Z",
            })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(app.upstream.calls().is_empty());
}

#[tokio::test]
async fn test_booking_list_forwards_query() {
    let app = helpers::TestApp::new();
    let token = app.resident_token("101", 1).await;

    let response = app
        .request(
            "GET",
            "/api/bookings?startDate=2024-05-01&endDate=2024-05-31&status=confirmed",
            None,
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);

    let query = &app.upstream.calls()[0].query;
    assert!(query.contains(&("startDate".to_string(), "2024-05-01".to_string())));
    assert!(query.contains(&("endDate".to_string(), "2024-05-31".to_string())));
    assert!(query.contains(&("status".to_string(), "confirmed".to_string())));
}

#[tokio::test]
async fn test_availability_is_public() {
    let app = helpers::TestApp::new();

    let response = app
        .request(
            "GET",
            "/api/bookings/availability/gym?startTime=2024-05-01T10:00:00Z&endTime=2024-05-01T11:00:00Z",
            None,
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);

    let calls = app.upstream.calls();
    assert_eq!(calls[0].path, "bookings/availability/gym");
    assert!(calls[0].token.is_none());
    assert_eq!(
        calls[0].query,
        vec![
            ("startTime".to_string(), "2024-05-01T10:00:00Z".to_string()),
            ("endTime".to_string(), "2024-05-01T11:00:00Z".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_upstream_error_status_is_relayed() {
    let app = helpers::TestApp::new();
    let token = app.resident_token("101", 1).await;
    app.upstream
        .reply_with(Err(AppError::upstream(404, "Resource not found")));

    let response = app
        .request("GET", "/api/resources/missing", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "UPSTREAM_ERROR");
    assert_eq!(response.body["message"], "Resource not found");
}

#[tokio::test]
async fn test_unreachable_upstream_is_bad_gateway() {
    let app = helpers::TestApp::new();
    let token = app.resident_token("101", 1).await;
    app.upstream
        .reply_with(Err(AppError::upstream_unavailable("Upstream request timed out")));

    let response = app.request("GET", "/api/users", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::BAD_GATEWAY);
    assert_eq!(response.body["error"], "UPSTREAM_UNAVAILABLE");
}

#[tokio::test]
async fn test_delete_user_requires_admin() {
    let app = helpers::TestApp::new();
    let resident = app.resident_token("101", 1).await;
    let target = Uuid::new_v4();

    let denied = app
        .request("DELETE", &format!("/api/users/{target}"), None, Some(&resident))
        .await;
    assert_eq!(denied.status, StatusCode::FORBIDDEN);
    assert!(app.upstream.calls().is_empty());

    app.create_admin("ADM", 1, "admin1234").await;
    let admin = app.login("ADM", 1, "admin1234").await;
    let allowed = app
        .request("DELETE", &format!("/api/users/{target}"), None, Some(&admin))
        .await;
    assert_eq!(allowed.status, StatusCode::OK);

    let calls = app.upstream.calls();
    assert_eq!(calls[0].method, "DELETE");
    assert_eq!(calls[0].path, format!("users/{target}"));
}

#[tokio::test]
async fn test_encoded_slash_cannot_reach_admin_route() {
    let app = helpers::TestApp::new();
    let resident = app.resident_token("101", 1).await;

    for path in [
        "/api/bookings/..%2Fusers%2F42",
        "/api/notices/..%2F..%2Fusers%2F42",
        "/api/resources/%2E%2E",
    ] {
        let response = app.request("DELETE", path, None, Some(&resident)).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "{path}");
        assert_eq!(response.body["error"], "VALIDATION_ERROR");
    }

    assert!(app.upstream.calls().is_empty());
}
