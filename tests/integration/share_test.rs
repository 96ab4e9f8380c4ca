//! Integration tests for direct sharing.

mod helpers;

use http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_share_update_and_list() {
    let app = helpers::TestApp::new();
    let owner = app.register("owner@example.com").await;
    let alice = app.register("alice@example.com").await;
    let case_id = app.create_case(&owner, "Water damage claim").await;

    let response = app
        .request(
            "POST",
            &format!("/api/cases/{case_id}/shares"),
            Some(json!({ "email": "Alice@Example.com" })),
            Some(&owner.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["success"], true);
    assert_eq!(response.data()["can_view"], true);
    assert_eq!(response.data()["can_edit"], false);

    let response = app
        .request(
            "PUT",
            &format!("/api/cases/{case_id}/shares/{}", alice.id),
            Some(json!({ "can_view": true, "can_edit": true })),
            Some(&owner.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request(
            "GET",
            &format!("/api/cases/{case_id}/shares"),
            None,
            Some(&owner.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let users = response.data()["shared_users"]
        .as_array()
        .expect("shared users");
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["email"], "alice@example.com");
    assert_eq!(users[0]["can_edit"], true);
    assert!(response.body.get("degraded").is_none());
}

#[tokio::test]
async fn test_second_share_conflicts() {
    let app = helpers::TestApp::new();
    let owner = app.register("owner@example.com").await;
    app.register("alice@example.com").await;
    let case_id = app.create_case(&owner, "Water damage claim").await;
    let path = format!("/api/cases/{case_id}/shares");
    let body = json!({ "email": "alice@example.com" });

    let first = app
        .request("POST", &path, Some(body.clone()), Some(&owner.token))
        .await;
    assert_eq!(first.status, StatusCode::CREATED);

    let second = app
        .request("POST", &path, Some(body), Some(&owner.token))
        .await;
    assert_eq!(second.status, StatusCode::CONFLICT);
    assert_eq!(second.body["success"], false);
    assert_eq!(second.error_code(), Some("conflict"));
    assert_eq!(second.body["error"]["detail"], "already_shared");
}

#[tokio::test]
async fn test_unknown_email_is_not_found() {
    let app = helpers::TestApp::new();
    let owner = app.register("owner@example.com").await;
    let case_id = app.create_case(&owner, "Water damage claim").await;

    let response = app
        .request(
            "POST",
            &format!("/api/cases/{case_id}/shares"),
            Some(json!({ "email": "nobody@example.com" })),
            Some(&owner.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_non_owner_is_forbidden() {
    let app = helpers::TestApp::new();
    let owner = app.register("owner@example.com").await;
    let mallory = app.register("mallory@example.com").await;
    app.register("alice@example.com").await;
    let case_id = app.create_case(&owner, "Water damage claim").await;

    let response = app
        .request(
            "POST",
            &format!("/api/cases/{case_id}/shares"),
            Some(json!({ "email": "alice@example.com" })),
            Some(&mallory.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.error_code(), Some("forbidden"));
}

#[tokio::test]
async fn test_missing_token_is_unauthenticated() {
    let app = helpers::TestApp::new();
    let owner = app.register("owner@example.com").await;
    let case_id = app.create_case(&owner, "Water damage claim").await;

    let response = app
        .request("GET", &format!("/api/cases/{case_id}/shares"), None, None)
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_code(), Some("unauthenticated"));
}

#[tokio::test]
async fn test_bad_token_is_rejected() {
    let app = helpers::TestApp::new();
    let owner = app.register("owner@example.com").await;
    let case_id = app.create_case(&owner, "Water damage claim").await;

    let response = app
        .request(
            "GET",
            &format!("/api/cases/{case_id}/shares"),
            None,
            Some("not-a-jwt"),
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_unshare_without_share_succeeds() {
    let app = helpers::TestApp::new();
    let owner = app.register("owner@example.com").await;
    let alice = app.register("alice@example.com").await;
    let case_id = app.create_case(&owner, "Water damage claim").await;

    let response = app
        .request(
            "DELETE",
            &format!("/api/cases/{case_id}/shares/{}", alice.id),
            None,
            Some(&owner.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
}

#[tokio::test]
async fn test_health() {
    let app = helpers::TestApp::new();
    let response = app.request("GET", "/api/health", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["status"], "ok");
    assert_eq!(response.data()["store"], true);
}
