//! Integration tests for invitations.

mod helpers;

use chrono::Duration;
use http::StatusCode;
use serde_json::json;

use casehub_auth::secret::generate_invite_token;
use casehub_core::types::id::UserId;
use casehub_entity::invite::Invite;
use casehub_entity::share::SharePermissions;

#[tokio::test]
async fn test_invite_redeem_and_list_pending() {
    let app = helpers::TestApp::new();
    let owner = app.register("owner@example.com").await;
    let case_id = app.create_case(&owner, "Water damage claim").await;

    let response = app
        .request(
            "POST",
            &format!("/api/cases/{case_id}/invites"),
            Some(json!({ "email": "Bob@Example.com", "can_edit": true })),
            Some(&owner.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    let token = response.data()["token"]
        .as_str()
        .expect("token")
        .to_string();
    assert_eq!(
        response.data()["link"],
        format!("{}/invite/{token}", helpers::PUBLIC_ORIGIN)
    );
    assert_eq!(response.data()["email"], "bob@example.com");

    let pending = app
        .request(
            "GET",
            &format!("/api/cases/{case_id}/invites"),
            None,
            Some(&owner.token),
        )
        .await;
    assert_eq!(pending.status, StatusCode::OK);
    let listed = pending.data().as_array().expect("pending");
    assert_eq!(listed.len(), 1);
    assert!(listed[0].get("token").is_none());

    let preview = app
        .request("GET", &format!("/api/invites/{token}"), None, None)
        .await;
    assert_eq!(preview.status, StatusCode::OK);
    assert_eq!(preview.data()["case_title"], "Water damage claim");
    assert_eq!(preview.data()["valid"], true);

    let bob = app.register("bob@example.com").await;
    let redeemed = app
        .request(
            "POST",
            &format!("/api/invites/{token}/redeem"),
            None,
            Some(&bob.token),
        )
        .await;
    assert_eq!(redeemed.status, StatusCode::OK);
    assert_eq!(redeemed.data()["case_id"], case_id.to_string());
    assert_eq!(redeemed.data()["already_granted"], false);

    let overview = app
        .request(
            "GET",
            &format!("/api/cases/{case_id}/shares"),
            None,
            Some(&owner.token),
        )
        .await;
    let users = overview.data()["shared_users"].as_array().expect("users");
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["user_id"], bob.id.to_string());
    assert_eq!(users[0]["can_view"], true);
    assert_eq!(users[0]["can_edit"], true);
    assert_eq!(
        overview.data()["pending_invites"]
            .as_array()
            .expect("invites")
            .len(),
        0
    );

    let again = app
        .request(
            "POST",
            &format!("/api/invites/{token}/redeem"),
            None,
            Some(&bob.token),
        )
        .await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_registered_email_must_be_shared_directly() {
    let app = helpers::TestApp::new();
    let owner = app.register("owner@example.com").await;
    app.register("alice@example.com").await;
    let case_id = app.create_case(&owner, "Water damage claim").await;

    let response = app
        .request(
            "POST",
            &format!("/api/cases/{case_id}/invites"),
            Some(json!({ "email": "alice@example.com" })),
            Some(&owner.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["error"]["detail"], "already_registered");
}

#[tokio::test]
async fn test_expired_invite_is_gone_after_redeem() {
    let app = helpers::TestApp::new();
    let owner = app.register("owner@example.com").await;
    let case_id = app.create_case(&owner, "Water damage claim").await;
    let token = generate_invite_token();
    app.repos
        .invites
        .create(&Invite::new(
            case_id,
            "late@example.com".to_string(),
            owner.id,
            SharePermissions::VIEW_ONLY,
            token.clone(),
            Duration::hours(-1),
        ))
        .await
        .expect("invite");

    let preview = app
        .request("GET", &format!("/api/invites/{token}"), None, None)
        .await;
    assert_eq!(preview.status, StatusCode::OK);
    assert_eq!(preview.data()["valid"], false);
    assert!(app.repos.invites.find_by_token(&token).await.expect("find").is_some());

    let late = app.register("late@example.com").await;
    let response = app
        .request(
            "POST",
            &format!("/api/invites/{token}/redeem"),
            None,
            Some(&late.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::GONE);
    assert_eq!(response.error_code(), Some("expired"));
    assert!(app.repos.invites.find_by_token(&token).await.expect("find").is_none());
}

#[tokio::test]
async fn test_redeem_with_other_email_is_rejected() {
    let app = helpers::TestApp::new();
    let owner = app.register("owner@example.com").await;
    let case_id = app.create_case(&owner, "Water damage claim").await;

    let created = app
        .request(
            "POST",
            &format!("/api/cases/{case_id}/invites"),
            Some(json!({ "email": "bob@example.com" })),
            Some(&owner.token),
        )
        .await;
    let token = created.data()["token"].as_str().expect("token").to_string();

    let eve = app.register("eve@example.com").await;
    let response = app
        .request(
            "POST",
            &format!("/api/invites/{token}/redeem"),
            None,
            Some(&eve.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.error_code(), Some("email_mismatch"));
    assert!(app.repos.invites.find_by_token(&token).await.expect("find").is_some());
}

#[tokio::test]
async fn test_redeem_ignores_letter_case_of_signed_in_email() {
    let app = helpers::TestApp::new();
    let owner = app.register("owner@example.com").await;
    let case_id = app.create_case(&owner, "Water damage claim").await;

    let created = app
        .request(
            "POST",
            &format!("/api/cases/{case_id}/invites"),
            Some(json!({ "email": "bob@example.com" })),
            Some(&owner.token),
        )
        .await;
    let token = created.data()["token"].as_str().expect("token").to_string();

    let bob_id = UserId::new();
    let bob_token = app.token_for(bob_id, "Bob@Example.COM");
    let response = app
        .request(
            "POST",
            &format!("/api/invites/{token}/redeem"),
            None,
            Some(&bob_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["case_id"], case_id.to_string());
    assert!(app
        .repos
        .shares
        .find(case_id, bob_id)
        .await
        .expect("find")
        .is_some());
}

#[tokio::test]
async fn test_redeem_requires_sign_in() {
    let app = helpers::TestApp::new();
    let owner = app.register("owner@example.com").await;
    let case_id = app.create_case(&owner, "Water damage claim").await;

    let created = app
        .request(
            "POST",
            &format!("/api/cases/{case_id}/invites"),
            Some(json!({ "email": "bob@example.com" })),
            Some(&owner.token),
        )
        .await;
    let token = created.data()["token"].as_str().expect("token").to_string();

    let response = app
        .request("POST", &format!("/api/invites/{token}/redeem"), None, None)
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_cancel_invite() {
    let app = helpers::TestApp::new();
    let owner = app.register("owner@example.com").await;
    let case_id = app.create_case(&owner, "Water damage claim").await;

    let created = app
        .request(
            "POST",
            &format!("/api/cases/{case_id}/invites"),
            Some(json!({ "email": "bob@example.com" })),
            Some(&owner.token),
        )
        .await;
    let invite_id = created.data()["invite_id"]
        .as_str()
        .expect("invite id")
        .to_string();

    let response = app
        .request(
            "DELETE",
            &format!("/api/cases/{case_id}/invites/{invite_id}"),
            None,
            Some(&owner.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data(), &json!(true));

    let pending = app
        .request(
            "GET",
            &format!("/api/cases/{case_id}/invites"),
            None,
            Some(&owner.token),
        )
        .await;
    assert_eq!(pending.data().as_array().expect("pending").len(), 0);
}

#[tokio::test]
async fn test_unknown_preview_is_not_found() {
    let app = helpers::TestApp::new();
    let response = app
        .request("GET", "/api/invites/does-not-exist", None, None)
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
