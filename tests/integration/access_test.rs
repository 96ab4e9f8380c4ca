//! Integration tests for access codes.

mod helpers;

use http::StatusCode;

#[tokio::test]
async fn test_issue_resolve_and_revoke() {
    let app = helpers::TestApp::new();
    let owner = app.register("owner@example.com").await;
    let case_id = app.create_case(&owner, "Water damage claim").await;
    let other_case = app.create_case(&owner, "Roof claim").await;
    app.add_content(case_id, "Estimate received").await;
    app.add_content(other_case, "Unrelated").await;

    let issued = app
        .request(
            "POST",
            &format!("/api/cases/{case_id}/access-codes"),
            None,
            Some(&owner.token),
        )
        .await;
    assert_eq!(issued.status, StatusCode::CREATED);
    let code = issued.data()["code"].as_str().expect("code").to_string();
    assert_eq!(code.len(), 14);

    let resolved = app
        .request(
            "GET",
            &format!("/api/access/{}", code.to_lowercase()),
            None,
            None,
        )
        .await;
    assert_eq!(resolved.status, StatusCode::OK);
    assert_eq!(resolved.data()["case"]["title"], "Water damage claim");
    let emails = resolved.data()["emails"].as_array().expect("emails");
    let events = resolved.data()["events"].as_array().expect("events");
    assert_eq!(emails.len(), 1);
    assert_eq!(events.len(), 1);
    assert_eq!(emails[0]["subject"], "Estimate received");
    assert_eq!(events[0]["case_id"], case_id.to_string());

    let listed = app
        .request(
            "GET",
            &format!("/api/cases/{case_id}/access-codes"),
            None,
            Some(&owner.token),
        )
        .await;
    assert_eq!(listed.data().as_array().expect("codes").len(), 1);

    let revoked = app
        .request(
            "DELETE",
            &format!("/api/cases/{case_id}/access-codes/{code}"),
            None,
            Some(&owner.token),
        )
        .await;
    assert_eq!(revoked.status, StatusCode::OK);
    assert_eq!(revoked.data(), &serde_json::json!(true));

    let resolved = app
        .request("GET", &format!("/api/access/{code}"), None, None)
        .await;
    assert_eq!(resolved.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_code_is_not_found() {
    let app = helpers::TestApp::new();
    let response = app
        .request("GET", "/api/access/ABCD-EFGH-JKMN", None, None)
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_issue_requires_owner() {
    let app = helpers::TestApp::new();
    let owner = app.register("owner@example.com").await;
    let mallory = app.register("mallory@example.com").await;
    let case_id = app.create_case(&owner, "Water damage claim").await;

    let response = app
        .request(
            "POST",
            &format!("/api/cases/{case_id}/access-codes"),
            None,
            Some(&mallory.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert!(app.repos.access_codes.list_for_case(case_id).await.expect("list").is_empty());
}
