//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use chrono::{Duration, Utc};
use http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use casehub_auth::JwtEncoder;
use casehub_core::config::{AppConfig, StoreBackend};
use casehub_core::types::id::{CaseId, UserId};
use casehub_database::{MemoryRecordStore, Repositories};
use casehub_entity::case::{Case, CaseEmail, CaseEvent};
use casehub_entity::user::Profile;

/// Origin invite links are rooted at in tests.
pub const PUBLIC_ORIGIN: &str = "https://cases.test";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Repositories over the same in-memory store, for direct setup and checks
    pub repos: Repositories,
    /// Token issuer sharing the router's secret
    pub encoder: JwtEncoder,
}

/// A registered identity and a bearer token for it.
#[derive(Debug, Clone)]
pub struct TestUser {
    pub id: UserId,
    pub email: String,
    pub token: String,
}

impl TestApp {
    /// Create a new test application over a fresh in-memory store
    pub fn new() -> Self {
        let mut config = AppConfig::default();
        config.store.backend = StoreBackend::Memory;
        config.auth.jwt_secret = "integration-test-secret".to_string();
        config.invite.public_origin = Some(PUBLIC_ORIGIN.to_string());

        let repos = Repositories::new(Arc::new(MemoryRecordStore::new()));
        let encoder = JwtEncoder::new(&config.auth);
        let router = casehub_api::build_app(Arc::new(config), &repos);

        Self {
            router,
            repos,
            encoder,
        }
    }

    /// Register an identity and sign a token for it
    pub async fn register(&self, email: &str) -> TestUser {
        let profile = self
            .repos
            .profiles
            .create(&Profile::new(email, None))
            .await
            .expect("Failed to create profile");
        let token = self
            .encoder
            .issue(profile.id, &profile.email, Duration::hours(1))
            .expect("Failed to issue token");

        TestUser {
            id: profile.id,
            email: profile.email,
            token,
        }
    }

    /// A token for an identity that has no profile row
    pub fn token_for(&self, id: UserId, email: &str) -> String {
        self.encoder
            .issue(id, email, Duration::hours(1))
            .expect("Failed to issue token")
    }

    /// Create a case owned by `owner`
    pub async fn create_case(&self, owner: &TestUser, title: &str) -> CaseId {
        self.repos
            .cases
            .create(&Case::new(owner.id, title))
            .await
            .expect("Failed to create case")
            .id
    }

    /// File one email and one event against `case_id`
    pub async fn add_content(&self, case_id: CaseId, label: &str) {
        let now = Utc::now();
        self.repos
            .content
            .add_email(&CaseEmail::new(case_id, "adjuster@insurer.test", label, now))
            .await
            .expect("Failed to add email");
        self.repos
            .content
            .add_event(&CaseEvent::new(case_id, label, now))
            .await
            .expect("Failed to add event");
    }

    /// Make a request to the test server
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {}", token));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// The `data` member of an outcome body
    pub fn data(&self) -> &Value {
        &self.body["data"]
    }

    /// The structured error code, e.g. `conflict`
    pub fn error_code(&self) -> Option<&str> {
        self.body["error"]["code"].as_str()
    }
}
