//! Shared test helpers for integration tests.

#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use condohub_api::{AppState, build_router};
use condohub_auth::{CredentialHasher, RevocationLedger, SessionAuthority, TokenCodec};
use condohub_core::config::{
    AppConfig, AuthConfig, DatabaseConfig, LoggingConfig, RevocationConfig, ServerConfig,
    StoreProvider, UpstreamConfig,
};
use condohub_core::{AppError, AppResult};
use condohub_database::Stores;
use condohub_entity::user::{NaturalKey, NewUser, UserRole};
use condohub_upstream::{QueryPairs, UpstreamApi};

/// One call seen by the stub upstream.
#[derive(Debug, Clone)]
pub struct UpstreamCall {
    /// HTTP verb.
    pub method: &'static str,
    /// Path relative to the upstream base URL.
    pub path: String,
    /// Forwarded query pairs.
    pub query: Vec<(String, String)>,
    /// Forwarded JSON body.
    pub body: Option<Value>,
    /// Forwarded bearer token.
    pub token: Option<String>,
}

/// Upstream stand-in that records every call and answers with a canned reply.
#[derive(Debug, Default)]
pub struct StubUpstream {
    calls: Mutex<Vec<UpstreamCall>>,
    reply: Mutex<Option<Result<Value, AppError>>>,
}

impl StubUpstream {
    /// Replace the canned reply.
    pub fn reply_with(&self, reply: Result<Value, AppError>) {
        *self.reply.lock().unwrap() = Some(reply);
    }

    /// Calls seen so far.
    pub fn calls(&self) -> Vec<UpstreamCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(
        &self,
        method: &'static str,
        path: &str,
        query: &QueryPairs,
        body: Option<&Value>,
        token: Option<&str>,
    ) -> AppResult<Value> {
        self.calls.lock().unwrap().push(UpstreamCall {
            method,
            path: path.to_string(),
            query: query.to_vec(),
            body: body.cloned(),
            token: token.map(str::to_string),
        });
        match self.reply.lock().unwrap().clone() {
            Some(reply) => reply,
            None => Ok(serde_json::json!({ "ok": true })),
        }
    }
}

#[async_trait]
impl UpstreamApi for StubUpstream {
    async fn get(&self, path: &str, query: &QueryPairs, token: Option<&str>) -> AppResult<Value> {
        self.record("GET", path, query, None, token)
    }

    async fn post(&self, path: &str, body: &Value, token: Option<&str>) -> AppResult<Value> {
        self.record("POST", path, &[], Some(body), token)
    }

    async fn put(&self, path: &str, body: &Value, token: Option<&str>) -> AppResult<Value> {
        self.record("PUT", path, &[], Some(body), token)
    }

    async fn delete(&self, path: &str, token: Option<&str>) -> AppResult<Value> {
        self.record("DELETE", path, &[], None, token)
    }
}

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// In-memory stores behind the session authority
    pub stores: Stores,
    /// Recording upstream
    pub upstream: Arc<StubUpstream>,
    /// Application config
    pub config: AppConfig,
}

impl TestApp {
    /// Create a new test application backed by in-memory stores.
    pub fn new() -> Self {
        let config = test_config();
        let stores = Stores::in_memory();
        let store_timeout = Duration::from_millis(config.database.statement_timeout_ms);

        let codec = Arc::new(TokenCodec::new(&config.auth).expect("Failed to build codec"));
        let ledger = RevocationLedger::new(Arc::clone(&stores.revocations), store_timeout);
        let authority = SessionAuthority::new(
            &config.auth,
            codec,
            ledger,
            Arc::clone(&stores.identities),
            store_timeout,
        )
        .expect("Failed to build session authority");

        let upstream = Arc::new(StubUpstream::default());
        let state = AppState::new(
            Arc::new(config.clone()),
            Arc::new(authority),
            Arc::clone(&upstream) as Arc<dyn UpstreamApi>,
        );

        Self {
            router: build_router(state),
            stores,
            upstream,
            config,
        }
    }

    /// Insert an admin straight into the identity store.
    pub async fn create_admin(&self, apartment: &str, block: i16, password: &str) {
        let hasher = CredentialHasher::new(&self.config.auth).expect("Failed to build hasher");
        let password_hash = hasher.hash(password).expect("Failed to hash password");

        self.stores
            .identities
            .insert_unique(NewUser {
                name: "Building Admin".to_string(),
                email: format!("admin-{apartment}-{block}@condohub.test"),
                password_hash,
                key: NaturalKey::new(apartment, block),
                role: UserRole::Admin,
            })
            .await
            .expect("Failed to create admin");
    }

    /// Register a resident through the API.
    pub async fn register(&self, name: &str, apartment: &str, block: i16, password: &str) {
        let body = serde_json::json!({
            "name": name,
            "email": format!("{}-{}@condohub.test", apartment, block),
            "password": password,
            "apartment": apartment,
            "block": block,
        });

        let response = self
            .request("POST", "/api/users/register", Some(body), None)
            .await;

        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Register failed: {:?}",
            response.body
        );
    }

    /// Login and return the session token
    pub async fn login(&self, apartment: &str, block: i16, password: &str) -> String {
        let body = serde_json::json!({
            "apartment": apartment,
            "block": block,
            "password": password,
        });

        let response = self
            .request("POST", "/api/users/login", Some(body), None)
            .await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {:?}",
            response.body
        );

        response
            .body
            .get("token")
            .and_then(|v| v.as_str())
            .expect("No token in login response")
            .to_string()
    }

    /// Register a resident and log them in.
    pub async fn resident_token(&self, apartment: &str, block: i16) -> String {
        self.register("Ana Souza", apartment, block, "pass1234").await;
        self.login(apartment, block, "pass1234").await
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let authorization = token.map(|t| format!("Bearer {}", t));
        self.request_with_header(method, path, body, authorization.as_deref())
            .await
    }

    /// Make an HTTP request with a raw `Authorization` header value.
    pub async fn request_with_header(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        authorization: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(value) = authorization {
            req = req.header("Authorization", value);
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

fn test_config() -> AppConfig {
    AppConfig {
        server: ServerConfig::default(),
        database: DatabaseConfig {
            provider: StoreProvider::Memory,
            ..DatabaseConfig::default()
        },
        auth: AuthConfig {
            jwt_secret: "integration-test-signing-secret".to_string(),
            hash_memory_kib: 64,
            hash_iterations: 1,
            hash_parallelism: 1,
            ..AuthConfig::default()
        },
        revocation: RevocationConfig::default(),
        upstream: UpstreamConfig {
            base_url: "http://upstream.invalid".to_string(),
            ..UpstreamConfig::default()
        },
        logging: LoggingConfig::default(),
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
