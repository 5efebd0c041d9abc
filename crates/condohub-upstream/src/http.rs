//! reqwest implementation of [`UpstreamApi`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde_json::Value;
use tracing::{debug, warn};

use condohub_core::config::UpstreamConfig;
use condohub_core::error::AppError;
use condohub_core::result::AppResult;

use crate::api::{QueryPairs, UpstreamApi};

/// HTTP client for the upstream API.
#[derive(Debug, Clone)]
pub struct HttpUpstream {
    client: Client,
    base_url: Url,
}

impl HttpUpstream {
    /// Builds a client with the configured base URL and per-request timeout.
    pub fn new(config: &UpstreamConfig) -> AppResult<Self> {
        let raw = config.base_url.trim_end_matches('/');
        let base_url = Url::parse(raw).map_err(|e| {
            AppError::configuration(format!("Invalid upstream.base_url '{raw}': {e}"))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(AppError::configuration(format!(
                "Invalid upstream.base_url '{raw}': not a hierarchical URL"
            )));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { client, base_url })
    }

    /// Appends `path` to the base URL one segment at a time, so each segment
    /// is percent-encoded and can never climb above the base path.
    fn url(&self, path: &str, query: &QueryPairs) -> AppResult<Url> {
        let segments: Vec<&str> = path.trim_matches('/').split('/').collect();
        if segments.iter().any(|s| matches!(*s, "" | "." | "..")) {
            warn!(path, "Refusing upstream path with empty or dot segments");
            return Err(AppError::validation(format!("Invalid upstream path '{path}'")));
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| AppError::internal("Upstream base URL cannot carry a path"))?
            .pop_if_empty()
            .extend(segments);
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        query: &QueryPairs,
        body: Option<&Value>,
        token: Option<&str>,
    ) -> AppResult<Value> {
        let url = self.url(path, query)?;
        debug!(method = %method, path = %url.path(), "Forwarding to upstream");

        let mut request: RequestBuilder = self.client.request(method.clone(), url);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            warn!(method = %method, path, error = %e, "Upstream request failed");
            if e.is_timeout() {
                AppError::upstream_unavailable("Upstream request timed out")
            } else {
                AppError::upstream_unavailable("Upstream API is unreachable")
            }
        })?;

        read_response(response).await
    }
}

/// Success bodies become JSON (or a JSON string when not JSON, or null when
/// empty). Failure bodies become an `Upstream` error.
async fn read_response(response: Response) -> AppResult<Value> {
    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| AppError::upstream_unavailable(format!("Failed to read upstream body: {e}")))?;

    let parsed = if text.trim().is_empty() {
        Value::Null
    } else {
        serde_json::from_str(&text).unwrap_or_else(|_| Value::String(text.clone()))
    };

    if status.is_success() {
        return Ok(parsed);
    }

    let message = match &parsed {
        Value::Object(map) => map
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string),
        Value::String(s) => Some(s.clone()),
        _ => None,
    }
    .unwrap_or_else(|| {
        status
            .canonical_reason()
            .unwrap_or("Upstream request failed")
            .to_string()
    });

    debug!(status = status.as_u16(), message = %message, "Upstream returned error");
    Err(AppError::upstream(status.as_u16(), message))
}

#[async_trait]
impl UpstreamApi for HttpUpstream {
    async fn get(&self, path: &str, query: &QueryPairs, token: Option<&str>) -> AppResult<Value> {
        self.send(Method::GET, path, query, None, token).await
    }

    async fn post(&self, path: &str, body: &Value, token: Option<&str>) -> AppResult<Value> {
        self.send(Method::POST, path, &[], Some(body), token).await
    }

    async fn put(&self, path: &str, body: &Value, token: Option<&str>) -> AppResult<Value> {
        self.send(Method::PUT, path, &[], Some(body), token).await
    }

    async fn delete(&self, path: &str, token: Option<&str>) -> AppResult<Value> {
        self.send(Method::DELETE, path, &[], None, token).await
    }
}
