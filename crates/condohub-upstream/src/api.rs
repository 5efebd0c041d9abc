//! Uniform verb interface over the upstream API.

use async_trait::async_trait;
use serde_json::Value;

use condohub_core::result::AppResult;

/// Query string parameters, in order.
pub type QueryPairs = [(String, String)];

/// One capability set (`get`, `post`, `put`, `delete`) over a path, an
/// optional body and an optional bearer token.
///
/// Implementations forward the token as `Authorization: Bearer` when present
/// and map a non-success response to [`condohub_core::ErrorKind::Upstream`]
/// carrying the upstream status and message. Transport failures and timeouts
/// map to [`condohub_core::ErrorKind::UpstreamUnavailable`]. Nothing is
/// retried.
#[async_trait]
pub trait UpstreamApi: Send + Sync + 'static {
    /// `GET {path}?{query}`.
    async fn get(&self, path: &str, query: &QueryPairs, token: Option<&str>) -> AppResult<Value>;

    /// `POST {path}` with a JSON body.
    async fn post(&self, path: &str, body: &Value, token: Option<&str>) -> AppResult<Value>;

    /// `PUT {path}` with a JSON body.
    async fn put(&self, path: &str, body: &Value, token: Option<&str>) -> AppResult<Value>;

    /// `DELETE {path}`.
    async fn delete(&self, path: &str, token: Option<&str>) -> AppResult<Value>;
}
