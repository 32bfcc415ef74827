//! REST client adapter for the campaign service.
//!
//! Wraps every outgoing request against a fixed base origin with JSON
//! content negotiation and a shared cookie store, logs request/response
//! pairs, and normalizes failures into [`ApiError`]. The per-resource
//! modules hold the wire types and the typed async calls.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::ApiConfig;

pub mod campaign;
pub mod character;
pub mod dice;
pub mod monster;
pub mod session;

// ============================================================================
// Error Type
// ============================================================================

/// Normalized error shape for every call through the adapter.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No usable response arrived: connect failure, timeout, or the
    /// connection dropped mid-body.
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// The server answered with a non-success status. `message` is the
    /// server-supplied `error` field when present, otherwise the status
    /// line's canonical reason.
    #[error("server returned {status}: {message}")]
    Status { status: StatusCode, message: String },

    /// A 2xx response whose body did not match the expected shape.
    #[error("failed to decode response body: {0}")]
    Decode(#[source] reqwest::Error),
}

impl ApiError {
    /// HTTP status carried by this error, if a response was received.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Error body the service attaches to non-2xx responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

// ============================================================================
// Client
// ============================================================================

/// HTTP client bound to the campaign service origin.
///
/// Cheap to clone behind an `Arc`; all requests share one connection
/// pool, cookie store, and timeout ceiling.
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    /// Build a client from config. Fails only if the TLS backend cannot
    /// be initialized.
    pub fn new(config: &ApiConfig) -> Result<Self, reqwest::Error> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .cookie_store(true)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    /// Base origin this client is bound to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.execute(Method::GET, path, None::<&()>).await
    }

    pub(crate) async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.execute(Method::POST, path, Some(body)).await
    }

    pub(crate) async fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.execute(Method::PUT, path, Some(body)).await
    }

    /// DELETE returns no body worth decoding (the service answers 204).
    pub(crate) async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let url = format!("{}{path}", self.base_url);
        log::debug!("API request: DELETE {url}");

        let response = self
            .http
            .delete(&url)
            .send()
            .await
            .map_err(ApiError::Transport)?;

        let status = response.status();
        if status.is_success() {
            log::debug!("API response: DELETE {url} -> {status}");
            Ok(())
        } else {
            Err(Self::status_error(url, status, response).await)
        }
    }

    async fn execute<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, ApiError> {
        let url = format!("{}{path}", self.base_url);
        match body.map(serde_json::to_string) {
            Some(Ok(json)) => log::debug!("API request: {method} {url} body={json}"),
            _ => log::debug!("API request: {method} {url}"),
        }

        let mut request = self.http.request(method.clone(), &url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                log::error!("API request error: {method} {url}: {e}");
                return Err(ApiError::Transport(e));
            }
        };

        let status = response.status();
        if !status.is_success() {
            return Err(Self::status_error(url, status, response).await);
        }

        log::debug!("API response: {method} {url} -> {status}");
        response.json::<T>().await.map_err(|e| {
            log::error!("API decode error: {method} {url}: {e}");
            ApiError::Decode(e)
        })
    }

    /// Extract the server-supplied message from an error response,
    /// falling back to the status line's canonical reason.
    async fn status_error(url: String, status: StatusCode, response: reqwest::Response) -> ApiError {
        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string(),
        };
        log::error!("API response error: {url} -> {status}: {message}");
        ApiError::Status { status, message }
    }
}

// ============================================================================
// Health Check
// ============================================================================

/// Response of the service's `GET /test` liveness endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct Health {
    pub message: String,
    pub timestamp: String,
}

/// Ping the service. Used once at startup to report reachability.
pub async fn ping(api: &ApiClient) -> Result<Health, ApiError> {
    api.get("/test").await
}
