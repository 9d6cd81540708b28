//! Outbound HTTP layer for the three hosted backends
//!
//! The dispatcher never talks to `reqwest` directly. It builds a
//! [`BackendRequest`] and hands it to an [`HttpBackend`], which lets tests swap
//! the network for a recording mock.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

pub mod http_client;

pub use http_client::ReqwestBackend;

/// A single JSON POST to a backend
#[derive(Debug, Clone, PartialEq)]
pub struct BackendRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Value,
}

impl BackendRequest {
    pub fn new(url: impl Into<String>, body: Value) -> Self {
        Self {
            url: url.into(),
            headers: Vec::new(),
            body,
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Look up a header value by case-insensitive name
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Raw backend reply; any status, including non-2xx
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendResponse {
    pub status: u16,
    pub body: String,
}

impl BackendResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Failures that prevented a backend from producing a response
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BackendFailure {
    /// Network-level failure (connect, TLS, reset, timeout, body read)
    #[error("{0}")]
    Transport(String),
    /// The request could not be built or sent for reasons unrelated to the API
    #[error("{0}")]
    Internal(String),
}

/// Transport seam used by the dispatcher for every outbound call
#[async_trait]
pub trait HttpBackend: Send + Sync {
    /// POST `request.body` as JSON and return the raw response
    async fn post_json(&self, request: BackendRequest) -> Result<BackendResponse, BackendFailure>;
}
