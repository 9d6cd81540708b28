//! `reqwest`-backed implementation of [`HttpBackend`]

use super::{BackendFailure, BackendRequest, BackendResponse, HttpBackend};
use crate::config::HttpSection;
use async_trait::async_trait;
use reqwest::Client;
use std::error::Error as _;
use tracing::debug;

/// Production backend sharing one pooled `reqwest::Client`
#[derive(Debug, Clone)]
pub struct ReqwestBackend {
    client: Client,
}

impl ReqwestBackend {
    /// Build a client from the HTTP section of the configuration
    pub fn new(http: &HttpSection) -> Result<Self, BackendFailure> {
        let mut builder = Client::builder();

        if let Some(timeout) = http.timeout() {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = &http.user_agent {
            builder = builder.user_agent(user_agent.clone());
        }

        let client = builder
            .build()
            .map_err(|e| BackendFailure::Internal(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { client })
    }

    /// Wrap an existing client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Classify a reqwest error (pure function)
    fn classify_error(err: reqwest::Error) -> BackendFailure {
        let is_builder = err.is_builder();
        let message = describe_error(err);
        if is_builder {
            BackendFailure::Internal(message)
        } else {
            BackendFailure::Transport(message)
        }
    }
}

/// Render an error and its source chain, with the request URL stripped
///
/// The Browserless token travels in the query string, so the URL must never
/// end up in a message.
fn describe_error(err: reqwest::Error) -> String {
    let err = err.without_url();
    let mut message = err.to_string();
    let mut source = err.source();

    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !message.ends_with(&cause_text) {
            message.push_str(": ");
            message.push_str(&cause_text);
        }
        source = cause.source();
    }

    message
}

#[async_trait]
impl HttpBackend for ReqwestBackend {
    async fn post_json(&self, request: BackendRequest) -> Result<BackendResponse, BackendFailure> {
        let mut builder = self.client.post(&request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder
            .json(&request.body)
            .send()
            .await
            .map_err(Self::classify_error)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(Self::classify_error)?;

        debug!(status, body_len = body.len(), "Backend responded");

        Ok(BackendResponse { status, body })
    }
}
