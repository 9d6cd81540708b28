//! Mock implementations for testing
//!
//! Provides a recording [`HttpBackend`] so dispatcher behavior can be tested
//! without any network access.

use crate::backend::{BackendFailure, BackendRequest, BackendResponse, HttpBackend};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::Mutex;

pub type MockOutcome = Result<BackendResponse, BackendFailure>;

/// Mock backend that records every request and replays scripted outcomes
///
/// Outcomes are consumed in order; once the script is exhausted the default
/// outcome (200 with `{}` unless configured) is returned.
#[derive(Debug)]
pub struct MockBackend {
    pub requests: Arc<Mutex<Vec<BackendRequest>>>,
    script: Mutex<VecDeque<MockOutcome>>,
    default_outcome: MockOutcome,
}

impl Default for MockBackend {
    fn default() -> Self {
        Self {
            requests: Arc::new(Mutex::new(Vec::new())),
            script: Mutex::new(VecDeque::new()),
            default_outcome: Ok(BackendResponse::new(200, "{}")),
        }
    }
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Always answer with `response`
    pub fn with_response(response: BackendResponse) -> Self {
        Self {
            default_outcome: Ok(response),
            ..Default::default()
        }
    }

    /// Always fail with `failure`
    pub fn with_failure(failure: BackendFailure) -> Self {
        Self {
            default_outcome: Err(failure),
            ..Default::default()
        }
    }

    /// Answer with `outcomes` in order, then fall back to the default
    pub fn with_script(outcomes: Vec<MockOutcome>) -> Self {
        Self {
            script: Mutex::new(outcomes.into()),
            ..Default::default()
        }
    }

    pub async fn call_count(&self) -> usize {
        self.requests.lock().await.len()
    }

    pub async fn get_requests(&self) -> Vec<BackendRequest> {
        self.requests.lock().await.clone()
    }

    pub async fn clear_history(&self) {
        self.requests.lock().await.clear();
    }
}

#[async_trait]
impl HttpBackend for MockBackend {
    async fn post_json(&self, request: BackendRequest) -> Result<BackendResponse, BackendFailure> {
        self.requests.lock().await.push(request);

        let scripted = self.script.lock().await.pop_front();
        scripted.unwrap_or_else(|| self.default_outcome.clone())
    }
}
