//! Tool dispatcher
//!
//! Turns a tool call (name + untyped arguments) into exactly one outbound
//! backend request and maps the outcome onto the uniform result envelope:
//!
//! - unknown name or malformed arguments → protocol error, no request sent
//! - 2xx response → single text entry, no error flag
//! - non-2xx response or network failure → single text entry
//!   `"<Backend> API error: <message>"` with the error flag set
//! - anything else → internal protocol error

use crate::backend::{BackendFailure, HttpBackend, ReqwestBackend};
use crate::config::ScoutConfig;
use crate::error::{ScoutError, ScoutResult};
use crate::tool_span;
use crate::tools::builtin::format::{backend_error_text, backend_message, status_message};
use crate::tools::{tool_descriptors, ToolArguments, ToolKind};
use rmcp::model::{CallToolResult, Content, JsonObject, Tool};
use std::sync::Arc;
use tracing::{debug, info, warn, Instrument};
use uuid::Uuid;

/// Dispatches tool calls to their backends
#[derive(Clone)]
pub struct ToolDispatcher {
    config: Arc<ScoutConfig>,
    backend: Arc<dyn HttpBackend>,
}

impl ToolDispatcher {
    /// Create a dispatcher with an injected backend
    pub fn new(config: Arc<ScoutConfig>, backend: Arc<dyn HttpBackend>) -> Self {
        Self { config, backend }
    }

    /// Create a dispatcher backed by a real HTTP client built from `config`
    pub fn from_config(config: ScoutConfig) -> ScoutResult<Self> {
        let backend = ReqwestBackend::new(&config.http)?;
        Ok(Self::new(Arc::new(config), Arc::new(backend)))
    }

    pub fn config(&self) -> &ScoutConfig {
        &self.config
    }

    /// Descriptors for `tools/list`
    pub fn list_tools(&self) -> ScoutResult<Vec<Tool>> {
        tool_descriptors()
    }

    /// Handle one `tools/call` request
    pub async fn call(
        &self,
        name: &str,
        arguments: Option<&JsonObject>,
    ) -> ScoutResult<CallToolResult> {
        let kind =
            ToolKind::from_name(name).ok_or_else(|| ScoutError::UnknownTool(name.to_string()))?;
        let arguments = kind.parse_arguments(arguments)?;
        self.execute(arguments).await
    }

    /// Run already-validated arguments against their backend
    pub async fn execute(&self, arguments: ToolArguments) -> ScoutResult<CallToolResult> {
        let kind = arguments.kind();
        let call_id = Uuid::new_v4();
        let span = tool_span!(tool = kind.name(), call_id = %call_id);

        async move {
            let request = arguments.build_request(&self.config)?;
            debug!("Dispatching backend request");

            match self.backend.post_json(request).await {
                Ok(response) if response.is_success() => {
                    let text = kind.format_success(&response.body)?;
                    info!(status = response.status, "Tool call succeeded");
                    Ok(CallToolResult::success(vec![Content::text(text)]))
                }
                Ok(response) => {
                    let message = backend_message(&response.body)
                        .unwrap_or_else(|| status_message(response.status));
                    warn!(status = response.status, error = %message, "Backend returned an error status");
                    Ok(recovered_error(kind, &message))
                }
                Err(BackendFailure::Transport(message)) => {
                    warn!(error = %message, "Backend request failed");
                    Ok(recovered_error(kind, &message))
                }
                Err(BackendFailure::Internal(message)) => Err(ScoutError::internal(message)),
            }
        }
        .instrument(span)
        .await
    }
}

/// Text of the first content entry of a tool result
pub fn result_text(result: &CallToolResult) -> Option<String> {
    result
        .content
        .first()
        .and_then(|content| content.as_text())
        .map(|text| text.text.clone())
}

/// Whether a tool result carries the error flag
pub fn is_error_result(result: &CallToolResult) -> bool {
    result.is_error == Some(true)
}

/// Error-flagged result for a failure attributable to the backend
fn recovered_error(kind: ToolKind, message: &str) -> CallToolResult {
    CallToolResult::error(vec![Content::text(backend_error_text(
        kind.backend_label(),
        message,
    ))])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::BackendResponse;
    use crate::testing::MockBackend;
    use serde_json::json;

    fn dispatcher(backend: Arc<MockBackend>) -> ToolDispatcher {
        ToolDispatcher::new(Arc::new(ScoutConfig::test_config()), backend)
    }

    fn args(value: serde_json::Value) -> JsonObject {
        value.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn test_unknown_tool_sends_nothing() {
        let backend = Arc::new(MockBackend::new());
        let result = dispatcher(backend.clone())
            .call("find_castles", Some(&args(json!({"query": "x"}))))
            .await;

        assert!(matches!(result, Err(ScoutError::UnknownTool(name)) if name == "find_castles"));
        assert_eq!(backend.call_count().await, 0);
    }

    #[tokio::test]
    async fn test_invalid_arguments_send_nothing() {
        let backend = Arc::new(MockBackend::new());
        let result = dispatcher(backend.clone())
            .call("extract_property_data", Some(&args(json!({"url": null}))))
            .await;

        assert!(matches!(result, Err(ScoutError::InvalidArguments { .. })));
        assert_eq!(backend.call_count().await, 0);
    }

    #[tokio::test]
    async fn test_success_is_not_flagged() {
        let backend = Arc::new(MockBackend::with_response(BackendResponse::new(
            200,
            r#"{"ok":true}"#,
        )));
        let result = dispatcher(backend.clone())
            .call("search_properties", Some(&args(json!({"query": "villa"}))))
            .await
            .unwrap();

        assert_ne!(result.is_error, Some(true));
        assert_eq!(result_text(&result).as_deref(), Some("{\n  \"ok\": true\n}"));
        assert_eq!(backend.call_count().await, 1);
    }

    #[tokio::test]
    async fn test_error_status_without_message_uses_status_text() {
        let backend = Arc::new(MockBackend::with_response(BackendResponse::new(
            500,
            "<html>oops</html>",
        )));
        let result = dispatcher(backend)
            .call("analyze_properties", Some(&args(json!({"text": "ok"}))))
            .await
            .unwrap();

        assert_eq!(result.is_error, Some(true));
        assert_eq!(
            result_text(&result).as_deref(),
            Some("Hugging Face API error: Request failed with status code 500")
        );
    }

    #[tokio::test]
    async fn test_internal_backend_failure_propagates() {
        let backend = Arc::new(MockBackend::with_failure(BackendFailure::Internal(
            "builder error".to_string(),
        )));
        let result = dispatcher(backend)
            .call("search_properties", Some(&args(json!({"query": "x"}))))
            .await;

        assert!(matches!(result, Err(ScoutError::Internal { .. })));
    }
}
