//! Error types for the Property Scout server
//!
//! Maps internal errors to MCP protocol error codes. Backend failures are not
//! represented here: they are recovered into error-flagged tool results by the
//! dispatcher and never thrown.

use crate::backend::BackendFailure;
use crate::config::ConfigError;
use rmcp::model::ErrorCode;
use rmcp::ErrorData;
use thiserror::Error;

/// Longest message forwarded to a protocol peer
const MAX_ERROR_MESSAGE_LEN: usize = 500;
const TRUNCATE_SUFFIX: &str = "...[truncated]";

/// Main error type for Property Scout operations
#[derive(Debug, Error)]
pub enum ScoutError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Invalid {kind} arguments: {details}")]
    InvalidArguments { kind: &'static str, details: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Scout run failed: {0}")]
    Pipeline(String),
}

impl ScoutError {
    /// Create invalid arguments error
    pub fn invalid_arguments<S: Into<String>>(kind: &'static str, details: S) -> Self {
        Self::InvalidArguments {
            kind,
            details: details.into(),
        }
    }

    /// Create internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Protocol error code this error is reported under
    pub fn error_code(&self) -> ErrorCode {
        match self {
            ScoutError::UnknownTool(_) => ErrorCode::METHOD_NOT_FOUND,
            ScoutError::InvalidArguments { .. } => ErrorCode::INVALID_PARAMS,
            ScoutError::Config(_)
            | ScoutError::Internal { .. }
            | ScoutError::Serialization(_)
            | ScoutError::Pipeline(_) => ErrorCode::INTERNAL_ERROR,
        }
    }

    /// Whether the caller caused this error (as opposed to the server)
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            ScoutError::UnknownTool(_) | ScoutError::InvalidArguments { .. }
        )
    }

    /// Convert to an MCP protocol error
    pub fn to_error_data(&self) -> ErrorData {
        ErrorData::new(
            self.error_code(),
            truncate_error_message(&self.to_string()),
            None,
        )
    }
}

impl From<BackendFailure> for ScoutError {
    fn from(failure: BackendFailure) -> Self {
        ScoutError::internal(failure.to_string())
    }
}

impl From<ScoutError> for ErrorData {
    fn from(error: ScoutError) -> Self {
        error.to_error_data()
    }
}

/// Truncate very long messages so the total length stays within the limit
fn truncate_error_message(message: &str) -> String {
    if message.len() <= MAX_ERROR_MESSAGE_LEN {
        return message.to_string();
    }

    let max_content_len = MAX_ERROR_MESSAGE_LEN - TRUNCATE_SUFFIX.len();
    let mut cut = max_content_len;
    while !message.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}{}", &message[..cut], TRUNCATE_SUFFIX)
}

/// Result type for Property Scout operations
pub type ScoutResult<T> = Result<T, ScoutError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_tool_maps_to_method_not_found() {
        let error = ScoutError::UnknownTool("find_castles".to_string());
        let data = error.to_error_data();

        assert_eq!(data.code, ErrorCode::METHOD_NOT_FOUND);
        assert_eq!(data.message, "Unknown tool: find_castles");
    }

    #[test]
    fn test_invalid_arguments_maps_to_invalid_params() {
        let error = ScoutError::invalid_arguments("search", "missing query");
        let data = error.to_error_data();

        assert_eq!(data.code, ErrorCode::INVALID_PARAMS);
        assert_eq!(data.message, "Invalid search arguments: missing query");
    }

    #[test]
    fn test_internal_maps_to_internal_error() {
        let error = ScoutError::internal("unexpected state");
        assert_eq!(error.error_code(), ErrorCode::INTERNAL_ERROR);
        assert_eq!(error.to_string(), "Internal error: unexpected state");
        assert!(!error.is_caller_error());
    }

    #[test]
    fn test_config_error_maps_to_internal_error() {
        let error: ScoutError = ConfigError::MissingApiKey("SERPER_API_KEY").into();
        assert_eq!(error.error_code(), ErrorCode::INTERNAL_ERROR);
        assert!(error.to_string().contains("SERPER_API_KEY"));
    }

    #[test]
    fn test_backend_failure_converts_to_internal() {
        let error: ScoutError = BackendFailure::Internal("bad header".to_string()).into();
        assert!(matches!(error, ScoutError::Internal { .. }));
        assert_eq!(error.to_string(), "Internal error: bad header");
    }

    #[test]
    fn test_caller_errors() {
        assert!(ScoutError::UnknownTool("x".to_string()).is_caller_error());
        assert!(ScoutError::invalid_arguments("extract", "x").is_caller_error());
    }

    #[test]
    fn test_long_message_truncation() {
        let long_message = "x".repeat(600);
        let truncated = truncate_error_message(&long_message);

        assert!(truncated.len() <= MAX_ERROR_MESSAGE_LEN);
        assert!(truncated.ends_with(TRUNCATE_SUFFIX));
    }

    #[test]
    fn test_truncation_respects_char_boundaries() {
        let long_message = "é".repeat(400);
        let truncated = truncate_error_message(&long_message);

        assert!(truncated.len() <= MAX_ERROR_MESSAGE_LEN);
        assert!(truncated.ends_with(TRUNCATE_SUFFIX));
    }

    #[test]
    fn test_exactly_limit_not_truncated() {
        let message = "x".repeat(MAX_ERROR_MESSAGE_LEN);
        assert_eq!(truncate_error_message(&message), message);
    }
}
