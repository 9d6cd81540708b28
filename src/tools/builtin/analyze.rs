//! Sentiment analysis through the Hugging Face inference API

use crate::backend::BackendRequest;
use crate::config::ScoutConfig;
use crate::error::ScoutResult;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AnalyzeArgs {
    /// Property data text to analyze
    pub text: String,
}

fn build_analyze_payload(text: &str) -> Value {
    json!({ "inputs": text })
}

/// Build the Hugging Face inference request
pub fn build_request(args: &AnalyzeArgs, config: &ScoutConfig) -> ScoutResult<BackendRequest> {
    Ok(
        BackendRequest::new(&config.endpoints.huggingface_url, build_analyze_payload(&args.text))
            .header("Authorization", format!("Bearer {}", config.keys.huggingface))
            .header("Content-Type", "application/json"),
    )
}
