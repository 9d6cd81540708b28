//! Page content extraction through the Browserless headless Chrome API

use crate::backend::BackendRequest;
use crate::config::ScoutConfig;
use crate::error::{ScoutError, ScoutResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use url::Url;

/// Milliseconds Browserless waits after navigation before capturing content
pub const WAIT_FOR_MS: u64 = 2000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ExtractArgs {
    /// URL of the property listing page
    pub url: String,
}

/// Build extraction payload (pure function)
fn build_extract_payload(url: &str) -> Value {
    json!({
        "url": url,
        "waitFor": WAIT_FOR_MS,
        "gotoOptions": { "waitUntil": "networkidle0" },
    })
}

/// Append the API token to the endpoint as a query parameter
fn endpoint_with_token(endpoint: &str, token: &str) -> ScoutResult<String> {
    let mut url = Url::parse(endpoint)
        .map_err(|e| ScoutError::internal(format!("Invalid Browserless endpoint: {e}")))?;
    url.query_pairs_mut().append_pair("token", token);
    Ok(url.into())
}

/// Build the Browserless request
pub fn build_request(args: &ExtractArgs, config: &ScoutConfig) -> ScoutResult<BackendRequest> {
    let url = endpoint_with_token(&config.endpoints.browserless_url, &config.keys.browserless)?;

    Ok(BackendRequest::new(url, build_extract_payload(&args.url))
        .header("Content-Type", "application/json"))
}
