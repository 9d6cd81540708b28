//! Property search through the Serper Google search API

use crate::backend::BackendRequest;
use crate::config::ScoutConfig;
use crate::error::ScoutResult;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Number of organic results requested from Serper
pub const SEARCH_RESULT_COUNT: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SearchArgs {
    /// Search query for properties
    pub query: String,
}

/// Build search payload (pure function)
fn build_search_payload(query: &str) -> Value {
    json!({
        "q": query,
        "num": SEARCH_RESULT_COUNT,
    })
}

/// Build the Serper request
pub fn build_request(args: &SearchArgs, config: &ScoutConfig) -> ScoutResult<BackendRequest> {
    Ok(
        BackendRequest::new(&config.endpoints.serper_url, build_search_payload(&args.query))
            .header("X-API-KEY", &config.keys.serper)
            .header("Content-Type", "application/json"),
    )
}

/// Extract the first `limit` organic result links from a search response (pure function)
pub fn organic_links(search_result: &Value, limit: usize) -> Vec<String> {
    search_result
        .get("organic")
        .and_then(|organic| organic.as_array())
        .map(|organic| {
            organic
                .iter()
                .take(limit)
                .filter_map(|result| result.get("link").and_then(|link| link.as_str()))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
