//! Test helpers and utilities for integration tests

use property_scout::config::{ApiKeys, EndpointsSection, FileConfig, ScoutConfig};
use property_scout::testing::MockBackend;
use property_scout::ToolDispatcher;
use rmcp::model::JsonObject;
use serde_json::Value;
use std::sync::Arc;

#[allow(dead_code)]
pub const SERPER_KEY: &str = "serper-test-key";
#[allow(dead_code)]
pub const BROWSERLESS_KEY: &str = "browserless-test-key";
#[allow(dead_code)]
pub const HUGGINGFACE_KEY: &str = "hf-test-key";

#[allow(dead_code)]
pub fn test_keys() -> ApiKeys {
    ApiKeys {
        serper: SERPER_KEY.to_string(),
        browserless: BROWSERLESS_KEY.to_string(),
        huggingface: HUGGINGFACE_KEY.to_string(),
    }
}

/// Create a test configuration with default endpoints
#[allow(dead_code)]
pub fn test_config() -> ScoutConfig {
    ScoutConfig::new(test_keys())
}

/// Create a test configuration whose endpoints all live under `base_url`
#[allow(dead_code)]
pub fn config_for_server(base_url: &str) -> ScoutConfig {
    ScoutConfig::from_parts(
        test_keys(),
        FileConfig {
            endpoints: EndpointsSection {
                serper_url: format!("{base_url}/search"),
                browserless_url: format!("{base_url}/content"),
                huggingface_url: format!("{base_url}/models/sentiment"),
            },
            ..Default::default()
        },
    )
}

#[allow(dead_code)]
pub fn mock_dispatcher(backend: Arc<MockBackend>) -> ToolDispatcher {
    ToolDispatcher::new(Arc::new(test_config()), backend)
}

/// Convert a JSON object literal into tool call arguments
#[allow(dead_code)]
pub fn args(value: Value) -> JsonObject {
    value
        .as_object()
        .cloned()
        .expect("tool arguments must be a JSON object")
}
