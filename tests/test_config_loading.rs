//! Configuration loading and validation tests
//!
//! Tests focus on BEHAVIOR of configuration loading, validation, and error handling.
//! We test observable outcomes, not implementation details of TOML parsing.

use property_scout::config::{
    ApiKeys, ConfigError, FileConfig, ScoutConfig, DEFAULT_BROWSERLESS_URL,
    DEFAULT_HUGGINGFACE_URL, DEFAULT_SERPER_URL,
};
use std::io::Write;
use std::time::Duration;
use tempfile::NamedTempFile;

mod test_helpers;
use test_helpers::test_keys;

fn write_config(contents: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    writeln!(temp_file, "{contents}").unwrap();
    temp_file
}

#[test]
fn test_config_loads_overrides_from_toml() {
    let temp_file = write_config(
        r#"
[endpoints]
serper_url = "http://localhost:9000/search"
huggingface_url = "https://router.huggingface.co/hf-inference/models/distilbert-base-uncased-finetuned-sst-2-english"

[http]
timeout_secs = 30
user_agent = "property-scout/0.1.0"
"#,
    );

    let config = ScoutConfig::load(Some(temp_file.path()), test_keys()).unwrap();

    assert_eq!(config.endpoints.serper_url, "http://localhost:9000/search");
    assert_eq!(config.endpoints.browserless_url, DEFAULT_BROWSERLESS_URL);
    assert!(config
        .endpoints
        .huggingface_url
        .starts_with("https://router.huggingface.co/"));
    assert_eq!(config.http.timeout(), Some(Duration::from_secs(30)));
    assert_eq!(config.http.user_agent.as_deref(), Some("property-scout/0.1.0"));
    assert_eq!(config.keys, test_keys());
}

#[test]
fn test_empty_file_uses_defaults() {
    let temp_file = write_config("");

    let file = FileConfig::load_from_file(temp_file.path()).unwrap();

    assert_eq!(file.endpoints.serper_url, DEFAULT_SERPER_URL);
    assert_eq!(file.endpoints.huggingface_url, DEFAULT_HUGGINGFACE_URL);
    assert_eq!(file.http.timeout(), None);
    assert_eq!(file.http.user_agent, None);
}

#[test]
fn test_invalid_url_is_rejected() {
    let temp_file = write_config(
        r#"
[endpoints]
browserless_url = "not a url"
"#,
    );

    let result = FileConfig::load_from_file(temp_file.path());

    match result {
        Err(ConfigError::InvalidUrl { field, .. }) => {
            assert_eq!(field, "endpoints.browserless_url");
        }
        other => panic!("expected invalid url error, got {other:?}"),
    }
}

#[test]
fn test_non_http_scheme_is_rejected() {
    let temp_file = write_config(
        r#"
[endpoints]
serper_url = "ftp://files.example/search"
"#,
    );

    let result = FileConfig::load_from_file(temp_file.path());
    assert!(matches!(result, Err(ConfigError::InvalidConfig(_))));
}

#[test]
fn test_zero_timeout_is_rejected() {
    let temp_file = write_config(
        r#"
[http]
timeout_secs = 0
"#,
    );

    let result = FileConfig::load_from_file(temp_file.path());
    assert!(matches!(result, Err(ConfigError::InvalidConfig(_))));
}

#[test]
fn test_malformed_toml_is_rejected() {
    let temp_file = write_config("[endpoints\nserper_url = ");

    let result = FileConfig::load_from_file(temp_file.path());
    assert!(matches!(result, Err(ConfigError::TomlParse(_))));
}

#[test]
fn test_missing_file_is_read_error() {
    let result = ScoutConfig::load(
        Some(std::path::Path::new("/nonexistent/property-scout.toml")),
        test_keys(),
    );
    assert!(matches!(result, Err(ConfigError::FileRead(_))));
}

#[test]
fn test_missing_keys_fail_in_order() {
    let result = ApiKeys::resolve(None, Some("b".to_string()), Some("c".to_string()));
    assert_eq!(
        result.unwrap_err().to_string(),
        "SERPER_API_KEY environment variable is required"
    );

    let result = ApiKeys::resolve(Some("a".to_string()), Some("  ".to_string()), None);
    assert_eq!(
        result.unwrap_err().to_string(),
        "BROWSERLESS_API_KEY environment variable is required"
    );

    let result = ApiKeys::resolve(Some("a".to_string()), Some("b".to_string()), Some(String::new()));
    assert_eq!(
        result.unwrap_err().to_string(),
        "HUGGINGFACE_API_KEY environment variable is required"
    );
}

#[test]
fn test_keys_are_masked_when_displayed() {
    let config = ScoutConfig::new(test_keys());

    let debug = format!("{config:?}");
    assert!(!debug.contains("serper-test-key"));
    assert!(debug.contains("serp****"));

    let shown = config.to_masked_toml().unwrap();
    assert!(!shown.contains("browserless-test-key"));
    assert!(!shown.contains("hf-test-key"));
    assert!(shown.contains("brow****"));
    assert!(shown.contains("hf-t****"));
    assert!(shown.contains(DEFAULT_SERPER_URL));
}
