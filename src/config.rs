//! Configuration system for the Property Scout server
//!
//! Configuration comes from two places: the three backend API keys, which are
//! required and only ever read from the environment (or the equivalent CLI
//! flags), and an optional TOML file that can override backend endpoints and
//! HTTP client settings. Everything is resolved once at startup into an
//! immutable [`ScoutConfig`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Environment variable holding the Serper API key
pub const SERPER_API_KEY_ENV: &str = "SERPER_API_KEY";
/// Environment variable holding the Browserless API token
pub const BROWSERLESS_API_KEY_ENV: &str = "BROWSERLESS_API_KEY";
/// Environment variable holding the Hugging Face inference token
pub const HUGGINGFACE_API_KEY_ENV: &str = "HUGGINGFACE_API_KEY";

/// Default Serper search endpoint
pub const DEFAULT_SERPER_URL: &str = "https://google.serper.dev/search";
/// Default Browserless content endpoint (the token is appended as a query parameter)
pub const DEFAULT_BROWSERLESS_URL: &str = "https://chrome.browserless.io/content";
/// Default Hugging Face sentiment model endpoint
pub const DEFAULT_HUGGINGFACE_URL: &str =
    "https://api-inference.huggingface.co/models/distilbert-base-uncased-finetuned-sst-2-english";

/// Default config file locations, checked in order when no path is given
pub const DEFAULT_CONFIG_PATHS: [&str; 2] = ["property-scout.toml", "config/property-scout.toml"];

/// Fully resolved server configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ScoutConfig {
    pub keys: ApiKeys,
    pub endpoints: EndpointsSection,
    pub http: HttpSection,
}

/// Backend credentials
///
/// `Debug` masks every key so configs can be logged safely.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKeys {
    pub serper: String,
    pub browserless: String,
    pub huggingface: String,
}

/// File-backed part of the configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FileConfig {
    #[serde(default)]
    pub endpoints: EndpointsSection,
    #[serde(default)]
    pub http: HttpSection,
}

/// Backend endpoint overrides
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EndpointsSection {
    #[serde(default = "default_serper_url")]
    pub serper_url: String,
    #[serde(default = "default_browserless_url")]
    pub browserless_url: String,
    #[serde(default = "default_huggingface_url")]
    pub huggingface_url: String,
}

impl Default for EndpointsSection {
    fn default() -> Self {
        Self {
            serper_url: default_serper_url(),
            browserless_url: default_browserless_url(),
            huggingface_url: default_huggingface_url(),
        }
    }
}

fn default_serper_url() -> String {
    DEFAULT_SERPER_URL.to_string()
}

fn default_browserless_url() -> String {
    DEFAULT_BROWSERLESS_URL.to_string()
}

fn default_huggingface_url() -> String {
    DEFAULT_HUGGINGFACE_URL.to_string()
}

/// Outbound HTTP client settings
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct HttpSection {
    /// Request timeout in seconds; unset keeps the client default (no timeout)
    pub timeout_secs: Option<u64>,
    /// Optional User-Agent header for outbound requests
    pub user_agent: Option<String>,
}

impl HttpSection {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),
    #[error("{0} environment variable is required")]
    MissingApiKey(&'static str),
    #[error("Invalid URL for {field}: {source}")]
    InvalidUrl {
        field: &'static str,
        #[source]
        source: url::ParseError,
    },
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ApiKeys {
    /// Build keys from optional values, failing on the first one that is missing or empty
    pub fn resolve(
        serper: Option<String>,
        browserless: Option<String>,
        huggingface: Option<String>,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            serper: require_key(serper, SERPER_API_KEY_ENV)?,
            browserless: require_key(browserless, BROWSERLESS_API_KEY_ENV)?,
            huggingface: require_key(huggingface, HUGGINGFACE_API_KEY_ENV)?,
        })
    }

    /// Read all three keys from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::resolve(
            std::env::var(SERPER_API_KEY_ENV).ok(),
            std::env::var(BROWSERLESS_API_KEY_ENV).ok(),
            std::env::var(HUGGINGFACE_API_KEY_ENV).ok(),
        )
    }
}

fn require_key(value: Option<String>, env_name: &'static str) -> Result<String, ConfigError> {
    match value {
        Some(key) if !key.trim().is_empty() => Ok(key),
        _ => Err(ConfigError::MissingApiKey(env_name)),
    }
}

/// Mask a secret for display, keeping at most the first four characters
pub fn mask_secret(secret: &str) -> String {
    let visible: String = secret.chars().take(4).collect();
    if secret.chars().count() <= 4 {
        "****".to_string()
    } else {
        format!("{visible}****")
    }
}

impl fmt::Debug for ApiKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiKeys")
            .field("serper", &mask_secret(&self.serper))
            .field("browserless", &mask_secret(&self.browserless))
            .field("huggingface", &mask_secret(&self.huggingface))
            .finish()
    }
}

impl FileConfig {
    /// Load the file part of the configuration from TOML
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: FileConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate endpoint URLs and HTTP settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_url("endpoints.serper_url", &self.endpoints.serper_url)?;
        validate_url("endpoints.browserless_url", &self.endpoints.browserless_url)?;
        validate_url("endpoints.huggingface_url", &self.endpoints.huggingface_url)?;

        if self.http.timeout_secs == Some(0) {
            return Err(ConfigError::InvalidConfig(
                "http.timeout_secs must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

fn validate_url(field: &'static str, value: &str) -> Result<(), ConfigError> {
    let parsed = Url::parse(value).map_err(|source| ConfigError::InvalidUrl { field, source })?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(ConfigError::InvalidConfig(format!(
            "{field} must use http or https, got '{scheme}'"
        ))),
    }
}

impl ScoutConfig {
    /// Configuration with default endpoints and the given keys
    pub fn new(keys: ApiKeys) -> Self {
        Self::from_parts(keys, FileConfig::default())
    }

    pub fn from_parts(keys: ApiKeys, file: FileConfig) -> Self {
        Self {
            keys,
            endpoints: file.endpoints,
            http: file.http,
        }
    }

    /// Resolve configuration from an optional TOML file plus keys
    ///
    /// With no explicit path the default locations are tried; if none exists
    /// the built-in defaults are used.
    pub fn load(path: Option<&Path>, keys: ApiKeys) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => FileConfig::load_from_file(path)?,
            None => match DEFAULT_CONFIG_PATHS
                .iter()
                .map(Path::new)
                .find(|candidate| candidate.exists())
            {
                Some(found) => FileConfig::load_from_file(found)?,
                None => FileConfig::default(),
            },
        };

        Ok(Self::from_parts(keys, file))
    }

    /// Render the resolved configuration as TOML with keys masked
    pub fn to_masked_toml(&self) -> Result<String, toml::ser::Error> {
        #[derive(Serialize)]
        struct MaskedKeys {
            serper: String,
            browserless: String,
            huggingface: String,
        }

        #[derive(Serialize)]
        struct MaskedConfig<'a> {
            keys: MaskedKeys,
            endpoints: &'a EndpointsSection,
            http: &'a HttpSection,
        }

        toml::to_string_pretty(&MaskedConfig {
            keys: MaskedKeys {
                serper: mask_secret(&self.keys.serper),
                browserless: mask_secret(&self.keys.browserless),
                huggingface: mask_secret(&self.keys.huggingface),
            },
            endpoints: &self.endpoints,
            http: &self.http,
        })
    }

    /// Create a test configuration for unit testing
    #[cfg(test)]
    pub fn test_config() -> Self {
        Self::new(ApiKeys {
            serper: "serper-test-key".to_string(),
            browserless: "browserless-test-key".to_string(),
            huggingface: "hf-test-key".to_string(),
        })
    }
}
