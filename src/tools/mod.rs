//! Tool registry and per-tool dispatch table
//!
//! The three tools form a closed set, so they are modelled as the
//! [`ToolKind`] enum. Each kind knows its descriptor, how to narrow untyped
//! arguments into a typed [`ToolArguments`] value, which backend it talks to,
//! and how a successful response body is rendered.
//!
//! Input schemas are generated from the typed argument structs and the same
//! schema is used to validate incoming arguments, so what is advertised is
//! exactly what is enforced.

use crate::backend::BackendRequest;
use crate::config::ScoutConfig;
use crate::error::{ScoutError, ScoutResult};
use once_cell::sync::Lazy;
use rmcp::model::{JsonObject, Tool};
use schemars::schema::RootSchema;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

pub mod builtin;

pub use builtin::{AnalyzeArgs, ExtractArgs, SearchArgs};

/// Keys kept from the generated root schema
const SCHEMA_KEYS: [&str; 3] = ["type", "properties", "required"];

/// The fixed set of tools served by Property Scout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    SearchProperties = 0,
    ExtractPropertyData = 1,
    AnalyzeProperties = 2,
}

/// Typed, validated arguments for one tool call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolArguments {
    Search(SearchArgs),
    Extract(ExtractArgs),
    Analyze(AnalyzeArgs),
}

static INPUT_SCHEMAS: Lazy<Result<[Arc<JsonObject>; 3], String>> = Lazy::new(|| {
    Ok([
        input_schema_from(schemars::schema_for!(SearchArgs))?,
        input_schema_from(schemars::schema_for!(ExtractArgs))?,
        input_schema_from(schemars::schema_for!(AnalyzeArgs))?,
    ])
});

static VALIDATORS: Lazy<Result<Vec<jsonschema::Validator>, String>> = Lazy::new(|| {
    let schemas = INPUT_SCHEMAS.as_ref().map_err(Clone::clone)?;
    schemas
        .iter()
        .map(|schema| {
            jsonschema::validator_for(&Value::Object(schema.as_ref().clone()))
                .map_err(|e| format!("Schema compilation error: {e}"))
        })
        .collect()
});

/// Reduce a generated root schema to the plain `inputSchema` object
fn input_schema_from(root: RootSchema) -> Result<Arc<JsonObject>, String> {
    let value = serde_json::to_value(root).map_err(|e| e.to_string())?;
    let generated = value
        .as_object()
        .ok_or_else(|| "Generated schema is not an object".to_string())?;

    let schema: JsonObject = SCHEMA_KEYS
        .iter()
        .filter_map(|key| generated.get(*key).map(|v| (key.to_string(), v.clone())))
        .collect();

    Ok(Arc::new(schema))
}

impl ToolKind {
    /// Every tool, in listing order
    pub const ALL: [ToolKind; 3] = [
        ToolKind::SearchProperties,
        ToolKind::ExtractPropertyData,
        ToolKind::AnalyzeProperties,
    ];

    /// Exact-match lookup by protocol name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    pub fn name(&self) -> &'static str {
        match self {
            ToolKind::SearchProperties => "search_properties",
            ToolKind::ExtractPropertyData => "extract_property_data",
            ToolKind::AnalyzeProperties => "analyze_properties",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ToolKind::SearchProperties => "Search for properties using Google search via Serper API",
            ToolKind::ExtractPropertyData => {
                "Extract property data from a webpage using Browserless"
            }
            ToolKind::AnalyzeProperties => "Analyze property data using Hugging Face",
        }
    }

    /// Short verb used in argument error messages
    pub fn action(&self) -> &'static str {
        match self {
            ToolKind::SearchProperties => "search",
            ToolKind::ExtractPropertyData => "extract",
            ToolKind::AnalyzeProperties => "analyze",
        }
    }

    /// Name of the single required string argument
    pub fn required_field(&self) -> &'static str {
        match self {
            ToolKind::SearchProperties => "query",
            ToolKind::ExtractPropertyData => "url",
            ToolKind::AnalyzeProperties => "text",
        }
    }

    /// Human-readable backend name used as the error text prefix
    pub fn backend_label(&self) -> &'static str {
        match self {
            ToolKind::SearchProperties => "Serper",
            ToolKind::ExtractPropertyData => "Browserless",
            ToolKind::AnalyzeProperties => "Hugging Face",
        }
    }

    /// JSON schema advertised as `inputSchema`
    pub fn input_schema(&self) -> ScoutResult<Arc<JsonObject>> {
        INPUT_SCHEMAS
            .as_ref()
            .map(|schemas| Arc::clone(&schemas[*self as usize]))
            .map_err(|e| ScoutError::internal(e.clone()))
    }

    /// Descriptor returned from `tools/list`
    pub fn descriptor(&self) -> ScoutResult<Tool> {
        Ok(Tool::new(self.name(), self.description(), self.input_schema()?))
    }

    /// Validate untyped arguments against the input schema and narrow them
    pub fn parse_arguments(&self, arguments: Option<&JsonObject>) -> ScoutResult<ToolArguments> {
        let instance = arguments
            .map(|args| Value::Object(args.clone()))
            .unwrap_or(Value::Null);

        self.validate(&instance)?;

        let narrowed = match self {
            ToolKind::SearchProperties => serde_json::from_value(instance).map(ToolArguments::Search),
            ToolKind::ExtractPropertyData => {
                serde_json::from_value(instance).map(ToolArguments::Extract)
            }
            ToolKind::AnalyzeProperties => {
                serde_json::from_value(instance).map(ToolArguments::Analyze)
            }
        };

        narrowed.map_err(|e| ScoutError::invalid_arguments(self.action(), e.to_string()))
    }

    fn validate(&self, instance: &Value) -> ScoutResult<()> {
        let validators = VALIDATORS
            .as_ref()
            .map_err(|e| ScoutError::internal(e.clone()))?;

        validators[*self as usize]
            .validate(instance)
            .map_err(|errors| {
                let error_messages: Vec<String> = errors
                    .map(|e| {
                        let path = e.instance_path.to_string();
                        if path.is_empty() {
                            e.to_string()
                        } else {
                            format!("At '{path}': {e}")
                        }
                    })
                    .collect();
                ScoutError::invalid_arguments(self.action(), error_messages.join("; "))
            })
    }

    /// Render a successful backend body as tool output text
    ///
    /// Search and analyze results are pretty-printed JSON; extracted page
    /// content is passed through untouched.
    pub fn format_success(&self, body: &str) -> ScoutResult<String> {
        match self {
            ToolKind::ExtractPropertyData => Ok(body.to_string()),
            ToolKind::SearchProperties | ToolKind::AnalyzeProperties => {
                builtin::format::pretty_json_text(body)
            }
        }
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl ToolArguments {
    pub fn kind(&self) -> ToolKind {
        match self {
            ToolArguments::Search(_) => ToolKind::SearchProperties,
            ToolArguments::Extract(_) => ToolKind::ExtractPropertyData,
            ToolArguments::Analyze(_) => ToolKind::AnalyzeProperties,
        }
    }

    /// Build the single outbound request for these arguments
    pub fn build_request(&self, config: &ScoutConfig) -> ScoutResult<BackendRequest> {
        match self {
            ToolArguments::Search(args) => builtin::search::build_request(args, config),
            ToolArguments::Extract(args) => builtin::extract::build_request(args, config),
            ToolArguments::Analyze(args) => builtin::analyze::build_request(args, config),
        }
    }
}

/// All tool descriptors, in listing order
pub fn tool_descriptors() -> ScoutResult<Vec<Tool>> {
    ToolKind::ALL.iter().map(ToolKind::descriptor).collect()
}
