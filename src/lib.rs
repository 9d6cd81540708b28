//! Property Scout - MCP tool server for property research
//!
//! Exposes three tools over the Model Context Protocol on stdio, each backed
//! by exactly one HTTP call to an external service:
//!
//! - `search_properties` - Google search through the Serper API
//! - `extract_property_data` - rendered page content through Browserless
//! - `analyze_properties` - sentiment analysis through the Hugging Face inference API
//!
//! Backend failures are returned to the client as error-flagged tool results
//! rather than protocol errors, so a misbehaving backend never tears down the
//! session.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use property_scout::{ApiKeys, PropertyScoutServer, ScoutConfig, ToolDispatcher};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ScoutConfig::new(ApiKeys::from_env()?);
//! let server = PropertyScoutServer::new(ToolDispatcher::from_config(config)?);
//! property_scout::serve_stdio(server).await?;
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod observability;
pub mod pipeline;
pub mod server;
pub mod testing;
pub mod tools;

pub use backend::{BackendFailure, BackendRequest, BackendResponse, HttpBackend, ReqwestBackend};
pub use config::{ApiKeys, ConfigError, FileConfig, ScoutConfig};
pub use dispatcher::ToolDispatcher;
pub use error::{ScoutError, ScoutResult};
pub use pipeline::{ScoutPipeline, ScoutReport};
pub use server::{serve_stdio, PropertyScoutServer};
pub use tools::{ToolArguments, ToolKind};
