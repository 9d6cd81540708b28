//! MCP server surface
//!
//! [`PropertyScoutServer`] adapts the [`ToolDispatcher`] to the rmcp
//! `ServerHandler` trait, and [`serve_stdio`] runs it over stdin/stdout until
//! the peer hangs up or the process is interrupted.

use crate::dispatcher::ToolDispatcher;
use crate::error::{ScoutError, ScoutResult};
use crate::lifecycle_span;
use rmcp::model::{
    CallToolRequestParams, CallToolResult, Implementation, ListToolsResult, PaginatedRequestParams,
    ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::service::RequestContext;
use rmcp::{ErrorData, RoleServer, ServerHandler, ServiceExt};
use tracing::{error, info, warn, Instrument};

/// Server name advertised during initialization
pub const SERVER_NAME: &str = "property-scout-server";

const INSTRUCTIONS: &str = "Property Scout - property research tools\n\n\
    Tools:\n\
    - search_properties: Google search via Serper (argument: query)\n\
    - extract_property_data: rendered page content via Browserless (argument: url)\n\
    - analyze_properties: sentiment analysis via Hugging Face (argument: text)\n";

/// MCP handler exposing the three property tools
#[derive(Clone)]
pub struct PropertyScoutServer {
    dispatcher: ToolDispatcher,
}

impl PropertyScoutServer {
    pub fn new(dispatcher: ToolDispatcher) -> Self {
        Self { dispatcher }
    }

    pub fn dispatcher(&self) -> &ToolDispatcher {
        &self.dispatcher
    }
}

/// Log a request-level error and convert it for the peer
fn report(tool: &str, error: ScoutError) -> ErrorData {
    if error.is_caller_error() {
        warn!(tool, error = %error, "Rejected tool call");
    } else {
        error!(tool, error = %error, "Tool call failed");
    }
    error.to_error_data()
}

impl ServerHandler for PropertyScoutServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(INSTRUCTIONS.to_string()),
        }
    }

    async fn list_tools(
        &self,
        _pagination: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, ErrorData> {
        let tools = self
            .dispatcher
            .list_tools()
            .map_err(|e| report("tools/list", e))?;

        Ok(ListToolsResult {
            tools,
            meta: Default::default(),
            next_cursor: None,
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        self.dispatcher
            .call(&request.name, request.arguments.as_ref())
            .await
            .map_err(|e| report(&request.name, e))
    }
}

/// Resolve on the first shutdown signal, returning its name
async fn shutdown_signal() -> &'static str {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = ctrl_c() => "SIGINT",
                    _ = sigterm.recv() => "SIGTERM",
                }
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                ctrl_c().await;
                "SIGINT"
            }
        }
    }

    #[cfg(not(unix))]
    {
        ctrl_c().await;
        "SIGINT"
    }
}

/// Wait for Ctrl-C; never resolves if the handler cannot be installed
async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for interrupt signal: {}", e);
        std::future::pending::<()>().await;
    }
}

/// Serve `server` over stdio until the peer disconnects or a signal arrives
///
/// On a signal the session is cancelled, which closes the transport, and the
/// function returns `Ok(())`.
pub async fn serve_stdio(server: PropertyScoutServer) -> ScoutResult<()> {
    let span = lifecycle_span!(event = "serve_stdio");

    async move {
        let service = server
            .serve(rmcp::transport::stdio())
            .await
            .map_err(|e| ScoutError::internal(format!("Failed to start MCP session: {e}")))?;

        info!("Property Scout MCP server running on stdio");

        let cancel = service.cancellation_token();
        let waiting = service.waiting();
        tokio::pin!(waiting);

        let outcome = tokio::select! {
            result = &mut waiting => result,
            signal = shutdown_signal() => {
                info!(signal, "Received shutdown signal, closing transport");
                cancel.cancel();
                waiting.await
            }
        };

        match outcome {
            Ok(reason) => {
                info!(?reason, "MCP session ended");
                Ok(())
            }
            Err(e) => Err(ScoutError::internal(format!("MCP session task failed: {e}"))),
        }
    }
    .instrument(span)
    .await
}
