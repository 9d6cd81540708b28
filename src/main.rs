//! Property Scout - Main Entry Point
//!
//! Runs the MCP server on stdio by default. The other subcommands are
//! operator conveniences that share the same configuration path.

use clap::{Parser, Subcommand};
use property_scout::config::{
    ApiKeys, ScoutConfig, BROWSERLESS_API_KEY_ENV, HUGGINGFACE_API_KEY_ENV, SERPER_API_KEY_ENV,
};
use property_scout::observability::init_default_logging;
use property_scout::pipeline::{ScoutPipeline, DEFAULT_LINK_LIMIT, DEFAULT_QUERY};
use property_scout::tools::tool_descriptors;
use property_scout::{serve_stdio, PropertyScoutServer, ToolDispatcher};
use std::path::PathBuf;
use std::process;
use tracing::{error, info};

/// Property research tools served over the Model Context Protocol
#[derive(Parser)]
#[command(name = "property-scout")]
#[command(about = "MCP server exposing property search, extraction and analysis tools")]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Serper API key
    #[arg(long, env = SERPER_API_KEY_ENV, hide_env_values = true, global = true)]
    serper_api_key: Option<String>,

    /// Browserless API token
    #[arg(long, env = BROWSERLESS_API_KEY_ENV, hide_env_values = true, global = true)]
    browserless_api_key: Option<String>,

    /// Hugging Face inference token
    #[arg(long, env = HUGGINGFACE_API_KEY_ENV, hide_env_values = true, global = true)]
    huggingface_api_key: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the tools over stdio (default)
    Serve,
    /// Print the tool descriptors as JSON
    Tools,
    /// Search, extract and analyze listings once, printing a JSON report
    Find {
        /// Search query
        #[arg(short, long, default_value = DEFAULT_QUERY)]
        query: String,

        /// Number of search results to follow
        #[arg(short, long, default_value_t = DEFAULT_LINK_LIMIT)]
        limit: usize,
    },
    /// Validate configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,
    },
}

#[tokio::main]
async fn main() {
    // A missing .env file is not an error
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    init_default_logging(cli.verbose);

    let command = cli.command.unwrap_or(Commands::Serve);

    // Listing tools needs no credentials
    if let Commands::Tools = command {
        if let Err(e) = print_tools() {
            error!("Command failed: {}", e);
            process::exit(1);
        }
        return;
    }

    let config = match load_configuration(
        cli.config.as_deref(),
        cli.serper_api_key,
        cli.browserless_api_key,
        cli.huggingface_api_key,
    ) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    let result = match command {
        Commands::Serve => run_server(config).await,
        Commands::Find { query, limit } => run_find(config, &query, limit).await,
        Commands::Config { show } => handle_config_command(&config, show),
        Commands::Tools => Ok(()),
    };

    if let Err(e) = result {
        error!("Command failed: {}", e);
        process::exit(1);
    }

    // stdin is read on a blocking thread that never yields to cancellation,
    // so dropping the runtime here would hang while the peer keeps the pipe open
    process::exit(0);
}

fn load_configuration(
    path: Option<&std::path::Path>,
    serper: Option<String>,
    browserless: Option<String>,
    huggingface: Option<String>,
) -> Result<ScoutConfig, Box<dyn std::error::Error>> {
    let keys = ApiKeys::resolve(serper, browserless, huggingface)?;
    if let Some(path) = path {
        info!("Loading configuration from: {}", path.display());
    }
    Ok(ScoutConfig::load(path, keys)?)
}

async fn run_server(config: ScoutConfig) -> Result<(), Box<dyn std::error::Error>> {
    info!(
        "Starting Property Scout MCP server v{}",
        env!("CARGO_PKG_VERSION")
    );

    let server = PropertyScoutServer::new(ToolDispatcher::from_config(config)?);
    serve_stdio(server).await?;

    info!("Server shutdown complete");
    Ok(())
}

async fn run_find(
    config: ScoutConfig,
    query: &str,
    limit: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let pipeline = ScoutPipeline::new(ToolDispatcher::from_config(config)?);
    let report = pipeline.run(query, limit).await?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn print_tools() -> Result<(), Box<dyn std::error::Error>> {
    let tools = tool_descriptors()?;
    println!("{}", serde_json::to_string_pretty(&tools)?);
    Ok(())
}

fn handle_config_command(
    config: &ScoutConfig,
    show: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if show {
        println!("{}", config.to_masked_toml()?);
    }

    info!("Configuration validation complete");
    Ok(())
}
