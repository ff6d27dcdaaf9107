//! Crossref MCP Server - Entry Point
//!
//! Provides both stdio (for desktop MCP clients) and HTTP transports.

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crossref_mcp::{CrossrefClient, config::Config, server::McpServer};

#[derive(Parser, Debug)]
#[command(name = "crossref-mcp")]
#[command(about = "MCP server for the Crossref REST API")]
#[command(version)]
struct Cli {
    /// Contact address for Crossref's polite pool (optional)
    #[arg(long, env = "CROSSREF_MAILTO")]
    mailto: Option<String>,

    /// Override the Crossref API base URL
    #[arg(long, env = "CROSSREF_API_URL")]
    api_url: Option<url::Url>,

    /// Transport mode: stdio or http
    #[arg(long, value_enum, default_value_t = Transport::Stdio)]
    transport: Transport,

    /// HTTP server port (only used with --transport http)
    #[arg(long, default_value = "8000", env = "PORT")]
    port: u16,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum Transport {
    /// Standard input/output (for desktop MCP clients)
    #[default]
    Stdio,
    /// JSON-RPC over HTTP POST
    Http,
}

/// Logs always go to stderr; stdout carries the stdio protocol stream.
fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if json {
        subscriber
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().compact().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    init_tracing(&cli.log_level, cli.json_logs);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        transport = ?cli.transport,
        polite_pool = cli.mailto.is_some(),
        "Starting Crossref MCP server"
    );

    let mut config = Config::new(cli.mailto);
    if let Some(api_url) = cli.api_url {
        config = config.with_api_url(api_url.as_str());
    }

    let client = CrossrefClient::new(config)?;
    let server = McpServer::new(client);

    match cli.transport {
        Transport::Stdio => {
            tracing::info!("Running in stdio mode");
            server.run_stdio().await?;
        }
        Transport::Http => {
            tracing::info!(port = cli.port, "Running in HTTP mode");
            server.run_http(cli.port).await?;
        }
    }

    Ok(())
}
