//! Process entry point: transport selection and lifecycle.

use anyhow::Context as _;
use clap::{Parser, ValueEnum};
use forceweaver_api_client::ApiClient;
use forceweaver_mcp_client::ForceWeaverServer;
use rmcp::transport::stdio;
use rmcp::transport::streamable_http_server::StreamableHttpService;
use rmcp::transport::streamable_http_server::session::local::LocalSessionManager;
use rmcp::ServiceExt as _;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Transport {
    /// Speak MCP over stdin/stdout (local clients).
    Stdio,
    /// Serve MCP over streamable HTTP (remote hosting).
    Http,
}

#[derive(Parser, Debug)]
#[command(name = "forceweaver-mcp-client", version, about = "MCP client for ForceWeaver Revenue Cloud health checking")]
struct Args {
    /// Base URL of the ForceWeaver API.
    #[arg(long, env = "FORCEWEAVER_API_URL", default_value = "https://mcp.forceweaver.com")]
    api_url: String,

    /// MCP transport.
    #[arg(long, env = "MCP_TRANSPORT", value_enum, default_value_t = Transport::Stdio)]
    transport: Transport,

    /// Listener port (http transport only).
    #[arg(long, env = "MCP_PORT", default_value_t = 8000)]
    port: u16,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr: stdout belongs to the stdio transport.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    url::Url::parse(&args.api_url)
        .with_context(|| format!("invalid API base URL '{}'", args.api_url))?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        api_url = %args.api_url,
        transport = ?args.transport,
        "starting ForceWeaver MCP client"
    );

    let client = Arc::new(ApiClient::new(&args.api_url));

    let result = match args.transport {
        Transport::Stdio => run_stdio(Arc::clone(&client)).await,
        Transport::Http => run_http(Arc::clone(&client), args.port).await,
    };

    tracing::info!("shutting down ForceWeaver MCP client");
    client.close();
    result
}

async fn run_stdio(client: Arc<ApiClient>) -> anyhow::Result<()> {
    let service = ForceWeaverServer::new(client)
        .serve(stdio())
        .await
        .context("serve MCP over stdio")?;
    service.waiting().await?;
    Ok(())
}

async fn run_http(client: Arc<ApiClient>, port: u16) -> anyhow::Result<()> {
    let service = StreamableHttpService::new(
        move || Ok(ForceWeaverServer::new(Arc::clone(&client))),
        LocalSessionManager::default().into(),
        Default::default(),
    );

    let router = axum::Router::new().nest_service("/mcp", service);
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
        .await
        .with_context(|| format!("bind port {port}"))?;

    tracing::info!(port, "serving MCP over streamable HTTP at /mcp");
    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await
        .context("serve MCP over http")?;
    Ok(())
}
