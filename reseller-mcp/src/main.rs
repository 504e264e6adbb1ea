//! MCP Server entry point for the Reseller API
//!
//! Starts the MCP server with stdio transport. Credentials and endpoint come
//! from `RESELLER_*` environment variables (see `reseller_api::env_vars`).

mod schemas;
mod server;

use std::process::ExitCode;

use reseller_api::ResellerClient;
use rmcp::ServiceExt;
use server::ResellerMcp;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing to stderr (MCP uses stdout for protocol)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time()
                .with_ansi(false),
        )
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    tracing::info!("Starting Reseller MCP Server");

    let client = match ResellerClient::from_env() {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("Failed to configure Reseller API client: {e}");
            return ExitCode::FAILURE;
        }
    };
    tracing::info!(
        "Using {} as reseller {}",
        client.config().base_url(),
        client.config().auth_user_id()
    );

    let mcp_server = ResellerMcp::new(client);

    // Start serving via stdio
    tracing::info!("Starting MCP server on stdio transport");
    let service = match mcp_server.serve(rmcp::transport::stdio()).await {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("Failed to start MCP server: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // Wait for the server to complete
    if let Err(e) = service.waiting().await {
        tracing::error!("MCP server error: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
