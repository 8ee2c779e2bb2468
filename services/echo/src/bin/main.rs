//! Binary entry point for the gate-echo MCP server.
//!
//! Serves [`EchoServer`] over the streamable HTTP transport at `/mcp`,
//! wrapped in the bearer gate. The RFC 9728 metadata document stays
//! outside the gate so clients can discover the authorization server.

use clap::Parser;
use gate_auth::meta::{METADATA_PATH, ProtectedResourceMetadata, metadata_router};
use gate_auth::{AuthConfig, BearerLayer, HttpKeySource, TokenVerifier};
use gate_echo::EchoServer;
use rmcp::transport::streamable_http_server::{
    StreamableHttpServerConfig, StreamableHttpService, session::local::LocalSessionManager,
};
use std::net::SocketAddr;

/// MCP echo server behind the Keycloak bearer gate.
#[derive(Parser)]
#[command(name = "gate-echo", version, about)]
struct Cli {
    /// Address to listen on.
    #[arg(long, default_value = "0.0.0.0:3000")]
    bind: SocketAddr,

    /// Public base URL of this service, as clients reach it.
    #[arg(long, default_value = "http://localhost:3000")]
    public_url: String,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
    let cli = Cli::parse();

    let config = AuthConfig::from_env();
    let verifier = TokenVerifier::new(&config, HttpKeySource::new(config.jwks_url()));

    let public_url = cli.public_url.trim_end_matches('/').to_string();
    let metadata = ProtectedResourceMetadata::for_issuer(public_url.clone(), config.issuer.clone());

    let service = StreamableHttpService::new(
        || Ok(EchoServer::new()),
        LocalSessionManager::default().into(),
        StreamableHttpServerConfig::default(),
    );

    let app = axum::Router::new()
        .nest_service("/mcp", service)
        .layer(
            BearerLayer::new(verifier)
                .with_resource_metadata(format!("{public_url}{METADATA_PATH}")),
        )
        .merge(metadata_router(metadata));

    let listener = tokio::net::TcpListener::bind(cli.bind)
        .await
        .expect("failed to bind");
    tracing::info!(addr = %cli.bind, issuer = %config.issuer, "echo server listening");
    axum::serve(listener, app).await.expect("server error");
}
