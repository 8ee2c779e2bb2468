//! Binary entry point for the gate-context service.

use clap::Parser;
use gate_auth::{AuthConfig, HttpKeySource, TokenVerifier};
use std::net::SocketAddr;

/// Context service — serves protected per-user context data.
#[derive(Parser)]
#[command(name = "gate-context", version, about)]
struct Cli {
    /// Address to listen on.
    #[arg(long, default_value = "0.0.0.0:8000")]
    bind: SocketAddr,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
    let cli = Cli::parse();

    let config = AuthConfig::from_env();
    let verifier = TokenVerifier::new(&config, HttpKeySource::new(config.jwks_url()));
    let app = gate_context::app(verifier);

    let listener = tokio::net::TcpListener::bind(cli.bind)
        .await
        .expect("failed to bind");
    tracing::info!(addr = %cli.bind, issuer = %config.issuer, "context service listening");
    axum::serve(listener, app).await.expect("server error");
}
