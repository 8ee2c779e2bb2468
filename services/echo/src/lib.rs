//! MCP server exposing a single `echo` tool.
//!
//! The tool itself is a passthrough; the interesting part is that the
//! server is only reachable through the bearer gate wired up in the
//! binary.

use rmcp::{
    ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{Implementation, ServerCapabilities, ServerInfo},
    schemars::{self, JsonSchema},
    tool, tool_handler, tool_router,
};
use serde::Deserialize;

/// Parameters for the `echo` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct EchoParams {
    /// The message to echo back.
    pub message: String,
}

/// MCP echo server.
#[derive(Debug, Clone)]
pub struct EchoServer {
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl EchoServer {
    /// Create a new echo server.
    pub fn new() -> Self {
        Self {
            tool_router: Self::tool_router(),
        }
    }

    /// Return the provided message unchanged.
    #[tool(description = "Echo the provided message")]
    async fn echo(&self, Parameters(params): Parameters<EchoParams>) -> String {
        params.message
    }
}

impl Default for EchoServer {
    fn default() -> Self {
        Self::new()
    }
}

#[tool_handler]
impl ServerHandler for EchoServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "gate-echo".into(),
                title: Some("Gate MCP Echo Server".into()),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            instructions: Some(
                "Echo server returning any provided message unchanged. \
                 Requests require a bearer token from the configured realm."
                    .into(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{EchoParams, EchoServer};
    use rmcp::handler::server::wrapper::Parameters;

    #[tokio::test]
    async fn echo_returns_message_unchanged() {
        let server = EchoServer::new();
        let result = server
            .echo(Parameters(EchoParams {
                message: "hello, world".into(),
            }))
            .await;
        assert_eq!(result, "hello, world");
    }

    #[tokio::test]
    async fn echo_preserves_empty_and_unicode() {
        let server = EchoServer::new();
        assert_eq!(
            server.echo(Parameters(EchoParams { message: "".into() })).await,
            ""
        );
        assert_eq!(
            server
                .echo(Parameters(EchoParams {
                    message: "héllo 🦀".into()
                }))
                .await,
            "héllo 🦀"
        );
    }
}
