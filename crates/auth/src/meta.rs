//! OAuth 2.0 Protected Resource Metadata (RFC 9728).
//!
//! Serving `/.well-known/oauth-protected-resource` lets MCP clients
//! discover the Keycloak realm that issues tokens for a gated service.
//! The document itself is public; mount [`metadata_router`] outside the
//! bearer layer.

use axum::{Json, response::IntoResponse};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Well-known path at which the metadata is served.
pub const METADATA_PATH: &str = "/.well-known/oauth-protected-resource";

/// Protected Resource Metadata document.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProtectedResourceMetadata {
    /// Canonical URI of the protected service.
    pub resource: String,

    /// Authorization server(s) that issue tokens for this resource.
    pub authorization_servers: Vec<String>,

    /// Scopes supported by this resource.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scopes_supported: Option<Vec<String>>,

    /// Bearer token methods supported.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bearer_methods_supported: Option<Vec<String>>,
}

impl ProtectedResourceMetadata {
    /// Metadata for a resource whose sole authorization server is the
    /// given issuer (the Keycloak realm URL). Tokens are accepted from
    /// the `Authorization` header only.
    pub fn for_issuer(resource: impl Into<String>, issuer: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            authorization_servers: vec![issuer.into()],
            scopes_supported: None,
            bearer_methods_supported: Some(vec!["header".into()]),
        }
    }
}

/// Router serving the metadata document at [`METADATA_PATH`] as JSON.
pub fn metadata_router(metadata: ProtectedResourceMetadata) -> axum::Router {
    let metadata = Arc::new(metadata);
    axum::Router::new().route(
        METADATA_PATH,
        axum::routing::get(move || {
            let metadata = metadata.clone();
            async move { Json(metadata.as_ref().clone()).into_response() }
        }),
    )
}

#[cfg(test)]
mod tests {
    use crate::meta::{METADATA_PATH, ProtectedResourceMetadata, metadata_router};
    use http::{Request, StatusCode};
    use tower::ServiceExt;

    #[tokio::test]
    async fn serves_document_at_well_known_path() {
        let metadata = ProtectedResourceMetadata::for_issuer(
            "http://localhost:3000",
            "http://localhost:8080/realms/mcp-realm",
        );
        let app = metadata_router(metadata);
        let response = app
            .oneshot(
                Request::builder()
                    .uri(METADATA_PATH)
                    .body(axum::body::Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), 4096).await.unwrap();
        let doc: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(doc["resource"], "http://localhost:3000");
        assert_eq!(
            doc["authorization_servers"][0],
            "http://localhost:8080/realms/mcp-realm"
        );
        assert!(doc.get("scopes_supported").is_none());
    }
}
