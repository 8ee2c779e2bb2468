//! HTTP context service gated by Keycloak bearer tokens.
//!
//! Two routes: an unauthenticated liveness probe at `/` and a protected
//! `/context` endpoint that returns per-user dummy context data. The
//! router is generic over the token [`Validator`] so tests can inject a
//! stub instead of a live JWKS fetch.

use axum::{Extension, Json, Router, routing::get};
use chrono::{SecondsFormat, Utc};
use gate_auth::{BearerLayer, Validator, VerifiedClaims};
use serde::Serialize;
use uuid::Uuid;

/// Response body for `GET /context`.
#[derive(Debug, Serialize)]
pub struct ContextResponse {
    /// Identifier of this response, fresh per request.
    pub request_id: String,
    /// The authenticated user's `sub` claim.
    pub user_id: String,
    pub context: ContextPayload,
}

/// The context payload itself.
#[derive(Debug, Serialize)]
pub struct ContextPayload {
    pub message: String,
    /// RFC 3339 UTC instant at which the response was produced.
    pub timestamp: String,
}

/// Response body for the liveness probe.
#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
}

async fn health() -> Json<Health> {
    Json(Health {
        status: "Model Context Protocol Server is running",
    })
}

async fn get_context(Extension(user): Extension<VerifiedClaims>) -> Json<ContextResponse> {
    Json(ContextResponse {
        request_id: Uuid::new_v4().to_string(),
        user_id: user.sub,
        context: ContextPayload {
            message: format!(
                "Hello, {}! This is your protected dummy data.",
                user.preferred_username
            ),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        },
    })
}

/// Build the service router.
///
/// `/context` sits behind the bearer layer; `/` stays open.
pub fn app<V>(validator: V) -> Router
where
    V: Validator<Claims = VerifiedClaims>,
{
    Router::new()
        .route("/context", get(get_context))
        .layer(BearerLayer::new(validator))
        .route("/", get(health))
}
