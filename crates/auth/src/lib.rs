//! # gate-auth
//!
//! JWT bearer-token authentication against a Keycloak realm, shared by the
//! gate services.
//!
//! The flow per request: extract the bearer token, fetch the realm's JWKS
//! document, select the key matching the token's `kid`, verify the RS256
//! signature and standard claims (audience, issuer, expiry), and require a
//! `preferred_username` claim. Any failure along the way collapses to one
//! externally visible outcome: a 401 with a `WWW-Authenticate: Bearer`
//! challenge.
//!
//! ```rust,ignore
//! use gate_auth::{AuthConfig, BearerLayer, HttpKeySource, TokenVerifier, VerifiedClaims};
//! use axum::{Extension, routing::get};
//!
//! let config = AuthConfig::from_env();
//! let verifier = TokenVerifier::new(&config, HttpKeySource::new(config.jwks_url()));
//!
//! let app = axum::Router::new()
//!     .route("/context", get(|Extension(user): Extension<VerifiedClaims>| async move {
//!         format!("hello {}", user.preferred_username)
//!     }))
//!     .layer(BearerLayer::new(verifier));
//! ```

pub mod config;
pub mod error;
pub mod jwks;
pub mod layer;
pub mod meta;
pub mod verify;

pub use config::AuthConfig;
pub use error::VerifyError;
pub use jwks::{HttpKeySource, KeySource};
pub use layer::{BearerLayer, Validator};
pub use verify::{TokenVerifier, VerifiedClaims};
