//! Verification failure taxonomy.
//!
//! Every variant collapses to the same 401 outcome at the HTTP layer; the
//! distinctions exist for logging and for tests.

use jsonwebtoken::Algorithm;
use thiserror::Error;

/// Why a bearer token was rejected.
#[derive(Error, Debug)]
pub enum VerifyError {
    /// The JWKS document could not be fetched (network error, timeout,
    /// or non-success HTTP status).
    #[error("failed to fetch signing keys: {0}")]
    KeysUnavailable(#[source] Box<dyn std::error::Error + Send + Sync>),
    /// The provider returned a JWKS document with no keys.
    #[error("signing key set is empty")]
    EmptyKeySet,
    /// The token header does not announce a key id.
    #[error("token header missing kid")]
    MissingKeyId,
    /// The token announces an algorithm other than the pinned RS256.
    #[error("unsupported token algorithm {0:?}")]
    UnsupportedAlgorithm(Algorithm),
    /// No key in the fetched JWKS matches the token's `kid`.
    #[error("no signing key matches kid {0:?}")]
    NoMatchingKey(String),
    /// Signature or standard-claim validation failed (bad signature,
    /// wrong audience or issuer, expired, malformed token).
    #[error("token rejected: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
    /// The signature was valid but a required claim is absent.
    #[error("token missing required claim {0:?}")]
    MissingClaim(&'static str),
}
