//! Bearer-token verification against a Keycloak realm.
//!
//! [`TokenVerifier`] matches a token's `kid` against the realm's JWKS,
//! verifies the RS256 signature and the standard claims (audience, issuer,
//! expiry), and requires a `preferred_username` claim so callers always
//! receive an identity rather than just a valid signature.
//!
//! ```rust,ignore
//! use gate_auth::{AuthConfig, HttpKeySource, TokenVerifier};
//!
//! let config = AuthConfig::from_env();
//! let verifier = TokenVerifier::new(&config, HttpKeySource::new(config.jwks_url()));
//! let claims = verifier.verify(token).await?;
//! println!("hello {}", claims.preferred_username);
//! ```

use crate::config::AuthConfig;
use crate::error::VerifyError;
use crate::jwks::KeySource;
use crate::layer::Validator;
use jsonwebtoken::{Algorithm, DecodingKey, TokenData, Validation, decode, decode_header};
use serde_json::{Map, Value};
use std::sync::Arc;

/// Claims decoded from a token that passed every check.
///
/// Never constructed from partially verified input: existence of a value
/// of this type means signature, audience, issuer, expiry and the
/// username requirement all held.
#[derive(Clone, Debug)]
pub struct VerifiedClaims {
    /// The `sub` claim (Keycloak user id), empty if absent.
    pub sub: String,
    /// The `preferred_username` claim. Always present.
    pub preferred_username: String,
    /// The full decoded claim mapping.
    pub claims: Map<String, Value>,
}

struct VerifierInner<S> {
    keys: S,
    validation: Validation,
}

/// Verifies bearer tokens issued by the configured realm.
///
/// Cheap to clone; clones share the key source and validation settings.
#[derive(Clone)]
pub struct TokenVerifier<S> {
    inner: Arc<VerifierInner<S>>,
}

impl<S: KeySource> TokenVerifier<S> {
    /// Build a verifier for the realm described by `config`, pulling
    /// signing keys from `keys`.
    ///
    /// The accepted algorithm is pinned to RS256; audience and issuer
    /// checks use `config.client_id` and `config.issuer` exactly.
    pub fn new(config: &AuthConfig, keys: S) -> Self {
        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[&config.client_id]);
        validation.set_issuer(&[&config.issuer]);
        Self {
            inner: Arc::new(VerifierInner { keys, validation }),
        }
    }

    /// Verify a compact JWT and return its claim set.
    ///
    /// Each call fetches the key set anew through the [`KeySource`];
    /// there is no caching and no retry.
    pub async fn verify(&self, token: &str) -> Result<VerifiedClaims, VerifyError> {
        let header = decode_header(token)?;
        if header.alg != Algorithm::RS256 {
            return Err(VerifyError::UnsupportedAlgorithm(header.alg));
        }
        let kid = header.kid.ok_or(VerifyError::MissingKeyId)?;

        let jwks = self.inner.keys.fetch_keys().await?;
        if jwks.keys.is_empty() {
            return Err(VerifyError::EmptyKeySet);
        }
        let jwk = jwks
            .find(&kid)
            .ok_or_else(|| VerifyError::NoMatchingKey(kid))?;
        let key = DecodingKey::from_jwk(jwk)?;

        let data: TokenData<Map<String, Value>> = decode(token, &key, &self.inner.validation)?;
        let claims = data.claims;

        let preferred_username = claims
            .get("preferred_username")
            .and_then(Value::as_str)
            .ok_or(VerifyError::MissingClaim("preferred_username"))?
            .to_owned();
        let sub = claims
            .get("sub")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_owned();

        Ok(VerifiedClaims {
            sub,
            preferred_username,
            claims,
        })
    }
}

impl<S: KeySource> Validator for TokenVerifier<S> {
    type Claims = VerifiedClaims;
    type Error = VerifyError;

    async fn validate(&self, token: &str) -> Result<VerifiedClaims, VerifyError> {
        self.verify(token).await
    }
}
