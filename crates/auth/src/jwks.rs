//! Signing-key retrieval.
//!
//! The verifier obtains key material through the [`KeySource`] capability
//! so that caching or single-flight fetching can be layered in later
//! without touching verification logic. The stock implementation,
//! [`HttpKeySource`], fetches the JWKS document fresh on every call with
//! a bounded timeout — acceptable at this scale, wasteful beyond it.

use crate::error::VerifyError;
use jsonwebtoken::jwk::JwkSet;
use std::time::Duration;

/// Default bound on a single JWKS fetch.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(5);

/// Source of the provider's public signing keys.
pub trait KeySource: Clone + Send + Sync + 'static {
    /// Fetch the current key set.
    ///
    /// Implementations must not serve fabricated or stale-on-error
    /// material: a failed fetch is a failed verification.
    fn fetch_keys(&self) -> impl Future<Output = Result<JwkSet, VerifyError>> + Send;
}

/// [`KeySource`] that GETs a JWKS document over HTTP on every call.
#[derive(Clone)]
pub struct HttpKeySource {
    client: reqwest::Client,
    url: String,
    timeout: Duration,
}

impl HttpKeySource {
    /// Create a key source for the given JWKS URL with the default timeout.
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_timeout(url, DEFAULT_FETCH_TIMEOUT)
    }

    /// Create a key source with an explicit per-fetch timeout.
    pub fn with_timeout(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
            timeout,
        }
    }
}

impl KeySource for HttpKeySource {
    async fn fetch_keys(&self) -> Result<JwkSet, VerifyError> {
        let response = self
            .client
            .get(&self.url)
            .timeout(self.timeout)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| VerifyError::KeysUnavailable(Box::new(e)))?;
        response
            .json::<JwkSet>()
            .await
            .map_err(|e| VerifyError::KeysUnavailable(Box::new(e)))
    }
}
