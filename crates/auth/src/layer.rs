//! Bearer-token middleware for axum routers.
//!
//! [`BearerLayer`] extracts the token from `Authorization: Bearer <token>`
//! and hands it to a [`Validator`]. On success the produced claims are
//! inserted into request extensions, readable in handlers via
//! `Extension(claims): Extension<VerifiedClaims>`. Every failure — missing
//! or malformed header, unreachable JWKS, bad signature, wrong claims —
//! collapses to a single 401 with a `WWW-Authenticate: Bearer` challenge;
//! the concrete cause is logged, never surfaced to the caller.
//!
//! ```rust,ignore
//! use gate_auth::{AuthConfig, BearerLayer, HttpKeySource, TokenVerifier};
//!
//! let config = AuthConfig::from_env();
//! let verifier = TokenVerifier::new(&config, HttpKeySource::new(config.jwks_url()));
//!
//! let app = axum::Router::new()
//!     .route("/context", axum::routing::get(handler))
//!     .layer(BearerLayer::new(verifier));
//! ```

use futures::future::BoxFuture;
use http::{HeaderValue, Request, Response, StatusCode, header};
use std::task::{Context, Poll};

/// Body returned with every 401, deliberately cause-agnostic.
const REJECTION_BODY: &str = "could not validate credentials";

/// Validates a bearer-token string and produces claims.
///
/// Implemented by [`TokenVerifier`](crate::TokenVerifier); tests implement
/// it with stubs to exercise routers without a network.
pub trait Validator: Clone + Send + Sync + 'static {
    /// Claims produced on successful validation.
    type Claims: Clone + Send + Sync + 'static;

    /// Error returned on rejection. Only logged.
    type Error: std::fmt::Display + Send;

    /// Validate the token and return claims, or the reason for rejection.
    fn validate(
        &self,
        token: &str,
    ) -> impl Future<Output = Result<Self::Claims, Self::Error>> + Send;
}

/// Tower [`Layer`](tower::Layer) that applies [`BearerService`].
#[derive(Clone)]
pub struct BearerLayer<V> {
    validator: V,
    challenge: HeaderValue,
}

impl<V> BearerLayer<V> {
    pub fn new(validator: V) -> Self {
        Self {
            validator,
            challenge: HeaderValue::from_static("Bearer"),
        }
    }

    /// Advertise an RFC 9728 Protected Resource Metadata document in the
    /// 401 challenge: `Bearer resource_metadata="<url>"`.
    pub fn with_resource_metadata(mut self, url: impl AsRef<str>) -> Self {
        let value = format!("Bearer resource_metadata=\"{}\"", url.as_ref());
        // We control the format and it is plain ASCII.
        self.challenge = HeaderValue::from_str(&value).expect("valid WWW-Authenticate header");
        self
    }
}

impl<V, S> tower::Layer<S> for BearerLayer<V>
where
    V: Clone,
{
    type Service = BearerService<V, S>;

    fn layer(&self, inner: S) -> Self::Service {
        BearerService {
            validator: self.validator.clone(),
            challenge: self.challenge.clone(),
            inner,
        }
    }
}

/// Tower service that authenticates requests before forwarding them.
#[derive(Clone)]
pub struct BearerService<V, S> {
    validator: V,
    challenge: HeaderValue,
    inner: S,
}

impl<V, S, B> tower::Service<Request<B>> for BearerService<V, S>
where
    V: Validator,
    S: tower::Service<Request<B>, Response = Response<axum::body::Body>> + Clone + Send + 'static,
    S::Future: Send,
    S::Error: Send,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<B>) -> Self::Future {
        let validator = self.validator.clone();
        let challenge = self.challenge.clone();
        let mut inner = self.inner.clone();
        // swap to ensure poll_ready state is preserved
        std::mem::swap(&mut self.inner, &mut inner);

        Box::pin(async move {
            let (parts, body) = req.into_parts();

            let token = parts
                .headers
                .get(header::AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.strip_prefix("Bearer "));

            let claims = match token {
                Some(token) => match validator.validate(token).await {
                    Ok(claims) => Some(claims),
                    Err(err) => {
                        tracing::warn!(error = %err, "bearer token rejected");
                        None
                    }
                },
                None => {
                    tracing::warn!("missing or malformed Authorization header");
                    None
                }
            };

            match claims {
                Some(claims) => {
                    let mut req = Request::from_parts(parts, body);
                    req.extensions_mut().insert(claims);
                    inner.call(req).await
                }
                None => {
                    let response = Response::builder()
                        .status(StatusCode::UNAUTHORIZED)
                        .header(header::WWW_AUTHENTICATE, challenge)
                        .body(axum::body::Body::from(REJECTION_BODY))
                        .expect("valid response");
                    Ok(response)
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::layer::{BearerLayer, Validator};
    use axum::{Extension, Router, routing::get};
    use http::{Request, StatusCode, header};
    use tower::ServiceExt;

    #[derive(Clone)]
    struct StubValidator;

    impl Validator for StubValidator {
        type Claims = String;
        type Error = String;

        async fn validate(&self, token: &str) -> Result<String, String> {
            if token == "good" {
                Ok("alice".into())
            } else {
                Err("bad token".into())
            }
        }
    }

    fn app() -> Router {
        Router::new()
            .route(
                "/protected",
                get(|Extension(user): Extension<String>| async move { user }),
            )
            .layer(BearerLayer::new(StubValidator))
    }

    fn request(auth: Option<&str>) -> Request<axum::body::Body> {
        let mut builder = Request::builder().uri("/protected");
        if let Some(auth) = auth {
            builder = builder.header(header::AUTHORIZATION, auth);
        }
        builder.body(axum::body::Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn missing_header_is_401_with_challenge() {
        let response = app().oneshot(request(None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Bearer"
        );
    }

    #[tokio::test]
    async fn non_bearer_scheme_is_401() {
        let response = app()
            .oneshot(request(Some("Basic YWxpY2U6cHc=")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn invalid_token_is_401() {
        let response = app().oneshot(request(Some("Bearer nope"))).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn valid_token_reaches_handler_with_claims() {
        let response = app().oneshot(request(Some("Bearer good"))).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        assert_eq!(&body[..], b"alice");
    }

    #[tokio::test]
    async fn resource_metadata_extends_challenge() {
        let app = Router::new()
            .route("/protected", get(|| async { "ok" }))
            .layer(
                BearerLayer::new(StubValidator)
                    .with_resource_metadata("https://mcp.example.com/.well-known/oauth-protected-resource"),
            );
        let response = app.oneshot(request(None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let challenge = response.headers().get(header::WWW_AUTHENTICATE).unwrap();
        assert_eq!(
            challenge,
            "Bearer resource_metadata=\"https://mcp.example.com/.well-known/oauth-protected-resource\""
        );
    }
}
