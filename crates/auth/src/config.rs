//! Provider configuration for token verification.
//!
//! All settings live in an explicit [`AuthConfig`] passed to the verifier
//! at construction, so tests can inject alternate issuers and audiences
//! without touching the process environment.

use std::env;

/// Identity-provider settings shared by every service behind the gate.
#[derive(Clone, Debug)]
pub struct AuthConfig {
    /// Base URL of the Keycloak deployment, e.g. `http://keycloak:8080`.
    pub provider_url: String,
    /// Realm (tenant) name within the provider.
    pub realm: String,
    /// OAuth client id; tokens must carry it as their `aud` claim.
    pub client_id: String,
    /// Expected `iss` claim, compared by exact string equality.
    ///
    /// This can differ from `provider_url` when the provider is reached
    /// through a different host than the one it issues tokens for (the
    /// usual docker-compose setup), so it is configurable on its own.
    pub issuer: String,
}

impl AuthConfig {
    /// Load configuration from the environment.
    ///
    /// Reads `KEYCLOAK_URL`, `REALM_NAME`, `CLIENT_ID` and `TOKEN_ISSUER`.
    /// When `TOKEN_ISSUER` is unset the issuer is derived from the
    /// provider URL and realm.
    pub fn from_env() -> Self {
        let provider_url =
            env::var("KEYCLOAK_URL").unwrap_or_else(|_| "http://keycloak:8080".into());
        let realm = env::var("REALM_NAME").unwrap_or_else(|_| "mcp-realm".into());
        let client_id = env::var("CLIENT_ID").unwrap_or_else(|_| "mcp-client".into());
        let issuer = env::var("TOKEN_ISSUER")
            .unwrap_or_else(|_| format!("{}/realms/{realm}", provider_url.trim_end_matches('/')));
        Self {
            provider_url,
            realm,
            client_id,
            issuer,
        }
    }

    /// URL of the realm's JWKS document.
    pub fn jwks_url(&self) -> String {
        format!(
            "{}/realms/{}/protocol/openid-connect/certs",
            self.provider_url.trim_end_matches('/'),
            self.realm
        )
    }

    /// URL of the realm's token endpoint.
    ///
    /// Published in OAuth metadata for clients; the verifier itself never
    /// calls it.
    pub fn token_url(&self) -> String {
        format!(
            "{}/realms/{}/protocol/openid-connect/token",
            self.provider_url.trim_end_matches('/'),
            self.realm
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::config::AuthConfig;

    fn config(provider_url: &str) -> AuthConfig {
        AuthConfig {
            provider_url: provider_url.into(),
            realm: "mcp-realm".into(),
            client_id: "mcp-client".into(),
            issuer: "http://localhost:8080/realms/mcp-realm".into(),
        }
    }

    #[test]
    fn jwks_url_joins_realm_path() {
        let cfg = config("http://keycloak:8080");
        assert_eq!(
            cfg.jwks_url(),
            "http://keycloak:8080/realms/mcp-realm/protocol/openid-connect/certs"
        );
    }

    #[test]
    fn trailing_slash_does_not_double() {
        let cfg = config("http://keycloak:8080/");
        assert_eq!(
            cfg.jwks_url(),
            "http://keycloak:8080/realms/mcp-realm/protocol/openid-connect/certs"
        );
        assert_eq!(
            cfg.token_url(),
            "http://keycloak:8080/realms/mcp-realm/protocol/openid-connect/token"
        );
    }
}
