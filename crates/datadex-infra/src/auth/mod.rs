//! OIDC client for the optional auth gateway.
//!
//! Implements the server side of the authorization-code flow: building the
//! provider authorize URL, exchanging the callback code for an access
//! token, and fetching the caller's profile from the userinfo endpoint.
//! One exchange per login; no refresh or token lifecycle management.
//!
//! The client secret is wrapped in [`secrecy::SecretString`] and is only
//! exposed when constructing the token request form.

use std::time::Duration;

use datadex_types::config::OAuthConfig;
use datadex_types::error::AuthError;
use datadex_types::identity::UserProfile;
use reqwest::Url;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::debug;

/// Scopes requested during login.
const SCOPES: &str = "openid profile";

/// OIDC client bound to a single identity-provider tenant.
pub struct OidcClient {
    client: reqwest::Client,
    client_id: String,
    client_secret: SecretString,
    redirect_uri: String,
    authorize_endpoint: Url,
    token_endpoint: String,
    userinfo_endpoint: String,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UserinfoResponse {
    sub: Option<String>,
    name: Option<String>,
}

impl OidcClient {
    /// Create a client for the Microsoft identity platform tenant in `config`.
    pub fn new(config: OAuthConfig) -> Result<Self, AuthError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| AuthError::Http(format!("HTTP client error: {e}")))?;

        let base = format!(
            "https://login.microsoftonline.com/{}/oauth2/v2.0",
            config.tenant
        );
        let authorize_endpoint = Url::parse(&format!("{base}/authorize"))
            .map_err(|e| AuthError::Http(format!("invalid tenant '{}': {e}", config.tenant)))?;

        Ok(Self {
            client,
            client_id: config.client_id,
            client_secret: config.client_secret,
            redirect_uri: config.redirect_uri,
            authorize_endpoint,
            token_endpoint: format!("{base}/token"),
            userinfo_endpoint: "https://graph.microsoft.com/oidc/userinfo".to_string(),
        })
    }

    /// Build the authorize URL the caller's browser is redirected to.
    pub fn authorize_url(&self, state: &str) -> String {
        let mut url = self.authorize_endpoint.clone();
        url.query_pairs_mut()
            .append_pair("client_id", &self.client_id)
            .append_pair("response_type", "code")
            .append_pair("redirect_uri", &self.redirect_uri)
            .append_pair("response_mode", "query")
            .append_pair("scope", SCOPES)
            .append_pair("state", state);
        url.into()
    }

    /// Exchange an authorization code for an access token.
    pub async fn exchange_code(&self, code: &str) -> Result<String, AuthError> {
        let form = [
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", &self.redirect_uri),
            ("client_id", &self.client_id),
            ("client_secret", self.client_secret.expose_secret()),
            ("scope", SCOPES),
        ];

        debug!("Exchanging authorization code for token");

        let response = self
            .client
            .post(&self.token_endpoint)
            .form(&form)
            .send()
            .await
            .map_err(|e| AuthError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::TokenExchange(format!("{status}: {body}")));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| AuthError::TokenExchange(e.to_string()))?;

        token.access_token.ok_or(AuthError::MissingToken)
    }

    /// Fetch the caller's profile from the userinfo endpoint.
    ///
    /// Fails when the provider returns no stable subject id. A missing name
    /// claim falls back to the subject id.
    pub async fn fetch_profile(&self, access_token: &str) -> Result<UserProfile, AuthError> {
        let response = self
            .client
            .get(&self.userinfo_endpoint)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AuthError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::Http(format!("userinfo returned {status}: {body}")));
        }

        let userinfo: UserinfoResponse = response
            .json()
            .await
            .map_err(|e| AuthError::Http(e.to_string()))?;

        let id = userinfo.sub.ok_or(AuthError::MissingSubject)?;
        let name = userinfo.name.unwrap_or_else(|| id.clone());
        Ok(UserProfile { id, name })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> OidcClient {
        OidcClient::new(OAuthConfig {
            client_id: "client-123".to_string(),
            client_secret: SecretString::from("s3cret"),
            tenant: "common".to_string(),
            redirect_uri: "http://localhost:8080/auth/callback".to_string(),
        })
        .unwrap()
    }

    #[test]
    fn test_authorize_url_carries_required_params() {
        let url = client().authorize_url("xyz");
        assert!(url.starts_with("https://login.microsoftonline.com/common/oauth2/v2.0/authorize?"));
        assert!(url.contains("client_id=client-123"));
        assert!(url.contains("response_type=code"));
        assert!(url.contains("response_mode=query"));
        assert!(url.contains("scope=openid+profile"));
        assert!(url.contains("state=xyz"));
        assert!(url.contains("redirect_uri=http%3A%2F%2Flocalhost%3A8080%2Fauth%2Fcallback"));
    }

    #[test]
    fn test_authorize_url_never_contains_secret() {
        let url = client().authorize_url("xyz");
        assert!(!url.contains("s3cret"));
    }
}
