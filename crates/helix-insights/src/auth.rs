//! OAuth token management for Twitch authentication.
//!
//! [`TokenProvider`] is what the API client asks for a bearer token at
//! request-build time. [`TokenManager`] is the stock provider: it holds the
//! current token and renews it through [`TwitchAuth`].

use std::sync::{PoisonError, RwLock};

use chrono::Utc;
use serde::Deserialize;
use url::Url;

use crate::{HelixError, SCOPES, Token};

const AUTHORIZE_URL: &str = "https://id.twitch.tv/oauth2/authorize";
const TOKEN_URL: &str = "https://id.twitch.tv/oauth2/token";

/// Refresh when the token expires within this many seconds.
const REFRESH_MARGIN_SECS: i64 = 30 * 60;

/// Supplies the bearer token for outgoing requests.
pub trait TokenProvider: Send + Sync {
    /// Return the current usable token, or [`HelixError::AuthRequired`].
    fn token(&self) -> Result<Token, HelixError>;
}

impl<P: TokenProvider + ?Sized> TokenProvider for std::sync::Arc<P> {
    fn token(&self) -> Result<Token, HelixError> {
        (**self).token()
    }
}

/// Twitch OAuth token response from the token endpoint.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: String,
    expires_in: i64,
    scope: Option<Vec<String>>,
}

/// Twitch OAuth error response.
#[derive(Debug, Default, Deserialize)]
struct ErrorResponse {
    error: Option<String>,
    status: Option<u16>,
    message: Option<String>,
    error_description: Option<String>,
}

/// OAuth endpoints on `id.twitch.tv`.
pub struct TwitchAuth {
    client_id: String,
    client_secret: String,
    redirect_uri: String,
    token_url: String,
    http: reqwest::Client,
}

impl TwitchAuth {
    pub fn new(client_id: String, client_secret: String, redirect_uri: String) -> Self {
        Self {
            client_id,
            client_secret,
            redirect_uri,
            token_url: TOKEN_URL.to_string(),
            http: reqwest::Client::new(),
        }
    }

    /// Point token exchange and refresh at another endpoint.
    pub fn with_token_url(mut self, token_url: impl Into<String>) -> Self {
        self.token_url = token_url.into();
        self
    }

    /// Generate the OAuth authorization URL with the scopes the endpoints need.
    pub fn get_auth_url(&self) -> Result<String, HelixError> {
        let scope_str = SCOPES.join(" ");
        let mut url = Url::parse(AUTHORIZE_URL)?;
        url.query_pairs_mut()
            .append_pair("response_type", "code")
            .append_pair("client_id", &self.client_id)
            .append_pair("redirect_uri", &self.redirect_uri)
            .append_pair("scope", &scope_str)
            .append_pair("force_verify", "true");
        Ok(url.to_string())
    }

    /// Exchange an authorization code for access and refresh tokens.
    pub async fn exchange_code(&self, code: &str) -> Result<Token, HelixError> {
        let params = [
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("code", code),
            ("grant_type", "authorization_code"),
            ("redirect_uri", self.redirect_uri.as_str()),
        ];

        let resp = self.http.post(&self.token_url).form(&params).send().await?;
        parse_token_response(resp).await
    }

    /// Obtain a fresh token using a refresh token.
    pub async fn refresh_token(&self, refresh_token: &str) -> Result<Token, HelixError> {
        tracing::info!("Refreshing Twitch OAuth token");

        let params = [
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("refresh_token", refresh_token),
            ("grant_type", "refresh_token"),
        ];

        let resp = self.http.post(&self.token_url).form(&params).send().await?;
        parse_token_response(resp).await
    }
}

async fn parse_token_response(resp: reqwest::Response) -> Result<Token, HelixError> {
    let status = resp.status();
    let body = resp.text().await?;
    token_from_body(status, &body, Utc::now().timestamp())
}

fn token_from_body(status: reqwest::StatusCode, body: &str, now: i64) -> Result<Token, HelixError> {
    if !status.is_success() {
        let err: ErrorResponse = serde_json::from_str(body).unwrap_or_default();
        let code = err
            .status
            .map(|s| s.to_string())
            .or(err.error)
            .unwrap_or_else(|| status.to_string());
        let description = err
            .message
            .or(err.error_description)
            .unwrap_or_else(|| body.to_string());
        return Err(HelixError::TokenRefreshFailed(format!("{code}: {description}")));
    }

    let token_resp: TokenResponse = serde_json::from_str(body)
        .map_err(|e| HelixError::TokenRefreshFailed(format!("failed to parse response: {e}")))?;

    let scope = token_resp
        .scope
        .map(|s| s.join(" "))
        .unwrap_or_else(|| SCOPES.join(" "));

    Ok(Token {
        access_token: token_resp.access_token,
        refresh_token: token_resp.refresh_token,
        scope,
        expires_at: now + token_resp.expires_in,
    })
}

/// Holds the current token for [`crate::HelixClient`].
///
/// Reads happen on every request build; writes only when the token is
/// replaced or refreshed.
#[derive(Default)]
pub struct TokenManager {
    current: RwLock<Option<Token>>,
}

impl TokenManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: Token) -> Self {
        Self {
            current: RwLock::new(Some(token)),
        }
    }

    /// Replace the stored token.
    pub fn set_token(&self, token: Token) {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Some(token);
    }

    /// Forget the stored token; subsequent calls fail with `AuthRequired`.
    pub fn clear(&self) {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// The stored token, whether or not it is still valid.
    pub fn current(&self) -> Option<Token> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Whether the token is missing or expires within the refresh margin.
    pub fn needs_refresh(&self) -> bool {
        self.needs_refresh_at(Utc::now().timestamp())
    }

    fn needs_refresh_at(&self, now: i64) -> bool {
        match self.current() {
            Some(token) => now >= token.expires_at - REFRESH_MARGIN_SECS,
            None => true,
        }
    }

    /// Refresh the stored token through `auth` if it is close to expiry.
    ///
    /// Returns `Ok(None)` when no refresh was needed and `Ok(Some(token))`
    /// with the new token otherwise. The caller should persist the new token.
    pub async fn refresh_with(&self, auth: &TwitchAuth) -> Result<Option<Token>, HelixError> {
        if !self.needs_refresh() {
            return Ok(None);
        }

        let current = match self.current() {
            Some(token) if !token.refresh_token.is_empty() => token,
            _ => return Err(HelixError::AuthRequired),
        };

        tracing::info!(
            expires_in_secs = current.expires_at - Utc::now().timestamp(),
            "Token expiring soon, refreshing"
        );

        let new_token = auth.refresh_token(&current.refresh_token).await?;
        self.set_token(new_token.clone());
        Ok(Some(new_token))
    }
}

impl TokenProvider for TokenManager {
    fn token(&self) -> Result<Token, HelixError> {
        match self.current() {
            Some(token) if !token.is_expired_at(Utc::now().timestamp()) => Ok(token),
            Some(_) => {
                tracing::warn!("Stored token has expired");
                Err(HelixError::AuthRequired)
            }
            None => Err(HelixError::AuthRequired),
        }
    }
}
