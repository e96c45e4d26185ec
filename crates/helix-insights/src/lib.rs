//! Twitch Helix analytics and bits client library.
//!
//! Provides typed access to the extension/game analytics and bits
//! leaderboard endpoints, OAuth token management, and the shared
//! request/response pipeline behind them.

pub mod api;
pub mod auth;
pub mod config;
pub mod datetime;

use serde::{Deserialize, Serialize};

pub use api::{ApiFailure, FailureKind, HelixClient};
pub use config::{HelixConfig, ParamPlacement};

/// Token data for OAuth authentication.
///
/// The caller is responsible for persisting this.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    pub expires_at: i64,
}

impl Token {
    /// Whether the token is unusable at the given unix timestamp.
    pub fn is_expired_at(&self, now: i64) -> bool {
        self.access_token.is_empty() || now >= self.expires_at
    }
}

/// Unified error type for the helix-insights crate.
#[derive(Debug, thiserror::Error)]
pub enum HelixError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Failure reported by a non-reqwest [`api::Transport`] implementation.
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Authentication required: no valid token")]
    AuthRequired,

    #[error("Token refresh failed: {0}")]
    TokenRefreshFailed(String),

    #[error("Response is missing the `{0}` field")]
    MissingField(&'static str),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

pub const EXTENSION_ANALYTICS_SCOPE: &str = "analytics:read:extensions";
pub const GAME_ANALYTICS_SCOPE: &str = "analytics:read:games";
pub const BITS_READ_SCOPE: &str = "bits:read";

/// OAuth scopes required by the endpoints in this crate.
pub const SCOPES: &[&str] = &[
    EXTENSION_ANALYTICS_SCOPE,
    GAME_ANALYTICS_SCOPE,
    BITS_READ_SCOPE,
];
