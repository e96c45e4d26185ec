//! Fetch the top bits leaderboard entry for the authenticated broadcaster.
//!
//! Reads `TWITCH_ACCESS_TOKEN` (plus the usual `HELIX_*` / `TWITCH_CLIENT_ID`
//! overrides) from the environment or a `.env` file.

use anyhow::Context;
use chrono::Utc;
use tracing_subscriber::EnvFilter;

use helix_insights::api::{BitsLeaderboardParams, Period};
use helix_insights::auth::TokenManager;
use helix_insights::{HelixClient, HelixConfig, Token};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    dotenvy::dotenv().ok();

    let config = HelixConfig::from_env()?;
    let access_token =
        std::env::var("TWITCH_ACCESS_TOKEN").context("TWITCH_ACCESS_TOKEN is not set")?;

    let tokens = TokenManager::with_token(Token {
        access_token,
        refresh_token: String::new(),
        scope: helix_insights::BITS_READ_SCOPE.into(),
        // Validity is decided by Helix; treat the token as good for an hour.
        expires_at: Utc::now().timestamp() + 3600,
    });
    let client = HelixClient::new(config, tokens);

    let params = BitsLeaderboardParams {
        count: Some(1),
        period: Some(Period::Week),
        ..Default::default()
    };

    match client.get_bits_leaderboard(&params).await {
        Ok(entry) => {
            tracing::info!(
                rank = entry.rank,
                user = %entry.user_name,
                score = entry.score,
                "Top cheerer this week"
            );
        }
        Err(failure) => {
            tracing::error!(
                kind = %failure.kind,
                body = ?failure.body_text(),
                "Leaderboard request failed"
            );
            return Err(failure.into());
        }
    }

    Ok(())
}
