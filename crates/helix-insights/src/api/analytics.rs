use chrono::{DateTime, Utc};

use super::*;

const EXTENSION_ANALYTICS_PATH: &str = "/helix/analytics/extensions";
const GAME_ANALYTICS_PATH: &str = "/helix/analytics/games";

/// Parameters for GET /helix/analytics/extensions.
#[derive(Debug, Clone, Default)]
pub struct ExtensionAnalyticsParams {
    /// Pagination cursor.
    pub after: Option<String>,
    pub started_at: Option<DateTime<Utc>>,
    pub ended_at: Option<DateTime<Utc>>,
    pub extension_id: Option<String>,
    pub first: Option<i64>,
    pub kind: Option<AnalyticsType>,
}

impl EncodeParams for ExtensionAnalyticsParams {
    fn encode(&self) -> EncodedParams {
        EncodedParams::new()
            .string("after", self.after.as_deref())
            .date("started_at", self.started_at)
            .date("ended_at", self.ended_at)
            .string("extension_id", self.extension_id.as_deref())
            .int("first", self.first)
            .enumerated("type", self.kind)
    }
}

/// Parameters for GET /helix/analytics/games.
#[derive(Debug, Clone, Default)]
pub struct GameAnalyticsParams {
    /// Pagination cursor.
    pub after: Option<String>,
    pub started_at: Option<DateTime<Utc>>,
    pub ended_at: Option<DateTime<Utc>>,
    pub game_id: Option<String>,
    pub first: Option<i64>,
    pub kind: Option<AnalyticsType>,
}

impl EncodeParams for GameAnalyticsParams {
    fn encode(&self) -> EncodedParams {
        EncodedParams::new()
            .string("after", self.after.as_deref())
            .date("started_at", self.started_at)
            .date("ended_at", self.ended_at)
            .string("game_id", self.game_id.as_deref())
            .int("first", self.first)
            .enumerated("type", self.kind)
    }
}

impl<P: TokenProvider, T: Transport> HelixClient<P, T> {
    /// Get analytics report URLs for the authenticated user's extensions.
    ///
    /// Requires the `analytics:read:extensions` scope.
    pub async fn get_extension_analytics(
        &self,
        params: &ExtensionAnalyticsParams,
    ) -> Result<Vec<ExtensionAnalytics>, ApiFailure> {
        self.call(Method::GET, EXTENSION_ANALYTICS_PATH, &params.encode())
            .await
    }

    /// Get analytics report URLs for the authenticated user's games.
    ///
    /// Requires the `analytics:read:games` scope.
    pub async fn get_game_analytics(
        &self,
        params: &GameAnalyticsParams,
    ) -> Result<Vec<GameAnalytics>, ApiFailure> {
        self.call(Method::GET, GAME_ANALYTICS_PATH, &params.encode())
            .await
    }
}
