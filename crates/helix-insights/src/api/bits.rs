use chrono::{DateTime, Utc};

use super::*;

const BITS_LEADERBOARD_PATH: &str = "/helix/bits/leaderboard";

/// Parameters for GET /helix/bits/leaderboard.
///
/// Values are not range-checked; Helix validates them.
#[derive(Debug, Clone, Default)]
pub struct BitsLeaderboardParams {
    pub count: Option<i64>,
    pub period: Option<Period>,
    pub started_at: Option<DateTime<Utc>>,
    pub user_id: Option<String>,
}

impl EncodeParams for BitsLeaderboardParams {
    fn encode(&self) -> EncodedParams {
        EncodedParams::new()
            .int("count", self.count)
            .enumerated("period", self.period)
            .date("started_at", self.started_at)
            .string("user_id", self.user_id.as_deref())
    }
}

impl<P: TokenProvider, T: Transport> HelixClient<P, T> {
    /// Get the bits leaderboard record for the authenticated broadcaster.
    ///
    /// Requires the `bits:read` scope.
    pub async fn get_bits_leaderboard(
        &self,
        params: &BitsLeaderboardParams,
    ) -> Result<BitsLeaderboardEntry, ApiFailure> {
        self.call(Method::GET, BITS_LEADERBOARD_PATH, &params.encode())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaderboard_params_encode_in_wire_order() {
        let params = BitsLeaderboardParams {
            count: Some(5),
            period: Some(Period::Week),
            started_at: DateTime::from_timestamp_millis(1_700_000_000_123),
            user_id: Some("141981764".into()),
        };
        assert_eq!(
            serde_json::to_string(&params.encode()).unwrap(),
            r#"{"count":5,"period":"week","started_at":"2023-11-14T22:13:20.123Z","user_id":"141981764"}"#
        );
    }

    #[test]
    fn count_is_passed_through_unchecked() {
        let params = BitsLeaderboardParams {
            count: Some(1000),
            ..Default::default()
        };
        assert_eq!(params.encode().get("count"), Some(&ParamValue::Int(1000)));
    }
}
