use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A closed set of values with one fixed wire string each.
///
/// Decoding is permissive: unknown strings yield `None`.
pub trait WireEnum: Copy + Sized + 'static {
    const ALL: &'static [Self];

    fn as_wire(self) -> &'static str;

    fn from_wire(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.as_wire() == s)
    }
}

/// Deserialize an optional [`WireEnum`], mapping unknown strings to `None`.
pub(crate) fn permissive_enum<'de, D, E>(deserializer: D) -> Result<Option<E>, D::Error>
where
    D: Deserializer<'de>,
    E: WireEnum,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(E::from_wire))
}

/// Report type for the analytics endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalyticsType {
    OverviewV1,
    OverviewV2,
}

impl WireEnum for AnalyticsType {
    const ALL: &'static [Self] = &[Self::OverviewV1, Self::OverviewV2];

    fn as_wire(self) -> &'static str {
        match self {
            Self::OverviewV1 => "overview_v1",
            Self::OverviewV2 => "overview_v2",
        }
    }
}

/// Aggregation window for the bits leaderboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    All,
    Day,
    Week,
    Month,
    Year,
}

impl WireEnum for Period {
    const ALL: &'static [Self] = &[Self::All, Self::Day, Self::Week, Self::Month, Self::Year];

    fn as_wire(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
        }
    }
}

/// Reporting window of an analytics report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateRange {
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
}

/// Extension analytics report from GET /helix/analytics/extensions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtensionAnalytics {
    pub extension_id: String,
    /// Download URL of the CSV report.
    #[serde(rename = "URL")]
    pub url: String,
    #[serde(
        rename = "type",
        default,
        deserialize_with = "permissive_enum"
    )]
    pub kind: Option<AnalyticsType>,
    #[serde(default)]
    pub date_range: Option<DateRange>,
}

/// Game analytics report from GET /helix/analytics/games.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameAnalytics {
    pub game_id: String,
    #[serde(rename = "URL")]
    pub url: String,
    #[serde(
        rename = "type",
        default,
        deserialize_with = "permissive_enum"
    )]
    pub kind: Option<AnalyticsType>,
    #[serde(default)]
    pub date_range: Option<DateRange>,
}

/// Bits leaderboard record from GET /helix/bits/leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BitsLeaderboardEntry {
    pub user_id: String,
    pub user_login: String,
    pub user_name: String,
    pub rank: u32,
    pub score: u64,
}
