//! Client configuration with environment overrides.

use url::Url;

use crate::HelixError;

const DEFAULT_BASE_URL: &str = "https://api.twitch.tv";

/// Where encoded call parameters are placed on the outgoing request.
///
/// Helix documents these endpoints as query-string GETs, but parameters
/// have always been sent as a JSON body here. `Body` keeps that wire shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParamPlacement {
    #[default]
    Body,
    Query,
}

impl std::str::FromStr for ParamPlacement {
    type Err = HelixError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "body" => Ok(Self::Body),
            "query" => Ok(Self::Query),
            other => Err(HelixError::Config(format!(
                "unknown parameter placement `{other}` (expected `body` or `query`)"
            ))),
        }
    }
}

/// Runtime configuration for [`crate::HelixClient`].
#[derive(Debug, Clone)]
pub struct HelixConfig {
    /// Scheme and host that endpoint paths (`/helix/...`) are joined onto.
    pub base_url: Url,
    /// Sent as `Client-Id` when present.
    pub client_id: Option<String>,
    pub param_placement: ParamPlacement,
}

impl Default for HelixConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            client_id: None,
            param_placement: ParamPlacement::Body,
        }
    }
}

impl HelixConfig {
    /// Defaults overridden by `HELIX_BASE_URL`, `TWITCH_CLIENT_ID` and
    /// `HELIX_PARAM_PLACEMENT`.
    pub fn from_env() -> Result<Self, HelixError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, HelixError> {
        let mut config = Self::default();

        if let Some(v) = lookup("HELIX_BASE_URL").filter(|v| !v.trim().is_empty()) {
            config.base_url = Url::parse(v.trim())?;
        }
        if let Some(v) = lookup("TWITCH_CLIENT_ID").filter(|v| !v.trim().is_empty()) {
            config.client_id = Some(v.trim().to_string());
        }
        if let Some(v) = lookup("HELIX_PARAM_PLACEMENT").filter(|v| !v.trim().is_empty()) {
            config.param_placement = v.parse()?;
        }

        tracing::debug!(
            base_url = %config.base_url,
            has_client_id = config.client_id.is_some(),
            placement = ?config.param_placement,
            "Helix config loaded"
        );
        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = base_url;
        self
    }

    pub fn with_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    pub fn with_param_placement(mut self, placement: ParamPlacement) -> Self {
        self.param_placement = placement;
        self
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_overrides() {
        let config = HelixConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.base_url.as_str(), "https://api.twitch.tv/");
        assert_eq!(config.client_id, None);
        assert_eq!(config.param_placement, ParamPlacement::Body);
    }

    #[test]
    fn env_overrides_apply() {
        let config = HelixConfig::from_lookup(lookup_from(&[
            ("HELIX_BASE_URL", "http://127.0.0.1:9000"),
            ("TWITCH_CLIENT_ID", " abc123 "),
            ("HELIX_PARAM_PLACEMENT", "Query"),
        ]))
        .unwrap();
        assert_eq!(config.base_url.as_str(), "http://127.0.0.1:9000/");
        assert_eq!(config.client_id.as_deref(), Some("abc123"));
        assert_eq!(config.param_placement, ParamPlacement::Query);
    }

    #[test]
    fn blank_values_are_ignored() {
        let config =
            HelixConfig::from_lookup(lookup_from(&[("TWITCH_CLIENT_ID", "  ")])).unwrap();
        assert_eq!(config.client_id, None);
    }

    #[test]
    fn unknown_placement_is_rejected() {
        let err = HelixConfig::from_lookup(lookup_from(&[("HELIX_PARAM_PLACEMENT", "header")]))
            .unwrap_err();
        assert!(matches!(err, HelixError::Config(_)));
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let err = HelixConfig::from_lookup(lookup_from(&[("HELIX_BASE_URL", "not a url")]))
            .unwrap_err();
        assert!(matches!(err, HelixError::UrlParse(_)));
    }
}
