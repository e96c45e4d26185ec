//! Encoding of optional call parameters into wire key/value pairs.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::ser::{Serialize, SerializeMap, Serializer};

use super::models::WireEnum;
use crate::datetime::date_to_wire_string;

/// A primitive value as sent to Helix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Str(String),
    Int(i64),
    Enum(&'static str),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Int(n) => write!(f, "{n}"),
            Self::Enum(s) => f.write_str(s),
        }
    }
}

impl Serialize for ParamValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Str(s) => serializer.serialize_str(s),
            Self::Int(n) => serializer.serialize_i64(*n),
            Self::Enum(s) => serializer.serialize_str(s),
        }
    }
}

/// Ordered wire key → value pairs for one call.
///
/// Only fields that were set appear; there are no null placeholders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncodedParams {
    entries: Vec<(&'static str, ParamValue)>,
}

impl EncodedParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn string(mut self, key: &'static str, value: Option<&str>) -> Self {
        if let Some(v) = value {
            self.entries.push((key, ParamValue::Str(v.to_string())));
        }
        self
    }

    pub fn int(mut self, key: &'static str, value: Option<i64>) -> Self {
        if let Some(v) = value {
            self.entries.push((key, ParamValue::Int(v)));
        }
        self
    }

    pub fn date(mut self, key: &'static str, value: Option<DateTime<Utc>>) -> Self {
        if let Some(v) = value {
            self.entries
                .push((key, ParamValue::Str(date_to_wire_string(v))));
        }
        self
    }

    pub fn enumerated<E: WireEnum>(mut self, key: &'static str, value: Option<E>) -> Self {
        if let Some(v) = value {
            self.entries.push((key, ParamValue::Enum(v.as_wire())));
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v)
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(k, _)| *k)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &ParamValue)> {
        self.entries.iter().map(|(k, v)| (*k, v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for EncodedParams {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Call parameters that know their endpoint's wire vocabulary.
pub trait EncodeParams {
    fn encode(&self) -> EncodedParams;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::{AnalyticsType, Period};

    #[test]
    fn absent_values_contribute_nothing() {
        let params = EncodedParams::new()
            .string("after", None)
            .int("first", None)
            .date("started_at", None)
            .enumerated::<Period>("period", None);
        assert!(params.is_empty());
        assert_eq!(serde_json::to_string(&params).unwrap(), "{}");
    }

    #[test]
    fn values_are_transformed_and_kept_in_order() {
        let started = DateTime::from_timestamp_millis(1_519_862_400_000).unwrap();
        let params = EncodedParams::new()
            .int("count", Some(5))
            .enumerated("type", Some(AnalyticsType::OverviewV2))
            .date("started_at", Some(started))
            .string("user_id", Some("1234"));

        assert_eq!(
            params.keys().collect::<Vec<_>>(),
            ["count", "type", "started_at", "user_id"]
        );
        assert_eq!(params.get("count"), Some(&ParamValue::Int(5)));
        assert_eq!(params.get("type"), Some(&ParamValue::Enum("overview_v2")));
        assert_eq!(
            params.get("started_at"),
            Some(&ParamValue::Str("2018-03-01T00:00:00.000Z".into()))
        );
        assert_eq!(
            serde_json::to_string(&params).unwrap(),
            r#"{"count":5,"type":"overview_v2","started_at":"2018-03-01T00:00:00.000Z","user_id":"1234"}"#
        );
    }

    #[test]
    fn out_of_range_values_pass_through() {
        let params = EncodedParams::new().int("first", Some(-3)).string("after", Some(""));
        assert_eq!(params.get("first"), Some(&ParamValue::Int(-3)));
        assert_eq!(params.get("after"), Some(&ParamValue::Str(String::new())));
    }

    #[test]
    fn display_renders_plain_values() {
        assert_eq!(ParamValue::Int(42).to_string(), "42");
        assert_eq!(ParamValue::Enum("week").to_string(), "week");
        assert_eq!(ParamValue::Str("abc".into()).to_string(), "abc");
    }
}
