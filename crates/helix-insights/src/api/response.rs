//! Classification and decoding of raw transport outcomes.

use std::fmt;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use super::transport::{RawOutcome, ResponseMeta};
use crate::HelixError;

/// Field of the Helix envelope that carries the payload.
pub const DATA_FIELD: &str = "data";

/// Which stage of a call failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// No usable token; nothing was sent.
    Authorization,
    /// The request could not be assembled; nothing was sent.
    InvalidRequest,
    /// Network failure, no response, or no body.
    Transport,
    /// The server answered with a status other than 200.
    HttpStatus,
    /// 200 response whose `data` field was missing or malformed.
    Decode,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Authorization => "authorization",
            Self::InvalidRequest => "invalid request",
            Self::Transport => "transport",
            Self::HttpStatus => "http status",
            Self::Decode => "decode",
        })
    }
}

/// Failure of one Helix call, with whatever raw artifacts were available.
#[derive(Debug)]
pub struct ApiFailure {
    pub kind: FailureKind,
    pub body: Option<Vec<u8>>,
    pub response: Option<ResponseMeta>,
    pub error: Option<HelixError>,
}

impl ApiFailure {
    /// Failure raised before anything reached the transport.
    pub(super) fn before_send(error: HelixError) -> Self {
        let kind = match error {
            HelixError::AuthRequired => FailureKind::Authorization,
            _ => FailureKind::InvalidRequest,
        };
        Self {
            kind,
            body: None,
            response: None,
            error: Some(error),
        }
    }

    fn from_outcome(kind: FailureKind, outcome: RawOutcome) -> Self {
        Self {
            kind,
            body: outcome.body,
            response: outcome.response,
            error: outcome.error,
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        self.response.as_ref().and_then(|r| r.status)
    }

    pub fn body_text(&self) -> Option<String> {
        self.body
            .as_deref()
            .map(|b| String::from_utf8_lossy(b).into_owned())
    }
}

impl fmt::Display for ApiFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Helix call failed ({})", self.kind)?;
        if let Some(status) = self.status() {
            write!(f, ", status {}", status.as_u16())?;
        }
        if let Some(error) = &self.error {
            write!(f, ": {error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.error
            .as_ref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

/// Decide success or failure of a completed attempt.
///
/// The rule is uniform across endpoints and checked in this order: no
/// response, no body or a transport error, then any status other than 200.
pub fn classify(outcome: &RawOutcome) -> Result<(), FailureKind> {
    let status = outcome.response.as_ref().and_then(|r| r.status);
    let bad_status = status.is_some_and(|s| s != StatusCode::OK);

    if outcome.response.is_none() {
        return Err(FailureKind::Transport);
    }
    if outcome.body.is_none() || outcome.error.is_some() {
        return Err(if outcome.error.is_none() && bad_status {
            FailureKind::HttpStatus
        } else {
            FailureKind::Transport
        });
    }
    if bad_status {
        return Err(FailureKind::HttpStatus);
    }
    Ok(())
}

/// Extract and decode `field` from a JSON object body.
pub fn decode_field<T: DeserializeOwned>(body: &[u8], field: &'static str) -> Result<T, HelixError> {
    let mut envelope: serde_json::Value = serde_json::from_slice(body)?;
    let value = envelope
        .as_object_mut()
        .and_then(|obj| obj.remove(field))
        .ok_or(HelixError::MissingField(field))?;
    Ok(serde_json::from_value(value)?)
}

/// Turn a raw outcome into the call's single result.
pub fn decode_outcome<T: DeserializeOwned>(outcome: RawOutcome) -> Result<T, ApiFailure> {
    if let Err(kind) = classify(&outcome) {
        match kind {
            FailureKind::HttpStatus => tracing::warn!(
                status = ?outcome.response.as_ref().and_then(|r| r.status),
                "Helix returned a non-200 status"
            ),
            _ => tracing::warn!(
                error = ?outcome.error.as_ref().map(|e| e.to_string()),
                "Helix request failed"
            ),
        }
        return Err(ApiFailure::from_outcome(kind, outcome));
    }

    let decoded = match outcome.body.as_deref() {
        Some(body) => decode_field(body, DATA_FIELD),
        None => Err(HelixError::MissingField(DATA_FIELD)),
    };

    decoded.map_err(|e| {
        tracing::warn!(error = %e, "Failed to decode Helix response");
        ApiFailure {
            kind: FailureKind::Decode,
            body: outcome.body,
            response: outcome.response,
            error: Some(e),
        }
    })
}
