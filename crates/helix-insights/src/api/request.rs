use reqwest::Method;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use url::Url;

use super::params::EncodedParams;
use crate::config::ParamPlacement;
use crate::{HelixError, Token};

/// A fully built Helix request, handed to the transport exactly once.
#[derive(Debug)]
pub struct HelixRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl HelixRequest {
    /// The bearer token this request carries, if any.
    pub fn bearer(&self) -> Option<&str> {
        self.headers
            .get(AUTHORIZATION)?
            .to_str()
            .ok()?
            .strip_prefix("Bearer ")
    }
}

/// Build auth headers from the given token.
pub(super) fn auth_headers(token: &Token, client_id: Option<&str>) -> Result<HeaderMap, HelixError> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    let bearer = format!("Bearer {}", token.access_token);
    headers.insert(AUTHORIZATION, HeaderValue::from_str(&bearer)?);
    if let Some(id) = client_id {
        headers.insert("Client-Id", HeaderValue::from_str(id)?);
    }
    Ok(headers)
}

/// Assemble a request for `path` under `base`, placing `params` per `placement`.
pub(super) fn build_request(
    base: &Url,
    method: Method,
    path: &str,
    token: &Token,
    client_id: Option<&str>,
    params: &EncodedParams,
    placement: ParamPlacement,
) -> Result<HelixRequest, HelixError> {
    let mut url = base.join(path)?;
    let headers = auth_headers(token, client_id)?;

    let body = match placement {
        ParamPlacement::Body => serde_json::to_vec(params)?,
        ParamPlacement::Query => {
            if !params.is_empty() {
                let mut query = url.query_pairs_mut();
                for (key, value) in params.iter() {
                    query.append_pair(key, &value.to_string());
                }
            }
            Vec::new()
        }
    };

    Ok(HelixRequest {
        method,
        url,
        headers,
        body,
    })
}
