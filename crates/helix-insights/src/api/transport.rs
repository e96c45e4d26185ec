//! The HTTP boundary.
//!
//! [`Transport`] decouples the request pipeline from the HTTP stack so the
//! client can be driven by `reqwest` in production and by a fake in tests.

use reqwest::StatusCode;
use reqwest::header::HeaderMap;
use url::Url;

use super::request::HelixRequest;
use crate::HelixError;

/// Response metadata, available once the server answered.
#[derive(Debug, Clone)]
pub struct ResponseMeta {
    pub status: Option<StatusCode>,
    pub headers: HeaderMap,
    pub url: Option<Url>,
}

impl ResponseMeta {
    pub fn with_status(status: StatusCode) -> Self {
        Self {
            status: Some(status),
            headers: HeaderMap::new(),
            url: None,
        }
    }
}

/// Whatever the transport produced for one attempt. Any combination of the
/// three parts may be present, including none.
#[derive(Debug, Default)]
pub struct RawOutcome {
    pub body: Option<Vec<u8>>,
    pub response: Option<ResponseMeta>,
    pub error: Option<HelixError>,
}

/// Sends a built request. Implementations must not block the calling
/// thread and must report failures inside the outcome rather than panic.
pub trait Transport: Send + Sync {
    fn send(&self, request: HelixRequest) -> impl Future<Output = RawOutcome> + Send;
}

/// [`Transport`] over a shared `reqwest::Client`.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    http: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(http: reqwest::Client) -> Self {
        Self { http }
    }
}

impl Transport for ReqwestTransport {
    async fn send(&self, request: HelixRequest) -> RawOutcome {
        let HelixRequest {
            method,
            url,
            headers,
            body,
        } = request;

        let resp = match self
            .http
            .request(method, url)
            .headers(headers)
            .body(body)
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(e) => {
                return RawOutcome {
                    error: Some(HelixError::Http(e)),
                    ..RawOutcome::default()
                };
            }
        };

        let meta = ResponseMeta {
            status: Some(resp.status()),
            headers: resp.headers().clone(),
            url: Some(resp.url().clone()),
        };

        match resp.bytes().await {
            Ok(bytes) => RawOutcome {
                body: Some(bytes.to_vec()),
                response: Some(meta),
                error: None,
            },
            Err(e) => RawOutcome {
                body: None,
                response: Some(meta),
                error: Some(HelixError::Http(e)),
            },
        }
    }
}
