//! Twitch Helix REST API client.
//!
//! Every endpoint runs the same pipeline: encode the call parameters,
//! build an authenticated request, send it through the [`Transport`],
//! classify the outcome and decode the `data` field of the response.

mod analytics;
mod bits;
mod request;
mod response;
mod transport;

pub mod models;
pub mod params;

use reqwest::Method;
use serde::de::DeserializeOwned;

pub use analytics::{ExtensionAnalyticsParams, GameAnalyticsParams};
pub use bits::BitsLeaderboardParams;
pub use models::{
    AnalyticsType, BitsLeaderboardEntry, DateRange, ExtensionAnalytics, GameAnalytics, Period,
    WireEnum,
};
pub use params::{EncodeParams, EncodedParams, ParamValue};
pub use request::HelixRequest;
pub use response::{ApiFailure, DATA_FIELD, FailureKind, classify, decode_field, decode_outcome};
pub use transport::{RawOutcome, ReqwestTransport, ResponseMeta, Transport};

use crate::auth::TokenProvider;
use crate::config::HelixConfig;
use crate::HelixError;

/// Helix API client with automatic auth header injection.
///
/// The transport and token provider are supplied by the caller; both are
/// only read, so one client can serve concurrent calls.
pub struct HelixClient<P, T = ReqwestTransport> {
    pub(super) config: HelixConfig,
    pub(super) tokens: P,
    pub(super) transport: T,
}

impl<P: TokenProvider> HelixClient<P> {
    pub fn new(config: HelixConfig, tokens: P) -> Self {
        Self::with_transport(config, tokens, ReqwestTransport::new())
    }
}

impl<P: TokenProvider, T: Transport> HelixClient<P, T> {
    pub fn with_transport(config: HelixConfig, tokens: P, transport: T) -> Self {
        Self {
            config,
            tokens,
            transport,
        }
    }

    pub fn config(&self) -> &HelixConfig {
        &self.config
    }

    pub fn token_provider(&self) -> &P {
        &self.tokens
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Build the request for one call. Fails before anything is sent when
    /// the token provider has no usable token.
    fn prepare(
        &self,
        method: Method,
        path: &str,
        params: &EncodedParams,
    ) -> Result<HelixRequest, HelixError> {
        let token = self.tokens.token()?;
        request::build_request(
            &self.config.base_url,
            method,
            path,
            &token,
            self.config.client_id.as_deref(),
            params,
            self.config.param_placement,
        )
    }

    /// Run the full pipeline for one endpoint call.
    pub(super) async fn call<R: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        params: &EncodedParams,
    ) -> Result<R, ApiFailure> {
        let request = match self.prepare(method, path, params) {
            Ok(request) => request,
            Err(e) => {
                tracing::warn!(path, error = %e, "Helix request not sent");
                return Err(ApiFailure::before_send(e));
            }
        };

        tracing::debug!(
            method = %request.method,
            url = %request.url,
            params = params.len(),
            "Sending Helix request"
        );
        let outcome = self.transport.send(request).await;
        decode_outcome(outcome)
    }
}

/// Run `call` on the tokio runtime and hand its result to `on_complete`.
///
/// `on_complete` runs at most once, on the runtime's worker, and exactly once
/// whenever `call` completes. No handle is returned: a started call cannot be
/// cancelled.
///
/// # Panics
///
/// Panics when called outside a tokio runtime. If `call` itself panics, the
/// spawned task is torn down and `on_complete` never runs.
pub fn spawn_with_callback<R, Fut, F>(call: Fut, on_complete: F)
where
    R: Send + 'static,
    Fut: Future<Output = Result<R, ApiFailure>> + Send + 'static,
    F: FnOnce(Result<R, ApiFailure>) + Send + 'static,
{
    tokio::spawn(async move {
        on_complete(call.await);
    });
}
