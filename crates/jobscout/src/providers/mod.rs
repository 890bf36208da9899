//! Provider clients — thin adapters around external job-search sources.
//!
//! Each client owns its transport, timeout, and rate-limit state, and returns
//! provider-native JSON records; the canonical mapper reconciles the shapes.
//! Clients never panic past their boundary: every failure mode is a
//! [`ProviderError`], and the orchestrator absorbs those into empty
//! contributions so one provider cannot abort a round.

pub mod remotive;
pub mod ycombinator;

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::ProviderError;

/// Design bound on a single provider round trip.
pub const DEFAULT_PROVIDER_TIMEOUT: Duration = Duration::from_millis(8_000);

/// Parameters fanned out to every provider in a round. Clients consume the
/// subset their upstream supports (Remotive has no date filter; the YC feed
/// is a fixed seven-day window).
#[derive(Debug, Clone)]
pub struct SearchParams {
    pub query: String,
    pub page: u32,
    /// Posting-age filter, e.g. "month".
    pub date_posted: Option<String>,
    pub remote_only: bool,
}

impl SearchParams {
    pub fn for_query(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            page: 1,
            date_posted: Some("month".to_string()),
            remote_only: false,
        }
    }
}

/// An external job-search data source reachable over HTTP.
///
/// Held as `Arc<dyn JobProvider>` by the orchestrator so tests can inject
/// deterministic fakes instead of real transports.
#[async_trait]
pub trait JobProvider: Send + Sync {
    fn name(&self) -> &'static str;

    /// Fetches provider-native records for the given parameters.
    async fn fetch(&self, params: &SearchParams) -> Result<Vec<Value>, ProviderError>;
}

/// Sends a request with a hard upper bound on the whole round trip. A request
/// still in flight at the deadline is aborted and reported as a timeout,
/// never left hanging.
pub(crate) async fn send_with_timeout(
    request: reqwest::RequestBuilder,
    timeout: Duration,
) -> Result<reqwest::Response, ProviderError> {
    match tokio::time::timeout(timeout, request.send()).await {
        Ok(response) => Ok(response?),
        Err(_) => Err(ProviderError::Timeout(timeout.as_millis() as u64)),
    }
}
