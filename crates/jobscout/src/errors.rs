use thiserror::Error;

/// Failures raised inside a provider client.
///
/// These never cross the orchestrator boundary: the search round catches
/// them per provider, logs a warning, and treats the provider as an empty
/// contribution. One provider failing must not abort the others.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("request exceeded the {0} ms timeout")]
    Timeout(u64),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("rate limited; client is inside its cooldown window")]
    RateLimited,
}

/// Orchestration-level defects. Provider failures are absorbed, so the only
/// way a search round itself fails is a panicked provider task.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("provider task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}
