//! Y Combinator jobs client — RapidAPI-hosted feed of active YC postings.
//!
//! RapidAPI quota is shared across every consumer of the key, so a 429 puts
//! this client into a cooldown window: until it expires, calls short-circuit
//! without touching the network. The window lives on the client instance
//! (not module state) so tests can drive it with a paused clock.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::errors::ProviderError;
use crate::providers::{send_with_timeout, JobProvider, SearchParams};

const YC_URL: &str = "https://free-y-combinator-jobs-api.p.rapidapi.com/active-jb-7d";
const YC_HOST: &str = "free-y-combinator-jobs-api.p.rapidapi.com";

/// YC postings are curated; they carry a high fixed quality prior.
const QUALITY_SCORE: u32 = 90;

/// How long to back off after a rate-limit response.
pub const DEFAULT_COOLDOWN: Duration = Duration::from_secs(5 * 60);

pub struct YCombinatorProvider {
    http: reqwest::Client,
    api_key: String,
    timeout: Duration,
    cooldown: Duration,
    cooldown_until: Mutex<Option<Instant>>,
}

impl YCombinatorProvider {
    pub fn new(api_key: String, timeout: Duration, cooldown: Duration) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            timeout,
            cooldown,
            cooldown_until: Mutex::new(None),
        }
    }

    fn in_cooldown(&self) -> bool {
        let until = self.cooldown_until.lock().expect("cooldown mutex poisoned");
        until.is_some_and(|deadline| Instant::now() < deadline)
    }

    fn note_rate_limit(&self) {
        let mut until = self.cooldown_until.lock().expect("cooldown mutex poisoned");
        *until = Some(Instant::now() + self.cooldown);
    }
}

#[async_trait]
impl JobProvider for YCombinatorProvider {
    fn name(&self) -> &'static str {
        "ycombinator"
    }

    // The feed is a fixed seven-day window; query and page are not forwarded.
    async fn fetch(&self, _params: &SearchParams) -> Result<Vec<Value>, ProviderError> {
        if self.in_cooldown() {
            debug!("ycombinator client inside cooldown window; skipping request");
            return Err(ProviderError::RateLimited);
        }

        let request = self
            .http
            .get(YC_URL)
            .header("X-RapidAPI-Key", &self.api_key)
            .header("X-RapidAPI-Host", YC_HOST);

        let response = send_with_timeout(request, self.timeout).await?;
        let status = response.status();
        if status.as_u16() == 429 {
            warn!(
                cooldown_secs = self.cooldown.as_secs(),
                "ycombinator rate limited; entering cooldown"
            );
            self.note_rate_limit();
            return Err(ProviderError::RateLimited);
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let records: Vec<Value> = response.json().await?;
        debug!(count = records.len(), "ycombinator returned records");
        Ok(records.iter().map(shape_record).collect())
    }
}

/// Re-keys a YC posting into the shape the canonical mapper reads. The feed
/// flags remote roles with a boolean rather than a job-type string.
fn shape_record(raw: &Value) -> Value {
    let company = raw
        .get("company")
        .and_then(Value::as_str)
        .unwrap_or_default();
    let title = raw.get("title").and_then(Value::as_str).unwrap_or_default();

    let id = match raw.get("id") {
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        _ => format!("{company}-{title}")
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("-"),
    };

    let remote = raw.get("remote").and_then(Value::as_bool).unwrap_or(false);
    let apply_url = raw
        .get("apply_url")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .or_else(|| {
            raw.get("url")
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
        });

    json!({
        "id": id,
        "title": title,
        "company_name": company,
        "description": raw.get("description").cloned().unwrap_or(Value::Null),
        "location": raw.get("location").and_then(Value::as_str).filter(|s| !s.is_empty()).unwrap_or("Remote"),
        "job_type": if remote { "Remote" } else { "On-site" },
        "url": apply_url,
        "date_posted": raw.get("posted_at").cloned().unwrap_or(Value::Null),
        "score": QUALITY_SCORE,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> YCombinatorProvider {
        YCombinatorProvider::new(
            "test-key".to_string(),
            Duration::from_millis(8_000),
            DEFAULT_COOLDOWN,
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_rate_limit_opens_cooldown_window() {
        let client = provider();
        assert!(!client.in_cooldown());

        client.note_rate_limit();
        assert!(client.in_cooldown());

        // Calls inside the window short-circuit before any network I/O.
        let err = client.fetch(&SearchParams::for_query("rust")).await;
        assert!(matches!(err, Err(ProviderError::RateLimited)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cooldown_window_expires() {
        let client = provider();
        client.note_rate_limit();

        tokio::time::advance(Duration::from_secs(4 * 60)).await;
        assert!(client.in_cooldown());

        tokio::time::advance(Duration::from_secs(61)).await;
        assert!(!client.in_cooldown());
    }

    #[test]
    fn test_shape_record_maps_remote_flag_to_job_type() {
        let shaped = shape_record(&json!({ "id": "yc-1", "remote": true }));
        assert_eq!(shaped["job_type"], "Remote");

        let shaped = shape_record(&json!({ "id": "yc-1", "remote": false }));
        assert_eq!(shaped["job_type"], "On-site");
    }

    #[test]
    fn test_shape_record_slug_and_quality() {
        let shaped = shape_record(&json!({ "company": "Initech", "title": "Rust Engineer" }));
        assert_eq!(shaped["id"], "Initech-Rust-Engineer");
        assert_eq!(shaped["score"], QUALITY_SCORE);
    }

    #[test]
    fn test_shape_record_prefers_apply_url() {
        let shaped = shape_record(&json!({
            "id": "yc-1",
            "apply_url": "https://yc.example/apply",
            "url": "https://yc.example/posting",
        }));
        assert_eq!(shaped["url"], "https://yc.example/apply");
    }
}
