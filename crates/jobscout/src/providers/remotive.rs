//! Remotive client — public remote-jobs REST API, no authentication.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::errors::ProviderError;
use crate::providers::{send_with_timeout, JobProvider, SearchParams};

const REMOTIVE_URL: &str = "https://remotive.com/api/remote-jobs";

/// Quality prior for postings that disclose salary data.
const QUALITY_WITH_SALARY: u32 = 85;
const QUALITY_WITHOUT_SALARY: u32 = 75;

#[derive(Debug, Deserialize)]
struct RemotiveResponse {
    #[serde(default)]
    jobs: Vec<Value>,
}

pub struct RemotiveProvider {
    http: reqwest::Client,
    timeout: Duration,
}

impl RemotiveProvider {
    pub fn new(timeout: Duration) -> Self {
        Self {
            http: reqwest::Client::new(),
            timeout,
        }
    }
}

#[async_trait]
impl JobProvider for RemotiveProvider {
    fn name(&self) -> &'static str {
        "remotive"
    }

    async fn fetch(&self, params: &SearchParams) -> Result<Vec<Value>, ProviderError> {
        let mut request = self.http.get(REMOTIVE_URL);
        if !params.query.is_empty() {
            request = request.query(&[("search", params.query.as_str())]);
        }

        let response = send_with_timeout(request, self.timeout).await?;
        let status = response.status();
        if status.as_u16() == 429 {
            return Err(ProviderError::RateLimited);
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: RemotiveResponse = response.json().await?;
        debug!(count = body.jobs.len(), "remotive returned records");
        Ok(body.jobs.iter().map(shape_record).collect())
    }
}

/// Re-keys a Remotive posting into the shape the canonical mapper reads.
/// Remotive is remote-first, so a missing location defaults to "Remote".
fn shape_record(raw: &Value) -> Value {
    let company = raw
        .get("company_name")
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

    let has_salary = raw
        .get("salary")
        .and_then(Value::as_str)
        .map(|s| !s.is_empty())
        .unwrap_or(false);

    let location = raw
        .get("candidate_required_location")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .unwrap_or("Remote");

    json!({
        "id": id,
        "title": title,
        "company_name": company,
        "description": raw.get("description").cloned().unwrap_or(Value::Null),
        "location": location,
        "job_type": raw.get("job_type").cloned().unwrap_or(Value::Null),
        "publication_date": raw.get("publication_date").cloned().unwrap_or(Value::Null),
        "url": raw.get("url").cloned().unwrap_or(Value::Null),
        "score": if has_salary { QUALITY_WITH_SALARY } else { QUALITY_WITHOUT_SALARY },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_record_keeps_provider_id() {
        let raw = json!({ "id": 914352, "title": "Rust Engineer", "company_name": "Acme" });
        let shaped = shape_record(&raw);
        assert_eq!(shaped["id"], "914352");
        assert_eq!(shaped["score"], QUALITY_WITHOUT_SALARY);
    }

    #[test]
    fn test_shape_record_builds_slug_without_id() {
        let raw = json!({ "title": "Rust Engineer", "company_name": "Acme Co" });
        let shaped = shape_record(&raw);
        assert_eq!(shaped["id"], "Acme-Co-Rust-Engineer");
    }

    #[test]
    fn test_salary_presence_raises_quality_prior() {
        let raw = json!({ "id": 1, "salary": "$150k-$180k" });
        assert_eq!(shape_record(&raw)["score"], QUALITY_WITH_SALARY);

        let raw = json!({ "id": 1, "salary": "" });
        assert_eq!(shape_record(&raw)["score"], QUALITY_WITHOUT_SALARY);
    }

    #[test]
    fn test_location_defaults_to_remote() {
        let shaped = shape_record(&json!({ "id": 1 }));
        assert_eq!(shaped["location"], "Remote");

        let shaped = shape_record(&json!({ "id": 1, "candidate_required_location": "Europe" }));
        assert_eq!(shaped["location"], "Europe");
    }
}
