//! Canonical mapper — reconciles provider-native records into [`CanonicalJob`].
//!
//! Total over any JSON shape: missing, null, or mistyped fields fall back to
//! the data-model defaults, so a mapped job always satisfies the canonical
//! invariants. Field precedence is declared as data (one key table per
//! canonical field) rather than scattered fallback chains, so the order is
//! deterministic and testable field-by-field.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

use crate::models::job::CanonicalJob;

/// Fallback quality prior for providers that report none.
const DEFAULT_QUALITY_SCORE: f64 = 70.0;

// Precedence tables: first key with a non-empty value wins. Dotted entries
// descend into nested objects (`location.city`).
const ID_KEYS: &[&str] = &["id", "job_id", "jobId"];
const TITLE_KEYS: &[&str] = &["title", "job_title", "position"];
const EMPLOYER_KEYS: &[&str] = &["company_name", "employer", "company", "employer_name"];
const DESCRIPTION_KEYS: &[&str] = &["description", "job_description", "summary"];
const CITY_KEYS: &[&str] = &["city", "location.city", "location", "job_city"];
const STATE_KEYS: &[&str] = &["region", "location.state", "state", "job_state"];
const COUNTRY_KEYS: &[&str] = &["country", "location.country", "job_country"];
const JOB_TYPE_KEYS: &[&str] = &["job_type", "type"];
const SALARY_MIN_KEYS: &[&str] = &["salary_min", "min_salary"];
const SALARY_MAX_KEYS: &[&str] = &["salary_max", "max_salary"];
const POSTED_KEYS: &[&str] = &["posted_at", "publication_date", "date_posted"];
const APPLY_LINK_KEYS: &[&str] = &["apply_url", "url", "job_apply_link", "redirect_url"];
const QUALITY_KEYS: &[&str] = &["job_apply_quality_score", "score", "relevance_score"];

/// Maps any provider record into the canonical shape.
///
/// `fetched_at` stamps `posted_at` when the provider omits a usable date, so
/// the mapper itself stays pure and testable.
pub fn map_to_canonical(record: &Value, fetched_at: DateTime<Utc>) -> CanonicalJob {
    let title = first_string(record, TITLE_KEYS).unwrap_or_default();
    let employer_name = first_string(record, EMPLOYER_KEYS).unwrap_or_default();
    let apply_link = first_string(record, APPLY_LINK_KEYS).unwrap_or_default();

    let id = first_string(record, ID_KEYS)
        .or_else(|| slug_id(&employer_name, &title))
        .unwrap_or_else(|| apply_link.clone());

    let posted_at = first_string(record, POSTED_KEYS)
        .and_then(|raw| parse_timestamp(&raw))
        .unwrap_or(fetched_at);

    let quality_score = first_number(record, QUALITY_KEYS)
        .unwrap_or(DEFAULT_QUALITY_SCORE)
        .clamp(0.0, 100.0);

    CanonicalJob {
        id,
        title,
        employer_name,
        description: first_string(record, DESCRIPTION_KEYS).unwrap_or_default(),
        city: first_string(record, CITY_KEYS),
        state: first_string(record, STATE_KEYS),
        country: first_string(record, COUNTRY_KEYS),
        job_type: first_string(record, JOB_TYPE_KEYS),
        salary_min: first_number(record, SALARY_MIN_KEYS),
        salary_max: first_number(record, SALARY_MAX_KEYS),
        posted_at,
        apply_link,
        quality_score,
    }
}

/// Identity fallback when the provider reports no id: an employer-title slug.
fn slug_id(employer: &str, title: &str) -> Option<String> {
    if employer.is_empty() || title.is_empty() {
        return None;
    }
    let joined = format!("{employer}-{title}");
    Some(joined.split_whitespace().collect::<Vec<_>>().join("-"))
}

/// First non-empty scalar under the given keys, rendered as a string.
/// Numbers are accepted because several providers report numeric ids.
fn first_string(record: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match lookup(record, key) {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

fn first_number(record: &Value, keys: &[&str]) -> Option<f64> {
    keys.iter()
        .find_map(|key| lookup(record, key).and_then(Value::as_f64))
}

/// Resolves a possibly dotted key path against a record.
fn lookup<'a>(record: &'a Value, key: &str) -> Option<&'a Value> {
    key.split('.')
        .try_fold(record, |value, segment| value.get(segment))
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fetched_at() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2025-06-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_empty_object_maps_to_valid_job() {
        let job = map_to_canonical(&json!({}), fetched_at());
        assert_eq!(job.id, "");
        assert_eq!(job.title, "");
        assert_eq!(job.employer_name, "");
        assert_eq!(job.description, "");
        assert_eq!(job.posted_at, fetched_at());
        assert_eq!(job.apply_link, "");
        assert_eq!(job.quality_score, 70.0);
    }

    #[test]
    fn test_non_object_input_maps_to_valid_job() {
        let job = map_to_canonical(&json!("not a record"), fetched_at());
        assert_eq!(job.title, "");
        assert_eq!(job.posted_at, fetched_at());
    }

    #[test]
    fn test_title_precedence_first_key_wins() {
        let record = json!({ "job_title": "Backend Engineer", "title": "Platform Engineer" });
        let job = map_to_canonical(&record, fetched_at());
        assert_eq!(job.title, "Platform Engineer");
    }

    #[test]
    fn test_empty_string_falls_through_to_next_key() {
        let record = json!({ "title": "", "job_title": "Backend Engineer" });
        let job = map_to_canonical(&record, fetched_at());
        assert_eq!(job.title, "Backend Engineer");
    }

    #[test]
    fn test_numeric_provider_id_is_stringified() {
        let record = json!({ "id": 194823 });
        let job = map_to_canonical(&record, fetched_at());
        assert_eq!(job.id, "194823");
    }

    #[test]
    fn test_id_falls_back_to_employer_title_slug() {
        let record = json!({ "title": "Senior Rust Engineer", "company": "Acme Co" });
        let job = map_to_canonical(&record, fetched_at());
        assert_eq!(job.id, "Acme-Co-Senior-Rust-Engineer");
    }

    #[test]
    fn test_id_falls_back_to_apply_link_last() {
        let record = json!({ "url": "https://example.com/jobs/1" });
        let job = map_to_canonical(&record, fetched_at());
        assert_eq!(job.id, "https://example.com/jobs/1");
    }

    #[test]
    fn test_nested_location_fields() {
        let record = json!({ "location": { "city": "Berlin", "country": "Germany" } });
        let job = map_to_canonical(&record, fetched_at());
        assert_eq!(job.city.as_deref(), Some("Berlin"));
        assert_eq!(job.country.as_deref(), Some("Germany"));
    }

    #[test]
    fn test_plain_string_location_becomes_city() {
        let record = json!({ "location": "Remote" });
        let job = map_to_canonical(&record, fetched_at());
        assert_eq!(job.city.as_deref(), Some("Remote"));
    }

    #[test]
    fn test_salary_alias_keys() {
        let record = json!({ "min_salary": 120000, "max_salary": 160000 });
        let job = map_to_canonical(&record, fetched_at());
        assert_eq!(job.salary_min, Some(120000.0));
        assert_eq!(job.salary_max, Some(160000.0));
    }

    #[test]
    fn test_publication_date_without_timezone_parses() {
        let record = json!({ "publication_date": "2025-05-20T10:30:00" });
        let job = map_to_canonical(&record, fetched_at());
        assert_eq!(job.posted_at.to_rfc3339(), "2025-05-20T10:30:00+00:00");
    }

    #[test]
    fn test_unparseable_date_defaults_to_fetch_time() {
        let record = json!({ "posted_at": "three days ago" });
        let job = map_to_canonical(&record, fetched_at());
        assert_eq!(job.posted_at, fetched_at());
    }

    #[test]
    fn test_quality_score_clamped_into_range() {
        let record = json!({ "score": 250 });
        let job = map_to_canonical(&record, fetched_at());
        assert_eq!(job.quality_score, 100.0);
    }
}
