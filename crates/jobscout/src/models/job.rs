use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Seniority level derived from a job title.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Seniority {
    Junior,
    #[default]
    #[serde(rename = "Mid-level")]
    MidLevel,
    Senior,
    #[serde(rename = "Staff/Architect")]
    StaffArchitect,
}

/// The single internal job representation every provider is mapped into.
///
/// Produced once per fetch by the canonical mapper and immutable afterwards;
/// enrichment and matching derive new values, they never mutate provider data
/// in place. `id` is best-effort stable only — providers disagree about
/// identity, which is why deduplication keys off `apply_link` first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanonicalJob {
    pub id: String,
    pub title: String,
    pub employer_name: String,
    /// Free text; may contain markup. Empty string allowed.
    pub description: String,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    /// "Remote" / "Hybrid" / "On-site" when the provider reports it.
    pub job_type: Option<String>,
    pub salary_min: Option<f64>,
    pub salary_max: Option<f64>,
    /// Defaults to fetch time when the provider omits it.
    pub posted_at: DateTime<Utc>,
    /// External URL; "" is the "no link" sentinel.
    pub apply_link: String,
    /// Provider-assigned or heuristic prior (0-100). Tie-break only; distinct
    /// from the profile match score.
    pub quality_score: f64,
}

/// A canonical job plus derived technical metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichedJob {
    #[serde(flatten)]
    pub job: CanonicalJob,
    /// Unique, in vocabulary-scan order (not description order).
    pub technologies: Vec<String>,
    pub seniority: Seniority,
    pub skills_required: Vec<String>,
    /// 0..=10.
    pub difficulty_score: u8,
    /// Lower-cased, legal-suffix-stripped employer name.
    pub normalized_company: String,
    /// 0..=100; None until the matcher has run against a profile.
    pub match_score: Option<u8>,
}
