//! Search orchestrator — sequences providers, mapper, deduplicator, enricher,
//! and matcher into one round, with timeout/fallback policy and a short-lived
//! result cache.
//!
//! Each round walks a fixed set of phases: Idle -> Fetching -> Merging ->
//! Enriching -> Scoring -> Sorted, or Fallback when the merge is empty.
//! Provider failures are absorbed in Fetching; the only orchestration-level
//! failure is a panicked provider task. Concurrent rounds race under
//! last-request-wins: every round takes a token from a monotonic counter, and
//! a round that finishes after a newer one started is flagged superseded and
//! never reaches the cache.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use serde_json::Value;
use tokio::task::JoinSet;
use tracing::{debug, warn};

use crate::cache::ResultCache;
use crate::config::Config;
use crate::dedup::dedupe_jobs;
use crate::enrich::enrich_jobs;
use crate::errors::SearchError;
use crate::mapping::map_to_canonical;
use crate::matching::match_score;
use crate::mock;
use crate::models::job::EnrichedJob;
use crate::models::profile::{RemotePreference, UserProfile};
use crate::providers::remotive::RemotiveProvider;
use crate::providers::ycombinator::YCombinatorProvider;
use crate::providers::{JobProvider, SearchParams};
use crate::query::build_search_query;

/// Category strings for the diverse discovery mode, fetched five at a time.
pub const DIVERSE_CATEGORIES: [&str; 20] = [
    "Finance Analyst",
    "Aerospace Engineer",
    "Software Engineer",
    "Data Scientist",
    "UX Designer",
    "Product Manager",
    "DevOps Engineer",
    "Machine Learning Engineer",
    "Business Analyst",
    "Systems Administrator",
    "Electrical Engineer",
    "Mechanical Engineer",
    "Civil Engineer",
    "Accountant",
    "Marketing Manager",
    "Sales Representative",
    "HR Manager",
    "Project Manager",
    "Quality Assurance",
    "Network Administrator",
];

pub const CATEGORIES_PER_PAGE: usize = 5;

/// Each diverse batch keeps only its best-scoring jobs.
const DIVERSE_BATCH_LIMIT: usize = 10;

/// Lifecycle states of a search round. `Sorted`, `Fallback`, and `Failed`
/// are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    Idle,
    Fetching,
    Merging,
    Enriching,
    Scoring,
    Sorted,
    Fallback,
    Failed,
}

/// Result of one search round.
#[derive(Debug)]
pub struct SearchOutcome {
    pub jobs: Vec<EnrichedJob>,
    /// Terminal phase the round reached.
    pub phase: SearchPhase,
    pub round: u64,
    /// A newer round started while this one was in flight; the caller must
    /// discard this result. Superseded rounds never write the cache.
    pub superseded: bool,
}

pub struct SearchService {
    providers: Vec<Arc<dyn JobProvider>>,
    cache: ResultCache,
    round: AtomicU64,
}

impl SearchService {
    pub fn new(providers: Vec<Arc<dyn JobProvider>>) -> Self {
        Self::with_cache(providers, ResultCache::default())
    }

    pub fn with_cache(providers: Vec<Arc<dyn JobProvider>>, cache: ResultCache) -> Self {
        Self {
            providers,
            cache,
            round: AtomicU64::new(0),
        }
    }

    /// Wires up the two public providers from configuration.
    pub fn from_config(config: &Config) -> Self {
        let timeout = Duration::from_millis(config.provider_timeout_ms);
        let providers: Vec<Arc<dyn JobProvider>> = vec![
            Arc::new(YCombinatorProvider::new(
                config.rapidapi_key.clone(),
                timeout,
                Duration::from_secs(config.cooldown_secs),
            )),
            Arc::new(RemotiveProvider::new(timeout)),
        ];
        Self::with_cache(
            providers,
            ResultCache::new(Duration::from_secs(config.cache_ttl_secs)),
        )
    }

    /// Runs the primary, profile-driven search round.
    ///
    /// Read-through cached: a fresh result from the last ten minutes is
    /// served without touching the network. The user never sees a provider
    /// error — the worst case is the fixed sample dataset.
    pub async fn search(&self, profile: Option<&UserProfile>) -> Result<SearchOutcome, SearchError> {
        if let Some(jobs) = self.cache.get() {
            debug!("primary search served from cache");
            return Ok(SearchOutcome {
                jobs,
                phase: SearchPhase::Sorted,
                round: self.round.load(Ordering::SeqCst),
                superseded: false,
            });
        }

        let round = self.round.fetch_add(1, Ordering::SeqCst) + 1;
        let query = profile.map(build_search_query).unwrap_or_default();
        let remote_only =
            profile.is_some_and(|p| p.remote_preference == RemotePreference::Remote);
        let params = SearchParams {
            remote_only,
            ..SearchParams::for_query(query)
        };

        debug!(round, query = %params.query, "round fetching");
        let records = self.fan_out(std::slice::from_ref(&params)).await?;

        debug!(round, records = records.len(), "round merging");
        let fetched_at = Utc::now();
        let jobs = dedupe_jobs(
            records
                .iter()
                .map(|record| map_to_canonical(record, fetched_at))
                .collect(),
        );

        let (jobs, phase) = if jobs.is_empty() {
            warn!(round, "no provider returned jobs; serving the sample dataset");
            (mock::sample_jobs(fetched_at), SearchPhase::Fallback)
        } else {
            (jobs, SearchPhase::Sorted)
        };

        debug!(round, jobs = jobs.len(), "round enriching and scoring");
        let mut enriched = enrich_jobs(jobs);
        score_and_sort(&mut enriched, profile);

        let superseded = self.round.load(Ordering::SeqCst) != round;
        if !superseded {
            self.cache.set(enriched.clone());
        }

        Ok(SearchOutcome {
            jobs: enriched,
            phase,
            round,
            superseded,
        })
    }

    /// Fetches one page of the diverse-category discovery mode.
    ///
    /// Page `n` covers five categories from the fixed list; a page past the
    /// end yields an empty batch, which signals exhaustion rather than an
    /// error. Batches are never cached and the caller appends them — they
    /// never replace primary results.
    pub async fn fetch_diverse_page(
        &self,
        page: usize,
        profile: Option<&UserProfile>,
    ) -> Result<Vec<EnrichedJob>, SearchError> {
        let start = page.saturating_mul(CATEGORIES_PER_PAGE);
        if start >= DIVERSE_CATEGORIES.len() {
            debug!(page, "diverse categories exhausted");
            return Ok(Vec::new());
        }
        let end = (start + CATEGORIES_PER_PAGE).min(DIVERSE_CATEGORIES.len());
        let queries: Vec<SearchParams> = DIVERSE_CATEGORIES[start..end]
            .iter()
            .map(|category| SearchParams::for_query(*category))
            .collect();

        let records = self.fan_out(&queries).await?;
        let fetched_at = Utc::now();
        let jobs = dedupe_jobs(
            records
                .iter()
                .map(|record| map_to_canonical(record, fetched_at))
                .collect(),
        );

        let mut enriched = enrich_jobs(jobs);
        score_and_sort(&mut enriched, profile);
        enriched.truncate(DIVERSE_BATCH_LIMIT);
        debug!(page, jobs = enriched.len(), "diverse batch ready");
        Ok(enriched)
    }

    /// Searches postings at one specific company: a widened query, then a
    /// case-insensitive employer filter over the merged results.
    pub async fn search_company(
        &self,
        company: &str,
        role: Option<&str>,
        profile: Option<&UserProfile>,
    ) -> Result<Vec<EnrichedJob>, SearchError> {
        let params = SearchParams::for_query(format!("{company} {}", role.unwrap_or("developer")));
        let records = self.fan_out(std::slice::from_ref(&params)).await?;
        let fetched_at = Utc::now();
        let needle = company.to_lowercase();

        let jobs: Vec<_> = dedupe_jobs(
            records
                .iter()
                .map(|record| map_to_canonical(record, fetched_at))
                .collect(),
        )
        .into_iter()
        .filter(|job| job.employer_name.to_lowercase().contains(&needle))
        .collect();

        let mut enriched = enrich_jobs(jobs);
        score_and_sort(&mut enriched, profile);
        Ok(enriched)
    }

    /// Issues every (query, provider) pair concurrently and joins them all.
    ///
    /// Raw records come back in (query, provider) order regardless of
    /// completion order, so provider latency never leaks into output order.
    /// A failed provider contributes nothing; a hung one is cut by its own
    /// timeout, so the join always completes.
    async fn fan_out(&self, queries: &[SearchParams]) -> Result<Vec<Value>, SearchError> {
        let width = self.providers.len();
        let mut set = JoinSet::new();
        for (query_idx, params) in queries.iter().enumerate() {
            for (provider_idx, provider) in self.providers.iter().enumerate() {
                let provider = Arc::clone(provider);
                let params = params.clone();
                let slot = query_idx * width + provider_idx;
                set.spawn(async move { (slot, provider.name(), provider.fetch(&params).await) });
            }
        }

        let mut slots: Vec<Vec<Value>> = vec![Vec::new(); queries.len() * width];
        while let Some(joined) = set.join_next().await {
            let (slot, name, result) = joined?;
            match result {
                Ok(records) => {
                    debug!(provider = name, records = records.len(), "provider contributed");
                    slots[slot] = records;
                }
                Err(error) => {
                    warn!(provider = name, %error, "provider failed; contributing nothing");
                }
            }
        }
        Ok(slots.into_iter().flatten().collect())
    }
}

/// Applies the matcher when a profile is present and sorts by descending
/// match score, breaking ties on the provider quality prior. Without a
/// profile the input order is preserved and scores stay unset.
fn score_and_sort(jobs: &mut [EnrichedJob], profile: Option<&UserProfile>) {
    let Some(profile) = profile else {
        return;
    };
    for job in jobs.iter_mut() {
        job.match_score = Some(match_score(job, profile));
    }
    jobs.sort_by(|a, b| {
        b.match_score.cmp(&a.match_score).then(
            b.job
                .quality_score
                .partial_cmp(&a.job.quality_score)
                .unwrap_or(std::cmp::Ordering::Equal),
        )
    });
}
