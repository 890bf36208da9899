use std::sync::Mutex;
use std::time::Duration;

use tokio::time::Instant;

use crate::models::job::EnrichedJob;

/// Default lifetime of the primary search result set.
pub const DEFAULT_TTL: Duration = Duration::from_secs(10 * 60);

struct CacheEntry {
    jobs: Vec<EnrichedJob>,
    stored_at: Instant,
}

/// Single-slot, memory-only cache for the session's primary search.
///
/// Entries stay valid for the TTL measured from `set`; afterwards `get`
/// reports a miss and the orchestrator refetches. Deadlines use
/// `tokio::time::Instant` so tests can drive the clock with a paused runtime.
pub struct ResultCache {
    ttl: Duration,
    slot: Mutex<Option<CacheEntry>>,
}

impl ResultCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slot: Mutex::new(None),
        }
    }

    /// Returns the cached jobs while the entry is younger than the TTL.
    pub fn get(&self) -> Option<Vec<EnrichedJob>> {
        let slot = self.slot.lock().expect("cache mutex poisoned");
        slot.as_ref()
            .filter(|entry| entry.stored_at.elapsed() <= self.ttl)
            .map(|entry| entry.jobs.clone())
    }

    pub fn set(&self, jobs: Vec<EnrichedJob>) {
        let mut slot = self.slot.lock().expect("cache mutex poisoned");
        *slot = Some(CacheEntry {
            jobs,
            stored_at: Instant::now(),
        });
    }
}

impl Default for ResultCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enrich::enrich_job;
    use crate::mapping::map_to_canonical;
    use chrono::Utc;
    use serde_json::json;

    fn sample_jobs() -> Vec<EnrichedJob> {
        vec![enrich_job(map_to_canonical(
            &json!({ "title": "Engineer", "company": "Acme", "url": "https://x.com/1" }),
            Utc::now(),
        ))]
    }

    #[tokio::test(start_paused = true)]
    async fn test_hit_before_ttl_expires() {
        let cache = ResultCache::default();
        cache.set(sample_jobs());

        tokio::time::advance(Duration::from_secs(9 * 60)).await;
        let hit = cache.get().expect("expected a cache hit at +9min");
        assert_eq!(hit.len(), 1);
        assert_eq!(hit[0].job.title, "Engineer");
    }

    #[tokio::test(start_paused = true)]
    async fn test_miss_after_ttl_expires() {
        let cache = ResultCache::default();
        cache.set(sample_jobs());

        tokio::time::advance(Duration::from_secs(11 * 60)).await;
        assert!(cache.get().is_none(), "expected a cache miss at +11min");
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_cache_misses() {
        let cache = ResultCache::default();
        assert!(cache.get().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_set_refreshes_the_clock() {
        let cache = ResultCache::default();
        cache.set(sample_jobs());
        tokio::time::advance(Duration::from_secs(9 * 60)).await;
        cache.set(sample_jobs());
        tokio::time::advance(Duration::from_secs(9 * 60)).await;
        assert!(cache.get().is_some());
    }
}
