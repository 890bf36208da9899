use std::collections::HashSet;

use crate::models::job::CanonicalJob;

/// Removes repeat postings across providers and pages, first occurrence wins.
///
/// Identity key is the first non-empty of `apply_link`, `id`, `title`; two
/// jobs sharing a key are the same posting no matter which provider supplied
/// them. A record with all three empty is unidentifiable and dropped outright
/// — intentional data loss, not a bug. The title fallback can collide jobs
/// from different companies that share a title; accepted for simplicity.
pub fn dedupe_jobs(jobs: Vec<CanonicalJob>) -> Vec<CanonicalJob> {
    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(jobs.len());
    for job in jobs {
        let key = [&job.apply_link, &job.id, &job.title]
            .into_iter()
            .find(|candidate| !candidate.is_empty());
        let Some(key) = key else {
            continue;
        };
        if seen.insert(key.clone()) {
            out.push(job);
        }
    }
    out
}
