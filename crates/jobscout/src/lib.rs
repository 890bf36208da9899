//! jobscout — job-matching and deduplication core.
//!
//! Fetches candidate postings from heterogeneous providers, normalizes them
//! into one canonical shape, deduplicates across sources, enriches them with
//! derived technical metadata, and scores them against a user profile. The
//! embedding application supplies the profile and renders the ranked output;
//! everything here is session-local — no storage, no server.

pub mod cache;
pub mod config;
pub mod dedup;
pub mod enrich;
pub mod errors;
pub mod logging;
pub mod mapping;
pub mod matching;
pub mod mock;
pub mod models;
pub mod providers;
pub mod query;
pub mod search;

pub use crate::config::Config;
pub use crate::errors::{ProviderError, SearchError};
pub use crate::models::job::{CanonicalJob, EnrichedJob, Seniority};
pub use crate::models::profile::{RemotePreference, UserProfile};
pub use crate::providers::{JobProvider, SearchParams};
pub use crate::search::{SearchOutcome, SearchPhase, SearchService};
