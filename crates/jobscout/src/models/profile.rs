use serde::{Deserialize, Serialize};

/// Where the user wants to work.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RemotePreference {
    Remote,
    Hybrid,
    #[serde(rename = "On-site")]
    OnSite,
    #[default]
    Any,
}

/// Read-only profile snapshot supplied by the profile-management collaborator.
///
/// No validation beyond defaults: a missing or empty profile degrades to an
/// unconstrained, un-scored search path — it must never be an error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserProfile {
    pub target_role: Option<String>,
    pub skills: Vec<String>,
    pub remote_preference: RemotePreference,
    pub target_companies: Vec<String>,
    pub years_of_experience: Option<u32>,
}
