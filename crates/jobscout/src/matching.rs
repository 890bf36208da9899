//! Matcher — 0..=100 fit estimate between an enriched job and a user profile.
//!
//! Five independent sub-scores combined by weight, with a 10% bonus when the
//! role, technology, and company dimensions all line up. Fully deterministic:
//! identical inputs always produce the identical integer.

use serde::{Deserialize, Serialize};

use crate::models::job::{EnrichedJob, Seniority};
use crate::models::profile::{RemotePreference, UserProfile};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchWeights {
    pub technology: f64,
    pub role: f64,
    pub location: f64,
    pub company: f64,
    pub experience: f64,
}

impl Default for MatchWeights {
    fn default() -> Self {
        Self {
            technology: 30.0,
            role: 25.0,
            location: 20.0,
            company: 15.0,
            experience: 10.0,
        }
    }
}

/// Scores a job against a profile with the default weights.
pub fn match_score(job: &EnrichedJob, profile: &UserProfile) -> u8 {
    score_with_weights(job, profile, &MatchWeights::default())
}

pub fn score_with_weights(job: &EnrichedJob, profile: &UserProfile, weights: &MatchWeights) -> u8 {
    let tech_pct = technology_overlap_pct(&job.technologies, &profile.skills);
    let role = role_score(&job.job.title, profile.target_role.as_deref(), weights.role);
    let location = location_score(
        job.job.job_type.as_deref(),
        profile.remote_preference,
        weights.location,
    );
    let company = company_score(
        &job.job.employer_name,
        &profile.target_companies,
        weights.company,
    );
    let experience = experience_score(
        profile.years_of_experience,
        job.seniority,
        weights.experience,
    );

    let mut total = (tech_pct / 100.0) * weights.technology + role + location + company + experience;

    // Bonus for across-the-board matches: exact role, >=80% tech overlap, and
    // a company hit.
    if role == weights.role && tech_pct >= 80.0 && company > 0.0 {
        total *= 1.10;
    }

    total.min(100.0).round() as u8
}

/// Percentage of the job's technologies found in the profile's skills,
/// matched by case-insensitive substring in either direction.
fn technology_overlap_pct(technologies: &[String], skills: &[String]) -> f64 {
    if technologies.is_empty() {
        return 0.0;
    }
    let matches = technologies
        .iter()
        .filter(|tech| {
            let tech_lower = tech.to_lowercase();
            skills.iter().any(|skill| {
                let skill_lower = skill.to_lowercase();
                skill_lower.contains(&tech_lower) || tech_lower.contains(&skill_lower)
            })
        })
        .count();
    (matches as f64 / technologies.len() as f64) * 100.0
}

/// Full weight for an exact or substring title/role match, else proportional
/// to the fraction of target-role keywords present in the title.
fn role_score(title: &str, target_role: Option<&str>, weight: f64) -> f64 {
    let Some(target_role) = target_role else {
        return 0.0;
    };
    let title_lower = title.to_lowercase();
    let target_lower = target_role.to_lowercase();
    if title_lower.is_empty() || target_lower.trim().is_empty() {
        return 0.0;
    }

    let first_title_word = title_lower.split_whitespace().next().unwrap_or("");
    if title_lower == target_lower
        || title_lower.contains(target_lower.trim())
        || (!first_title_word.is_empty() && target_lower.contains(first_title_word))
    {
        return weight;
    }

    let keywords: Vec<&str> = target_lower.split_whitespace().collect();
    let matched = keywords
        .iter()
        .filter(|keyword| title_lower.contains(*keyword))
        .count();
    (matched as f64 / keywords.len() as f64) * weight
}

/// "Any" or an exact preference match earns the full weight; an in-person
/// job type under a non-remote preference earns a compatible partial 15/20;
/// everything else earns nothing.
fn location_score(job_type: Option<&str>, preference: RemotePreference, weight: f64) -> f64 {
    if preference == RemotePreference::Any {
        return weight;
    }
    let job_type = job_type.unwrap_or("").to_lowercase();
    let keyword = match preference {
        RemotePreference::Remote => "remote",
        RemotePreference::Hybrid => "hybrid",
        RemotePreference::OnSite => "on-site",
        RemotePreference::Any => unreachable!(),
    };
    if job_type.contains(keyword) {
        return weight;
    }
    if (job_type == "hybrid" || job_type == "on-site") && preference != RemotePreference::Remote {
        return weight * 0.75;
    }
    0.0
}

/// Full weight when the employer matches any target company by bidirectional
/// substring, else zero.
fn company_score(employer_name: &str, target_companies: &[String], weight: f64) -> f64 {
    let employer_lower = employer_name.to_lowercase();
    if employer_lower.is_empty() {
        return 0.0;
    }
    let matched = target_companies.iter().any(|company| {
        let company_lower = company.to_lowercase();
        !company_lower.is_empty()
            && (employer_lower.contains(&company_lower) || company_lower.contains(&employer_lower))
    });
    if matched {
        weight
    } else {
        0.0
    }
}

/// Bracket table: <2y aligns with Junior, 2-5y with Mid/Junior, >=5y with
/// Senior/Mid. Aligned earns the full weight, misaligned half, unknown years
/// nothing.
fn experience_score(years: Option<u32>, seniority: Seniority, weight: f64) -> f64 {
    let Some(years) = years else {
        return 0.0;
    };
    let aligned = match seniority {
        Seniority::Junior => years < 5,
        Seniority::MidLevel => years >= 2,
        Seniority::Senior => years >= 5,
        Seniority::StaffArchitect => false,
    };
    if aligned {
        weight
    } else {
        weight * 0.5
    }
}
