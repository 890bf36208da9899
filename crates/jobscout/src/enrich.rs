//! Enricher — derives technical metadata from free-text titles and
//! descriptions. Everything here is a deterministic, case-insensitive scan
//! against fixed vocabularies; no network, no clock.

use crate::models::job::{CanonicalJob, EnrichedJob, Seniority};

/// Technology vocabulary. Output preserves this order, not description order.
const TECH_VOCABULARY: &[&str] = &[
    "React",
    "Vue",
    "Angular",
    "Node.js",
    "Python",
    "Java",
    "C++",
    "C#",
    "TypeScript",
    "JavaScript",
    "GraphQL",
    "REST",
    "SQL",
    "MongoDB",
    "PostgreSQL",
    "AWS",
    "Docker",
    "Kubernetes",
    "Git",
    "Microservices",
    "Next.js",
    "FastAPI",
    "Spring",
    "Django",
    "Flask",
    "Go",
    "Rust",
];

/// Skills vocabulary. Overlaps with the technology list but tracked apart.
const SKILL_VOCABULARY: &[&str] = &[
    "JavaScript",
    "TypeScript",
    "React",
    "Vue",
    "Angular",
    "Node.js",
    "Python",
    "Java",
    "C++",
    "C#",
    "GraphQL",
    "REST API",
    "SQL",
    "MongoDB",
    "AWS",
    "Docker",
    "Kubernetes",
    "Git",
    "System Design",
    "Microservices",
    "OOP",
];

/// Each hit adds 2 difficulty points.
const ADVANCED_KEYWORDS: &[&str] = &[
    "microservices",
    "system design",
    "distributed",
    "scalability",
    "ml",
    "ai",
    "blockchain",
];

/// Breadth list for difficulty: 0.5 per distinct hit, capped at 5.
const DIFFICULTY_TECH: &[&str] = &[
    "react",
    "vue",
    "angular",
    "node.js",
    "python",
    "java",
    "c++",
    "c#",
    "typescript",
    "graphql",
    "rest",
    "sql",
    "mongodb",
    "aws",
    "docker",
];

/// Legal-entity and vanity suffix tokens removed during company
/// normalization (compared with any trailing dot stripped).
const LEGAL_SUFFIXES: &[&str] = &[
    "inc",
    "incorporated",
    "ltd",
    "llc",
    "corp",
    "corporation",
    "gmbh",
    "sa",
    "ag",
    "ab",
    "oy",
    "as",
    "asa",
    "cv",
    "bv",
    "nv",
    "se",
    "srl",
    "sarl",
    "sp",
    "sas",
    "gp",
    "lp",
    "plc",
    "pty",
    "holdings",
    "group",
    "brands",
    "entertainment",
    "technologies",
    "systems",
    "services",
    "partners",
    "ventures",
    "labs",
    "hub",
    "studio",
    "agency",
    "co",
    "com",
    "net",
    "org",
    "io",
    "ai",
];

/// Enriches a batch of canonical jobs. Per-job and independent.
pub fn enrich_jobs(jobs: Vec<CanonicalJob>) -> Vec<EnrichedJob> {
    jobs.into_iter().map(enrich_job).collect()
}

pub fn enrich_job(job: CanonicalJob) -> EnrichedJob {
    let description_lower = job.description.to_lowercase();
    EnrichedJob {
        technologies: scan_vocabulary(&description_lower, TECH_VOCABULARY),
        seniority: detect_seniority(&job.title),
        skills_required: scan_vocabulary(&description_lower, SKILL_VOCABULARY),
        difficulty_score: difficulty_score(&description_lower),
        normalized_company: normalize_company_name(&job.employer_name),
        match_score: None,
        job,
    }
}

/// Case-insensitive substring scan; hits come back in vocabulary order.
fn scan_vocabulary(text_lower: &str, vocabulary: &[&str]) -> Vec<String> {
    vocabulary
        .iter()
        .filter(|token| text_lower.contains(&token.to_lowercase()))
        .map(|token| token.to_string())
        .collect()
}

/// Title keyword scan. Precedence: intern/junior, then staff/architect, then
/// senior/lead/principal, then Mid-level. Staff keywords are checked before
/// senior ones so a "Staff Engineer" title cannot be shadowed; "principal"
/// counts as senior only.
pub fn detect_seniority(title: &str) -> Seniority {
    let title_lower = title.to_lowercase();
    if title_lower.contains("intern") || title_lower.contains("junior") {
        Seniority::Junior
    } else if title_lower.contains("staff") || title_lower.contains("architect") {
        Seniority::StaffArchitect
    } else if title_lower.contains("senior")
        || title_lower.contains("lead")
        || title_lower.contains("principal")
    {
        Seniority::Senior
    } else {
        Seniority::MidLevel
    }
}

/// 0..=10 difficulty heuristic: +2 per advanced keyword, +0.5 per distinct
/// technology (capped at +5), +1 for "required", -0.5 for "nice to have".
pub fn difficulty_score(description_lower: &str) -> u8 {
    let mut score = 0.0_f64;

    for keyword in ADVANCED_KEYWORDS {
        if description_lower.contains(keyword) {
            score += 2.0;
        }
    }

    let tech_count = DIFFICULTY_TECH
        .iter()
        .filter(|tech| description_lower.contains(*tech))
        .count();
    score += (tech_count as f64 * 0.5).min(5.0);

    if description_lower.contains("required") {
        score += 1.0;
    }
    if description_lower.contains("nice to have") {
        score -= 0.5;
    }

    score.round().clamp(0.0, 10.0) as u8
}

/// Lower-cases an employer name and drops legal-entity suffix tokens, so
/// "Google", "Google Inc" and "Google LLC" normalize to the same value.
pub fn normalize_company_name(employer_name: &str) -> String {
    employer_name
        .to_lowercase()
        .split_whitespace()
        .map(|word| word.trim_end_matches('.'))
        .filter(|word| !LEGAL_SUFFIXES.contains(word))
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn job(title: &str, employer: &str, description: &str) -> CanonicalJob {
        CanonicalJob {
            id: "j1".to_string(),
            title: title.to_string(),
            employer_name: employer.to_string(),
            description: description.to_string(),
            city: None,
            state: None,
            country: None,
            job_type: None,
            salary_min: None,
            salary_max: None,
            posted_at: Utc::now(),
            apply_link: String::new(),
            quality_score: 70.0,
        }
    }

    #[test]
    fn test_technologies_preserve_vocabulary_order() {
        let enriched = enrich_job(job(
            "Engineer",
            "Acme",
            "We use TypeScript and React on AWS; GraphQL a plus.",
        ));
        assert_eq!(
            enriched.technologies,
            vec!["React", "TypeScript", "GraphQL", "AWS"]
        );
    }

    #[test]
    fn test_skills_tracked_separately_from_technologies() {
        let enriched = enrich_job(job("Engineer", "Acme", "System design and OOP required."));
        assert!(enriched
            .skills_required
            .iter()
            .any(|s| s == "System Design"));
        assert!(enriched.skills_required.iter().any(|s| s == "OOP"));
        assert!(!enriched.technologies.iter().any(|t| t == "System Design"));
    }

    #[test]
    fn test_junior_keywords_checked_first() {
        assert_eq!(detect_seniority("Junior Staff Engineer"), Seniority::Junior);
        assert_eq!(
            detect_seniority("Software Engineering Intern"),
            Seniority::Junior
        );
    }

    #[test]
    fn test_staff_engineer_is_staff_architect() {
        assert_eq!(detect_seniority("Staff Engineer"), Seniority::StaffArchitect);
        assert_eq!(
            detect_seniority("Solutions Architect"),
            Seniority::StaffArchitect
        );
        // Staff keywords outrank senior keywords by design.
        assert_eq!(
            detect_seniority("Senior Staff Engineer"),
            Seniority::StaffArchitect
        );
    }

    #[test]
    fn test_principal_is_senior() {
        assert_eq!(detect_seniority("Principal Engineer"), Seniority::Senior);
        assert_eq!(detect_seniority("Tech Lead"), Seniority::Senior);
        assert_eq!(detect_seniority("Senior React Developer"), Seniority::Senior);
    }

    #[test]
    fn test_default_seniority_is_mid_level() {
        assert_eq!(detect_seniority("Software Engineer"), Seniority::MidLevel);
    }

    #[test]
    fn test_difficulty_scores_advanced_keywords_and_breadth() {
        // distributed (+2) + microservices (+2), react/typescript/aws (+1.5),
        // required (+1) = 6.5 -> 7
        let score = difficulty_score(
            "distributed microservices with react, typescript and aws required",
        );
        assert_eq!(score, 7);
    }

    #[test]
    fn test_difficulty_nice_to_have_discount() {
        // react (+0.5), nice to have (-0.5) = 0
        assert_eq!(difficulty_score("react is nice to have"), 0);
    }

    #[test]
    fn test_difficulty_clamped_to_ten() {
        let dense = "microservices system design distributed scalability ml ai blockchain \
                     react vue angular node.js python java c++ c# typescript graphql rest \
                     sql mongodb aws docker required";
        assert_eq!(difficulty_score(dense), 10);
    }

    #[test]
    fn test_difficulty_never_negative() {
        assert_eq!(difficulty_score("nice to have"), 0);
    }

    #[test]
    fn test_normalize_company_strips_legal_suffixes() {
        assert_eq!(normalize_company_name("Google Inc"), "google");
        assert_eq!(normalize_company_name("Google LLC"), "google");
        assert_eq!(normalize_company_name("Acme Corp."), "acme");
        assert_eq!(normalize_company_name("Siemens GmbH"), "siemens");
    }

    #[test]
    fn test_normalize_company_keeps_core_words() {
        assert_eq!(
            normalize_company_name("Cloud Infrastructure Co"),
            "cloud infrastructure"
        );
        assert_eq!(normalize_company_name("Scale AI"), "scale");
    }

    #[test]
    fn test_normalize_company_empty_input() {
        assert_eq!(normalize_company_name(""), "");
    }
}
