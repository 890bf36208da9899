use crate::models::profile::UserProfile;

/// Derives the free-text provider query from a profile.
///
/// Uses at most the first 5 skills — focused queries outperform long skill
/// lists against free-text search backends. Falls back to the target role,
/// then to an empty string, which callers must treat as an unconstrained
/// search.
pub fn build_search_query(profile: &UserProfile) -> String {
    if !profile.skills.is_empty() {
        return profile
            .skills
            .iter()
            .take(5)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ");
    }
    match profile.target_role.as_deref() {
        Some(role) if !role.trim().is_empty() => role.trim().to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skills_take_precedence_over_target_role() {
        let profile = UserProfile {
            target_role: Some("Staff Engineer".to_string()),
            skills: vec!["React", "TypeScript", "GraphQL", "AWS", "Docker", "Kubernetes"]
                .into_iter()
                .map(String::from)
                .collect(),
            ..Default::default()
        };
        assert_eq!(
            build_search_query(&profile),
            "React TypeScript GraphQL AWS Docker"
        );
    }

    #[test]
    fn test_target_role_used_when_skills_empty() {
        let profile = UserProfile {
            target_role: Some("  Staff Engineer  ".to_string()),
            ..Default::default()
        };
        assert_eq!(build_search_query(&profile), "Staff Engineer");
    }

    #[test]
    fn test_empty_profile_yields_empty_query() {
        assert_eq!(build_search_query(&UserProfile::default()), "");
    }

    #[test]
    fn test_blank_target_role_yields_empty_query() {
        let profile = UserProfile {
            target_role: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(build_search_query(&profile), "");
    }
}
