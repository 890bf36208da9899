//! Fixed fallback dataset, returned when every provider comes back empty so
//! the UI always has content to render. Posting ages are relative to fetch
//! time, mirroring what a live feed would return.

use chrono::{DateTime, Duration, Utc};

use crate::models::job::CanonicalJob;

struct SamplePosting {
    id: &'static str,
    title: &'static str,
    employer: &'static str,
    description: &'static str,
    city: &'static str,
    state: &'static str,
    job_type: &'static str,
    salary_min: f64,
    salary_max: f64,
    posted_days_ago: i64,
    apply_link: &'static str,
    quality_score: f64,
}

const SAMPLES: &[SamplePosting] = &[
    SamplePosting {
        id: "mock-google-1",
        title: "Senior Software Engineer - Frontend",
        employer: "Google Inc",
        description: "Google is hiring Senior Software Engineers with expertise in React, \
                      TypeScript, and modern web technologies. Work on products used by \
                      billions. Competitive salary and benefits.",
        city: "Mountain View",
        state: "CA",
        job_type: "Hybrid",
        salary_min: 200_000.0,
        salary_max: 300_000.0,
        posted_days_ago: 0,
        apply_link: "https://careers.google.com",
        quality_score: 98.0,
    },
    SamplePosting {
        id: "mock-netflix-1",
        title: "Full Stack Engineer",
        employer: "Netflix Inc",
        description: "Netflix is looking for talented full-stack engineers to build amazing \
                      entertainment experiences. Experience with React, Node.js, AWS, and \
                      microservices a plus.",
        city: "Los Gatos",
        state: "CA",
        job_type: "Hybrid",
        salary_min: 180_000.0,
        salary_max: 280_000.0,
        posted_days_ago: 1,
        apply_link: "https://jobs.netflix.com",
        quality_score: 96.0,
    },
    SamplePosting {
        id: "mock-1",
        title: "Senior React Developer",
        employer: "Tech Company A",
        description: "Looking for a senior React developer with 5+ years of experience. Must \
                      know TypeScript, GraphQL, AWS, and system design.",
        city: "San Francisco",
        state: "CA",
        job_type: "Remote",
        salary_min: 150_000.0,
        salary_max: 200_000.0,
        posted_days_ago: 2,
        apply_link: "",
        quality_score: 95.0,
    },
    SamplePosting {
        id: "mock-2",
        title: "Full Stack Developer (Node.js + React)",
        employer: "StartUp Inc",
        description: "Join our team as a Full Stack Developer. Experience with Node.js, React, \
                      PostgreSQL, Docker, and Kubernetes required.",
        city: "New York",
        state: "NY",
        job_type: "Hybrid",
        salary_min: 120_000.0,
        salary_max: 160_000.0,
        posted_days_ago: 3,
        apply_link: "",
        quality_score: 88.0,
    },
    SamplePosting {
        id: "mock-3",
        title: "Python Backend Engineer",
        employer: "DataTech Solutions",
        description: "Seeking a Python backend engineer with expertise in FastAPI, \
                      microservices, and distributed systems.",
        city: "Remote",
        state: "Remote",
        job_type: "Remote",
        salary_min: 130_000.0,
        salary_max: 180_000.0,
        posted_days_ago: 2,
        apply_link: "",
        quality_score: 92.0,
    },
    SamplePosting {
        id: "mock-4",
        title: "Frontend Engineer - Vue.js",
        employer: "Design Studio",
        description: "We are looking for a frontend engineer with Vue.js experience. \
                      TypeScript, Tailwind CSS, and responsive design skills required.",
        city: "Austin",
        state: "TX",
        job_type: "On-site",
        salary_min: 100_000.0,
        salary_max: 140_000.0,
        posted_days_ago: 3,
        apply_link: "",
        quality_score: 85.0,
    },
    SamplePosting {
        id: "mock-5",
        title: "DevOps Engineer",
        employer: "Cloud Infrastructure Co",
        description: "Experienced DevOps engineer needed. Must have AWS, Docker, Kubernetes, \
                      and CI/CD pipeline experience.",
        city: "Seattle",
        state: "WA",
        job_type: "Hybrid",
        salary_min: 140_000.0,
        salary_max: 190_000.0,
        posted_days_ago: 4,
        apply_link: "",
        quality_score: 90.0,
    },
];

/// Builds the sample dataset with posting dates anchored at `fetched_at`.
pub fn sample_jobs(fetched_at: DateTime<Utc>) -> Vec<CanonicalJob> {
    SAMPLES
        .iter()
        .map(|sample| CanonicalJob {
            id: sample.id.to_string(),
            title: sample.title.to_string(),
            employer_name: sample.employer.to_string(),
            description: sample.description.to_string(),
            city: Some(sample.city.to_string()),
            state: Some(sample.state.to_string()),
            country: Some("USA".to_string()),
            job_type: Some(sample.job_type.to_string()),
            salary_min: Some(sample.salary_min),
            salary_max: Some(sample.salary_max),
            posted_at: fetched_at - Duration::days(sample.posted_days_ago),
            apply_link: sample.apply_link.to_string(),
            quality_score: sample.quality_score,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_jobs_are_identifiable() {
        // Every sample must survive deduplication: non-empty id at minimum.
        for job in sample_jobs(Utc::now()) {
            assert!(!job.id.is_empty());
            assert!(!job.title.is_empty());
            assert!(!job.employer_name.is_empty());
        }
    }

    #[test]
    fn test_sample_posting_ages_are_relative() {
        let anchor = Utc::now();
        let jobs = sample_jobs(anchor);
        assert_eq!(jobs[0].posted_at, anchor);
        assert_eq!(jobs[1].posted_at, anchor - Duration::days(1));
    }
}
