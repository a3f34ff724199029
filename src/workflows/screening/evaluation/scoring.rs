use super::super::catalog::{ExperienceRange, JobRequirement};
use super::super::domain::{CandidateProfile, MatchReport};
use super::round1;

/// Compute the weighted five-factor AI match score for a candidate against a
/// requisition, along with the matched/missing skill split reused downstream.
///
/// The weighted sum is reported raw (one decimal, never clamped) so that a
/// requisition with misconfigured weights produces a visibly out-of-range
/// score instead of a silently corrected one.
pub fn score_candidate(candidate: &CandidateProfile, job: &JobRequirement) -> MatchReport {
    let required = &job.required_skills;
    let matched_skills: Vec<String> = candidate
        .skills
        .iter()
        .filter(|skill| required.contains(skill))
        .cloned()
        .collect();
    let missing_skills: Vec<String> = required
        .iter()
        .filter(|skill| !candidate.skills.contains(skill))
        .cloned()
        .collect();

    let skill_fraction = matched_skills.len() as f64 / required.len().max(1) as f64;
    let knowledge_fraction = experience_fit(candidate.experience_years, &job.experience_range);
    let cert_fraction = certification_fraction(candidate, job);
    let task_fraction = task_capability(skill_fraction, knowledge_fraction, cert_fraction);
    let education_fraction = if education_matches(&candidate.education, &job.education) {
        1.0
    } else {
        0.5
    };

    let weights = &job.weights;
    let ai_score = skill_fraction * 100.0 * weights.skills
        + knowledge_fraction * 100.0 * weights.knowledge
        + task_fraction * 100.0 * weights.tasks
        + cert_fraction * 100.0 * weights.certifications
        + education_fraction * 100.0 * weights.education;

    MatchReport {
        ai_score: round1(ai_score),
        matched_skills,
        missing_skills,
    }
}

/// Experience fit in [0,1]. Under-qualification is penalized twice as steeply
/// as over-qualification (0.15 vs 0.10 per year, floored at 0.5 vs 0.7).
pub(crate) fn experience_fit(years: u32, range: &ExperienceRange) -> f64 {
    if years >= range.min && years <= range.max {
        1.0
    } else if years < range.min {
        let shortfall = (range.min - years) as f64;
        (1.0 - shortfall * 0.15).max(0.5)
    } else {
        let surplus = (years - range.max) as f64;
        (1.0 - surplus * 0.10).max(0.7)
    }
}

fn certification_fraction(candidate: &CandidateProfile, job: &JobRequirement) -> f64 {
    if job.required_certifications.is_empty() {
        // Neutral credit when the requisition asks for none.
        0.5
    } else {
        candidate.certifications.len() as f64 / job.required_certifications.len() as f64
    }
}

/// Estimate of the candidate's ability to perform the role's day-to-day tasks:
/// skills 50%, experience 30%, certifications 20%.
fn task_capability(skill_fraction: f64, knowledge_fraction: f64, cert_fraction: f64) -> f64 {
    skill_fraction * 0.5 + knowledge_fraction * 0.3 + cert_fraction * 0.2
}

const FIELD_KEYWORDS: &[&str] = &[
    "cybersecurity",
    "computer science",
    "information",
    "technology",
    "security",
];

/// Keyword comparison of education texts. A shared degree level or a shared
/// field keyword counts as a match; an associate requirement also accepts a
/// bachelor's degree.
pub(crate) fn education_matches(candidate_education: &str, job_education: &str) -> bool {
    let candidate = candidate_education.to_lowercase();
    let job = job_education.to_lowercase();

    if job.contains("bachelor") && candidate.contains("bachelor") {
        return true;
    }
    if job.contains("master") && candidate.contains("master") {
        return true;
    }
    if job.contains("associate") && (candidate.contains("associate") || candidate.contains("bachelor"))
    {
        return true;
    }

    FIELD_KEYWORDS
        .iter()
        .any(|field| job.contains(field) && candidate.contains(field))
}
