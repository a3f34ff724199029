use std::collections::HashSet;

use super::common::{candidate, requirement, rng};
use crate::workflows::screening::catalog::{ExperienceRange, WeightVector};
use crate::workflows::screening::domain::{ExperienceLevel, QualityTier, ScreeningStatus, SkillLevel};
use crate::workflows::screening::evaluation::{
    composite_score, education_matches, evaluate_candidate, experience_fit, is_eligible,
    score_candidate,
};
use crate::workflows::screening::synthesis::{synthesize_profile, EmailRegistry};

#[test]
fn matched_and_missing_partition_required_skills() {
    let job = requirement(&["A", "B", "C", "D"]);
    let profile = candidate(&["A", "C", "Splunk"], 3, "Bachelor's degree in Cybersecurity");

    let report = score_candidate(&profile, &job);

    let matched: HashSet<&str> = report.matched_skills.iter().map(String::as_str).collect();
    let missing: HashSet<&str> = report.missing_skills.iter().map(String::as_str).collect();
    assert!(matched.is_disjoint(&missing));

    let mut union: Vec<&str> = matched.union(&missing).copied().collect();
    union.sort_unstable();
    assert_eq!(union, vec!["A", "B", "C", "D"]);
}

#[test]
fn weighted_score_matches_hand_computation() {
    // skill 0.5*40 + knowledge 1.0*30 + task (0.25+0.3+0.1)*20 + cert 0.5*5
    // + education 1.0*5 = 20 + 30 + 13 + 2.5 + 5
    let job = requirement(&["A", "B", "C", "D"]);
    let profile = candidate(&["A", "B", "E"], 3, "Bachelor's degree in Cybersecurity");

    let report = score_candidate(&profile, &job);
    assert_eq!(report.ai_score, 70.5);
    assert_eq!(report.matched_skills, vec!["A".to_string(), "B".to_string()]);
    assert_eq!(
        report.missing_skills,
        vec!["C".to_string(), "D".to_string()]
    );
}

#[test]
fn score_stays_in_range_for_normalized_weights() {
    let registry = EmailRegistry::default();
    let mut rng = rng(11);
    let now = super::common::run_instant();

    for _ in 0..100 {
        let mut job = requirement(&["A", "B", "C", "D", "E", "F", "G", "H", "I", "J"]);
        job.weights = random_normalized_weights(&mut rng);
        assert!(job.weights.is_normalized());

        for tier in QualityTier::ordered() {
            let profile = synthesize_profile(&job, tier, &registry, &mut rng, now);
            let report = score_candidate(&profile, &job);
            assert!(
                (0.0..=100.0).contains(&report.ai_score),
                "score {} out of range for tier {} under weights {:?}",
                report.ai_score,
                tier.label(),
                job.weights
            );
        }
    }
}

fn random_normalized_weights(rng: &mut fastrand::Rng) -> WeightVector {
    let raw = [
        rng.f64() + 0.01,
        rng.f64() + 0.01,
        rng.f64() + 0.01,
        rng.f64() + 0.01,
        rng.f64() + 0.01,
    ];
    let total: f64 = raw.iter().sum();
    WeightVector {
        skills: raw[0] / total,
        knowledge: raw[1] / total,
        tasks: raw[2] / total,
        certifications: raw[3] / total,
        education: raw[4] / total,
    }
}

#[test]
fn more_matched_skills_never_lowers_the_score() {
    let job = requirement(&["A", "B", "C", "D"]);
    let weaker = candidate(&["A"], 3, "Bachelor's degree in Cybersecurity");
    let stronger = candidate(&["A", "B", "C"], 3, "Bachelor's degree in Cybersecurity");

    let weaker_report = score_candidate(&weaker, &job);
    let stronger_report = score_candidate(&stronger, &job);
    assert!(stronger_report.ai_score > weaker_report.ai_score);
}

#[test]
fn more_certifications_never_lower_the_score() {
    let mut job = requirement(&["A", "B"]);
    job.required_certifications = vec![
        "CompTIA Security+".to_string(),
        "CompTIA CySA+".to_string(),
    ];

    let without = candidate(&["A"], 3, "Bachelor's degree in Cybersecurity");
    let mut with = without.clone();
    with.certifications = vec!["CompTIA Security+".to_string()];

    assert!(score_candidate(&with, &job).ai_score > score_candidate(&without, &job).ai_score);
}

#[test]
fn better_experience_fit_never_lowers_the_score() {
    let job = requirement(&["A", "B"]);
    let short = candidate(&["A"], 0, "Bachelor's degree in Cybersecurity");
    let fit = candidate(&["A"], 3, "Bachelor's degree in Cybersecurity");

    assert!(score_candidate(&fit, &job).ai_score > score_candidate(&short, &job).ai_score);
}

#[test]
fn experience_fit_penalizes_shortfall_harder_than_surplus() {
    let range = ExperienceRange { min: 4, max: 6 };

    assert_eq!(experience_fit(4, &range), 1.0);
    assert_eq!(experience_fit(6, &range), 1.0);
    assert_eq!(experience_fit(3, &range), 0.85);
    assert_eq!(experience_fit(7, &range), 0.9);
    // Both slopes bottom out at their floors.
    assert_eq!(experience_fit(0, &range), 0.5);
    assert_eq!(experience_fit(20, &range), 0.7);
}

#[test]
fn education_field_keyword_matches_across_degree_levels() {
    assert!(education_matches(
        "Master's degree in Cybersecurity",
        "Bachelor's degree in Cybersecurity, Computer Science"
    ));
    assert!(education_matches(
        "Bachelor's degree in Computer Science",
        "Bachelor's degree in Cybersecurity, Computer Science"
    ));
    // Associate requirements accept a bachelor's degree.
    assert!(education_matches(
        "Bachelor's degree in Information Technology",
        "Associate's or Bachelor's degree in Cybersecurity, Information Systems"
    ));
    assert!(!education_matches(
        "Associate's degree in Business Administration",
        "Bachelor's degree in Cybersecurity, Computer Science"
    ));
}

#[test]
fn eligibility_threshold_is_inclusive() {
    assert!(is_eligible(60.0, 60.0));
    assert!(is_eligible(60.1, 60.0));
    assert!(!is_eligible(59.9, 60.0));
}

#[test]
fn composite_weighting_shifts_with_seniority() {
    assert_eq!(composite_score(80.0, 60.0, ExperienceLevel::Entry), 68.0);
    assert_eq!(composite_score(80.0, 60.0, ExperienceLevel::Mid), 70.0);
    assert_eq!(composite_score(80.0, 60.0, ExperienceLevel::Senior), 72.0);
}

#[test]
fn skill_level_band_boundaries() {
    assert_eq!(SkillLevel::from_percentage(80), SkillLevel::Strong);
    assert_eq!(SkillLevel::from_percentage(79), SkillLevel::Moderate);
    assert_eq!(SkillLevel::from_percentage(50), SkillLevel::Moderate);
    assert_eq!(SkillLevel::from_percentage(49), SkillLevel::Weak);
    assert_eq!(SkillLevel::from_percentage(0), SkillLevel::Weak);
}

#[test]
fn experience_level_band_boundaries() {
    assert_eq!(ExperienceLevel::from_years(0), ExperienceLevel::Entry);
    assert_eq!(ExperienceLevel::from_years(2), ExperienceLevel::Entry);
    assert_eq!(ExperienceLevel::from_years(3), ExperienceLevel::Mid);
    assert_eq!(ExperienceLevel::from_years(7), ExperienceLevel::Mid);
    assert_eq!(ExperienceLevel::from_years(8), ExperienceLevel::Senior);
}

#[test]
fn ineligible_candidate_gets_no_test_and_no_composite() {
    let mut job = requirement(&["A", "B", "C", "D"]);
    job.required_certifications = vec!["CompTIA Security+".to_string()];
    let profile = candidate(&[], 0, "Associate's degree in Business Administration");

    let evaluation = evaluate_candidate(&profile, &job, &mut rng(3));

    assert!(!evaluation.eligible);
    assert!(evaluation.test.is_none());
    assert!(evaluation.composite_score.is_none());
    assert_eq!(evaluation.status(), ScreeningStatus::NotEligible);
}

#[test]
fn eligible_candidate_gets_test_and_composite() {
    let job = requirement(&["A", "B"]);
    let profile = candidate(&["A", "B"], 3, "Bachelor's degree in Cybersecurity");

    let evaluation = evaluate_candidate(&profile, &job, &mut rng(3));

    assert!(evaluation.eligible);
    let test = evaluation.test.as_ref().expect("eligible candidate sits the test");
    let composite = evaluation
        .composite_score
        .expect("test result yields a composite");
    assert_eq!(
        composite,
        composite_score(
            evaluation.report.ai_score,
            test.test_score,
            profile.experience_level
        )
    );
    assert_eq!(evaluation.status(), ScreeningStatus::TestCompleted);
}
