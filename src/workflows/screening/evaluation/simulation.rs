use std::collections::BTreeMap;

use fastrand::Rng;

use super::super::domain::{SkillLevel, SkillPerformance, TestResult};
use super::round1;

const QUESTIONS_PER_SKILL: u8 = 2;
const SCORE_VARIATION: f64 = 15.0;
const MIN_TEST_SCORE: f64 = 40.0;
const MAX_TEST_SCORE: f64 = 95.0;
const MAX_PROBED_MISSING_SKILLS: usize = 2;

/// Simulate a skills test for an eligible candidate.
///
/// The test score tracks the AI score with ±15 points of noise, clamped to
/// [40, 95]. Each matched skill is answered at a correctness rate drawn from
/// a band keyed on the unrounded test score; up to two skills the candidate
/// never claimed are probed as well and always come back at zero.
///
/// Deterministic for a given `rng` seed.
pub fn simulate_test(
    ai_score: f64,
    matched_skills: &[String],
    missing_skills: &[String],
    rng: &mut Rng,
) -> TestResult {
    let variation = -SCORE_VARIATION + 2.0 * SCORE_VARIATION * rng.f64();
    let raw_score = (ai_score + variation).clamp(MIN_TEST_SCORE, MAX_TEST_SCORE);
    let test_score = round1(raw_score);

    let mut skill_performance = BTreeMap::new();

    for skill in matched_skills {
        let (low, high) = correctness_band(raw_score);
        let rate = low + (high - low) * rng.f64();
        let correct = ((QUESTIONS_PER_SKILL as f64) * rate).floor() as u8;
        let percentage =
            ((correct as f64 / QUESTIONS_PER_SKILL as f64) * 100.0).round() as u8;

        skill_performance.insert(
            skill.clone(),
            SkillPerformance {
                correct,
                total: QUESTIONS_PER_SKILL,
                percentage,
                level: SkillLevel::from_percentage(percentage),
            },
        );
    }

    let mut probed = missing_skills.to_vec();
    rng.shuffle(&mut probed);
    for skill in probed.into_iter().take(MAX_PROBED_MISSING_SKILLS) {
        skill_performance.insert(
            skill,
            SkillPerformance {
                correct: 0,
                total: QUESTIONS_PER_SKILL,
                percentage: 0,
                level: SkillLevel::Weak,
            },
        );
    }

    TestResult {
        test_score,
        skill_performance,
    }
}

pub(crate) fn correctness_band(test_score: f64) -> (f64, f64) {
    if test_score >= 80.0 {
        (0.70, 1.0)
    } else if test_score >= 65.0 {
        (0.50, 0.85)
    } else {
        (0.40, 0.70)
    }
}
