mod composite;
mod scoring;
mod simulation;

pub use composite::composite_score;
pub use scoring::score_candidate;
pub use simulation::simulate_test;

pub(crate) use scoring::{education_matches, experience_fit};
pub(crate) use simulation::correctness_band;

use fastrand::Rng;
use serde::{Deserialize, Serialize};

use super::catalog::JobRequirement;
use super::domain::{CandidateProfile, MatchReport, ScreeningStatus, TestResult};

/// Eligibility gate: a candidate only sits the simulated test when their AI
/// score reaches the requisition's threshold.
pub fn is_eligible(ai_score: f64, threshold: f64) -> bool {
    ai_score >= threshold
}

/// Full evaluation trail for one candidate. Test and composite fields stay
/// `None` for ineligible candidates by contract, not omission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreeningEvaluation {
    pub report: MatchReport,
    pub eligible: bool,
    pub test: Option<TestResult>,
    pub composite_score: Option<f64>,
}

impl ScreeningEvaluation {
    pub fn status(&self) -> ScreeningStatus {
        if self.eligible {
            ScreeningStatus::TestCompleted
        } else {
            ScreeningStatus::NotEligible
        }
    }
}

/// Run the scoring → gate → simulation → composite chain for a synthesized
/// candidate.
pub fn evaluate_candidate(
    candidate: &CandidateProfile,
    job: &JobRequirement,
    rng: &mut Rng,
) -> ScreeningEvaluation {
    let report = score_candidate(candidate, job);
    let eligible = is_eligible(report.ai_score, job.eligibility_threshold);

    let (test, composite) = if eligible {
        let test = simulate_test(
            report.ai_score,
            &report.matched_skills,
            &report.missing_skills,
            rng,
        );
        let composite = composite_score(report.ai_score, test.test_score, candidate.experience_level);
        (Some(test), Some(composite))
    } else {
        (None, None)
    };

    ScreeningEvaluation {
        report,
        eligible,
        test,
        composite_score: composite,
    }
}

pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
