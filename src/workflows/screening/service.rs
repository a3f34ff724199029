use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use fastrand::Rng;
use tracing::warn;

use super::catalog::{JobId, JobRequirement};
use super::domain::{CandidateProfile, QualityTier, ScreeningStatus};
use super::evaluation::{evaluate_candidate, ScreeningEvaluation};
use super::repository::{
    AnalysisRecord, ApplicationId, ApplicationRecord, CandidateId, CandidateRecord, CandidateStore,
    DecisionRecord, Disposition, StoreError, TestRecord,
};
use super::synthesis::{synthesize_profile, EmailRegistry};

/// Error raised when a candidate's derivation chain cannot be persisted.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("candidate chain for job {} failed to persist: {source}", job_id.0)]
    Store { job_id: JobId, source: StoreError },
}

/// Everything derived for a single candidate pass, returned to the
/// orchestrator for aggregation after the chain has been persisted.
#[derive(Debug, Clone)]
pub struct CandidateOutcome {
    pub candidate_id: CandidateId,
    pub application_id: ApplicationId,
    pub profile: CandidateProfile,
    pub evaluation: ScreeningEvaluation,
    pub status: ScreeningStatus,
    pub applied_at: DateTime<Utc>,
    pub test_completed_at: Option<DateTime<Utc>>,
}

/// Per-candidate pipeline: synthesize → score → gate → simulate → composite,
/// then persist the whole chain as one atomic unit against the store.
pub struct ScreeningPipeline<S> {
    store: Arc<S>,
}

impl<S> ScreeningPipeline<S>
where
    S: CandidateStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Generate and persist one candidate for `job`. On a store failure the
    /// partially written chain is rolled back before the error is returned,
    /// so the store never retains a dangling candidate.
    pub fn screen_candidate(
        &self,
        job: &JobRequirement,
        tier: QualityTier,
        registry: &EmailRegistry,
        rng: &mut Rng,
        posted_at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<CandidateOutcome, PipelineError> {
        let profile = synthesize_profile(job, tier, registry, rng, now);
        let evaluation = evaluate_candidate(&profile, job, rng);
        let status = evaluation.status();

        let applied_at = application_timestamp(posted_at, now, rng);
        let test_completed_at = evaluation
            .test
            .as_ref()
            .map(|_| applied_at + Duration::hours(rng.i64(2..=6)));

        let candidate_id = self
            .store
            .insert_candidate(CandidateRecord {
                name: profile.name.clone(),
                email: profile.email.clone(),
                phone: profile.phone.clone(),
            })
            .map_err(|source| PipelineError::Store {
                job_id: job.id.clone(),
                source,
            })?;

        let application_id = match self.persist_chain(
            candidate_id,
            job,
            &profile,
            &evaluation,
            status,
            applied_at,
            test_completed_at,
        ) {
            Ok(application_id) => application_id,
            Err(source) => {
                if let Err(rollback_err) = self.store.rollback_candidate(candidate_id) {
                    warn!(
                        candidate_id = candidate_id.0,
                        error = %rollback_err,
                        "rollback after failed chain persist also failed"
                    );
                }
                return Err(PipelineError::Store {
                    job_id: job.id.clone(),
                    source,
                });
            }
        };

        Ok(CandidateOutcome {
            candidate_id,
            application_id,
            profile,
            evaluation,
            status,
            applied_at,
            test_completed_at,
        })
    }

    #[allow(clippy::too_many_arguments)]
    fn persist_chain(
        &self,
        candidate_id: CandidateId,
        job: &JobRequirement,
        profile: &CandidateProfile,
        evaluation: &ScreeningEvaluation,
        status: ScreeningStatus,
        applied_at: DateTime<Utc>,
        test_completed_at: Option<DateTime<Utc>>,
    ) -> Result<ApplicationId, StoreError> {
        let application_id = self.store.insert_application(ApplicationRecord {
            candidate_id,
            job_id: job.id.clone(),
            status,
            applied_at,
        })?;

        self.store.insert_analysis(AnalysisRecord {
            application_id,
            ai_score: evaluation.report.ai_score,
            matched_skills: evaluation.report.matched_skills.clone(),
            missing_skills: evaluation.report.missing_skills.clone(),
            experience_years: profile.experience_years,
            experience_level: profile.experience_level,
            education: profile.education.clone(),
            certifications: profile.certifications.clone(),
        })?;

        if let (Some(test), Some(composite), Some(completed_at)) = (
            evaluation.test.as_ref(),
            evaluation.composite_score,
            test_completed_at,
        ) {
            self.store.insert_test(TestRecord {
                application_id,
                test_score: test.test_score,
                skill_performance: test.skill_performance.clone(),
                completed_at,
            })?;

            self.store.insert_decision(DecisionRecord {
                application_id,
                composite_score: composite,
                disposition: Disposition::Hold,
                decided_at: completed_at,
            })?;
        }

        Ok(application_id)
    }
}

/// Posting date for a requisition: 30 to 60 days before the run, mixing
/// older and newer listings.
pub(crate) fn posted_timestamp(now: DateTime<Utc>, rng: &mut Rng) -> DateTime<Utc> {
    now - Duration::days(rng.i64(30..=60))
}

/// Application timestamp after the posting date. Roughly 40% land in the
/// first week, 30% in weeks two and three, 30% late, always during business
/// hours.
pub(crate) fn application_timestamp(
    posted_at: DateTime<Utc>,
    now: DateTime<Utc>,
    rng: &mut Rng,
) -> DateTime<Utc> {
    let days_since_posted = (now - posted_at).num_days().max(1);

    let roll = rng.f64();
    let days_after = if roll < 0.40 {
        rng.i64(1..=days_since_posted.min(7))
    } else if roll < 0.70 {
        let high = days_since_posted.min(21);
        rng.i64(high.min(8)..=high)
    } else {
        let low = (days_since_posted - 7).max(22).min(days_since_posted);
        rng.i64(low..=days_since_posted)
    };

    let date = (posted_at + Duration::days(days_after)).date_naive();
    let time = chrono::NaiveTime::from_hms_opt(rng.u32(8..=18), rng.u32(0..=59), 0)
        .unwrap_or(chrono::NaiveTime::MIN);
    date.and_time(time).and_utc()
}
