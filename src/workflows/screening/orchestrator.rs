use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use fastrand::Rng;
use tracing::{info, warn};

use super::catalog::{validate_requirement, JobId, JobRequirement};
use super::domain::QualityTier;
use super::repository::CandidateStore;
use super::service::{posted_timestamp, CandidateOutcome, ScreeningPipeline};
use super::synthesis::EmailRegistry;

/// Target distribution of quality tiers across a batch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierMix {
    pub excellent: f64,
    pub good: f64,
    pub average: f64,
    pub poor: f64,
}

impl Default for TierMix {
    fn default() -> Self {
        Self {
            excellent: 0.25,
            good: 0.50,
            average: 0.20,
            poor: 0.05,
        }
    }
}

impl TierMix {
    /// Weighted draw of a tier. Weights need not sum to 1.0; zero-total
    /// mixes fall back to `Good`.
    pub fn sample(&self, rng: &mut Rng) -> QualityTier {
        let total = self.excellent + self.good + self.average + self.poor;
        if total <= 0.0 {
            return QualityTier::Good;
        }

        let mut roll = rng.f64() * total;
        for (tier, weight) in [
            (QualityTier::Excellent, self.excellent),
            (QualityTier::Good, self.good),
            (QualityTier::Average, self.average),
            (QualityTier::Poor, self.poor),
        ] {
            if roll < weight {
                return tier;
            }
            roll -= weight;
        }

        QualityTier::Poor
    }
}

/// Batch-wide generation settings. Roles draw uneven applicant volumes in
/// practice, so `per_job_counts` can raise or lower individual requisitions
/// above the uniform `candidates_per_job` baseline.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    pub candidates_per_job: usize,
    pub per_job_counts: BTreeMap<JobId, usize>,
    pub tier_mix: TierMix,
    pub seed: Option<u64>,
}

impl BatchConfig {
    pub fn count_for(&self, job_id: &JobId) -> usize {
        self.per_job_counts
            .get(job_id)
            .copied()
            .unwrap_or(self.candidates_per_job)
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            candidates_per_job: 25,
            per_job_counts: BTreeMap::new(),
            tier_mix: TierMix::default(),
            seed: None,
        }
    }
}

/// Aggregated counters for one requisition's candidate stream.
#[derive(Debug, Clone, PartialEq)]
pub struct JobBatchStats {
    pub job_id: JobId,
    pub title: String,
    pub generated: usize,
    pub eligible: usize,
    pub failed: usize,
    pub mean_ai_score: Option<f64>,
    pub mean_test_score: Option<f64>,
    pub mean_composite_score: Option<f64>,
}

impl JobBatchStats {
    pub fn eligibility_rate(&self) -> f64 {
        if self.generated == 0 {
            0.0
        } else {
            self.eligible as f64 / self.generated as f64
        }
    }
}

/// Batch-wide counters across all requisitions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchTotals {
    pub generated: usize,
    pub eligible: usize,
    pub failed: usize,
    pub mean_ai_score: Option<f64>,
    pub mean_test_score: Option<f64>,
    pub mean_composite_score: Option<f64>,
}

impl BatchTotals {
    pub fn eligibility_rate(&self) -> f64 {
        if self.generated == 0 {
            0.0
        } else {
            self.eligible as f64 / self.generated as f64
        }
    }
}

/// Outcome of a full batch run.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchOutcome {
    pub jobs: Vec<JobBatchStats>,
    pub totals: BatchTotals,
}

#[derive(Debug, Default)]
struct ScoreAccumulator {
    generated: usize,
    eligible: usize,
    failed: usize,
    ai_sum: f64,
    test_sum: f64,
    composite_sum: f64,
}

impl ScoreAccumulator {
    fn record(&mut self, outcome: &CandidateOutcome) {
        self.generated += 1;
        self.ai_sum += outcome.evaluation.report.ai_score;

        if let (Some(test), Some(composite)) = (
            outcome.evaluation.test.as_ref(),
            outcome.evaluation.composite_score,
        ) {
            self.eligible += 1;
            self.test_sum += test.test_score;
            self.composite_sum += composite;
        }
    }

    fn absorb(&mut self, other: &ScoreAccumulator) {
        self.generated += other.generated;
        self.eligible += other.eligible;
        self.failed += other.failed;
        self.ai_sum += other.ai_sum;
        self.test_sum += other.test_sum;
        self.composite_sum += other.composite_sum;
    }

    fn mean_ai(&self) -> Option<f64> {
        (self.generated > 0).then(|| self.ai_sum / self.generated as f64)
    }

    fn mean_test(&self) -> Option<f64> {
        (self.eligible > 0).then(|| self.test_sum / self.eligible as f64)
    }

    fn mean_composite(&self) -> Option<f64> {
        (self.eligible > 0).then(|| self.composite_sum / self.eligible as f64)
    }
}

/// Drives the per-candidate pipeline across every requisition in a batch.
/// Holds no scoring logic: tier assignment and aggregation only.
pub struct BatchOrchestrator<S> {
    pipeline: ScreeningPipeline<S>,
}

impl<S> BatchOrchestrator<S>
where
    S: CandidateStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self {
            pipeline: ScreeningPipeline::new(store),
        }
    }

    pub fn run(
        &self,
        jobs: &[JobRequirement],
        config: &BatchConfig,
        now: DateTime<Utc>,
    ) -> BatchOutcome {
        let mut tier_rng = match config.seed {
            Some(seed) => Rng::with_seed(seed),
            None => Rng::new(),
        };
        // Separate stream for synthesis and scoring so tier assignment draws
        // never shift the candidate stream.
        let mut candidate_rng = tier_rng.fork();

        let registry = EmailRegistry::default();
        let mut job_stats = Vec::with_capacity(jobs.len());
        let mut totals = ScoreAccumulator::default();

        for job in jobs {
            for warning in validate_requirement(job) {
                warn!(job_id = %job.id.0, "{warning}");
            }

            let posted_at = posted_timestamp(now, &mut candidate_rng);
            let mut accumulator = ScoreAccumulator::default();

            for candidate_index in 0..config.count_for(&job.id) {
                let tier = config.tier_mix.sample(&mut tier_rng);
                match self.pipeline.screen_candidate(
                    job,
                    tier,
                    &registry,
                    &mut candidate_rng,
                    posted_at,
                    now,
                ) {
                    Ok(outcome) => accumulator.record(&outcome),
                    Err(error) => {
                        warn!(
                            job_id = %job.id.0,
                            candidate_index,
                            error = %error,
                            "skipping candidate after persistence failure"
                        );
                        accumulator.failed += 1;
                    }
                }
            }

            totals.absorb(&accumulator);

            let stats = JobBatchStats {
                job_id: job.id.clone(),
                title: job.title.clone(),
                generated: accumulator.generated,
                eligible: accumulator.eligible,
                failed: accumulator.failed,
                mean_ai_score: accumulator.mean_ai(),
                mean_test_score: accumulator.mean_test(),
                mean_composite_score: accumulator.mean_composite(),
            };

            info!(
                job_id = %job.id.0,
                title = %job.title,
                generated = stats.generated,
                eligible = stats.eligible,
                failed = stats.failed,
                "job batch complete"
            );

            job_stats.push(stats);
        }

        BatchOutcome {
            jobs: job_stats,
            totals: BatchTotals {
                generated: totals.generated,
                eligible: totals.eligible,
                failed: totals.failed,
                mean_ai_score: totals.mean_ai(),
                mean_test_score: totals.mean_test(),
                mean_composite_score: totals.mean_composite(),
            },
        }
    }
}
