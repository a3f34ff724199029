use serde::Serialize;

use super::orchestrator::{BatchOutcome, BatchTotals, JobBatchStats};

/// Per-requisition summary row for reports and API payloads.
#[derive(Debug, Clone, Serialize)]
pub struct JobReportEntry {
    pub job_id: String,
    pub title: String,
    pub generated: usize,
    pub eligible: usize,
    pub failed: usize,
    pub eligibility_rate_pct: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean_ai_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean_test_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean_composite_score: Option<f64>,
}

/// Batch-wide totals row.
#[derive(Debug, Clone, Serialize)]
pub struct BatchTotalsEntry {
    pub generated: usize,
    pub eligible: usize,
    pub failed: usize,
    pub eligibility_rate_pct: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean_ai_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean_test_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean_composite_score: Option<f64>,
}

/// Serializable projection of a batch run.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReportSummary {
    pub jobs: Vec<JobReportEntry>,
    pub totals: BatchTotalsEntry,
}

impl BatchOutcome {
    pub fn summary(&self) -> BatchReportSummary {
        BatchReportSummary {
            jobs: self.jobs.iter().map(JobBatchStats::to_entry).collect(),
            totals: self.totals.to_entry(),
        }
    }
}

impl JobBatchStats {
    fn to_entry(&self) -> JobReportEntry {
        JobReportEntry {
            job_id: self.job_id.0.clone(),
            title: self.title.clone(),
            generated: self.generated,
            eligible: self.eligible,
            failed: self.failed,
            eligibility_rate_pct: round1(self.eligibility_rate() * 100.0),
            mean_ai_score: self.mean_ai_score.map(round1),
            mean_test_score: self.mean_test_score.map(round1),
            mean_composite_score: self.mean_composite_score.map(round1),
        }
    }
}

impl BatchTotals {
    fn to_entry(&self) -> BatchTotalsEntry {
        BatchTotalsEntry {
            generated: self.generated,
            eligible: self.eligible,
            failed: self.failed,
            eligibility_rate_pct: round1(self.eligibility_rate() * 100.0),
            mean_ai_score: self.mean_ai_score.map(round1),
            mean_test_score: self.mean_test_score.map(round1),
            mean_composite_score: self.mean_composite_score.map(round1),
        }
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
