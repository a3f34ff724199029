use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::catalog::JobId;
use super::domain::{ExperienceLevel, ScreeningStatus, SkillPerformance};

/// Identifier assigned by the store to a persisted candidate.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct CandidateId(pub u64);

/// Identifier assigned by the store to a persisted application.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct ApplicationId(pub u64);

/// Identity row for a synthesized candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// Application row linking a candidate to a requisition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationRecord {
    pub candidate_id: CandidateId,
    pub job_id: JobId,
    pub status: ScreeningStatus,
    pub applied_at: DateTime<Utc>,
}

/// AI analysis row carrying the match score and its derived fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub application_id: ApplicationId,
    pub ai_score: f64,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub experience_years: u32,
    pub experience_level: ExperienceLevel,
    pub education: String,
    pub certifications: Vec<String>,
}

/// Test row persisted only for eligible candidates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestRecord {
    pub application_id: ApplicationId,
    pub test_score: f64,
    pub skill_performance: BTreeMap<String, SkillPerformance>,
    pub completed_at: DateTime<Utc>,
}

/// Default disposition written with each decision row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Disposition {
    Hold,
}

impl Disposition {
    pub const fn label(self) -> &'static str {
        match self {
            Disposition::Hold => "hold",
        }
    }
}

/// Decision row persisted only when a test result exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionRecord {
    pub application_id: ApplicationId,
    pub composite_score: f64,
    pub disposition: Disposition,
    pub decided_at: DateTime<Utc>,
}

/// Error enumeration for store failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record already exists")]
    Conflict,
    #[error("parent record not found")]
    NotFound,
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Append-only sink for candidate derivation chains. The engine writes
/// candidate → application → analysis → (test → decision) and never reads
/// back; `rollback_candidate` exists so a partially written chain can be
/// undone when a later insert fails.
pub trait CandidateStore: Send + Sync {
    fn insert_candidate(&self, record: CandidateRecord) -> Result<CandidateId, StoreError>;
    fn insert_application(&self, record: ApplicationRecord) -> Result<ApplicationId, StoreError>;
    fn insert_analysis(&self, record: AnalysisRecord) -> Result<(), StoreError>;
    fn insert_test(&self, record: TestRecord) -> Result<(), StoreError>;
    fn insert_decision(&self, record: DecisionRecord) -> Result<(), StoreError>;
    fn rollback_candidate(&self, id: CandidateId) -> Result<(), StoreError>;
}

/// One fully persisted derivation chain, exposed for the read side (reports
/// and exports). The engine itself never consumes these.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateChain {
    pub candidate_id: CandidateId,
    pub candidate: CandidateRecord,
    pub application_id: ApplicationId,
    pub application: ApplicationRecord,
    pub analysis: Option<AnalysisRecord>,
    pub test: Option<TestRecord>,
    pub decision: Option<DecisionRecord>,
}

#[derive(Debug, Default)]
struct MemoryStoreInner {
    next_candidate: u64,
    next_application: u64,
    candidates: BTreeMap<CandidateId, CandidateRecord>,
    applications: BTreeMap<ApplicationId, ApplicationRecord>,
    analyses: BTreeMap<ApplicationId, AnalysisRecord>,
    tests: BTreeMap<ApplicationId, TestRecord>,
    decisions: BTreeMap<ApplicationId, DecisionRecord>,
}

/// In-process store used by the CLI and tests. Monotonic ids, Mutex-guarded
/// so parallel job streams could share it.
#[derive(Debug, Default)]
pub struct MemoryCandidateStore {
    inner: Mutex<MemoryStoreInner>,
}

impl MemoryCandidateStore {
    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryStoreInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of all persisted chains, ordered by candidate id.
    pub fn chains(&self) -> Vec<CandidateChain> {
        let inner = self.lock();
        inner
            .applications
            .iter()
            .filter_map(|(application_id, application)| {
                let candidate = inner.candidates.get(&application.candidate_id)?;
                Some(CandidateChain {
                    candidate_id: application.candidate_id,
                    candidate: candidate.clone(),
                    application_id: *application_id,
                    application: application.clone(),
                    analysis: inner.analyses.get(application_id).cloned(),
                    test: inner.tests.get(application_id).cloned(),
                    decision: inner.decisions.get(application_id).cloned(),
                })
            })
            .collect()
    }

    pub fn candidate_count(&self) -> usize {
        self.lock().candidates.len()
    }
}

impl CandidateStore for MemoryCandidateStore {
    fn insert_candidate(&self, record: CandidateRecord) -> Result<CandidateId, StoreError> {
        let mut inner = self.lock();
        if inner
            .candidates
            .values()
            .any(|existing| existing.email == record.email)
        {
            return Err(StoreError::Conflict);
        }

        inner.next_candidate += 1;
        let id = CandidateId(inner.next_candidate);
        inner.candidates.insert(id, record);
        Ok(id)
    }

    fn insert_application(&self, record: ApplicationRecord) -> Result<ApplicationId, StoreError> {
        let mut inner = self.lock();
        if !inner.candidates.contains_key(&record.candidate_id) {
            return Err(StoreError::NotFound);
        }

        inner.next_application += 1;
        let id = ApplicationId(inner.next_application);
        inner.applications.insert(id, record);
        Ok(id)
    }

    fn insert_analysis(&self, record: AnalysisRecord) -> Result<(), StoreError> {
        let mut inner = self.lock();
        if !inner.applications.contains_key(&record.application_id) {
            return Err(StoreError::NotFound);
        }
        if inner.analyses.contains_key(&record.application_id) {
            return Err(StoreError::Conflict);
        }
        inner.analyses.insert(record.application_id, record);
        Ok(())
    }

    fn insert_test(&self, record: TestRecord) -> Result<(), StoreError> {
        let mut inner = self.lock();
        if !inner.applications.contains_key(&record.application_id) {
            return Err(StoreError::NotFound);
        }
        if inner.tests.contains_key(&record.application_id) {
            return Err(StoreError::Conflict);
        }
        inner.tests.insert(record.application_id, record);
        Ok(())
    }

    fn insert_decision(&self, record: DecisionRecord) -> Result<(), StoreError> {
        let mut inner = self.lock();
        if !inner.applications.contains_key(&record.application_id) {
            return Err(StoreError::NotFound);
        }
        if inner.decisions.contains_key(&record.application_id) {
            return Err(StoreError::Conflict);
        }
        inner.decisions.insert(record.application_id, record);
        Ok(())
    }

    fn rollback_candidate(&self, id: CandidateId) -> Result<(), StoreError> {
        let mut inner = self.lock();
        inner.candidates.remove(&id);

        let application_ids: Vec<ApplicationId> = inner
            .applications
            .iter()
            .filter(|(_, application)| application.candidate_id == id)
            .map(|(application_id, _)| *application_id)
            .collect();

        for application_id in application_ids {
            inner.applications.remove(&application_id);
            inner.analyses.remove(&application_id);
            inner.tests.remove(&application_id);
            inner.decisions.remove(&application_id);
        }

        Ok(())
    }
}
