//! Shared fixtures for the screening test modules.

use chrono::{DateTime, TimeZone, Utc};
use fastrand::Rng;

use crate::workflows::screening::catalog::{
    ExperienceRange, JobId, JobRequirement, WeightVector,
};
use crate::workflows::screening::domain::{CandidateProfile, ExperienceLevel};
use crate::workflows::screening::repository::{
    AnalysisRecord, ApplicationId, ApplicationRecord, CandidateId, CandidateRecord, CandidateStore,
    DecisionRecord, MemoryCandidateStore, StoreError, TestRecord,
};

pub fn rng(seed: u64) -> Rng {
    Rng::with_seed(seed)
}

pub fn run_instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 8, 1, 12, 0, 0).unwrap()
}

pub fn requirement(skills: &[&str]) -> JobRequirement {
    JobRequirement {
        id: JobId("1".to_string()),
        title: "Incident Response Analyst".to_string(),
        required_skills: skills.iter().map(|s| s.to_string()).collect(),
        required_certifications: Vec::new(),
        education: "Bachelor's degree in Cybersecurity, Computer Science".to_string(),
        experience_range: ExperienceRange { min: 2, max: 5 },
        weights: WeightVector {
            skills: 0.40,
            knowledge: 0.30,
            tasks: 0.20,
            certifications: 0.05,
            education: 0.05,
        },
        eligibility_threshold: 60.0,
    }
}

pub fn candidate(skills: &[&str], experience_years: u32, education: &str) -> CandidateProfile {
    CandidateProfile {
        name: "Jordan Vance".to_string(),
        email: "jordan.vance@example.com".to_string(),
        phone: "+1-555-300-1234".to_string(),
        experience_years,
        experience_level: ExperienceLevel::from_years(experience_years),
        education: education.to_string(),
        skills: skills.iter().map(|s| s.to_string()).collect(),
        certifications: Vec::new(),
        job_id: JobId("1".to_string()),
    }
}

/// Store double that rejects every analysis insert, leaving the pipeline with
/// a partially written chain to roll back.
#[derive(Debug, Default)]
pub struct AnalysisRejectingStore {
    pub inner: MemoryCandidateStore,
}

impl CandidateStore for AnalysisRejectingStore {
    fn insert_candidate(&self, record: CandidateRecord) -> Result<CandidateId, StoreError> {
        self.inner.insert_candidate(record)
    }

    fn insert_application(&self, record: ApplicationRecord) -> Result<ApplicationId, StoreError> {
        self.inner.insert_application(record)
    }

    fn insert_analysis(&self, _record: AnalysisRecord) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("analysis table offline".to_string()))
    }

    fn insert_test(&self, record: TestRecord) -> Result<(), StoreError> {
        self.inner.insert_test(record)
    }

    fn insert_decision(&self, record: DecisionRecord) -> Result<(), StoreError> {
        self.inner.insert_decision(record)
    }

    fn rollback_candidate(&self, id: CandidateId) -> Result<(), StoreError> {
        self.inner.rollback_candidate(id)
    }
}
