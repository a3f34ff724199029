//! Candidate synthesis, AI match scoring, and skills-test simulation.
//!
//! The pipeline per candidate is a strict one-way derivation: requisition →
//! synthesized profile → match report → (if eligible) test result → composite
//! decision score, persisted as a single atomic chain. The batch orchestrator
//! drives that pipeline across a catalog of requisitions.

pub mod catalog;
pub mod domain;
pub mod evaluation;
pub mod orchestrator;
pub mod report;
pub mod repository;
pub mod service;
pub mod synthesis;

#[cfg(test)]
mod tests;

pub use catalog::{
    validate_requirement, CatalogError, CatalogWarning, ExperienceRange, JobCatalog, JobId,
    JobRequirement, StaticJobCatalog, WeightVector,
};
pub use domain::{
    CandidateProfile, ExperienceLevel, MatchReport, QualityTier, ScreeningStatus, SkillLevel,
    SkillPerformance, TestResult,
};
pub use evaluation::{
    composite_score, evaluate_candidate, is_eligible, score_candidate, simulate_test,
    ScreeningEvaluation,
};
pub use orchestrator::{BatchConfig, BatchOrchestrator, BatchOutcome, JobBatchStats, TierMix};
pub use report::{BatchReportSummary, BatchTotalsEntry, JobReportEntry};
pub use repository::{
    AnalysisRecord, ApplicationId, ApplicationRecord, CandidateChain, CandidateId,
    CandidateRecord, CandidateStore, DecisionRecord, Disposition, MemoryCandidateStore,
    StoreError, TestRecord,
};
pub use service::{CandidateOutcome, PipelineError, ScreeningPipeline};
pub use synthesis::{synthesize_profile, EmailRegistry};
