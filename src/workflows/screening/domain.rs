use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::catalog::JobId;

/// Synthesis-time quality label controlling how strong a generated candidate
/// looks against the requisition. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QualityTier {
    Excellent,
    Good,
    Average,
    Poor,
}

impl QualityTier {
    pub const fn label(self) -> &'static str {
        match self {
            QualityTier::Excellent => "excellent",
            QualityTier::Good => "good",
            QualityTier::Average => "average",
            QualityTier::Poor => "poor",
        }
    }

    /// Fraction of the requisition's required skills a candidate of this tier
    /// should carry, as an inclusive sampling range.
    pub const fn skill_match_range(self) -> (f64, f64) {
        match self {
            QualityTier::Excellent => (0.80, 0.90),
            QualityTier::Good => (0.65, 0.75),
            QualityTier::Average => (0.55, 0.65),
            QualityTier::Poor => (0.40, 0.55),
        }
    }

    /// Fraction of required certifications for this tier. Lower tiers may
    /// legitimately land on zero certifications.
    pub const fn certification_match_range(self) -> (f64, f64) {
        match self {
            QualityTier::Excellent => (0.40, 0.60),
            QualityTier::Good => (0.20, 0.40),
            QualityTier::Average => (0.10, 0.25),
            QualityTier::Poor => (0.00, 0.15),
        }
    }

    /// Tiers whose experience draw stays inside the requisition's range.
    pub const fn experience_in_range(self) -> bool {
        matches!(self, QualityTier::Excellent | QualityTier::Good)
    }

    pub const fn ordered() -> [QualityTier; 4] {
        [
            QualityTier::Excellent,
            QualityTier::Good,
            QualityTier::Average,
            QualityTier::Poor,
        ]
    }
}

/// Seniority band derived from years of experience.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceLevel {
    Entry,
    Mid,
    Senior,
}

impl ExperienceLevel {
    pub const fn from_years(years: u32) -> Self {
        if years <= 2 {
            ExperienceLevel::Entry
        } else if years <= 7 {
            ExperienceLevel::Mid
        } else {
            ExperienceLevel::Senior
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            ExperienceLevel::Entry => "entry",
            ExperienceLevel::Mid => "mid",
            ExperienceLevel::Senior => "senior",
        }
    }
}

/// Synthesized candidate identity and claimed qualifications, generated once
/// per pipeline pass against a single requisition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub experience_years: u32,
    pub experience_level: ExperienceLevel,
    pub education: String,
    pub skills: Vec<String>,
    pub certifications: Vec<String>,
    pub job_id: JobId,
}

/// Output of the match scorer: the weighted AI score plus the skill split it
/// was derived from. `matched` and `missing` partition the requisition's
/// required skills.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchReport {
    pub ai_score: f64,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
}

/// Per-skill verification classification derived from simulated test answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillLevel {
    Strong,
    Moderate,
    Weak,
}

impl SkillLevel {
    pub const fn from_percentage(percentage: u8) -> Self {
        if percentage >= 80 {
            SkillLevel::Strong
        } else if percentage >= 50 {
            SkillLevel::Moderate
        } else {
            SkillLevel::Weak
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            SkillLevel::Strong => "strong",
            SkillLevel::Moderate => "moderate",
            SkillLevel::Weak => "weak",
        }
    }
}

/// Answer tally for a single tested skill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillPerformance {
    pub correct: u8,
    pub total: u8,
    pub percentage: u8,
    pub level: SkillLevel,
}

/// Simulated skills-test outcome. Exists only for candidates that cleared the
/// eligibility threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    pub test_score: f64,
    pub skill_performance: BTreeMap<String, SkillPerformance>,
}

/// Terminal status of a candidate's screening pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScreeningStatus {
    TestCompleted,
    NotEligible,
}

impl ScreeningStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ScreeningStatus::TestCompleted => "test_completed",
            ScreeningStatus::NotEligible => "not_eligible",
        }
    }
}
