//! Read-side CSV projection of persisted screening chains. Purely a
//! reporting concern: the engine never consumes these rows.

use std::io::Write;
use std::path::Path;

use crate::workflows::screening::repository::CandidateChain;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write export row: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to flush export: {0}")]
    Io(#[from] std::io::Error),
}

const HEADERS: [&str; 16] = [
    "candidate_id",
    "name",
    "email",
    "phone",
    "job_id",
    "status",
    "applied_at",
    "ai_score",
    "matched_skills",
    "missing_skills",
    "experience_years",
    "experience_level",
    "education",
    "certifications",
    "test_score",
    "composite_score",
];

pub fn write_chains_csv<W: Write>(
    writer: W,
    chains: &[CandidateChain],
) -> Result<(), ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(HEADERS)?;

    for chain in chains {
        let (ai_score, matched, missing, years, level, education, certifications) =
            match &chain.analysis {
                Some(analysis) => (
                    format!("{:.1}", analysis.ai_score),
                    analysis.matched_skills.join("; "),
                    analysis.missing_skills.join("; "),
                    analysis.experience_years.to_string(),
                    analysis.experience_level.label().to_string(),
                    analysis.education.clone(),
                    analysis.certifications.join("; "),
                ),
                None => Default::default(),
            };

        let test_score = chain
            .test
            .as_ref()
            .map(|test| format!("{:.1}", test.test_score))
            .unwrap_or_default();
        let composite_score = chain
            .decision
            .as_ref()
            .map(|decision| format!("{:.1}", decision.composite_score))
            .unwrap_or_default();

        csv_writer.write_record([
            chain.candidate_id.0.to_string(),
            chain.candidate.name.clone(),
            chain.candidate.email.clone(),
            chain.candidate.phone.clone(),
            chain.application.job_id.0.clone(),
            chain.application.status.label().to_string(),
            chain.application.applied_at.to_rfc3339(),
            ai_score,
            matched,
            missing,
            years,
            level,
            education,
            certifications,
            test_score,
            composite_score,
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

pub fn write_chains_csv_path<P: AsRef<Path>>(
    path: P,
    chains: &[CandidateChain],
) -> Result<(), ExportError> {
    let file = std::fs::File::create(path)?;
    write_chains_csv(file, chains)
}
