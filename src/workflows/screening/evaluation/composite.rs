use super::super::domain::ExperienceLevel;
use super::round1;

/// Blend the AI match score and the simulated test score into the final
/// decision score. Junior hiring leans on demonstrated test performance,
/// senior hiring leans on experience-derived match.
pub fn composite_score(ai_score: f64, test_score: f64, level: ExperienceLevel) -> f64 {
    let (ai_weight, test_weight) = match level {
        ExperienceLevel::Entry => (0.4, 0.6),
        ExperienceLevel::Mid => (0.5, 0.5),
        ExperienceLevel::Senior => (0.6, 0.4),
    };

    round1(ai_score * ai_weight + test_score * test_weight)
}
