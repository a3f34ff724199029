use std::collections::HashSet;

use super::common::{requirement, rng, run_instant};
use crate::workflows::screening::domain::{ExperienceLevel, QualityTier};
use crate::workflows::screening::synthesis::{
    synthesize_profile, unique_email, EmailRegistry, EMAIL_DOMAINS,
};

const TEN_SKILLS: [&str; 10] = ["A", "B", "C", "D", "E", "F", "G", "H", "I", "J"];

#[test]
fn emails_are_unique_across_a_large_batch() {
    let job = requirement(&TEN_SKILLS);
    let registry = EmailRegistry::default();
    let mut rng = rng(1);
    let now = run_instant();

    let mut seen = HashSet::new();
    for _ in 0..2000 {
        let profile = synthesize_profile(&job, QualityTier::Good, &registry, &mut rng, now);
        assert!(seen.insert(profile.email.clone()), "duplicate email {}", profile.email);
    }
    assert_eq!(registry.len(), 2000);
}

#[test]
fn exhausted_email_formats_fall_back_to_a_timestamp_suffix() {
    let registry = EmailRegistry::default();
    let now = run_instant();

    // Claim every generated format for the name up front: the three standard
    // shapes plus the full numbered-suffix space, on every domain.
    for domain in EMAIL_DOMAINS {
        assert!(registry.try_claim(&format!("casey.stone@{domain}")));
        assert!(registry.try_claim(&format!("caseystone@{domain}")));
        assert!(registry.try_claim(&format!("cstone@{domain}")));
        for number in 1..=9999u32 {
            registry.try_claim(&format!("casey.stone{number}@{domain}"));
        }
    }

    let stamp = now.timestamp_micros();
    let email = unique_email("Casey Stone", &registry, &mut rng(41), now);
    assert!(
        email.starts_with(&format!("casey.stone.{stamp}@")),
        "expected timestamp fallback, got {email}"
    );

    // A repeat exhaustion at the same instant disambiguates instead of
    // looping forever.
    for domain in EMAIL_DOMAINS {
        registry.try_claim(&format!("casey.stone.{stamp}@{domain}"));
    }
    let second = unique_email("Casey Stone", &registry, &mut rng(42), now);
    assert!(
        second.starts_with(&format!("casey.stone.{stamp}.")),
        "expected disambiguated fallback, got {second}"
    );
    assert_ne!(second, email);
}

#[test]
fn registry_claims_are_first_come_only() {
    let registry = EmailRegistry::default();
    assert!(registry.is_empty());
    assert!(registry.try_claim("sarah.johnson@gmail.com"));
    assert!(!registry.try_claim("sarah.johnson@gmail.com"));
    assert_eq!(registry.len(), 1);
}

#[test]
fn excellent_tier_claims_most_required_skills() {
    let job = requirement(&TEN_SKILLS);
    let registry = EmailRegistry::default();
    let mut rng = rng(21);
    let now = run_instant();

    for _ in 0..100 {
        let profile = synthesize_profile(&job, QualityTier::Excellent, &registry, &mut rng, now);
        let matched = profile
            .skills
            .iter()
            .filter(|skill| job.required_skills.contains(skill))
            .count();
        // round(10 * f) with f in [0.80, 0.90]
        assert!((8..=9).contains(&matched), "matched {matched}");
    }
}

#[test]
fn poor_tier_claims_a_minority_of_required_skills() {
    let job = requirement(&TEN_SKILLS);
    let registry = EmailRegistry::default();
    let mut rng = rng(22);
    let now = run_instant();

    for _ in 0..100 {
        let profile = synthesize_profile(&job, QualityTier::Poor, &registry, &mut rng, now);
        let matched = profile
            .skills
            .iter()
            .filter(|skill| job.required_skills.contains(skill))
            .count();
        // round(10 * f) with f in [0.40, 0.55]
        assert!((4..=6).contains(&matched), "matched {matched}");
    }
}

#[test]
fn profiles_carry_background_skills_beyond_the_requisition() {
    let job = requirement(&TEN_SKILLS);
    let registry = EmailRegistry::default();
    let mut rng = rng(23);
    let profile = synthesize_profile(&job, QualityTier::Good, &registry, &mut rng, run_instant());

    let extras = profile
        .skills
        .iter()
        .filter(|skill| !job.required_skills.contains(skill))
        .count();
    assert!((1..=3).contains(&extras), "extras {extras}");
}

#[test]
fn strong_tiers_stay_inside_the_experience_range() {
    let job = requirement(&TEN_SKILLS);
    let registry = EmailRegistry::default();
    let mut rng = rng(24);
    let now = run_instant();

    for tier in [QualityTier::Excellent, QualityTier::Good] {
        for _ in 0..100 {
            let profile = synthesize_profile(&job, tier, &registry, &mut rng, now);
            assert!(
                profile.experience_years >= job.experience_range.min
                    && profile.experience_years <= job.experience_range.max
            );
        }
    }
}

#[test]
fn weak_tiers_can_land_outside_the_experience_range() {
    let job = requirement(&TEN_SKILLS);
    let registry = EmailRegistry::default();
    let mut rng = rng(25);
    let now = run_instant();

    let mut outside = 0;
    for _ in 0..200 {
        let profile = synthesize_profile(&job, QualityTier::Average, &registry, &mut rng, now);
        // Widened band only: [min - 2, max + 2] clamped at zero.
        assert!(profile.experience_years <= job.experience_range.max + 2);
        if profile.experience_years < job.experience_range.min
            || profile.experience_years > job.experience_range.max
        {
            outside += 1;
        }
    }
    assert!(outside > 0, "average tier never left the range in 200 draws");
}

#[test]
fn excellent_tier_always_holds_a_certification_when_required() {
    let mut job = requirement(&TEN_SKILLS);
    job.required_certifications = vec![
        "CompTIA Security+".to_string(),
        "CompTIA CySA+".to_string(),
        "GIAC Certified Incident Handler (GCIH)".to_string(),
        "EC-Council Certified Incident Handler (ECIH)".to_string(),
        "GIAC Forensic Analyst (GCFA)".to_string(),
    ];
    let registry = EmailRegistry::default();
    let mut rng = rng(26);
    let now = run_instant();

    for _ in 0..100 {
        let profile = synthesize_profile(&job, QualityTier::Excellent, &registry, &mut rng, now);
        assert!(!profile.certifications.is_empty());
        assert!(profile.certifications.len() <= job.required_certifications.len());
        for certification in &profile.certifications {
            assert!(job.required_certifications.contains(certification));
        }
    }
}

#[test]
fn no_required_certifications_means_no_claimed_certifications() {
    let job = requirement(&TEN_SKILLS);
    let registry = EmailRegistry::default();
    let mut rng = rng(27);
    let profile =
        synthesize_profile(&job, QualityTier::Excellent, &registry, &mut rng, run_instant());
    assert!(profile.certifications.is_empty());
}

#[test]
fn derived_fields_are_internally_consistent() {
    let job = requirement(&TEN_SKILLS);
    let registry = EmailRegistry::default();
    let mut rng = rng(28);
    let now = run_instant();

    for tier in QualityTier::ordered() {
        let profile = synthesize_profile(&job, tier, &registry, &mut rng, now);
        assert_eq!(
            profile.experience_level,
            ExperienceLevel::from_years(profile.experience_years)
        );
        assert_eq!(profile.job_id, job.id);
        assert!(profile.email.contains('@'));
        assert!(profile.phone.starts_with("+1-"));
        assert!(!profile.education.is_empty());
    }
}
