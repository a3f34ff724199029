use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Utc};
use fastrand::Rng;

use super::catalog::JobRequirement;
use super::domain::{CandidateProfile, ExperienceLevel, QualityTier};

const FIRST_NAMES: &[&str] = &[
    "Sarah", "Michael", "Jennifer", "David", "Emily", "James", "Jessica", "Robert", "Ashley",
    "William", "Amanda", "Christopher", "Melissa", "Matthew", "Michelle", "Daniel", "Kimberly",
    "Joseph", "Lisa", "Andrew", "Angela", "Ryan", "Heather", "Brandon", "Nicole", "Jason", "Amy",
    "Justin", "Rebecca", "Kevin", "Laura", "Brian", "Stephanie", "Eric", "Rachel", "Steven",
    "Lauren", "Thomas", "Hannah", "Mark", "Samantha", "Paul", "Elizabeth", "John", "Maria",
    "Richard", "Susan",
];

const LAST_NAMES: &[&str] = &[
    "Johnson", "Williams", "Brown", "Davis", "Miller", "Wilson", "Moore", "Taylor", "Anderson",
    "Thomas", "Jackson", "White", "Harris", "Martin", "Thompson", "Garcia", "Martinez", "Robinson",
    "Clark", "Rodriguez", "Lewis", "Lee", "Walker", "Hall", "Allen", "Young", "King", "Wright",
    "Lopez", "Hill", "Scott", "Green", "Adams", "Baker", "Nelson", "Carter", "Mitchell", "Perez",
    "Roberts", "Turner", "Phillips", "Campbell", "Parker", "Evans", "Edwards", "Collins",
    "Stewart", "Morris", "Rogers",
];

pub(crate) const EMAIL_DOMAINS: &[&str] = &[
    "gmail.com",
    "outlook.com",
    "yahoo.com",
    "protonmail.com",
    "icloud.com",
    "hotmail.com",
];

/// General tooling skills any applicant might list alongside the requisition's
/// required set.
const BACKGROUND_SKILLS: &[&str] = &[
    "Python",
    "PowerShell",
    "Bash",
    "SIEM",
    "Splunk",
    "AWS",
    "Azure",
    "Docker",
    "Kubernetes",
    "Git",
    "Linux",
    "Windows Server",
    "TCP/IP",
    "Wireshark",
    "Nmap",
    "Burp Suite",
];

const EDUCATION_OPTIONS: &[&str] = &[
    "Bachelor's degree in Cybersecurity",
    "Bachelor's degree in Computer Science",
    "Bachelor's degree in Information Technology",
    "Master's degree in Cybersecurity",
    "Master's degree in Information Security",
    "Associate's degree in Cybersecurity",
];

const STANDARD_FORMAT_ATTEMPTS: u32 = 20;
const MAX_EMAIL_ATTEMPTS: u32 = 100;

/// Run-scoped registry guaranteeing no two synthesized candidates share an
/// email. Claims are check-and-insert under one lock so parallel job streams
/// cannot race an allocation.
#[derive(Debug, Default)]
pub struct EmailRegistry {
    claimed: Mutex<HashSet<String>>,
}

impl EmailRegistry {
    /// Returns true when the email was free and is now claimed.
    pub fn try_claim(&self, email: &str) -> bool {
        self.claimed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(email.to_string())
    }

    pub fn len(&self) -> usize {
        self.claimed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Build a plausible candidate for `job` at the requested quality tier. Pure
/// generation: all randomness comes from `rng` and all time from `now`, so a
/// seeded run is fully reproducible.
pub fn synthesize_profile(
    job: &JobRequirement,
    tier: QualityTier,
    registry: &EmailRegistry,
    rng: &mut Rng,
    now: DateTime<Utc>,
) -> CandidateProfile {
    let name = format!(
        "{} {}",
        FIRST_NAMES[rng.usize(0..FIRST_NAMES.len())],
        LAST_NAMES[rng.usize(0..LAST_NAMES.len())]
    );
    let email = unique_email(&name, registry, rng, now);
    let phone = format!(
        "+1-{}-{}-{}",
        rng.u32(200..=999),
        rng.u32(200..=999),
        rng.u32(1000..=9999)
    );

    let experience_years = draw_experience(job, tier, rng);
    let education = EDUCATION_OPTIONS[rng.usize(0..EDUCATION_OPTIONS.len())].to_string();
    let skills = draw_skills(job, tier, rng);
    let certifications = draw_certifications(job, tier, rng);

    CandidateProfile {
        name,
        email,
        phone,
        experience_years,
        experience_level: ExperienceLevel::from_years(experience_years),
        education,
        skills,
        certifications,
        job_id: job.id.clone(),
    }
}

fn draw_experience(job: &JobRequirement, tier: QualityTier, rng: &mut Rng) -> u32 {
    let min = job.experience_range.min;
    let max = job.experience_range.max.max(min);

    if tier.experience_in_range() {
        rng.u32(min..=max)
    } else if rng.bool() {
        // Under-qualified draw for the lower tiers.
        rng.u32(min.saturating_sub(2)..=min)
    } else {
        // Over-qualified draw.
        rng.u32(min..=max + 2)
    }
}

fn draw_skills(job: &JobRequirement, tier: QualityTier, rng: &mut Rng) -> Vec<String> {
    let required = &job.required_skills;
    let mut skills: Vec<String> = if required.is_empty() {
        Vec::new()
    } else {
        let (low, high) = tier.skill_match_range();
        let fraction = uniform_in(low, high, rng);
        let count = ((required.len() as f64) * fraction).round() as usize;
        let count = count.clamp(1, required.len());
        sample(required, count, rng)
    };

    let extra = rng.usize(1..=3);
    for skill in sample_strs(BACKGROUND_SKILLS, extra, rng) {
        if !skills.contains(&skill) {
            skills.push(skill);
        }
    }

    skills
}

fn draw_certifications(job: &JobRequirement, tier: QualityTier, rng: &mut Rng) -> Vec<String> {
    let required = &job.required_certifications;
    if required.is_empty() {
        return Vec::new();
    }

    let (low, high) = tier.certification_match_range();
    let fraction = uniform_in(low, high, rng);
    let mut count = ((required.len() as f64) * fraction).floor() as usize;
    if tier == QualityTier::Excellent {
        count = count.max(1);
    }
    let count = count.min(required.len());

    if count == 0 {
        return Vec::new();
    }
    sample(required, count, rng)
}

pub(crate) fn unique_email(
    name: &str,
    registry: &EmailRegistry,
    rng: &mut Rng,
    now: DateTime<Utc>,
) -> String {
    let mut parts = name.split_whitespace();
    let first = parts.next().unwrap_or("candidate").to_lowercase();
    let last = parts.next().unwrap_or("applicant").to_lowercase();
    let domain = EMAIL_DOMAINS[rng.usize(0..EMAIL_DOMAINS.len())];

    let initial = first.chars().next().unwrap_or('c');

    for attempt in 0..MAX_EMAIL_ATTEMPTS {
        let candidate = if attempt < STANDARD_FORMAT_ATTEMPTS {
            match rng.usize(0..3) {
                0 => format!("{first}.{last}@{domain}"),
                1 => format!("{first}{last}@{domain}"),
                _ => format!("{initial}{last}@{domain}"),
            }
        } else {
            format!("{first}.{last}{}@{domain}", rng.u32(1..=9999))
        };

        if registry.try_claim(&candidate) {
            return candidate;
        }
    }

    // Exhausted the bounded attempts; a timestamp suffix cannot collide with
    // the generated formats, and the disambiguator handles repeat fallbacks.
    let stamp = now.timestamp_micros();
    let mut disambiguator = 0u32;
    loop {
        let candidate = if disambiguator == 0 {
            format!("{first}.{last}.{stamp}@{domain}")
        } else {
            format!("{first}.{last}.{stamp}.{disambiguator}@{domain}")
        };
        if registry.try_claim(&candidate) {
            return candidate;
        }
        disambiguator += 1;
    }
}

fn uniform_in(low: f64, high: f64, rng: &mut Rng) -> f64 {
    low + (high - low) * rng.f64()
}

fn sample(pool: &[String], count: usize, rng: &mut Rng) -> Vec<String> {
    let mut shuffled = pool.to_vec();
    rng.shuffle(&mut shuffled);
    shuffled.truncate(count);
    shuffled
}

fn sample_strs(pool: &[&str], count: usize, rng: &mut Rng) -> Vec<String> {
    let mut shuffled: Vec<String> = pool.iter().map(|s| s.to_string()).collect();
    rng.shuffle(&mut shuffled);
    shuffled.truncate(count.min(shuffled.len()));
    shuffled
}
