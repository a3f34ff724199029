use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Identifier wrapper for job requisitions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct JobId(pub String);

/// Inclusive years-of-experience band a requisition targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceRange {
    pub min: u32,
    pub max: u32,
}

/// Per-requisition factor weights. Scorer output is only meaningful when the
/// five weights sum to 1.0; the catalog boundary warns on drift instead of
/// correcting it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightVector {
    pub skills: f64,
    pub knowledge: f64,
    pub tasks: f64,
    pub certifications: f64,
    pub education: f64,
}

const WEIGHT_SUM_TOLERANCE: f64 = 0.01;

impl WeightVector {
    pub fn sum(&self) -> f64 {
        self.skills + self.knowledge + self.tasks + self.certifications + self.education
    }

    pub fn is_normalized(&self) -> bool {
        (self.sum() - 1.0).abs() <= WEIGHT_SUM_TOLERANCE
    }
}

/// Immutable description of a role: what the requisition demands and how the
/// scorer should weight each factor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRequirement {
    pub id: JobId,
    pub title: String,
    pub required_skills: Vec<String>,
    pub required_certifications: Vec<String>,
    pub education: String,
    pub experience_range: ExperienceRange,
    pub weights: WeightVector,
    pub eligibility_threshold: f64,
}

/// Non-fatal findings raised while validating a requisition at the catalog
/// boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogWarning {
    UnnormalizedWeights { job_id: JobId, sum: f64 },
    NoRequiredSkills { job_id: JobId },
    InvertedExperienceRange { job_id: JobId, min: u32, max: u32 },
}

impl std::fmt::Display for CatalogWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogWarning::UnnormalizedWeights { job_id, sum } => write!(
                f,
                "job {}: factor weights sum to {sum:.3}, expected ~1.0",
                job_id.0
            ),
            CatalogWarning::NoRequiredSkills { job_id } => {
                write!(f, "job {}: no required skills listed", job_id.0)
            }
            CatalogWarning::InvertedExperienceRange { job_id, min, max } => write!(
                f,
                "job {}: experience range min {min} exceeds max {max}",
                job_id.0
            ),
        }
    }
}

/// Check a requisition for misconfiguration the scorer would otherwise hide.
pub fn validate_requirement(job: &JobRequirement) -> Vec<CatalogWarning> {
    let mut warnings = Vec::new();

    if !job.weights.is_normalized() {
        warnings.push(CatalogWarning::UnnormalizedWeights {
            job_id: job.id.clone(),
            sum: job.weights.sum(),
        });
    }

    if job.required_skills.is_empty() {
        warnings.push(CatalogWarning::NoRequiredSkills {
            job_id: job.id.clone(),
        });
    }

    if job.experience_range.min > job.experience_range.max {
        warnings.push(CatalogWarning::InvertedExperienceRange {
            job_id: job.id.clone(),
            min: job.experience_range.min,
            max: job.experience_range.max,
        });
    }

    warnings
}

/// Errors raised while loading requisitions from an external source.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),
    #[error("catalog file is not valid requisition JSON: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Source of job requisitions. Externally owned; the engine only consumes the
/// records it yields.
pub trait JobCatalog: Send + Sync {
    fn requirements(&self) -> Result<Vec<JobRequirement>, CatalogError>;
}

/// Catalog backed by an in-memory requisition list, either the built-in
/// standard roles or a deserialized JSON file.
#[derive(Debug, Clone)]
pub struct StaticJobCatalog {
    requirements: Vec<JobRequirement>,
}

impl StaticJobCatalog {
    pub fn new(requirements: Vec<JobRequirement>) -> Self {
        Self { requirements }
    }

    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let requirements: Vec<JobRequirement> = serde_json::from_reader(reader)?;
        Ok(Self { requirements })
    }

    pub fn from_json_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let file = File::open(path)?;
        Self::from_json_reader(file)
    }

    /// Built-in catalog of the twenty standard cybersecurity requisitions,
    /// used by the CLI when no catalog file is supplied.
    pub fn standard() -> Self {
        Self::new(standard_requirements())
    }
}

impl JobCatalog for StaticJobCatalog {
    fn requirements(&self) -> Result<Vec<JobRequirement>, CatalogError> {
        Ok(self.requirements.clone())
    }
}

fn role(
    id: &str,
    title: &str,
    skills: &[&str],
    certifications: &[&str],
    education: &str,
    experience: (u32, u32),
    weights: WeightVector,
    threshold: f64,
) -> JobRequirement {
    JobRequirement {
        id: JobId(id.to_string()),
        title: title.to_string(),
        required_skills: skills.iter().map(|s| s.to_string()).collect(),
        required_certifications: certifications.iter().map(|s| s.to_string()).collect(),
        education: education.to_string(),
        experience_range: ExperienceRange {
            min: experience.0,
            max: experience.1,
        },
        weights,
        eligibility_threshold: threshold,
    }
}

fn standard_requirements() -> Vec<JobRequirement> {
    let common_weights = WeightVector {
        skills: 0.40,
        knowledge: 0.30,
        tasks: 0.20,
        certifications: 0.05,
        education: 0.05,
    };

    vec![
        role(
            "1",
            "Incident Response Analyst",
            &[
                "Incident Response",
                "Digital evidence collection",
                "forensic processing",
                "malware analysis",
                "network traffic analysis",
                "log analysis",
                "vulnerability triage",
                "threat containment",
                "alert triage",
                "IOC detection",
            ],
            &[
                "CompTIA Security+",
                "EC-Council Certified Incident Handler (ECIH)",
                "GIAC Certified Incident Handler (GCIH)",
                "CompTIA CySA+",
                "GIAC Forensic Analyst (GCFA)",
            ],
            "Bachelor's degree in Cybersecurity, Computer Science, Information Security",
            (2, 5),
            WeightVector {
                skills: 0.35,
                knowledge: 0.25,
                tasks: 0.20,
                certifications: 0.10,
                education: 0.10,
            },
            60.0,
        ),
        role(
            "2",
            "Threat Analysis Analyst",
            &[
                "Threat analysis",
                "Threat hunting",
                "Network threat identification",
                "Data querying",
                "Metadata analysis",
                "Virtual machine operations",
                "Security reporting",
                "Threat intelligence",
                "Data collection",
            ],
            &[
                "CompTIA Security+",
                "EC-Council Certified Threat Intelligence Analyst (CTIA)",
                "GIAC Cyber Threat Intelligence (GCTI)",
                "CompTIA CySA+",
            ],
            "Bachelor's degree in Cybersecurity, Information Technology, Computer Science",
            (1, 3),
            common_weights,
            60.0,
        ),
        role(
            "3",
            "Defensive Cybersecurity Analyst",
            &[
                "Network defense",
                "Threat detection",
                "Traffic analysis",
                "Log analysis",
                "Vulnerability identification",
                "Security monitoring",
                "Anomaly detection",
                "Security tool evaluation",
            ],
            &[
                "CompTIA Security+",
                "CompTIA CySA+",
                "EC-Council Certified SOC Analyst (CSA)",
                "GIAC Certified Defense Analyst (GCDA)",
            ],
            "Bachelor's degree in Cybersecurity, Information Technology, Computer Science",
            (1, 3),
            WeightVector {
                skills: 0.45,
                knowledge: 0.30,
                tasks: 0.15,
                certifications: 0.05,
                education: 0.05,
            },
            60.0,
        ),
        role(
            "4",
            "Digital Forensics Investigator",
            &[
                "Digital Evidence Handling",
                "Evidence Collection",
                "Evidence Processing",
                "Memory Forensics",
                "File System Forensics",
                "Log Analysis",
                "Forensic Analysis",
                "Technical Reporting",
            ],
            &[
                "GIAC Certified Forensic Analyst (GCFA)",
                "GIAC Certified Forensic Examiner (GCFE)",
                "Certified Forensic Computer Examiner (CFCE)",
                "CompTIA CySA+",
                "EnCase Certified Examiner (EnCE)",
            ],
            "Bachelor's degree in Cybersecurity, Digital Forensics, IT, Computer Science",
            (3, 7),
            common_weights,
            65.0,
        ),
        role(
            "5",
            "Insider Threat Analyst",
            &[
                "threat analysis",
                "behavioral analysis",
                "data analysis",
                "log analysis",
                "pattern detection",
                "report writing",
                "insider threat investigation",
            ],
            &[
                "CompTIA Security+",
                "EC-Council Certified Threat Intelligence Analyst (CTIA)",
                "GIAC Cyber Threat Intelligence (GCTI)",
                "CompTIA CySA+",
            ],
            "Bachelor's in Cybersecurity, Computer Science, Information Systems, Psychology",
            (1, 4),
            common_weights,
            60.0,
        ),
        role(
            "6",
            "Vulnerability Analyst",
            &[
                "vulnerability scanning",
                "risk assessment",
                "network analysis",
                "application security",
                "threat identification",
                "security auditing",
                "policy compliance",
            ],
            &[
                "CompTIA Security+",
                "CompTIA CySA+",
                "EC-Council CEH (Certified Ethical Hacker)",
                "CompTIA PenTest+",
            ],
            "Bachelor's degree in Cybersecurity, Computer Science, Information Technology",
            (2, 5),
            common_weights,
            60.0,
        ),
        role(
            "7",
            "Cybersecurity Policy & Planning Analyst",
            &[
                "cybersecurity policy",
                "governance",
                "risk management",
                "compliance",
                "strategic planning",
                "policy development",
                "regulatory alignment",
            ],
            &[
                "ISACA CISM",
                "ISC2 CGRC",
                "ISO 27001 Lead Implementer or Lead Auditor",
                "IAPP CIPM",
                "Associate of ISC2",
            ],
            "Bachelor's degree in Information Security, IT Management, Business Administration",
            (2, 5),
            common_weights,
            60.0,
        ),
        role(
            "8",
            "Privacy Governance Analyst",
            &[
                "privacy compliance",
                "privacy impact assessment",
                "data governance",
                "regulatory compliance",
                "privacy policies",
                "PII protection",
                "privacy risk assessment",
            ],
            &[
                "IAPP CIPM (Certified Information Privacy Manager)",
                "IAPP CIPP/US or CIPP/E",
                "ISO 27701 Lead Implementer",
                "CompTIA Security+",
            ],
            "Bachelor's degree in Information Security, Privacy Management, Law",
            (2, 5),
            common_weights,
            60.0,
        ),
        role(
            "9",
            "Junior Security Control Assessor",
            &[
                "security controls",
                "RMF",
                "control assessment",
                "risk analysis",
                "evidence collection",
                "security authorization",
                "compliance review",
            ],
            &[
                "CompTIA Security+",
                "ISC2 Associate",
                "ISO 27001 Foundation",
                "CompTIA CySA+",
            ],
            "Associate's or Bachelor's degree in Cybersecurity, Information Systems",
            (0, 2),
            common_weights,
            60.0,
        ),
        role(
            "10",
            "Cybersecurity Architect",
            &[
                "security architecture",
                "secure design",
                "risk management",
                "defense in depth",
                "network segmentation",
                "system security engineering",
                "architecture analysis",
            ],
            &[
                "ISC2 CISSP",
                "ISACA CISM",
                "Cisco CCNP Security or CCSP",
                "AWS Solutions Architect - Security Specialty",
                "SABSA Foundation",
            ],
            "Bachelor's degree in Cybersecurity, Computer Science, Information Technology",
            (3, 6),
            common_weights,
            60.0,
        ),
        role(
            "11",
            "Secure Software Engineer",
            &[
                "secure coding",
                "software security",
                "input validation",
                "error handling",
                "static code analysis",
                "threat modeling",
                "secure SDLC",
            ],
            &[
                "GIAC GSSP",
                "CSSLP",
                "CompTIA PenTest+",
                "AWS or Microsoft Developer Certification",
            ],
            "Bachelor's in Computer Science, Software Engineering, Cybersecurity",
            (2, 5),
            common_weights,
            60.0,
        ),
        role(
            "12",
            "Secure Systems Engineer",
            &[
                "secure system design",
                "system hardening",
                "risk analysis",
                "vulnerability identification",
                "secure configuration",
                "system security testing",
                "secure SDLC",
            ],
            &[
                "CompTIA Security+",
                "CompTIA CySA+",
                "GIAC GSEC",
                "Microsoft or Linux systems engineering certifications",
            ],
            "Bachelor's degree in Information Technology, Cybersecurity, Systems Engineering",
            (2, 5),
            common_weights,
            60.0,
        ),
        role(
            "13",
            "Software Security Analyst",
            &[
                "application security",
                "secure code review",
                "static analysis",
                "threat modeling",
                "vulnerability analysis",
                "secure SDLC",
                "software risk assessment",
            ],
            &[
                "GIAC GWAPT or GSSP",
                "CompTIA PenTest+",
                "CSSLP",
                "Vendor secure development certifications",
            ],
            "Bachelor's in Computer Science, Software Engineering, Cybersecurity",
            (1, 4),
            common_weights,
            60.0,
        ),
        role(
            "14",
            "Systems Security Analyst",
            &[
                "system hardening",
                "vulnerability management",
                "security monitoring",
                "configuration management",
                "access control",
                "risk mitigation",
            ],
            &["CompTIA Security+", "CompTIA CySA+", "GIAC GSEC"],
            "Bachelor's degree in Cybersecurity, IT, Computer Science",
            (1, 3),
            common_weights,
            60.0,
        ),
        role(
            "15",
            "Network Operations Analyst",
            &[
                "network monitoring",
                "routing",
                "switching",
                "network security",
                "firewalls",
                "vulnerability patching",
                "troubleshooting",
            ],
            &["CompTIA Network+", "Cisco CCNA", "CompTIA Security+"],
            "Associate's or Bachelor's degree in Information Technology, Networking, Cybersecurity",
            (1, 3),
            common_weights,
            60.0,
        ),
        role(
            "16",
            "Database Security Analyst",
            &[
                "database administration",
                "SQL",
                "backup and recovery",
                "performance tuning",
                "data integrity",
                "db security",
                "database monitoring",
            ],
            &[
                "Microsoft SQL Server (MCSA)",
                "Oracle Database Associate",
                "CompTIA Data+",
                "AWS/Azure database specialty certifications",
            ],
            "Bachelor's degree in Computer Science, Information Systems, IT",
            (1, 3),
            common_weights,
            60.0,
        ),
        role(
            "17",
            "Cybersecurity Systems Administrator",
            &[
                "system hardening",
                "patch management",
                "user access management",
                "server configuration",
                "backup and recovery",
                "os administration",
                "security monitoring",
            ],
            &[
                "CompTIA Security+",
                "CompTIA Linux+ or Server+",
                "Microsoft or Linux system administration certifications",
            ],
            "Associate's or Bachelor's in Information Technology, Cybersecurity, Computer Science",
            (1, 3),
            common_weights,
            60.0,
        ),
        role(
            "18",
            "Cybersecurity Data Analyst",
            &[
                "data analysis",
                "anomaly detection",
                "metric development",
                "threat analytics",
                "data quality validation",
                "statistical analysis",
                "cybersecurity insights",
            ],
            &[
                "CompTIA Data+",
                "Google/AWS/Azure Data Analytics certifications",
                "ISC2 CC or Security+",
            ],
            "Bachelor's degree in Data Science, Cybersecurity, Computer Science, Information Systems",
            (1, 3),
            common_weights,
            60.0,
        ),
        role(
            "19",
            "Cybercrime Investigator",
            &[
                "digital evidence",
                "log analysis",
                "forensics",
                "chain of custody",
                "threat analysis",
                "intrusion investigation",
                "artifact examination",
            ],
            &[
                "CompTIA CySA+",
                "CompTIA Security+",
                "EC-Council CHFI",
                "GIAC GCIH or GCFA",
            ],
            "Bachelor's degree in Cybersecurity, Digital Forensics, Computer Science, Criminal Justice",
            (1, 3),
            common_weights,
            60.0,
        ),
        role(
            "20",
            "Digital Evidence Analyst",
            &[
                "digital forensics",
                "evidence preservation",
                "drive imaging",
                "file system analysis",
                "memory analysis",
                "artifact analysis",
                "chain of custody",
                "log analysis",
            ],
            &[
                "CompTIA Security+",
                "CompTIA CySA+",
                "CHFI",
                "GIAC GCFA or GCIH",
            ],
            "Associate's or Bachelor's degree in Digital Forensics, Cybersecurity, Information Technology",
            (1, 3),
            common_weights,
            60.0,
        ),
    ]
}
