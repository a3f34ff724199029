use std::env;
use std::fmt;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the batch engine.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub generation: GenerationConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let candidates_per_job = env::var("APP_CANDIDATES_PER_JOB")
            .unwrap_or_else(|_| "25".to_string())
            .parse::<usize>()
            .map_err(|_| ConfigError::InvalidCandidateCount)?;

        let seed = match env::var("APP_SEED") {
            Ok(raw) => Some(raw.parse::<u64>().map_err(|_| ConfigError::InvalidSeed)?),
            Err(_) => None,
        };

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            generation: GenerationConfig {
                candidates_per_job,
                seed,
            },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

/// Settings controlling batch generation defaults. CLI flags override these.
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    pub candidates_per_job: usize,
    pub seed: Option<u64>,
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidCandidateCount,
    InvalidSeed,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidCandidateCount => {
                write!(f, "APP_CANDIDATES_PER_JOB must be a non-negative integer")
            }
            ConfigError::InvalidSeed => write!(f, "APP_SEED must be a valid u64"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("APP_ENV");
        env::remove_var("APP_CANDIDATES_PER_JOB");
        env::remove_var("APP_SEED");
        env::remove_var("APP_LOG_LEVEL");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.generation.candidates_per_job, 25);
        assert_eq!(config.generation.seed, None);
        assert_eq!(config.telemetry.log_level, "info");
    }

    #[test]
    fn load_reads_generation_overrides() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_CANDIDATES_PER_JOB", "40");
        env::set_var("APP_SEED", "1234");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.generation.candidates_per_job, 40);
        assert_eq!(config.generation.seed, Some(1234));
        reset_env();
    }

    #[test]
    fn load_rejects_invalid_seed() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_SEED", "not-a-number");
        let error = AppConfig::load().expect_err("invalid seed rejected");
        assert!(matches!(error, ConfigError::InvalidSeed));
        reset_env();
    }
}
