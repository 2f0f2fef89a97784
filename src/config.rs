//! Environment-driven service configuration.

use std::env;
use std::path::PathBuf;

/// Deployment environment, read from `APP_ENV`. Anything other than
/// production counts as sandbox.
pub fn get_environment() -> String {
    env::var("APP_ENV").unwrap_or_else(|_| "sandbox".to_string())
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub data_dir: PathBuf,
    pub mental_health_file: String,
    pub career_file: String,
    /// Serve deterministic placeholder index tables when the real
    /// component columns are not loaded. Demo deployments only.
    pub demo_fallback: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            data_dir: PathBuf::from("data"),
            mental_health_file: "mental_health_cleaned.csv".to_string(),
            career_file: "career_survey_cleaned.csv".to_string(),
            demo_fallback: false,
        }
    }
}

impl Config {
    /// Read configuration from the environment, falling back to
    /// defaults for anything unset or unparsable.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.port),
            data_dir: env::var("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            mental_health_file: env::var("MENTAL_HEALTH_FILE")
                .unwrap_or(defaults.mental_health_file),
            career_file: env::var("CAREER_FILE").unwrap_or(defaults.career_file),
            demo_fallback: env::var("DEMO_FALLBACK")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(defaults.demo_fallback),
        }
    }
}
