use crate::error::ConfigError;
use crate::policy::PolicyLevers;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Baseline used by the policy simulator when no live reading is available.
pub const DEFAULT_BASELINE_AQI: f64 = 200.0;
pub const DEFAULT_FORECAST_STEPS: usize = 3;
pub const DEFAULT_CACHE_TTL_SECS: u64 = 600;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;
pub const DEFAULT_WAQI_BASE_URL: &str = "https://api.waqi.info";
pub const WAQI_TOKEN_ENV: &str = "WAQI_TOKEN";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AirVisionConfig {
    pub default_baseline: f64,
    pub forecast_steps: usize,
    pub cache_ttl_secs: u64,
    pub request_timeout_secs: u64,
    pub waqi_base_url: String,
    pub waqi_token: Option<String>,
    pub home_city: String,
    pub ncr_cities: Vec<String>,
    pub models_dir: PathBuf,
    pub levers: PolicyLevers,
}

impl Default for AirVisionConfig {
    fn default() -> Self {
        Self {
            default_baseline: DEFAULT_BASELINE_AQI,
            forecast_steps: DEFAULT_FORECAST_STEPS,
            cache_ttl_secs: DEFAULT_CACHE_TTL_SECS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            waqi_base_url: DEFAULT_WAQI_BASE_URL.to_string(),
            waqi_token: None,
            home_city: "Delhi".to_string(),
            ncr_cities: ["Delhi", "Noida", "Gurgaon", "Ghaziabad", "Faridabad"]
                .iter()
                .map(|c| c.to_string())
                .collect(),
            models_dir: PathBuf::from("Models"),
            levers: PolicyLevers::default(),
        }
    }
}

impl AirVisionConfig {
    pub fn from_json_str(raw: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw, path)
    }

    /// Loads `path` when given, defaults otherwise. The token falls back to
    /// the `WAQI_TOKEN` environment variable when the file does not set one.
    pub fn resolve(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(p) => Self::load(p)?,
            None => Self::default(),
        };
        config.waqi_token = pick_token(config.waqi_token.take(), std::env::var(WAQI_TOKEN_ENV).ok());
        config.levers = config.levers.clamped();
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.default_baseline.is_finite() || self.default_baseline < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "default_baseline must be a non-negative number, got {}",
                self.default_baseline
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid("request_timeout_secs must be positive".into()));
        }
        if self.home_city.trim().is_empty() {
            return Err(ConfigError::Invalid("home_city is empty".into()));
        }
        Ok(())
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn pick_token(configured: Option<String>, env: Option<String>) -> Option<String> {
    configured
        .filter(|t| !t.trim().is_empty())
        .or_else(|| env.filter(|t| !t.trim().is_empty()))
}
