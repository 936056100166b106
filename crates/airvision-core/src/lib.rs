//! Advisory, forecast calibration, source attribution and policy simulation
//! for the AirVision Delhi-NCR air-quality dashboard.

pub mod advisory;
pub mod config;
pub mod error;
pub mod forecast;
pub mod models;
pub mod policy;
pub mod pollutant;
pub mod sources;
#[cfg(test)]
mod tests;

pub use advisory::{classify, color_for, AdvisoryTier};
pub use config::AirVisionConfig;
pub use error::{ConfigError, ModelError};
pub use forecast::{calibrate, calibrated_forecast, labelled, ForecastDay};
pub use models::{Forecaster, ImportanceSource, ModelContext};
pub use policy::{baseline_or_default, simulate, PolicyLevers, PolicyOutcome};
pub use pollutant::{Pollutant, PollutantWeights};
pub use sources::{attribute, SourceBucket, SourceShares};
