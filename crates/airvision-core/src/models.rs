//! Read-only handles to the pre-trained predictors.
//!
//! The source classifier and the AQI forecaster are trained elsewhere and
//! exported as JSON. They are loaded once into a [`ModelContext`] and passed
//! to whatever needs predictions.

use crate::error::ModelError;
use crate::pollutant::PollutantWeights;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const CLASSIFIER_FILE: &str = "aqi_model.json";
pub const FORECASTER_FILE: &str = "aqi_forecast.json";

pub trait ImportanceSource {
    /// `None` when the model carries no importance vector.
    fn feature_importances(&self) -> Option<PollutantWeights>;
}

pub trait Forecaster {
    fn forecast(&self, steps: usize) -> Vec<f64>;
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClassifierExport {
    #[serde(default)]
    pub feature_names: Vec<String>,
    #[serde(default)]
    pub feature_importances: Option<Vec<f64>>,
}

impl ImportanceSource for ClassifierExport {
    fn feature_importances(&self) -> Option<PollutantWeights> {
        let scores = self.feature_importances.as_ref()?;
        Some(PollutantWeights::from_named(
            self.feature_names.iter().map(String::as_str).zip(scores.iter().copied()),
        ))
    }
}

/// Forecaster backed by a precomputed horizon.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ForecastExport {
    pub forecast: Vec<f64>,
}

impl Forecaster for ForecastExport {
    fn forecast(&self, steps: usize) -> Vec<f64> {
        self.forecast.iter().copied().take(steps).collect()
    }
}

pub struct ModelContext {
    classifier: Box<dyn ImportanceSource + Send + Sync>,
    forecaster: Box<dyn Forecaster + Send + Sync>,
}

impl ModelContext {
    pub fn new(
        classifier: Box<dyn ImportanceSource + Send + Sync>,
        forecaster: Box<dyn Forecaster + Send + Sync>,
    ) -> Self {
        Self { classifier, forecaster }
    }

    pub fn load(models_dir: &Path) -> Result<Self, ModelError> {
        let classifier: ClassifierExport = read_artifact(&models_dir.join(CLASSIFIER_FILE))?;
        if let Some(scores) = &classifier.feature_importances {
            if scores.len() != classifier.feature_names.len() {
                return Err(ModelError::ShapeMismatch {
                    names: classifier.feature_names.len(),
                    scores: scores.len(),
                });
            }
        }
        let forecaster: ForecastExport = read_artifact(&models_dir.join(FORECASTER_FILE))?;
        info!(
            dir = %models_dir.display(),
            features = classifier.feature_names.len(),
            horizon = forecaster.forecast.len(),
            "loaded models"
        );
        Ok(Self::new(Box::new(classifier), Box::new(forecaster)))
    }

    /// Classifier importances, or equal weights when the classifier has none.
    pub fn pollutant_weights(&self) -> PollutantWeights {
        self.classifier.feature_importances().unwrap_or_else(|| {
            warn!("classifier exposes no feature importances, using uniform weights");
            PollutantWeights::uniform()
        })
    }

    pub fn forecaster(&self) -> &dyn Forecaster {
        self.forecaster.as_ref()
    }
}

fn read_artifact<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T, ModelError> {
    if !path.exists() {
        return Err(ModelError::Missing(PathBuf::from(path)));
    }
    let raw = std::fs::read_to_string(path).map_err(|source| ModelError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| ModelError::Json {
        path: path.to_path_buf(),
        source,
    })
}
