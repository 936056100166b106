use crate::provider::{LiveIndexProvider, LiveReading};
use crate::stations::{map_center, ncr_stations, Station};
use airvision_core::policy::baseline_or_default;
use airvision_core::{
    attribute, calibrated_forecast, classify, labelled, simulate, AdvisoryTier, AirVisionConfig,
    ForecastDay, ModelContext, PolicyLevers, PolicyOutcome, Pollutant, SourceBucket,
};
use chrono::Utc;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct LiveSummary {
    pub city: String,
    pub reading: LiveReading,
    pub advisory: Option<AdvisoryTier>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SourceShareRow {
    pub bucket: SourceBucket,
    pub label: &'static str,
    pub percent: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PollutantShareRow {
    pub pollutant: Pollutant,
    pub name: &'static str,
    pub percent: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PolicySummary {
    pub levers: PolicyLevers,
    pub baseline_is_live: bool,
    pub outcome: PolicyOutcome,
}

/// Everything the dashboard shows for one day, in one serializable record.
#[derive(Debug, Clone, Serialize)]
pub struct DailySnapshot {
    pub date: String,
    pub live: LiveSummary,
    pub forecast_calibrated: bool,
    pub forecast: Vec<ForecastDay>,
    pub sources: Vec<SourceShareRow>,
    pub pollutants: Vec<PollutantShareRow>,
    pub policy: PolicySummary,
    pub stations: Vec<Station>,
    pub map_center: Option<(f64, f64)>,
}

pub fn live_summary<P: LiveIndexProvider + ?Sized>(provider: &P, city: &str) -> LiveSummary {
    let reading = provider.live_reading(city);
    LiveSummary {
        city: city.to_string(),
        reading,
        advisory: reading.index.map(|aqi| *classify(aqi)),
    }
}

pub fn source_rows(models: &ModelContext) -> Vec<SourceShareRow> {
    attribute(&models.pollutant_weights())
        .iter()
        .map(|(bucket, percent)| SourceShareRow {
            bucket,
            label: bucket.label(),
            percent,
        })
        .collect()
}

/// Per-pollutant split of the classifier's importances.
pub fn pollutant_rows(models: &ModelContext) -> Vec<PollutantShareRow> {
    models
        .pollutant_weights()
        .percentages()
        .map(|(pollutant, percent)| PollutantShareRow {
            pollutant,
            name: pollutant.feature_name(),
            percent,
        })
        .collect()
}

pub fn policy_summary(
    models: &ModelContext,
    live: Option<f64>,
    levers: PolicyLevers,
    config: &AirVisionConfig,
) -> PolicySummary {
    let levers = levers.clamped();
    let shares = attribute(&models.pollutant_weights());
    let baseline = baseline_or_default(live, config);
    PolicySummary {
        levers,
        baseline_is_live: live.is_some(),
        outcome: simulate(&shares, &levers, baseline),
    }
}

pub fn generate_daily_snapshot<P: LiveIndexProvider + ?Sized>(
    provider: &P,
    models: &ModelContext,
    config: &AirVisionConfig,
    levers: PolicyLevers,
) -> DailySnapshot {
    let live = live_summary(provider, &config.home_city);
    let live_index = live.reading.index;

    let forecast = calibrated_forecast(models.forecaster(), live_index, config.forecast_steps);
    let stations = ncr_stations(provider, &config.ncr_cities);
    let center = map_center(&stations).map(|p| (p.lat, p.lon));

    DailySnapshot {
        date: Utc::now().format("%Y-%m-%d").to_string(),
        forecast_calibrated: live_index.is_some() && !forecast.is_empty(),
        forecast: labelled(&forecast),
        sources: source_rows(models),
        pollutants: pollutant_rows(models),
        policy: policy_summary(models, live_index, levers, config),
        live,
        stations,
        map_center: center,
    }
}
