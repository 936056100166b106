use crate::advisory::{classify, AdvisoryTier};
use crate::models::Forecaster;
use serde::Serialize;

pub const DAY_LABELS: [&str; 3] = ["Tomorrow", "Day After", "In 3 Days"];

/// Shifts a raw forecast so its first point equals today's live reading.
/// The offset is applied uniformly, so day-to-day deltas are unchanged.
pub fn calibrate(raw: &[f64], live: Option<f64>) -> Vec<f64> {
    let (Some(live), Some(first)) = (live, raw.first()) else {
        return raw.to_vec();
    };
    let shift = live - first;
    raw.iter().map(|v| v + shift).collect()
}

pub fn calibrated_forecast(forecaster: &dyn Forecaster, live: Option<f64>, steps: usize) -> Vec<f64> {
    let raw = forecaster.forecast(steps);
    calibrate(&raw, live)
}

#[derive(Debug, Clone, Serialize)]
pub struct ForecastDay {
    pub label: String,
    pub aqi: f64,
    pub tier: AdvisoryTier,
}

/// Pairs each forecast value with a day label and its advisory tier.
/// Horizons beyond the named days are labelled "Day N".
pub fn labelled(series: &[f64]) -> Vec<ForecastDay> {
    series
        .iter()
        .enumerate()
        .map(|(i, &aqi)| ForecastDay {
            label: DAY_LABELS
                .get(i)
                .map(|l| l.to_string())
                .unwrap_or_else(|| format!("Day {}", i + 1)),
            aqi,
            tier: *classify(aqi),
        })
        .collect()
}
