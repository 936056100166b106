use crate::AirVisionMetrics;
use airvision_core::{classify, ForecastDay};

/// Records the forecast and reports whether any forecast day falls into a
/// worse advisory tier than today's reading.
pub fn flag_if_forecast_worsens(
    metrics: &AirVisionMetrics,
    city: &str,
    today: Option<f64>,
    forecast: &[ForecastDay],
) -> bool {
    for day in forecast {
        metrics.observe_forecast(&day.label, day.aqi);
    }
    let Some(today) = today else {
        return false;
    };
    metrics.observe_live(city, today);
    let today_tier = classify(today).ordinal();
    forecast.iter().any(|d| d.tier.ordinal() > today_tier)
}
