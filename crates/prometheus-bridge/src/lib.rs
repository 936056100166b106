mod guards;
mod metrics;

pub use guards::flag_if_forecast_worsens;
pub use metrics::AirVisionMetrics;
