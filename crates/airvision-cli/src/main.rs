//! `airvision` command-line front end.

mod cli;
mod pages;

use airvision_core::{AirVisionConfig, ModelContext};
use anyhow::Context;
use clap::Parser;
use cli::{Cli, Command, OutputFormat};
use ncr_feed::snapshot::{live_summary, policy_summary, pollutant_rows, source_rows};
use ncr_feed::{generate_daily_snapshot, map_center, ncr_stations, CachedProvider, LiveIndexProvider, WaqiClient};
use prometheus_bridge::{flag_if_forecast_worsens, AirVisionMetrics};
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn emit<T: Serialize>(format: OutputFormat, value: &T, text: impl FnOnce() -> String) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
        OutputFormat::Text => print!("{}", text()),
    }
    Ok(())
}

fn load_models(config: &AirVisionConfig) -> anyhow::Result<ModelContext> {
    ModelContext::load(&config.models_dir)
        .with_context(|| format!("loading models from {}", config.models_dir.display()))
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    init_tracing(args.log_json);

    let mut config = AirVisionConfig::resolve(args.config.as_deref()).context("loading configuration")?;
    if let Some(dir) = args.models_dir.clone() {
        config.models_dir = dir;
    }

    let client = WaqiClient::from_config(&config).context("building WAQI client")?;
    let token_configured = client.has_token();
    if !token_configured {
        warn!("WAQI_TOKEN not set, live readings are unavailable");
    }
    let feed = CachedProvider::new(client, config.cache_ttl());

    match &args.command {
        Command::Live { city } => {
            let city = city.as_deref().unwrap_or(&config.home_city);
            let summary = live_summary(&feed, city);
            emit(args.format, &summary, || pages::live(&summary, token_configured))?;
        }
        Command::Forecast => {
            let models = load_models(&config)?;
            let live = feed.live_reading(&config.home_city).index;
            let series = airvision_core::calibrated_forecast(models.forecaster(), live, config.forecast_steps);
            let days = airvision_core::labelled(&series);
            let calibrated = live.is_some() && !series.is_empty();
            emit(args.format, &days, || pages::forecast(&days, calibrated))?;
        }
        Command::Sources => {
            let models = load_models(&config)?;
            let rows = source_rows(&models);
            let pollutants = pollutant_rows(&models);
            let page = serde_json::json!({ "sources": rows, "pollutants": pollutants });
            emit(args.format, &page, || pages::sources(&rows, &pollutants))?;
        }
        Command::Policy(levers) => {
            let models = load_models(&config)?;
            let live = feed.live_reading(&config.home_city).index;
            let summary = policy_summary(&models, live, levers.apply(config.levers), &config);
            emit(args.format, &summary, || pages::policy(&summary))?;
        }
        Command::Map => {
            let stations = ncr_stations(&feed, &config.ncr_cities);
            let center = map_center(&stations);
            info!(stations = stations.len(), "collected NCR stations");
            emit(args.format, &stations, || pages::map(&stations, center))?;
        }
        Command::Snapshot(levers) => {
            let models = load_models(&config)?;
            let snapshot = generate_daily_snapshot(&feed, &models, &config, levers.apply(config.levers));
            emit(args.format, &snapshot, || {
                let mut text = format!("AirVision snapshot {}\n", snapshot.date);
                text.push_str(&pages::live(&snapshot.live, token_configured));
                text.push_str(&pages::forecast(&snapshot.forecast, snapshot.forecast_calibrated));
                text.push_str(&pages::sources(&snapshot.sources, &snapshot.pollutants));
                text.push_str(&pages::policy(&snapshot.policy));
                text.push_str(&pages::map(
                    &snapshot.stations,
                    map_center(&snapshot.stations),
                ));
                text
            })?;
        }
        Command::Metrics => {
            let models = load_models(&config)?;
            let snapshot = generate_daily_snapshot(&feed, &models, &config, config.levers);
            let metrics = AirVisionMetrics::new().context("registering metrics")?;
            metrics.observe_snapshot(&snapshot);
            if flag_if_forecast_worsens(&metrics, &snapshot.live.city, snapshot.live.reading.index, &snapshot.forecast) {
                warn!(city = %snapshot.live.city, "forecast moves into a worse advisory tier");
            }
            print!("{}", metrics.render()?);
        }
    }
    Ok(())
}
