//! Client for the WAQI (World Air Quality Index) city feed.

use crate::provider::{GeoPoint, LiveIndexProvider, LiveReading};
use airvision_core::AirVisionConfig;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum FeedError {
    #[error("http error: {0}")]
    Http(reqwest::Error),
    #[error("feed returned status {0:?}")]
    Status(String),
    #[error("feed payload missing {0}")]
    Missing(&'static str),
}

// The request URL carries the API token, so it is stripped before the error
// can reach a log line.
impl From<reqwest::Error> for FeedError {
    fn from(e: reqwest::Error) -> Self {
        FeedError::Http(e.without_url())
    }
}

pub struct WaqiClient {
    http: reqwest::blocking::Client,
    base_url: String,
    token: Option<String>,
}

impl WaqiClient {
    pub fn new(base_url: impl Into<String>, token: Option<String>, timeout: Duration) -> Result<Self, FeedError> {
        let http = reqwest::blocking::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        })
    }

    pub fn from_config(config: &AirVisionConfig) -> Result<Self, FeedError> {
        Self::new(
            config.waqi_base_url.clone(),
            config.waqi_token.clone(),
            config.request_timeout(),
        )
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    pub fn feed_url(&self, city: &str, token: &str) -> String {
        format!("{}/feed/{}/?token={}", self.base_url, city, token)
    }

    pub(crate) fn fetch(&self, city: &str, token: &str) -> Result<LiveReading, FeedError> {
        let body: Value = self
            .http
            .get(self.feed_url(city, token))
            .send()?
            .json()?;
        parse_feed(&body)
    }
}

impl LiveIndexProvider for WaqiClient {
    fn live_reading(&self, city: &str) -> LiveReading {
        let Some(token) = self.token.as_deref() else {
            debug!(city, "no WAQI token configured, skipping live lookup");
            return LiveReading::absent();
        };
        match self.fetch(city, token) {
            Ok(reading) => reading,
            Err(e) => {
                warn!(city, error = %e, "live AQI unavailable");
                LiveReading::absent()
            }
        }
    }
}

/// Extracts index and station coordinates from a feed response.
/// The index is truncated to a whole number, matching the published value.
/// A reading without both an index and a `[lat, lon]` pair is rejected whole.
pub fn parse_feed(body: &Value) -> Result<LiveReading, FeedError> {
    let status = body.get("status").and_then(Value::as_str).unwrap_or_default();
    if status != "ok" {
        return Err(FeedError::Status(status.to_string()));
    }
    let data = body.get("data").ok_or(FeedError::Missing("data"))?;
    // WAQI reports "-" when a station has no current reading. Quoted values
    // must be whole numbers.
    let index = match data.get("aqi") {
        Some(Value::Number(n)) => n.as_f64().filter(|v| v.is_finite()).map(f64::trunc),
        Some(Value::String(s)) => s.trim().parse::<i64>().ok().map(|v| v as f64),
        _ => None,
    }
    .ok_or(FeedError::Missing("data.aqi"))?;

    let coordinates = data
        .pointer("/city/geo")
        .and_then(Value::as_array)
        .and_then(|geo| match geo.as_slice() {
            [lat, lon] => Some(GeoPoint {
                lat: as_coord(lat)?,
                lon: as_coord(lon)?,
            }),
            _ => None,
        })
        .ok_or(FeedError::Missing("data.city.geo"))?;

    Ok(LiveReading {
        index: Some(index),
        coordinates: Some(coordinates),
    })
}

fn as_coord(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}
