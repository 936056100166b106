use crate::provider::{GeoPoint, LiveIndexProvider};
use airvision_core::{classify, color_for};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Station {
    pub city: String,
    pub aqi: f64,
    pub lat: f64,
    pub lon: f64,
}

impl Station {
    pub fn status(&self) -> &'static str {
        classify(self.aqi).status
    }

    pub fn marker_color(&self) -> &'static str {
        color_for(self.aqi)
    }
}

/// Polls every city and keeps those reporting both an index and a location.
pub fn ncr_stations<P, S>(provider: &P, cities: &[S]) -> Vec<Station>
where
    P: LiveIndexProvider + ?Sized,
    S: AsRef<str>,
{
    cities
        .iter()
        .filter_map(|city| {
            let city = city.as_ref();
            let reading = provider.live_reading(city);
            let (aqi, geo) = (reading.index?, reading.coordinates?);
            Some(Station {
                city: city.to_string(),
                aqi,
                lat: geo.lat,
                lon: geo.lon,
            })
        })
        .collect()
}

/// Mean position of the stations, used to center the map.
pub fn map_center(stations: &[Station]) -> Option<GeoPoint> {
    if stations.is_empty() {
        return None;
    }
    let n = stations.len() as f64;
    Some(GeoPoint {
        lat: stations.iter().map(|s| s.lat).sum::<f64>() / n,
        lon: stations.iter().map(|s| s.lon).sum::<f64>() / n,
    })
}
