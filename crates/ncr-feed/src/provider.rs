use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

/// One live observation. Either half may be absent when the feed is
/// unreachable, unconfigured or has no data for the city.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LiveReading {
    pub index: Option<f64>,
    pub coordinates: Option<GeoPoint>,
}

impl LiveReading {
    pub fn absent() -> Self {
        Self::default()
    }

    pub fn is_absent(&self) -> bool {
        self.index.is_none()
    }
}

pub trait LiveIndexProvider {
    /// Never fails; failures surface as an absent reading.
    fn live_reading(&self, city: &str) -> LiveReading;
}

impl<P: LiveIndexProvider + ?Sized> LiveIndexProvider for &P {
    fn live_reading(&self, city: &str) -> LiveReading {
        (**self).live_reading(city)
    }
}
