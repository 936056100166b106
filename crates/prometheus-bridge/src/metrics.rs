use airvision_core::{classify, PolicyOutcome};
use ncr_feed::DailySnapshot;
use prometheus::{Encoder, GaugeVec, Opts, Registry, TextEncoder};

pub struct AirVisionMetrics {
    registry: Registry,
    pub live_aqi: GaugeVec,
    pub forecast_aqi: GaugeVec,
    pub source_share_percent: GaugeVec,
    pub projected_aqi: GaugeVec,
    pub advisory_tier: GaugeVec,
}

impl AirVisionMetrics {
    pub fn new() -> prometheus::Result<Self> {
        let registry = Registry::new();

        let live_aqi = gauge_vec(&registry, "airvision_live_aqi", "Live AQI reported by the feed", &["city"])?;
        let forecast_aqi = gauge_vec(
            &registry,
            "airvision_forecast_aqi",
            "Calibrated AQI forecast per horizon",
            &["horizon"],
        )?;
        let source_share_percent = gauge_vec(
            &registry,
            "airvision_source_share_percent",
            "Attributed share of pollution per source bucket",
            &["bucket"],
        )?;
        let projected_aqi = gauge_vec(
            &registry,
            "airvision_projected_aqi",
            "AQI projected by the policy simulator",
            &["city"],
        )?;
        let advisory_tier = gauge_vec(
            &registry,
            "airvision_advisory_tier",
            "Advisory tier ordinal, 0 (Good) to 5 (Severe)",
            &["city"],
        )?;

        Ok(Self {
            registry,
            live_aqi,
            forecast_aqi,
            source_share_percent,
            projected_aqi,
            advisory_tier,
        })
    }

    pub fn observe_live(&self, city: &str, aqi: f64) {
        self.live_aqi.with_label_values(&[city]).set(aqi);
        self.advisory_tier
            .with_label_values(&[city])
            .set(classify(aqi).ordinal() as f64);
    }

    pub fn observe_forecast(&self, horizon: &str, aqi: f64) {
        self.forecast_aqi.with_label_values(&[horizon]).set(aqi);
    }

    pub fn observe_policy(&self, city: &str, outcome: &PolicyOutcome) {
        self.projected_aqi
            .with_label_values(&[city])
            .set(outcome.projected_index);
    }

    pub fn observe_snapshot(&self, snapshot: &DailySnapshot) {
        if let Some(aqi) = snapshot.live.reading.index {
            self.observe_live(&snapshot.live.city, aqi);
        }
        for station in &snapshot.stations {
            self.observe_live(&station.city, station.aqi);
        }
        for day in &snapshot.forecast {
            self.observe_forecast(&day.label, day.aqi);
        }
        for row in &snapshot.sources {
            self.source_share_percent
                .with_label_values(&[row.label])
                .set(row.percent);
        }
        self.observe_policy(&snapshot.live.city, &snapshot.policy.outcome);
    }

    /// Text exposition of every gauge in this registry.
    pub fn render(&self) -> anyhow::Result<String> {
        let mut buf = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buf)?;
        Ok(String::from_utf8(buf)?)
    }
}

fn gauge_vec(registry: &Registry, name: &str, help: &str, labels: &[&str]) -> prometheus::Result<GaugeVec> {
    let gauge = GaugeVec::new(Opts::new(name, help), labels)?;
    registry.register(Box::new(gauge.clone()))?;
    Ok(gauge)
}
