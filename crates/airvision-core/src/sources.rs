use crate::pollutant::{Pollutant, PollutantWeights};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SourceBucket {
    Traffic,
    DustStubble,
    Industry,
    Photochemical,
}

impl SourceBucket {
    pub const ALL: [SourceBucket; 4] = [
        SourceBucket::Traffic,
        SourceBucket::DustStubble,
        SourceBucket::Industry,
        SourceBucket::Photochemical,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SourceBucket::Traffic => "Traffic (NO₂ + CO)",
            SourceBucket::DustStubble => "Dust & Stubble (PM2.5 + PM10)",
            SourceBucket::Industry => "Industry (SO₂)",
            SourceBucket::Photochemical => "Photochemical (O₃)",
        }
    }

    pub fn pollutants(self) -> &'static [Pollutant] {
        match self {
            SourceBucket::Traffic => &[Pollutant::No2, Pollutant::Co],
            SourceBucket::DustStubble => &[Pollutant::Pm25, Pollutant::Pm10],
            SourceBucket::Industry => &[Pollutant::So2],
            SourceBucket::Photochemical => &[Pollutant::O3],
        }
    }

    fn slot(self) -> usize {
        self as usize
    }
}

/// Percentage share per source bucket, in display order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceShares {
    percent: [f64; 4],
}

impl SourceShares {
    pub fn new(percent: [f64; 4]) -> Self {
        Self { percent }
    }

    pub fn get(&self, bucket: SourceBucket) -> f64 {
        self.percent[bucket.slot()]
    }

    pub fn total(&self) -> f64 {
        self.percent.iter().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SourceBucket, f64)> + '_ {
        SourceBucket::ALL.into_iter().map(|b| (b, self.get(b)))
    }
}

/// Aggregates pollutant importances into the four source buckets and
/// normalizes them to percentages. All-zero input yields all-zero shares.
pub fn attribute(weights: &PollutantWeights) -> SourceShares {
    let raw = SourceBucket::ALL.map(|b| b.pollutants().iter().map(|p| weights.get(*p)).sum::<f64>());
    let total: f64 = raw.iter().sum();
    let total = if total == 0.0 { 1.0 } else { total };
    SourceShares {
        percent: raw.map(|v| 100.0 * v / total),
    }
}
