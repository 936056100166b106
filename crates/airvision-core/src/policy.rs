use crate::advisory::{classify, AdvisoryTier};
use crate::config::AirVisionConfig;
use crate::sources::{SourceBucket, SourceShares};
use serde::{Deserialize, Serialize};

pub const MAX_LEVER_PERCENT: f64 = 60.0;

/// Assumed emission reduction per source bucket, in percent (0..=60).
/// Out-of-range values are clamped by `new` and again when simulated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyLevers {
    pub traffic: f64,
    pub dust_stubble: f64,
    pub industry: f64,
    pub photochemical: f64,
}

impl Default for PolicyLevers {
    fn default() -> Self {
        Self {
            traffic: 20.0,
            dust_stubble: 15.0,
            industry: 10.0,
            photochemical: 5.0,
        }
    }
}

impl PolicyLevers {
    /// Builds levers clamped into the slider range.
    pub fn new(traffic: f64, dust_stubble: f64, industry: f64, photochemical: f64) -> Self {
        Self {
            traffic: clamp_lever(traffic),
            dust_stubble: clamp_lever(dust_stubble),
            industry: clamp_lever(industry),
            photochemical: clamp_lever(photochemical),
        }
    }

    pub fn uniform(percent: f64) -> Self {
        Self::new(percent, percent, percent, percent)
    }

    pub fn clamped(self) -> Self {
        Self::new(self.traffic, self.dust_stubble, self.industry, self.photochemical)
    }

    pub fn get(&self, bucket: SourceBucket) -> f64 {
        match bucket {
            SourceBucket::Traffic => self.traffic,
            SourceBucket::DustStubble => self.dust_stubble,
            SourceBucket::Industry => self.industry,
            SourceBucket::Photochemical => self.photochemical,
        }
    }
}

fn clamp_lever(percent: f64) -> f64 {
    if percent.is_nan() {
        return 0.0;
    }
    percent.clamp(0.0, MAX_LEVER_PERCENT)
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct PolicyOutcome {
    pub baseline: f64,
    pub effectiveness: f64,
    pub projected_index: f64,
    pub tier: AdvisoryTier,
}

impl PolicyOutcome {
    pub fn reduction(&self) -> f64 {
        self.baseline - self.projected_index
    }
}

/// Sum of share percent times lever percent, at most 6000 when shares sum
/// to 100. Levers are clamped again here: the fields are public and
/// deserialized or hand-built values never pass through `new`.
fn weighted_reduction(shares: &SourceShares, levers: &PolicyLevers) -> f64 {
    SourceBucket::ALL
        .iter()
        .map(|b| shares.get(*b) * clamp_lever(levers.get(*b)))
        .sum()
}

/// Blended effectiveness: each bucket's share weights its own reduction lever.
/// Reductions combine additively, they do not compound.
pub fn effectiveness(shares: &SourceShares, levers: &PolicyLevers) -> f64 {
    weighted_reduction(shares, levers) / 10_000.0
}

/// Projects the index after applying the levers to `baseline`.
/// `baseline` is expected to be non-negative; it is not validated here.
pub fn simulate(shares: &SourceShares, levers: &PolicyLevers, baseline: f64) -> PolicyOutcome {
    let weighted = weighted_reduction(shares, levers);
    // Whole-percent inputs stay exact, e.g. every lever at 60 gives 0.4 * baseline.
    let projected_index = baseline * (10_000.0 - weighted) / 10_000.0;
    PolicyOutcome {
        baseline,
        effectiveness: weighted / 10_000.0,
        projected_index,
        tier: *classify(projected_index),
    }
}

/// Live index when present, otherwise the configured fallback baseline.
pub fn baseline_or_default(live: Option<f64>, config: &AirVisionConfig) -> f64 {
    live.unwrap_or(config.default_baseline)
}
