use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Pollutant {
    #[serde(rename = "PM2.5")]
    Pm25,
    #[serde(rename = "PM10")]
    Pm10,
    #[serde(rename = "NO2")]
    No2,
    #[serde(rename = "SO2")]
    So2,
    #[serde(rename = "CO")]
    Co,
    #[serde(rename = "O3")]
    O3,
}

impl Pollutant {
    /// Feature order used by the source classifier.
    pub const ALL: [Pollutant; 6] = [
        Pollutant::Pm25,
        Pollutant::Pm10,
        Pollutant::No2,
        Pollutant::So2,
        Pollutant::Co,
        Pollutant::O3,
    ];

    pub fn feature_name(self) -> &'static str {
        match self {
            Pollutant::Pm25 => "PM2.5",
            Pollutant::Pm10 => "PM10",
            Pollutant::No2 => "NO2",
            Pollutant::So2 => "SO2",
            Pollutant::Co => "CO",
            Pollutant::O3 => "O3",
        }
    }

    pub fn from_feature_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.feature_name().eq_ignore_ascii_case(name.trim()))
    }

    fn slot(self) -> usize {
        self as usize
    }
}

/// Relative importance per pollutant, as exported by the source classifier.
/// Scores are not a probability distribution and need not sum to 1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PollutantWeights {
    scores: [f64; 6],
}

impl PollutantWeights {
    pub fn new(scores: [f64; 6]) -> Self {
        Self { scores }
    }

    /// Equal weight for every feature, used when a classifier exposes no importances.
    pub fn uniform() -> Self {
        Self {
            scores: [1.0 / Pollutant::ALL.len() as f64; 6],
        }
    }

    /// Builds weights from `(feature name, score)` pairs. Unknown names are skipped,
    /// pollutants that never appear stay at 0.
    pub fn from_named<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, f64)>,
    {
        let mut weights = Self::default();
        for (name, score) in pairs {
            if let Some(p) = Pollutant::from_feature_name(name) {
                weights.set(p, score);
            }
        }
        weights
    }

    pub fn get(&self, pollutant: Pollutant) -> f64 {
        self.scores[pollutant.slot()]
    }

    pub fn set(&mut self, pollutant: Pollutant, score: f64) {
        self.scores[pollutant.slot()] = score;
    }

    pub fn iter(&self) -> impl Iterator<Item = (Pollutant, f64)> + '_ {
        Pollutant::ALL.into_iter().map(|p| (p, self.get(p)))
    }

    /// Each pollutant's share of the summed importances, in percent.
    /// All-zero weights give all-zero shares.
    pub fn percentages(&self) -> impl Iterator<Item = (Pollutant, f64)> + '_ {
        let total: f64 = self.scores.iter().sum();
        let total = if total == 0.0 { 1.0 } else { total };
        self.iter().map(move |(p, score)| (p, 100.0 * score / total))
    }
}
