use serde::Serialize;

/// Health guidance attached to one AQI band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AdvisoryTier {
    pub status: &'static str,
    pub icon: &'static str,
    pub advice: &'static str,
    pub mask_guidance: &'static str,
    pub outdoor_guidance: &'static str,
    pub color_hint: &'static str,
}

impl AdvisoryTier {
    /// Status with its icon, e.g. "Poor 😷".
    pub fn label(&self) -> String {
        format!("{} {}", self.status, self.icon)
    }

    /// Position in the severity ladder, 0 for Good up to 5 for Severe.
    pub fn ordinal(&self) -> usize {
        ADVISORY_LADDER
            .iter()
            .position(|(_, tier)| tier == self)
            .unwrap_or(ADVISORY_LADDER.len())
    }
}

pub const GOOD: AdvisoryTier = AdvisoryTier {
    status: "Good",
    icon: "🌱",
    advice: "Ideal air quality",
    mask_guidance: "No mask needed",
    outdoor_guidance: "Perfect for outdoor activities",
    color_hint: "#14c38e",
};

pub const SATISFACTORY: AdvisoryTier = AdvisoryTier {
    status: "Satisfactory",
    icon: "🙂",
    advice: "Minor breathing discomfort",
    mask_guidance: "Mask optional",
    outdoor_guidance: "Ideal for morning/evening",
    color_hint: "#e3c84e",
};

pub const MODERATE: AdvisoryTier = AdvisoryTier {
    status: "Moderate",
    icon: "😐",
    advice: "Breathing discomfort",
    mask_guidance: "Light mask recommended",
    outdoor_guidance: "Avoid prolonged exposure",
    color_hint: "#f5a742",
};

pub const POOR: AdvisoryTier = AdvisoryTier {
    status: "Poor",
    icon: "😷",
    advice: "Respiratory illness possible",
    mask_guidance: "N95 mask essential",
    outdoor_guidance: "Limit outdoor activities",
    color_hint: "#ef5b5b",
};

pub const VERY_POOR: AdvisoryTier = AdvisoryTier {
    status: "Very Poor",
    icon: "😵",
    advice: "Health impacts likely",
    mask_guidance: "Strict N95 protection",
    outdoor_guidance: "Minimize outdoor time",
    color_hint: "#8f6bf6",
};

pub const SEVERE: AdvisoryTier = AdvisoryTier {
    status: "Severe",
    icon: "☠️",
    advice: "Health emergency",
    mask_guidance: "Stay indoors with purifier",
    outdoor_guidance: "Avoid all outdoor activities",
    color_hint: "#ff0000",
};

/// Inclusive upper bounds, ascending. Anything above the last bound is Severe.
pub static ADVISORY_LADDER: [(f64, AdvisoryTier); 5] = [
    (50.0, GOOD),
    (100.0, SATISFACTORY),
    (200.0, MODERATE),
    (300.0, POOR),
    (400.0, VERY_POOR),
];

/// Maps any AQI value to its advisory tier. Negative values land in Good,
/// NaN compares false against every bound and lands in Severe.
pub fn classify(aqi: f64) -> &'static AdvisoryTier {
    ADVISORY_LADDER
        .iter()
        .find(|(upper, _)| aqi <= *upper)
        .map(|(_, tier)| tier)
        .unwrap_or(&SEVERE)
}

/// Marker color for map stations.
pub fn color_for(aqi: f64) -> &'static str {
    classify(aqi).color_hint
}
