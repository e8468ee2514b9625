use serde::Serialize;

/// Score at which the meter reads 100%
pub const GAUGE_FULL_SCALE: f64 = 25.0;

/// Score above which the meter turns red
pub const GAUGE_CRITICAL: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GaugeTier {
    Green,
    Amber,
    Red,
}

/// Radial meter state derived from a daily score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GaugeReading {
    /// 0..=100, saturating at [`GAUGE_FULL_SCALE`]
    pub percentage: f64,
    pub tier: GaugeTier,
}

impl GaugeReading {
    pub fn from_score(score: f64) -> Self {
        let percentage = (score / GAUGE_FULL_SCALE).clamp(0.0, 1.0) * 100.0;

        let tier = if score > GAUGE_CRITICAL {
            GaugeTier::Red
        } else if score > GAUGE_FULL_SCALE {
            GaugeTier::Amber
        } else {
            GaugeTier::Green
        };

        Self { percentage, tier }
    }

    /// Percentage rounded for display, e.g. "37%"
    pub fn label(&self) -> String {
        format!("{}%", self.percentage.round() as u32)
    }

    /// Fill ratio for 0..=1 progress widgets
    pub fn ratio(&self) -> f64 {
        self.percentage / 100.0
    }
}
