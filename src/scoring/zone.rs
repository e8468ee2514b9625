use serde::Serialize;
use std::fmt;

use super::config::ZoneConfig;

/// Qualitative band a daily score falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Zone {
    Low,
    Moderate,
    High,
}

impl Zone {
    pub fn label(&self) -> &'static str {
        match self {
            Zone::Low => "Low",
            Zone::Moderate => "Moderate",
            Zone::High => "High",
        }
    }

    /// One-line verdict shown with the score
    pub fn headline(&self) -> &'static str {
        match self {
            Zone::Low => "Low emissions: Excellent!",
            Zone::Moderate => "Moderate emissions: Improve habits.",
            Zone::High => "High emissions: Take serious action.",
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl ZoneConfig {
    /// Bucket a score. Each bound is inclusive: a score equal to `low_max`
    /// is still Low, one equal to `moderate_max` is still Moderate.
    pub fn classify(&self, score: f64) -> Zone {
        if score <= self.low_max {
            Zone::Low
        } else if score <= self.moderate_max {
            Zone::Moderate
        } else {
            Zone::High
        }
    }
}

/// Classify with the default 10 / 25 boundaries
pub fn classify(score: f64) -> Zone {
    ZoneConfig::default().classify(score)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_boundaries() {
        assert_eq!(classify(10.0), Zone::Low);
        assert_eq!(classify(10.0001), Zone::Moderate);
        assert_eq!(classify(25.0), Zone::Moderate);
        assert_eq!(classify(25.0001), Zone::High);
    }

    #[test]
    fn test_classify_extremes() {
        assert_eq!(classify(0.0), Zone::Low);
        assert_eq!(classify(-3.0), Zone::Low);
        assert_eq!(classify(1_000.0), Zone::High);
    }

    #[test]
    fn test_custom_zone_config() {
        let zones = ZoneConfig {
            low_max: 5.0,
            moderate_max: 8.0,
        };
        assert_eq!(zones.classify(5.0), Zone::Low);
        assert_eq!(zones.classify(6.0), Zone::Moderate);
        assert_eq!(zones.classify(8.5), Zone::High);
    }

    #[test]
    fn test_zone_text() {
        assert_eq!(Zone::Moderate.to_string(), "Moderate");
        assert!(Zone::High.headline().starts_with("High emissions"));
    }
}
