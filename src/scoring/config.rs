use serde::{Deserialize, Serialize};

/// Default lower bound for a single category contribution (kg CO2/day)
pub const DEFAULT_CONTRIBUTION_FLOOR: f64 = -9999.0;

/// Default number of categories surfaced as top contributors
pub const DEFAULT_TOP_CONTRIBUTORS: usize = 3;

/// Tunable parts of the scoring pipeline.
///
/// Emission factors and cadences are fixed; only the post-processing knobs
/// live here. Omitted fields take their defaults; only an explicit
/// `contribution_floor: null` turns the floor off. Without a `scoring`
/// section at all, [`ScoringConfig::default`] is used.
///
/// Example YAML:
/// ```yaml
/// scoring:
///   contribution_floor: -9999
///   top_contributors: 3
///   zones:
///     low_max: 10
///     moderate_max: 25
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScoringConfig {
    /// No single contribution is allowed below this value. A missing key means
    /// -9999; `null` (`None`) disables the floor.
    #[serde(default = "default_contribution_floor")]
    pub contribution_floor: Option<f64>,

    /// How many categories drive recommendations (default: 3)
    #[serde(default)]
    pub top_contributors: Option<usize>,

    /// Zone boundaries (default: 10 / 25)
    #[serde(default)]
    pub zones: Option<ZoneConfig>,
}

fn default_contribution_floor() -> Option<f64> {
    Some(DEFAULT_CONTRIBUTION_FLOOR)
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            contribution_floor: Some(DEFAULT_CONTRIBUTION_FLOOR),
            top_contributors: Some(DEFAULT_TOP_CONTRIBUTORS),
            zones: Some(ZoneConfig::default()),
        }
    }
}

impl ScoringConfig {
    pub fn top_n(&self) -> usize {
        self.top_contributors.unwrap_or(DEFAULT_TOP_CONTRIBUTORS)
    }

    pub fn zone_config(&self) -> ZoneConfig {
        self.zones.clone().unwrap_or_default()
    }
}

/// Upper bounds (inclusive) of the Low and Moderate zones.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ZoneConfig {
    pub low_max: f64,
    pub moderate_max: f64,
}

impl Default for ZoneConfig {
    fn default() -> Self {
        Self {
            low_max: 10.0,
            moderate_max: 25.0,
        }
    }
}
