use serde::Serialize;

use super::categories::{labels, CATEGORIES, CATEGORY_COUNT};
use super::config::ScoringConfig;
use super::gauge::GaugeReading;
use super::recommendations::{recommend, Recommendation};
use super::validation::{validate, InputError, RawInputs};
use super::zone::Zone;

/// Per-category daily kg CO2, aligned with [`CATEGORIES`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ContributionVector([f64; CATEGORY_COUNT]);

impl ContributionVector {
    pub fn values(&self) -> &[f64; CATEGORY_COUNT] {
        &self.0
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.0.get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.iter().copied()
    }
}

impl From<[f64; CATEGORY_COUNT]> for ContributionVector {
    fn from(values: [f64; CATEGORY_COUNT]) -> Self {
        Self(values)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryContribution {
    pub label: &'static str, // e.g. "Transport"
    pub value: f64,          // kg CO2/day
}

/// Everything one calculation produces. Built fresh per calculation and
/// handed to every consumer (summary, charts, report) explicitly.
#[derive(Debug, Clone, Serialize)]
pub struct Assessment {
    pub inputs: RawInputs,
    pub contributions: ContributionVector,
    pub score: f64,
    pub zone: Zone,
    pub top_contributors: Vec<&'static str>,
}

impl Assessment {
    /// Daily score scaled to a year
    pub fn annual_projection(&self) -> f64 {
        self.score * 365.0
    }

    /// Every category, including zero and negative contributions
    pub fn breakdown(&self) -> Vec<CategoryContribution> {
        CATEGORIES
            .iter()
            .zip(self.contributions.iter())
            .map(|(spec, value)| CategoryContribution {
                label: spec.label,
                value,
            })
            .collect()
    }

    /// Only categories that add emissions
    pub fn positive_breakdown(&self) -> Vec<CategoryContribution> {
        self.breakdown().into_iter().filter(|c| c.value > 0.0).collect()
    }

    pub fn recommendations(&self) -> Vec<Recommendation> {
        recommend(&self.top_contributors)
    }

    pub fn gauge(&self) -> GaugeReading {
        GaugeReading::from_score(self.score)
    }
}

/// Normalize every answer to kg CO2 per day.
///
/// `floor`, when set, is the lowest value a single contribution may take.
pub fn compute_contributions(inputs: &RawInputs, floor: Option<f64>) -> ContributionVector {
    let values = inputs.values();
    ContributionVector(std::array::from_fn(|i| {
        let mut daily = CATEGORIES[i].daily_contribution(values[i]);
        if let Some(floor) = floor {
            daily = daily.max(floor);
        }
        // 0 * -0.2 is -0.0
        daily + 0.0
    }))
}

pub fn compute_score(contributions: &ContributionVector) -> f64 {
    contributions.iter().sum()
}

/// Labels of the `n` largest contributions, largest first. Ties keep
/// category order.
pub fn rank_top_contributors(
    contributions: &ContributionVector,
    labels: &[&'static str; CATEGORY_COUNT],
    n: usize,
) -> Vec<&'static str> {
    let mut ranked: Vec<(f64, &'static str)> = contributions
        .iter()
        .zip(labels.iter().copied())
        .collect();

    // sort_by is stable
    ranked.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));

    ranked.into_iter().take(n).map(|(_, label)| label).collect()
}

/// Run the pipeline on already-validated inputs.
pub fn assess(inputs: RawInputs, config: &ScoringConfig) -> Assessment {
    let contributions = compute_contributions(&inputs, config.contribution_floor);
    let score = compute_score(&contributions);
    let zone = config.zone_config().classify(score);
    let top_contributors = rank_top_contributors(&contributions, &labels(), config.top_n());

    Assessment {
        inputs,
        contributions,
        score,
        zone,
        top_contributors,
    }
}

/// Validate raw form text and run the pipeline.
pub fn assess_form<S: AsRef<str>>(
    raw: &[S; CATEGORY_COUNT],
    config: &ScoringConfig,
) -> Result<Assessment, InputError> {
    let inputs = validate(raw)?;
    Ok(assess(inputs, config))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn inputs(values: [f64; CATEGORY_COUNT]) -> RawInputs {
        RawInputs::new(values).unwrap()
    }

    fn golden_inputs() -> RawInputs {
        inputs([10.0, 5.0, 100.0, 1.0, 2.0, 2.0, 5.0, 10.0, 3.0, 20.0, 2.0, 3.0, 0.0])
    }

    #[test]
    fn test_all_zero_inputs() {
        let result = assess(RawInputs::zeros(), &ScoringConfig::default());
        assert_eq!(result.score, 0.0);
        assert_eq!(result.zone, Zone::Low);
        assert!(result.contributions.iter().all(|c| c == 0.0));
    }

    /// Golden answers times factor over cadence divisor, spelled out per row
    fn golden_expected() -> [f64; CATEGORY_COUNT] {
        [
            10.0 * 0.18 / 1.0,
            5.0 * 0.475 / 1.0,
            100.0 * 0.0003 / 1.0,
            1.0 * 42.3 / 30.0,
            2.0 * 0.09 / 1.0,
            2.0 * 0.5 / 1.0,
            5.0 * 0.02 / 7.0,
            10.0 * 0.02 / 7.0,
            3.0 * 0.3 / 7.0,
            20.0 * 0.05 / 7.0,
            2.0 * 150.0 / 365.0,
            3.0 * 3.0 / 7.0,
            0.0,
        ]
    }

    #[test]
    fn test_golden_contributions() {
        let contributions = compute_contributions(&golden_inputs(), Some(-9999.0));
        for (i, (actual, expected)) in contributions.iter().zip(golden_expected()).enumerate() {
            assert_eq!(actual, expected, "category {} ({})", i, CATEGORIES[i].label);
        }
    }

    #[test]
    fn test_golden_score_and_zone() {
        let result = assess(golden_inputs(), &ScoringConfig::default());
        let expected_score: f64 = golden_expected().iter().sum();
        assert_eq!(result.score, expected_score);
        // 8.395 from the daily/weekly/monthly rows + 300/365 for flights
        assert!((result.score - 9.216917808219178).abs() < EPSILON);
        assert_eq!(result.zone, Zone::Low);
        assert_eq!(result.top_contributors, vec!["Electricity", "Transport", "LPG"]);
        assert!((result.annual_projection() - 3364.175).abs() < 1e-6);
    }

    #[test]
    fn test_recycling_reduces_score() {
        let mut values = [0.0; CATEGORY_COUNT];
        values[0] = 10.0;
        let without = assess(inputs(values), &ScoringConfig::default());

        values[12] = 7.0;
        let with = assess(inputs(values), &ScoringConfig::default());

        assert!((with.contributions.get(12).unwrap() - -0.2).abs() < EPSILON);
        assert!((without.score - with.score - 0.2).abs() < EPSILON);
    }

    #[test]
    fn test_linear_in_each_input() {
        let base = golden_inputs();
        let base_contributions = compute_contributions(&base, None);

        for i in 0..CATEGORY_COUNT {
            let mut scaled = *base.values();
            scaled[i] *= 4.0;
            let scaled_contributions = compute_contributions(&inputs(scaled), None);

            for j in 0..CATEGORY_COUNT {
                let before = base_contributions.get(j).unwrap();
                let after = scaled_contributions.get(j).unwrap();
                if i == j {
                    assert!((after - before * 4.0).abs() < EPSILON);
                } else {
                    assert_eq!(after, before);
                }
            }
        }
    }

    #[test]
    fn test_floor_applied() {
        let mut values = [0.0; CATEGORY_COUNT];
        values[12] = 700.0; // -20 kg/day
        let contributions = compute_contributions(&inputs(values), Some(-5.0));
        assert_eq!(contributions.get(12), Some(-5.0));
    }

    #[test]
    fn test_floor_disabled() {
        let mut values = [0.0; CATEGORY_COUNT];
        values[12] = 700.0;
        let contributions = compute_contributions(&inputs(values), None);
        assert!((contributions.get(12).unwrap() - -20.0).abs() < EPSILON);
    }

    #[test]
    fn test_zero_recycling_is_not_negative_zero() {
        let contributions = compute_contributions(&RawInputs::zeros(), None);
        assert!(contributions.get(12).unwrap().is_sign_positive());
    }

    #[test]
    fn test_rank_equal_values_keeps_order() {
        let contributions = ContributionVector::from([1.0; CATEGORY_COUNT]);
        let top = rank_top_contributors(&contributions, &labels(), 3);
        assert_eq!(top, vec!["Transport", "Electricity", "Water"]);
    }

    #[test]
    fn test_rank_negative_sorts_last() {
        let mut values = [0.0; CATEGORY_COUNT];
        values[12] = -1.0;
        values[5] = 2.0;
        let contributions = ContributionVector::from(values);
        let ranked = rank_top_contributors(&contributions, &labels(), CATEGORY_COUNT);
        assert_eq!(ranked[0], "Meals");
        assert_eq!(ranked[CATEGORY_COUNT - 1], "Recycling");
    }

    #[test]
    fn test_rank_respects_n() {
        let contributions = ContributionVector::from([1.0; CATEGORY_COUNT]);
        assert_eq!(rank_top_contributors(&contributions, &labels(), 1).len(), 1);
        assert_eq!(rank_top_contributors(&contributions, &labels(), 20).len(), CATEGORY_COUNT);
    }

    #[test]
    fn test_top_n_from_config() {
        let config = ScoringConfig {
            top_contributors: Some(5),
            ..ScoringConfig::default()
        };
        let result = assess(golden_inputs(), &config);
        assert_eq!(result.top_contributors.len(), 5);
    }

    #[test]
    fn test_assess_form_rejects_negative() {
        let mut raw: [&str; CATEGORY_COUNT] = [""; CATEGORY_COUNT];
        raw[6] = "-2";
        let result = assess_form(&raw, &ScoringConfig::default());
        assert!(matches!(result, Err(InputError::NegativeInput { .. })));
    }

    #[test]
    fn test_assess_form_golden_text() {
        let raw = [
            "10", "5", "100", "1", "2", "2", "5", "10", "3", "20", "2", "3", "",
        ];
        let result = assess_form(&raw, &ScoringConfig::default()).unwrap();
        assert!((result.score - 9.216917808219178).abs() < EPSILON);
    }

    #[test]
    fn test_positive_breakdown_filters() {
        let mut values = [0.0; CATEGORY_COUNT];
        values[0] = 10.0;
        values[12] = 7.0;
        let result = assess(inputs(values), &ScoringConfig::default());

        let all = result.breakdown();
        assert_eq!(all.len(), CATEGORY_COUNT);

        let positive = result.positive_breakdown();
        assert_eq!(positive.len(), 1);
        assert_eq!(positive[0].label, "Transport");
    }
}
