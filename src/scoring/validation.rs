use serde::Serialize;
use std::fmt;

use super::categories::{CATEGORIES, CATEGORY_COUNT};
use super::config::ScoringConfig;

/// Rejection of a batch of form answers.
#[derive(Debug, Clone, PartialEq)]
pub enum InputError {
    /// One or more answers parsed to a negative number. Holds every
    /// offending zero-based field index, in form order.
    NegativeInput { fields: Vec<usize> },
}

impl InputError {
    /// Indices of the fields the caller should clear before re-prompting
    pub fn fields(&self) -> &[usize] {
        match self {
            InputError::NegativeInput { fields } => fields,
        }
    }
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::NegativeInput { fields } => {
                let names: Vec<&str> = fields
                    .iter()
                    .filter_map(|&i| CATEGORIES.get(i).map(|c| c.label))
                    .collect();
                write!(
                    f,
                    "Please enter valid positive numbers only (negative value for {})",
                    names.join(", ")
                )
            }
        }
    }
}

impl std::error::Error for InputError {}

/// Thirteen validated, non-negative answers in category order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RawInputs([f64; CATEGORY_COUNT]);

impl RawInputs {
    /// Build from already-numeric answers. Non-finite values count as 0,
    /// the same as unparseable text; any negative value rejects the batch.
    pub fn new(values: [f64; CATEGORY_COUNT]) -> Result<Self, InputError> {
        let values = values.map(|v| if v.is_finite() { v } else { 0.0 });
        let fields: Vec<usize> = values
            .iter()
            .enumerate()
            .filter(|(_, v)| **v < 0.0)
            .map(|(i, _)| i)
            .collect();

        if fields.is_empty() {
            Ok(Self(values))
        } else {
            Err(InputError::NegativeInput { fields })
        }
    }

    pub fn zeros() -> Self {
        Self([0.0; CATEGORY_COUNT])
    }

    pub fn values(&self) -> &[f64; CATEGORY_COUNT] {
        &self.0
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.0.get(index).copied()
    }
}

/// Parse one form field the lenient way: surrounding whitespace is ignored
/// and the longest numeric prefix wins ("12kg" is 12). Empty, unparseable or
/// out-of-range text is 0.
pub fn parse_field(text: &str) -> f64 {
    let s = text.trim();
    let bytes = s.as_bytes();
    let len = bytes.len();

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }

    let int_start = end;
    while end < len && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < len && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < len && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        end = frac_end;
    }

    if digits == 0 {
        return 0.0;
    }

    // Exponent only counts when at least one digit follows it
    if end < len && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < len && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits = exp_end;
        while exp_end < len && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits {
            end = exp_end;
        }
    }

    match s[..end].parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

/// Turn the thirteen raw field texts into validated inputs.
///
/// All-or-nothing: if any field is negative the whole batch is rejected and
/// the error lists every offending field.
pub fn validate<S: AsRef<str>>(raw: &[S; CATEGORY_COUNT]) -> Result<RawInputs, InputError> {
    RawInputs::new(std::array::from_fn(|i| parse_field(raw[i].as_ref())))
}

/// Validate scoring configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_scoring(config: &ScoringConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Some(floor) = config.contribution_floor {
        if floor > 0.0 {
            errors.push(format!(
                "scoring.contribution_floor: must be zero or negative, got {}",
                floor
            ));
        }
    }

    if let Some(n) = config.top_contributors {
        if n == 0 || n > CATEGORY_COUNT {
            errors.push(format!(
                "scoring.top_contributors: must be between 1 and {}, got {}",
                CATEGORY_COUNT, n
            ));
        }
    }

    if let Some(ref zones) = config.zones {
        if zones.low_max < 0.0 {
            errors.push("scoring.zones.low_max: must be non-negative".to_string());
        }
        if zones.moderate_max <= zones.low_max {
            errors.push(format!(
                "scoring.zones.moderate_max: must be greater than low_max ({})",
                zones.low_max
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::ZoneConfig;

    fn fields(values: &[&str]) -> [String; CATEGORY_COUNT] {
        std::array::from_fn(|i| values.get(i).map(|s| s.to_string()).unwrap_or_default())
    }

    #[test]
    fn test_parse_field_plain_numbers() {
        assert_eq!(parse_field("10"), 10.0);
        assert_eq!(parse_field("2.5"), 2.5);
        assert_eq!(parse_field("  7  "), 7.0);
        assert_eq!(parse_field(".5"), 0.5);
        assert_eq!(parse_field("1e2"), 100.0);
    }

    #[test]
    fn test_parse_field_numeric_prefix() {
        assert_eq!(parse_field("12kg"), 12.0);
        assert_eq!(parse_field("3.5 hours"), 3.5);
        assert_eq!(parse_field("4e"), 4.0);
        assert_eq!(parse_field("1,5"), 1.0);
    }

    #[test]
    fn test_parse_field_garbage_is_zero() {
        assert_eq!(parse_field(""), 0.0);
        assert_eq!(parse_field("   "), 0.0);
        assert_eq!(parse_field("abc"), 0.0);
        assert_eq!(parse_field("."), 0.0);
        assert_eq!(parse_field("-"), 0.0);
        assert_eq!(parse_field("1e999"), 0.0);
    }

    #[test]
    fn test_parse_field_negative() {
        assert_eq!(parse_field("-3"), -3.0);
        assert_eq!(parse_field("-0.5x"), -0.5);
    }

    #[test]
    fn test_validate_all_empty_is_zero() {
        let inputs = validate(&fields(&[])).unwrap();
        assert_eq!(inputs, RawInputs::zeros());
    }

    #[test]
    fn test_validate_keeps_category_order() {
        let inputs = validate(&fields(&["10", "5", "", "1"])).unwrap();
        assert_eq!(inputs.get(0), Some(10.0));
        assert_eq!(inputs.get(1), Some(5.0));
        assert_eq!(inputs.get(2), Some(0.0));
        assert_eq!(inputs.get(3), Some(1.0));
        assert_eq!(inputs.get(13), None);
    }

    #[test]
    fn test_validate_negative_rejects_whole_batch() {
        let result = validate(&fields(&["10", "5", "-1", "1"]));
        assert_eq!(result, Err(InputError::NegativeInput { fields: vec![2] }));
    }

    #[test]
    fn test_validate_reports_every_negative_field() {
        let mut raw = fields(&[]);
        raw[0] = "-1".to_string();
        raw[12] = "-4".to_string();
        let err = validate(&raw).unwrap_err();
        assert_eq!(err.fields(), &[0, 12]);
        let message = err.to_string();
        assert!(message.contains("Transport"));
        assert!(message.contains("Recycling"));
    }

    #[test]
    fn test_validate_negative_zero_accepted() {
        let inputs = validate(&fields(&["-0"])).unwrap();
        assert_eq!(inputs.get(0), Some(0.0));
    }

    #[test]
    fn test_raw_inputs_new_non_finite_is_zero() {
        let mut values = [1.0; CATEGORY_COUNT];
        values[4] = f64::NAN;
        values[5] = f64::INFINITY;
        let inputs = RawInputs::new(values).unwrap();
        assert_eq!(inputs.get(4), Some(0.0));
        assert_eq!(inputs.get(5), Some(0.0));
    }

    #[test]
    fn test_valid_scoring_config() {
        assert!(validate_scoring(&ScoringConfig::default()).is_ok());
    }

    #[test]
    fn test_empty_scoring_config() {
        let config = ScoringConfig {
            contribution_floor: None,
            top_contributors: None,
            zones: None,
        };
        assert!(validate_scoring(&config).is_ok());
    }

    #[test]
    fn test_positive_floor_rejected() {
        let config = ScoringConfig {
            contribution_floor: Some(1.0),
            top_contributors: None,
            zones: None,
        };
        let errors = validate_scoring(&config).unwrap_err();
        assert!(errors[0].contains("scoring.contribution_floor"));
    }

    #[test]
    fn test_top_contributors_out_of_range() {
        for n in [0, 14] {
            let config = ScoringConfig {
                contribution_floor: None,
                top_contributors: Some(n),
                zones: None,
            };
            let errors = validate_scoring(&config).unwrap_err();
            assert!(errors[0].contains("scoring.top_contributors"));
        }
    }

    #[test]
    fn test_inverted_zones_rejected() {
        let config = ScoringConfig {
            contribution_floor: None,
            top_contributors: None,
            zones: Some(ZoneConfig {
                low_max: 30.0,
                moderate_max: 20.0,
            }),
        };
        let errors = validate_scoring(&config).unwrap_err();
        assert!(errors[0].contains("scoring.zones.moderate_max"));
    }

    #[test]
    fn test_collects_all_errors() {
        let config = ScoringConfig {
            contribution_floor: Some(5.0),
            top_contributors: Some(0),
            zones: Some(ZoneConfig {
                low_max: -1.0,
                moderate_max: -2.0,
            }),
        };
        let errors = validate_scoring(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
    }
}
