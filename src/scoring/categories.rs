use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of lifestyle categories the form asks about.
pub const CATEGORY_COUNT: usize = 13;

/// How often the quantity behind a category is measured.
///
/// Every answer is normalized to a per-day figure by dividing by the
/// cadence's day count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cadence {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Cadence {
    /// Days covered by one period of this cadence
    pub fn divisor(&self) -> f64 {
        match self {
            Cadence::Daily => 1.0,
            Cadence::Weekly => 7.0,
            Cadence::Monthly => 30.0,
            Cadence::Yearly => 365.0,
        }
    }

    /// Phrase used in questions, e.g. "per week"
    pub fn per_phrase(&self) -> &'static str {
        match self {
            Cadence::Daily => "per day",
            Cadence::Weekly => "per week",
            Cadence::Monthly => "per month",
            Cadence::Yearly => "per year",
        }
    }
}

impl fmt::Display for Cadence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Cadence::Daily => "daily",
            Cadence::Weekly => "weekly",
            Cadence::Monthly => "monthly",
            Cadence::Yearly => "yearly",
        };
        write!(f, "{}", name)
    }
}

/// One row of the fixed emission table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategorySpec {
    /// Display label, also the key recommendations are matched on
    pub label: &'static str,
    /// Compact label for chart axes
    pub short_label: &'static str,
    /// Question shown on the form
    pub question: &'static str,
    /// Unit the answer is given in
    pub unit: &'static str,
    /// kg CO2 per unit (negative for savings)
    pub emission_factor: f64,
    pub cadence: Cadence,
}

impl CategorySpec {
    /// Daily kg CO2 for `quantity` units of this category
    pub fn daily_contribution(&self, quantity: f64) -> f64 {
        quantity * self.emission_factor / self.cadence.divisor()
    }
}

pub const CATEGORIES: [CategorySpec; CATEGORY_COUNT] = [
    CategorySpec {
        label: "Transport",
        short_label: "Daily KM",
        question: "How many kilometres do you travel by car",
        unit: "km",
        emission_factor: 0.18,
        cadence: Cadence::Daily,
    },
    CategorySpec {
        label: "Electricity",
        short_label: "Electricity",
        question: "How much electricity do you use",
        unit: "kWh",
        emission_factor: 0.475,
        cadence: Cadence::Daily,
    },
    CategorySpec {
        label: "Water",
        short_label: "Water",
        question: "How much water do you use",
        unit: "litres",
        emission_factor: 0.0003,
        cadence: Cadence::Daily,
    },
    CategorySpec {
        label: "LPG",
        short_label: "LPG",
        question: "How many LPG cylinders do you use",
        unit: "cylinders",
        emission_factor: 42.3,
        cadence: Cadence::Monthly,
    },
    CategorySpec {
        label: "AC/Fan",
        short_label: "AC/Fan",
        question: "How many hours do you run the AC or fan",
        unit: "hours",
        emission_factor: 0.09,
        cadence: Cadence::Daily,
    },
    CategorySpec {
        label: "Meals",
        short_label: "Meals",
        question: "How many cooked meals do you eat",
        unit: "meals",
        emission_factor: 0.5,
        cadence: Cadence::Daily,
    },
    CategorySpec {
        label: "Plastic",
        short_label: "Plastic",
        question: "How many single-use plastic items do you throw away",
        unit: "items",
        emission_factor: 0.02,
        cadence: Cadence::Weekly,
    },
    CategorySpec {
        label: "Devices",
        short_label: "Devices",
        question: "How many hours do you spend on electronic devices",
        unit: "hours",
        emission_factor: 0.02,
        cadence: Cadence::Weekly,
    },
    CategorySpec {
        label: "Packaged Food",
        short_label: "Packaged",
        question: "How many packaged food units do you buy",
        unit: "units",
        emission_factor: 0.3,
        cadence: Cadence::Weekly,
    },
    CategorySpec {
        label: "Public Transport",
        short_label: "Public Trans",
        question: "How many kilometres do you travel by public transport",
        unit: "km",
        emission_factor: 0.05,
        cadence: Cadence::Weekly,
    },
    CategorySpec {
        label: "Flights",
        short_label: "Flights",
        question: "How many short flights do you take",
        unit: "flights",
        emission_factor: 150.0,
        cadence: Cadence::Yearly,
    },
    CategorySpec {
        label: "Meat",
        short_label: "Meat",
        question: "How many meat-rich meals do you eat",
        unit: "meals",
        emission_factor: 3.0,
        cadence: Cadence::Weekly,
    },
    CategorySpec {
        label: "Recycling",
        short_label: "Recycling",
        question: "How many kilograms of waste do you recycle",
        unit: "kg",
        emission_factor: -0.2,
        cadence: Cadence::Weekly,
    },
];

/// All category labels in form order
pub fn labels() -> [&'static str; CATEGORY_COUNT] {
    CATEGORIES.map(|c| c.label)
}

/// Form field key for a zero-based category index ("q1".."q13")
pub fn field_key(index: usize) -> String {
    format!("q{}", index + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cadence_divisors() {
        assert_eq!(Cadence::Daily.divisor(), 1.0);
        assert_eq!(Cadence::Weekly.divisor(), 7.0);
        assert_eq!(Cadence::Monthly.divisor(), 30.0);
        assert_eq!(Cadence::Yearly.divisor(), 365.0);
    }

    #[test]
    fn test_table_has_unique_labels() {
        let labels = labels();
        for (i, a) in labels.iter().enumerate() {
            for b in &labels[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_only_recycling_is_negative() {
        let negative: Vec<_> = CATEGORIES
            .iter()
            .filter(|c| c.emission_factor < 0.0)
            .map(|c| c.label)
            .collect();
        assert_eq!(negative, vec!["Recycling"]);
    }

    #[test]
    fn test_daily_contribution_weekly() {
        let recycling = CATEGORIES[12];
        assert!((recycling.daily_contribution(7.0) - -0.2).abs() < 1e-12);
    }

    #[test]
    fn test_daily_contribution_monthly() {
        let lpg = CATEGORIES[3];
        assert!((lpg.daily_contribution(1.0) - 1.41).abs() < 1e-12);
    }

    #[test]
    fn test_field_key() {
        assert_eq!(field_key(0), "q1");
        assert_eq!(field_key(12), "q13");
    }

    #[test]
    fn test_cadence_display() {
        assert_eq!(Cadence::Monthly.to_string(), "monthly");
        assert_eq!(Cadence::Yearly.per_phrase(), "per year");
    }
}
