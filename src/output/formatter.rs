use owo_colors::OwoColorize;
use serde::Serialize;
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use crate::scoring::{Assessment, Cadence, GaugeTier, Zone, CATEGORIES};

/// Bar width used when stdout is not a terminal
const DEFAULT_BAR_WIDTH: usize = 30;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width, defaulting to None for pipes
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// "9.22 kg CO2/day"
pub fn format_kg(value: f64) -> String {
    format!("{:.2} kg CO\u{2082}/day", value)
}

/// Zone headline, daily score, annual projection and meter reading
pub fn format_summary(assessment: &Assessment, use_colors: bool) -> String {
    let headline = assessment.zone.headline();
    let score = format_kg(assessment.score);
    let annual = format!("\u{2248} {:.1} kg/year", assessment.annual_projection());
    let gauge = assessment.gauge();
    let meter = format!("Meter: {}", gauge.label());

    if use_colors {
        let headline = match assessment.zone {
            Zone::Low => headline.green().bold().to_string(),
            Zone::Moderate => headline.yellow().bold().to_string(),
            Zone::High => headline.red().bold().to_string(),
        };
        let meter = match gauge.tier {
            GaugeTier::Green => meter.green().to_string(),
            GaugeTier::Amber => meter.yellow().to_string(),
            GaugeTier::Red => meter.red().to_string(),
        };
        format!("{}\n{}\n{}\n{}", headline, score.bold(), annual.dimmed(), meter)
    } else {
        format!("{}\n{}\n{}\n{}", headline, score, annual, meter)
    }
}

/// Bar for `value` scaled against `max_abs`, `width` cells at most
fn bar(value: f64, max_abs: f64, width: usize) -> String {
    let ratio = if max_abs > 0.0 {
        (value.abs() / max_abs).min(1.0)
    } else {
        0.0
    };
    let filled = (ratio * width as f64).round() as usize;
    let glyph = if value < 0.0 { "\u{2592}" } else { "\u{2588}" };
    glyph.repeat(filled)
}

/// Every category as a horizontal bar, zero and negative values included.
/// Negative (saving) bars use a lighter glyph.
pub fn format_bar_chart(assessment: &Assessment, use_colors: bool) -> String {
    let label_width = CATEGORIES
        .iter()
        .map(|c| c.short_label.chars().count())
        .max()
        .unwrap_or(0);

    // label + value column + separators
    let fixed_width = label_width + 2 + 10 + 2;
    let bar_width = match get_terminal_width() {
        Some(width) if width > fixed_width + 10 => (width - fixed_width).min(50),
        Some(_) => 10,
        None => DEFAULT_BAR_WIDTH,
    };

    let max_abs = assessment
        .contributions
        .iter()
        .map(f64::abs)
        .fold(0.0_f64, f64::max);

    CATEGORIES
        .iter()
        .zip(assessment.contributions.iter())
        .map(|(spec, value)| {
            let label = format!("{:<width$}", spec.short_label, width = label_width);
            let bar_str = bar(value, max_abs, bar_width);
            let bar_padded = format!("{:<width$}", bar_str, width = bar_width);
            let value_str = format!("{:>10.2}", value);

            if use_colors {
                let bar_colored = if value < 0.0 {
                    bar_padded.green().to_string()
                } else if value == 0.0 {
                    bar_padded.dimmed().to_string()
                } else {
                    bar_padded.blue().to_string()
                };
                format!("{}  {}  {}", label, bar_colored, value_str)
            } else {
                format!("{}  {}  {}", label, bar_padded, value_str)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Share of each emitting category in the positive total (pie chart data).
/// Zero and negative categories are left out.
pub fn format_share_chart(assessment: &Assessment, use_colors: bool) -> String {
    let positive = assessment.positive_breakdown();
    if positive.is_empty() {
        return "No emitting categories.".to_string();
    }

    let total: f64 = positive.iter().map(|c| c.value).sum();

    positive
        .iter()
        .map(|c| {
            let share = c.value / total * 100.0;
            let line = format!("{:<16} {:>8.2} kg  {:>5.1}%", c.label, c.value, share);
            if use_colors && assessment.top_contributors.contains(&c.label) {
                line.bold().to_string()
            } else {
                line
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_recommendations(assessment: &Assessment, use_colors: bool) -> String {
    let heading = if use_colors {
        "Recommendations:".bold().to_string()
    } else {
        "Recommendations:".to_string()
    };

    let tips: Vec<String> = assessment
        .recommendations()
        .iter()
        .map(|r| format!("  - {}", r.text))
        .collect();

    format!("{}\n{}", heading, tips.join("\n"))
}

/// Full human-readable result: summary, both charts and the tips
pub fn format_assessment(assessment: &Assessment, use_colors: bool) -> String {
    let section = |title: &str| {
        if use_colors {
            title.cyan().bold().to_string()
        } else {
            title.to_string()
        }
    };

    format!(
        "{}\n\n{}\n{}\n\n{}\n{}\n\n{}",
        format_summary(assessment, use_colors),
        section("Share of emissions"),
        format_share_chart(assessment, use_colors),
        section("Per category (kg CO\u{2082}/day)"),
        format_bar_chart(assessment, use_colors),
        format_recommendations(assessment, use_colors),
    )
}

/// Tab-separated `label<TAB>kg/day` per category plus a Total row, for scripting
pub fn format_tsv(assessment: &Assessment) -> String {
    let mut lines: Vec<String> = assessment
        .breakdown()
        .iter()
        .map(|c| format!("{}\t{:.4}", c.label, c.value))
        .collect();
    lines.push(format!("Total\t{:.4}", assessment.score));
    lines.join("\n")
}

#[derive(Serialize)]
struct JsonCategory {
    label: &'static str,
    input: f64,
    unit: &'static str,
    cadence: Cadence,
    daily_kg: f64,
}

#[derive(Serialize)]
struct JsonAssessment<'a> {
    score: f64,
    annual_projection: f64,
    zone: Zone,
    zone_text: &'static str,
    gauge_percentage: f64,
    gauge_tier: GaugeTier,
    top_contributors: &'a [&'static str],
    categories: Vec<JsonCategory>,
    recommendations: Vec<&'static str>,
}

/// Machine-readable result
pub fn format_json(assessment: &Assessment) -> anyhow::Result<String> {
    let gauge = assessment.gauge();
    let categories = CATEGORIES
        .iter()
        .enumerate()
        .map(|(i, spec)| JsonCategory {
            label: spec.label,
            input: assessment.inputs.get(i).unwrap_or(0.0),
            unit: spec.unit,
            cadence: spec.cadence,
            daily_kg: assessment.contributions.get(i).unwrap_or(0.0),
        })
        .collect();

    let json = JsonAssessment {
        score: assessment.score,
        annual_projection: assessment.annual_projection(),
        zone: assessment.zone,
        zone_text: assessment.zone.headline(),
        gauge_percentage: gauge.percentage,
        gauge_tier: gauge.tier,
        top_contributors: &assessment.top_contributors,
        categories,
        recommendations: assessment.recommendations().iter().map(|r| r.text).collect(),
    };

    Ok(serde_json::to_string_pretty(&json)?)
}

/// The fixed emission table, one row per category
pub fn format_categories(use_colors: bool) -> String {
    let header = format!(
        "{:>3}  {:<16} {:>9}  {:<8} {}",
        "#", "Category", "kg/unit", "Cadence", "Unit"
    );
    let header = if use_colors {
        header.bold().to_string()
    } else {
        header
    };

    let rows: Vec<String> = CATEGORIES
        .iter()
        .enumerate()
        .map(|(i, spec)| {
            format!(
                "{:>3}  {:<16} {:>9}  {:<8} {}",
                format!("{}.", i + 1),
                spec.label,
                spec.emission_factor,
                spec.cadence.to_string(),
                spec.unit
            )
        })
        .collect();

    format!("{}\n{}", header, rows.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{assess, RawInputs, ScoringConfig, CATEGORY_COUNT};

    fn golden() -> Assessment {
        let inputs = RawInputs::new([
            10.0, 5.0, 100.0, 1.0, 2.0, 2.0, 5.0, 10.0, 3.0, 20.0, 2.0, 3.0, 0.0,
        ])
        .unwrap();
        assess(inputs, &ScoringConfig::default())
    }

    fn with_recycling() -> Assessment {
        let mut values = [0.0; CATEGORY_COUNT];
        values[0] = 10.0;
        values[12] = 7.0;
        assess(RawInputs::new(values).unwrap(), &ScoringConfig::default())
    }

    #[test]
    fn test_format_kg() {
        assert_eq!(format_kg(9.216917808219178), "9.22 kg CO\u{2082}/day");
        assert_eq!(format_kg(0.0), "0.00 kg CO\u{2082}/day");
    }

    #[test]
    fn test_format_summary_plain() {
        let result = format_summary(&golden(), false);
        let lines: Vec<&str> = result.lines().collect();
        assert_eq!(lines[0], "Low emissions: Excellent!");
        assert_eq!(lines[1], "9.22 kg CO\u{2082}/day");
        assert_eq!(lines[2], "\u{2248} 3364.2 kg/year");
        assert_eq!(lines[3], "Meter: 37%");
    }

    #[test]
    fn test_bar_scaling() {
        assert_eq!(bar(5.0, 10.0, 10).chars().count(), 5);
        assert_eq!(bar(10.0, 10.0, 10).chars().count(), 10);
        assert_eq!(bar(0.0, 10.0, 10), "");
        assert_eq!(bar(1.0, 0.0, 10), "");
        assert!(bar(-5.0, 10.0, 10).starts_with('\u{2592}'));
    }

    #[test]
    fn test_bar_chart_has_every_category() {
        let result = format_bar_chart(&with_recycling(), false);
        let lines: Vec<&str> = result.lines().collect();
        assert_eq!(lines.len(), CATEGORY_COUNT);
        assert!(lines[0].starts_with("Daily KM"));
        assert!(lines[0].ends_with("1.80"));
        assert!(lines[1].ends_with("0.00"));
        assert!(lines[12].starts_with("Recycling"));
        assert!(lines[12].ends_with("-0.20"));
    }

    #[test]
    fn test_share_chart_positive_only() {
        let result = format_share_chart(&with_recycling(), false);
        let lines: Vec<&str> = result.lines().collect();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("Transport"));
        assert!(lines[0].ends_with("100.0%"));
    }

    #[test]
    fn test_share_chart_empty() {
        let result = assess(RawInputs::zeros(), &ScoringConfig::default());
        assert_eq!(format_share_chart(&result, false), "No emitting categories.");
    }

    #[test]
    fn test_format_recommendations() {
        let result = format_recommendations(&golden(), false);
        assert!(result.starts_with("Recommendations:"));
        assert!(result.contains("Use public transport"));
        assert!(result.contains("LED bulbs"));
        assert!(result.contains("pressure cookers"));
        assert!(!result.contains("Plant trees"));
    }

    #[test]
    fn test_format_assessment_sections() {
        let result = format_assessment(&golden(), false);
        assert!(result.contains("Share of emissions"));
        assert!(result.contains("Per category"));
        assert!(result.contains("Recommendations:"));
    }

    #[test]
    fn test_format_tsv() {
        let result = format_tsv(&with_recycling());
        let lines: Vec<&str> = result.lines().collect();
        assert_eq!(lines.len(), CATEGORY_COUNT + 1);
        assert_eq!(lines[0], "Transport\t1.8000");
        assert_eq!(lines[12], "Recycling\t-0.2000");
        assert_eq!(lines[13], "Total\t1.6000");
    }

    #[test]
    fn test_format_json() {
        let json = format_json(&golden()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["zone"], "low");
        assert_eq!(value["gauge_tier"], "green");
        assert_eq!(value["categories"].as_array().unwrap().len(), CATEGORY_COUNT);
        assert_eq!(value["categories"][3]["cadence"], "monthly");
        assert_eq!(value["top_contributors"][0], "Electricity");
        assert!((value["score"].as_f64().unwrap() - 9.216917808219178).abs() < 1e-9);
    }

    #[test]
    fn test_format_categories() {
        let result = format_categories(false);
        let lines: Vec<&str> = result.lines().collect();
        assert_eq!(lines.len(), CATEGORY_COUNT + 1);
        assert!(lines[4].contains("LPG"));
        assert!(lines[4].contains("monthly"));
        assert!(lines[13].contains("-0.2"));
    }
}
