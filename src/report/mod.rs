//! Paginated plain-text export of an assessment.

use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use chrono::NaiveDate;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::scoring::{Assessment, ALL_RECOMMENDATIONS};

/// Body lines per page, footer excluded
pub const PAGE_LINES: usize = 40;

const TITLE: &str = "Carbon Footprint Report";
const REPORT_WIDTH: usize = 64;

/// A laid-out report, ready to render or write.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub generated_on: NaiveDate,
    pub pages: Vec<Vec<String>>,
}

/// Collects lines and starts a new page whenever the current one is full.
struct PageWriter {
    pages: Vec<Vec<String>>,
    page_lines: usize,
}

impl PageWriter {
    fn new(page_lines: usize) -> Self {
        Self {
            pages: vec![Vec::new()],
            page_lines,
        }
    }

    fn line(&mut self, text: impl Into<String>) {
        let full = self
            .pages
            .last()
            .is_some_and(|page| page.len() >= self.page_lines);
        if full {
            self.pages.push(Vec::new());
        }
        if let Some(page) = self.pages.last_mut() {
            page.push(text.into());
        }
    }

    fn blank(&mut self) {
        self.line(String::new());
    }

    fn finish(self) -> Vec<Vec<String>> {
        self.pages
    }
}

fn centered(text: &str) -> String {
    let len = text.chars().count();
    let pad = REPORT_WIDTH.saturating_sub(len) / 2;
    format!("{}{}", " ".repeat(pad), text)
}

/// Lay out the report with the default page size.
pub fn build_report(assessment: &Assessment, generated_on: NaiveDate) -> Report {
    build_report_with_page_size(assessment, generated_on, PAGE_LINES)
}

pub fn build_report_with_page_size(
    assessment: &Assessment,
    generated_on: NaiveDate,
    page_lines: usize,
) -> Report {
    let mut w = PageWriter::new(page_lines.max(1));

    w.line(centered(TITLE));
    w.line(centered(&format!("Generated: {}", generated_on.format("%Y-%m-%d"))));
    w.blank();

    w.line(format!(
        "Your Carbon Footprint: {:.2} kg CO2/day",
        assessment.score
    ));
    w.line(format!(
        "Annual Estimate: {:.1} kg CO2/year",
        assessment.annual_projection()
    ));
    w.blank();
    w.line(format!("Zone: {}", assessment.zone.headline()));
    w.blank();

    w.line("Category Breakdown:");
    let positive = assessment.positive_breakdown();
    if positive.is_empty() {
        w.line("  (no emitting categories)");
    }
    for c in positive {
        w.line(format!("  {:<28}{:>10.2} kg CO2/day", format!("{}:", c.label), c.value));
    }
    w.blank();

    w.line("Recommendations:");
    for r in ALL_RECOMMENDATIONS.iter() {
        w.line(format!("  \u{2022} {}", r.text));
    }

    Report {
        generated_on,
        pages: w.finish(),
    }
}

impl Report {
    /// Plain text with a footer per page; pages are separated by form feeds.
    pub fn render(&self) -> String {
        let total = self.pages.len();
        self.pages
            .iter()
            .enumerate()
            .map(|(i, page)| {
                let mut text = page.join("\n");
                text.push_str("\n\n");
                text.push_str(&centered(&format!("Page {} of {}", i + 1, total)));
                text.push('\n');
                text
            })
            .collect::<Vec<_>>()
            .join("\x0c")
    }

    /// "carbon-footprint-report-2026-10-17.txt"
    pub fn file_name(&self) -> String {
        format!(
            "carbon-footprint-report-{}.txt",
            self.generated_on.format("%Y-%m-%d")
        )
    }

    /// Write the rendered report into `dir` atomically; returns the file path.
    pub fn write_to_dir(&self, dir: &Path) -> Result<PathBuf> {
        if !dir.exists() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create report directory {}", dir.display()))?;
        }

        let path = dir.join(self.file_name());
        let mut file = AtomicWriteFile::open(&path)
            .with_context(|| format!("Failed to open {} for writing", path.display()))?;
        file.write_all(self.render().as_bytes())
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
        file.commit()
            .with_context(|| format!("Failed to save report to {}", path.display()))?;

        Ok(path)
    }
}

/// Build today's report and write it into `dir`.
pub fn export_report(assessment: &Assessment, dir: &Path) -> Result<PathBuf> {
    let today = chrono::Local::now().date_naive();
    build_report(assessment, today).write_to_dir(dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{assess, RawInputs, ScoringConfig, CATEGORY_COUNT};
    use std::env;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
    }

    fn golden() -> Assessment {
        let inputs = RawInputs::new([
            10.0, 5.0, 100.0, 1.0, 2.0, 2.0, 5.0, 10.0, 3.0, 20.0, 2.0, 3.0, 0.0,
        ])
        .unwrap();
        assess(inputs, &ScoringConfig::default())
    }

    #[test]
    fn test_report_contents() {
        let report = build_report(&golden(), date());
        assert_eq!(report.pages.len(), 1);

        let text = report.render();
        assert!(text.contains("Carbon Footprint Report"));
        assert!(text.contains("Generated: 2026-10-17"));
        assert!(text.contains("Your Carbon Footprint: 9.22 kg CO2/day"));
        assert!(text.contains("Annual Estimate: 3364.2 kg CO2/year"));
        assert!(text.contains("Zone: Low emissions: Excellent!"));
        assert!(text.contains("Page 1 of 1"));
        assert!(!text.contains('\x0c'));
    }

    #[test]
    fn test_report_lists_positive_categories_only() {
        let mut values = [0.0; CATEGORY_COUNT];
        values[0] = 10.0;
        values[12] = 7.0;
        let assessment = assess(RawInputs::new(values).unwrap(), &ScoringConfig::default());

        let text = build_report(&assessment, date()).render();
        assert!(text.contains("Transport:"));
        assert!(!text.contains("Recycling:"));
        assert!(!text.contains("Electricity:"));
    }

    #[test]
    fn test_report_always_has_all_recommendations() {
        let text = build_report(&golden(), date()).render();
        for r in ALL_RECOMMENDATIONS.iter() {
            assert!(text.contains(r.text));
        }
    }

    #[test]
    fn test_report_paginates() {
        let report = build_report_with_page_size(&golden(), date(), 10);
        assert!(report.pages.len() > 1);
        assert!(report.pages.iter().all(|p| p.len() <= 10));

        let text = report.render();
        let total = report.pages.len();
        assert_eq!(text.matches('\x0c').count(), total - 1);
        assert!(text.contains(&format!("Page {} of {}", total, total)));
    }

    #[test]
    fn test_file_name() {
        let report = build_report(&golden(), date());
        assert_eq!(report.file_name(), "carbon-footprint-report-2026-10-17.txt");
    }

    #[test]
    fn test_write_to_dir() {
        let dir = env::temp_dir().join("footprint_test_reports");
        let report = build_report(&golden(), date());

        let path = report.write_to_dir(&dir).unwrap();
        assert_eq!(path, dir.join("carbon-footprint-report-2026-10-17.txt"));
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, report.render());

        let _ = std::fs::remove_file(&path);
    }
}
