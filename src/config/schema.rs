use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::scoring::ScoringConfig;

/// Default debounce between the last keystroke and saving the form
pub const DEFAULT_AUTOSAVE_DELAY: &str = "1s";

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Scoring knobs; defaults apply when the section is missing
    #[serde(default)]
    pub scoring: Option<ScoringConfig>,

    /// Color theme for the terminal UI
    #[serde(default)]
    pub theme: Option<ThemePreference>,

    /// How long the form waits after an edit before saving, e.g. "1s", "500ms"
    #[serde(default)]
    pub autosave_delay: Option<String>,

    /// Directory exported reports are written to (default: current directory)
    #[serde(default)]
    pub report_dir: Option<PathBuf>,
}

impl Config {
    /// Config with every optional section spelled out, used by `init`
    pub fn with_defaults() -> Self {
        Self {
            scoring: Some(ScoringConfig::default()),
            theme: Some(ThemePreference::Auto),
            autosave_delay: Some(DEFAULT_AUTOSAVE_DELAY.to_string()),
            report_dir: Some(PathBuf::from(".")),
        }
    }

    pub fn effective_scoring(&self) -> ScoringConfig {
        self.scoring.clone().unwrap_or_default()
    }

    pub fn theme_preference(&self) -> ThemePreference {
        self.theme.unwrap_or_default()
    }

    /// Parsed autosave delay. Invalid values are caught by `validate_config`
    /// at startup, so this falls back to the default instead of failing.
    pub fn autosave_delay(&self) -> Duration {
        self.autosave_delay
            .as_deref()
            .and_then(|s| humantime::parse_duration(s).ok())
            .unwrap_or(Duration::from_secs(1))
    }

    pub fn report_dir(&self) -> PathBuf {
        self.report_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    /// Detect from the terminal background
    #[default]
    Auto,
    Light,
    Dark,
}
