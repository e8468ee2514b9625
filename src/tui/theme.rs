//! Centralized theme module for TUI color constants and styles

use ratatui::prelude::*;

use crate::config::ThemePreference;
use crate::scoring::{GaugeTier, Zone};

/// Terminal background luma above which the light palette is used
const LIGHT_LUMA_THRESHOLD: f32 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn colors(self) -> ThemeColors {
        match self {
            Theme::Light => ThemeColors::light(),
            Theme::Dark => ThemeColors::dark(),
        }
    }

    pub fn as_preference(self) -> ThemePreference {
        match self {
            Theme::Light => ThemePreference::Light,
            Theme::Dark => ThemePreference::Dark,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

/// Pick a concrete theme. `Auto` asks the terminal for its background
/// brightness and falls back to dark when the terminal doesn't answer.
pub fn resolve_theme(preference: ThemePreference) -> Theme {
    match preference {
        ThemePreference::Light => Theme::Light,
        ThemePreference::Dark => Theme::Dark,
        ThemePreference::Auto => match terminal_light::luma() {
            Ok(luma) if luma > LIGHT_LUMA_THRESHOLD => Theme::Light,
            _ => Theme::Dark,
        },
    }
}

/// Complete color palette for the TUI
#[derive(Debug, Clone)]
pub struct ThemeColors {
    // Zone colors (traffic light pattern)
    pub zone_low: Color,
    pub zone_moderate: Color,
    pub zone_high: Color,

    // Chart colors
    pub bar_positive: Color,
    pub bar_negative: Color,
    pub bar_empty: Color,
    pub progress_fill: Color,

    // Form colors
    pub field_focus: Style,
    pub field_error: Style,
    pub index_color: Color,
    pub row_alt_bg: Color,

    // General colors
    pub text: Color,
    pub muted: Color,
    pub title_color: Color,
    pub header_style: Style,

    // Status bar colors
    pub status_bar_bg: Color,
    pub status_key_color: Color,
    pub flash_success: Color,
    pub flash_error: Color,

    // Popup overlay colors
    pub popup_border: Color,
    pub popup_bg: Color,
}

impl ThemeColors {
    pub fn dark() -> Self {
        Self {
            zone_low: Color::Green,
            zone_moderate: Color::Yellow,
            zone_high: Color::Red,
            bar_positive: Color::Rgb(25, 118, 210),
            bar_negative: Color::Green,
            bar_empty: Color::DarkGray,
            progress_fill: Color::Cyan,
            field_focus: Style::new().fg(Color::Black).bg(Color::Cyan),
            field_error: Style::new().fg(Color::White).bg(Color::Red),
            index_color: Color::DarkGray,
            row_alt_bg: Color::Indexed(235),
            text: Color::White,
            muted: Color::Gray,
            title_color: Color::Cyan,
            header_style: Style::new().bold(),
            status_bar_bg: Color::Indexed(236),
            status_key_color: Color::Cyan,
            flash_success: Color::Green,
            flash_error: Color::Red,
            popup_border: Color::Cyan,
            popup_bg: Color::Indexed(234),
        }
    }

    pub fn light() -> Self {
        Self {
            zone_low: Color::Rgb(46, 125, 50),
            zone_moderate: Color::Rgb(230, 126, 0),
            zone_high: Color::Rgb(198, 40, 40),
            bar_positive: Color::Rgb(25, 118, 210),
            bar_negative: Color::Rgb(46, 125, 50),
            bar_empty: Color::Indexed(250),
            progress_fill: Color::Rgb(25, 118, 210),
            field_focus: Style::new().fg(Color::White).bg(Color::Rgb(25, 118, 210)),
            field_error: Style::new().fg(Color::White).bg(Color::Rgb(198, 40, 40)),
            index_color: Color::Indexed(244),
            row_alt_bg: Color::Indexed(254),
            text: Color::Black,
            muted: Color::Indexed(242),
            title_color: Color::Rgb(25, 118, 210),
            header_style: Style::new().bold(),
            status_bar_bg: Color::Indexed(253),
            status_key_color: Color::Rgb(25, 118, 210),
            flash_success: Color::Rgb(46, 125, 50),
            flash_error: Color::Rgb(198, 40, 40),
            popup_border: Color::Rgb(25, 118, 210),
            popup_bg: Color::Indexed(255),
        }
    }

    pub fn zone_color(&self, zone: Zone) -> Color {
        match zone {
            Zone::Low => self.zone_low,
            Zone::Moderate => self.zone_moderate,
            Zone::High => self.zone_high,
        }
    }

    pub fn gauge_color(&self, tier: GaugeTier) -> Color {
        match tier {
            GaugeTier::Green => self.zone_low,
            GaugeTier::Amber => self.zone_moderate,
            GaugeTier::Red => self.zone_high,
        }
    }
}
