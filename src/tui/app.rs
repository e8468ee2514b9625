use crate::config::Config;
use crate::form::FormState;
use crate::scoring::{Assessment, ScoringConfig, CATEGORY_COUNT};
use crate::state::SavedState;
use crate::tui::theme::{Theme, ThemeColors};
use std::path::PathBuf;
use std::time::{Duration, Instant};

const FLASH_DURATION: Duration = Duration::from_secs(3);
const ERROR_HIGHLIGHT_DURATION: Duration = Duration::from_secs(2);
const SAVED_BADGE_DURATION: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Screen {
    Form,
    Result,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputMode {
    Normal,
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SaveStatus {
    Idle,
    /// Edited at this instant, waiting for the debounce
    Pending(Instant),
    /// Saved at this instant
    Saved(Instant),
}

pub struct App {
    pub form: FormState,
    pub focused: usize,
    pub screen: Screen,
    pub input_mode: InputMode,
    pub assessment: Option<Assessment>,
    pub scoring: ScoringConfig,
    pub theme: Theme,
    pub colors: ThemeColors,
    pub state: SavedState,
    pub state_path: PathBuf,
    pub report_dir: PathBuf,
    pub autosave_delay: Duration,
    pub save_status: SaveStatus,
    pub error_fields: Vec<usize>,
    pub error_since: Option<Instant>,
    pub flash_message: Option<(String, Instant)>,
    pub last_export: Option<PathBuf>,
    pub should_quit: bool,
}

impl App {
    /// Build the app from saved state; the saved form (if any) pre-fills the fields.
    pub fn new(state: SavedState, state_path: PathBuf, config: &Config, theme: Theme) -> Self {
        let form = FormState::from_fields(state.form_fields());

        Self {
            form,
            focused: 0,
            screen: Screen::Form,
            input_mode: InputMode::Normal,
            assessment: None,
            scoring: config.effective_scoring(),
            theme,
            colors: theme.colors(),
            state,
            state_path,
            report_dir: config.report_dir(),
            autosave_delay: config.autosave_delay(),
            save_status: SaveStatus::Idle,
            error_fields: Vec::new(),
            error_since: None,
            flash_message: None,
            last_export: None,
            should_quit: false,
        }
    }

    pub fn show_flash(&mut self, msg: String) {
        self.flash_message = Some((msg, Instant::now()));
    }

    pub fn next_field(&mut self) {
        self.focused = (self.focused + 1) % CATEGORY_COUNT;
    }

    pub fn previous_field(&mut self) {
        self.focused = (self.focused + CATEGORY_COUNT - 1) % CATEGORY_COUNT;
    }

    /// Characters a numeric field accepts, exponent and sign included
    pub fn accepts_char(c: char) -> bool {
        c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E')
    }

    pub fn input_char(&mut self, c: char) {
        if Self::accepts_char(c) {
            self.form.push_char(self.focused, c);
            self.mark_dirty();
        }
    }

    pub fn backspace(&mut self) {
        self.form.pop_char(self.focused);
        self.mark_dirty();
    }

    pub fn clear_field(&mut self) {
        self.form.set_field(self.focused, String::new());
        self.mark_dirty();
    }

    fn mark_dirty(&mut self) {
        self.save_status = SaveStatus::Pending(Instant::now());
    }

    pub fn is_error_field(&self, index: usize) -> bool {
        self.error_fields.contains(&index)
    }

    /// Validate and score the form. On rejection the offending fields are
    /// cleared and highlighted, and focus jumps to the first of them.
    pub fn calculate(&mut self) {
        match self.form.submit(&self.scoring) {
            Ok(assessment) => {
                self.assessment = Some(assessment);
                self.screen = Screen::Result;
                self.error_fields.clear();
                self.error_since = None;
                if matches!(self.save_status, SaveStatus::Pending(_)) {
                    self.persist_form();
                }
            }
            Err(e) => {
                self.error_fields = e.fields().to_vec();
                self.error_since = Some(Instant::now());
                if let Some(&first) = self.error_fields.first() {
                    self.focused = first;
                }
                self.assessment = None;
                self.show_flash(format!("Error: {}", e));
                self.mark_dirty();
            }
        }
    }

    /// Leave the result screen and edit the answers again
    pub fn back_to_form(&mut self) {
        self.screen = Screen::Form;
    }

    /// Clear every field and the saved form, then return to the form screen
    pub fn restart(&mut self) {
        self.form.clear();
        self.assessment = None;
        self.screen = Screen::Form;
        self.focused = 0;
        self.error_fields.clear();
        self.error_since = None;
        self.state.clear_form();
        self.save_status = SaveStatus::Idle;

        match crate::state::save_state(&self.state_path, &self.state) {
            Ok(()) => self.show_flash("Form cleared".to_string()),
            Err(e) => self.show_flash(format!("Failed to clear saved form: {}", e)),
        }
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        self.colors = self.theme.colors();
        self.state.theme = Some(self.theme.as_preference());

        if let Err(e) = crate::state::save_state(&self.state_path, &self.state) {
            self.show_flash(format!("Failed to save theme: {}", e));
        }
    }

    /// Write the current form text to the state file
    pub fn persist_form(&mut self) {
        self.state.save_form(self.form.fields());
        match crate::state::save_state(&self.state_path, &self.state) {
            Ok(()) => self.save_status = SaveStatus::Saved(Instant::now()),
            Err(e) => {
                self.save_status = SaveStatus::Idle;
                self.show_flash(format!("Failed to save form: {}", e));
            }
        }
    }

    pub fn export_report(&mut self) {
        let Some(assessment) = self.assessment.as_ref() else {
            self.show_flash("Error: nothing to export yet".to_string());
            return;
        };

        match crate::report::export_report(assessment, &self.report_dir) {
            Ok(path) => {
                self.show_flash(format!("Exported: {}", path.display()));
                self.last_export = Some(path);
            }
            Err(e) => self.show_flash(format!("Failed to export report: {}", e)),
        }
    }

    pub fn open_last_export(&mut self) {
        let Some(path) = self.last_export.clone() else {
            self.show_flash("Error: export a report first (e)".to_string());
            return;
        };

        match crate::browser::open_path(&path) {
            Ok(()) => self.show_flash(format!("Opened: {}", path.display())),
            Err(e) => self.show_flash(format!("Failed to open report: {}", e)),
        }
    }

    pub fn show_help(&mut self) {
        self.input_mode = InputMode::Help;
    }

    pub fn dismiss_help(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    /// Periodic housekeeping: debounced autosave and expiry of transient
    /// messages and highlights.
    pub fn tick(&mut self, now: Instant) {
        match self.save_status {
            SaveStatus::Pending(edited) if now.duration_since(edited) >= self.autosave_delay => {
                self.persist_form();
            }
            SaveStatus::Saved(saved) if now.duration_since(saved) >= SAVED_BADGE_DURATION => {
                self.save_status = SaveStatus::Idle;
            }
            _ => {}
        }

        if let Some(since) = self.error_since {
            if now.duration_since(since) >= ERROR_HIGHLIGHT_DURATION {
                self.error_fields.clear();
                self.error_since = None;
            }
        }

        if let Some((_, shown)) = self.flash_message {
            if now.duration_since(shown) >= FLASH_DURATION {
                self.flash_message = None;
            }
        }
    }

    /// Write any pending edit before exiting
    pub fn flush(&mut self) {
        if matches!(self.save_status, SaveStatus::Pending(_)) {
            self.persist_form();
        }
    }
}
