use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::config::ThemePreference;
use crate::scoring::categories::{field_key, CATEGORY_COUNT};

pub const STATE_VERSION: u32 = 1;

/// Everything remembered between runs. Only raw field text is kept, never
/// computed results.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SavedState {
    pub version: u32,
    #[serde(default)]
    pub theme: Option<ThemePreference>,
    #[serde(default)]
    pub form: Option<FormDraft>,
}

/// Field text as the user last typed it, keyed "q1".."q13".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FormDraft {
    pub saved_at: DateTime<Utc>,
    #[serde(default)]
    pub fields: BTreeMap<String, String>,
}

impl FormDraft {
    /// Capture the current field text. Empty fields are not stored.
    pub fn from_fields(fields: &[String; CATEGORY_COUNT]) -> Self {
        let fields = fields
            .iter()
            .enumerate()
            .filter(|(_, text)| !text.is_empty())
            .map(|(i, text)| (field_key(i), text.clone()))
            .collect();

        Self {
            saved_at: Utc::now(),
            fields,
        }
    }

    /// Field text in form order; unknown keys are ignored, missing keys are empty
    pub fn to_fields(&self) -> [String; CATEGORY_COUNT] {
        std::array::from_fn(|i| self.fields.get(&field_key(i)).cloned().unwrap_or_default())
    }

    pub fn is_empty(&self) -> bool {
        self.fields.values().all(|v| v.is_empty())
    }
}

impl Default for SavedState {
    fn default() -> Self {
        Self::new()
    }
}

impl SavedState {
    pub fn new() -> Self {
        Self {
            version: STATE_VERSION,
            theme: None,
            form: None,
        }
    }

    /// Replace the saved form with the given field text
    pub fn save_form(&mut self, fields: &[String; CATEGORY_COUNT]) {
        self.form = Some(FormDraft::from_fields(fields));
    }

    /// Drop the saved form, keeping other preferences.
    /// Returns true if a form was saved before.
    pub fn clear_form(&mut self) -> bool {
        self.form.take().is_some()
    }

    /// Saved field text, or all-empty if nothing was saved
    pub fn form_fields(&self) -> [String; CATEGORY_COUNT] {
        self.form
            .as_ref()
            .map(FormDraft::to_fields)
            .unwrap_or_default()
    }

    pub fn has_form(&self) -> bool {
        self.form.as_ref().is_some_and(|f| !f.is_empty())
    }
}
