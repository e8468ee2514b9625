pub mod prompt;

pub use prompt::{run_questionnaire, run_questionnaire_with};

use crate::scoring::{assess_form, parse_field, Assessment, InputError, ScoringConfig, CATEGORY_COUNT};

/// The thirteen answer fields as typed, in category order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    fields: [String; CATEGORY_COUNT],
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_fields(fields: [String; CATEGORY_COUNT]) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[String; CATEGORY_COUNT] {
        &self.fields
    }

    pub fn field(&self, index: usize) -> &str {
        self.fields.get(index).map(String::as_str).unwrap_or("")
    }

    pub fn set_field(&mut self, index: usize, text: impl Into<String>) {
        if let Some(field) = self.fields.get_mut(index) {
            *field = text.into();
        }
    }

    pub fn push_char(&mut self, index: usize, c: char) {
        if let Some(field) = self.fields.get_mut(index) {
            field.push(c);
        }
    }

    pub fn pop_char(&mut self, index: usize) {
        if let Some(field) = self.fields.get_mut(index) {
            field.pop();
        }
    }

    pub fn clear(&mut self) {
        self.fields = Default::default();
    }

    pub fn clear_fields(&mut self, indices: &[usize]) {
        for &i in indices {
            self.set_field(i, String::new());
        }
    }

    /// Number of fields holding a positive quantity
    pub fn filled_count(&self) -> usize {
        self.fields.iter().filter(|f| parse_field(f) > 0.0).count()
    }

    /// Share of fields holding a positive quantity, 0..=100
    pub fn progress(&self) -> f64 {
        self.filled_count() as f64 / CATEGORY_COUNT as f64 * 100.0
    }

    /// Build a form from a comma-separated answer list ("10,5,,1").
    /// Missing trailing answers stay empty; more than thirteen is an error.
    pub fn from_answer_list(list: &str) -> Result<Self, String> {
        let answers: Vec<&str> = list.split(',').map(str::trim).collect();
        if answers.len() > CATEGORY_COUNT {
            return Err(format!(
                "Expected at most {} answers, got {}",
                CATEGORY_COUNT,
                answers.len()
            ));
        }

        let mut form = Self::new();
        for (i, answer) in answers.into_iter().enumerate() {
            form.set_field(i, answer);
        }
        Ok(form)
    }

    /// Validate and score the current answers. A rejected batch clears the
    /// offending fields so the user re-enters them.
    pub fn submit(&mut self, config: &ScoringConfig) -> Result<Assessment, InputError> {
        match assess_form(&self.fields, config) {
            Ok(assessment) => Ok(assessment),
            Err(e) => {
                self.clear_fields(e.fields());
                Err(e)
            }
        }
    }
}
