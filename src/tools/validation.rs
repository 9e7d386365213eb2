//! Required-field checks for tool inputs
//!
//! The calculators trust their inputs, so blank and non-positive values are
//! caught here before they reach them.

use serde::Serialize;

pub const REQUIRED_MESSAGE: &str = "This field is required";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Accumulates field errors across a form
#[derive(Debug, Default)]
pub struct FormCheck {
    errors: Vec<FieldError>,
}

impl FormCheck {
    pub fn new() -> Self {
        Self::default()
    }

    fn fail(&mut self, field: &str) {
        self.errors.push(FieldError {
            field: field.to_string(),
            message: REQUIRED_MESSAGE.to_string(),
        });
    }

    /// Numbers must be finite and strictly positive
    pub fn number(mut self, field: &str, value: f64) -> Self {
        if !value.is_finite() || value <= 0.0 {
            self.fail(field);
        }
        self
    }

    /// Text must be non-blank once trimmed
    pub fn text(mut self, field: &str, value: &str) -> Self {
        if value.trim().is_empty() {
            self.fail(field);
        }
        self
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// `Err` listing every failed field, e.g. `"weight: This field is required"`
    pub fn finish(self) -> Result<(), String> {
        if self.errors.is_empty() {
            return Ok(());
        }
        let joined = self
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect::<Vec<_>>()
            .join("; ");
        Err(joined)
    }
}
