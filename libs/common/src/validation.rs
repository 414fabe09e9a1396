//! Expression input validation
//!
//! Runs before tokenization and only checks the shape of the input.

use errors::{CalcError, Result};

/// Validator for raw expression text
#[derive(Debug, Clone, Copy)]
pub struct ExpressionValidator {
    max_length: usize,
}

impl ExpressionValidator {
    pub fn new(max_length: usize) -> Self {
        Self { max_length }
    }

    pub fn validate(&self, expression: &str) -> Result<()> {
        validate_expression(expression, self.max_length)
    }
}

/// Reject empty, whitespace-only and over-long expressions
///
/// Length is counted in characters.
pub fn validate_expression(expression: &str, max_length: usize) -> Result<()> {
    if expression.trim().is_empty() {
        return Err(CalcError::validation(
            "Expression cannot be empty or whitespace.",
        ));
    }
    if expression.chars().count() > max_length {
        return Err(CalcError::validation(format!(
            "Expression exceeds maximum length of {} characters.",
            max_length
        )));
    }
    Ok(())
}
