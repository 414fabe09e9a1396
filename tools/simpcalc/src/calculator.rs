//! Calculator facade
//!
//! Ties input validation, the evaluation pipeline and the history log together.
//! Every attempt that gets past validation produces a [`CalculationRecord`],
//! successful or not, and it is written to the log when `persist` is set.

use calc_engine::CalcEngine;
use calc_history::{CalculationRecord, HistoryStore};
use common::{ExpressionValidator, Settings};
use errors::{CalcError, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, error};

/// Number of records shown by `:history`
pub const DEFAULT_HISTORY_LIMIT: usize = 20;

pub struct Calculator {
    engine: CalcEngine,
    validator: ExpressionValidator,
    store: HistoryStore,
}

impl Calculator {
    pub fn new(settings: &Settings) -> Self {
        Self {
            engine: CalcEngine::new(),
            validator: ExpressionValidator::new(settings.max_expression_length),
            store: HistoryStore::new(settings.history_file.clone()),
        }
    }

    /// Use a different history file than the configured one
    pub fn with_history_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.store = HistoryStore::new(path);
        self
    }

    pub fn history_file(&self) -> &Path {
        self.store.path()
    }

    /// Evaluate `expression`, optionally appending the outcome to the log
    ///
    /// Validation failures return immediately and are never recorded. Parse and
    /// evaluation failures are recorded first, then returned unchanged.
    pub fn evaluate(&self, expression: &str, persist: bool) -> Result<CalculationRecord> {
        self.validator.validate(expression)?;

        match self.engine.evaluate(expression) {
            Ok(value) => {
                let record = CalculationRecord::success(expression, value)?;
                if persist {
                    self.persist(expression, &record)?;
                }
                debug!("Evaluated {:?} = {}", expression, value);
                Ok(record)
            },
            Err(err) => {
                log_failure(expression, &err);
                let record = CalculationRecord::failure(expression, &err)?;
                if persist {
                    self.persist(expression, &record)?;
                }
                Err(err)
            },
        }
    }

    fn persist(&self, expression: &str, record: &CalculationRecord) -> Result<()> {
        self.store.append(record).map_err(|e| {
            let err = CalcError::from(e);
            log_failure(expression, &err);
            err
        })
    }

    /// The last `limit` records of the log, oldest first
    pub fn history(&self, limit: usize) -> Result<Vec<CalculationRecord>> {
        Ok(self.store.tail(limit)?)
    }
}

fn log_failure(expression: &str, err: &CalcError) {
    let kind = err.kind();
    if kind.log_level() == tracing::Level::ERROR {
        error!("{} while evaluating {:?}: {}", kind, expression, err);
    } else {
        debug!("{} while evaluating {:?}: {}", kind, expression, err);
    }
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)]
mod tests {
    use super::*;
    use calc_engine::Number;
    use calc_history::Outcome;
    use tempfile::TempDir;
    use tracing_test::traced_test;

    fn calculator(dir: &TempDir) -> Calculator {
        let settings = Settings::default().with_history_file(dir.path().join("history.json"));
        Calculator::new(&settings)
    }

    #[test]
    fn test_success_without_persist() {
        let dir = TempDir::new().unwrap();
        let calc = calculator(&dir);

        let record = calc.evaluate("1+2*3", false).unwrap();
        assert_eq!(record.value(), Some(Number::Integer(7)));
        assert_eq!(record.expression(), "1+2*3");
        assert!(!calc.history_file().exists());
    }

    #[test]
    fn test_success_with_persist() {
        let dir = TempDir::new().unwrap();
        let calc = calculator(&dir);

        let record = calc.evaluate("1/4", true).unwrap();
        assert_eq!(record.value(), Some(Number::Float(0.25)));
        assert_eq!(calc.history(DEFAULT_HISTORY_LIMIT).unwrap(), vec![record]);
    }

    #[test]
    fn test_failure_is_recorded_then_returned() {
        let dir = TempDir::new().unwrap();
        let calc = calculator(&dir);

        let err = calc.evaluate("4/0", true).unwrap_err();
        assert!(matches!(err, CalcError::Evaluation(_)));
        assert_eq!(err.to_string(), "Division by zero.");

        let history = calc.history(DEFAULT_HISTORY_LIMIT).unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(
            history[0].outcome(),
            &Outcome::Failure {
                error_type: "EvaluationError".to_string(),
                error_message: "Division by zero.".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_failure_recorded() {
        let dir = TempDir::new().unwrap();
        let calc = calculator(&dir);

        let err = calc.evaluate("(1+2", true).unwrap_err();
        assert!(matches!(err, CalcError::Parse(_)));
        let history = calc.history(DEFAULT_HISTORY_LIMIT).unwrap();
        assert_eq!(history[0].error_type(), Some("ParseError"));
        assert_eq!(history[0].result_text(), "Mismatched parentheses");
    }

    #[test]
    fn test_validation_failure_is_not_recorded() {
        let dir = TempDir::new().unwrap();
        let calc = calculator(&dir);

        let err = calc.evaluate("   ", true).unwrap_err();
        assert!(matches!(err, CalcError::Validation(_)));
        assert!(!calc.history_file().exists());
    }

    #[test]
    fn test_max_length_from_settings() {
        let dir = TempDir::new().unwrap();
        let settings = Settings {
            history_file: dir.path().join("history.json"),
            log_level: "info".to_string(),
            max_expression_length: 3,
        };
        let calc = Calculator::new(&settings);

        assert!(calc.evaluate("1+2", false).is_ok());
        let err = calc.evaluate("1+23", false).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Expression exceeds maximum length of 3 characters."
        );
    }

    #[test]
    fn test_with_history_file_override() {
        let dir = TempDir::new().unwrap();
        let other = dir.path().join("nested").join("other.json");
        let calc = calculator(&dir).with_history_file(&other);

        calc.evaluate("2**10", true).unwrap();
        assert!(other.exists());
        assert!(!dir.path().join("history.json").exists());
    }

    #[test]
    fn test_unwritable_history_is_history_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.json");
        std::fs::write(&path, r#"{"not": "a list"}"#).unwrap();
        let calc = calculator(&dir);

        let err = calc.evaluate("1+1", true).unwrap_err();
        assert!(matches!(err, CalcError::History(_)));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    #[traced_test]
    fn test_history_failure_logged_as_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("history.json"), "42").unwrap();
        let calc = calculator(&dir);

        assert!(calc.evaluate("1+1", true).is_err());
        assert!(logs_contain("ERROR"));
        assert!(logs_contain("HistoryError while evaluating \"1+1\""));
    }

    #[test]
    #[traced_test]
    fn test_evaluation_failure_logged_at_debug() {
        let dir = TempDir::new().unwrap();
        let calc = calculator(&dir);

        assert!(calc.evaluate("1/0", false).is_err());
        assert!(logs_contain("EvaluationError while evaluating \"1/0\""));
        assert!(!logs_contain("ERROR"));
    }

    #[test]
    fn test_history_limit() {
        let dir = TempDir::new().unwrap();
        let calc = calculator(&dir);
        for i in 1..=25 {
            calc.evaluate(&format!("{}+0", i), true).unwrap();
        }

        let history = calc.history(DEFAULT_HISTORY_LIMIT).unwrap();
        assert_eq!(history.len(), 20);
        assert_eq!(history[0].expression(), "6+0");
        assert_eq!(history[19].value(), Some(Number::Integer(25)));
    }
}
