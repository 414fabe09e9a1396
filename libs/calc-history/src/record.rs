//! Calculation records
//!
//! A record is created once per evaluation attempt and never changes. In
//! memory the result is an [`Outcome`]; on disk it is the flat object
//!
//! ```json
//! {
//!   "id": "6f1c...",
//!   "expression": "1+2*3",
//!   "result": 7,
//!   "success": true,
//!   "error_type": null,
//!   "error_message": null,
//!   "timestamp": "2026-10-19T08:15:02.123456Z"
//! }
//! ```

use calc_engine::Number;
use errors::{CalcError, HistoryError, HistoryResult};
use serde::{Deserialize, Serialize};

/// Result of one evaluation attempt
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Success(Number),
    Failure {
        error_type: String,
        error_message: String,
    },
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

/// One entry of the history log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RecordRepr", into = "RecordRepr")]
pub struct CalculationRecord {
    id: String,
    expression: String,
    outcome: Outcome,
    timestamp: String,
}

impl CalculationRecord {
    /// Create a record with a fresh UUID and the current UTC time
    pub fn new(expression: impl Into<String>, outcome: Outcome) -> HistoryResult<Self> {
        let expression = expression.into();
        if expression.trim().is_empty() {
            return Err(HistoryError::invalid_record(
                "Expression must be a non-empty string",
            ));
        }
        if let Outcome::Failure {
            error_type,
            error_message,
        } = &outcome
        {
            if error_type.is_empty() || error_message.is_empty() {
                return Err(HistoryError::invalid_record(
                    "Failed record requires error_type and error_message",
                ));
            }
        }

        Ok(Self {
            id: uuid::Uuid::new_v4().to_string(),
            expression,
            outcome,
            timestamp: utc_timestamp(),
        })
    }

    pub fn success(expression: impl Into<String>, result: Number) -> HistoryResult<Self> {
        Self::new(expression, Outcome::Success(result))
    }

    /// Record a failed evaluation, naming the error by its kind
    pub fn failure(expression: impl Into<String>, error: &CalcError) -> HistoryResult<Self> {
        Self::new(
            expression,
            Outcome::Failure {
                error_type: error.kind().type_name().to_string(),
                error_message: error.to_string(),
            },
        )
    }

    /// Replace the generated timestamp
    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = timestamp.into();
        self
    }

    /// Replace the generated id
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn is_success(&self) -> bool {
        self.outcome.is_success()
    }

    /// The numeric result, if the evaluation succeeded
    pub fn value(&self) -> Option<Number> {
        match &self.outcome {
            Outcome::Success(n) => Some(*n),
            Outcome::Failure { .. } => None,
        }
    }

    pub fn error_type(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::Success(_) => None,
            Outcome::Failure { error_type, .. } => Some(error_type),
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::Success(_) => None,
            Outcome::Failure { error_message, .. } => Some(error_message),
        }
    }

    /// The `result` field as shown to users: the number or the error text
    pub fn result_text(&self) -> String {
        match &self.outcome {
            Outcome::Success(n) => n.to_string(),
            Outcome::Failure { error_message, .. } => error_message.clone(),
        }
    }
}

/// ISO-8601 UTC timestamp with microseconds and a `Z` suffix
pub fn utc_timestamp() -> String {
    chrono::Utc::now()
        .format("%Y-%m-%dT%H:%M:%S%.6fZ")
        .to_string()
}

// ============================================================================
// Flat on-disk representation
// ============================================================================

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum ResultField {
    Number(Number),
    Text(String),
}

#[derive(Serialize, Deserialize)]
struct RecordRepr {
    id: String,
    expression: String,
    result: ResultField,
    success: bool,
    error_type: Option<String>,
    error_message: Option<String>,
    timestamp: String,
}

impl From<CalculationRecord> for RecordRepr {
    fn from(record: CalculationRecord) -> Self {
        let (result, success, error_type, error_message) = match record.outcome {
            Outcome::Success(n) => (ResultField::Number(n), true, None, None),
            Outcome::Failure {
                error_type,
                error_message,
            } => (
                ResultField::Text(error_message.clone()),
                false,
                Some(error_type),
                Some(error_message),
            ),
        };
        Self {
            id: record.id,
            expression: record.expression,
            result,
            success,
            error_type,
            error_message,
            timestamp: record.timestamp,
        }
    }
}

impl TryFrom<RecordRepr> for CalculationRecord {
    type Error = String;

    fn try_from(repr: RecordRepr) -> Result<Self, Self::Error> {
        let outcome = match (repr.success, repr.result, repr.error_type, repr.error_message) {
            (true, ResultField::Number(n), None, None) => Outcome::Success(n),
            (true, ResultField::Text(_), _, _) => {
                return Err(format!("record {}: successful result must be a number", repr.id))
            },
            (true, _, _, _) => {
                return Err(format!(
                    "record {}: successful record cannot have error information",
                    repr.id
                ))
            },
            (false, _, Some(error_type), Some(error_message)) => Outcome::Failure {
                error_type,
                error_message,
            },
            (false, _, _, _) => {
                return Err(format!(
                    "record {}: failed record requires error_type and error_message",
                    repr.id
                ))
            },
        };
        Ok(Self {
            id: repr.id,
            expression: repr.expression,
            outcome,
            timestamp: repr.timestamp,
        })
    }
}
