//! Presentation of evaluation results

use serde::{Deserialize, Serialize};
use std::fmt;

/// Distance from the nearest integer below which a result is shown as an integer
pub const INTEGER_EPSILON: f64 = 1e-12;

/// A computed result, reported as an integer when it is (nearly) integral
///
/// Serializes to a plain JSON number: `2` or `0.5`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Number {
    Integer(i64),
    Float(f64),
}

impl Number {
    pub fn from_f64(value: f64) -> Self {
        let nearest = value.round();
        let in_range = nearest >= i64::MIN as f64 && nearest < i64::MAX as f64;
        if value.is_finite() && in_range && (value - nearest).abs() < INTEGER_EPSILON {
            Self::Integer(nearest as i64)
        } else {
            Self::Float(value)
        }
    }

    pub fn as_f64(self) -> f64 {
        match self {
            Self::Integer(i) => i as f64,
            Self::Float(f) => f,
        }
    }

    pub fn is_integer(self) -> bool {
        matches!(self, Self::Integer(_))
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Self::from_f64(value)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(i) => write!(f, "{}", i),
            Self::Float(v) => write!(f, "{}", v),
        }
    }
}
