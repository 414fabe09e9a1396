//! common - Shared plumbing for simpcalc
//!
//! - settings loaded from the environment
//! - console logging
//! - expression input validation

pub mod config;
pub mod logging;
pub mod validation;

pub use config::Settings;
pub use validation::{validate_expression, ExpressionValidator};
