//! calc-engine - Arithmetic expression pipeline for simpcalc
//!
//! Turns an expression string into a number in three stages:
//!
//! 1. **Tokenizer**: numbers, `+ - * / % **` and parentheses, with unary minus
//!    rewritten to `0 -`
//! 2. **Parser**: shunting-yard conversion to postfix (RPN)
//! 3. **Evaluator**: stack evaluation of the postfix stream in `f64`
//!
//! The first failing stage aborts the pipeline; no partial results are returned.
//!
//! # Operators
//!
//! | Operator | Precedence | Associativity |
//! |----------|------------|---------------|
//! | `**`     | 4          | right         |
//! | `* / %`  | 3          | left          |
//! | `+ -`    | 2          | left          |
//!
//! # Example
//!
//! ```rust
//! use calc_engine::{evaluate_expression, Number};
//!
//! assert_eq!(evaluate_expression("2+3*4").unwrap(), Number::Integer(14));
//! assert_eq!(evaluate_expression("2**3**2").unwrap(), Number::Integer(512));
//! assert!(evaluate_expression("4/0").is_err());
//! ```

pub mod evaluator;
pub mod number;
pub mod parser;
pub mod token;
pub mod tokenizer;

// Re-exports for convenience
pub use errors::{CalcError, Result};
pub use evaluator::evaluate_postfix;
pub use number::Number;
pub use parser::to_postfix;
pub use token::{token_texts, Associativity, Operator, Paren, Token};
pub use tokenizer::tokenize;

use tracing::debug;

/// Run the full pipeline: tokenize -> to_postfix -> evaluate_postfix
pub fn evaluate_expression(expression: &str) -> Result<Number> {
    let tokens = tokenize(expression)?;
    debug!("Tokens: {:?}", token_texts(&tokens));

    let postfix = to_postfix(&tokens)?;
    debug!("Postfix: {:?}", token_texts(&postfix));

    let value = evaluate_postfix(&postfix)?;
    Ok(Number::from_f64(value))
}

/// CalcEngine - stateless facade over the pipeline
///
/// Holds no state, so one engine can be shared freely between threads.
#[derive(Debug, Default, Clone, Copy)]
pub struct CalcEngine;

impl CalcEngine {
    pub fn new() -> Self {
        Self
    }

    /// Evaluate an expression to its presented value
    pub fn evaluate(&self, expression: &str) -> Result<Number> {
        evaluate_expression(expression)
    }

    /// Tokenize and convert to postfix without evaluating
    pub fn postfix(&self, expression: &str) -> Result<Vec<Token>> {
        to_postfix(&tokenize(expression)?)
    }
}
