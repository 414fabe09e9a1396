//! Postfix evaluator
//!
//! Walks an RPN token stream with an `f64` value stack. Arithmetic follows
//! IEEE-754 doubles; anything that leaves the reals (NaN) or overflows to an
//! infinity is reported as an evaluation error rather than a value.

use crate::token::{Operator, Token};
use errors::{evaluation_error, Result};

const INSUFFICIENT_OPERANDS: &str = "Malformed expression; insufficient operands.";
const EXTRA_OPERANDS: &str = "Malformed expression; extra operands.";

/// Evaluate postfix tokens to a single value
pub fn evaluate_postfix(tokens: &[Token]) -> Result<f64> {
    let mut stack: Vec<f64> = Vec::with_capacity(tokens.len());

    for token in tokens {
        match token {
            Token::Number { text, value } => {
                if !value.is_finite() {
                    return Err(evaluation_error!("Number out of range: {}", text));
                }
                stack.push(*value);
            },
            Token::Operator(op) => {
                let (right, left) = match (stack.pop(), stack.pop()) {
                    (Some(right), Some(left)) => (right, left),
                    _ => return Err(evaluation_error!(INSUFFICIENT_OPERANDS)),
                };
                stack.push(apply_operator(*op, left, right)?);
            },
            Token::Paren(_) => {
                return Err(evaluation_error!("Unsupported operator: {}", token));
            },
        }
    }

    match stack.as_slice() {
        [value] => Ok(*value),
        [] => Err(evaluation_error!(INSUFFICIENT_OPERANDS)),
        _ => Err(evaluation_error!(EXTRA_OPERANDS)),
    }
}

/// Apply a binary operator to two finite operands
pub fn apply_operator(op: Operator, left: f64, right: f64) -> Result<f64> {
    let result = match op {
        Operator::Add => left + right,
        Operator::Sub => left - right,
        Operator::Mul => left * right,
        Operator::Div => {
            if right == 0.0 {
                return Err(evaluation_error!("Division by zero."));
            }
            left / right
        },
        Operator::Mod => {
            if right == 0.0 {
                return Err(evaluation_error!("Modulo by zero."));
            }
            floored_mod(left, right)
        },
        Operator::Pow => {
            if left == 0.0 && right < 0.0 {
                return Err(evaluation_error!(
                    "Zero cannot be raised to a negative power."
                ));
            }
            left.powf(right)
        },
    };

    if result.is_nan() {
        return Err(evaluation_error!("Result is not a real number."));
    }
    if result.is_infinite() {
        return Err(evaluation_error!("Result is out of range."));
    }
    Ok(result)
}

/// Remainder whose sign follows the divisor: `a - b * floor(a / b)`
pub fn floored_mod(left: f64, right: f64) -> f64 {
    let rem = left % right;
    if rem != 0.0 && (rem < 0.0) != (right < 0.0) {
        rem + right
    } else {
        rem
    }
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)]
mod tests {
    use super::*;
    use crate::parser::to_postfix;
    use crate::tokenizer::tokenize;
    use errors::CalcError;

    fn eval(input: &str) -> Result<f64> {
        evaluate_postfix(&to_postfix(&tokenize(input)?)?)
    }

    fn num(text: &str) -> Token {
        Token::number(text).unwrap()
    }

    #[test]
    fn test_basic_arithmetic() {
        assert_eq!(eval("10 + 5").unwrap(), 15.0);
        assert_eq!(eval("10 - 5").unwrap(), 5.0);
        assert_eq!(eval("10 * 5").unwrap(), 50.0);
        assert_eq!(eval("10 / 4").unwrap(), 2.5);
        assert_eq!(eval("10 % 4").unwrap(), 2.0);
        assert_eq!(eval("2 ** 10").unwrap(), 1024.0);
    }

    #[test]
    fn test_operand_order() {
        // right operand is the top of the stack
        let tokens = vec![num("8"), num("2"), Token::Operator(Operator::Sub)];
        assert_eq!(evaluate_postfix(&tokens).unwrap(), 6.0);
        let tokens = vec![num("2"), num("3"), Token::Operator(Operator::Pow)];
        assert_eq!(evaluate_postfix(&tokens).unwrap(), 8.0);
    }

    #[test]
    fn test_division_by_zero() {
        let err = eval("4/0").unwrap_err();
        assert!(matches!(err, CalcError::Evaluation(_)));
        assert_eq!(err.to_string(), "Division by zero.");
    }

    #[test]
    fn test_modulo_by_zero() {
        let err = eval("4%0").unwrap_err();
        assert!(matches!(err, CalcError::Evaluation(_)));
        assert_eq!(err.to_string(), "Modulo by zero.");
    }

    #[test]
    fn test_modulo_sign_follows_divisor() {
        assert_eq!(floored_mod(-7.0, 3.0), 2.0);
        assert_eq!(floored_mod(7.0, -3.0), -2.0);
        assert_eq!(floored_mod(-7.0, -3.0), -1.0);
        assert_eq!(floored_mod(7.5, 2.0), 1.5);
        assert_eq!(floored_mod(-6.0, 3.0), 0.0);
    }

    #[test]
    fn test_fractional_and_negative_exponents() {
        assert_eq!(eval("4 ** 0.5").unwrap(), 2.0);
        assert_eq!(eval("2 ** (0-1)").unwrap(), 0.5);
    }

    #[test]
    fn test_non_real_power() {
        let err = eval("(0-8) ** 0.5").unwrap_err();
        assert!(matches!(err, CalcError::Evaluation(_)));
        assert_eq!(err.to_string(), "Result is not a real number.");
    }

    #[test]
    fn test_zero_to_negative_power() {
        let err = eval("0 ** (0-1)").unwrap_err();
        assert!(matches!(err, CalcError::Evaluation(_)));
    }

    #[test]
    fn test_overflow() {
        let err = eval("10 ** 400").unwrap_err();
        assert_eq!(err.to_string(), "Result is out of range.");
    }

    #[test]
    fn test_insufficient_operands() {
        let err = eval("1 +").unwrap_err();
        assert_eq!(err.to_string(), INSUFFICIENT_OPERANDS);
        let err = eval("*").unwrap_err();
        assert_eq!(err.to_string(), INSUFFICIENT_OPERANDS);
    }

    #[test]
    fn test_extra_operands() {
        let err = eval("1 2").unwrap_err();
        assert!(matches!(err, CalcError::Evaluation(_)));
        assert_eq!(err.to_string(), EXTRA_OPERANDS);
        assert_eq!(eval("(1)(2)").unwrap_err().to_string(), EXTRA_OPERANDS);
    }

    #[test]
    fn test_empty_stream() {
        assert_eq!(
            evaluate_postfix(&[]).unwrap_err().to_string(),
            INSUFFICIENT_OPERANDS
        );
    }

    #[test]
    fn test_paren_in_postfix_is_rejected() {
        let tokens = vec![num("1"), Token::Paren(crate::token::Paren::Open)];
        let err = evaluate_postfix(&tokens).unwrap_err();
        assert_eq!(err.to_string(), "Unsupported operator: (");
    }
}
