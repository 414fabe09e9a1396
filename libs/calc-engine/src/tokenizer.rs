//! Tokenizer - raw text to tokens
//!
//! Scans numbers, operators (`+ - * / % **`) and parentheses, then rewrites
//! unary minus into a subtraction from zero.

use crate::token::{Operator, Paren, Token};
use errors::{parse_error, Result};

/// Tokenize an expression, applying unary-minus normalization
pub fn tokenize(text: &str) -> Result<Vec<Token>> {
    let raw = scan(text)?;
    Ok(normalize_unary_minus(raw))
}

/// Scan raw tokens without any rewriting
///
/// Positions in error messages are 0-based character indices.
pub fn scan(text: &str) -> Result<Vec<Token>> {
    let chars: Vec<char> = text.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let ch = chars[i];
        match ch {
            ' ' | '\t' | '\n' | '\r' => {
                i += 1;
            },
            '0'..='9' | '.' => {
                let start = i;
                let mut seen_dot = ch == '.';
                i += 1;
                while i < chars.len() {
                    match chars[i] {
                        '0'..='9' => i += 1,
                        '.' if !seen_dot => {
                            seen_dot = true;
                            i += 1;
                        },
                        _ => break,
                    }
                }
                let literal: String = chars[start..i].iter().collect();
                tokens.push(Token::number(literal)?);
            },
            '*' if chars.get(i + 1) == Some(&'*') => {
                tokens.push(Token::Operator(Operator::Pow));
                i += 2;
            },
            '+' | '-' | '*' | '/' | '%' => {
                let op = match ch {
                    '+' => Operator::Add,
                    '-' => Operator::Sub,
                    '*' => Operator::Mul,
                    '/' => Operator::Div,
                    _ => Operator::Mod,
                };
                tokens.push(Token::Operator(op));
                i += 1;
            },
            '(' => {
                tokens.push(Token::Paren(Paren::Open));
                i += 1;
            },
            ')' => {
                tokens.push(Token::Paren(Paren::Close));
                i += 1;
            },
            _ => return Err(parse_error!("Unexpected character '{}' at position {}", ch, i)),
        }
    }

    Ok(tokens)
}

/// Rewrite `-` into `0 -` when it starts the stream or follows `(` or an operator
///
/// The decision looks only at the preceding raw token.
pub fn normalize_unary_minus(tokens: Vec<Token>) -> Vec<Token> {
    let mut out = Vec::with_capacity(tokens.len());
    let mut prev_opens_operand = true;

    for token in tokens {
        let opens_operand = matches!(token, Token::Operator(_) | Token::Paren(Paren::Open));
        if token == Token::Operator(Operator::Sub) && prev_opens_operand {
            out.push(Token::zero());
        }
        out.push(token);
        prev_opens_operand = opens_operand;
    }

    out
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)]
mod tests {
    use super::*;
    use crate::token::token_texts;

    fn texts(input: &str) -> Vec<String> {
        token_texts(&tokenize(input).unwrap())
    }

    #[test]
    fn test_simple_expression() {
        assert_eq!(texts("2+3*4"), ["2", "+", "3", "*", "4"]);
    }

    #[test]
    fn test_whitespace_is_skipped() {
        assert_eq!(texts(" 1 \t+\n2\r"), ["1", "+", "2"]);
    }

    #[test]
    fn test_power_operator() {
        assert_eq!(texts("2**3"), ["2", "**", "3"]);
        // three stars: `**` then `*`
        assert_eq!(texts("2***3"), ["2", "**", "*", "3"]);
    }

    #[test]
    fn test_decimal_numbers() {
        assert_eq!(texts("3.14 + .5"), ["3.14", "+", ".5"]);
        assert_eq!(texts("5."), ["5."]);
    }

    #[test]
    fn test_second_dot_ends_number() {
        // "1.2.3" scans as "1.2" followed by ".3"
        assert_eq!(texts("1.2.3"), ["1.2", ".3"]);
    }

    #[test]
    fn test_lone_dot_fails() {
        let err = tokenize("1 + .").unwrap_err();
        assert_eq!(err.to_string(), "Unknown token '.'");
    }

    #[test]
    fn test_unexpected_character() {
        let err = tokenize("2 + x").unwrap_err();
        assert!(matches!(err, errors::CalcError::Parse(_)));
        assert_eq!(err.to_string(), "Unexpected character 'x' at position 4");
    }

    #[test]
    fn test_unexpected_character_position_counts_chars() {
        let err = tokenize("1+é").unwrap_err();
        assert_eq!(err.to_string(), "Unexpected character 'é' at position 2");
    }

    #[test]
    fn test_unary_minus_at_start() {
        assert_eq!(texts("-5+3"), ["0", "-", "5", "+", "3"]);
    }

    #[test]
    fn test_unary_minus_after_paren_and_operator() {
        assert_eq!(texts("(-2)"), ["(", "0", "-", "2", ")"]);
        assert_eq!(texts("3*-2"), ["3", "*", "0", "-", "2"]);
    }

    #[test]
    fn test_repeated_unary_minus() {
        assert_eq!(texts("--5"), ["0", "-", "0", "-", "5"]);
    }

    #[test]
    fn test_binary_minus_untouched() {
        assert_eq!(texts("5-3"), ["5", "-", "3"]);
        assert_eq!(texts("(1)-3"), ["(", "1", ")", "-", "3"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(tokenize("").unwrap().is_empty());
    }
}
