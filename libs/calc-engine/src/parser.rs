//! Shunting-yard conversion from infix tokens to postfix (RPN)

use crate::token::{Associativity, Operator, Paren, Token};
use errors::{parse_error, Result};

const MISMATCHED_PARENS: &str = "Mismatched parentheses";

/// Convert infix tokens into postfix order
///
/// Equal-precedence operators pop only when the incoming operator is
/// left-associative, so `2**3**2` groups as `2**(3**2)`.
pub fn to_postfix(tokens: &[Token]) -> Result<Vec<Token>> {
    let mut output = Vec::with_capacity(tokens.len());
    let mut stack: Vec<Token> = Vec::new();

    for token in tokens {
        match token {
            Token::Number { .. } => output.push(token.clone()),
            Token::Operator(op) => {
                while let Some(top) = stack.last().and_then(Token::as_operator) {
                    if !pops_before(top, *op) {
                        break;
                    }
                    output.push(Token::Operator(top));
                    stack.pop();
                }
                stack.push(token.clone());
            },
            Token::Paren(Paren::Open) => stack.push(token.clone()),
            Token::Paren(Paren::Close) => loop {
                match stack.pop() {
                    Some(Token::Paren(Paren::Open)) => break,
                    Some(entry) => output.push(entry),
                    None => return Err(parse_error!(MISMATCHED_PARENS)),
                }
            },
        }
    }

    while let Some(entry) = stack.pop() {
        if matches!(entry, Token::Paren(_)) {
            return Err(parse_error!(MISMATCHED_PARENS));
        }
        output.push(entry);
    }

    Ok(output)
}

/// Whether `top` on the stack must be emitted before pushing `incoming`
fn pops_before(top: Operator, incoming: Operator) -> bool {
    top.precedence() > incoming.precedence()
        || (top.precedence() == incoming.precedence()
            && incoming.associativity() == Associativity::Left)
}
