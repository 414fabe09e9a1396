//! Lexical tokens and the operator table

use errors::{parse_error, Result};
use std::fmt;

/// Operator associativity for equal-precedence chains
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Associativity {
    Left,
    Right,
}

/// Binary arithmetic operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
}

impl Operator {
    pub const ALL: [Operator; 6] = [
        Operator::Add,
        Operator::Sub,
        Operator::Mul,
        Operator::Div,
        Operator::Mod,
        Operator::Pow,
    ];

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Pow => "**",
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.symbol() == symbol)
    }

    /// Binding strength; higher binds tighter
    pub fn precedence(self) -> u8 {
        match self {
            Self::Pow => 4,
            Self::Mul | Self::Div | Self::Mod => 3,
            Self::Add | Self::Sub => 2,
        }
    }

    pub fn associativity(self) -> Associativity {
        match self {
            Self::Pow => Associativity::Right,
            _ => Associativity::Left,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Paren {
    Open,
    Close,
}

/// A lexical token
///
/// Numbers keep their source text next to the parsed value so token streams
/// render exactly as they were written.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Number { text: String, value: f64 },
    Operator(Operator),
    Paren(Paren),
}

impl Token {
    /// Build a number token from its decimal text
    pub fn number(text: impl Into<String>) -> Result<Self> {
        let text = text.into();
        let value = text
            .parse::<f64>()
            .map_err(|_| parse_error!("Unknown token '{}'", text))?;
        Ok(Self::Number { text, value })
    }

    /// The literal `0` used to rewrite unary minus
    pub fn zero() -> Self {
        Self::Number {
            text: "0".to_string(),
            value: 0.0,
        }
    }

    pub fn as_operator(&self) -> Option<Operator> {
        match self {
            Self::Operator(op) => Some(*op),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number { text, .. } => f.write_str(text),
            Self::Operator(op) => f.write_str(op.symbol()),
            Self::Paren(Paren::Open) => f.write_str("("),
            Self::Paren(Paren::Close) => f.write_str(")"),
        }
    }
}

/// Render a token stream as its source texts, e.g. `["2", "3", "*"]`
pub fn token_texts(tokens: &[Token]) -> Vec<String> {
    tokens.iter().map(ToString::to_string).collect()
}
