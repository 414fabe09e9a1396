//! simpcalc - Simple calculator with a persistent history
//!
//! [`Calculator`] is the library entry point; the `simpcalc` binary wraps it
//! with `eval` and `repl` commands.

pub mod calculator;
pub mod output;
pub mod repl;

pub use calculator::{Calculator, DEFAULT_HISTORY_LIMIT};
pub use errors::{CalcError, ErrorKind};
