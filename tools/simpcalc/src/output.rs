//! Terminal coloring for the error stream
//!
//! `colored` decides from stdout alone, so labels written to stderr check
//! stderr themselves and stay plain when it is redirected.

use colored::{Color, ColoredString, Colorize};
use std::io::IsTerminal;

/// Color `text` for stderr, or leave it plain when stderr is not a terminal
pub fn stderr_label(text: &str, color: Color) -> ColoredString {
    paint(text, color, std::io::stderr().is_terminal())
}

fn paint(text: &str, color: Color, is_terminal: bool) -> ColoredString {
    if is_terminal {
        text.color(color)
    } else {
        text.normal()
    }
}
