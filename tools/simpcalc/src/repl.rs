//! Interactive prompt
//!
//! Lines are evaluated with persistence on. `:history` lists recent records,
//! `exit` or `quit` leave, Ctrl-C and Ctrl-D leave as well.

use crate::calculator::{Calculator, DEFAULT_HISTORY_LIMIT};
use crate::output::stderr_label;
use anyhow::{Context, Result};
use calc_history::CalculationRecord;
use colored::{Color, Colorize};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

pub const BANNER: &str =
    "simpcalc1 REPL. Type 'exit' or 'quit' to leave, ':history' to show history.";
pub const PROMPT: &str = "simpcalc> ";
pub const NO_HISTORY: &str = "No history found. Use --persist to save calculations.";

/// What the loop does with one input line
#[derive(Debug, Clone, PartialEq)]
pub enum ReplStep {
    /// Nothing to do
    Skip,
    /// Leave the loop
    Exit,
    /// Lines to print
    Output(Vec<String>),
    /// Failure message to print after `Error:`
    Error(String),
}

/// Decide what a single input line does
pub fn process_line(calc: &Calculator, line: &str) -> ReplStep {
    if line.is_empty() {
        return ReplStep::Skip;
    }
    match line.trim() {
        "exit" | "quit" => ReplStep::Exit,
        ":history" => show_history(calc),
        _ => match calc.evaluate(line, true) {
            Ok(record) => ReplStep::Output(vec![format!("=> {}", record.result_text())]),
            Err(e) => ReplStep::Error(e.to_string()),
        },
    }
}

fn show_history(calc: &Calculator) -> ReplStep {
    match calc.history(DEFAULT_HISTORY_LIMIT) {
        Ok(records) if records.is_empty() => ReplStep::Output(vec![NO_HISTORY.to_string()]),
        Ok(records) => ReplStep::Output(records.iter().map(format_history_line).collect()),
        Err(e) => ReplStep::Output(vec![format!("Error reading history: {}", e)]),
    }
}

/// `<timestamp> | <expression> = <result>`
pub fn format_history_line(record: &CalculationRecord) -> String {
    format!(
        "{} | {} = {}",
        record.timestamp(),
        record.expression(),
        record.result_text()
    )
}

/// Run the prompt until the user leaves
pub fn run_repl(calc: &Calculator) -> Result<()> {
    let mut rl = DefaultEditor::new().context("Failed to initialize readline")?;

    println!("{}", BANNER.bright_cyan());

    loop {
        match rl.readline(PROMPT) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    // In-session recall only
                    let _ = rl.add_history_entry(line.as_str());
                }

                match process_line(calc, &line) {
                    ReplStep::Skip => continue,
                    ReplStep::Exit => break,
                    ReplStep::Output(lines) => {
                        for out in lines {
                            println!("{}", out);
                        }
                    },
                    ReplStep::Error(msg) => println!("{} {}", "Error:".red(), msg),
                }
            },
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                println!();
                break;
            },
            Err(e) => {
                eprintln!("{} {}", stderr_label("Readline error:", Color::Red), e);
                break;
            },
        }
    }

    println!("Goodbye.");
    Ok(())
}
