//! simpcalc - Simple Calculator CLI

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Color;
use common::Settings;
use simpcalc::output::stderr_label;
use simpcalc::{repl, Calculator};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "simpcalc")]
#[command(about = "simpcalc - Simple Calculator CLI")]
#[command(long_about = "simpcalc - Simple Calculator CLI

Supports + - * / % and ** (right-associative), parentheses and unary minus.

Examples:
  simpcalc eval \"2+3*4\"                  # 14
  simpcalc eval \"(1+2)**2\" --persist     # 9, saved to history
  simpcalc repl                          # Interactive prompt

Environment:
  SIMPCALC_HISTORY_FILE   History file (default data/history.json)
  LOG_LEVEL               Log level (default info)
  MAX_EXPRESSION_LENGTH   Longest accepted expression (default 1000)")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// History file, overrides SIMPCALC_HISTORY_FILE
    #[arg(long, global = true, value_name = "PATH")]
    history_file: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a single expression and print the result
    Eval {
        /// Expression to evaluate, e.g. "2+3*4"
        #[arg(allow_hyphen_values = true)]
        expression: String,

        /// Persist calculation to history file
        #[arg(long, overrides_with = "no_persist")]
        persist: bool,

        /// Do not persist calculation (default)
        #[arg(long, overrides_with = "persist")]
        no_persist: bool,
    },
    /// Start an interactive prompt for evaluating expressions
    Repl,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {:#}", stderr_label("Unexpected error:", Color::Red), e);
            ExitCode::FAILURE
        },
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let settings = Settings::load().context("Failed to load configuration")?;

    let level = if cli.verbose {
        "debug"
    } else {
        settings.log_level.as_str()
    };
    if let Err(e) = common::logging::init(level) {
        eprintln!(
            "{} failed to initialize logging: {}",
            stderr_label("Warning:", Color::Yellow),
            e
        );
    }

    let mut calc = Calculator::new(&settings);
    if let Some(path) = cli.history_file {
        calc = calc.with_history_file(path);
    }
    tracing::debug!("History file: {:?}", calc.history_file());

    match cli.command {
        Commands::Eval {
            expression,
            persist,
            no_persist: _,
        } => Ok(eval_command(&calc, &expression, persist)),
        Commands::Repl => {
            repl::run_repl(&calc)?;
            Ok(ExitCode::SUCCESS)
        },
    }
}

fn eval_command(calc: &Calculator, expression: &str, persist: bool) -> ExitCode {
    match calc.evaluate(expression, persist) {
        Ok(record) => {
            println!("{} = {}", record.expression(), record.result_text());
            ExitCode::SUCCESS
        },
        Err(e) => {
            let label = format!("{}:", e.kind().label());
            eprintln!("{} {}", stderr_label(&label, Color::Red), e);
            ExitCode::from(u8::try_from(e.exit_code()).unwrap_or(1))
        },
    }
}
