//! Repl command handler
//!
//! A line is either an expression, which replaces the operation line and is
//! calculated, or a `:command` acting on the session. Session failures are
//! printed and the loop carries on; only I/O errors end it.

use crate::error::CliResult;
use abacus::session::UnaryOp;
use abacus::theme::{toggle_theme, ThemeStore};
use abacus::Calculator;
use std::io::{BufRead, Write};

/// Shown before the first prompt
pub const BANNER: &str = "abacus repl: enter an expression, or :quit to leave";

/// One parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    /// Calculate an expression
    Expression(String),
    /// Apply √ or x² to the current value
    Unary(UnaryOp),
    /// M+
    MemoryAdd,
    /// M-
    MemorySubtract,
    /// MC
    MemoryClear,
    /// MR: replaces the line with the memory value and calculates it
    MemoryRecall,
    /// Clear the screen
    Clear,
    /// Toggle and save the theme
    Theme,
    /// Leave the loop
    Quit,
    /// Unrecognised `:command`
    Unknown(String),
}

impl ReplCommand {
    /// Parses a trimmed, non-empty line
    #[must_use]
    pub fn parse(line: &str) -> Self {
        let Some(command) = line.strip_prefix(':') else {
            return Self::Expression(line.to_string());
        };
        match command.trim() {
            "sqrt" => Self::Unary(UnaryOp::Sqrt),
            "sq" | "square" => Self::Unary(UnaryOp::Square),
            "m+" => Self::MemoryAdd,
            "m-" => Self::MemorySubtract,
            "mc" => Self::MemoryClear,
            "mr" => Self::MemoryRecall,
            "clear" | "c" => Self::Clear,
            "theme" => Self::Theme,
            "quit" | "q" | "exit" => Self::Quit,
            other => Self::Unknown(other.to_string()),
        }
    }
}

/// Runs the loop until end of input or `:quit`
pub fn run_repl<R, W, S>(
    calc: &mut Calculator,
    store: &mut S,
    input: R,
    mut output: W,
    prompt: bool,
) -> CliResult<()>
where
    R: BufRead,
    W: Write,
    S: ThemeStore + ?Sized,
{
    let mut lines = input.lines();
    loop {
        if prompt {
            write!(output, "> ")?;
            output.flush()?;
        }
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let command = ReplCommand::parse(line);
        tracing::debug!(?command, "repl");
        if command == ReplCommand::Quit {
            break;
        }
        if let Some(text) = step(calc, store, command) {
            writeln!(output, "{text}")?;
        }
    }
    Ok(())
}

/// Runs one command and returns the line to print, if any
fn step<S: ThemeStore + ?Sized>(
    calc: &mut Calculator,
    store: &mut S,
    command: ReplCommand,
) -> Option<String> {
    let outcome = match command {
        ReplCommand::Expression(expr) => calc
            .set_expression(&expr)
            .and_then(|()| calc.calculate())
            .map(|_| Some(calc.screen().result().to_string())),
        ReplCommand::Unary(op) => calc
            .apply(op)
            .map(|_| Some(calc.screen().result().to_string())),
        ReplCommand::MemoryAdd => {
            calc.memory_add();
            Ok(Some(memory_line(calc)))
        }
        ReplCommand::MemorySubtract => {
            calc.memory_subtract();
            Ok(Some(memory_line(calc)))
        }
        ReplCommand::MemoryClear => {
            calc.memory_clear();
            Ok(Some(memory_line(calc)))
        }
        ReplCommand::MemoryRecall => {
            calc.clear();
            calc.memory_recall()
                .and_then(|()| calc.calculate())
                .map(|_| Some(calc.screen().result().to_string()))
        }
        ReplCommand::Clear => {
            calc.clear();
            Ok(None)
        }
        ReplCommand::Theme => {
            return Some(match toggle_theme(store) {
                Ok(theme) => format!("theme: {theme}"),
                Err(e) => format!("Error: {e}"),
            });
        }
        ReplCommand::Unknown(name) => return Some(format!("Error: unknown command ':{name}'")),
        ReplCommand::Quit => Ok(None),
    };

    match outcome {
        Ok(text) => text,
        Err(e) => Some(format!("Error: {e}")),
    }
}

fn memory_line(calc: &Calculator) -> String {
    format!("M = {}", calc.screen().format(calc.memory().recall()))
}
