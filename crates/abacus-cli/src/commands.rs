//! CLI command definitions using clap

use crate::config::ColorChoice;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Abacus: a calculator that evaluates arithmetic safely
#[derive(Parser, Debug)]
#[command(name = "abacus")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Settings file (YAML)
    #[arg(long, global = true, env = "ABACUS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Evaluate an expression and print the result
    Eval(EvalArgs),

    /// Interactive calculator reading lines from stdin
    ///
    /// Each line is an expression, or one of the commands
    /// :sqrt :sq :m+ :m- :mc :mr :clear :theme :quit
    ///
    /// Every expression line replaces the previous one, so :mr starts a
    /// fresh line holding the memory value and prints it.
    Repl(ReplArgs),

    /// Show or toggle the saved theme
    Theme(ThemeArgs),

    /// Show effective configuration
    Config(ConfigArgs),
}

/// Arguments for the eval command
#[derive(Parser, Debug)]
pub struct EvalArgs {
    /// Expression to evaluate; multiple words are joined with spaces
    #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
    pub expression: Vec<String>,

    /// Print the outcome as JSON
    #[arg(long)]
    pub json: bool,
}

impl EvalArgs {
    /// The expression as a single string
    #[must_use]
    pub fn joined(&self) -> String {
        self.expression.join(" ")
    }
}

/// Arguments for the repl command
#[derive(Parser, Debug)]
pub struct ReplArgs {
    /// Print a prompt before each line
    #[arg(long)]
    pub prompt: bool,
}

/// Arguments for the theme command
#[derive(Parser, Debug)]
pub struct ThemeArgs {
    /// Flip between light and dark and save
    #[arg(short, long)]
    pub toggle: bool,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Print as YAML, ready to save as a settings file
    #[arg(long)]
    pub yaml: bool,
}

/// Color argument for CLI
#[derive(ValueEnum, Clone, Debug, Default)]
pub enum ColorArg {
    /// Automatic detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}
