//! Abacus CLI: command-line front end for the abacus calculator
//!
//! ## Usage
//!
//! ```bash
//! abacus eval "2 + 3 * 4"        # 14
//! abacus eval --json "1/0"       # structured failure
//! abacus repl                    # one expression per line on stdin
//! abacus theme --toggle          # flip and save light/dark
//! abacus config --yaml           # print effective settings
//! ```

#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![warn(missing_docs)]

mod commands;
mod config;
mod error;
pub mod handlers;
pub mod logging;
pub mod output;

pub use commands::{Cli, ColorArg, Commands, ConfigArgs, EvalArgs, ReplArgs, ThemeArgs};
pub use config::{AbacusConfig, CliConfig, ColorChoice, Verbosity};
pub use error::{CliError, CliResult};
pub use output::{failure_line, Reporter};
