//! Command handlers
//!
//! Each handler takes its parsed arguments and the resolved settings, so the
//! logic can be driven from tests without going through `main`.

pub mod config;
pub mod eval;
pub mod repl;
pub mod theme;
