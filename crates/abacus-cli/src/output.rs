//! Terminal output

use console::{style, Term};

/// Writes results and failures to the terminal
#[derive(Debug)]
pub struct Reporter {
    out: Term,
    err: Term,
    /// Whether to use colors
    pub use_color: bool,
    /// Quiet mode
    pub quiet: bool,
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new(true, false)
    }
}

impl Reporter {
    /// Create a new reporter
    #[must_use]
    pub fn new(use_color: bool, quiet: bool) -> Self {
        Self {
            out: Term::stdout(),
            err: Term::stderr(),
            use_color,
            quiet,
        }
    }

    /// Print a value on stdout; always shown, even in quiet mode
    pub fn value(&self, text: &str) {
        let line = if self.use_color {
            style(text).bold().to_string()
        } else {
            text.to_string()
        };
        let _ = self.out.write_line(&line);
    }

    /// Print a failure message on stderr
    pub fn failure(&self, message: &str) {
        let _ = self.err.write_line(&failure_line(message, self.use_color));
    }

    /// Print an informational line on stderr, keeping stdout for values.
    /// Suppressed in quiet mode.
    pub fn info(&self, message: &str) {
        if let Some(line) = info_line(message, self.use_color, self.quiet) {
            let _ = self.err.write_line(&line);
        }
    }
}

/// Formats an informational line, or `None` when quiet
#[must_use]
pub fn info_line(message: &str, use_color: bool, quiet: bool) -> Option<String> {
    if quiet {
        None
    } else if use_color {
        Some(style(message).dim().to_string())
    } else {
        Some(message.to_string())
    }
}

/// Formats a failure line, styled or plain
#[must_use]
pub fn failure_line(message: &str, use_color: bool) -> String {
    if use_color {
        format!("{} {message}", style("✗").red().bold())
    } else {
        format!("Error: {message}")
    }
}
