//! CLI configuration
//!
//! [`CliConfig`] comes from global flags. [`AbacusConfig`] is the optional
//! YAML settings file.

use crate::error::{CliError, CliResult};
use abacus::SessionConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// CLI verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Verbosity {
    /// Quiet - minimal output
    Quiet,
    /// Normal - default output
    #[default]
    Normal,
    /// Verbose - extra output
    Verbose,
    /// Debug - maximum output
    Debug,
    /// Trace - every evaluation is logged
    Trace,
}

impl Verbosity {
    /// Maps `-q` and the `-v` count to a level
    #[must_use]
    pub const fn from_flags(quiet: bool, verbose: u8) -> Self {
        if quiet {
            return Self::Quiet;
        }
        match verbose {
            0 => Self::Normal,
            1 => Self::Verbose,
            2 => Self::Debug,
            _ => Self::Trace,
        }
    }

    /// Check if quiet mode
    #[must_use]
    pub const fn is_quiet(self) -> bool {
        matches!(self, Self::Quiet)
    }

    /// Check if verbose or higher
    #[must_use]
    pub const fn is_verbose(self) -> bool {
        matches!(self, Self::Verbose | Self::Debug | Self::Trace)
    }

    /// Default log filter directive for this level
    #[must_use]
    pub const fn log_directive(self) -> &'static str {
        match self {
            Self::Quiet => "error",
            Self::Normal => "warn",
            Self::Verbose => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

/// Color output choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ColorChoice {
    /// Always use colors
    Always,
    /// Use colors when output is a terminal
    #[default]
    Auto,
    /// Never use colors
    Never,
}

impl ColorChoice {
    /// Should use colors based on output detection
    #[must_use]
    pub fn should_color(self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => console::Term::stdout().features().colors_supported(),
        }
    }
}

/// Settings derived from global CLI flags
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Verbosity level
    pub verbosity: Verbosity,
    /// Color output choice
    pub color: ColorChoice,
}

impl CliConfig {
    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set verbosity
    #[must_use]
    pub const fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Set color choice
    #[must_use]
    pub const fn with_color(mut self, color: ColorChoice) -> Self {
        self.color = color;
        self
    }
}

/// Contents of the YAML settings file.
///
/// ```yaml
/// max_input_length: 100
/// max_decimal_places: 10
/// theme_file: /home/me/.config/abacus/theme.json
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AbacusConfig {
    /// Session limits
    #[serde(flatten)]
    pub session: SessionConfig,
    /// Where the theme preference is stored
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme_file: Option<PathBuf>,
}

impl AbacusConfig {
    /// File name looked up inside the config directory
    pub const FILE_NAME: &'static str = "config.yaml";

    /// Default per-user config directory (`<config dir>/abacus`)
    #[must_use]
    pub fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("abacus"))
    }

    /// Default settings file path
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join(Self::FILE_NAME))
    }

    /// Parses settings from YAML text and validates them
    pub fn from_yaml(text: &str) -> CliResult<Self> {
        let config: Self = if text.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml_ng::from_str(text)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Reads settings from `path`
    pub fn load(path: &Path) -> CliResult<Self> {
        let text = fs::read_to_string(path).map_err(|e| {
            CliError::config(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_yaml(&text)
    }

    /// Resolves the settings to use.
    ///
    /// An explicit path must exist. Without one, the default location is
    /// used when present and built-in defaults otherwise.
    pub fn resolve(explicit: Option<&Path>) -> CliResult<Self> {
        if let Some(path) = explicit {
            tracing::debug!(path = %path.display(), "loading config");
            return Self::load(path);
        }
        match Self::default_path() {
            Some(path) if path.is_file() => {
                tracing::debug!(path = %path.display(), "loading default config");
                Self::load(&path)
            }
            _ => Ok(Self::default()),
        }
    }

    /// Rejects limits that would make the calculator unusable
    pub fn validate(&self) -> CliResult<()> {
        if self.session.max_input_length == 0 {
            return Err(CliError::config("max_input_length must be at least 1"));
        }
        if self.session.max_decimal_places > 17 {
            return Err(CliError::config("max_decimal_places must be at most 17"));
        }
        Ok(())
    }

    /// Effective theme preference path
    #[must_use]
    pub fn theme_path(&self) -> PathBuf {
        self.theme_file.clone().unwrap_or_else(|| {
            Self::config_dir().map_or_else(
                || PathBuf::from(".abacus-theme.json"),
                |dir| dir.join("theme.json"),
            )
        })
    }
}
