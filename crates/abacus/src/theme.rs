//! Theme preference and its persistence
//!
//! The preference is a single string, `"dark"` or `"light"`, stored under
//! the key [`THEME_KEY`].

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Key the preference is stored under
pub const THEME_KEY: &str = "calculatorTheme";

/// Result type for theme persistence
pub type ThemeResult<T> = Result<T, ThemeError>;

/// Errors reading or writing the preference
#[derive(Debug, Error)]
pub enum ThemeError {
    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Preference file is not valid JSON
    #[error("Invalid preferences file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Colour theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light background (default)
    #[default]
    Light,
    /// Dark background
    Dark,
}

impl Theme {
    /// The stored string form
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Reads a stored value; anything but `"dark"` is light
    #[must_use]
    pub fn from_stored(value: &str) -> Self {
        if value == "dark" {
            Self::Dark
        } else {
            Self::Light
        }
    }

    /// The other theme
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the theme preference lives
pub trait ThemeStore {
    /// Loads the stored theme, falling back to [`Theme::Light`]
    fn load(&self) -> ThemeResult<Theme>;

    /// Persists `theme`
    fn save(&mut self, theme: Theme) -> ThemeResult<()>;
}

/// Flips the stored theme and returns the new one
pub fn toggle_theme<S: ThemeStore + ?Sized>(store: &mut S) -> ThemeResult<Theme> {
    let theme = store.load()?.toggled();
    store.save(theme)?;
    Ok(theme)
}

/// In-process store
#[derive(Debug, Clone, Default)]
pub struct MemoryThemeStore {
    value: Option<String>,
}

impl MemoryThemeStore {
    /// Creates an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding a raw stored string
    #[must_use]
    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
        }
    }

    /// The raw stored string, if any
    #[must_use]
    pub fn raw(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

impl ThemeStore for MemoryThemeStore {
    fn load(&self) -> ThemeResult<Theme> {
        Ok(self.value.as_deref().map_or(Theme::Light, Theme::from_stored))
    }

    fn save(&mut self, theme: Theme) -> ThemeResult<()> {
        self.value = Some(theme.as_str().to_string());
        Ok(())
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Preferences {
    #[serde(rename = "calculatorTheme", default, skip_serializing_if = "Option::is_none")]
    theme: Option<String>,
}

/// JSON preferences file on disk
#[derive(Debug, Clone)]
pub struct FileThemeStore {
    path: PathBuf,
}

impl FileThemeStore {
    /// Uses the file at `path`; it need not exist yet
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the preferences file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> ThemeResult<Preferences> {
        match fs::read_to_string(&self.path) {
            Ok(text) if text.trim().is_empty() => Ok(Preferences::default()),
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Preferences::default()),
            Err(e) => Err(e.into()),
        }
    }
}

impl ThemeStore for FileThemeStore {
    fn load(&self) -> ThemeResult<Theme> {
        let prefs = self.read()?;
        Ok(prefs.theme.as_deref().map_or(Theme::Light, Theme::from_stored))
    }

    fn save(&mut self, theme: Theme) -> ThemeResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let prefs = Preferences {
            theme: Some(theme.as_str().to_string()),
        };
        fs::write(&self.path, serde_json::to_string_pretty(&prefs)?)?;
        tracing::debug!(path = %self.path.display(), %theme, "saved theme");
        Ok(())
    }
}
