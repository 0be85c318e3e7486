//! Theme command handler

use crate::error::CliResult;
use crate::output::Reporter;
use crate::ThemeArgs;
use abacus::theme::{toggle_theme, Theme, ThemeStore};

/// Shows the saved theme, flipping it first when `--toggle` is given
pub fn execute_theme<S: ThemeStore + ?Sized>(
    store: &mut S,
    args: &ThemeArgs,
    reporter: &Reporter,
) -> CliResult<Theme> {
    let theme = if args.toggle {
        let theme = toggle_theme(store)?;
        tracing::info!(%theme, "theme saved");
        theme
    } else {
        store.load()?
    };
    reporter.value(theme.as_str());
    Ok(theme)
}
