//! Config command handler

use crate::config::AbacusConfig;
use crate::error::CliResult;
use crate::output::Reporter;
use crate::ConfigArgs;

/// Renders the effective settings.
///
/// The YAML form includes the resolved theme path so it can be saved and
/// reused as-is.
pub fn render_config(settings: &AbacusConfig, yaml: bool) -> CliResult<String> {
    if yaml {
        let resolved = AbacusConfig {
            theme_file: Some(settings.theme_path()),
            ..settings.clone()
        };
        return Ok(serde_yaml_ng::to_string(&resolved)?);
    }

    Ok(format!(
        "max_input_length:   {}\nmax_decimal_places: {}\ntheme_file:         {}",
        settings.session.max_input_length,
        settings.session.max_decimal_places,
        settings.theme_path().display(),
    ))
}

/// Execute the config command
pub fn execute_config(
    settings: &AbacusConfig,
    args: &ConfigArgs,
    reporter: &Reporter,
) -> CliResult<()> {
    let text = render_config(settings, args.yaml)?;
    reporter.value(text.trim_end());
    Ok(())
}
