//! Abacus CLI entry point

use abacus::theme::FileThemeStore;
use abacus::Calculator;
use abacus_cli::handlers::{
    config::execute_config,
    eval::execute_eval,
    repl::{run_repl, BANNER},
    theme::execute_theme,
};
use abacus_cli::{
    failure_line, logging, AbacusConfig, Cli, CliConfig, CliResult, Commands, Reporter, Verbosity,
};
use clap::Parser;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = build_config(&cli);
    let use_color = config.color.should_color();

    match run(cli, &config, use_color) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", failure_line(&e.to_string(), use_color));
            ExitCode::FAILURE
        }
    }
}

fn build_config(cli: &Cli) -> CliConfig {
    CliConfig::new()
        .with_verbosity(Verbosity::from_flags(cli.quiet, cli.verbose))
        .with_color(cli.color.clone().into())
}

fn run(cli: Cli, config: &CliConfig, use_color: bool) -> CliResult<()> {
    logging::init(config.verbosity, use_color);

    let settings = AbacusConfig::resolve(cli.config.as_deref())?;
    let reporter = Reporter::new(use_color, config.verbosity.is_quiet());
    if config.verbosity.is_verbose() {
        reporter.info(&format!("theme file: {}", settings.theme_path().display()));
    }

    match cli.command {
        Commands::Eval(args) => execute_eval(&settings, &args, &reporter),
        Commands::Repl(args) => {
            if args.prompt {
                reporter.info(BANNER);
            }
            let mut calc = Calculator::with_config(settings.session);
            let mut store = FileThemeStore::new(settings.theme_path());
            let stdin = std::io::stdin();
            run_repl(&mut calc, &mut store, stdin.lock(), std::io::stdout(), args.prompt)
        }
        Commands::Theme(args) => {
            let mut store = FileThemeStore::new(settings.theme_path());
            execute_theme(&mut store, &args, &reporter).map(|_| ())
        }
        Commands::Config(args) => execute_config(&settings, &args, &reporter),
    }
}
