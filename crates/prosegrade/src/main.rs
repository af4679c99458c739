//! prosegrade CLI
#![deny(unsafe_code)]

use anyhow::Context;
use clap::Parser;
use prosegrade::{Cli, Commands, commands};
use prosegrade_core::{ConfigLoader, Engine};
use tracing::debug;

mod observability;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    cli.color.apply();

    if cli.version_only {
        println!("{}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    // arg_required_else_help ensures we have --version-only or a subcommand
    let Some(command) = cli.command else {
        return Ok(());
    };

    if let Some(ref dir) = cli.chdir {
        std::env::set_current_dir(dir)
            .with_context(|| format!("failed to change directory to {}", dir.display()))?;
    }

    let cwd = std::env::current_dir().context("failed to determine current directory")?;
    let cwd = camino::Utf8PathBuf::try_from(cwd).map_err(|e| {
        anyhow::anyhow!(
            "current directory is not valid UTF-8: {}",
            e.into_path_buf().display()
        )
    })?;
    let mut loader = ConfigLoader::new().with_project_search(&cwd);
    if let Some(ref config_path) = cli.config {
        let config_path = camino::Utf8PathBuf::try_from(config_path.clone()).map_err(|e| {
            anyhow::anyhow!(
                "config path is not valid UTF-8: {}",
                e.into_path_buf().display()
            )
        })?;
        loader = loader.with_file(&config_path);
    }
    let (config, config_sources) = loader.load().context("failed to load configuration")?;

    let env_filter = observability::env_filter(cli.quiet, cli.verbose, config.log_level.as_str());
    observability::init(env_filter)?;

    debug!(
        verbose = cli.verbose,
        quiet = cli.quiet,
        json = cli.json,
        color = ?cli.color,
        chdir = ?cli.chdir,
        "CLI initialized"
    );

    let max_input = if config.disable_input_limit {
        None
    } else {
        config
            .max_input_bytes
            .or(Some(prosegrade_core::DEFAULT_MAX_INPUT_BYTES))
    };

    let engine = Engine::from_config(config).context("invalid configuration")?;

    // Execute command
    let result = match command {
        Commands::Score(args) => commands::score::cmd_score(args, cli.json, &engine, max_input),
        Commands::Stats(args) => commands::stats::cmd_stats(args, cli.json, &engine, max_input),
        Commands::Hardwords(args) => {
            commands::hardwords::cmd_hardwords(args, cli.json, &engine, max_input)
        }
        Commands::Tests(args) => commands::tests::cmd_tests(args, cli.json, &engine),
        Commands::Goals(args) => commands::goals::cmd_goals(args, cli.json, &engine, max_input),
        Commands::Info(args) => {
            commands::info::cmd_info(args, cli.json, engine.config(), &config_sources)
        }
    };
    if let Err(ref err) = result {
        tracing::error!(error = %err, "fatal error");
    }
    result
}
