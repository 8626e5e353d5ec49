//! tweetcheck CLI
#![deny(unsafe_code)]

use anyhow::Context;
use clap::Parser;
use tracing::debug;
use tweetcheck::commands::entity::EntityCheck;
use tweetcheck::{Cli, Commands, commands};
use tweetcheck_core::config::ConfigLoader;

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

    let obs_config = observability::ObservabilityConfig::from_env_with_overrides(
        config
            .log_dir
            .as_ref()
            .map(|dir| dir.as_std_path().to_path_buf()),
    );
    let env_filter = observability::env_filter(cli.quiet, cli.verbose, config.log_level.as_str());
    let _guard = observability::init_observability(&obs_config, env_filter)
        .context("failed to initialize logging/tracing")?;

    debug!(
        verbose = cli.verbose,
        quiet = cli.quiet,
        json = cli.json,
        color = ?cli.color,
        chdir = ?cli.chdir,
        config_file = ?config_sources.primary_file(),
        "CLI initialized"
    );

    let max_input = config.input_limit();

    let result = match command {
        Commands::Parse(args) => {
            commands::parse::cmd_parse(args, cli.json, config.max_weighted_length(), max_input)
        }
        Commands::Validate(args) => commands::validate::cmd_validate(
            args,
            cli.json,
            config.legacy_max_length(),
            max_input,
        ),
        Commands::Length(args) => commands::length::cmd_length(args, cli.json, max_input),
        Commands::Url(args) => commands::url::cmd_url(
            args,
            cli.json,
            config.require_protocol(),
            config.allow_unicode_domains(),
        ),
        Commands::Username(args) => {
            commands::entity::cmd_entity(args, EntityCheck::Username, cli.json)
        }
        Commands::List(args) => commands::entity::cmd_entity(args, EntityCheck::List, cli.json),
        Commands::Hashtag(args) => {
            commands::entity::cmd_entity(args, EntityCheck::Hashtag, cli.json)
        }
        Commands::Extract(args) => commands::extract::cmd_extract(args, cli.json, max_input),
        Commands::Info(args) => commands::info::cmd_info(args, cli.json, &config, &config_sources),
    };
    match result {
        Err(ref err) if commands::is_check_failure(err) => {
            debug!(reason = %err, "input rejected");
        }
        Err(ref err) => tracing::error!(error = %err, "fatal error"),
        Ok(()) => {}
    }
    result
}
