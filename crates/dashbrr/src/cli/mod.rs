//! Process-level CLI: argument parsing, configuration and the run loop.

pub mod error;
pub mod setup;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command as ClapCommand};
use dashbrr_core::{load_config, CommandContext, OutputFormat};

pub use self::error::{format_error, get_exit_code, output_json_error};
use crate::{
    bootstrap::{build_registry, Collaborators},
    dispatch::Dispatcher,
};

pub fn build_cli() -> ClapCommand {
    ClapCommand::new("dashbrr")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Register and inspect autobrr, arr and media services")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_name("PATH")
                .value_parser(value_parser!(PathBuf))
                .help("Config file to load on top of the global one"),
        )
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .value_name("PATH")
                .value_parser(value_parser!(PathBuf))
                .help("SQLite database file (overrides config and DASHBRR_DB_PATH)"),
        )
        .subcommand(
            ClapCommand::new("run")
                .about("Run a dashbrr command")
                .disable_help_flag(true)
                .after_help("Run 'dashbrr run help' to list the available commands.")
                .arg(
                    Arg::new("args")
                        .num_args(0..)
                        .trailing_var_arg(true)
                        .allow_hyphen_values(true)
                        .action(ArgAction::Append)
                        .value_name("COMMAND"),
                ),
        )
}

/// Parse arguments, wire the registry and dispatch.
///
/// # Errors
///
/// Returns configuration, database and command errors; callers map them to an
/// exit code with [`get_exit_code`].
pub async fn run_cli() -> Result<()> {
    let matches = build_cli().get_matches();
    run_with_matches(&matches).await
}

async fn run_with_matches(matches: &ArgMatches) -> Result<()> {
    let explicit = matches.get_one::<PathBuf>("config");
    let mut config = load_config(explicit.map(PathBuf::as_path))
        .await
        .context("Failed to load configuration")?;
    if let Some(db) = matches.get_one::<PathBuf>("db") {
        config.database_path.clone_from(db);
    }

    setup::init_tracing(&config.log_level)?;
    tracing::debug!(database = %config.database_path.display(), "configuration loaded");

    let args: Vec<String> = matches
        .subcommand_matches("run")
        .and_then(|run| run.get_many::<String>("args"))
        .map(|values| values.cloned().collect())
        .unwrap_or_default();

    let collaborators = Collaborators::open(&config)?;
    let registry = build_registry(&collaborators)?;
    let ctx = CommandContext::new(OutputFormat::Human, config.probe_timeout());

    Dispatcher::new(registry, ctx).dispatch(&args).await?;
    Ok(())
}
