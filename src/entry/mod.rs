use std::ffi::OsString;
use std::path::Path;
use std::sync::Arc;

use clap::{ArgMatches, CommandFactory, FromArgMatches};
use tracing::debug;

use crate::args::ClientArgs;
use crate::config::{DEFAULT_CONFIG_FILES, apply_config, load_config};
use crate::engine::{Orchestrator, RunConfig};
use crate::error::AppResult;
use crate::http::{HttpDispatcher, build_client, build_request_spec};

/// Parses arguments, validates everything fatal, then runs the workers.
///
/// # Errors
///
/// Returns an error for invalid arguments or configuration, for request or
/// client setup failures, and when a worker task panics.
pub fn run() -> AppResult<()> {
    let (mut args, matches) = match parse_args()? {
        Some(parsed) => parsed,
        None => return Ok(()),
    };

    if let Some(config) = load_config(args.config.as_deref())? {
        apply_config(&mut args, &matches, &config)?;
    }

    crate::system::logger::init_logging(args.log_level, args.verbose, args.formatter);

    let spec = build_request_spec(&args)?;
    let client = build_client(&args)?;
    let config = RunConfig::from_args(&args);
    debug!(method = %spec.method(), url = %spec.target(), "request prepared");

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    let orchestrator = Orchestrator::new(Arc::new(HttpDispatcher::new(client)), spec, config);
    runtime.block_on(orchestrator.run()).map(drop)
}

fn parse_args() -> AppResult<Option<(ClientArgs, ArgMatches)>> {
    let mut cmd = ClientArgs::command();
    let raw_args: Vec<OsString> = std::env::args_os().collect();

    if should_show_help(&raw_args) {
        cmd.print_help()?;
        println!();
        return Ok(None);
    }

    let matches = cmd.get_matches_from(raw_args);
    let args = ClientArgs::from_arg_matches(&matches)?;

    Ok(Some((args, matches)))
}

fn should_show_help(raw_args: &[OsString]) -> bool {
    let treat_as_empty =
        matches!(raw_args, [] | [_]) || matches!(raw_args, [_, second] if second == "--");
    if !treat_as_empty {
        return false;
    }

    !has_default_config()
}

fn has_default_config() -> bool {
    DEFAULT_CONFIG_FILES
        .iter()
        .any(|path| Path::new(path).exists())
}
