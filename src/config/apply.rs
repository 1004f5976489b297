use clap::ArgMatches;
use clap::parser::ValueSource;

use crate::args::{ClientArgs, PositiveU64, PositiveUsize, parse_header};
use crate::error::{AppError, AppResult, ConfigError};

use super::types::{ConfigFile, DurationValue};

/// Applies configuration values to CLI arguments.
///
/// Values given explicitly on the command line always win.
///
/// # Errors
///
/// Returns an error when config values are invalid or conflict with each other.
pub fn apply_config(
    args: &mut ClientArgs,
    matches: &ArgMatches,
    config: &ConfigFile,
) -> AppResult<()> {
    if config.data.is_some() && config.data_file.is_some() {
        return Err(AppError::config(ConfigError::Conflict {
            left: "data",
            right: "data_file",
        }));
    }

    if !is_cli(matches, "url")
        && let Some(url) = config.url.clone()
    {
        args.url = Some(url);
    }

    if !is_cli(matches, "method")
        && let Some(method) = config.method.clone()
    {
        args.method = method;
    }

    if !is_cli(matches, "headers")
        && let Some(headers) = config.headers.as_ref()
    {
        args.headers = parse_headers(headers)?;
    }

    if !is_cli(matches, "data") && !is_cli(matches, "data_file") {
        if let Some(data) = config.data.clone() {
            args.data = Some(data);
            args.data_file = None;
        }
        if let Some(data_file) = config.data_file.clone() {
            args.data_file = Some(data_file);
            args.data = None;
        }
    }

    if !is_cli(matches, "insecure")
        && let Some(insecure) = config.insecure
    {
        args.insecure = insecure;
    }

    if !is_cli(matches, "disable_keepalive")
        && let Some(disable) = config.disable_keepalive
    {
        args.disable_keepalive = disable;
    }

    if !is_cli(matches, "client_cert")
        && let Some(cert) = config.client_cert.clone()
    {
        args.client_cert = Some(cert);
    }

    if !is_cli(matches, "client_key")
        && let Some(key) = config.client_key.clone()
    {
        args.client_key = Some(key);
    }

    if !is_cli(matches, "cacert")
        && let Some(cacert) = config.cacert.clone()
    {
        args.cacert = Some(cacert);
    }

    if !is_cli(matches, "timeout")
        && let Some(timeout) = config.timeout.as_ref()
    {
        args.timeout = to_duration(timeout, "timeout")?;
    }

    if !is_cli(matches, "wait")
        && let Some(wait) = config.wait.as_ref()
    {
        args.wait = to_duration(wait, "wait")?;
    }

    if !is_cli(matches, "times")
        && let Some(times) = config.times
    {
        args.times = ensure_positive_u64(times, "times")?;
    }

    if !is_cli(matches, "workers")
        && let Some(workers) = config.workers
    {
        args.workers = ensure_positive_usize(workers, "workers")?;
    }

    if !is_cli(matches, "monitor_buffer")
        && let Some(buffer) = config.monitor_buffer
    {
        args.monitor_buffer = ensure_positive_usize(buffer, "monitor_buffer")?;
    }

    if !is_cli(matches, "stats")
        && let Some(stats) = config.stats
    {
        args.stats = stats;
    }

    if !is_cli(matches, "log_level")
        && let Some(level) = config.log_level
    {
        args.log_level = level;
    }

    if !is_cli(matches, "formatter")
        && let Some(formatter) = config.formatter
    {
        args.formatter = formatter;
    }

    Ok(())
}

fn is_cli(matches: &ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(ValueSource::CommandLine)
}

fn ensure_positive_u64(value: u64, field: &str) -> AppResult<PositiveU64> {
    PositiveU64::try_from(value).map_err(|err| {
        AppError::config(ConfigError::FieldMustBePositive {
            field: field.to_owned(),
            source: err,
        })
    })
}

fn ensure_positive_usize(value: usize, field: &str) -> AppResult<PositiveUsize> {
    PositiveUsize::try_from(value).map_err(|err| {
        AppError::config(ConfigError::FieldMustBePositive {
            field: field.to_owned(),
            source: err,
        })
    })
}

fn to_duration(value: &DurationValue, field: &str) -> AppResult<std::time::Duration> {
    value.to_duration().map_err(|err| match err {
        AppError::Validation(source) => AppError::config(ConfigError::InvalidDuration {
            field: field.to_owned(),
            source,
        }),
        other => other,
    })
}

fn parse_headers(headers: &[String]) -> AppResult<Vec<(String, String)>> {
    let mut parsed = Vec::with_capacity(headers.len());
    for header in headers {
        parsed.push(
            parse_header(header)
                .map_err(|err| AppError::config(ConfigError::InvalidHeader { source: err }))?,
        );
    }
    Ok(parsed)
}
