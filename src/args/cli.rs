use clap::Parser;
use std::time::Duration;

use super::parsers::{parse_duration_arg, parse_header, parse_positive_u64, parse_positive_usize};
use super::types::{LogFormatter, LogLevel, PositiveU64, PositiveUsize};

#[derive(Debug, Parser, Clone)]
#[clap(
    name = "httpt",
    version,
    about = "Repeat one HTTP request from concurrent workers, stream every attempt, and summarize outcome latencies.",
    next_help_heading = "Advanced Options"
)]
pub struct ClientArgs {
    /// Target URL
    #[arg(value_name = "URL", help_heading = "Common Options")]
    pub url: Option<String>,

    /// HTTP method to use for the request
    #[arg(
        long,
        short = 'X',
        default_value = "GET",
        help_heading = "Common Options"
    )]
    pub method: String,

    /// Header as 'Key: Value' or 'Key=Value' (repeatable)
    #[arg(long = "header", short = 'H', value_parser = parse_header, help_heading = "Common Options")]
    pub headers: Vec<(String, String)>,

    /// File to use for the request body, reopened for every attempt
    #[arg(long = "data-file", short = 'f', conflicts_with = "data")]
    pub data_file: Option<String>,

    /// Inline request body
    #[arg(long, short = 'd')]
    pub data: Option<String>,

    /// Accept invalid TLS certificates and hostnames
    #[arg(long, short = 'i')]
    pub insecure: bool,

    /// Disable reuse of TCP connections
    #[arg(long = "disable-keepalive", alias = "disable-keep-alives")]
    pub disable_keepalive: bool,

    /// PEM client certificate (requires --client-key)
    #[arg(long = "client-cert")]
    pub client_cert: Option<String>,

    /// PEM client key (requires --client-cert)
    #[arg(long = "client-key")]
    pub client_key: Option<String>,

    /// Additional PEM root certificate
    #[arg(long)]
    pub cacert: Option<String>,

    /// Timeout per request (e.g. 500ms, 1.5s, 1m30s); 0 waits forever
    #[arg(long, default_value = "0", value_parser = parse_duration_arg)]
    pub timeout: Duration,

    /// Delay between attempts of one worker (e.g. 100ms, 2.5s); 0 means no wait
    #[arg(long, default_value = "0", value_parser = parse_duration_arg, help_heading = "Common Options")]
    pub wait: Duration,

    /// How many times each worker executes the request
    #[arg(long, default_value = "1", value_parser = parse_positive_u64, help_heading = "Common Options")]
    pub times: PositiveU64,

    /// How many concurrent workers to run
    #[arg(long, default_value = "1", value_parser = parse_positive_usize, help_heading = "Common Options")]
    pub workers: PositiveUsize,

    /// Capacity of the queue between each worker and its monitor
    #[arg(long = "monitor-buffer", default_value = "1", value_parser = parse_positive_usize)]
    pub monitor_buffer: PositiveUsize,

    /// Record outcomes and print a summary at the end
    #[arg(long, help_heading = "Common Options")]
    pub stats: bool,

    /// Logging level
    #[arg(long = "log-level", default_value = "info", value_enum, ignore_case = true)]
    pub log_level: LogLevel,

    /// Logging formatter
    #[arg(long, default_value = "default", value_enum, ignore_case = true)]
    pub formatter: LogFormatter,

    /// Log verbosely (same as --log-level debug)
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Path to a TOML or JSON config file
    #[arg(long, short = 'c')]
    pub config: Option<String>,
}
