use std::time::Duration;

use serde::Deserialize;

use crate::args::parsers::parse_duration_arg;
use crate::args::{LogFormatter, LogLevel};
use crate::error::AppResult;

/// File-backed defaults for every CLI option.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub url: Option<String>,
    pub method: Option<String>,
    pub headers: Option<Vec<String>>,
    pub data: Option<String>,
    pub data_file: Option<String>,
    pub insecure: Option<bool>,
    #[serde(alias = "disable_keep_alives")]
    pub disable_keepalive: Option<bool>,
    pub client_cert: Option<String>,
    pub client_key: Option<String>,
    pub cacert: Option<String>,
    pub timeout: Option<DurationValue>,
    pub wait: Option<DurationValue>,
    pub times: Option<u64>,
    pub workers: Option<usize>,
    pub monitor_buffer: Option<usize>,
    pub stats: Option<bool>,
    pub log_level: Option<LogLevel>,
    pub formatter: Option<LogFormatter>,
}

/// Either a number of seconds or a suffixed string such as `"250ms"`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DurationValue {
    Seconds(u64),
    Text(String),
}

impl DurationValue {
    pub(crate) fn to_duration(&self) -> AppResult<Duration> {
        match self {
            DurationValue::Seconds(secs) => Ok(Duration::from_secs(*secs)),
            DurationValue::Text(text) => parse_duration_arg(text),
        }
    }
}
