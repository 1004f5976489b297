use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::args::{ClientArgs, PositiveU64, PositiveUsize};
use crate::http::Outcome;
use crate::stats::StatsReport;

/// One attempt as seen by a monitor.
#[derive(Debug)]
pub struct AttemptResult {
    /// Wall-clock time taken just before dispatch.
    pub start: DateTime<Utc>,
    /// Dispatch through the end of the body read, or until failure.
    pub duration: Duration,
    pub outcome: Outcome,
}

/// Scalar parameters of one run.
#[derive(Debug, Clone, Copy)]
pub struct RunConfig {
    /// Attempts issued by each worker.
    pub times: PositiveU64,
    pub workers: PositiveUsize,
    /// Pause between consecutive attempts of a worker; zero disables it.
    pub wait: Duration,
    /// Capacity of each worker-to-monitor queue.
    pub monitor_buffer: PositiveUsize,
    pub report_stats: bool,
}

impl RunConfig {
    #[must_use]
    pub const fn from_args(args: &ClientArgs) -> Self {
        Self {
            times: args.times,
            workers: args.workers,
            wait: args.wait,
            monitor_buffer: args.monitor_buffer,
            report_stats: args.stats,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RunReport {
    /// Results classified by all monitors together.
    pub observed: u64,
    /// Present only when statistics were enabled.
    pub stats: Option<StatsReport>,
}
