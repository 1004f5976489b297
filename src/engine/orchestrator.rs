use std::sync::Arc;

use tracing::{debug, info};

use crate::error::AppResult;
use crate::http::{Dispatch, RequestSpec};
use crate::stats::{StatsAggregator, summary_lines};

use super::monitor::Monitor;
use super::types::{RunConfig, RunReport};
use super::worker::Worker;

/// Runs `workers` worker/monitor pairs against one request spec.
pub struct Orchestrator {
    dispatcher: Arc<dyn Dispatch>,
    spec: Arc<RequestSpec>,
    config: RunConfig,
}

impl Orchestrator {
    #[must_use]
    pub fn new(dispatcher: Arc<dyn Dispatch>, spec: RequestSpec, config: RunConfig) -> Self {
        Self {
            dispatcher,
            spec: Arc::new(spec),
            config,
        }
    }

    /// Executes one run with a fresh aggregator and logs the summary.
    ///
    /// # Errors
    ///
    /// Returns an error only when a worker or monitor task panics.
    pub async fn run(&self) -> AppResult<RunReport> {
        let stats = Arc::new(StatsAggregator::new(self.config.report_stats));
        self.run_with(&stats).await
    }

    /// Executes one run, recording into the given aggregator.
    ///
    /// The summary is built only after every monitor has finished, so each
    /// result has been classified by then.
    ///
    /// # Errors
    ///
    /// Returns an error only when a worker or monitor task panics.
    pub async fn run_with(&self, stats: &Arc<StatsAggregator>) -> AppResult<RunReport> {
        let worker_count = self.config.workers.get();
        debug!(
            workers = worker_count,
            times = self.config.times.get(),
            stats = stats.is_enabled(),
            target = %self.spec.target(),
            "starting run"
        );

        let mut monitor_handles = Vec::with_capacity(worker_count);
        let mut worker_handles = Vec::with_capacity(worker_count);
        for id in 0..worker_count {
            let worker = Worker::spawn(
                id,
                Arc::clone(&self.dispatcher),
                Arc::clone(&self.spec),
                self.config.times,
                self.config.wait,
                self.config.monitor_buffer,
            );
            let (results, worker_handle) = worker.into_parts();
            let monitor = Monitor::new(id, results, Arc::clone(stats));
            monitor_handles.push(tokio::spawn(monitor.run()));
            worker_handles.push(worker_handle);
        }

        let mut observed: u64 = 0;
        for handle in monitor_handles {
            observed = observed.saturating_add(handle.await?);
        }
        for handle in worker_handles {
            handle.await?;
        }

        let report = stats.report();
        if let Some(report) = report.as_ref() {
            for line in summary_lines(report) {
                info!("{}", line);
            }
        }

        Ok(RunReport {
            observed,
            stats: report,
        })
    }
}
