use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::http::Outcome;
use crate::stats::StatsAggregator;

use super::types::AttemptResult;

/// Drains one worker's queue, logging and classifying every result.
pub struct Monitor {
    worker_id: usize,
    results: mpsc::Receiver<AttemptResult>,
    stats: Arc<StatsAggregator>,
}

impl Monitor {
    #[must_use]
    pub const fn new(
        worker_id: usize,
        results: mpsc::Receiver<AttemptResult>,
        stats: Arc<StatsAggregator>,
    ) -> Self {
        Self {
            worker_id,
            results,
            stats,
        }
    }

    /// Runs until the worker closes its queue and returns how many results
    /// were observed.
    pub async fn run(mut self) -> u64 {
        let mut observed: u64 = 0;
        while let Some(result) = self.results.recv().await {
            self.observe(result);
            observed = observed.saturating_add(1);
        }
        debug!(worker = self.worker_id, observed, "worker finished");
        observed
    }

    fn observe(&self, result: AttemptResult) {
        let worker = self.worker_id;
        debug!(
            worker,
            "duration: {} - {:?}",
            result.start.to_rfc3339(),
            result.duration
        );

        match result.outcome {
            Outcome::Success {
                status,
                headers,
                body,
            } => {
                debug!(worker, "status: {}", status);
                debug!(worker, "headers: {:?}", headers);
                info!(worker, "{}", String::from_utf8_lossy(&body));
                self.stats.record_success(result.duration);
            }
            Outcome::RequestError { cause } => {
                warn!(worker, timeout = cause.is_timeout(), "request error: {}", cause);
                self.stats.record_request_error(cause, result.duration);
            }
            Outcome::ReadError {
                status,
                headers,
                cause,
            } => {
                debug!(worker, "status: {}", status);
                debug!(worker, "headers: {:?}", headers);
                warn!(worker, "response read error: {}", cause);
                self.stats.record_read_error(cause, result.duration);
            }
        }
    }
}
